use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::engine::backend::{ApiError, BatchBackend};
use crate::engine::report::ReportSaver;
use crate::models::{Batch, Notification, PendingUpload, ReportKind};

pub const UPLOAD_OK: &str = "File uploaded successfully.";
pub const UPLOAD_FAILED: &str = "Error uploading file.";
pub const LIST_FAILED: &str = "Failed to fetch batches.";
pub const INVOKE_OK: &str = "Invoked Payment Successfully.";
pub const INVOKE_FAILED: &str = "Failed to invoke payment.";
pub const REPORT_OK: &str = "CSV report downloaded.";
pub const REPORT_FAILED: &str = "Failed to download CSV report.";

/// Something the gateway flips while a request is in flight.
pub trait BusySignal {
	fn set_busy(&self, busy: bool);
}

/// Holds the busy signal raised for as long as it lives.
pub struct BusyGuard<'a> {
	signal: &'a dyn BusySignal,
}

impl<'a> BusyGuard<'a> {
	pub fn acquire(signal: &'a dyn BusySignal) -> Self {
		signal.set_busy(true);
		Self { signal }
	}
}

impl Drop for BusyGuard<'_> {
	fn drop(&mut self) {
		self.signal.set_busy(false);
	}
}

/// Uniform result of a gateway call: always a usable value, plus what the
/// operator should be told and, on failure, what went wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
	pub value: T,
	pub notice: Option<Notification>,
	pub failure: Option<String>,
}

impl<T> Outcome<T> {
	fn ok(value: T, notice: Option<Notification>) -> Self {
		Self { value, notice, failure: None }
	}

	fn failed(value: T, text: &str, err: &ApiError) -> Self {
		Self {
			value,
			notice: Some(Notification::error(text)),
			failure: Some(err.to_string()),
		}
	}

	pub fn is_success(&self) -> bool {
		self.failure.is_none()
	}
}

/// Single place where network operations are issued. Never returns an error:
/// failures become an error notification and a safe default value.
pub struct ApiGateway<B> {
	backend: B,
	reports: ReportSaver,
}

impl<B: BatchBackend> ApiGateway<B> {
	pub fn new(backend: B, reports: ReportSaver) -> Self {
		Self { backend, reports }
	}

	pub async fn upload_batch_file(&self, file: &PendingUpload, busy: &dyn BusySignal) -> Outcome<()> {
		let _busy = BusyGuard::acquire(busy);
		match self.backend.upload_xml(file).await {
			Ok(()) => {
				info!("uploaded {}", file.display_name);
				Outcome::ok((), Some(Notification::success(UPLOAD_OK)))
			}
			Err(e) => {
				error!("upload of {} failed: {}", file.display_name, e);
				Outcome::failed((), UPLOAD_FAILED, &e)
			}
		}
	}

	pub async fn list_batches(&self, busy: &dyn BusySignal) -> Outcome<Vec<Batch>> {
		let _busy = BusyGuard::acquire(busy);
		match self.backend.list_batches().await {
			Ok(batches) => {
				info!("fetched {} batches", batches.len());
				Outcome::ok(batches, None)
			}
			Err(e) => {
				error!("batch list failed: {}", e);
				Outcome::failed(Vec::new(), LIST_FAILED, &e)
			}
		}
	}

	pub async fn invoke_payment(&self, batch_id: &str, busy: &dyn BusySignal) -> Outcome<bool> {
		let _busy = BusyGuard::acquire(busy);
		match self.backend.invoke_payment(batch_id).await {
			Ok(()) => {
				info!("payment invoked for batch {}", batch_id);
				Outcome::ok(true, Some(Notification::success(INVOKE_OK)))
			}
			Err(e) => {
				warn!("payment invocation for batch {} failed: {}", batch_id, e);
				Outcome::failed(false, INVOKE_FAILED, &e)
			}
		}
	}

	/// Fetch a report and save it as `report.csv`; yields the saved path.
	pub async fn download_report(
		&self,
		batch_id: &str,
		kind: ReportKind,
		busy: &dyn BusySignal,
	) -> Outcome<Option<PathBuf>> {
		let _busy = BusyGuard::acquire(busy);
		let result = match self.backend.fetch_report(batch_id, kind).await {
			Ok(bytes) => self.reports.save_async(bytes).await.map_err(ApiError::from),
			Err(e) => Err(e),
		};
		match result {
			Ok(path) => {
				info!("{} report for batch {} saved", kind.agg_type(), batch_id);
				Outcome::ok(Some(path), Some(Notification::success(REPORT_OK)))
			}
			Err(e) => {
				error!("{} report for batch {} failed: {}", kind.agg_type(), batch_id, e);
				Outcome::failed(None, REPORT_FAILED, &e)
			}
		}
	}
}
