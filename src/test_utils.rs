//! Shared fixtures for unit tests: an in-memory backend with scripted
//! responses, and a batch builder.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::oneshot;

use crate::engine::backend::{ApiError, BatchBackend};
use crate::models::{Batch, BatchStatus, PendingUpload, ReportKind};
use crate::workflow::{StateHandle, WorkflowState};

pub fn batch(id: &str, status: &str) -> Batch {
	Batch {
		id: id.to_string(),
		date_created: "2023-09-21T10:15:30".to_string(),
		batch_name: format!("{id}_payments"),
		valid_transactions: 5,
		total_transactions: 5,
		invalid_transactions: 0,
		status: BatchStatus::from(status.to_string()),
	}
}

/// In-memory state handle for driving the controller without a UI.
#[derive(Clone, Default)]
pub struct SharedState(Rc<RefCell<WorkflowState>>);

impl SharedState {
	pub fn snapshot(&self) -> WorkflowState {
		self.0.borrow().clone()
	}
}

impl StateHandle for SharedState {
	fn read<R>(&self, f: impl FnOnce(&WorkflowState) -> R) -> R {
		f(&self.0.borrow())
	}

	fn write<R>(&self, f: impl FnOnce(&mut WorkflowState) -> R) -> R {
		f(&mut self.0.borrow_mut())
	}
}

enum ListStep {
	Ready(Result<Vec<Batch>, StatusCode>),
	Gated(oneshot::Receiver<Vec<Batch>>),
}

#[derive(Default)]
struct Inner {
	list_script: Mutex<VecDeque<ListStep>>,
	list_calls: AtomicUsize,
	fail_uploads: AtomicBool,
	fail_invocations: AtomicBool,
	fail_reports: AtomicBool,
	report_body: Mutex<Vec<u8>>,
	uploads: Mutex<Vec<String>>,
	invocations: Mutex<Vec<String>>,
	report_requests: Mutex<Vec<(String, ReportKind)>>,
}

/// Backend double. Clones share state so a test can keep a handle after
/// moving one into the gateway. Unscripted list calls return an empty list.
#[derive(Clone, Default)]
pub struct FakeBackend(Arc<Inner>);

impl FakeBackend {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_list(&self, batches: Vec<Batch>) {
		self.0.list_script.lock().unwrap().push_back(ListStep::Ready(Ok(batches)));
	}

	pub fn push_list_failure(&self) {
		self.0
			.list_script
			.lock()
			.unwrap()
			.push_back(ListStep::Ready(Err(StatusCode::INTERNAL_SERVER_ERROR)));
	}

	/// The next list call blocks until the returned sender fires.
	pub fn push_gated_list(&self) -> oneshot::Sender<Vec<Batch>> {
		let (tx, rx) = oneshot::channel();
		self.0.list_script.lock().unwrap().push_back(ListStep::Gated(rx));
		tx
	}

	pub fn fail_uploads(&self) {
		self.0.fail_uploads.store(true, Ordering::SeqCst);
	}

	pub fn fail_invocations(&self) {
		self.0.fail_invocations.store(true, Ordering::SeqCst);
	}

	pub fn fail_reports(&self) {
		self.0.fail_reports.store(true, Ordering::SeqCst);
	}

	pub fn set_report(&self, body: &[u8]) {
		*self.0.report_body.lock().unwrap() = body.to_vec();
	}

	pub fn list_calls(&self) -> usize {
		self.0.list_calls.load(Ordering::SeqCst)
	}

	pub fn uploads(&self) -> Vec<String> {
		self.0.uploads.lock().unwrap().clone()
	}

	pub fn invocations(&self) -> Vec<String> {
		self.0.invocations.lock().unwrap().clone()
	}

	pub fn report_requests(&self) -> Vec<(String, ReportKind)> {
		self.0.report_requests.lock().unwrap().clone()
	}
}

#[async_trait]
impl BatchBackend for FakeBackend {
	async fn upload_xml(&self, file: &PendingUpload) -> Result<(), ApiError> {
		self.0.uploads.lock().unwrap().push(file.display_name.clone());
		if self.0.fail_uploads.load(Ordering::SeqCst) {
			return Err(ApiError::Status(StatusCode::BAD_GATEWAY));
		}
		Ok(())
	}

	async fn list_batches(&self) -> Result<Vec<Batch>, ApiError> {
		self.0.list_calls.fetch_add(1, Ordering::SeqCst);
		let step = self.0.list_script.lock().unwrap().pop_front();
		match step {
			None => Ok(Vec::new()),
			Some(ListStep::Ready(Ok(batches))) => Ok(batches),
			Some(ListStep::Ready(Err(status))) => Err(ApiError::Status(status)),
			Some(ListStep::Gated(rx)) => rx
				.await
				.map_err(|_| ApiError::Status(StatusCode::GATEWAY_TIMEOUT)),
		}
	}

	async fn invoke_payment(&self, batch_id: &str) -> Result<(), ApiError> {
		self.0.invocations.lock().unwrap().push(batch_id.to_string());
		if self.0.fail_invocations.load(Ordering::SeqCst) {
			return Err(ApiError::Status(StatusCode::BAD_REQUEST));
		}
		Ok(())
	}

	async fn fetch_report(&self, batch_id: &str, kind: ReportKind) -> Result<Vec<u8>, ApiError> {
		self.0.report_requests.lock().unwrap().push((batch_id.to_string(), kind));
		if self.0.fail_reports.load(Ordering::SeqCst) {
			return Err(ApiError::Status(StatusCode::NOT_FOUND));
		}
		Ok(self.0.report_body.lock().unwrap().clone())
	}
}
