use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::engine::backend::BatchBackend;
use crate::engine::gateway::{ApiGateway, BusySignal, Outcome};
use crate::models::{Notification, PendingUpload, ReportKind};
use crate::workflow::intent::Intent;
use crate::workflow::state::ActiveNotification;
use crate::workflow::store::StateHandle;

/// Routes the gateway's busy signal into `is_loading`. Overlapping calls
/// are counted so the flag only drops when the last one finishes.
struct LoadingFlag<'a, S>(&'a S);

impl<S: StateHandle> BusySignal for LoadingFlag<'_, S> {
    fn set_busy(&self, busy: bool) {
        self.0.write(|s| {
            if busy {
                s.in_flight += 1;
            } else {
                s.in_flight = s.in_flight.saturating_sub(1);
            }
            s.is_loading = s.in_flight > 0;
        });
    }
}

/// Sequences gateway calls in response to intents and is the only writer
/// of the workflow state.
pub struct WorkflowController<B, S> {
    gateway: ApiGateway<B>,
    state: S,
}

impl<B: BatchBackend, S: StateHandle> WorkflowController<B, S> {
    pub fn new(gateway: ApiGateway<B>, state: S) -> Self {
        Self { gateway, state }
    }

    pub async fn dispatch(&self, intent: Intent) {
        match intent {
            Intent::SelectFile(upload) => self.select_file(upload),
            Intent::ClearFile => self.clear_file(),
            Intent::OpenUploadSurface => self.open_upload_surface(),
            Intent::CloseUploadSurface => self.close_upload_surface().await,
            Intent::SubmitUpload => self.submit_upload().await,
            Intent::SubmitInvokePayment(id) => self.submit_invoke_payment(&id).await,
            Intent::SelectForMenu(id) => self.select_for_menu(&id),
            Intent::DismissMenu => self.dismiss_menu(),
            Intent::RequestReport(id, kind) => self.request_report(&id, kind).await,
            Intent::DismissNotification => self.dismiss_notification(),
        }
    }

    /// Replace the batch snapshot with a fresh fetch. A failed fetch
    /// yields an empty list.
    pub async fn refresh(&self) {
        self.begin_attempt();
        self.reload().await;
    }

    /// Refetch as the tail of another operation. That operation's failure
    /// stays in `last_error` unless the fetch itself fails.
    async fn reload(&self) {
        let outcome = self.gateway.list_batches(&LoadingFlag(&self.state)).await;
        let batches = outcome.value.clone();
        self.state.write(|s| {
            // selection is a weak reference; drop it once the batch is gone
            let dangling = s
                .selection
                .as_deref()
                .is_some_and(|id| !batches.iter().any(|b| b.id == id));
            if dangling {
                s.selection = None;
            }
            s.batches = batches;
        });
        self.record(outcome);
    }

    /// Ask the server to pay out a batch, then re-observe. The refresh runs
    /// whatever the invocation reported.
    pub async fn submit_invoke_payment(&self, batch_id: &str) {
        info!("invoking payment for batch {}", batch_id);
        self.begin_attempt();
        let outcome = self.gateway.invoke_payment(batch_id, &LoadingFlag(&self.state)).await;
        self.record(outcome);
        self.reload().await;
    }

    /// Upload the staged file, then close the upload surface and refresh.
    /// The surface closes even when the upload failed.
    pub async fn submit_upload(&self) {
        let Some(file) = self.state.read(|s| s.staging.pending().cloned()) else {
            warn!("submit requested with no staged file");
            return;
        };

        self.begin_attempt();
        let outcome = self
            .gateway
            .upload_batch_file(&file, &LoadingFlag(&self.state))
            .await;
        if outcome.is_success() {
            self.state.write(|s| s.staging.clear_file());
        } else {
            warn!("upload of {} failed; closing upload surface anyway", file.display_name);
        }
        self.record(outcome);
        self.state.write(|s| s.upload_open = false);
        self.reload().await;
    }

    pub fn open_upload_surface(&self) {
        self.state.write(|s| s.upload_open = true);
    }

    pub async fn close_upload_surface(&self) {
        self.state.write(|s| s.upload_open = false);
        self.refresh().await;
    }

    pub fn select_file(&self, upload: PendingUpload) {
        info!("staged {} ({} bytes)", upload.display_name, upload.content.len());
        self.state.write(|s| s.staging.select_file(upload));
    }

    pub fn clear_file(&self) {
        self.state.write(|s| s.staging.clear_file());
    }

    pub fn select_for_menu(&self, batch_id: &str) {
        self.state.write(|s| s.selection = Some(batch_id.to_string()));
    }

    pub fn dismiss_menu(&self) {
        self.state.write(|s| s.selection = None);
    }

    /// Reports are side queries; batches are not refreshed afterwards.
    pub async fn request_report(&self, batch_id: &str, kind: ReportKind) {
        self.dismiss_menu();
        self.begin_attempt();
        let outcome = self
            .gateway
            .download_report(batch_id, kind, &LoadingFlag(&self.state))
            .await;
        self.record(outcome);
    }

    pub fn dismiss_notification(&self) {
        self.state.write(|s| s.active_notification = None);
    }

    /// Clear the notification once it has been visible for `ttl`.
    pub fn expire_notification(&self, ttl: Duration) {
        let expired = self.state.read(|s| {
            s.active_notification
                .as_ref()
                .is_some_and(|n| n.is_expired(ttl))
        });
        if expired {
            self.dismiss_notification();
        }
    }

    fn begin_attempt(&self) {
        self.state.write(|s| s.last_error = None);
    }

    fn notify(&self, notification: Notification) {
        self.state.write(|s| {
            s.active_notification = Some(ActiveNotification {
                notification,
                shown_at: Instant::now(),
            })
        });
    }

    fn record<T>(&self, outcome: Outcome<T>) {
        if let Some(failure) = outcome.failure {
            self.state.write(|s| s.last_error = Some(failure));
        }
        if let Some(notice) = outcome.notice {
            self.notify(notice);
        }
    }
}
