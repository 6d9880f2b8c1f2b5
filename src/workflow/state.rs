use std::time::{Duration, Instant};

use crate::models::{Batch, Notification};
use crate::workflow::staging::UploadStaging;

/// The notification currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveNotification {
    pub notification: Notification,
    pub shown_at: Instant,
}

impl ActiveNotification {
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.shown_at.elapsed() >= ttl
    }
}

/// Transient console state. Only the workflow controller writes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    /// Full snapshot from the most recently completed fetch.
    pub batches: Vec<Batch>,
    pub is_loading: bool,
    /// Gateway calls currently outstanding.
    pub in_flight: usize,
    pub last_error: Option<String>,
    pub active_notification: Option<ActiveNotification>,
    /// Batch targeted by the report menu (id only).
    pub selection: Option<String>,
    pub upload_open: bool,
    pub staging: UploadStaging,
}

impl WorkflowState {
    pub fn selected_batch(&self) -> Option<&Batch> {
        let id = self.selection.as_deref()?;
        self.batches.iter().find(|b| b.id == id)
    }
}
