use crate::models::PendingUpload;

/// Holds at most one locally picked file waiting to be uploaded.
/// Never touches the network.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadStaging {
    pending: Option<PendingUpload>,
    reset_token: u64,
}

impl UploadStaging {
    /// Replace whatever is staged. Content is not inspected; the server
    /// decides whether the file is valid.
    pub fn select_file(&mut self, upload: PendingUpload) {
        self.pending = Some(upload);
    }

    /// Discard the staged file and reset the pick affordance.
    pub fn clear_file(&mut self) {
        self.pending = None;
        self.reset_token += 1;
    }

    pub fn has_file(&self) -> bool {
        self.pending.is_some()
    }

    pub fn display_name(&self) -> &str {
        self.pending
            .as_ref()
            .map(|p| p.display_name.as_str())
            .unwrap_or("")
    }

    pub fn pending(&self) -> Option<&PendingUpload> {
        self.pending.as_ref()
    }

    /// Changes every time the staged file is cleared; the view keys its
    /// file-pick control on it so a clear also resets that control.
    pub fn reset_token(&self) -> u64 {
        self.reset_token
    }
}
