use crate::models::{PendingUpload, ReportKind};

/// Raw user intents emitted by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SelectFile(PendingUpload),
    ClearFile,
    OpenUploadSurface,
    CloseUploadSurface,
    SubmitUpload,
    SubmitInvokePayment(String),
    SelectForMenu(String),
    DismissMenu,
    RequestReport(String, ReportKind),
    DismissNotification,
}
