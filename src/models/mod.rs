pub mod batch;
pub mod notification;
pub mod upload;

pub use batch::{Batch, BatchAction, BatchStatus, ReportKind};
pub use notification::{Notification, Severity};
pub use upload::PendingUpload;
