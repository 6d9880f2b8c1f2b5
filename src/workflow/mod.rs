pub mod controller;
pub mod intent;
pub mod staging;
pub mod state;
pub mod store;

pub use controller::WorkflowController;
pub use intent::Intent;
pub use state::{ActiveNotification, WorkflowState};
pub use store::StateHandle;
