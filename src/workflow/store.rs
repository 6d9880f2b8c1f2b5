use crate::workflow::state::WorkflowState;

/// Access to the single `WorkflowState`. Closures run synchronously, so no
/// borrow is ever held across an await.
pub trait StateHandle {
    fn read<R>(&self, f: impl FnOnce(&WorkflowState) -> R) -> R;

    fn write<R>(&self, f: impl FnOnce(&mut WorkflowState) -> R) -> R;
}
