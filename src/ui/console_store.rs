use dioxus::prelude::*;

use crate::workflow::{StateHandle, WorkflowState};

// ─── Console Store ─────────────────────────────────────────────────────
// Signal-backed workflow state. Components read it to render; only the
// workflow controller writes through it.

#[derive(Clone, Copy, PartialEq)]
pub struct ConsoleStore(pub Signal<WorkflowState>);

impl StateHandle for ConsoleStore {
    fn read<R>(&self, f: impl FnOnce(&WorkflowState) -> R) -> R {
        f(&*self.0.read())
    }

    fn write<R>(&self, f: impl FnOnce(&mut WorkflowState) -> R) -> R {
        let mut signal = self.0;
        // bound so the write guard drops before `signal`
        let out = f(&mut *signal.write());
        out
    }
}
