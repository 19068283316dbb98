//! RAII guard that fails a busy task if its run exits without a terminal transition.

use super::{ClaimedTask, TaskStateMachine, TaskStatus};

/// Marks the task failed when dropped while still armed (panic in the body,
/// or the success transition itself erroring).
pub(super) struct BusyGuard<'m, 'a> {
    machine: &'m TaskStateMachine<'a>,
    claimed: &'m ClaimedTask,
    armed: bool,
}

impl<'m, 'a> BusyGuard<'m, 'a> {
    pub(super) fn new(machine: &'m TaskStateMachine<'a>, claimed: &'m ClaimedTask) -> Self {
        Self {
            machine,
            claimed,
            armed: true,
        }
    }

    /// The run reached a terminal transition on its own.
    pub(super) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for BusyGuard<'_, '_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let uri = &self.claimed.task.uri;
        tracing::warn!(task = %uri, "run ended without terminal status; marking failed");
        if let Err(e) = self.machine.release(self.claimed, TaskStatus::Failed, &[]) {
            tracing::error!(task = %uri, "could not mark task failed: {}", e);
        }
    }
}
