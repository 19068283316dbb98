//! Task references passed between the claim, the scoped run and processors.

use super::TaskStatus;

/// A task in the store: its URI and the operation IRI it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskHandle {
    pub uri: String,
    pub operation: String,
}

/// A task this caller moved from scheduled to busy, identified by a claim token.
///
/// Only [`TaskStateMachine::claim_next`](super::TaskStateMachine::claim_next) and
/// [`TaskStateMachine::acquire`](super::TaskStateMachine::acquire) produce it, so
/// holding one means the busy transition already happened.
#[derive(Debug)]
pub struct ClaimedTask {
    pub(super) task: TaskHandle,
    pub(super) claim: String,
}

impl ClaimedTask {
    pub fn task(&self) -> &TaskHandle {
        &self.task
    }

    pub fn claim_token(&self) -> &str {
        &self.claim
    }
}

/// Row for `harvester status`.
#[derive(Debug, Clone)]
pub struct TaskSummary {
    pub uri: String,
    /// `None` when the stored status IRI is not one this engine manages.
    pub status: Option<TaskStatus>,
    pub result_containers: usize,
}
