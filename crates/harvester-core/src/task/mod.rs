//! Task state machine.
//!
//! Tasks live in the jobs graph with an `adms:status`. This module owns every
//! status change: the atomic claim, conditional transitions, scoped runs that
//! always end in a terminal status, and startup recovery of orphaned tasks.

mod guard;
mod handle;
mod machine;
mod status;

pub use handle::{ClaimedTask, TaskHandle, TaskSummary};
pub use machine::TaskStateMachine;
pub use status::{Operation, TaskStatus};
