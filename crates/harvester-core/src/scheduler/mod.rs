//! Scheduler loop: claim open tasks one at a time and run them to a terminal status.
//!
//! A loop instance keeps no state between tasks. Several instances (startup,
//! periodic re-check, each notification) may run at once; they coordinate only
//! through the atomic claim in the store.

mod dispatch;
mod worker;

pub use dispatch::Processors;
pub use worker::{process_open_tasks, RunSummary};
