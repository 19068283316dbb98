//! Drain loop over open tasks.

use crate::error::StoreError;
use crate::task::TaskStateMachine;

use super::Processors;

/// Outcome counts of one loop invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Claim and run tasks until none is scheduled.
///
/// A failing task is logged and counted, then the loop moves on. A store
/// error while claiming ends this invocation.
pub fn process_open_tasks(
    machine: &TaskStateMachine<'_>,
    processors: &Processors<'_>,
) -> Result<RunSummary, StoreError> {
    let mut summary = RunSummary::default();
    while let Some(claimed) = machine.claim_next()? {
        let uri = claimed.task().uri.clone();
        match machine.run_scoped(claimed, |task| processors.process(task)) {
            Ok(_) => summary.succeeded += 1,
            Err(e) => {
                summary.failed += 1;
                tracing::error!(task = %uri, "task failed: {}", e);
            }
        }
    }
    if summary.total() > 0 {
        tracing::info!(succeeded = summary.succeeded, failed = summary.failed, "open tasks processed");
    } else {
        tracing::debug!("no open tasks");
    }
    Ok(summary)
}
