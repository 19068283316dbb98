//! Task lifecycle states and the operation dispatch table.

use std::fmt;

use crate::config::VocabularyConfig;

/// Lifecycle of a task: scheduled → busy → {success, failed}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Scheduled,
    Busy,
    Success,
    Failed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Scheduled,
        TaskStatus::Busy,
        TaskStatus::Success,
        TaskStatus::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Scheduled => "scheduled",
            TaskStatus::Busy => "busy",
            TaskStatus::Success => "success",
            TaskStatus::Failed => "failed",
        }
    }

    /// Status IRI as stored in the graph.
    pub fn iri(self, vocab: &VocabularyConfig) -> &str {
        match self {
            TaskStatus::Scheduled => &vocab.status_scheduled,
            TaskStatus::Busy => &vocab.status_busy,
            TaskStatus::Success => &vocab.status_success,
            TaskStatus::Failed => &vocab.status_failed,
        }
    }

    /// Inverse of [`TaskStatus::iri`]; `None` for statuses this engine does not manage.
    pub fn from_iri(iri: &str, vocab: &VocabularyConfig) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.iri(vocab) == iri)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Failed)
    }

    /// True for the three edges of the lifecycle.
    pub fn can_transition_to(self, to: TaskStatus) -> bool {
        matches!(
            (self, to),
            (TaskStatus::Scheduled, TaskStatus::Busy)
                | (TaskStatus::Busy, TaskStatus::Success)
                | (TaskStatus::Busy, TaskStatus::Failed)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task operations this engine can execute. Each maps to one processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Discover PDF links for a source and register them as remote data objects.
    PdfScraping,
}

impl Operation {
    pub fn iri(self, vocab: &VocabularyConfig) -> &str {
        match self {
            Operation::PdfScraping => &vocab.harvest_operation,
        }
    }

    pub fn from_iri(iri: &str, vocab: &VocabularyConfig) -> Option<Self> {
        if iri == vocab.harvest_operation {
            Some(Operation::PdfScraping)
        } else {
            None
        }
    }
}
