//! Error types for the store protocol, URL discovery and task execution.
//!
//! Library code returns these typed errors so the scheduler can tell a missing
//! entity apart from a failed fetch or an unreachable store. The CLI converts
//! them to `anyhow` at the edge.

use crate::task::TaskStatus;

/// Failure talking to a SPARQL endpoint. Never retried within a task run.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Curl reported an error (connection refused, DNS, timeout).
    #[error("store transport: {0}")]
    Transport(#[from] curl::Error),
    /// Endpoint answered with a non-2xx status.
    #[error("store returned HTTP {status}: {body}")]
    Http { status: u32, body: String },
    /// Response body was not valid SPARQL JSON results.
    #[error("store response decode: {0}")]
    Decode(#[from] serde_json::Error),
    /// Store did not become reachable (startup wait exhausted, embedded store failure).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failure while fetching or parsing a remote source during discovery.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("fetch failed: {0}")]
    Transport(#[from] curl::Error),
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },
    #[error("invalid JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid URL {0:?}")]
    InvalidUrl(String),
    /// A city graph-store endpoint query failed.
    #[error("remote endpoint: {0}")]
    Store(#[from] StoreError),
}

/// Error that ends a task run. Every variant leads to busy → failed.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// A required linked entity (input container, remote object, operation) is absent.
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Requested transition is not part of the task lifecycle.
    #[error("invalid transition {from} -> {to}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },
}
