//! SPARQL 1.1 protocol client for the shared graph store.
//!
//! The engine only depends on the [`GraphStore`] trait: plain query/update
//! text in, JSON results out. [`HttpStore`] is the production implementation.

pub mod escape;
mod http_store;
pub mod prefixes;
mod results;

pub use http_store::HttpStore;
pub use results::{Binding, QueryResults, RdfTerm, ResultSet, ResultsHead};

use crate::error::StoreError;

/// A graph store that accepts SPARQL 1.1 queries and updates.
///
/// Each `update` call is assumed to apply atomically; conditional transitions
/// and the task claim rely on it.
pub trait GraphStore: Send + Sync {
    fn query(&self, query: &str) -> Result<QueryResults, StoreError>;
    fn update(&self, update: &str) -> Result<(), StoreError>;

    /// True if the store answers a trivial ASK.
    fn ping(&self) -> Result<bool, StoreError> {
        let r = self.query("ASK { ?s ?p ?o }")?;
        Ok(r.boolean.is_some())
    }
}
