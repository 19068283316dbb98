//! In-memory SPARQL 1.1 store for integration tests, backed by oxigraph.
//!
//! Updates are serialized with a lock so each one applies atomically, like a
//! single request against the real endpoint. Every call is counted so tests can
//! assert how many round trips a component made.

use harvester_core::sparql::{Binding, GraphStore, QueryResults, RdfTerm};
use harvester_core::StoreError;
use oxigraph::model::Term;
use oxigraph::sparql::QueryResults as OxResults;
use oxigraph::store::Store;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct MemoryStore {
    store: Store,
    write_lock: Mutex<()>,
    queries: AtomicUsize,
    updates: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            store: Store::new().expect("in-memory store"),
            write_lock: Mutex::new(()),
            queries: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn reset_counts(&self) {
        self.queries.store(0, Ordering::SeqCst);
        self.updates.store(0, Ordering::SeqCst);
    }

    /// Run an update that must succeed (fixtures).
    pub fn seed(&self, update: &str) {
        self.update(update).expect("seed update");
        self.updates.fetch_sub(1, Ordering::SeqCst);
    }

    /// Integer result of a `SELECT (COUNT(...) AS ?n)` query.
    pub fn count(&self, query: &str) -> usize {
        let r = self.query(query).expect("count query");
        self.queries.fetch_sub(1, Ordering::SeqCst);
        r.first("n").and_then(|v| v.parse().ok()).unwrap_or(0)
    }

    /// All values of `var` (fixtures/assertions, not counted).
    pub fn select(&self, query: &str, var: &str) -> Vec<String> {
        let r = self.query(query).expect("select query");
        self.queries.fetch_sub(1, Ordering::SeqCst);
        r.values(var).map(str::to_string).collect()
    }
}

fn convert_term(term: &Term) -> RdfTerm {
    match term {
        Term::NamedNode(n) => RdfTerm::iri(n.as_str()),
        Term::BlankNode(b) => RdfTerm::bnode(b.as_str()),
        Term::Literal(l) => RdfTerm::literal(l.value()),
        #[allow(unreachable_patterns)]
        other => RdfTerm::literal(other.to_string()),
    }
}

impl GraphStore for MemoryStore {
    fn query(&self, query: &str) -> Result<QueryResults, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let results = self
            .store
            .query(query)
            .map_err(|e| StoreError::Unavailable(format!("query: {e}\n{query}")))?;
        match results {
            OxResults::Boolean(b) => Ok(QueryResults::from_boolean(b)),
            OxResults::Solutions(solutions) => {
                let vars: Vec<String> = solutions
                    .variables()
                    .iter()
                    .map(|v| v.as_str().to_string())
                    .collect();
                let mut rows = Vec::new();
                for solution in solutions {
                    let solution =
                        solution.map_err(|e| StoreError::Unavailable(format!("solution: {e}")))?;
                    let mut row = Binding::new();
                    for (var, term) in solution.iter() {
                        row.insert(var.as_str().to_string(), convert_term(term));
                    }
                    rows.push(row);
                }
                Ok(QueryResults::from_bindings(vars, rows))
            }
            OxResults::Graph(_) => Err(StoreError::Unavailable(
                "CONSTRUCT/DESCRIBE not supported".to_string(),
            )),
        }
    }

    fn update(&self, update: &str) -> Result<(), StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let _guard = self.write_lock.lock().unwrap();
        self.store
            .update(update)
            .map_err(|e| StoreError::Unavailable(format!("update: {e}\n{update}")))
    }
}
