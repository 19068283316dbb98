//! Drop candidate URLs that already have a processed manifestation.

use std::collections::HashSet;

use crate::config::HarvesterConfig;
use crate::error::StoreError;
use crate::sparql::{escape, prefixes, GraphStore};

pub struct Deduplicator<'a> {
    store: &'a dyn GraphStore,
    cfg: &'a HarvesterConfig,
}

impl<'a> Deduplicator<'a> {
    pub fn new(store: &'a dyn GraphStore, cfg: &'a HarvesterConfig) -> Self {
        Self { store, cfg }
    }

    /// URLs from `urls` not yet exemplifying a manifestation, in input order.
    ///
    /// Checked in batches of `dedup_batch_size`, one query each; empty input
    /// touches no store. Repeats inside `urls` are kept (see [`collapse_repeats`]).
    pub fn filter_new(&self, urls: &[String]) -> Result<Vec<String>, StoreError> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }
        let mut known: HashSet<String> = HashSet::new();
        for batch in urls.chunks(self.cfg.dedup_batch_size.max(1)) {
            let found = self.known_in(batch)?;
            tracing::debug!(batch = batch.len(), known = found.len(), "manifestation lookup");
            known.extend(found);
        }
        let fresh: Vec<String> = urls
            .iter()
            .filter(|u| !known.contains(&escape::iri_value(u)))
            .cloned()
            .collect();
        tracing::info!(candidates = urls.len(), new = fresh.len(), "deduplicated URLs");
        Ok(fresh)
    }

    fn known_in(&self, batch: &[String]) -> Result<Vec<String>, StoreError> {
        let values: Vec<String> = batch.iter().map(|u| escape::iri(u)).collect();
        let query = format!(
            "{prefixes}\
SELECT DISTINCT ?url WHERE {{
  GRAPH {graph} {{
    VALUES ?url {{ {values} }}
    ?manifestation a eli:Manifestation ; eli:is_exemplified_by ?url .
  }}
}}",
            prefixes = prefixes::header(&["eli"]),
            graph = escape::iri(&self.cfg.graphs.manifestations),
            values = values.join(" "),
        );
        Ok(self.store.query(&query)?.values("url").map(str::to_string).collect())
    }
}

/// Keep the first occurrence of each URL, preserving order. Spellings that
/// are stored as the same IRI (`a b.pdf`, `a%20b.pdf`) count as one URL.
pub fn collapse_repeats(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|u| seen.insert(escape::iri_value(u)))
        .collect()
}
