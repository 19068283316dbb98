//! PDF harvesting job: source → discovery → dedup → materialization.

mod dedup;
mod materialize;
mod source;

pub use dedup::{collapse_repeats, Deduplicator};
pub use materialize::EntityMaterializer;
pub use source::SourceResolver;

use crate::config::HarvesterConfig;
use crate::discovery::{Discovery, SourceDescriptor};
use crate::error::TaskError;
use crate::sparql::GraphStore;
use crate::task::TaskHandle;

/// Work executed for a busy task. Returns the result containers to link on success.
pub trait TaskProcessor {
    fn process(&self, task: &TaskHandle) -> Result<Vec<String>, TaskError>;
}

/// Processor for the PDF scraping operation.
pub struct PdfHarvest<'a> {
    cfg: &'a HarvesterConfig,
    resolver: SourceResolver<'a>,
    discovery: &'a dyn Discovery,
    dedup: Deduplicator<'a>,
    materializer: EntityMaterializer<'a>,
}

impl<'a> PdfHarvest<'a> {
    pub fn new(
        store: &'a dyn GraphStore,
        discovery: &'a dyn Discovery,
        cfg: &'a HarvesterConfig,
    ) -> Self {
        Self {
            cfg,
            resolver: SourceResolver::new(store, cfg),
            discovery,
            dedup: Deduplicator::new(store, cfg),
            materializer: EntityMaterializer::new(store, cfg),
        }
    }
}

impl TaskProcessor for PdfHarvest<'_> {
    /// Nothing new to register still succeeds, with no result container.
    fn process(&self, task: &TaskHandle) -> Result<Vec<String>, TaskError> {
        let source = self.resolver.resolve(task)?;
        let descriptor = SourceDescriptor::classify(&source, &self.cfg.discovery);
        let candidates = self.discovery.discover(&descriptor)?;
        let fresh = collapse_repeats(self.dedup.filter_new(&candidates)?);
        let container = self.materializer.materialize(&fresh)?;
        Ok(container.into_iter().collect())
    }
}
