//! Operation → processor table.

use crate::config::HarvesterConfig;
use crate::discovery::Discovery;
use crate::error::TaskError;
use crate::harvest::{PdfHarvest, TaskProcessor};
use crate::sparql::GraphStore;
use crate::task::{Operation, TaskHandle};

/// One processor per [`Operation`], chosen by a static match.
pub struct Processors<'a> {
    cfg: &'a HarvesterConfig,
    pdf_scraping: PdfHarvest<'a>,
}

impl<'a> Processors<'a> {
    pub fn new(
        store: &'a dyn GraphStore,
        discovery: &'a dyn Discovery,
        cfg: &'a HarvesterConfig,
    ) -> Self {
        Self {
            cfg,
            pdf_scraping: PdfHarvest::new(store, discovery, cfg),
        }
    }

    pub fn for_operation(&self, operation: Operation) -> &dyn TaskProcessor {
        match operation {
            Operation::PdfScraping => &self.pdf_scraping,
        }
    }

    /// Run the processor for the task's operation; unknown operations are `NotFound`.
    pub fn process(&self, task: &TaskHandle) -> Result<Vec<String>, TaskError> {
        let operation = Operation::from_iri(&task.operation, &self.cfg.vocabulary).ok_or_else(|| {
            TaskError::NotFound(format!("processor for operation <{}>", task.operation))
        })?;
        self.for_operation(operation).process(task)
    }
}
