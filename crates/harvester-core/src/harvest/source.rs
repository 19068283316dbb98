//! Resolve a task's source descriptor through its input container.

use crate::config::HarvesterConfig;
use crate::error::TaskError;
use crate::sparql::{escape, prefixes, GraphStore};
use crate::task::TaskHandle;

pub struct SourceResolver<'a> {
    store: &'a dyn GraphStore,
    cfg: &'a HarvesterConfig,
}

impl<'a> SourceResolver<'a> {
    pub fn new(store: &'a dyn GraphStore, cfg: &'a HarvesterConfig) -> Self {
        Self { store, cfg }
    }

    /// Follow task → input container → harvesting collection → remote object → url.
    /// With several matches the first one returned wins.
    pub fn resolve(&self, task: &TaskHandle) -> Result<String, TaskError> {
        let container = self.input_container(&task.uri)?;
        let graphs = &self.cfg.graphs;
        let query = format!(
            "{prefixes}\
SELECT ?source WHERE {{
  GRAPH {containers} {{ {container} task:hasHarvestingCollection ?collection . }}
  GRAPH {collections} {{ ?collection dct:hasPart ?remote . }}
  GRAPH {remotes} {{ ?remote a nfo:RemoteDataObject ; nie:url ?source . }}
}}
LIMIT 1",
            prefixes = prefixes::header(&["task", "dct", "nfo", "nie"]),
            containers = escape::iri(&graphs.data_containers),
            collections = escape::iri(&graphs.harvest_collections),
            remotes = escape::iri(&graphs.remote_objects),
            container = escape::iri(&container),
        );
        let results = self.store.query(&query)?;
        let source = results.first("source").ok_or_else(|| {
            TaskError::NotFound(format!("remote data object for input container <{container}>"))
        })?;
        tracing::debug!(task = %task.uri, source = %source, "resolved source");
        Ok(source.to_string())
    }

    fn input_container(&self, task_uri: &str) -> Result<String, TaskError> {
        let query = format!(
            "{prefixes}\
SELECT ?container WHERE {{
  GRAPH {jobs} {{ {task} task:inputContainer ?container . }}
}}
LIMIT 1",
            prefixes = prefixes::header(&["task"]),
            jobs = escape::iri(&self.cfg.graphs.jobs),
            task = escape::iri(task_uri),
        );
        let results = self.store.query(&query)?;
        results
            .first("container")
            .map(str::to_string)
            .ok_or_else(|| TaskError::NotFound(format!("input container for task <{task_uri}>")))
    }
}
