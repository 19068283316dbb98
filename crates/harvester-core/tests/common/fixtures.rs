//! Seed data for the jobs, container, collection and manifestation graphs.

use harvester_core::config::HarvesterConfig;
use harvester_core::discovery::{Discovery, SourceDescriptor};
use harvester_core::task::TaskStatus;
use harvester_core::DiscoveryError;
use std::sync::Mutex;

use super::memory_store::MemoryStore;

pub const PREFIXES: &str = "\
PREFIX task: <http://redpencil.data.gift/vocabularies/tasks/>
PREFIX adms: <http://www.w3.org/ns/adms#>
PREFIX dct: <http://purl.org/dc/terms/>
PREFIX nfo: <http://www.semanticdesktop.org/ontologies/2007/03/22/nfo#>
PREFIX nie: <http://www.semanticdesktop.org/ontologies/2007/01/19/nie#>
PREFIX mu: <http://mu.semte.ch/vocabularies/core/>
PREFIX eli: <http://data.europa.eu/eli/ontology#>
PREFIX harvesting: <http://lblod.data.gift/vocabularies/harvesting/>
";

pub fn task_uri(n: usize) -> String {
    format!("http://data.example/tasks/{n}")
}

/// Harvesting task with status `status` and no input container.
pub fn seed_bare_task(store: &MemoryStore, cfg: &HarvesterConfig, uri: &str, status: TaskStatus) {
    store.seed(&format!(
        "{PREFIXES}INSERT DATA {{ GRAPH <{jobs}> {{
            <{uri}> a task:Task ; task:operation <{op}> ; adms:status <{status}> .
        }} }}",
        jobs = cfg.graphs.jobs,
        op = cfg.vocabulary.harvest_operation,
        status = status.iri(&cfg.vocabulary),
    ));
}

/// Harvesting task whose input container resolves to `source`.
pub fn seed_task(
    store: &MemoryStore,
    cfg: &HarvesterConfig,
    n: usize,
    status: TaskStatus,
    source: &str,
) -> String {
    let uri = task_uri(n);
    seed_bare_task(store, cfg, &uri, status);
    let container = format!("http://data.example/input-containers/{n}");
    let collection = format!("http://data.example/input-collections/{n}");
    let remote = format!("http://data.example/input-objects/{n}");
    store.seed(&format!(
        "{PREFIXES}INSERT DATA {{
            GRAPH <{jobs}> {{ <{uri}> task:inputContainer <{container}> . }}
            GRAPH <{containers}> {{
                <{container}> a nfo:DataContainer ; task:hasHarvestingCollection <{collection}> .
            }}
            GRAPH <{collections}> {{
                <{collection}> a harvesting:HarvestingCollection ; dct:hasPart <{remote}> .
            }}
            GRAPH <{remotes}> {{
                <{remote}> a nfo:RemoteDataObject ; nie:url \"{source}\" .
            }}
        }}",
        jobs = cfg.graphs.jobs,
        containers = cfg.graphs.data_containers,
        collections = cfg.graphs.harvest_collections,
        remotes = cfg.graphs.remote_objects,
    ));
    uri
}

pub fn seed_manifestation(store: &MemoryStore, cfg: &HarvesterConfig, n: usize, url: &str) {
    store.seed(&format!(
        "{PREFIXES}INSERT DATA {{ GRAPH <{graph}> {{
            <http://data.example/manifestations/{n}> a eli:Manifestation ;
                eli:is_exemplified_by <{url}> .
        }} }}",
        graph = cfg.graphs.manifestations,
    ));
}

/// Number of instances of `class` (prefixed name) in `graph`.
pub fn count_instances(store: &MemoryStore, graph: &str, class: &str) -> usize {
    store.count(&format!(
        "{PREFIXES}SELECT (COUNT(DISTINCT ?s) AS ?n) WHERE {{ GRAPH <{graph}> {{ ?s a {class} . }} }}"
    ))
}

/// Counts of remote objects, collections and containers created by the engine
/// (input fixtures live under `http://data.example/` and are excluded).
pub fn created_entities(store: &MemoryStore, cfg: &HarvesterConfig) -> (usize, usize, usize) {
    let created = |graph: &str, class: &str| {
        store.count(&format!(
            "{PREFIXES}SELECT (COUNT(DISTINCT ?s) AS ?n) WHERE {{
                GRAPH <{graph}> {{ ?s a {class} . }}
                FILTER(!STRSTARTS(STR(?s), \"http://data.example/\"))
            }}"
        ))
    };
    (
        created(&cfg.graphs.remote_objects, "nfo:RemoteDataObject"),
        created(&cfg.graphs.harvest_collections, "harvesting:HarvestingCollection"),
        created(&cfg.graphs.data_containers, "nfo:DataContainer"),
    )
}

/// Discovery returning a fixed list (or error) and recording what it was asked.
pub struct StubDiscovery {
    result: Result<Vec<String>, String>,
    pub seen: Mutex<Vec<SourceDescriptor>>,
}

impl StubDiscovery {
    pub fn returning(urls: &[&str]) -> Self {
        Self {
            result: Ok(urls.iter().map(|u| u.to_string()).collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(url: &str) -> Self {
        Self {
            result: Err(url.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Discovery for StubDiscovery {
    fn discover(&self, source: &SourceDescriptor) -> Result<Vec<String>, DiscoveryError> {
        self.seen.lock().unwrap().push(source.clone());
        match &self.result {
            Ok(urls) => Ok(urls.clone()),
            Err(url) => Err(DiscoveryError::Http {
                url: url.clone(),
                status: 503,
            }),
        }
    }
}
