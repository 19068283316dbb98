use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// SPARQL endpoint of the shared graph store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Query/update endpoint (overridden by `MU_SPARQL_ENDPOINT`).
    pub endpoint: String,
    /// Send `mu-auth-sudo: true` so writes bypass the authorization layer.
    #[serde(default = "default_true")]
    pub sudo: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://database:8890/sparql".to_string(),
            sudo: true,
        }
    }
}

/// Named graphs read and written by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub jobs: String,
    pub data_containers: String,
    pub harvest_collections: String,
    pub remote_objects: String,
    pub files: String,
    /// Read-only graph holding already processed manifestations.
    pub manifestations: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        let graph = |name: &str| format!("http://mu.semte.ch/graphs/{name}");
        Self {
            jobs: graph("jobs"),
            data_containers: graph("data-containers"),
            harvest_collections: graph("harvest-collections"),
            remote_objects: graph("remote-objects"),
            files: graph("files"),
            manifestations: graph("manifestations"),
        }
    }
}

/// Status and operation IRIs shared with the other services of the stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    pub status_scheduled: String,
    pub status_busy: String,
    pub status_success: String,
    pub status_failed: String,
    /// Operation IRI identifying PDF harvesting tasks.
    pub harvest_operation: String,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        let status = |name: &str| format!("http://redpencil.data.gift/id/concept/JobStatus/{name}");
        Self {
            status_scheduled: status("scheduled"),
            status_busy: status("busy"),
            status_success: status("success"),
            status_failed: status("failed"),
            harvest_operation:
                "http://lblod.data.gift/id/jobs/concept/TaskOperation/pdf-scraping".to_string(),
        }
    }
}

/// URI bases for newly created resources; a fresh UUID is appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub remote_data_object_base: String,
    pub harvest_collection_base: String,
    pub data_container_base: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            remote_data_object_base: "http://lblod.data.gift/id/remote-data-objects/".to_string(),
            harvest_collection_base: "http://lblod.data.gift/id/harvest-collections/".to_string(),
            data_container_base: "http://data.lblod.info/id/data-container/".to_string(),
        }
    }
}

/// Where and how source descriptors are turned into PDF URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Lowercase source identifier -> OParl meeting list endpoint (page number is appended).
    pub oparl_endpoints: BTreeMap<String, String>,
    /// Stop collecting OParl URLs after this many (None = all pages).
    #[serde(default)]
    pub oparl_max_urls: Option<usize>,
    /// Remote graph store queried for city sources.
    pub city_endpoint: String,
    /// Lowercase city name -> URL prefix its published documents start with.
    #[serde(default)]
    pub city_hosts: BTreeMap<String, String>,
    /// Prefix used for cities missing from `city_hosts`; `{city}` is replaced.
    pub city_host_template: String,
    /// Rows requested per city query page.
    pub city_page_size: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        let mut oparl_endpoints = BTreeMap::new();
        oparl_endpoints.insert(
            "freiburg".to_string(),
            "https://ris.freiburg.de/oparl/body/FR/meeting/page/".to_string(),
        );
        Self {
            oparl_endpoints,
            oparl_max_urls: None,
            city_endpoint: "https://centrale-vindplaats.lblod.info/sparql".to_string(),
            city_hosts: BTreeMap::new(),
            city_host_template: "https://{city}.".to_string(),
            city_page_size: 1000,
        }
    }
}

/// Global configuration loaded from `~/.config/harvester/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvesterConfig {
    /// URLs per manifestation lookup query.
    pub dedup_batch_size: usize,
    /// When set, `serve` also scans for open tasks on this interval.
    #[serde(default)]
    pub recheck_interval_secs: Option<u64>,
    /// Startup probes of the store before giving up (one per second).
    pub store_wait_attempts: u32,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub graphs: GraphConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            dedup_batch_size: 20,
            recheck_interval_secs: None,
            store_wait_attempts: 30,
            store: StoreConfig::default(),
            graphs: GraphConfig::default(),
            vocabulary: VocabularyConfig::default(),
            resources: ResourceConfig::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

impl HarvesterConfig {
    /// Apply deployment overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// `MU_SPARQL_ENDPOINT` replaces the store endpoint, `TARGET_GRAPH` every
    /// working graph and `PUBLICATION_GRAPH` the manifestations graph.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(endpoint) = non_empty("MU_SPARQL_ENDPOINT") {
            self.store.endpoint = endpoint;
        }
        if let Some(target) = non_empty("TARGET_GRAPH") {
            self.graphs.jobs = target.clone();
            self.graphs.data_containers = target.clone();
            self.graphs.harvest_collections = target.clone();
            self.graphs.remote_objects = target.clone();
            self.graphs.files = target;
        }
        if let Some(publication) = non_empty("PUBLICATION_GRAPH") {
            self.graphs.manifestations = publication;
        }
    }
}

fn default_true() -> bool {
    true
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("harvester")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
/// Environment overrides are applied on top.
pub fn load_or_init() -> Result<HarvesterConfig> {
    let path = config_path()?;
    let mut cfg = if path.exists() {
        load_from(&path)?
    } else {
        let default_cfg = HarvesterConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        default_cfg
    };
    cfg.apply_env_overrides();
    Ok(cfg)
}

/// Load configuration from an explicit path (no default file is written).
pub fn load_from(path: &Path) -> Result<HarvesterConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: HarvesterConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
