//! Entry points: startup recovery, store readiness and task-created notifications.
//!
//! `Harvester` owns the shared pieces behind `Arc`s and builds the borrowed
//! engine components per invocation, so each loop runs on its own blocking
//! thread without sharing in-process state.

use std::sync::Arc;
use std::time::Duration;

use crate::config::HarvesterConfig;
use crate::discovery::{Discovery, HttpDiscovery};
use crate::error::StoreError;
use crate::scheduler::{self, Processors, RunSummary};
use crate::sparql::{GraphStore, HttpStore};
use crate::task::TaskStateMachine;

#[derive(Clone)]
pub struct Harvester {
    cfg: Arc<HarvesterConfig>,
    store: Arc<dyn GraphStore>,
    discovery: Arc<dyn Discovery>,
}

impl Harvester {
    pub fn new(
        cfg: Arc<HarvesterConfig>,
        store: Arc<dyn GraphStore>,
        discovery: Arc<dyn Discovery>,
    ) -> Self {
        Self {
            cfg,
            store,
            discovery,
        }
    }

    /// Production wiring: SPARQL over HTTP and HTTP discovery.
    pub fn from_config(cfg: HarvesterConfig) -> Self {
        let store = HttpStore::from_config(&cfg.store);
        let discovery = HttpDiscovery::new(&cfg.discovery);
        Self::new(Arc::new(cfg), Arc::new(store), Arc::new(discovery))
    }

    pub fn config(&self) -> &HarvesterConfig {
        &self.cfg
    }

    pub fn machine(&self) -> TaskStateMachine<'_> {
        TaskStateMachine::new(self.store.as_ref(), &self.cfg)
    }

    /// Poll the store until it answers, up to `attempts` times. Blocking.
    pub fn wait_for_store(&self, attempts: u32, delay: Duration) -> Result<(), StoreError> {
        let attempts = attempts.max(1);
        for attempt in 1..=attempts {
            match self.store.ping() {
                Ok(true) => {
                    tracing::info!(attempt, "store is reachable");
                    return Ok(());
                }
                Ok(false) => tracing::debug!(attempt, "store answered without ASK result"),
                Err(e) => tracing::debug!(attempt, "store not ready: {}", e),
            }
            if attempt < attempts {
                std::thread::sleep(delay);
            }
        }
        Err(StoreError::Unavailable(format!(
            "no answer after {attempts} attempt(s)"
        )))
    }

    /// Fail every task left busy by a previous process. Call once before any loop runs.
    pub fn startup_recovery(&self) -> Result<usize, StoreError> {
        let recovered = self.machine().recover_orphans()?;
        if recovered > 0 {
            tracing::info!("recovered {} orphaned task(s) from previous run", recovered);
        }
        Ok(recovered)
    }

    /// Run one scheduler loop on the current thread. Blocking.
    pub fn process_open_tasks(&self) -> Result<RunSummary, StoreError> {
        let machine = self.machine();
        let processors = Processors::new(self.store.as_ref(), self.discovery.as_ref(), &self.cfg);
        scheduler::process_open_tasks(&machine, &processors)
    }

    /// Start a scheduler loop on the Tokio blocking pool. The URI is only
    /// logged: the loop picks up every open task, this one included.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn notify_task_created(
        &self,
        task_uri: Option<&str>,
    ) -> tokio::task::JoinHandle<Result<RunSummary, StoreError>> {
        match task_uri {
            Some(uri) => tracing::info!(task = %uri, "task created; scanning open tasks"),
            None => tracing::info!("scanning open tasks"),
        }
        let harvester = self.clone();
        tokio::task::spawn_blocking(move || {
            let result = harvester.process_open_tasks();
            if let Err(ref e) = result {
                tracing::error!("scheduler loop aborted: {}", e);
            }
            result
        })
    }
}
