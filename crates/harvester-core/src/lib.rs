pub mod config;
pub mod control;
pub mod discovery;
pub mod error;
pub mod harvest;
pub mod http;
pub mod logging;
pub mod scheduler;
pub mod service;
pub mod sparql;
pub mod task;

pub use error::{DiscoveryError, StoreError, TaskError};
pub use service::Harvester;
