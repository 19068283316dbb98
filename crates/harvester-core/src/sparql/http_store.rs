//! [`GraphStore`] over HTTP: form-encoded POSTs to a SPARQL endpoint.

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::http;

use super::{GraphStore, QueryResults};

const RESULTS_JSON: &str = "application/sparql-results+json";

/// SPARQL endpoint reached with blocking curl requests.
#[derive(Debug, Clone)]
pub struct HttpStore {
    endpoint: String,
    sudo: bool,
}

impl HttpStore {
    pub fn new(endpoint: impl Into<String>, sudo: bool) -> Self {
        Self {
            endpoint: endpoint.into(),
            sudo,
        }
    }

    pub fn from_config(cfg: &StoreConfig) -> Self {
        Self::new(cfg.endpoint.clone(), cfg.sudo)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers(&self, accept: &str) -> Vec<String> {
        let mut headers = vec![format!("Accept: {accept}")];
        if self.sudo {
            headers.push("mu-auth-sudo: true".to_string());
        }
        headers
    }

    fn post(&self, field: &str, text: &str, accept: &str) -> Result<Vec<u8>, StoreError> {
        let resp = http::post_form(&self.endpoint, &[(field, text)], &self.headers(accept))?;
        if !resp.is_success() {
            return Err(StoreError::Http {
                status: resp.status,
                body: resp.text(),
            });
        }
        Ok(resp.body)
    }
}

impl GraphStore for HttpStore {
    fn query(&self, query: &str) -> Result<QueryResults, StoreError> {
        tracing::trace!(endpoint = %self.endpoint, "sparql query:\n{}", query);
        let body = self.post("query", query, RESULTS_JSON)?;
        Ok(QueryResults::from_json(&body)?)
    }

    fn update(&self, update: &str) -> Result<(), StoreError> {
        tracing::trace!(endpoint = %self.endpoint, "sparql update:\n{}", update);
        self.post("update", update, "application/json, */*")?;
        Ok(())
    }
}
