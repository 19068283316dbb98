//! URL discovery: turn a source descriptor into candidate PDF URLs.
//!
//! A descriptor is either an absolute URL (scrape that page), the name of a
//! configured OParl endpoint, or a city name whose documents are looked up in
//! a remote graph store. Discovery has no side effects and may return
//! duplicates; deduplication happens later against the store.

pub mod city;
pub mod oparl;
pub mod page;

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::sparql::HttpStore;

/// Which strategy a raw source descriptor selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    /// Absolute http(s) URL: a PDF itself or a page linking to PDFs.
    WebPage(String),
    /// Known OParl source, with the meeting-list endpoint the page number is appended to.
    OParl { name: String, endpoint: String },
    /// Any other descriptor, lowercased city name.
    City(String),
}

impl SourceDescriptor {
    pub fn classify(raw: &str, cfg: &DiscoveryConfig) -> Self {
        let raw = raw.trim();
        if is_absolute_http_url(raw) {
            return SourceDescriptor::WebPage(raw.to_string());
        }
        let key = raw.to_lowercase();
        match cfg.oparl_endpoints.get(&key) {
            Some(endpoint) => SourceDescriptor::OParl {
                name: key,
                endpoint: endpoint.clone(),
            },
            None => SourceDescriptor::City(key),
        }
    }
}

/// True for `http`/`https` URLs with a host.
pub fn is_absolute_http_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Strategy seam used by the harvest job. Blocking.
pub trait Discovery: Send + Sync {
    fn discover(&self, source: &SourceDescriptor) -> Result<Vec<String>, DiscoveryError>;
}

/// Production discovery over HTTP (pages, OParl JSON, remote SPARQL).
pub struct HttpDiscovery {
    cfg: DiscoveryConfig,
    city_store: HttpStore,
}

impl HttpDiscovery {
    pub fn new(cfg: &DiscoveryConfig) -> Self {
        Self {
            cfg: cfg.clone(),
            city_store: HttpStore::new(cfg.city_endpoint.clone(), false),
        }
    }
}

impl Discovery for HttpDiscovery {
    fn discover(&self, source: &SourceDescriptor) -> Result<Vec<String>, DiscoveryError> {
        let urls = match source {
            SourceDescriptor::WebPage(url) => page::discover(url)?,
            SourceDescriptor::OParl { name, endpoint } => {
                tracing::debug!(source = %name, "OParl discovery");
                oparl::discover(endpoint, self.cfg.oparl_max_urls)?
            }
            SourceDescriptor::City(city) => {
                let prefix = city::host_prefix(city, &self.cfg);
                tracing::debug!(city = %city, prefix = %prefix, "city discovery");
                city::discover(&self.city_store, &prefix, self.cfg.city_page_size)?
            }
        };
        tracing::info!(count = urls.len(), "discovered candidate URLs");
        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_url() {
        let cfg = DiscoveryConfig::default();
        assert_eq!(
            SourceDescriptor::classify("https://city.example/minutes.pdf", &cfg),
            SourceDescriptor::WebPage("https://city.example/minutes.pdf".to_string())
        );
        assert_eq!(
            SourceDescriptor::classify(" http://city.example/besluiten ", &cfg),
            SourceDescriptor::WebPage("http://city.example/besluiten".to_string())
        );
    }

    #[test]
    fn classify_oparl_case_insensitive() {
        let cfg = DiscoveryConfig::default();
        match SourceDescriptor::classify("Freiburg", &cfg) {
            SourceDescriptor::OParl { name, endpoint } => {
                assert_eq!(name, "freiburg");
                assert_eq!(endpoint, "https://ris.freiburg.de/oparl/body/FR/meeting/page/");
            }
            other => panic!("expected OParl, got {other:?}"),
        }
    }

    #[test]
    fn classify_city_fallback() {
        let cfg = DiscoveryConfig::default();
        assert_eq!(
            SourceDescriptor::classify("Gent", &cfg),
            SourceDescriptor::City("gent".to_string())
        );
        assert_eq!(
            SourceDescriptor::classify("ftp://files.example/a.pdf", &cfg),
            SourceDescriptor::City("ftp://files.example/a.pdf".to_string())
        );
    }

    #[test]
    fn absolute_http_url_check() {
        assert!(is_absolute_http_url("https://a.example"));
        assert!(!is_absolute_http_url("a.example/x.pdf"));
        assert!(!is_absolute_http_url("mailto:info@a.example"));
        assert!(!is_absolute_http_url("file:///tmp/a.pdf"));
    }
}
