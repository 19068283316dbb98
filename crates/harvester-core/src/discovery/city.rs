//! City strategy: page through a remote graph store for document URLs under
//! the city's host prefix.

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::sparql::{escape, GraphStore};

/// URL prefix for `city`: the configured host, else the template with `{city}` filled in.
pub fn host_prefix(city: &str, cfg: &DiscoveryConfig) -> String {
    let city = city.to_lowercase();
    match cfg.city_hosts.get(&city) {
        Some(prefix) => prefix.clone(),
        None => cfg.city_host_template.replace("{city}", &city),
    }
}

pub fn page_query(prefix: &str, limit: usize, offset: usize) -> String {
    format!(
        "SELECT DISTINCT ?url WHERE {{
  ?s ?p ?url .
  FILTER(STRSTARTS(STR(?url), {prefix}) && CONTAINS(STR(?url), \"pdf\"))
}}
ORDER BY ?url
LIMIT {limit}
OFFSET {offset}",
        prefix = escape::literal(prefix),
    )
}

/// Query pages of `page_size` until one comes back empty.
pub fn discover(
    store: &dyn GraphStore,
    prefix: &str,
    page_size: usize,
) -> Result<Vec<String>, DiscoveryError> {
    let page_size = page_size.max(1);
    let mut urls = Vec::new();
    let mut offset = 0;
    loop {
        let results = store.query(&page_query(prefix, page_size, offset))?;
        if results.is_empty() {
            break;
        }
        let before = urls.len();
        urls.extend(results.values("url").map(str::to_string));
        tracing::debug!(offset, rows = urls.len() - before, "city page");
        offset += page_size;
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_prefix_prefers_configured_host() {
        let mut cfg = DiscoveryConfig::default();
        cfg.city_hosts
            .insert("gent".to_string(), "https://ebesluitvorming.gent.be/".to_string());
        assert_eq!(host_prefix("Gent", &cfg), "https://ebesluitvorming.gent.be/");
        assert_eq!(host_prefix("aalst", &cfg), "https://aalst.");
    }

    #[test]
    fn page_query_filters_and_pages() {
        let q = page_query("https://aalst.", 1000, 2000);
        assert!(q.contains("STRSTARTS(STR(?url), \"https://aalst.\")"));
        assert!(q.contains("CONTAINS(STR(?url), \"pdf\")"));
        assert!(q.contains("LIMIT 1000"));
        assert!(q.ends_with("OFFSET 2000"));
    }
}
