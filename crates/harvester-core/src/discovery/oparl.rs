//! OParl strategy: walk a paged meeting list and collect resolution file URLs.
//!
//! Page `n` lives at `<endpoint><n>`. Page 1 carries `pagination.totalPages`;
//! each meeting lists agenda items whose `resolutionFile.downloadUrl` is the PDF.

use serde::Deserialize;

use crate::error::DiscoveryError;
use crate::http;

#[derive(Debug, Default, Deserialize)]
pub struct MeetingPage {
    #[serde(default)]
    data: Option<Vec<Meeting>>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Default, Deserialize)]
struct Pagination {
    #[serde(default, rename = "totalPages")]
    total_pages: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct Meeting {
    #[serde(default, rename = "agendaItem")]
    agenda_item: Option<Vec<AgendaItem>>,
}

#[derive(Debug, Default, Deserialize)]
struct AgendaItem {
    #[serde(default, rename = "resolutionFile")]
    resolution_file: Option<ResolutionFile>,
}

#[derive(Debug, Default, Deserialize)]
struct ResolutionFile {
    #[serde(default, rename = "downloadUrl")]
    download_url: Option<String>,
}

impl MeetingPage {
    /// Declared page count; at least 1.
    pub fn total_pages(&self) -> u64 {
        self.pagination
            .as_ref()
            .and_then(|p| p.total_pages)
            .unwrap_or(1)
            .max(1)
    }

    /// Non-empty resolution download URLs, in listing order.
    pub fn resolution_urls(&self) -> impl Iterator<Item = &str> {
        self.data
            .iter()
            .flatten()
            .flat_map(|m| m.agenda_item.iter().flatten())
            .filter_map(|item| item.resolution_file.as_ref()?.download_url.as_deref())
            .filter(|u| !u.trim().is_empty())
    }
}

pub fn page_url(endpoint: &str, page: u64) -> String {
    format!("{endpoint}{page}")
}

pub fn fetch_page(endpoint: &str, page: u64) -> Result<MeetingPage, DiscoveryError> {
    let url = page_url(endpoint, page);
    let resp = http::get(&url, "application/json")?;
    if !resp.is_success() {
        return Err(DiscoveryError::Http {
            url,
            status: resp.status,
        });
    }
    serde_json::from_slice(&resp.body).map_err(|source| DiscoveryError::Json { url, source })
}

/// Fetch page 1 for the page count, then collect pages 1..=N (page 1 is not
/// fetched twice). Stops early once `max_urls` URLs are collected.
pub fn discover(endpoint: &str, max_urls: Option<usize>) -> Result<Vec<String>, DiscoveryError> {
    let first = fetch_page(endpoint, 1)?;
    let total = first.total_pages();
    tracing::debug!(endpoint = %endpoint, pages = total, "OParl meeting list");

    let mut urls = Vec::new();
    if collect(&first, &mut urls, max_urls) {
        return Ok(urls);
    }
    for page in 2..=total {
        let meetings = fetch_page(endpoint, page)?;
        if collect(&meetings, &mut urls, max_urls) {
            break;
        }
    }
    Ok(urls)
}

/// Appends the page's URLs; returns true once the cap is reached.
fn collect(page: &MeetingPage, urls: &mut Vec<String>, max_urls: Option<usize>) -> bool {
    for url in page.resolution_urls() {
        if max_urls.is_some_and(|max| urls.len() >= max) {
            return true;
        }
        urls.push(url.to_string());
    }
    max_urls.is_some_and(|max| urls.len() >= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "data": [
            { "id": "m1", "agendaItem": [
                { "resolutionFile": { "downloadUrl": "https://ris.example/files/r1.pdf" } },
                { "name": "no resolution" },
                { "resolutionFile": { "downloadUrl": "" } }
            ] },
            { "id": "m2" },
            { "id": "m3", "agendaItem": null },
            { "id": "m4", "agendaItem": [
                { "resolutionFile": { "downloadUrl": "https://ris.example/files/r2.pdf" } }
            ] }
        ],
        "pagination": { "totalPages": 7, "currentPage": 1 }
    }"#;

    #[test]
    fn extracts_resolution_urls() {
        let page: MeetingPage = serde_json::from_str(PAGE).unwrap();
        assert_eq!(page.total_pages(), 7);
        let urls: Vec<&str> = page.resolution_urls().collect();
        assert_eq!(
            urls,
            vec!["https://ris.example/files/r1.pdf", "https://ris.example/files/r2.pdf"]
        );
    }

    #[test]
    fn missing_pagination_means_single_page() {
        let page: MeetingPage = serde_json::from_str(r#"{ "data": [] }"#).unwrap();
        assert_eq!(page.total_pages(), 1);
        assert_eq!(page.resolution_urls().count(), 0);
    }

    #[test]
    fn collect_respects_cap() {
        let page: MeetingPage = serde_json::from_str(PAGE).unwrap();
        let mut urls = Vec::new();
        assert!(collect(&page, &mut urls, Some(1)));
        assert_eq!(urls.len(), 1);

        let mut urls = Vec::new();
        assert!(!collect(&page, &mut urls, None));
        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn page_url_appends_number() {
        assert_eq!(
            page_url("https://ris.freiburg.de/oparl/body/FR/meeting/page/", 3),
            "https://ris.freiburg.de/oparl/body/FR/meeting/page/3"
        );
    }
}
