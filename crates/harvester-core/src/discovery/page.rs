//! Web page strategy: a direct PDF link, or every `.pdf` link found on a page.

use scraper::{Html, Selector};
use url::Url;

use crate::error::DiscoveryError;
use crate::http;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";

/// True if the URL path ends in `.pdf` (case-insensitive). Query and fragment are ignored.
pub fn is_pdf(url: &Url) -> bool {
    url.path().to_ascii_lowercase().ends_with(".pdf")
}

/// True if the descriptor text itself ends in `.pdf` (case-insensitive),
/// query string included.
pub fn names_pdf(descriptor: &str) -> bool {
    descriptor.to_ascii_lowercase().ends_with(".pdf")
}

/// A descriptor ending in `.pdf` is returned unchanged; any other page is
/// fetched and scanned.
pub fn discover(page_url: &str) -> Result<Vec<String>, DiscoveryError> {
    if names_pdf(page_url) {
        return Ok(vec![page_url.to_string()]);
    }
    let base = Url::parse(page_url).map_err(|_| DiscoveryError::InvalidUrl(page_url.to_string()))?;

    let resp = http::get(page_url, ACCEPT_HTML)?;
    if !resp.is_success() {
        return Err(DiscoveryError::Http {
            url: page_url.to_string(),
            status: resp.status,
        });
    }
    let links = extract_pdf_links(&resp.text(), &base);
    tracing::debug!(page = %page_url, count = links.len(), "scraped PDF links");
    Ok(links)
}

/// Absolute http(s) `.pdf` links of every `a[href]` in document order,
/// resolved against `base`. Duplicates are kept.
pub fn extract_pdf_links(html: &str, base: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| base.join(href.trim()).ok())
        .filter(|u| matches!(u.scheme(), "http" | "https") && is_pdf(u))
        .map(String::from)
        .collect()
}
