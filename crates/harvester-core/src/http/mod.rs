//! Blocking HTTP requests over libcurl.
//!
//! Shared by the SPARQL client and the discovery strategies. Runs in the
//! current thread; call from `spawn_blocking` if used from async code.

use std::time::Duration;

/// Connection establishment limit. Transfers themselves are not time-bounded.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// GET `url` with an `Accept` header. Follows redirects.
pub fn get(url: &str, accept: &str) -> Result<HttpResponse, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.connect_timeout(CONNECT_TIMEOUT)?;

    let mut list = curl::easy::List::new();
    list.append(&format!("Accept: {accept}"))?;
    easy.http_headers(list)?;

    perform(&mut easy)
}

/// POST `fields` as `application/x-www-form-urlencoded` with extra headers
/// (`"Name: value"` lines).
pub fn post_form(
    url: &str,
    fields: &[(&str, &str)],
    headers: &[String],
) -> Result<HttpResponse, curl::Error> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter())
        .finish();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.post(true)?;
    easy.post_fields_copy(body.as_bytes())?;
    easy.connect_timeout(CONNECT_TIMEOUT)?;

    let mut list = curl::easy::List::new();
    list.append("Content-Type: application/x-www-form-urlencoded; charset=UTF-8")?;
    for h in headers {
        list.append(h.trim())?;
    }
    easy.http_headers(list)?;

    perform(&mut easy)
}

fn perform(easy: &mut curl::easy::Easy) -> Result<HttpResponse, curl::Error> {
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    let status = easy.response_code()?;
    Ok(HttpResponse { status, body })
}
