use crate::error::SourceError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

/// User agent sent by every built-in source.
pub const USER_AGENT: &str = concat!("newshound/", env!("CARGO_PKG_VERSION"));

/// Per-request HTTP timeout for built-in sources.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

pub fn http_client() -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(SourceError::Http)
}

pub fn clean_html_entities(text: &str) -> String {
    let mut cleaned = text.to_string();
    // Double-encoded entities show up in some feeds
    for _ in 0..2 {
        let decoded = html_escape::decode_html_entities(&cleaned).into_owned();
        if decoded == cleaned {
            break;
        }
        cleaned = decoded;
    }
    cleaned
}

/// Strip markup, decode entities and collapse whitespace.
pub fn html_to_text(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, " ");
    let decoded = clean_html_entities(&without_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Host part of `url` without a leading `www.`.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Lowercased words of `query` worth matching on.
pub fn query_keywords(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// True when any keyword appears in `text`, or when there are no keywords.
pub fn matches_any_keyword(text: &str, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return true;
    }
    let haystack = text.to_lowercase();
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}

/// Read a non-2xx response body into an API error.
pub(crate) async fn ensure_success(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(SourceError::Authentication(format!(
            "{provider} rejected the API key ({status})"
        )));
    }
    Err(SourceError::api(provider, status, body))
}
