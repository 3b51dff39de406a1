use crate::article::Article;
use crate::error::SourceError;
use crate::utils::{ensure_success, host_of, http_client};
use crate::window::parse_published;
use crate::{NewsSource, TimeFiltering};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};

const SERPER_SEARCH: &str = "https://google.serper.dev/search";

// Over-fetch so the local window filter still leaves enough results.
const OVERFETCH_FACTOR: usize = 3;
const MAX_RESULTS: usize = 30;

/// Serper.dev Google SERP API.
#[derive(Clone)]
pub struct SerperSource {
    client: reqwest::Client,
    api_key: String,
    max_articles: usize,
}

impl SerperSource {
    pub fn new(api_key: String, max_articles: usize) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            max_articles,
        })
    }

    fn request_body(&self, query: &str, days_back: i64) -> Value {
        let num = (self.max_articles * OVERFETCH_FACTOR).clamp(1, MAX_RESULTS);
        let mut body = json!({ "q": query, "num": num });
        if let Some(tbs) = tbs_param(days_back) {
            body["tbs"] = json!(tbs);
        }
        body
    }
}

/// Google `tbs=qdr:` recency bucket.
pub fn tbs_param(days_back: i64) -> Option<&'static str> {
    match days_back {
        1 => Some("qdr:d"),
        2..=7 => Some("qdr:w"),
        8..=31 => Some("qdr:m"),
        32..=365 => Some("qdr:y"),
        _ => None,
    }
}

/// Map `organic` results; the optional `date` field is kept when it parses.
pub fn parse_organic(value: &Value) -> Vec<Article> {
    let now = Utc::now().to_rfc3339();
    let Some(organic) = value.get("organic").and_then(Value::as_array) else {
        return Vec::new();
    };
    organic
        .iter()
        .map(|r| {
            let text = |k: &str| r.get(k).and_then(Value::as_str).unwrap_or_default();
            let url = text("link");
            let published = parse_published(text("date"))
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| now.clone());
            let source_name = host_of(url).unwrap_or_else(|| "Serper".to_string());
            Article::new("serper", source_name, text("title"), url)
                .with_summary(text("snippet"))
                .with_published(published)
                .with_author("Serper Search")
        })
        .collect()
}

#[async_trait]
impl NewsSource for SerperSource {
    fn name(&self) -> &'static str {
        "serper"
    }

    fn description(&self) -> &'static str {
        "Serper.dev Google results with recency filtering"
    }

    fn time_filtering(&self) -> TimeFiltering {
        TimeFiltering::Native
    }

    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|_| SourceError::InvalidInput("Serper API key is not a valid header value".into()))?;
        headers.insert("X-API-KEY", key);

        let response = self
            .client
            .post(SERPER_SEARCH)
            .headers(headers)
            .json(&self.request_body(query, days_back))
            .send()
            .await?;
        let value: Value = ensure_success("Serper", response)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Serper response: {e}")))?;

        let mut articles = crate::window::filter_by_date(parse_organic(&value), days_back);
        articles.truncate(self.max_articles);
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_overfetches_with_cap() {
        let source = SerperSource::new("k".into(), 4).unwrap();
        let body = source.request_body("vision", 7);
        assert_eq!(body["num"], 12);
        assert_eq!(body["tbs"], "qdr:w");

        let wide = SerperSource::new("k".into(), 50).unwrap();
        let body = wide.request_body("vision", 0);
        assert_eq!(body["num"], 30);
        assert!(body.get("tbs").is_none());
    }

    #[test]
    fn tbs_buckets() {
        assert_eq!(tbs_param(1), Some("qdr:d"));
        assert_eq!(tbs_param(31), Some("qdr:m"));
        assert_eq!(tbs_param(200), Some("qdr:y"));
        assert_eq!(tbs_param(1000), None);
    }

    #[test]
    fn organic_results_use_host_as_source() {
        let value = json!({"organic": [
            {"title": "Vision transformers revisited", "link": "https://blog.example.com/vit",
             "snippet": "A look back"},
            {"title": "Dated", "link": "https://news.test/d", "date": "2025-05-01"}
        ]});
        let articles = parse_organic(&value);
        assert_eq!(articles[0].source_name(), "blog.example.com");
        assert_eq!(articles[0].author(), "Serper Search");
        assert_eq!(articles[1].published(), "2025-05-01T00:00:00+00:00");
        assert!(parse_organic(&json!({})).is_empty());
    }
}
