use crate::article::Article;
use crate::error::SourceError;
use crate::utils::{ensure_success, host_of, http_client};
use crate::window::parse_published;
use crate::{NewsSource, TimeFiltering};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};

const TAVILY_SEARCH: &str = "https://api.tavily.com/search";

/// Tavily search API with its `time_range` filter.
#[derive(Clone)]
pub struct TavilySource {
    client: reqwest::Client,
    api_key: String,
    max_articles: usize,
}

impl TavilySource {
    pub fn new(api_key: String, max_articles: usize) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            max_articles,
        })
    }

    fn request_body(&self, query: &str, days_back: i64) -> Value {
        let mut body = json!({
            "api_key": self.api_key,
            "query": query,
            "search_depth": "basic",
            "include_answer": false,
            "include_raw_content": false,
            "max_results": self.max_articles
        });
        if let Some(range) = time_range_param(days_back) {
            body["time_range"] = json!(range);
            if days_back <= 7 {
                body["topic"] = json!("news");
                body["days"] = json!(days_back.max(1));
            }
        }
        body
    }
}

/// Tavily `time_range` bucket for a look-back window; `None` means unbounded.
pub fn time_range_param(days_back: i64) -> Option<&'static str> {
    match days_back {
        d if d <= 0 => None,
        1 => Some("day"),
        2..=7 => Some("week"),
        8..=30 => Some("month"),
        31..=365 => Some("year"),
        _ => None,
    }
}

pub fn parse_results(value: &Value) -> Vec<Article> {
    let now = Utc::now().to_rfc3339();
    let Some(results) = value.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };
    results
        .iter()
        .map(|r| {
            let text = |k: &str| r.get(k).and_then(Value::as_str).unwrap_or_default();
            let url = text("url");
            let published = r
                .get("published_date")
                .and_then(Value::as_str)
                .and_then(parse_published)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| now.clone());
            let source_name = host_of(url).unwrap_or_else(|| "Tavily".to_string());
            Article::new("tavily", source_name, text("title"), url)
                .with_summary(text("content"))
                .with_published(published)
                .with_author("Tavily Search")
        })
        .collect()
}

#[async_trait]
impl NewsSource for TavilySource {
    fn name(&self) -> &'static str {
        "tavily"
    }

    fn description(&self) -> &'static str {
        "Tavily AI search with news topic filtering"
    }

    fn time_filtering(&self) -> TimeFiltering {
        TimeFiltering::Native
    }

    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .client
            .post(TAVILY_SEARCH)
            .headers(headers)
            .json(&self.request_body(query, days_back))
            .send()
            .await?;
        let value: Value = ensure_success("Tavily", response)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Tavily response: {e}")))?;

        let mut articles = crate::window::filter_by_date(parse_results(&value), days_back);
        articles.truncate(self.max_articles);
        Ok(articles)
    }
}
