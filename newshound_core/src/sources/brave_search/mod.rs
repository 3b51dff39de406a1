use crate::article::Article;
use crate::error::SourceError;
use crate::utils::{ensure_success, host_of, http_client};
use crate::window::parse_published;
use crate::{NewsSource, TimeFiltering};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

const BRAVE_WEB_SEARCH: &str = "https://api.search.brave.com/res/v1/web/search";
const MAX_PAGE_SIZE: usize = 20;

#[derive(Debug, Deserialize)]
pub struct BraveResponse {
    #[serde(default)]
    pub web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize)]
pub struct BraveWeb {
    #[serde(default)]
    pub results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
pub struct BraveResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub page_age: Option<String>,
}

/// Brave Search web API.
#[derive(Clone)]
pub struct BraveSearchSource {
    client: reqwest::Client,
    api_key: String,
    max_articles: usize,
}

impl BraveSearchSource {
    pub fn new(api_key: String, max_articles: usize) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            max_articles,
        })
    }
}

pub fn freshness_param(days_back: i64) -> Option<&'static str> {
    match days_back {
        1 => Some("pd"),
        2..=7 => Some("pw"),
        8..=31 => Some("pm"),
        32..=365 => Some("py"),
        _ => None,
    }
}

pub fn convert_results(response: BraveResponse) -> Vec<Article> {
    let now = Utc::now().to_rfc3339();
    response
        .web
        .map(|w| w.results)
        .unwrap_or_default()
        .into_iter()
        .map(|r| {
            let published = r
                .page_age
                .as_deref()
                .and_then(parse_published)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| now.clone());
            let source_name = host_of(&r.url).unwrap_or_else(|| "Brave".to_string());
            Article::new("brave_search", source_name, r.title, r.url)
                .with_summary(crate::utils::html_to_text(&r.description))
                .with_published(published)
                .with_author("Brave Search")
        })
        .collect()
}

#[async_trait]
impl NewsSource for BraveSearchSource {
    fn name(&self) -> &'static str {
        "brave_search"
    }

    fn description(&self) -> &'static str {
        "Brave Search web results with freshness filtering"
    }

    fn time_filtering(&self) -> TimeFiltering {
        TimeFiltering::Native
    }

    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
        let mut params = vec![
            ("q", query.to_string()),
            ("count", self.max_articles.clamp(1, MAX_PAGE_SIZE).to_string()),
            ("offset", "0".to_string()),
            ("safesearch", "moderate".to_string()),
        ];
        if let Some(freshness) = freshness_param(days_back) {
            params.push(("freshness", freshness.to_string()));
        }

        let response = self
            .client
            .get(BRAVE_WEB_SEARCH)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .query(&params)
            .send()
            .await?;
        let data: BraveResponse = ensure_success("Brave Search", response)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Brave Search response: {e}")))?;

        let mut articles = crate::window::filter_by_date(convert_results(data), days_back);
        articles.truncate(self.max_articles);
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freshness_buckets() {
        assert_eq!(freshness_param(1), Some("pd"));
        assert_eq!(freshness_param(7), Some("pw"));
        assert_eq!(freshness_param(31), Some("pm"));
        assert_eq!(freshness_param(365), Some("py"));
        assert_eq!(freshness_param(366), None);
    }

    #[test]
    fn results_keep_page_age_when_parseable() {
        let body = r#"{"web": {"results": [
            {"title": "Robotics funding round", "url": "https://www.example.com/r",
             "description": "<strong>Robotics</strong> startup raises", "page_age": "2025-06-01T12:00:00"},
            {"title": "No age", "url": "https://other.io/x", "description": "", "page_age": "3 days ago"}
        ]}}"#;
        let response: BraveResponse = serde_json::from_str(body).unwrap();
        let articles = convert_results(response);
        assert_eq!(articles[0].published(), "2025-06-01T12:00:00+00:00");
        assert_eq!(articles[0].summary(), "Robotics startup raises");
        assert_eq!(articles[0].source_name(), "example.com");
        assert!(!articles[1].published().is_empty());
    }

    #[test]
    fn missing_web_block_is_empty() {
        let response: BraveResponse = serde_json::from_str("{}").unwrap();
        assert!(convert_results(response).is_empty());
    }
}
