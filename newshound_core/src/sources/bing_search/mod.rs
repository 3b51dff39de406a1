use crate::article::Article;
use crate::error::SourceError;
use crate::utils::{ensure_success, http_client};
use crate::window::parse_published;
use crate::{NewsSource, TimeFiltering};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

const BING_NEWS_SEARCH: &str = "https://api.bing.microsoft.com/v7.0/news/search";
const SUBSCRIPTION_HEADER: &str = "Ocp-Apim-Subscription-Key";
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
pub struct BingNewsResponse {
    #[serde(default)]
    pub value: Vec<BingNewsArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BingNewsArticle {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub date_published: Option<String>,
    #[serde(default)]
    pub provider: Vec<BingProvider>,
}

#[derive(Debug, Deserialize)]
pub struct BingProvider {
    pub name: Option<String>,
}

/// Bing News Search v7.
#[derive(Clone)]
pub struct BingSearchSource {
    client: reqwest::Client,
    api_key: String,
    max_articles: usize,
}

impl BingSearchSource {
    pub fn new(api_key: String, max_articles: usize) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            max_articles,
        })
    }
}

/// Bing only knows day, week and month; longer windows are filtered locally.
pub fn freshness_param(days_back: i64) -> Option<&'static str> {
    match days_back {
        1 => Some("Day"),
        2..=7 => Some("Week"),
        8..=31 => Some("Month"),
        _ => None,
    }
}

pub fn convert_articles(response: BingNewsResponse) -> Vec<Article> {
    let now = Utc::now().to_rfc3339();
    response
        .value
        .into_iter()
        .map(|item| {
            let source_name = item
                .provider
                .into_iter()
                .find_map(|p| p.name)
                .unwrap_or_else(|| "Bing News".to_string());
            let published = item
                .date_published
                .as_deref()
                .and_then(parse_published)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| now.clone());
            Article::new("bing_search", source_name, item.name, item.url)
                .with_summary(item.description)
                .with_published(published)
                .with_author("Bing News Search")
        })
        .collect()
}

#[async_trait]
impl NewsSource for BingSearchSource {
    fn name(&self) -> &'static str {
        "bing_search"
    }

    fn description(&self) -> &'static str {
        "Bing News Search with freshness filtering"
    }

    fn time_filtering(&self) -> TimeFiltering {
        TimeFiltering::Native
    }

    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
        let mut params = vec![
            ("q", query.to_string()),
            ("count", self.max_articles.clamp(1, MAX_PAGE_SIZE).to_string()),
            ("mkt", "en-US".to_string()),
            ("sortBy", "Date".to_string()),
        ];
        if let Some(freshness) = freshness_param(days_back) {
            params.push(("freshness", freshness.to_string()));
        }

        let response = self
            .client
            .get(BING_NEWS_SEARCH)
            .header(SUBSCRIPTION_HEADER, &self.api_key)
            .query(&params)
            .send()
            .await?;
        let data: BingNewsResponse = ensure_success("Bing News", response)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Bing News response: {e}")))?;

        let mut articles = crate::window::filter_by_date(convert_articles(data), days_back);
        articles.truncate(self.max_articles);
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freshness_buckets() {
        assert_eq!(freshness_param(1), Some("Day"));
        assert_eq!(freshness_param(5), Some("Week"));
        assert_eq!(freshness_param(31), Some("Month"));
        assert_eq!(freshness_param(90), None);
        assert_eq!(freshness_param(0), None);
    }

    #[test]
    fn provider_and_date_are_used() {
        let body = r#"{"value": [
            {"name": "Chip export rules tighten", "url": "https://example.com/chips",
             "description": "Policy", "datePublished": "2025-04-02T09:30:00.0000000Z",
             "provider": [{"_type": "Organization", "name": "Example Wire"}]},
            {"name": "No provider", "url": "https://x.io"}
        ]}"#;
        let response: BingNewsResponse = serde_json::from_str(body).unwrap();
        let articles = convert_articles(response);
        assert_eq!(articles[0].source_name(), "Example Wire");
        assert!(articles[0].published().starts_with("2025-04-02T09:30:00"));
        assert_eq!(articles[1].source_name(), "Bing News");
    }
}
