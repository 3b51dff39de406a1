use crate::article::Article;
use crate::error::SourceError;
use crate::utils::{ensure_success, http_client};
use crate::{NewsSource, TimeFiltering};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

const NEWSAPI_EVERYTHING: &str = "https://newsapi.org/v2/everything";

// NewsAPI rejects page sizes above this.
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub source: Option<NewsApiSourceRef>,
}

#[derive(Debug, Deserialize)]
pub struct NewsApiSourceRef {
    pub name: Option<String>,
}

/// NewsAPI `/v2/everything`, English results sorted by publish time.
#[derive(Clone)]
pub struct NewsApiSource {
    client: reqwest::Client,
    api_key: String,
    max_articles: usize,
}

impl NewsApiSource {
    pub fn new(api_key: String, max_articles: usize) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            max_articles,
        })
    }

    fn query_params(&self, query: &str, days_back: i64, now: DateTime<Utc>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", format!("{} AI artificial intelligence", query.trim())),
            ("language", "en".to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("pageSize", self.max_articles.clamp(1, MAX_PAGE_SIZE).to_string()),
        ];
        if days_back > 0 {
            let from = now - Duration::days(days_back.min(36_500));
            params.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

/// Keep only entries carrying both a title and a URL.
pub fn convert_articles(response: NewsApiResponse) -> Vec<Article> {
    let now = Utc::now().to_rfc3339();
    response
        .articles
        .into_iter()
        .filter_map(|item| {
            let title = item.title.filter(|t| !t.trim().is_empty())?;
            let url = item.url.filter(|u| !u.trim().is_empty())?;
            let source_name = item
                .source
                .and_then(|s| s.name)
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "NewsAPI".to_string());
            Some(
                Article::new("newsapi", source_name, title, url)
                    .with_summary(item.description.unwrap_or_default())
                    .with_published(item.published_at.unwrap_or_else(|| now.clone()))
                    .with_author(item.author.unwrap_or_default()),
            )
        })
        .collect()
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn name(&self) -> &'static str {
        "newsapi"
    }

    fn description(&self) -> &'static str {
        "NewsAPI aggregated coverage from news outlets"
    }

    fn time_filtering(&self) -> TimeFiltering {
        TimeFiltering::Native
    }

    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
        let params = self.query_params(query, days_back, Utc::now());
        let response = self
            .client
            .get(NEWSAPI_EVERYTHING)
            .header("X-Api-Key", &self.api_key)
            .query(&params)
            .send()
            .await?;
        let data: NewsApiResponse = ensure_success("NewsAPI", response)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("NewsAPI response: {e}")))?;
        if data.status.as_deref() == Some("error") {
            return Err(SourceError::Api {
                provider: "NewsAPI",
                status: 200,
                body: data.message.unwrap_or_else(|| "error status".into()),
            });
        }

        let mut articles = convert_articles(data);
        if articles.is_empty() {
            tracing::debug!("newsapi returned no articles, emitting placeholder");
            articles.push(Article::placeholder(
                "newsapi",
                "NewsAPI",
                query,
                "https://newsapi.org/",
            ));
        }

        let mut articles = crate::window::filter_by_date(articles, days_back);
        articles.truncate(self.max_articles);
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn params_carry_from_date_and_page_size() {
        let source = NewsApiSource::new("k".into(), 500).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let params = source.query_params("robots", 3, now);
        assert!(params.contains(&("q", "robots AI artificial intelligence".to_string())));
        assert!(params.contains(&("pageSize", "100".to_string())));
        assert!(params.contains(&("from", "2025-03-07".to_string())));
    }

    #[test]
    fn entries_without_title_or_url_are_skipped() {
        let body = r#"{
            "status": "ok",
            "articles": [
                {"title": "Robots learn to fold laundry", "url": "https://example.com/a",
                 "description": "Folding", "publishedAt": "2025-03-09T10:00:00Z",
                 "author": null, "source": {"id": null, "name": "Example News"}},
                {"title": null, "url": "https://example.com/b"},
                {"title": "No link", "url": ""}
            ]
        }"#;
        let response: NewsApiResponse = serde_json::from_str(body).unwrap();
        let articles = convert_articles(response);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source_name(), "Example News");
        assert_eq!(articles[0].author(), "Unknown");
        assert_eq!(articles[0].published(), "2025-03-09T10:00:00Z");
    }

    #[test]
    fn missing_source_name_falls_back() {
        let body = r#"{"articles": [{"title": "T", "url": "https://x.io"}]}"#;
        let response: NewsApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(convert_articles(response)[0].source_name(), "NewsAPI");
    }
}
