mod types;

use crate::article::Article;
use crate::error::SourceError;
use crate::utils::{clean_html_entities, html_to_text, http_client};
use crate::{NewsSource, TimeFiltering};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
pub use types::{AlgoliaHit, AlgoliaSearchResponse};

const ALGOLIA_SEARCH_BY_DATE: &str = "https://hn.algolia.com/api/v1/search_by_date";

/// Hacker News stories via the Algolia search API.
#[derive(Clone)]
pub struct HackerNewsSource {
    client: reqwest::Client,
    max_articles: usize,
}

impl HackerNewsSource {
    pub fn new(max_articles: usize) -> Result<Self, SourceError> {
        Ok(HackerNewsSource {
            client: http_client()?,
            max_articles,
        })
    }

    fn search_url(&self, query: &str, days_back: i64, now: DateTime<Utc>) -> String {
        let mut url = format!(
            "{ALGOLIA_SEARCH_BY_DATE}?query={}&tags=story&hitsPerPage={}",
            urlencoding::encode(query),
            self.max_articles.max(1)
        );
        if days_back > 0 {
            let cutoff = now - Duration::days(days_back.min(36_500));
            url.push_str(&format!(
                "&numericFilters={}",
                urlencoding::encode(&format!("created_at_i>{}", cutoff.timestamp()))
            ));
        }
        url
    }

    // Helper: fetch Algolia search response from URL
    async fn fetch_algolia_search(&self, url: &str) -> Result<AlgoliaSearchResponse, SourceError> {
        let res = self.client.get(url).send().await?;
        let res = crate::utils::ensure_success("Hacker News", res).await?;
        res.json::<AlgoliaSearchResponse>()
            .await
            .map_err(|e| SourceError::Parse(format!("JSON parse error: {}", e)))
    }
}

fn hit_to_article(hit: AlgoliaHit) -> Option<Article> {
    if !hit.is_story() {
        return None;
    }
    let published = hit
        .created_at
        .clone()
        .or_else(|| {
            hit.created_at_i
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
                .map(|dt| dt.to_rfc3339())
        })
        .unwrap_or_default();
    let url = hit
        .url
        .clone()
        .filter(|u| !u.is_empty())
        .or_else(|| hit.item_url())
        .unwrap_or_default();

    let mut summary = format!(
        "Score: {} | Comments: {}",
        hit.points.unwrap_or(0),
        hit.num_comments.unwrap_or(0)
    );
    if let Some(text) = hit.story_text.as_deref().filter(|t| !t.is_empty()) {
        summary.push_str(" | ");
        summary.push_str(&html_to_text(text));
    }

    Some(
        Article::new(
            "hackernews",
            "Hacker News",
            clean_html_entities(hit.title.as_deref().unwrap_or_default()),
            url,
        )
        .with_summary(summary)
        .with_published(published)
        .with_author(hit.author.as_deref().unwrap_or_default()),
    )
}

#[async_trait]
impl NewsSource for HackerNewsSource {
    fn name(&self) -> &'static str {
        "hackernews"
    }

    fn description(&self) -> &'static str {
        "Hacker News stories (Algolia search, newest first)"
    }

    fn time_filtering(&self) -> TimeFiltering {
        TimeFiltering::Native
    }

    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
        let url = self.search_url(query, days_back, Utc::now());
        let response = self.fetch_algolia_search(&url).await?;
        tracing::debug!(hits = response.hits.len(), nb_hits = ?response.nb_hits, "hackernews search");

        let articles = response.hits.into_iter().filter_map(hit_to_article).collect();
        let mut articles = crate::window::filter_by_date(articles, days_back);
        articles.truncate(self.max_articles);
        Ok(articles)
    }
}
