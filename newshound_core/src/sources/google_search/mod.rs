use crate::article::Article;
use crate::error::SourceError;
use crate::utils::{ensure_success, http_client};
use crate::{NewsSource, TimeFiltering};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

const CUSTOM_SEARCH_API: &str = "https://www.googleapis.com/customsearch/v1";

// The API caps `num` at 10 per request.
const MAX_PAGE_SIZE: usize = 10;

#[derive(Debug, Deserialize)]
pub struct CustomSearchResponse {
    #[serde(default)]
    pub items: Vec<CustomSearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSearchItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub display_link: String,
}

/// Google Programmable Search (Custom Search JSON API).
#[derive(Clone)]
pub struct GoogleSearchSource {
    client: reqwest::Client,
    api_key: String,
    engine_id: String,
    max_articles: usize,
}

impl GoogleSearchSource {
    pub fn new(api_key: String, engine_id: String, max_articles: usize) -> Result<Self, SourceError> {
        if engine_id.trim().is_empty() {
            return Err(SourceError::MissingCredentials(
                "google_search requires a search engine id".into(),
            ));
        }
        Ok(Self {
            client: http_client()?,
            api_key,
            engine_id,
            max_articles,
        })
    }

    fn query_params(&self, query: &str, days_back: i64) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("cx", self.engine_id.clone()),
            ("q", query.to_string()),
            ("num", self.max_articles.clamp(1, MAX_PAGE_SIZE).to_string()),
            ("sort", "date".to_string()),
        ];
        if let Some(restrict) = date_restrict(days_back) {
            params.push(("dateRestrict", restrict));
        }
        params
    }
}

pub fn date_restrict(days_back: i64) -> Option<String> {
    (days_back > 0).then(|| format!("d{days_back}"))
}

/// Results carry no reliable date, so they are stamped with the fetch time.
pub fn convert_items(response: CustomSearchResponse) -> Vec<Article> {
    let now = Utc::now().to_rfc3339();
    response
        .items
        .into_iter()
        .map(|item| {
            let source_name = if item.display_link.is_empty() {
                "Google".to_string()
            } else {
                item.display_link
            };
            Article::new("google_search", source_name, item.title, item.link)
                .with_summary(item.snippet)
                .with_published(now.clone())
                .with_author("Google Search")
        })
        .collect()
}

#[async_trait]
impl NewsSource for GoogleSearchSource {
    fn name(&self) -> &'static str {
        "google_search"
    }

    fn description(&self) -> &'static str {
        "Google Programmable Search restricted by date"
    }

    fn time_filtering(&self) -> TimeFiltering {
        TimeFiltering::Native
    }

    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
        let response = self
            .client
            .get(CUSTOM_SEARCH_API)
            .query(&self.query_params(query, days_back))
            .send()
            .await?;
        let data: CustomSearchResponse = ensure_success("Google Custom Search", response)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Google Custom Search response: {e}")))?;

        let mut articles = convert_items(data);
        articles.truncate(self.max_articles);
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_id_is_required() {
        let err = GoogleSearchSource::new("k".into(), " ".into(), 5).err().unwrap();
        assert_eq!(err.code_str(), "missing_credentials");
    }

    #[test]
    fn params_cap_num_and_restrict_dates() {
        let source = GoogleSearchSource::new("k".into(), "cx1".into(), 25).unwrap();
        let params = source.query_params("gpu", 14);
        assert!(params.contains(&("num", "10".to_string())));
        assert!(params.contains(&("dateRestrict", "d14".to_string())));
        assert_eq!(date_restrict(0), None);
    }

    #[test]
    fn items_become_articles() {
        let body = r#"{"items": [
            {"title": "GPU shortage eases", "link": "https://example.com/gpu",
             "snippet": "Supply", "displayLink": "example.com"},
            {"title": "Bare", "link": "https://b.io"}
        ]}"#;
        let response: CustomSearchResponse = serde_json::from_str(body).unwrap();
        let articles = convert_items(response);
        assert_eq!(articles[0].source_name(), "example.com");
        assert_eq!(articles[1].source_name(), "Google");
        assert!(!articles[0].published().is_empty());
        assert!(serde_json::from_str::<CustomSearchResponse>("{}").unwrap().items.is_empty());
    }
}
