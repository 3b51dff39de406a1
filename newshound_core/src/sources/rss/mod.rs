use crate::article::Article;
use crate::error::SourceError;
use crate::utils::{ensure_success, host_of, html_to_text, http_client, matches_any_keyword, query_keywords};
use crate::NewsSource;
use async_trait::async_trait;
use feed_rs::model::Feed;
use feed_rs::parser;
use std::io::Cursor;

/// Keyword search over a fixed list of RSS/Atom feeds.
#[derive(Clone)]
pub struct RssFeedsSource {
    client: reqwest::Client,
    feeds: Vec<String>,
    max_articles: usize,
}

impl RssFeedsSource {
    pub fn new(feeds: Vec<String>, max_articles: usize) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client()?,
            feeds,
            max_articles,
        })
    }

    pub fn feeds(&self) -> &[String] {
        &self.feeds
    }

    async fn fetch_and_parse(&self, url: &str) -> Result<Feed, SourceError> {
        let response = self.client.get(url).send().await?;
        let response = ensure_success("RSS", response).await?;
        let bytes = response.bytes().await?;
        parser::parse(Cursor::new(bytes))
            .map_err(|e| SourceError::Parse(format!("Failed to parse feed {url}: {e}")))
    }
}

/// Entries of `feed` whose title or summary mention one of `keywords`.
pub fn feed_to_articles(feed: &Feed, feed_url: &str, keywords: &[String]) -> Vec<Article> {
    let source_name = feed
        .title
        .as_ref()
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| host_of(feed_url))
        .unwrap_or_else(|| "RSS".to_string());

    feed.entries
        .iter()
        .filter_map(|entry| {
            let title = entry
                .title
                .as_ref()
                .map(|t| html_to_text(&t.content))
                .unwrap_or_default();
            let summary = entry
                .summary
                .as_ref()
                .map(|s| html_to_text(&s.content))
                .unwrap_or_default();
            if !matches_any_keyword(&format!("{title} {summary}"), keywords) {
                return None;
            }

            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();
            let published = entry
                .published
                .or(entry.updated)
                .map(|d| d.to_rfc3339())
                .unwrap_or_default();
            let authors = entry
                .authors
                .iter()
                .map(|a| a.name.clone())
                .collect::<Vec<_>>()
                .join(", ");

            Some(
                Article::new("rss_feeds", source_name.clone(), title, link)
                    .with_summary(summary)
                    .with_published(published)
                    .with_author(authors),
            )
        })
        .collect()
}

#[async_trait]
impl NewsSource for RssFeedsSource {
    fn name(&self) -> &'static str {
        "rss_feeds"
    }

    fn description(&self) -> &'static str {
        "Keyword matches from configured RSS and Atom feeds"
    }

    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
        if self.feeds.is_empty() {
            return Err(SourceError::InvalidInput("no feeds configured".to_string()));
        }

        let keywords = query_keywords(query);
        let fetches = self.feeds.iter().map(|url| async move {
            (url.as_str(), self.fetch_and_parse(url).await)
        });
        let feeds = futures::future::join_all(fetches).await;

        let mut articles = Vec::new();
        let mut last_error = None;
        let mut fetched = 0usize;
        for (url, result) in feeds {
            match result {
                Ok(feed) => {
                    fetched += 1;
                    articles.extend(feed_to_articles(&feed, url, &keywords));
                }
                Err(e) => {
                    tracing::warn!(feed = %url, error = %e, "feed fetch failed");
                    last_error = Some(e);
                }
            }
        }
        if fetched == 0 {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        let mut articles = crate::window::filter_by_date(articles, days_back);
        articles.truncate(self.max_articles);
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>AI Weekly</title>
    <link>https://ai-weekly.test</link>
    <item>
      <title>New LLM tops benchmark</title>
      <link>https://ai-weekly.test/llm</link>
      <description>&lt;p&gt;A model &amp;amp; a benchmark&lt;/p&gt;</description>
      <pubDate>Wed, 01 Jan 2025 10:00:00 GMT</pubDate>
      <author>editor@ai-weekly.test (Jane Doe)</author>
    </item>
    <item>
      <title>Gardening in winter</title>
      <link>https://ai-weekly.test/garden</link>
      <description>Nothing to see</description>
      <pubDate>Wed, 01 Jan 2025 11:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn keyword_filtered_entries() {
        let feed = parser::parse(RSS.as_bytes()).unwrap();
        let articles = feed_to_articles(&feed, "https://ai-weekly.test/feed", &query_keywords("LLM"));
        assert_eq!(articles.len(), 1);
        let a = &articles[0];
        assert_eq!(a.title(), "New LLM tops benchmark");
        assert_eq!(a.url(), "https://ai-weekly.test/llm");
        assert_eq!(a.source_name(), "AI Weekly");
        assert_eq!(a.source(), "rss_feeds");
        assert_eq!(a.summary(), "A model & a benchmark");
        assert!(crate::window::parse_published(a.published()).is_some());
    }

    #[test]
    fn empty_query_keeps_everything() {
        let feed = parser::parse(RSS.as_bytes()).unwrap();
        assert_eq!(feed_to_articles(&feed, "https://x.test", &[]).len(), 2);
    }

    #[tokio::test]
    async fn no_feeds_is_an_error() {
        let source = RssFeedsSource::new(Vec::new(), 5).unwrap();
        let err = source.search("ai", 7).await.unwrap_err();
        assert_eq!(err.code_str(), "invalid_input");
    }
}
