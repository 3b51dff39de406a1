//! Result types produced by a collection run.

use crate::article::Article;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle of one source within a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    /// Dispatched, not settled yet
    #[default]
    Pending,
    Completed,
    Failed,
}

impl SourceStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SourceStatus::Pending)
    }
}

/// Outcome of one source in a run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceProgress {
    pub status: SourceStatus,

    /// Articles kept from this source, before cross-source dedup
    pub articles_found: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Stable error code (see `SourceError::code_str`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    /// Time taken by the source call (ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl SourceProgress {
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn completed(articles_found: usize, duration_ms: u64) -> Self {
        Self {
            status: SourceStatus::Completed,
            articles_found,
            duration_ms: Some(duration_ms),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>, code: &str, duration_ms: Option<u64>) -> Self {
        Self {
            status: SourceStatus::Failed,
            articles_found: 0,
            error: Some(error.into()),
            error_code: Some(code.to_string()),
            duration_ms,
        }
    }
}

/// Complete result of one collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,

    /// Candidates before deduplication
    pub total_articles: usize,

    /// Articles after deduplication (`articles.len()`)
    pub unique_articles: usize,

    pub duplicates_removed: usize,

    /// Final articles: per-source arrival order, sources in dispatch order
    pub articles: Vec<Article>,

    /// One entry per dispatched source
    pub source_progress: BTreeMap<String, SourceProgress>,

    /// Total time taken (ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl SearchResult {
    /// Empty, well-formed result.
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            total_articles: 0,
            unique_articles: 0,
            duplicates_removed: 0,
            articles: Vec::new(),
            source_progress: BTreeMap::new(),
            duration_ms: None,
        }
    }

    /// Build a result from the merged candidate count and the deduplicated
    /// articles.
    pub fn assemble(
        query: impl Into<String>,
        total_articles: usize,
        articles: Vec<Article>,
        source_progress: BTreeMap<String, SourceProgress>,
    ) -> Self {
        let unique_articles = articles.len();
        Self {
            query: query.into(),
            total_articles,
            unique_articles,
            duplicates_removed: total_articles.saturating_sub(unique_articles),
            articles,
            source_progress,
            duration_ms: None,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn progress_for(&self, source: &str) -> Option<&SourceProgress> {
        self.source_progress.get(source)
    }

    fn sources_with(&self, status: SourceStatus) -> Vec<&str> {
        self.source_progress
            .iter()
            .filter(|(_, p)| p.status == status)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn completed_sources(&self) -> Vec<&str> {
        self.sources_with(SourceStatus::Completed)
    }

    pub fn failed_sources(&self) -> Vec<&str> {
        self.sources_with(SourceStatus::Failed)
    }

    /// Check if any source failed.
    pub fn has_failures(&self) -> bool {
        self.source_progress
            .values()
            .any(|p| p.status == SourceStatus::Failed)
    }

    /// Check if every dispatched source failed.
    pub fn all_failed(&self) -> bool {
        !self.source_progress.is_empty()
            && self
                .source_progress
                .values()
                .all(|p| p.status == SourceStatus::Failed)
    }

    /// Number of placeholder articles in the final list.
    pub fn synthetic_count(&self) -> usize {
        self.articles.iter().filter(|a| a.is_synthetic()).count()
    }

    /// Articles with placeholders removed.
    pub fn genuine_articles(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter().filter(|a| !a.is_synthetic())
    }

    /// Drop placeholder articles and recount.
    ///
    /// Placeholders leave the candidate count too, so
    /// `total_articles == unique_articles + duplicates_removed` still holds.
    pub fn without_synthetic(mut self) -> Self {
        self.articles.retain(|a| !a.is_synthetic());
        self.unique_articles = self.articles.len();
        self.total_articles = self.unique_articles + self.duplicates_removed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_counts() {
        let articles = vec![
            Article::new("hackernews", "Hacker News", "One", ""),
            Article::placeholder("duckduckgo", "DuckDuckGo", "q", ""),
        ];
        let mut progress = BTreeMap::new();
        progress.insert("hackernews".to_string(), SourceProgress::completed(3, 12));
        progress.insert("duckduckgo".to_string(), SourceProgress::completed(1, 40));

        let result = SearchResult::assemble("q", 4, articles, progress);
        assert_eq!(result.total_articles, 4);
        assert_eq!(result.unique_articles, 2);
        assert_eq!(result.duplicates_removed, 2);
        assert_eq!(
            result.total_articles,
            result.unique_articles + result.duplicates_removed
        );
        assert_eq!(result.synthetic_count(), 1);
        assert_eq!(result.genuine_articles().count(), 1);
        assert!(!result.has_failures());
    }

    #[test]
    fn test_without_synthetic_keeps_counts_consistent() {
        let articles = vec![
            Article::new("hackernews", "Hacker News", "Real story", ""),
            Article::placeholder("duckduckgo", "DuckDuckGo", "q", ""),
        ];
        let result = SearchResult::assemble("q", 3, articles, BTreeMap::new())
            .with_duration_ms(9)
            .without_synthetic();

        assert_eq!(result.articles.len(), 1);
        assert_eq!(result.articles[0].title(), "Real story");
        assert_eq!(result.unique_articles, result.articles.len());
        assert_eq!(result.duplicates_removed, 1);
        assert_eq!(result.total_articles, 2);
        assert_eq!(
            result.total_articles,
            result.unique_articles + result.duplicates_removed
        );
        assert_eq!(result.synthetic_count(), 0);
        assert_eq!(result.duration_ms, Some(9));
    }

    #[test]
    fn test_failure_helpers() {
        let mut result = SearchResult::empty("q");
        assert!(!result.all_failed());

        result
            .source_progress
            .insert("tavily".into(), SourceProgress::failed("boom", "upstream_error", None));
        assert!(result.all_failed());

        result
            .source_progress
            .insert("arxiv".into(), SourceProgress::completed(0, 5));
        assert!(result.has_failures());
        assert!(!result.all_failed());
        assert_eq!(result.failed_sources(), vec!["tavily"]);
        assert_eq!(result.completed_sources(), vec!["arxiv"]);
    }

    #[test]
    fn test_status_serialization() {
        let progress = SourceProgress::failed("HTTP 500", "upstream_error", Some(7));
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "HTTP 500");
        assert!(SourceStatus::Failed.is_terminal());
        assert!(!SourceStatus::Pending.is_terminal());

        let pending = serde_json::to_value(SourceProgress::pending()).unwrap();
        assert_eq!(pending["status"], "pending");
        assert!(pending.get("error").is_none());
    }
}
