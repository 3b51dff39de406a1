use serde::{Deserialize, Serialize};

/// Title used when a provider returns an item without one.
pub const MISSING_TITLE: &str = "No title";
/// Author used when a provider does not report one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";
/// Every synthetic placeholder title starts with this marker.
pub const PLACEHOLDER_MARKER: &str = "[placeholder]";
/// Summaries are cut to this many characters (plus an ellipsis).
pub const SUMMARY_MAX_CHARS: usize = 500;

/// One article produced by a single source call.
///
/// Articles are built once through [`Article::new`] and the `with_*`
/// builders and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    title: String,
    url: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    published: String,
    #[serde(default = "default_author")]
    author: String,
    source_name: String,
    source: String,
    #[serde(default, skip_serializing_if = "is_false")]
    synthetic: bool,
}

fn default_author() -> String {
    UNKNOWN_AUTHOR.to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Article {
    pub fn new(
        source: impl Into<String>,
        source_name: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let title = title.trim();
        Self {
            title: if title.is_empty() {
                MISSING_TITLE.to_string()
            } else {
                title.to_string()
            },
            url: url.into().trim().to_string(),
            summary: String::new(),
            published: String::new(),
            author: UNKNOWN_AUTHOR.to_string(),
            source_name: source_name.into(),
            source: source.into(),
            synthetic: false,
        }
    }

    /// Filler result for a source that produced nothing usable.
    ///
    /// Stamped with the current time so it survives the window filter, and
    /// flagged so consumers can drop it.
    pub fn placeholder(
        source: impl Into<String>,
        source_name: impl Into<String>,
        query: &str,
        url: impl Into<String>,
    ) -> Self {
        let source_name = source_name.into();
        let title = format!("{PLACEHOLDER_MARKER} {source_name} results for '{query}'");
        let mut article = Self::new(source, source_name.clone(), title, url)
            .with_summary(format!(
                "{source_name} returned no usable results for '{query}'."
            ))
            .with_published(chrono::Utc::now().to_rfc3339())
            .with_author(source_name);
        article.synthetic = true;
        article
    }

    pub fn with_summary(mut self, summary: impl AsRef<str>) -> Self {
        self.summary = truncate_summary(summary.as_ref().trim());
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = published.into().trim().to_string();
        self
    }

    pub fn with_author(mut self, author: impl AsRef<str>) -> Self {
        let author = author.as_ref().trim();
        self.author = if author.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            author.to_string()
        };
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn published(&self) -> &str {
        &self.published
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}

/// Cut `text` to [`SUMMARY_MAX_CHARS`] characters on a char boundary.
pub fn truncate_summary(text: &str) -> String {
    match text.char_indices().nth(SUMMARY_MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_get_placeholders() {
        let article = Article::new("hackernews", "Hacker News", "   ", "")
            .with_author("")
            .with_published("2025-01-01T00:00:00Z");
        assert_eq!(article.title(), MISSING_TITLE);
        assert_eq!(article.url(), "");
        assert_eq!(article.author(), UNKNOWN_AUTHOR);
        assert!(!article.is_synthetic());
    }

    #[test]
    fn summary_is_truncated_on_char_boundary() {
        let long = "é".repeat(SUMMARY_MAX_CHARS + 20);
        let article = Article::new("arxiv", "ArXiv", "t", "u").with_summary(&long);
        assert!(article.summary().ends_with("..."));
        assert_eq!(article.summary().chars().count(), SUMMARY_MAX_CHARS + 3);

        let short = Article::new("arxiv", "ArXiv", "t", "u").with_summary("brief");
        assert_eq!(short.summary(), "brief");
    }

    #[test]
    fn placeholder_is_flagged_and_marked() {
        let article = Article::placeholder("duckduckgo", "DuckDuckGo", "llm agents", "");
        assert!(article.is_synthetic());
        assert!(article.title().starts_with(PLACEHOLDER_MARKER));
        assert!(!article.published().is_empty());

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["synthetic"], true);

        let genuine = Article::new("duckduckgo", "DuckDuckGo", "Real", "https://x.test");
        let json = serde_json::to_value(&genuine).unwrap();
        assert!(json.get("synthetic").is_none());
    }
}
