use crate::article::Article;
use crate::error::SourceError;
use crate::utils::ensure_success;
use crate::{NewsSource, TimeFiltering};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use scraper::{Html, Selector};
use url::Url;

const DDG_HTML_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

// The static HTML endpoint serves an empty page to unknown agents.
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Tech news sites the web search is restricted to.
pub const NEWS_SITES: &[&str] = &["techcrunch.com", "venturebeat.com", "theverge.com", "wired.com"];

const MIN_TITLE_CHARS: usize = 10;

/// DuckDuckGo web search restricted to tech news sites.
///
/// Emits a single placeholder result when the page yields nothing usable.
#[derive(Clone)]
pub struct DuckDuckGoSource {
    client: reqwest::Client,
    max_articles: usize,
}

impl DuckDuckGoSource {
    pub fn new(max_articles: usize) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_UA)
            .timeout(crate::utils::HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            max_articles,
        })
    }
}

/// Query text with the site restriction and an `after:` date flag.
pub fn build_query(query: &str, days_back: i64, now: DateTime<Utc>) -> String {
    let sites = NEWS_SITES
        .iter()
        .map(|s| format!("site:{s}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    let mut q = format!("{} {sites}", query.trim());
    if days_back > 0 {
        let after = now - Duration::days(days_back.min(36_500));
        q.push_str(&format!(" after:{}", after.format("%Y-%m-%d")));
    }
    q
}

/// Follow DuckDuckGo's `/l/?uddg=` redirect links to the target URL.
fn resolve_href(href: &str) -> Option<String> {
    if href.starts_with("http") {
        return Some(href.to_string());
    }
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{href}")
    } else {
        return None;
    };
    let parsed = Url::parse(&absolute).ok()?;
    parsed
        .query_pairs()
        .find(|(k, _)| k == "uddg")
        .map(|(_, v)| v.into_owned())
}

/// Pull article links to [`NEWS_SITES`] out of a results page.
pub fn parse_results(html: &str, query: &str, now: DateTime<Utc>) -> Vec<Article> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let published = now.to_rfc3339();

    let mut seen = std::collections::HashSet::new();
    document
        .select(&selector)
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            let url = resolve_href(href)?;
            let title = link.text().collect::<Vec<_>>().join(" ");
            let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
            let on_news_site = NEWS_SITES.iter().any(|site| url.contains(site));
            if !url.starts_with("http") || !on_news_site || title.chars().count() <= MIN_TITLE_CHARS {
                return None;
            }
            if !seen.insert(url.clone()) {
                return None;
            }
            Some(
                Article::new("duckduckgo", "DuckDuckGo", title, url)
                    .with_summary(format!("AI news article found via DuckDuckGo search for '{query}'"))
                    .with_published(published.clone())
                    .with_author("DuckDuckGo Search"),
            )
        })
        .collect()
}

#[async_trait]
impl NewsSource for DuckDuckGoSource {
    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    fn description(&self) -> &'static str {
        "DuckDuckGo web search over major tech news sites"
    }

    fn time_filtering(&self) -> TimeFiltering {
        TimeFiltering::Native
    }

    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
        let now = Utc::now();
        let q = build_query(query, days_back, now);
        let response = self
            .client
            .get(DDG_HTML_ENDPOINT)
            .query(&[("q", q.as_str())])
            .send()
            .await?;
        let body = ensure_success("DuckDuckGo", response).await?.text().await?;

        let mut articles = parse_results(&body, query, now);
        if articles.is_empty() {
            tracing::debug!("duckduckgo returned no usable links, emitting placeholder");
            let search_url = format!("https://duckduckgo.com/?q={}", urlencoding::encode(&q));
            articles.push(Article::placeholder("duckduckgo", "DuckDuckGo", query, search_url));
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
    fn query_has_sites_and_date_flag() {
        let now = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();
        let q = build_query("agents", 7, now);
        assert!(q.starts_with("agents site:techcrunch.com OR site:venturebeat.com"));
        assert!(q.ends_with(" after:2025-01-01"));
        assert!(!build_query("agents", 0, now).contains("after:"));
    }

    #[test]
    fn parses_redirect_links() {
        let html = r#"
            <html><body>
              <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Ftechcrunch.com%2F2025%2F01%2F02%2Fagents%2F&amp;rut=abc">
                Agents are   eating software
              </a>
              <a class="result__a" href="https://www.theverge.com/ai/123">Short</a>
              <a class="result__a" href="https://example.com/agents">A long title on the wrong site</a>
              <a class="result__url" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Ftechcrunch.com%2F2025%2F01%2F02%2Fagents%2F">techcrunch.com/2025/01/02/agents</a>
            </body></html>"#;
        let now = Utc::now();
        let articles = parse_results(html, "agents", now);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title(), "Agents are eating software");
        assert_eq!(articles[0].url(), "https://techcrunch.com/2025/01/02/agents/");
        assert!(!articles[0].is_synthetic());
    }

    #[test]
    fn empty_page_parses_to_nothing() {
        assert!(parse_results("<html></html>", "q", Utc::now()).is_empty());
    }
}
