use crate::article::Article;
use crate::error::SourceError;
use crate::utils::{ensure_success, http_client};
use crate::NewsSource;
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use url::Url;

const ARXIV_API: &str = "http://export.arxiv.org/api/query";

/// Categories searched alongside the free-text query.
const AI_CATEGORIES: &[&str] = &["cs.AI", "cs.LG", "cs.CL"];

/// One Atom entry from the arXiv API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArxivEntry {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub published: String,
    pub abs_link: Option<String>,
    pub categories: Vec<String>,
}

impl ArxivEntry {
    fn into_article(self) -> Article {
        let url = self.abs_link.unwrap_or(self.id);
        let author = self.authors.join(", ");
        Article::new("arxiv", "ArXiv", collapse_whitespace(&self.title), url)
            .with_summary(collapse_whitespace(&self.summary))
            .with_published(self.published)
            .with_author(author)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Recent AI papers from arXiv. The API has no date parameter, so the window
/// is applied to the newest submissions locally.
#[derive(Clone)]
pub struct ArxivSource {
    client: reqwest::Client,
    max_articles: usize,
}

impl ArxivSource {
    pub fn new(max_articles: usize) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client()?,
            max_articles,
        })
    }

    fn search_url(&self, query: &str) -> Result<Url, SourceError> {
        let mut url = Url::parse(ARXIV_API)
            .map_err(|e| SourceError::InvalidInput(format!("Failed to parse URL: {}", e)))?;

        let categories = AI_CATEGORIES
            .iter()
            .map(|c| format!("cat:{c}"))
            .collect::<Vec<_>>()
            .join(" OR ");
        let search_query = if query.trim().is_empty() {
            format!("({categories})")
        } else {
            format!("({categories}) AND all:{}", query.trim())
        };

        url.query_pairs_mut()
            .append_pair("search_query", &search_query)
            .append_pair("start", "0")
            .append_pair("max_results", &self.max_articles.max(1).to_string())
            .append_pair("sortBy", "submittedDate")
            .append_pair("sortOrder", "descending");
        Ok(url)
    }
}

/// Parse an arXiv Atom feed into entries.
pub fn parse_arxiv_response(xml_content: &str) -> Result<Vec<ArxivEntry>, SourceError> {
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<ArxivEntry> = None;
    let mut current_tag: Option<String> = None;
    let mut buffer = Vec::new();

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "entry" => current = Some(ArxivEntry::default()),
                    "id" | "title" | "summary" | "published" | "name" if current.is_some() => {
                        current_tag = Some(tag_name);
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if let (Some(tag), Some(entry)) = (current_tag.as_deref(), current.as_mut()) {
                    let text = e
                        .unescape()
                        .map_err(|e| SourceError::Parse(format!("arXiv text: {e}")))?
                        .to_string();
                    match tag {
                        "id" => entry.id = text,
                        "title" => entry.title.push_str(&text),
                        "summary" => entry.summary.push_str(&text),
                        "published" => entry.published = text,
                        "name" => entry.authors.push(text),
                        _ => {}
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                if let Some(entry) = current.as_mut() {
                    let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    let attr = |wanted: &str| {
                        e.attributes()
                            .filter_map(Result::ok)
                            .find(|a| a.key.as_ref() == wanted.as_bytes())
                            .map(|a| String::from_utf8_lossy(&a.value).to_string())
                    };
                    match tag_name.as_str() {
                        "link" => {
                            let is_abs = attr("rel").as_deref() == Some("alternate")
                                && attr("title").is_none();
                            if is_abs && entry.abs_link.is_none() {
                                entry.abs_link = attr("href");
                            }
                        }
                        "category" => {
                            if let Some(term) = attr("term") {
                                entry.categories.push(term);
                            }
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag_name == "entry" {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                    current_tag = None;
                } else if current_tag.as_deref() == Some(tag_name.as_str()) {
                    current_tag = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SourceError::Parse(format!("arXiv feed: {e}"))),
            _ => {}
        }
        buffer.clear();
    }

    Ok(entries)
}

#[async_trait]
impl NewsSource for ArxivSource {
    fn name(&self) -> &'static str {
        "arxiv"
    }

    fn description(&self) -> &'static str {
        "arXiv preprints in cs.AI, cs.LG and cs.CL, newest first"
    }

    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
        let url = self.search_url(query)?;
        let response = self.client.get(url).send().await?;
        let response = ensure_success("arXiv", response).await?;
        let content = response.text().await?;

        let entries = parse_arxiv_response(&content)?;
        tracing::debug!(entries = entries.len(), "arxiv feed parsed");

        let articles = entries.into_iter().map(ArxivEntry::into_article).collect();
        let mut articles = crate::window::filter_by_date(articles, days_back);
        articles.truncate(self.max_articles);
        Ok(articles)
    }
}
