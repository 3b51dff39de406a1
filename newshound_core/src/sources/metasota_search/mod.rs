use crate::article::Article;
use crate::error::SourceError;
use crate::utils::{ensure_success, http_client};
use crate::window::parse_published;
use crate::{NewsSource, TimeFiltering};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

const METASO_MCP_ENDPOINT: &str = "https://metaso.cn/api/mcp";
const SEARCH_TOOL: &str = "metaso_web_search";

const DATE_FIELDS: &[&str] = &["published_date", "date", "created_at", "pub_date", "publish_date"];

/// MetaSota web search called as an MCP tool over JSON-RPC.
#[derive(Clone)]
pub struct MetasotaSource {
    client: reqwest::Client,
    api_key: String,
    max_articles: usize,
}

impl MetasotaSource {
    pub fn new(api_key: String, max_articles: usize) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            max_articles,
        })
    }

    fn rpc_request(&self, query: &str) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {
                "name": SEARCH_TOOL,
                "arguments": {
                    "q": query,
                    "size": self.max_articles,
                    "scope": "webpage",
                    "includeSummary": true,
                    "includeRawContent": false
                }
            }
        })
    }
}

/// Pull the result records out of a JSON-RPC reply.
///
/// The tool returns its payload as JSON text in `result.content[0].text`;
/// a bare `result` array or a top-level `data` array are accepted as well.
pub fn extract_records(reply: &Value) -> Result<Vec<Value>, SourceError> {
    if let Some(err) = reply.get("error") {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(SourceError::Api {
            provider: "MetaSota",
            status: 200,
            body: format!("tool call failed: {message}"),
        });
    }

    let result = reply.get("result");
    if let Some(content) = result.and_then(|r| r.get("content")) {
        let Some(text) = content
            .as_array()
            .and_then(|items| items.first())
            .and_then(|first| first.get("text"))
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
        else {
            return Ok(Vec::new());
        };
        let payload: Value = serde_json::from_str(text)
            .map_err(|e| SourceError::Parse(format!("MetaSota tool payload: {e}")))?;
        return Ok(payload
            .get("webpages")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default());
    }
    if let Some(list) = result.and_then(Value::as_array) {
        return Ok(list.clone());
    }
    Ok(reply
        .get("data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default())
}

fn first_text<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| record.get(*k).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
}

fn author_of(record: &Value) -> String {
    match record.get("authors") {
        Some(Value::Array(names)) => {
            let joined = names
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if !joined.is_empty() {
                return joined;
            }
        }
        Some(Value::String(name)) if !name.trim().is_empty() => return name.clone(),
        _ => {}
    }
    first_text(record, &["author", "creator"])
        .unwrap_or("MetaSota Search")
        .to_string()
}

pub fn records_to_articles(records: &[Value]) -> Vec<Article> {
    let now = Utc::now().to_rfc3339();
    records
        .iter()
        .filter(|r| r.is_object())
        .map(|r| {
            let published = DATE_FIELDS
                .iter()
                .filter_map(|k| r.get(*k).and_then(Value::as_str))
                .find_map(parse_published)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| now.clone());
            let title = first_text(r, &["title", "headline", "name"]).unwrap_or_default();
            let url = first_text(r, &["link", "url", "href"]).unwrap_or_default();
            let summary = first_text(r, &["snippet", "summary", "description", "content", "abstract"])
                .unwrap_or_default();
            let source_name = first_text(r, &["source", "domain", "site"]).unwrap_or("MetaSota");
            Article::new("metasota_search", source_name, title, url)
                .with_summary(summary)
                .with_published(published)
                .with_author(author_of(r))
        })
        .collect()
}

#[async_trait]
impl NewsSource for MetasotaSource {
    fn name(&self) -> &'static str {
        "metasota_search"
    }

    fn description(&self) -> &'static str {
        "MetaSota web search via its MCP endpoint"
    }

    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
        let response = self
            .client
            .post(METASO_MCP_ENDPOINT)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(&self.rpc_request(query))
            .send()
            .await?;
        let reply: Value = ensure_success("MetaSota", response)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("MetaSota response: {e}")))?;

        let records = extract_records(&reply)?;
        tracing::debug!(records = records.len(), "metasota search returned");
        let mut articles = crate::window::filter_by_date(records_to_articles(&records), days_back);
        articles.truncate(self.max_articles);
        Ok(articles)
    }
}
