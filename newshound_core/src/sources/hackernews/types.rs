use serde::{Deserialize, Serialize};

/// A single hit from the Algolia HN search API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AlgoliaHit {
    #[serde(rename = "objectID")]
    pub object_id: Option<String>,
    #[serde(rename = "_tags")]
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub created_at: Option<String>,
    pub created_at_i: Option<i64>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub story_text: Option<String>,
    pub points: Option<i64>,
    pub num_comments: Option<i64>,
}

impl AlgoliaHit {
    pub fn is_story(&self) -> bool {
        self.tags
            .as_ref()
            .map(|tags| tags.iter().any(|t| t == "story"))
            .unwrap_or(false)
    }

    /// Link to the discussion page.
    pub fn item_url(&self) -> Option<String> {
        self.object_id
            .as_ref()
            .map(|id| format!("https://news.ycombinator.com/item?id={id}"))
    }
}

// Algolia search response structure (only the fields we read)
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AlgoliaSearchResponse {
    #[serde(default)]
    pub hits: Vec<AlgoliaHit>,
    #[serde(rename = "nbHits")]
    pub nb_hits: Option<i64>,
    #[serde(rename = "hitsPerPage")]
    pub hits_per_page: Option<i64>,
}
