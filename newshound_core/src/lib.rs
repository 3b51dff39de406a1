// src/lib.rs
pub mod article;
pub mod collector;
pub mod config;
pub mod dedup;
pub mod error;
pub mod sources;
pub mod utils;
pub mod window;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use crate::article::Article;
pub use crate::collector::{
    collect_with_engines, collect_with_single_engine, CollectOptions, Collector, EngineInfo,
    ProgressCallback, SearchResult, SourceProgress, SourceStatus,
};
pub use crate::config::{EngineConfig, EngineUpdate, SearchConfig, TimeRange, ValidationReport};
pub use crate::error::SourceError;
pub use crate::sources::{Blocking, BlockingNewsSource};

/// How a source honours the requested look-back window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFiltering {
    /// The provider API filters by date
    Native,
    /// Results are filtered locally after the fetch
    ClientSide,
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the identifier the source is registered under (e.g. "hackernews").
    fn name(&self) -> &'static str;

    /// Returns a human readable description of the source.
    fn description(&self) -> &'static str;

    /// Whether the provider applies the day window itself.
    fn time_filtering(&self) -> TimeFiltering {
        TimeFiltering::ClientSide
    }

    /// Fetch articles matching `query` published within `days_back` days.
    ///
    /// Implementations truncate to their configured quota and surface
    /// network, auth and malformed-response failures as `Err`.
    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError>;
}

/// Listing entry for a registered source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub name: String,
    pub description: String,
    pub time_filtering: TimeFiltering,
}

/// Initialised adapters keyed by source identifier.
#[derive(Default, Clone)]
pub struct SourceRegistry {
    pub sources: HashMap<String, Arc<dyn NewsSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        SourceRegistry {
            sources: HashMap::new(),
        }
    }

    /// Register under the adapter's own name.
    pub fn register_source(&mut self, source: Arc<dyn NewsSource>) {
        self.sources.insert(source.name().to_string(), source);
    }

    /// Register under an explicit key, replacing any previous adapter.
    pub fn register_as(&mut self, key: impl Into<String>, source: Arc<dyn NewsSource>) {
        self.sources.insert(key.into(), source);
    }

    pub fn get_source(&self, name: &str) -> Option<&Arc<dyn NewsSource>> {
        self.sources.get(name)
    }

    pub fn remove_source(&mut self, name: &str) -> Option<Arc<dyn NewsSource>> {
        self.sources.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn list_sources(&self) -> Vec<SourceInfo> {
        let mut infos: Vec<SourceInfo> = self
            .sources
            .iter()
            .map(|(name, source)| SourceInfo {
                name: name.clone(),
                description: source.description().to_string(),
                time_filtering: source.time_filtering(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.sources.keys().collect();
        names.sort();
        f.debug_struct("SourceRegistry").field("sources", &names).finish()
    }
}

/// Build adapters for every enabled engine the factory knows about.
///
/// Engines whose adapter fails to initialise, or that are not compiled in,
/// are logged and left out.
pub fn build_registry_enabled_only(config: &SearchConfig) -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    for name in config.enabled_sources() {
        let Some(engine) = config.engine(&name) else {
            continue;
        };
        match sources::create_source(&name, engine, config) {
            Ok(Some(source)) => registry.register_as(name, source),
            Ok(None) => {
                tracing::warn!(source = %name, "no adapter available for enabled engine");
            }
            Err(e) => {
                tracing::warn!(source = %name, error = %e, "failed to initialise adapter");
            }
        }
    }
    registry
}
