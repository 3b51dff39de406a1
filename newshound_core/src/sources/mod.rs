// Built-in news sources, one module per provider.

pub mod blocking;

#[cfg(feature = "arxiv")]
pub mod arxiv;
#[cfg(feature = "bing-search")]
pub mod bing_search;
#[cfg(feature = "brave-search")]
pub mod brave_search;
#[cfg(feature = "duckduckgo")]
pub mod duckduckgo;
#[cfg(feature = "google-search")]
pub mod google_search;
#[cfg(feature = "hackernews")]
pub mod hackernews;
#[cfg(feature = "metasota-search")]
pub mod metasota_search;
#[cfg(feature = "newsapi")]
pub mod newsapi;
#[cfg(feature = "rss")]
pub mod rss;
#[cfg(feature = "serper")]
pub mod serper;
#[cfg(feature = "tavily")]
pub mod tavily;

pub use blocking::{Blocking, BlockingNewsSource};

use crate::config::{EngineConfig, SearchConfig};
use crate::error::SourceError;
use crate::NewsSource;
use std::sync::Arc;

/// Build the adapter registered under `name`.
///
/// Returns `Ok(None)` for identifiers that have no built-in adapter or whose
/// feature is not compiled in.
#[allow(unused_variables)]
pub fn create_source(
    name: &str,
    engine: &EngineConfig,
    config: &SearchConfig,
) -> Result<Option<Arc<dyn NewsSource>>, SourceError> {
    use crate::config::engine_ids::*;

    let max = engine.max_articles;
    let key = || {
        engine
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SourceError::MissingCredentials(format!("{name} requires an API key")))
    };

    let source: Arc<dyn NewsSource> = match name {
        #[cfg(feature = "hackernews")]
        HACKERNEWS => Arc::new(hackernews::HackerNewsSource::new(max)?),
        #[cfg(feature = "arxiv")]
        ARXIV => Arc::new(arxiv::ArxivSource::new(max)?),
        #[cfg(feature = "duckduckgo")]
        DUCKDUCKGO => Arc::new(duckduckgo::DuckDuckGoSource::new(max)?),
        #[cfg(feature = "rss")]
        RSS_FEEDS => Arc::new(rss::RssFeedsSource::new(config.rss_feeds.clone(), max)?),
        #[cfg(feature = "newsapi")]
        NEWSAPI => Arc::new(newsapi::NewsApiSource::new(key()?, max)?),
        #[cfg(feature = "tavily")]
        TAVILY => Arc::new(tavily::TavilySource::new(key()?, max)?),
        #[cfg(feature = "google-search")]
        GOOGLE_SEARCH => {
            let engine_id = config.google_search_engine_id.clone().ok_or_else(|| {
                SourceError::MissingCredentials(format!("{name} requires a search engine id"))
            })?;
            Arc::new(google_search::GoogleSearchSource::new(key()?, engine_id, max)?)
        }
        #[cfg(feature = "bing-search")]
        BING_SEARCH => Arc::new(bing_search::BingSearchSource::new(key()?, max)?),
        #[cfg(feature = "serper")]
        SERPER => Arc::new(serper::SerperSource::new(key()?, max)?),
        #[cfg(feature = "brave-search")]
        BRAVE_SEARCH => Arc::new(brave_search::BraveSearchSource::new(key()?, max)?),
        #[cfg(feature = "metasota-search")]
        METASOTA_SEARCH => Arc::new(metasota_search::MetasotaSource::new(key()?, max)?),
        _ => return Ok(None),
    };
    Ok(Some(source))
}

/// Identifiers the factory can build in this build.
pub fn compiled_sources() -> Vec<&'static str> {
    use crate::config::engine_ids::*;

    [
        (HACKERNEWS, cfg!(feature = "hackernews")),
        (ARXIV, cfg!(feature = "arxiv")),
        (DUCKDUCKGO, cfg!(feature = "duckduckgo")),
        (RSS_FEEDS, cfg!(feature = "rss")),
        (NEWSAPI, cfg!(feature = "newsapi")),
        (TAVILY, cfg!(feature = "tavily")),
        (GOOGLE_SEARCH, cfg!(feature = "google-search")),
        (BING_SEARCH, cfg!(feature = "bing-search")),
        (SERPER, cfg!(feature = "serper")),
        (BRAVE_SEARCH, cfg!(feature = "brave-search")),
        (METASOTA_SEARCH, cfg!(feature = "metasota-search")),
    ]
    .into_iter()
    .filter(|(_, on)| *on)
    .map(|(name, _)| name)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_identifiers_have_no_adapter() {
        let config = SearchConfig::default();
        let engine = EngineConfig::enabled();
        assert!(create_source("gopher", &engine, &config).unwrap().is_none());
    }

    #[cfg(feature = "tavily")]
    #[test]
    fn paid_sources_need_a_key() {
        let config = SearchConfig::default();
        let engine = EngineConfig::enabled();
        let err = create_source(crate::config::engine_ids::TAVILY, &engine, &config)
            .err()
            .expect("missing key must fail");
        assert_eq!(err.code_str(), "missing_credentials");
    }

    #[cfg(feature = "hackernews")]
    #[test]
    fn free_sources_build_without_key() {
        let config = SearchConfig::default();
        let engine = EngineConfig::enabled();
        let source = create_source(crate::config::engine_ids::HACKERNEWS, &engine, &config)
            .unwrap()
            .unwrap();
        assert_eq!(source.name(), "hackernews");
    }
}
