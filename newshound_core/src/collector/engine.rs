//! Collection execution engine.
//!
//! Fans a query out to every selected source, waits for all of them to
//! settle and folds the outcomes into one [`SearchResult`].

use super::{SearchResult, SourceProgress};
use crate::article::Article;
use crate::config::{requires_api_key, EngineConfig, EngineUpdate, SearchConfig, TimeRange};
use crate::dedup::deduplicate;
use crate::error::SourceError;
use crate::{build_registry_enabled_only, sources, window, NewsSource, SourceRegistry, TimeFiltering};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// Receives human readable status lines while a run progresses.
pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Per-call knobs for [`Collector::collect_with`].
#[derive(Clone, Default)]
pub struct CollectOptions {
    /// Explicit subset of sources, dispatched in the given order
    pub sources: Option<Vec<String>>,

    /// Overrides the configured global similarity threshold
    pub similarity_threshold: Option<f64>,

    pub progress: Option<ProgressCallback>,
}

impl CollectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sources<S: Into<String>>(mut self, sources: impl IntoIterator<Item = S>) -> Self {
        self.sources = Some(sources.into_iter().map(Into::into).collect());
        self
    }

    pub fn similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = Some(threshold);
        self
    }

    pub fn progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    fn notify(&self, message: &str) {
        if let Some(callback) = &self.progress {
            callback(message);
        }
    }
}

impl std::fmt::Debug for CollectOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectOptions")
            .field("sources", &self.sources)
            .field("similarity_threshold", &self.similarity_threshold)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Registry view of one engine, for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub name: String,
    pub enabled: bool,
    /// An adapter is built and ready to dispatch
    pub initialized: bool,
    pub max_articles: usize,
    pub time_range: TimeRange,
    pub effective_days_back: i64,
    pub requires_api_key: bool,
    pub has_api_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_filtering: Option<TimeFiltering>,
}

/// Runs collection passes over the configured sources.
#[derive(Debug)]
pub struct Collector {
    config: SearchConfig,
    registry: SourceRegistry,
}

struct Dispatched {
    name: String,
    engine: EngineConfig,
    days_back: i64,
}

type SourceOutcome = (Result<Vec<Article>, SourceError>, u64);

impl Collector {
    /// Build adapters for every enabled engine in `config`.
    pub fn new(config: SearchConfig) -> Self {
        let registry = build_registry_enabled_only(&config);
        tracing::debug!(sources = registry.len(), "collector initialised");
        Self { config, registry }
    }

    /// Use caller-supplied adapters instead of the built-in factory.
    pub fn with_sources<K, I>(config: SearchConfig, sources: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Arc<dyn NewsSource>)>,
    {
        let mut registry = SourceRegistry::new();
        for (key, source) in sources {
            registry.register_as(key, source);
        }
        Self { config, registry }
    }

    pub fn from_parts(config: SearchConfig, registry: SourceRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Enabled engines with a ready adapter, registration order.
    pub fn available_sources(&self) -> Vec<String> {
        self.config
            .enabled_sources()
            .into_iter()
            .filter(|name| self.registry.contains(name))
            .collect()
    }

    pub fn engine_info(&self) -> Vec<EngineInfo> {
        self.config
            .engines()
            .map(|(name, engine)| {
                let source = self.registry.get_source(name);
                EngineInfo {
                    name: name.to_string(),
                    enabled: engine.enabled,
                    initialized: source.is_some(),
                    max_articles: engine.max_articles,
                    time_range: engine.time_range,
                    effective_days_back: engine.get_effective_days_back(),
                    requires_api_key: requires_api_key(name),
                    has_api_key: engine.has_api_key(),
                    description: source.map(|s| s.description().to_string()),
                    time_filtering: source.map(|s| s.time_filtering()),
                }
            })
            .collect()
    }

    /// Apply a partial update to one engine and rebuild its adapter.
    ///
    /// Returns `false` if the engine is not registered. The change is seen by
    /// the next [`collect`](Self::collect) call.
    pub fn update_engine_config(&mut self, name: &str, update: EngineUpdate) -> bool {
        if self.config.engine(name).is_none() {
            return false;
        }
        self.config.set_engine_config(name, update);
        self.refresh_source(name);
        true
    }

    /// Returns `false` if the engine is not registered.
    pub fn set_time_range(&mut self, name: &str, range: TimeRange, custom_days: Option<i64>) -> bool {
        self.config.set_engine_time_range(name, range, custom_days)
    }

    pub fn set_time_range_all(&mut self, range: TimeRange) {
        self.config.set_time_range_preset(range);
    }

    fn refresh_source(&mut self, name: &str) {
        let Some(engine) = self.config.engine(name) else {
            return;
        };
        if !engine.enabled {
            if self.registry.remove_source(name).is_some() {
                tracing::debug!(source = %name, "adapter dropped after disable");
            }
            return;
        }
        match sources::create_source(name, engine, &self.config) {
            Ok(Some(source)) => {
                self.registry.register_as(name, source);
                tracing::debug!(source = %name, "adapter rebuilt");
            }
            // Not a built-in identifier: keep whatever adapter was injected.
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(source = %name, error = %e, "failed to rebuild adapter");
                self.registry.remove_source(name);
            }
        }
    }

    /// Run one collection pass over every available source.
    pub async fn collect(&self, query: &str) -> SearchResult {
        self.collect_with(query, CollectOptions::default()).await
    }

    pub async fn collect_with(&self, query: &str, options: CollectOptions) -> SearchResult {
        let start = Instant::now();
        let selected = options
            .sources
            .clone()
            .unwrap_or_else(|| self.available_sources());
        let timeout_ms = self.config.source_timeout_ms;

        let mut progress: BTreeMap<String, SourceProgress> = BTreeMap::new();
        let mut dispatched = Vec::with_capacity(selected.len());
        let mut handles = Vec::with_capacity(selected.len());

        for name in selected {
            let Some(source) = self.registry.get_source(&name).cloned() else {
                tracing::warn!(source = %name, "skipping source without adapter");
                continue;
            };
            let Some(engine) = self.config.engine(&name).cloned() else {
                tracing::warn!(source = %name, "skipping source without engine config");
                continue;
            };
            if dispatched.iter().any(|d: &Dispatched| d.name == name) {
                continue;
            }

            let days_back = engine.get_effective_days_back();
            progress.insert(name.clone(), SourceProgress::pending());
            options.notify(&format!("Searching {name}..."));
            tracing::debug!(source = %name, days_back, "dispatching search");

            handles.push(tokio::spawn(run_source(
                source,
                query.to_string(),
                days_back,
                timeout_ms,
            )));
            dispatched.push(Dispatched {
                name,
                engine,
                days_back,
            });
        }

        let settled = futures::future::join_all(handles).await;

        let mut candidates: Vec<Article> = Vec::new();
        for (source, outcome) in dispatched.into_iter().zip(settled) {
            let Dispatched {
                name,
                engine,
                days_back,
            } = source;

            let entry = match outcome {
                Ok((Ok(articles), elapsed_ms)) => {
                    let mut kept = window::filter_by_date(articles, days_back);
                    kept.truncate(engine.max_articles);
                    options.notify(&format!("Completed {name}: {} articles", kept.len()));
                    tracing::debug!(source = %name, count = kept.len(), elapsed_ms, "source completed");
                    let entry = SourceProgress::completed(kept.len(), elapsed_ms);
                    candidates.extend(kept);
                    entry
                }
                Ok((Err(e), elapsed_ms)) => {
                    options.notify(&format!("Failed {name}: {e}"));
                    if e.is_local() {
                        tracing::error!(source = %name, error = %e, code = e.code_str(), "source failed locally");
                    } else {
                        tracing::warn!(source = %name, error = %e, code = e.code_str(), "source failed");
                    }
                    SourceProgress::failed(e.to_string(), e.code_str(), Some(elapsed_ms))
                }
                Err(join_error) => {
                    let message = format!("search task aborted: {join_error}");
                    options.notify(&format!("Failed {name}: {message}"));
                    tracing::warn!(source = %name, error = %join_error, "source task aborted");
                    SourceProgress::failed(message, "internal_error", None)
                }
            };
            progress.insert(name, entry);
        }

        let total = candidates.len();
        let threshold = options
            .similarity_threshold
            .unwrap_or(self.config.global_similarity_threshold);
        let articles = deduplicate(candidates, threshold);

        let result = SearchResult::assemble(query, total, articles, progress)
            .with_duration_ms(start.elapsed().as_millis() as u64);

        tracing::info!(
            query,
            sources = result.source_progress.len(),
            failed = result.failed_sources().len(),
            total = result.total_articles,
            unique = result.unique_articles,
            "collection finished"
        );
        result
    }
}

async fn run_source(
    source: Arc<dyn NewsSource>,
    query: String,
    days_back: i64,
    timeout_ms: Option<u64>,
) -> SourceOutcome {
    let start = Instant::now();
    let outcome = match timeout_ms {
        Some(ms) => match timeout(Duration::from_millis(ms), source.search(&query, days_back)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(format!("no response after {ms}ms"))),
        },
        None => source.search(&query, days_back).await,
    };
    (outcome, start.elapsed().as_millis() as u64)
}

/// Collect from one engine with a throwaway registry.
pub async fn collect_with_single_engine(
    engine: &str,
    query: &str,
    range: TimeRange,
    max_articles: usize,
    api_key: Option<String>,
) -> SearchResult {
    let config = SearchConfig::single_engine(engine, range, max_articles, api_key);
    Collector::new(config).collect(query).await
}

/// Collect from exactly `engines` with a throwaway registry.
pub async fn collect_with_engines<S: AsRef<str>>(
    engines: &[S],
    query: &str,
    range: TimeRange,
    max_articles: usize,
) -> SearchResult {
    let config = SearchConfig::for_engines(engines, range, max_articles);
    Collector::new(config).collect(query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::SourceStatus;
    use crate::sources::{Blocking, BlockingNewsSource};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    enum Behaviour {
        Articles(Vec<&'static str>),
        Fail,
        Panic,
    }

    struct MockSource {
        name: &'static str,
        delay: Duration,
        behaviour: Behaviour,
        calls: Arc<AtomicUsize>,
        last_days: Arc<AtomicI64>,
    }

    impl MockSource {
        fn new(name: &'static str, behaviour: Behaviour) -> Self {
            Self {
                name,
                delay: Duration::ZERO,
                behaviour,
                calls: Arc::new(AtomicUsize::new(0)),
                last_days: Arc::new(AtomicI64::new(i64::MIN)),
            }
        }

        fn delayed(mut self, ms: u64) -> Self {
            self.delay = Duration::from_millis(ms);
            self
        }

        fn shared(self) -> Arc<dyn NewsSource> {
            Arc::new(self)
        }
    }

    fn fresh(source: &str, title: &str) -> Article {
        Article::new(source, source, title, format!("https://{source}.test/{}", title.len()))
            .with_published(Utc::now().to_rfc3339())
    }

    #[async_trait]
    impl NewsSource for MockSource {
        fn name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> &'static str {
            "mock"
        }

        async fn search(&self, _query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last_days.store(days_back, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match &self.behaviour {
                Behaviour::Articles(titles) => {
                    Ok(titles.iter().map(|t| fresh(self.name, t)).collect())
                }
                Behaviour::Fail => Err(SourceError::api(
                    "Mock",
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream down".into(),
                )),
                Behaviour::Panic => panic!("adapter bug"),
            }
        }
    }

    fn config_for(names: &[&str]) -> SearchConfig {
        let mut config = SearchConfig::empty();
        for name in names {
            config.register(*name, EngineConfig::enabled());
        }
        config
    }

    fn collector(sources: Vec<MockSource>) -> Collector {
        let names: Vec<&str> = sources.iter().map(|s| s.name).collect();
        let config = config_for(&names);
        Collector::with_sources(config, sources.into_iter().map(|s| (s.name, s.shared())))
    }

    fn assert_invariants(result: &SearchResult) {
        assert_eq!(
            result.total_articles,
            result.unique_articles + result.duplicates_removed
        );
        assert_eq!(result.unique_articles, result.articles.len());
        assert!(result
            .source_progress
            .values()
            .all(|p| p.status.is_terminal()));
    }

    #[tokio::test]
    async fn test_partial_failure_is_isolated() {
        let collector = collector(vec![
            MockSource::new("alpha", Behaviour::Articles(vec!["Alpha story one", "Alpha story two"])),
            MockSource::new("broken", Behaviour::Fail),
            MockSource::new("gamma", Behaviour::Articles(vec!["Gamma headline"])),
        ]);

        let result = collector.collect("ai").await;
        assert_invariants(&result);

        assert_eq!(result.failed_sources(), vec!["broken"]);
        assert_eq!(result.completed_sources(), vec!["alpha", "gamma"]);
        let broken = result.progress_for("broken").unwrap();
        assert!(broken.error.as_deref().unwrap().contains("upstream down"));
        assert_eq!(broken.error_code.as_deref(), Some("upstream_error"));

        let sources: Vec<&str> = result.articles.iter().map(|a| a.source()).collect();
        assert_eq!(sources, vec!["alpha", "alpha", "gamma"]);
        assert_eq!(result.progress_for("alpha").unwrap().articles_found, 2);
    }

    #[tokio::test]
    async fn test_panicking_adapter_is_recorded_as_failed() {
        let collector = collector(vec![
            MockSource::new("ok", Behaviour::Articles(vec!["Fine"])),
            MockSource::new("bad", Behaviour::Panic),
        ]);
        let result = collector.collect("ai").await;
        assert_invariants(&result);
        assert_eq!(result.failed_sources(), vec!["bad"]);
        assert_eq!(result.unique_articles, 1);
    }

    #[tokio::test]
    async fn test_zero_enabled_sources() {
        let mut config = SearchConfig::default();
        for name in config.available_engines() {
            config.set_engine_config(&name, EngineUpdate::disable());
        }
        assert!(!config.validate().valid);

        let collector = Collector::new(config);
        let result = collector.collect("ai").await;
        assert_invariants(&result);
        assert_eq!(result.total_articles, 0);
        assert!(result.articles.is_empty());
        assert!(result.source_progress.is_empty());
    }

    #[tokio::test]
    async fn test_sources_run_concurrently() {
        let collector = collector(vec![
            MockSource::new("fast", Behaviour::Articles(vec!["Fast news"])).delayed(10),
            MockSource::new("medium", Behaviour::Articles(vec!["Medium news item"])).delayed(100),
            MockSource::new("slow", Behaviour::Articles(vec!["Slow breaking report"])).delayed(500),
        ]);

        let start = Instant::now();
        let result = collector.collect("ai").await;
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed < Duration::from_millis(600), "took {elapsed:?}");
        assert_eq!(result.completed_sources().len(), 3);
    }

    #[tokio::test]
    async fn test_articles_follow_dispatch_order_not_completion_order() {
        let collector = collector(vec![
            MockSource::new("first", Behaviour::Articles(vec!["Slow first source"])).delayed(80),
            MockSource::new("second", Behaviour::Articles(vec!["Quick second source"])),
        ]);
        let result = collector.collect("ai").await;
        let titles: Vec<&str> = result.articles.iter().map(|a| a.title()).collect();
        assert_eq!(titles, vec!["Slow first source", "Quick second source"]);
    }

    #[tokio::test]
    async fn test_cross_source_duplicates_removed() {
        let collector = collector(vec![
            MockSource::new("hn", Behaviour::Articles(vec!["OpenAI releases GPT-5", "Rust in the kernel"])),
            MockSource::new("web", Behaviour::Articles(vec!["OpenAI releases GPT-5.", "Google releases Gemini"])),
        ]);

        let result = collector.collect("ai").await;
        assert_invariants(&result);
        assert_eq!(result.total_articles, 4);
        assert_eq!(result.unique_articles, 3);
        assert_eq!(result.duplicates_removed, 1);
        assert_eq!(result.articles[0].source(), "hn");

        // A stricter call-level threshold keeps the near duplicate.
        let strict = collector
            .collect_with("ai", CollectOptions::new().similarity_threshold(0.99))
            .await;
        assert_eq!(strict.unique_articles, 4);
    }

    #[tokio::test]
    async fn test_explicit_subset_and_unknown_sources() {
        let a = MockSource::new("a", Behaviour::Articles(vec!["Story A"]));
        let b = MockSource::new("b", Behaviour::Articles(vec!["Story B"]));
        let b_calls = Arc::clone(&b.calls);
        let collector = collector(vec![a, b]);

        let result = collector
            .collect_with("ai", CollectOptions::new().sources(["a", "nope"]))
            .await;
        assert_eq!(result.source_progress.len(), 1);
        assert!(result.progress_for("a").is_some());
        assert!(result.progress_for("nope").is_none());
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_progress_messages() {
        let messages = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&messages);
        let collector = collector(vec![
            MockSource::new("good", Behaviour::Articles(vec!["Headline"])),
            MockSource::new("bad", Behaviour::Fail),
        ]);

        collector
            .collect_with(
                "ai",
                CollectOptions::new().progress(move |msg| sink.lock().unwrap().push(msg.to_string())),
            )
            .await;

        let messages = messages.lock().unwrap();
        assert!(messages.contains(&"Searching good...".to_string()));
        assert!(messages.contains(&"Searching bad...".to_string()));
        assert!(messages.contains(&"Completed good: 1 articles".to_string()));
        assert!(messages.iter().any(|m| m.starts_with("Failed bad:")));
    }

    #[tokio::test]
    async fn test_effective_window_and_quota_applied() {
        struct Stale;

        #[async_trait]
        impl NewsSource for Stale {
            fn name(&self) -> &'static str {
                "stale"
            }
            fn description(&self) -> &'static str {
                "returns unfiltered results"
            }
            async fn search(&self, _q: &str, _d: i64) -> Result<Vec<Article>, SourceError> {
                let now = Utc::now();
                Ok(vec![
                    fresh("stale", "Fresh one"),
                    Article::new("stale", "Stale", "Three days old", "")
                        .with_published((now - chrono::Duration::days(3)).to_rfc3339()),
                    Article::new("stale", "Stale", "Undated", ""),
                    fresh("stale", "Fresh two"),
                    fresh("stale", "Fresh three, over quota"),
                ])
            }
        }

        let observer = MockSource::new("observer", Behaviour::Articles(vec![]));
        let observed_days = Arc::clone(&observer.last_days);

        let mut config = SearchConfig::empty();
        config.register(
            "stale",
            EngineConfig {
                enabled: true,
                max_articles: 2,
                time_range: TimeRange::OneDay,
                ..EngineConfig::default()
            },
        );
        config.register(
            "observer",
            EngineConfig {
                enabled: true,
                time_range: TimeRange::Custom,
                custom_days: Some(3),
                ..EngineConfig::default()
            },
        );
        let collector = Collector::with_sources(
            config,
            [
                ("stale", Arc::new(Stale) as Arc<dyn NewsSource>),
                ("observer", observer.shared()),
            ],
        );

        let result = collector.collect("ai").await;
        let titles: Vec<&str> = result.articles.iter().map(|a| a.title()).collect();
        assert_eq!(titles, vec!["Fresh one", "Fresh two"]);
        assert_eq!(result.progress_for("stale").unwrap().articles_found, 2);
        assert_eq!(observed_days.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_source_timeout_marks_failure() {
        let mut collector = collector(vec![
            MockSource::new("quick", Behaviour::Articles(vec!["On time"])),
            MockSource::new("sluggish", Behaviour::Articles(vec!["Too late"])).delayed(400),
        ]);
        collector.config.source_timeout_ms = Some(50);

        let start = Instant::now();
        let result = collector.collect("ai").await;
        assert!(start.elapsed() < Duration::from_millis(300));
        let sluggish = result.progress_for("sluggish").unwrap();
        assert_eq!(sluggish.status, SourceStatus::Failed);
        assert_eq!(sluggish.error_code.as_deref(), Some("timeout"));
        assert_eq!(result.unique_articles, 1);
    }

    #[tokio::test]
    async fn test_reconfiguration_applies_to_next_run() {
        let mut collector = collector(vec![
            MockSource::new("a", Behaviour::Articles(vec!["Story A"])),
            MockSource::new("b", Behaviour::Articles(vec!["Story B"])),
        ]);

        let before = collector.collect("ai").await;
        assert_eq!(before.source_progress.len(), 2);

        assert!(!collector.update_engine_config("missing", EngineUpdate::enable()));
        assert!(collector.update_engine_config("b", EngineUpdate::disable()));
        assert_eq!(collector.available_sources(), vec!["a"]);

        let after = collector.collect("ai").await;
        assert_eq!(after.source_progress.len(), 1);
        assert_eq!(before.source_progress.len(), 2);

        // No built-in adapter exists for "b", so re-enabling leaves it uninitialised.
        assert!(collector.update_engine_config("b", EngineUpdate::enable().max_articles(1)));
        assert_eq!(collector.config().engine("b").unwrap().max_articles, 1);
        assert!(collector.engine_info().iter().any(|i| i.name == "b" && i.enabled && !i.initialized));
    }

    #[tokio::test]
    async fn test_blocking_sources_are_dispatched() {
        struct SyncFeed;

        impl BlockingNewsSource for SyncFeed {
            fn name(&self) -> &'static str {
                "sync"
            }
            fn description(&self) -> &'static str {
                "blocking provider"
            }
            fn search_blocking(&self, _q: &str, _d: i64) -> Result<Vec<Article>, SourceError> {
                std::thread::sleep(Duration::from_millis(150));
                Ok(vec![fresh("sync", "Blocking provider story")])
            }
        }

        let config = config_for(&["sync", "async"]);
        let collector = Collector::with_sources(
            config,
            [
                ("sync", Blocking::new(SyncFeed).into_source()),
                (
                    "async",
                    MockSource::new("async", Behaviour::Articles(vec!["Async provider story"]))
                        .delayed(150)
                        .shared(),
                ),
            ],
        );

        let start = Instant::now();
        let result = collector.collect("ai").await;
        assert!(start.elapsed() < Duration::from_millis(280));
        assert_eq!(result.unique_articles, 2);
    }

    #[test]
    fn test_engine_info_reports_keys() {
        let mut config = SearchConfig::default();
        config.set_engine_config("tavily", EngineUpdate::enable().api_key("k"));
        let collector = Collector::from_parts(config, SourceRegistry::new());
        let info = collector.engine_info();
        let tavily = info.iter().find(|i| i.name == "tavily").unwrap();
        assert!(tavily.enabled && tavily.requires_api_key && tavily.has_api_key);
        assert!(!tavily.initialized);
        let hn = info.iter().find(|i| i.name == "hackernews").unwrap();
        assert!(!hn.requires_api_key);
        assert_eq!(hn.effective_days_back, 7);
    }
}
