//! Engine configuration registry.
//!
//! [`SearchConfig`] holds one [`EngineConfig`] per source, in registration
//! order, plus the global knobs the collector reads. Nothing in here touches
//! the network or the process environment; credentials are handed in by the
//! caller through [`SearchConfig::apply_credentials`].

use crate::dedup::DEFAULT_SIMILARITY_THRESHOLD;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ============================================================================
// Default Values
// ============================================================================

/// Default per-source quota
pub const DEFAULT_MAX_ARTICLES: usize = 10;

/// Default look-back window in days
pub const DEFAULT_DAYS_BACK: i64 = 7;

/// Source identifiers known to the built-in adapter factory.
pub mod engine_ids {
    pub const HACKERNEWS: &str = "hackernews";
    pub const ARXIV: &str = "arxiv";
    pub const DUCKDUCKGO: &str = "duckduckgo";
    pub const RSS_FEEDS: &str = "rss_feeds";
    pub const NEWSAPI: &str = "newsapi";
    pub const TAVILY: &str = "tavily";
    pub const GOOGLE_SEARCH: &str = "google_search";
    pub const BING_SEARCH: &str = "bing_search";
    pub const SERPER: &str = "serper";
    pub const BRAVE_SEARCH: &str = "brave_search";
    pub const METASOTA_SEARCH: &str = "metasota_search";
}

use engine_ids::*;

/// Built-in engines in registration order, with their default enable flag.
const BUILTIN_ENGINES: &[(&str, bool)] = &[
    (HACKERNEWS, true),
    (ARXIV, true),
    (DUCKDUCKGO, true),
    (RSS_FEEDS, true),
    (NEWSAPI, false),
    (TAVILY, false),
    (GOOGLE_SEARCH, false),
    (BING_SEARCH, false),
    (SERPER, false),
    (BRAVE_SEARCH, false),
    (METASOTA_SEARCH, false),
];

/// Engines that need an API key, and the environment variable it usually
/// lives in. Only the CLI reads these variables.
pub const CREDENTIAL_ENV_VARS: &[(&str, &str)] = &[
    (NEWSAPI, "NEWS_API_KEY"),
    (TAVILY, "TAVILY_API_KEY"),
    (GOOGLE_SEARCH, "GOOGLE_SEARCH_API_KEY"),
    (BING_SEARCH, "BING_SEARCH_API_KEY"),
    (SERPER, "SERPER_API_KEY"),
    (BRAVE_SEARCH, "BRAVE_SEARCH_API_KEY"),
    (METASOTA_SEARCH, "METASOSEARCH_API_KEY"),
];

/// Environment variable holding the Google Programmable Search engine id.
pub const GOOGLE_ENGINE_ID_ENV_VAR: &str = "GOOGLE_SEARCH_ENGINE_ID";

/// Feeds polled by the `rss_feeds` source when none are configured.
pub static DEFAULT_RSS_FEEDS: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "https://techcrunch.com/category/artificial-intelligence/feed/",
        "https://venturebeat.com/category/ai/feed/",
        "https://www.theverge.com/rss/ai-artificial-intelligence/index.xml",
        "https://www.technologyreview.com/topic/artificial-intelligence/feed",
        "https://openai.com/news/rss.xml",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

pub fn requires_api_key(engine: &str) -> bool {
    credential_env_var(engine).is_some()
}

pub fn credential_env_var(engine: &str) -> Option<&'static str> {
    CREDENTIAL_ENV_VARS
        .iter()
        .find(|(name, _)| *name == engine)
        .map(|(_, var)| *var)
}

// ============================================================================
// TimeRange
// ============================================================================

/// Named look-back presets, or a custom day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeRange {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "7d")]
    #[default]
    OneWeek,
    #[serde(rename = "30d")]
    OneMonth,
    #[serde(rename = "365d")]
    OneYear,
    #[serde(rename = "custom")]
    Custom,
}

impl TimeRange {
    /// Day count for a preset; `None` for [`TimeRange::Custom`].
    pub fn preset_days(self) -> Option<i64> {
        match self {
            TimeRange::OneDay => Some(1),
            TimeRange::OneWeek => Some(7),
            TimeRange::OneMonth => Some(30),
            TimeRange::OneYear => Some(365),
            TimeRange::Custom => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::OneDay => "1d",
            TimeRange::OneWeek => "7d",
            TimeRange::OneMonth => "30d",
            TimeRange::OneYear => "365d",
            TimeRange::Custom => "custom",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" | "day" | "one_day" => Ok(TimeRange::OneDay),
            "7d" | "week" | "one_week" => Ok(TimeRange::OneWeek),
            "30d" | "month" | "one_month" => Ok(TimeRange::OneMonth),
            "365d" | "year" | "one_year" => Ok(TimeRange::OneYear),
            "custom" => Ok(TimeRange::Custom),
            other => Err(format!(
                "unknown time range '{other}' (expected 1d, 7d, 30d, 365d or custom)"
            )),
        }
    }
}

// ============================================================================
// EngineConfig
// ============================================================================

/// Per-source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Maximum articles kept from this source per run (default: 10)
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,

    /// Fallback window when `time_range` is custom without a day count (default: 7)
    #[serde(default = "default_days_back")]
    pub days_back: i64,

    #[serde(default)]
    pub time_range: TimeRange,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_days: Option<i64>,

    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_max_articles() -> usize {
    DEFAULT_MAX_ARTICLES
}

fn default_days_back() -> i64 {
    DEFAULT_DAYS_BACK
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_articles: DEFAULT_MAX_ARTICLES,
            days_back: DEFAULT_DAYS_BACK,
            time_range: TimeRange::default(),
            custom_days: None,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            api_key: None,
        }
    }
}

impl EngineConfig {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Concrete day window: custom count, else preset, else `days_back`.
    pub fn get_effective_days_back(&self) -> i64 {
        match (self.time_range, self.custom_days) {
            (TimeRange::Custom, Some(days)) => days,
            (range, _) => range.preset_days().unwrap_or(self.days_back),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    fn apply(&mut self, update: &EngineUpdate) {
        self.enabled = update.enabled;
        if let Some(max) = update.max_articles {
            self.max_articles = max;
        }
        if let Some(days) = update.days_back {
            self.days_back = days;
        }
        if let Some(range) = update.time_range {
            self.time_range = range;
        }
        if let Some(days) = update.custom_days {
            self.custom_days = Some(days);
        }
        if let Some(threshold) = update.similarity_threshold {
            self.similarity_threshold = threshold;
        }
        if let Some(key) = &update.api_key {
            self.api_key = Some(key.clone());
        }
    }
}

/// Partial update for one engine. `enabled` is always applied; `None`
/// fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineUpdate {
    pub enabled: bool,
    pub max_articles: Option<usize>,
    pub days_back: Option<i64>,
    pub time_range: Option<TimeRange>,
    pub custom_days: Option<i64>,
    pub similarity_threshold: Option<f64>,
    pub api_key: Option<String>,
}

impl EngineUpdate {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn enable() -> Self {
        Self::new(true)
    }

    pub fn disable() -> Self {
        Self::new(false)
    }

    pub fn max_articles(mut self, max: usize) -> Self {
        self.max_articles = Some(max);
        self
    }

    pub fn days_back(mut self, days: i64) -> Self {
        self.days_back = Some(days);
        self
    }

    pub fn time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    pub fn custom_days(mut self, days: i64) -> Self {
        self.custom_days = Some(days);
        self
    }

    pub fn similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = Some(threshold);
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

// ============================================================================
// SearchConfig
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct EngineEntry {
    name: String,
    #[serde(flatten)]
    config: EngineConfig,
}

/// Registry of engines plus global collection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    engines: Vec<EngineEntry>,

    /// Threshold used for cross-source deduplication (default: 0.85)
    #[serde(default = "default_similarity_threshold")]
    pub global_similarity_threshold: f64,

    #[serde(default = "default_max_articles")]
    pub global_max_articles: usize,

    #[serde(default = "default_days_back")]
    pub global_days_back: i64,

    /// Programmable Search engine id, required by `google_search`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_search_engine_id: Option<String>,

    /// Feeds polled by `rss_feeds`
    #[serde(default = "default_rss_feeds")]
    pub rss_feeds: Vec<String>,

    /// Optional per-source deadline; unset means wait for every source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_timeout_ms: Option<u64>,
}

fn default_rss_feeds() -> Vec<String> {
    DEFAULT_RSS_FEEDS.clone()
}

impl Default for SearchConfig {
    fn default() -> Self {
        let mut config = Self::empty();
        for (name, enabled) in BUILTIN_ENGINES {
            config.register(
                *name,
                EngineConfig {
                    enabled: *enabled,
                    ..EngineConfig::default()
                },
            );
        }
        config
    }
}

impl SearchConfig {
    /// Registry with no engines registered.
    pub fn empty() -> Self {
        Self {
            engines: Vec::new(),
            global_similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            global_max_articles: DEFAULT_MAX_ARTICLES,
            global_days_back: DEFAULT_DAYS_BACK,
            google_search_engine_id: None,
            rss_feeds: default_rss_feeds(),
            source_timeout_ms: None,
        }
    }

    /// Default registry with `range` applied to every engine and only
    /// `engines` enabled, each capped at `max_articles`.
    ///
    /// Names that are not registered are skipped. An empty list keeps the
    /// default enabled set.
    pub fn for_engines<S: AsRef<str>>(engines: &[S], range: TimeRange, max_articles: usize) -> Self {
        let mut config = Self::default();
        config.set_time_range_preset(range);
        if engines.is_empty() {
            return config;
        }

        for entry in &mut config.engines {
            entry.config.enabled = false;
        }
        for name in engines {
            if let Some(engine) = config.engine_mut(name.as_ref()) {
                engine.apply(&EngineUpdate::enable().max_articles(max_articles));
            }
        }
        config
    }

    /// Default registry with a single engine enabled. An unregistered name
    /// is added as a new entry.
    pub fn single_engine(
        engine: &str,
        range: TimeRange,
        max_articles: usize,
        api_key: Option<String>,
    ) -> Self {
        let mut config = Self::default();
        for entry in &mut config.engines {
            entry.config.enabled = false;
        }
        let mut update = EngineUpdate::enable()
            .max_articles(max_articles)
            .time_range(range);
        if let Some(key) = api_key {
            update = update.api_key(key);
        }
        config.set_engine_config(engine, update);
        config
    }

    /// Add or replace an engine. Replacing keeps the original position.
    pub fn register(&mut self, name: impl Into<String>, config: EngineConfig) {
        let name = name.into();
        match self.engines.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.config = config,
            None => self.engines.push(EngineEntry { name, config }),
        }
    }

    pub fn engine(&self, name: &str) -> Option<&EngineConfig> {
        self.engines
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.config)
    }

    fn engine_mut(&mut self, name: &str) -> Option<&mut EngineConfig> {
        self.engines
            .iter_mut()
            .find(|e| e.name == name)
            .map(|e| &mut e.config)
    }

    /// Every registered engine, registration order.
    pub fn engines(&self) -> impl Iterator<Item = (&str, &EngineConfig)> {
        self.engines.iter().map(|e| (e.name.as_str(), &e.config))
    }

    pub fn available_engines(&self) -> Vec<String> {
        self.engines.iter().map(|e| e.name.clone()).collect()
    }

    /// Names of enabled engines, registration order.
    pub fn enabled_sources(&self) -> Vec<String> {
        self.engines
            .iter()
            .filter(|e| e.config.enabled)
            .map(|e| e.name.clone())
            .collect()
    }

    /// Apply a partial update to one engine, creating it with defaults if it
    /// is not registered yet.
    pub fn set_engine_config(&mut self, name: &str, update: EngineUpdate) {
        if self.engine(name).is_none() {
            self.register(name, EngineConfig::default());
        }
        if let Some(config) = self.engine_mut(name) {
            config.apply(&update);
        }
    }

    /// Set the same preset on every engine.
    pub fn set_time_range_preset(&mut self, range: TimeRange) {
        for entry in &mut self.engines {
            entry.config.time_range = range;
        }
    }

    /// Use an explicit day window on every engine.
    pub fn set_custom_days(&mut self, days: i64) {
        for entry in &mut self.engines {
            entry.config.time_range = TimeRange::Custom;
            entry.config.custom_days = Some(days);
        }
    }

    /// Returns `false` when the engine is not registered.
    pub fn set_engine_time_range(
        &mut self,
        name: &str,
        range: TimeRange,
        custom_days: Option<i64>,
    ) -> bool {
        match self.engine_mut(name) {
            Some(config) => {
                config.time_range = range;
                if custom_days.is_some() {
                    config.custom_days = custom_days;
                }
                true
            }
            None => false,
        }
    }

    /// Store API keys and enable the engines they belong to. Blank keys are
    /// ignored.
    pub fn apply_credentials<I, K, V>(&mut self, credentials: I) -> Vec<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut enabled = Vec::new();
        for (engine, key) in credentials {
            let key = key.into();
            if key.trim().is_empty() {
                continue;
            }
            let engine = engine.as_ref();
            self.set_engine_config(engine, EngineUpdate::enable().api_key(key));
            enabled.push(engine.to_string());
        }
        enabled
    }

    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let enabled_engines = self.enabled_sources();

        if enabled_engines.is_empty() {
            errors.push("No search engines enabled".to_string());
        }

        for (name, config) in self.engines().filter(|(_, c)| c.enabled) {
            if let Some(var) = credential_env_var(name) {
                if !config.has_api_key() {
                    warnings.push(format!("{name} is enabled but has no API key (set {var})"));
                }
            }
            if name == GOOGLE_SEARCH && self.google_search_engine_id.is_none() {
                warnings.push(format!(
                    "{name} needs a search engine id (set {GOOGLE_ENGINE_ID_ENV_VAR})"
                ));
            }
            if config.max_articles == 0 {
                warnings.push(format!("{name} has max_articles = 0 and will return nothing"));
            }
            if !valid_threshold(config.similarity_threshold) {
                warnings.push(format!(
                    "{name} similarity_threshold {} is outside (0, 1]",
                    config.similarity_threshold
                ));
            }
        }

        if !valid_threshold(self.global_similarity_threshold) {
            warnings.push(format!(
                "global_similarity_threshold {} is outside (0, 1]",
                self.global_similarity_threshold
            ));
        }
        if self.engines().any(|(name, c)| name == RSS_FEEDS && c.enabled) && self.rss_feeds.is_empty()
        {
            warnings.push(format!("{RSS_FEEDS} is enabled but no feeds are configured"));
        }

        ValidationReport {
            valid: errors.is_empty(),
            errors,
            warnings,
            engine_count: enabled_engines.len(),
            enabled_engines,
        }
    }
}

fn valid_threshold(threshold: f64) -> bool {
    threshold > 0.0 && threshold <= 1.0
}

/// Outcome of [`SearchConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub enabled_engines: Vec<String>,
    pub engine_count: usize,
}

// ============================================================================
// ConfigStore
// ============================================================================

/// YAML persistence for [`SearchConfig`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at `<config dir>/newshound/config.yaml`.
    pub fn new_default() -> Self {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join("newshound").join("config.yaml"),
        }
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<SearchConfig, ConfigStoreError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| ConfigStoreError::Io(e.to_string()))?;
        serde_yaml::from_str(&content).map_err(|e| ConfigStoreError::Deserialize(e.to_string()))
    }

    /// Load the stored config, or the defaults when no file exists yet.
    pub fn load_or_default(&self) -> Result<SearchConfig, ConfigStoreError> {
        if self.exists() {
            self.load()
        } else {
            Ok(SearchConfig::default())
        }
    }

    pub fn save(&self, config: &SearchConfig) -> Result<(), ConfigStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigStoreError::Io(e.to_string()))?;
        }
        let content =
            serde_yaml::to_string(config).map_err(|e| ConfigStoreError::Serialize(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| ConfigStoreError::Io(e.to_string()))?;
        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new_default()
    }
}

/// Errors from config storage operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigStoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid config file: {0}")]
    Deserialize(String),
}

// ============================================================================
// Tests
// ============================================================================
