//! Concurrent collection across many news sources.
//!
//! This module provides:
//! - `Collector`: fans a query out to the configured sources and merges the results
//! - `SearchResult`: deduplicated articles plus per-source progress
//! - `CollectOptions`: per-call source subset, threshold override and progress callback
//!
//! # Example
//!
//! ```ignore
//! use newshound_core::{CollectOptions, Collector, SearchConfig};
//!
//! let collector = Collector::new(SearchConfig::default());
//! let result = collector
//!     .collect_with("llm agents", CollectOptions::new().progress(|msg| eprintln!("{msg}")))
//!     .await;
//! println!("{} unique of {}", result.unique_articles, result.total_articles);
//! ```

mod engine;
mod types;

pub use engine::{
    collect_with_engines, collect_with_single_engine, CollectOptions, Collector, EngineInfo,
    ProgressCallback,
};
pub use types::{SearchResult, SourceProgress, SourceStatus};
