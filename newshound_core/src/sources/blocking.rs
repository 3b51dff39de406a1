//! Adapter for sources whose search call blocks the calling thread.

use crate::article::Article;
use crate::error::SourceError;
use crate::{NewsSource, TimeFiltering};
use async_trait::async_trait;
use std::sync::Arc;

/// A source with a synchronous search call (blocking HTTP client, local
/// index, subprocess...).
pub trait BlockingNewsSource: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn time_filtering(&self) -> TimeFiltering {
        TimeFiltering::ClientSide
    }

    fn search_blocking(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError>;
}

/// Runs a [`BlockingNewsSource`] on tokio's blocking pool so it never stalls
/// the runtime threads driving other sources.
pub struct Blocking<S> {
    inner: Arc<S>,
}

impl<S: BlockingNewsSource> Blocking<S> {
    pub fn new(source: S) -> Self {
        Self {
            inner: Arc::new(source),
        }
    }

    pub fn into_source(self) -> Arc<dyn NewsSource> {
        Arc::new(self)
    }
}

#[async_trait]
impl<S: BlockingNewsSource> NewsSource for Blocking<S> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn description(&self) -> &'static str {
        self.inner.description()
    }

    fn time_filtering(&self) -> TimeFiltering {
        self.inner.time_filtering()
    }

    async fn search(&self, query: &str, days_back: i64) -> Result<Vec<Article>, SourceError> {
        let inner = Arc::clone(&self.inner);
        let query = query.to_string();
        tracing::trace!(target: "newshound::blocking", source = inner.name(), "offloading search");
        tokio::task::spawn_blocking(move || inner.search_blocking(&query, days_back))
            .await
            .map_err(|e| SourceError::Internal(format!("blocking search task failed: {e}")))?
    }
}
