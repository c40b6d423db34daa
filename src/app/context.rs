use std::sync::Arc;

use crate::app::error::Result;
use crate::domain::Item;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::{fetch_entries, Fetcher};
use crate::normalizer::Normalizer;
use crate::store::{JsonStore, StateStore};

pub struct AppContext {
    pub store: Arc<dyn StateStore + Send + Sync>,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub normalizer: Normalizer,
    pub feed_url: String,
}

impl AppContext {
    /// Production wiring: HTTP fetcher and the seen-state file in the cache directory.
    pub fn new(feed_url: impl Into<String>) -> Result<Self> {
        let store = JsonStore::at_default_location()?;
        let fetcher = HttpFetcher::new()?;

        Ok(Self::with_parts(
            feed_url,
            Arc::new(fetcher),
            Arc::new(store),
        ))
    }

    pub fn with_parts(
        feed_url: impl Into<String>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        store: Arc<dyn StateStore + Send + Sync>,
    ) -> Self {
        Self {
            store,
            fetcher,
            normalizer: Normalizer::new(),
            feed_url: feed_url.into(),
        }
    }

    /// Fetch the feed and normalize it, newest first. Seen flags are not applied.
    pub async fn fetch_items(&self) -> Result<Vec<Item>> {
        let entries = fetch_entries(self.fetcher.as_ref(), &self.feed_url).await?;
        Ok(self.normalizer.normalize(entries))
    }
}
