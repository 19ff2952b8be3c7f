//! Concurrent fan-out over all source adapters.

use crate::client::{FetchClient, OfflineFetcher, PageFetcher};
use crate::config::Config;
use crate::error::{FetchError, OrchestratorError};
use crate::models::{Category, Retailer, ScrapedRecord};
use crate::sources::{self, Source};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Records grouped by the retailer that produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeBatch {
    by_source: BTreeMap<Retailer, Vec<ScrapedRecord>>,
}

impl ScrapeBatch {
    pub fn insert(&mut self, retailer: Retailer, records: Vec<ScrapedRecord>) {
        self.by_source.insert(retailer, records);
    }

    pub fn get(&self, retailer: Retailer) -> Option<&[ScrapedRecord]> {
        self.by_source.get(&retailer).map(Vec::as_slice)
    }

    /// Total records across all retailers.
    pub fn total(&self) -> usize {
        self.by_source.values().map(Vec::len).sum()
    }

    /// Records in save order: Best Buy, Amazon, Newegg.
    pub fn in_save_order(&self) -> impl Iterator<Item = &ScrapedRecord> {
        Retailer::save_order()
            .iter()
            .filter_map(|retailer| self.by_source.get(retailer))
            .flatten()
    }

    pub fn retailers(&self) -> impl Iterator<Item = Retailer> + '_ {
        self.by_source.keys().copied()
    }
}

/// Runs every source concurrently and waits for all of them.
pub struct Orchestrator {
    sources: Vec<Arc<dyn Source>>,
}

impl Orchestrator {
    pub fn new(sources: Vec<Arc<dyn Source>>) -> Self {
        Self { sources }
    }

    /// Builds the three retailer adapters from configuration.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let fetcher: Arc<dyn PageFetcher> = if config.offline {
            debug!("Offline mode, all sources will serve mock catalogs");
            Arc::new(OfflineFetcher)
        } else {
            Arc::new(FetchClient::new(config)?)
        };

        Ok(Self::new(sources::all(fetcher, config.max_per_source)))
    }

    pub fn retailers(&self) -> Vec<Retailer> {
        self.sources.iter().map(|s| s.retailer()).collect()
    }

    /// Scrapes all sources for a category. An empty query uses the category default.
    pub async fn run(&self, category: Category, query: &str) -> Result<ScrapeBatch, OrchestratorError> {
        let query = match query.trim() {
            "" => category.default_query().to_string(),
            q => q.to_string(),
        };
        info!("Scraping {} sources for {:?} ({})", self.sources.len(), query, category);

        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                let query = query.clone();
                let retailer = source.retailer();
                let handle = tokio::spawn(async move { source.scrape(&query, category).await });
                (retailer, handle)
            })
            .collect();

        let mut batch = ScrapeBatch::default();
        for (retailer, handle) in handles {
            let mut records = handle
                .await
                .map_err(|e| OrchestratorError::Join { retailer, reason: e.to_string() })?;

            for record in &mut records {
                record.source = Some(retailer);
            }
            debug!("{} returned {} records", retailer.display_name(), records.len());
            batch.insert(retailer, records);
        }

        info!("Scraped {} records in total", batch.total());
        Ok(batch)
    }
}
