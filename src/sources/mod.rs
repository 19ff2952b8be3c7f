//! Retailer source adapters.
//!
//! Every adapter follows the same contract: build a search URL, fetch it once,
//! extract up to `max_records` valid listings, and serve the retailer's mock
//! catalog if anything goes wrong. `Source::scrape` therefore never fails.

pub mod amazon;
pub mod bestbuy;
pub mod chain;
pub mod extract;
pub mod newegg;
pub mod selectors;

pub use amazon::AmazonParser;
pub use bestbuy::BestBuyParser;
pub use chain::{ContainerStrategy, SelectorChain};
pub use newegg::NeweggParser;

use crate::client::PageFetcher;
use crate::error::ExtractError;
use crate::mock;
use crate::models::{Category, Retailer, ScrapedRecord};
use async_trait::async_trait;
use chrono::Utc;
use scraper::{ElementRef, Html};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Default cap on records kept per retailer.
pub const DEFAULT_MAX_RECORDS: usize = 10;

/// A retailer that can be searched. Implementations must not fail.
#[async_trait]
pub trait Source: Send + Sync {
    fn retailer(&self) -> Retailer;

    /// Returns live records, or the mock catalog when live data is unusable.
    async fn scrape(&self, query: &str, category: Category) -> Vec<ScrapedRecord>;
}

/// Retailer-specific page knowledge: URL shape, containers, field extraction.
pub trait PageParser: Send + Sync {
    fn retailer(&self) -> Retailer;

    /// Search URL for a query against `base` (scheme and host, no trailing slash).
    fn search_url(&self, base: &str, query: &str) -> String;

    /// Container strategies for result pages.
    fn chain(&self) -> &SelectorChain;

    /// Extracts one listing. `Ok(None)` means the container lacks a name or price.
    fn extract(
        &self,
        container: ElementRef,
        category: Category,
        origin: &str,
    ) -> Result<Option<ScrapedRecord>, ExtractError>;
}

/// Generic adapter pairing a page parser with a fetcher.
pub struct Adapter<P> {
    parser: P,
    fetcher: Arc<dyn PageFetcher>,
    base_url: Option<String>,
    max_records: usize,
}

pub type AmazonSource = Adapter<AmazonParser>;
pub type BestBuySource = Adapter<BestBuyParser>;
pub type NeweggSource = Adapter<NeweggParser>;

impl<P: PageParser> Adapter<P> {
    pub fn new(parser: P, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { parser, fetcher, base_url: None, max_records: DEFAULT_MAX_RECORDS }
    }

    /// Overrides the host searched (the retailer origin by default).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Search URL this adapter requests for a query.
    pub fn search_url(&self, query: &str) -> String {
        let base = self.base_url.as_deref().unwrap_or_else(|| self.parser.retailer().origin());
        self.parser.search_url(base, query)
    }

    /// Extracts valid records from a results page, in document order.
    pub fn parse(&self, html: &str, category: Category) -> Vec<ScrapedRecord> {
        let retailer = self.parser.retailer();
        let document = Html::parse_document(html);

        let Some((strategy, containers)) = self.parser.chain().first_match(&document) else {
            debug!("{}: no product containers found", retailer.display_name());
            return Vec::new();
        };
        debug!("{}: {} containers via {}", retailer.display_name(), containers.len(), strategy);

        let scraped_at = Utc::now();
        let mut records = Vec::new();

        for container in containers {
            if records.len() >= self.max_records {
                break;
            }

            match self.parser.extract(container, category, retailer.origin()) {
                Ok(Some(mut record)) if record.is_valid() => {
                    record.stamp(scraped_at);
                    trace!("Extracted {} at ${:.2}", record.name, record.price);
                    records.push(record);
                }
                Ok(_) => trace!("Skipping container without a usable name or price"),
                Err(e) => warn!("{}: skipping listing: {}", retailer.display_name(), e),
            }
        }

        records
    }
}

#[async_trait]
impl<P: PageParser> Source for Adapter<P> {
    fn retailer(&self) -> Retailer {
        self.parser.retailer()
    }

    async fn scrape(&self, query: &str, category: Category) -> Vec<ScrapedRecord> {
        let retailer = self.parser.retailer();
        let url = self.search_url(query);
        info!("Scraping {} for {:?} ({})", retailer.display_name(), query, category);

        let html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("{} fetch failed, using mock catalog: {}", retailer.display_name(), e);
                return mock::catalog(retailer, category);
            }
        };

        let records = self.parse(&html, category);
        if records.is_empty() {
            warn!("{} returned no valid products, using mock catalog", retailer.display_name());
            return mock::catalog(retailer, category);
        }

        info!("Scraped {} products from {}", records.len(), retailer.display_name());
        records
    }
}

/// All three retailer adapters sharing one fetcher.
pub fn all(fetcher: Arc<dyn PageFetcher>, max_records: usize) -> Vec<Arc<dyn Source>> {
    vec![
        Arc::new(AmazonSource::new(AmazonParser::new(), fetcher.clone()).with_max_records(max_records)),
        Arc::new(BestBuySource::new(BestBuyParser::new(), fetcher.clone()).with_max_records(max_records)),
        Arc::new(NeweggSource::new(NeweggParser::new(), fetcher).with_max_records(max_records)),
    ]
}
