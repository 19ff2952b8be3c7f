//! Scrape command implementation.

use super::{describe, open_service};
use crate::config::{Config, OutputFormat};
use crate::format::Formatter;
use crate::models::{Category, Product};
use crate::service::{PriceWatch, ScrapeRequest};
use crate::store::ProductStore;
use anyhow::{Context, Result};
use tracing::info;

/// Scrapes all retailers for a category and saves the results.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the scrape against the configured store and returns formatted output.
    pub async fn execute(&self, category: Category, query: Option<&str>) -> Result<String> {
        let service = open_service(&self.config).await?;
        self.execute_with_service(&service, category, query).await
    }

    /// Runs the scrape with a provided service (for testing).
    pub async fn execute_with_service<S: ProductStore>(
        &self,
        service: &PriceWatch<S>,
        category: Category,
        query: Option<&str>,
    ) -> Result<String> {
        info!("Scraping {} ({})", category, query.unwrap_or(category.default_query()));

        let request = ScrapeRequest { category, query: query.map(str::to_string) };
        let response = service.scrape(request).await.map_err(describe)?;

        if self.config.format == OutputFormat::Json {
            return serde_json::to_string_pretty(&response).context("Failed to serialize response");
        }

        let products: Vec<Product> = response.products.into_iter().map(|saved| saved.product).collect();
        Ok(Formatter::new(self.config.format).format_products(&products))
    }
}
