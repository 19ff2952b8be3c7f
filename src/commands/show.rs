//! Product detail command implementation.

use super::{describe, open_service};
use crate::config::Config;
use crate::format::Formatter;
use crate::service::PriceWatch;
use crate::store::ProductStore;
use anyhow::Result;
use tracing::info;
use uuid::Uuid;

/// Shows one product with its quotes and recent price history.
pub struct ShowCommand {
    config: Config,
}

impl ShowCommand {
    /// Creates a new show command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self, id: &str) -> Result<String> {
        let service = open_service(&self.config).await?;
        self.execute_with_service(&service, id).await
    }

    /// Looks up a product in a provided service (for testing).
    pub async fn execute_with_service<S: ProductStore>(&self, service: &PriceWatch<S>, id: &str) -> Result<String> {
        let id = id.trim();
        let Ok(uuid) = Uuid::parse_str(id) else {
            anyhow::bail!("Invalid product id: '{}'. Expected a UUID.", id);
        };

        info!("Looking up product: {}", uuid);

        match service.product(uuid).await.map_err(describe)? {
            Some(product) => Ok(Formatter::new(self.config.format).format_product(&product)),
            None => anyhow::bail!("Product not found: {}", uuid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputFormat, SavePolicy};
    use crate::models::Category;
    use crate::orchestrator::Orchestrator;
    use crate::service::ScrapeRequest;
    use crate::store::MemoryStore;

    fn offline_service() -> PriceWatch<MemoryStore> {
        let config = Config { offline: true, ..Config::default() };
        PriceWatch::new(Orchestrator::from_config(&config).unwrap(), MemoryStore::new(), SavePolicy::Create)
    }

    #[tokio::test]
    async fn test_show_command() {
        let service = offline_service();
        let response = service.scrape(ScrapeRequest { category: Category::Headphone, query: None }).await.unwrap();
        let id = response.products[0].product.id;

        let output = ShowCommand::new(Config::default())
            .execute_with_service(&service, &id.to_string())
            .await
            .unwrap();

        assert!(output.contains(&id.to_string()));
        assert!(output.contains("Category: HEADPHONE"));
        assert!(output.contains("Prices:"));
        assert!(output.contains("Best Buy"));
    }

    #[tokio::test]
    async fn test_show_command_markdown() {
        let service = offline_service();
        let response = service.scrape(ScrapeRequest { category: Category::Monitor, query: None }).await.unwrap();
        let id = response.products[0].product.id;

        let config = Config { format: OutputFormat::Markdown, ..Config::default() };
        let output = ShowCommand::new(config).execute_with_service(&service, &id.to_string()).await.unwrap();
        assert!(output.starts_with("## "));
    }

    #[tokio::test]
    async fn test_show_command_invalid_id() {
        let service = offline_service();
        let err = ShowCommand::new(Config::default()).execute_with_service(&service, "B08N5WRWNW").await.unwrap_err();
        assert!(err.to_string().contains("Invalid product id"));
    }

    #[tokio::test]
    async fn test_show_command_not_found() {
        let service = offline_service();
        let id = Uuid::new_v4().to_string();
        let err = ShowCommand::new(Config::default()).execute_with_service(&service, &id).await.unwrap_err();
        assert!(err.to_string().contains("Product not found"));
    }
}
