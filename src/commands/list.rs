//! List command implementation.

use super::{describe, open_service};
use crate::config::{Config, OutputFormat};
use crate::format::Formatter;
use crate::models::Category;
use crate::service::{ListRequest, PriceWatch};
use crate::store::ProductStore;
use anyhow::{Context, Result};

/// Lists the most recently saved products.
pub struct ListCommand {
    config: Config,
}

impl ListCommand {
    /// Creates a new list command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self, category: Option<Category>) -> Result<String> {
        let service = open_service(&self.config).await?;
        self.execute_with_service(&service, category).await
    }

    /// Lists products from a provided service (for testing).
    pub async fn execute_with_service<S: ProductStore>(
        &self,
        service: &PriceWatch<S>,
        category: Option<Category>,
    ) -> Result<String> {
        let response = service.list(ListRequest { category }).await.map_err(describe)?;

        if self.config.format == OutputFormat::Json {
            return serde_json::to_string_pretty(&response).context("Failed to serialize response");
        }

        Ok(Formatter::new(self.config.format).format_products(&response.products))
    }
}
