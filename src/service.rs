//! Scrape-and-save entry point plus the read endpoints.

use crate::config::SavePolicy;
use crate::error::{ServiceError, StoreError};
use crate::models::{Category, Product, ScrapedRecord};
use crate::normalize::normalize;
use crate::orchestrator::{Orchestrator, ScrapeBatch};
use crate::store::ProductStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Maximum products returned by a listing.
pub const LIST_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// A saved product with the price just scraped for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub current_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub success: bool,
    pub count: usize,
    pub products: Vec<SavedProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub products: Vec<Product>,
}

/// Orchestrator, store and save policy wired together.
pub struct PriceWatch<S> {
    orchestrator: Orchestrator,
    store: S,
    policy: SavePolicy,
}

impl<S: ProductStore> PriceWatch<S> {
    pub fn new(orchestrator: Orchestrator, store: S, policy: SavePolicy) -> Self {
        Self { orchestrator, store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> SavePolicy {
        self.policy
    }

    /// Scrapes every source, then saves the batch one record at a time.
    pub async fn scrape(&self, request: ScrapeRequest) -> Result<ScrapeResponse, ServiceError> {
        let query = request.query.unwrap_or_default();
        let batch = self.orchestrator.run(request.category, &query).await?;

        let products = self.save_batch(&batch).await.map_err(ServiceError::Save)?;

        info!("Saved {} products", products.len());
        Ok(ScrapeResponse { success: true, count: products.len(), products })
    }

    /// Saves records in Best Buy, Amazon, Newegg order, awaiting each write.
    ///
    /// Records that fail normalization are skipped.
    pub async fn save_batch(&self, batch: &ScrapeBatch) -> Result<Vec<SavedProduct>, StoreError> {
        let mut saved = Vec::with_capacity(batch.total());

        for record in batch.in_save_order() {
            if let Some(product) = self.save_record(record.clone()).await? {
                saved.push(product);
            }
        }

        Ok(saved)
    }

    async fn save_record(&self, record: ScrapedRecord) -> Result<Option<SavedProduct>, StoreError> {
        let label = format!("{} (${:.2})", record.name, record.price);
        let new = match normalize(record) {
            Ok(new) => new,
            Err(e) => {
                warn!("Dropping {}: {}", label, e);
                return Ok(None);
            }
        };
        let current_price = new.quote.price;

        if self.policy == SavePolicy::Upsert {
            if let Some(existing) = self.store.find_by_name_brand(new.category, &new.name, &new.brand).await? {
                debug!("Updating {} with {} quote", existing.id, new.quote.retailer);
                let product = self.store.record_price(existing.id, new.quote, new.history).await?;
                return Ok(Some(SavedProduct { product, current_price }));
            }
        }

        let retailer = new.quote.retailer;
        let product = self.store.create_product(new).await?;
        debug!("Saved {} from {}", label, retailer);
        Ok(Some(SavedProduct { product, current_price }))
    }

    /// Newest products first, at most [`LIST_LIMIT`].
    pub async fn list(&self, request: ListRequest) -> Result<ListResponse, ServiceError> {
        let products =
            self.store.list_by_category(request.category, LIST_LIMIT).await.map_err(ServiceError::Read)?;
        Ok(ListResponse { products })
    }

    /// Product detail; an unknown id is `Ok(None)`.
    pub async fn product(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
        self.store.find_by_id(id).await.map_err(ServiceError::Read)
    }
}
