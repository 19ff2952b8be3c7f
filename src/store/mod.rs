//! Persistence gateway for products, quotes and price history.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::models::{Category, NewProduct, PriceHistoryPoint, PriceQuote, Product};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Maximum history points returned with a single product.
pub const HISTORY_LIMIT: usize = 30;

/// Storage backend used by the save path and read endpoints.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persists a new product with its initial quote and history point.
    async fn create_product(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Product with prices cheapest first and the newest history points.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError>;

    /// Most recent product with this category, name and brand.
    async fn find_by_name_brand(
        &self,
        category: Category,
        name: &str,
        brand: &str,
    ) -> Result<Option<Product>, StoreError>;

    /// Replaces the retailer's quote and appends a history point.
    async fn record_price(
        &self,
        id: Uuid,
        quote: PriceQuote,
        point: PriceHistoryPoint,
    ) -> Result<Product, StoreError>;

    /// Newest products first, optionally filtered by category.
    async fn list_by_category(
        &self,
        category: Option<Category>,
        limit: usize,
    ) -> Result<Vec<Product>, StoreError>;
}

/// In-memory product table shared by the store implementations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Catalog {
    #[serde(default)]
    products: Vec<Product>,
}

impl Catalog {
    pub(crate) fn len(&self) -> usize {
        self.products.len()
    }

    pub(crate) fn create(&mut self, new: NewProduct) -> Product {
        let product = Product::from_new(new, Utc::now());
        self.products.push(product.clone());
        product
    }

    pub(crate) fn find_by_id(&self, id: Uuid) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned().map(detail_view)
    }

    pub(crate) fn find_by_name_brand(&self, category: Category, name: &str, brand: &str) -> Option<Product> {
        self.products
            .iter()
            .rev()
            .find(|p| {
                p.category == category
                    && p.name.trim().eq_ignore_ascii_case(name.trim())
                    && p.brand.trim().eq_ignore_ascii_case(brand.trim())
            })
            .cloned()
    }

    pub(crate) fn record_price(
        &mut self,
        id: Uuid,
        quote: PriceQuote,
        point: PriceHistoryPoint,
    ) -> Result<Product, StoreError> {
        let product = self.products.iter_mut().find(|p| p.id == id).ok_or(StoreError::NotFound(id))?;

        match product.prices.iter_mut().find(|q| q.retailer == quote.retailer) {
            Some(existing) => *existing = quote,
            None => product.prices.push(quote),
        }
        product.price_history.push(point);

        Ok(product.clone())
    }

    pub(crate) fn list(&self, category: Option<Category>, limit: usize) -> Vec<Product> {
        // Reverse first so equal timestamps keep the later insert ahead.
        let mut products: Vec<Product> = self
            .products
            .iter()
            .rev()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products.truncate(limit);
        products
    }
}

/// Prices ascending, at most [`HISTORY_LIMIT`] history points newest first.
fn detail_view(mut product: Product) -> Product {
    product.prices.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));
    product.price_history.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    product.price_history.truncate(HISTORY_LIMIT);
    product
}
