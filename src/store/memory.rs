use super::{Catalog, ProductStore};
use crate::error::StoreError;
use crate::models::{Category, NewProduct, PriceHistoryPoint, PriceQuote, Product};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Volatile store, used by tests and one-off runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    catalog: RwLock<Catalog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.catalog.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn create_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        Ok(self.catalog.write().await.create(product))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        Ok(self.catalog.read().await.find_by_id(id))
    }

    async fn find_by_name_brand(
        &self,
        category: Category,
        name: &str,
        brand: &str,
    ) -> Result<Option<Product>, StoreError> {
        Ok(self.catalog.read().await.find_by_name_brand(category, name, brand))
    }

    async fn record_price(
        &self,
        id: Uuid,
        quote: PriceQuote,
        point: PriceHistoryPoint,
    ) -> Result<Product, StoreError> {
        self.catalog.write().await.record_price(id, quote, point)
    }

    async fn list_by_category(
        &self,
        category: Option<Category>,
        limit: usize,
    ) -> Result<Vec<Product>, StoreError> {
        Ok(self.catalog.read().await.list(category, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Retailer;
    use crate::store::fixtures::new_product;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        let created = store
            .create_product(new_product("LG UltraGear 27", Category::Monitor, Retailer::BestBuy, 299.99))
            .await
            .unwrap();

        let found = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.name, "LG UltraGear 27");
        assert_eq!(store.len().await, 1);

        assert!(store.find_by_id(uuid::Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_creates() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create_product(new_product(&format!("Headset {i}"), Category::Headphone, Retailer::Newegg, 50.0))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.len().await, 10);
    }
}
