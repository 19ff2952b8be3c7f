use super::{Catalog, ProductStore};
use crate::error::StoreError;
use crate::models::{Category, NewProduct, PriceHistoryPoint, PriceQuote, Product};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Store persisted as a single JSON snapshot.
///
/// The snapshot is loaded at open and rewritten after every mutation while
/// the write lock is held, so concurrent writers never interleave a file.
/// A mutation only becomes visible once its snapshot is on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    catalog: RwLock<Catalog>,
}

impl JsonFileStore {
    /// Opens a store, starting empty when the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let catalog = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Catalog::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Catalog::default(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened store {} with {} products", path.display(), catalog.len());

        Ok(Self { path, catalog: RwLock::new(catalog) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, catalog: &Catalog) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(catalog)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!("Wrote {} products to {}", catalog.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl ProductStore for JsonFileStore {
    async fn create_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut catalog = self.catalog.write().await;
        let mut next = catalog.clone();
        let created = next.create(product);
        self.persist(&next).await?;
        *catalog = next;
        Ok(created)
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
        let mut catalog = self.catalog.write().await;
        let mut next = catalog.clone();
        let updated = next.record_price(id, quote, point)?;
        self.persist(&next).await?;
        *catalog = next;
        Ok(updated)
    }

    async fn list_by_category(
        &self,
        category: Option<Category>,
        limit: usize,
    ) -> Result<Vec<Product>, StoreError> {
        Ok(self.catalog.read().await.list(category, limit))
    }
}
