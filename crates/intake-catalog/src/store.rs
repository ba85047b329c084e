//! Catalog store trait and in-memory implementation

use crate::item::CatalogItem;
use async_trait::async_trait;
use intake_core::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read access to the catalog of offerable items
///
/// Stores are read-mostly: both operations are side-effect free and preserve
/// listing order. A store fails only when its underlying data source cannot
/// be read (`CatalogUnavailable`).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All items, in listing order
    async fn list_all(&self) -> Result<Vec<CatalogItem>>;

    /// Items satisfying `predicate`, in listing order
    async fn filter(
        &self,
        predicate: &(dyn for<'a> Fn(&'a CatalogItem) -> bool + Send + Sync),
    ) -> Result<Vec<CatalogItem>>;
}

/// Thread-safe in-memory catalog
///
/// Items are treated as immutable once listed; the set may be replaced
/// wholesale via [`replace_all`](Self::replace_all) when the catalog is
/// refreshable. Cloning shares the underlying storage.
#[derive(Debug)]
pub struct InMemoryCatalog {
    items: Arc<RwLock<Vec<CatalogItem>>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a catalog pre-loaded with `items`
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Load a catalog from a JSON file containing an array of items
    ///
    /// Read or parse failures surface as `CatalogUnavailable` with the
    /// underlying cause.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::catalog_unavailable(format!("{}: {e}", path.display())))?;
        let items: Vec<CatalogItem> = serde_json::from_str(&raw)
            .map_err(|e| Error::catalog_unavailable(format!("{}: {e}", path.display())))?;

        tracing::info!(count = items.len(), path = %path.display(), "Loaded catalog");
        Ok(Self::with_items(items))
    }

    /// Append one item to the catalog
    pub async fn add(&self, item: CatalogItem) {
        let mut items = self.items.write().await;
        items.push(item);
    }

    /// Replace the whole listing (catalog refresh)
    pub async fn replace_all(&self, new_items: Vec<CatalogItem>) {
        let mut items = self.items.write().await;
        *items = new_items;
    }

    /// Number of listed items
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the catalog has no items
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryCatalog {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn list_all(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.items.read().await.clone())
    }

    async fn filter(
        &self,
        predicate: &(dyn for<'a> Fn(&'a CatalogItem) -> bool + Send + Sync),
    ) -> Result<Vec<CatalogItem>> {
        let items = self.items.read().await;
        Ok(items.iter().filter(|item| predicate(item)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Condition;

    fn sample_items() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("honda-civic", "sedan", Condition::New, 25_000),
            CatalogItem::new("toyota-rav4", "SUV", Condition::Used, 28_000),
            CatalogItem::new("ford-f150", "truck", Condition::New, 45_000),
        ]
    }

    #[tokio::test]
    async fn test_list_all_preserves_order() {
        let catalog = InMemoryCatalog::with_items(sample_items());
        let items = catalog.list_all().await.unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["honda-civic", "toyota-rav4", "ford-f150"]);
    }

    #[tokio::test]
    async fn test_filter_by_predicate() {
        let catalog = InMemoryCatalog::with_items(sample_items());
        let new_items = catalog
            .filter(&|item| item.condition == Condition::New)
            .await
            .unwrap();
        assert_eq!(new_items.len(), 2);
        assert!(new_items.iter().all(|i| i.condition == Condition::New));
    }

    #[tokio::test]
    async fn test_filter_has_no_side_effects() {
        let catalog = InMemoryCatalog::with_items(sample_items());
        let _ = catalog.filter(&|_| false).await.unwrap();
        assert_eq!(catalog.len().await, 3);
    }

    #[tokio::test]
    async fn test_replace_all() {
        let catalog = InMemoryCatalog::with_items(sample_items());
        catalog
            .replace_all(vec![CatalogItem::new(
                "only-one",
                "sedan",
                Condition::Used,
                1,
            )])
            .await;
        assert_eq!(catalog.len().await, 1);
    }

    #[tokio::test]
    async fn test_load_json_missing_file_is_catalog_unavailable() {
        let err = InMemoryCatalog::load_json("/nonexistent/catalog.json")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            intake_core::Error::CatalogUnavailable { .. }
        ));
    }

    #[tokio::test]
    async fn test_load_json_round_trip() {
        let dir = std::env::temp_dir().join("intake-catalog-test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("catalog.json");
        tokio::fs::write(&path, serde_json::to_string(&sample_items()).unwrap())
            .await
            .unwrap();

        let catalog = InMemoryCatalog::load_json(&path).await.unwrap();
        assert_eq!(catalog.len().await, 3);
    }
}
