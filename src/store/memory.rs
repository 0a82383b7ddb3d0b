//! In-memory product store.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;

use crate::error::StoreFailure;
use crate::product::{Product, ProductId};
use crate::store::ProductStore;

/// Fixed product catalogue held in memory.
///
/// Seeded once at construction; cloning shares the same catalogue.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    products: Arc<HashMap<u64, Product>>,
}

impl MemoryStore {
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            products: Arc::new(products),
        }
    }

    /// Loads a catalogue from a JSON array of product objects.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading products file {}", path.display()))?;
        let products: Vec<Product> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing products file {}", path.display()))?;
        Ok(Self::new(products))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreFailure> {
        // Ids beyond u64 cannot exist in the catalogue
        Ok(id.as_u64().and_then(|n| self.products.get(&n).cloned()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn id(raw: &str) -> ProductId {
        ProductId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_by_id() {
        let store = MemoryStore::new([
            Product::new(1).with_field("product_name", "Desk"),
            Product::new(2),
        ]);

        let found = store.get_by_id(&id("1")).await.unwrap().unwrap();
        assert_eq!(found.fields["product_name"], "Desk");
        assert!(store.get_by_id(&id("3")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_leading_zeros_match_numerically() {
        let store = MemoryStore::new([Product::new(7)]);
        assert!(store.get_by_id(&id("007")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_overflowing_id_is_absent() {
        let store = MemoryStore::new([Product::new(1)]);
        let result = store.get_by_id(&id("123456789012345678901234567890")).await;
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("products-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"[{{"id":1,"product_name":"Chair"}},{{"id":2}}]"#).unwrap();

        let store = MemoryStore::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = MemoryStore::from_json_file(Path::new("/nonexistent/products.json")).unwrap_err();
        assert!(err.to_string().contains("reading products file"));
    }
}
