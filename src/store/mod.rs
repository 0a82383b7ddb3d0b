//! Store Module
//!
//! The read-only product store that backs the cache, with an in-memory
//! implementation and a MySQL one.

mod memory;
mod mysql;

use async_trait::async_trait;

use crate::error::StoreFailure;
use crate::product::{Product, ProductId};

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Source of truth for product records.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Returns the product whose id equals `id`, or `None` when there is none.
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreFailure>;

    fn backend_name(&self) -> &'static str;
}
