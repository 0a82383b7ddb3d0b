//! MySQL product store.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;

use crate::error::StoreFailure;
use crate::product::{Product, ProductId};
use crate::store::ProductStore;

// DECIMAL prices come back as their exact text; in_stock keeps its integer value
const SELECT_PRODUCT: &str = "SELECT CAST(id AS SIGNED) AS id, product_name, product_desc, \
     CAST(price AS CHAR) AS price, CAST(in_stock AS SIGNED) AS in_stock \
     FROM products WHERE id = ? LIMIT 1";

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// [`ProductStore`] reading the `products` table through a sqlx pool.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Builds a pool that opens connections on first use.
    pub fn connect_lazy(options: MySqlConnectOptions, max_connections: u32) -> Self {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy_with(options);
        Self::new(pool)
    }
}

/// One `products` row as selected by [`SELECT_PRODUCT`].
#[derive(Debug, Clone, PartialEq)]
struct ProductRow {
    id: i64,
    product_name: Option<String>,
    product_desc: Option<String>,
    price: Option<String>,
    in_stock: Option<i64>,
}

impl ProductRow {
    fn decode(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            product_name: row.try_get("product_name")?,
            product_desc: row.try_get("product_desc")?,
            price: row.try_get("price")?,
            in_stock: row.try_get("in_stock")?,
        })
    }

    /// NULL columns become JSON `null`; the record keeps every column.
    fn into_product(self) -> Result<Product, StoreFailure> {
        let id = u64::try_from(self.id).map_err(|_| {
            StoreFailure::Backend(format!("negative product id {} in table", self.id))
        })?;

        Ok(Product::new(id)
            .with_field("product_name", json!(self.product_name))
            .with_field("product_desc", json!(self.product_desc))
            .with_field("price", json!(self.price))
            .with_field("in_stock", json!(self.in_stock)))
    }
}

#[async_trait]
impl ProductStore for MySqlStore {
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreFailure> {
        let row = sqlx::query(SELECT_PRODUCT)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => ProductRow::decode(&row)?.into_product().map(Some),
            None => Ok(None),
        }
    }

    fn backend_name(&self) -> &'static str {
        "mysql"
    }
}
