//! Product Module
//!
//! The product record, its validated identifier, and the cache key derived
//! from it.

mod id;
mod record;

pub use id::{validate_product_id, ProductId};
pub use record::Product;

// == Public Constants ==
/// Prefix of every product cache key
pub const CACHE_KEY_PREFIX: &str = "product_";

/// Cache key for a product: `product_<id>`, with the id used verbatim.
pub fn cache_key(id: &ProductId) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, id.as_str())
}
