//! Product record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product as read from the store.
///
/// Only `id` is interpreted; every other field is carried through untouched,
/// so a cached copy serializes back to the same document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Product {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    /// Adds an opaque field, replacing any previous value under `name`.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}
