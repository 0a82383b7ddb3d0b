//! Product identifier validation.

use std::fmt;

use crate::error::LookupError;

/// Returns true iff `raw` is present, non-empty and made only of ASCII digits.
///
/// Total over its input: absent values, signs, decimals, whitespace and
/// non-ASCII digits all yield `false`.
pub fn validate_product_id(raw: Option<&str>) -> bool {
    match raw {
        Some(s) => !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

// == Product Id ==
/// An identifier that has passed [`validate_product_id`].
///
/// The only way to build one is [`ProductId::parse`], so backends never see
/// unvalidated input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        if validate_product_id(Some(raw)) {
            Ok(Self(raw.to_string()))
        } else {
            Err(LookupError::invalid_id())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, or `None` when the digits overflow `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
