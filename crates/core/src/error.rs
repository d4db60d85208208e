//! Data-format error model.

use thiserror::Error;

/// Result type used by the parsing/conversion rules.
pub type DataFormatResult<T> = Result<T, DataFormatError>;

/// A local input value could not be interpreted under the fixed conversion rules.
///
/// These are never skipped per record: a single bad value aborts the pass
/// that needed it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataFormatError {
    /// The quantity descriptor of a record is not `">10"`, `"1"` or a non-negative integer.
    #[error("invalid quantity {raw:?} for code {code}")]
    InvalidQuantity { code: String, raw: String },

    /// The price string of a record has no digits before the decimal separator.
    #[error("invalid price {raw:?} for code {code}")]
    InvalidPrice { code: String, raw: String },

    /// An identifier was empty or otherwise unusable.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DataFormatError {
    pub fn invalid_quantity(code: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::InvalidQuantity {
            code: code.into(),
            raw: raw.into(),
        }
    }

    pub fn invalid_price(code: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::InvalidPrice {
            code: code.into(),
            raw: raw.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
