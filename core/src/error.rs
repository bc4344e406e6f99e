// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Invalid quantity 0 for line '{id}': a stored line must hold at least 1 unit")]
  InvalidQuantity { id: String },

  #[error("Negative unit price {price} for line '{id}'")]
  NegativePrice { id: String, price: rust_decimal::Decimal },

  #[error("Storage backend failed for key '{key}'. Source: {source}")]
  Storage {
    key: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Failed to serialize cart state: {source}")]
  Serialization {
    #[from]
    source: serde_json::Error,
  },
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
