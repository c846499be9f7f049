use std::fmt;

use crate::storage::StorageError;

#[derive(Debug, Clone, PartialEq)]
pub enum CartError {
    /// The backend refused the write. Nothing was notified.
    PersistenceUnavailable(StorageError),
    /// The cart could not be encoded for storage.
    Serde(String),
    /// A candidate item carried a negative or non-finite price.
    InvalidPrice { id: i64, price: f64 },
}

impl fmt::Display for CartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartError::PersistenceUnavailable(err) => {
                write!(f, "cart could not be saved: {}", err)
            }
            CartError::Serde(msg) => write!(f, "cart serialization error: {}", msg),
            CartError::InvalidPrice { id, price } => {
                write!(f, "menu item {} has invalid price {}", id, price)
            }
        }
    }
}

impl std::error::Error for CartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CartError::PersistenceUnavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for CartError {
    fn from(err: StorageError) -> Self {
        CartError::PersistenceUnavailable(err)
    }
}
