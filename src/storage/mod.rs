//! Storage - Key-value string persistence for the cart.
//!
//! The cart writes its whole state under a single key after every mutation,
//! so backends only need three synchronous operations.
//!
//! ## Example
//!
//! ```ignore
//! use mady_cart::{InMemoryStorage, KeyValueStore};
//!
//! let storage = InMemoryStorage::new();
//! storage.set("mady_cart", "[]")?;
//! assert_eq!(storage.get("mady_cart")?.as_deref(), Some("[]"));
//! ```

mod file;
mod in_memory;

use std::fmt;

/// Synchronous key-value string store scoped to one user profile.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`. Returns None if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Error type for storage backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Storage is disabled or otherwise unreachable.
    Unavailable(String),
    /// The write would exceed the backend's capacity.
    QuotaExceeded { key: String, limit: usize },
    /// Filesystem-level failure.
    Io(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
            StorageError::QuotaExceeded { key, limit } => {
                write!(f, "storage quota of {} bytes exceeded writing {}", limit, key)
            }
            StorageError::Io(msg) => write!(f, "storage io error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

pub use file::FileStorage;
pub use in_memory::InMemoryStorage;
