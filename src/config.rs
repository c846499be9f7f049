use std::env;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::cart::{CartStore, DEFAULT_CART_KEY};
use crate::checkout::DEFAULT_TAX_RATE;
use crate::storage::{FileStorage, StorageError};

/// Settings for a cart session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Key the cart owns in storage.
    pub storage_key: String,
    pub tax_rate: f64,
    /// Profile directory for [`FileStorage`]. None means the host supplies
    /// its own backend.
    pub storage_dir: Option<PathBuf>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_CART_KEY.to_string(),
            tax_rate: DEFAULT_TAX_RATE,
            storage_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { var: String, value: String },
    MissingStorageDir,
    Storage(StorageError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { var, value } => {
                write!(f, "invalid value {:?} for {}", value, var)
            }
            ConfigError::MissingStorageDir => write!(f, "no cart storage directory configured"),
            ConfigError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl CartConfig {
    /// Read `MADY_CART_KEY`, `MADY_CART_TAX_RATE` and `MADY_CART_DIR`, after
    /// loading a `.env` file if one exists. Unset variables keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`CartConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = lookup("MADY_CART_KEY").filter(|k| !k.trim().is_empty()) {
            config.storage_key = key.trim().to_string();
            config.check_key()?;
        }

        if let Some(raw) = lookup("MADY_CART_TAX_RATE") {
            config.tax_rate = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|rate| rate.is_finite() && *rate >= 0.0)
                .ok_or_else(|| ConfigError::Invalid {
                    var: "MADY_CART_TAX_RATE".into(),
                    value: raw.clone(),
                })?;
        }

        if let Some(dir) = lookup("MADY_CART_DIR").filter(|d| !d.trim().is_empty()) {
            config.storage_dir = Some(PathBuf::from(dir.trim()));
        }

        tracing::debug!(key = %config.storage_key, tax_rate = config.tax_rate, "cart config loaded");
        Ok(config)
    }

    /// Open a file-backed store in the configured profile directory.
    pub fn open_store(&self) -> Result<CartStore<FileStorage>, ConfigError> {
        self.check_key()?;
        let dir = self
            .storage_dir
            .as_ref()
            .ok_or(ConfigError::MissingStorageDir)?;
        let storage = FileStorage::open(dir).map_err(ConfigError::Storage)?;
        Ok(CartStore::with_key(storage, self.storage_key.clone()))
    }

    fn check_key(&self) -> Result<(), ConfigError> {
        FileStorage::check_key(&self.storage_key).map_err(|_| ConfigError::Invalid {
            var: "MADY_CART_KEY".into(),
            value: self.storage_key.clone(),
        })
    }
}
