//! Durable storage for the catalog.
//!
//! # Substrate
//!
//! Everything the catalog persists goes through the [`Store`] trait: a
//! synchronous string key-value map whose single-key writes are atomic.
//!
//! - [`MemoryStore`] - process-lifetime map (session scope, tests)
//! - [`FileStore`] - one JSON file per key in a data directory
//!
//! # Keys
//!
//! - `slooze_users` - JSON array of users
//! - `slooze_products` - JSON array of products
//!
//! Collections are read and replaced whole via [`CollectionStore`].

pub mod collections;
pub mod file;
pub mod memory;
pub mod seed;

use thiserror::Error;

pub use collections::{Collection, CollectionStore, Record};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use seed::SeedData;

/// Errors raised by the durable substrate.
///
/// Every variant means the store cannot be trusted for this call. Callers
/// surface it as a connectivity failure and never retry.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("storage I/O error on {key}: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Stored value is not a valid sequence of the collection's records.
    #[error("corrupt value under {key}: {source}")]
    Corrupt {
        /// Key holding the bad value.
        key: String,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Key cannot be mapped onto the substrate.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Records could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The substrate is no longer usable (e.g. a poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous key-value substrate holding JSON text.
///
/// Implementations must make `set` atomic per key: a concurrent or later
/// `get` sees either the previous value or the new one, never a mix.
pub trait Store: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the substrate cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the substrate cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key` if present.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the substrate cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Remove every key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the substrate cannot be written.
    fn clear(&self) -> Result<(), StoreError>;
}
