//! Named collections read and replaced as a whole.
//!
//! A collection is stored as one JSON array under one key, so every write
//! replaces the full sequence in a single atomic substrate write.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{SeedData, Store, StoreError};
use crate::models::{Product, User};

/// The collections the catalog persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// User accounts.
    Users,
    /// Catalog products.
    Products,
}

impl Collection {
    /// Every known collection, in seeding order.
    pub const ALL: [Self; 2] = [Self::Users, Self::Products];

    /// Substrate key holding this collection.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Users => "slooze_users",
            Self::Products => "slooze_products",
        }
    }
}

/// A record type that lives in exactly one collection.
pub trait Record: Serialize + DeserializeOwned {
    /// Collection holding records of this type.
    const COLLECTION: Collection;
}

impl Record for User {
    const COLLECTION: Collection = Collection::Users;
}

impl Record for Product {
    const COLLECTION: Collection = Collection::Products;
}

/// Whole-collection access over a [`Store`], with seed-on-first-touch.
#[derive(Clone)]
pub struct CollectionStore {
    store: Arc<dyn Store>,
    seed: Arc<SeedData>,
}

impl CollectionStore {
    /// Wrap a substrate with the data to seed it from.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, seed: SeedData) -> Self {
        Self {
            store,
            seed: Arc::new(seed),
        }
    }

    /// The underlying substrate.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Write the seed for every collection that has no value yet.
    ///
    /// Collections that already hold a value, even an empty array, are left
    /// untouched, so this is safe to call before every operation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the substrate cannot be read or written.
    pub fn ensure_seeded(&self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            let present = self
                .store
                .get(collection.key())?
                .is_some_and(|value| !value.is_empty());
            if !present {
                self.store
                    .set(collection.key(), &self.seed.json_for(collection)?)?;
                tracing::info!(collection = collection.key(), "collection seeded");
            }
        }
        Ok(())
    }

    /// Read every record of `R`'s collection, in stored order.
    ///
    /// An absent collection reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the stored value is not an array of
    /// `R`, or another `StoreError` if the substrate cannot be read.
    pub fn read_all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let key = R::COLLECTION.key();
        match self.store.get(key)? {
            Some(value) if !value.is_empty() => {
                serde_json::from_str(&value).map_err(|source| StoreError::Corrupt {
                    key: key.to_owned(),
                    source,
                })
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Replace `R`'s collection with `records` in one write.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or the substrate write fails.
    pub fn write_all<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.store.set(R::COLLECTION.key(), &json)
    }

    /// Overwrite every collection with its seed, present or not.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the substrate cannot be written.
    pub fn reset(&self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            self.store
                .set(collection.key(), &self.seed.json_for(collection)?)?;
        }
        tracing::info!("all collections reset to seed");
        Ok(())
    }
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore")
            .field("seed_users", &self.seed.users.len())
            .field("seed_products", &self.seed.products.len())
            .finish_non_exhaustive()
    }
}
