//! Catalog service: the simulated product API.
//!
//! Every operation behaves like a network round trip: it first waits out a
//! fixed artificial latency, then seeds any missing collection, then runs its
//! read or read-modify-write against the [`CollectionStore`].
//!
//! Results are shaped like the JSON API the front end was written against:
//! lookups return a zero- or one-element `Vec`, and absence is never an error
//! except for [`CatalogService::update_product`].
//!
//! # Writers
//!
//! Product mutations hold a per-collection async mutex across their
//! read-modify-write, so two writes issued without awaiting each other are
//! applied one after the other instead of the second overwriting the first.

mod error;
pub mod ids;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::instrument;

use slooze_core::ProductId;

pub use error::CatalogError;
pub use ids::{HexIdGenerator, IdFormat, IdGenerator, UuidIdGenerator};

use crate::db::{CollectionStore, SeedData, Store, StoreError};
use crate::models::{Product, ProductFields, User};

/// Artificial delay applied before every operation.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(100);

/// Result of [`CatalogService::delete_product`].
///
/// Always reports success, whether or not a record matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    /// Always `true`.
    pub success: bool,
}

/// Simulated catalog API over durable collections.
pub struct CatalogService {
    collections: CollectionStore,
    ids: Arc<dyn IdGenerator>,
    latency: Duration,
    products_writer: Mutex<()>,
}

impl CatalogService {
    /// Create a service over `store` with the default seed, 4-hex ids and
    /// [`DEFAULT_LATENCY`].
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            collections: CollectionStore::new(store, SeedData::default()),
            ids: Arc::new(HexIdGenerator),
            latency: DEFAULT_LATENCY,
            products_writer: Mutex::new(()),
        }
    }

    /// Replace the data used to seed empty collections.
    #[must_use]
    pub fn with_seed(mut self, seed: SeedData) -> Self {
        self.collections = CollectionStore::new(self.collections.store().clone(), seed);
        self
    }

    /// Replace the product id generator.
    #[must_use]
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Replace the artificial latency.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The collections backing this service.
    #[must_use]
    pub const fn collections(&self) -> &CollectionStore {
        &self.collections
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Find the user whose email and password both match exactly.
    ///
    /// Returns an empty `Vec` for invalid credentials.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if storage fails.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Vec<User>, CatalogError> {
        self.simulate_latency().await;
        self.collections.ensure_seeded()?;

        let users: Vec<User> = self.collections.read_all()?;
        let matched: Vec<User> = users
            .into_iter()
            .find(|user| user.matches_credentials(email, password))
            .into_iter()
            .collect();

        tracing::debug!(matched = !matched.is_empty(), "authentication checked");
        Ok(matched)
    }

    // =========================================================================
    // Products - reads
    // =========================================================================

    /// Every product, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if storage fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.simulate_latency().await;
        self.collections.ensure_seeded()?;
        Ok(self.collections.read_all()?)
    }

    /// The product with `id`, as a zero- or one-element `Vec`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if storage fails.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Vec<Product>, CatalogError> {
        self.simulate_latency().await;
        self.collections.ensure_seeded()?;

        let products: Vec<Product> = self.collections.read_all()?;
        Ok(products
            .into_iter()
            .find(|product| &product.id == id)
            .into_iter()
            .collect())
    }

    /// Products whose name or category contains `term`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if storage fails.
    #[instrument(skip(self))]
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, CatalogError> {
        let mut products = self.list_products().await?;
        products.retain(|product| product.matches(term));
        Ok(products)
    }

    // =========================================================================
    // Products - writes
    // =========================================================================

    /// Store a new product under a freshly generated id and return it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidField` if a number cannot be stored,
    /// `CatalogError::IdSpaceExhausted` if no unused id could be drawn, or
    /// `CatalogError::Store` if storage fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: ProductFields) -> Result<Product, CatalogError> {
        self.simulate_latency().await;
        check_fields(&input)?;
        let _writer = self.products_writer.lock().await;
        self.collections.ensure_seeded()?;

        let mut products: Vec<Product> = self.collections.read_all()?;
        let id = {
            let taken: HashSet<&ProductId> = products.iter().map(|p| &p.id).collect();
            ids::allocate(self.ids.as_ref(), &taken).ok_or(CatalogError::IdSpaceExhausted {
                attempts: ids::MAX_ID_ATTEMPTS,
            })?
        };

        let product = Product::new(id, input);
        products.push(product.clone());
        self.collections.write_all(&products)?;

        tracing::debug!(id = %product.id, "product created");
        Ok(product)
    }

    /// Replace every field of the product with `id`, keeping the id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidField` if a number cannot be stored,
    /// `CatalogError::NotFound` if no product has `id` (nothing is written in
    /// either case), or `CatalogError::Store` if storage fails.
    #[instrument(skip(self, id, input), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        input: ProductFields,
    ) -> Result<Product, CatalogError> {
        self.simulate_latency().await;
        check_fields(&input)?;
        let _writer = self.products_writer.lock().await;
        self.collections.ensure_seeded()?;

        let mut products: Vec<Product> = self.collections.read_all()?;
        let Some(slot) = products.iter_mut().find(|product| &product.id == id) else {
            tracing::warn!("update of unknown product");
            return Err(CatalogError::NotFound(id.clone()));
        };

        *slot = Product::new(id.clone(), input);
        let updated = slot.clone();
        self.collections.write_all(&products)?;

        tracing::debug!("product updated");
        Ok(updated)
    }

    /// Remove the product with `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if storage fails.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<DeleteOutcome, CatalogError> {
        self.simulate_latency().await;
        let _writer = self.products_writer.lock().await;
        self.collections.ensure_seeded()?;

        let mut products: Vec<Product> = self.collections.read_all()?;
        let before = products.len();
        products.retain(|product| &product.id != id);
        self.collections.write_all(&products)?;

        tracing::debug!(removed = before - products.len(), "product delete applied");
        Ok(DeleteOutcome { success: true })
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Overwrite both collections with the seed, immediately.
    ///
    /// Skips the latency and the seed-if-absent check. Meant for tests and
    /// debugging, not for the request path. Waits for any in-flight product
    /// write, so a write that started before the reset cannot land after it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if storage fails.
    pub async fn reset_all(&self) -> Result<(), StoreError> {
        let _writer = self.products_writer.lock().await;
        self.collections.reset()
    }
}

/// Reject fields that would not survive a JSON round trip.
fn check_fields(input: &ProductFields) -> Result<(), CatalogError> {
    match input.non_finite_field() {
        Some(field) => {
            tracing::warn!(field, "rejected non-finite product field");
            Err(CatalogError::InvalidField { field })
        }
        None => Ok(()),
    }
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("collections", &self.collections)
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}
