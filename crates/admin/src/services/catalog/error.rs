//! Catalog service error types.

use thiserror::Error;

use slooze_core::ProductId;

use crate::db::StoreError;

/// Errors that can occur during catalog operations.
///
/// Absence is not an error for reads, authentication or delete: those report
/// it as an empty result. Only update elevates a missing id to
/// [`CatalogError::NotFound`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product has the id given to an update.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// A numeric field cannot be stored (NaN or infinite).
    #[error("{field} must be a finite number")]
    InvalidField {
        /// Offending field.
        field: &'static str,
    },

    /// Every generated id collided with a stored product.
    #[error("no free product id after {attempts} attempts")]
    IdSpaceExhausted {
        /// Number of ids tried.
        attempts: usize,
    },

    /// Durable storage failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Whether this error comes from the substrate rather than the request.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
