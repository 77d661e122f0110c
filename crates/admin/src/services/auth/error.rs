//! Login error types.

use thiserror::Error;

use crate::middleware::SessionError;
use crate::services::catalog::CatalogError;

/// Errors that can occur during login and logout.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user matches the email and password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Catalog lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Session state could not be written.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}
