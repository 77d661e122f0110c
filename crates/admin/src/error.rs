//! Unified error handling for front ends.
//!
//! [`AppError`] gathers every layer's error and decides what the user sees:
//! storage failures become a generic connectivity message (details go to the
//! logs and Sentry), everything else gets a specific message.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::StoreError;
use crate::middleware::{AuthRejection, SessionError};
use crate::models::Identity;
use crate::services::{AuthError, CatalogError};

const CONNECTIVITY_MESSAGE: &str = "Error connecting to server";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Durable storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Login failed.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Session state could not be written.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// A route guard refused access.
    #[error("Access denied: {0}")]
    Access(#[from] AuthRejection),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the substrate is at fault (fatal, never retried).
    #[must_use]
    pub const fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Storage(_)
                | Self::Catalog(CatalogError::Store(_))
                | Self::Auth(AuthError::Catalog(CatalogError::Store(_)) | AuthError::Session(_))
                | Self::Session(_)
        )
    }

    /// Message safe to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_storage_failure() {
            return CONNECTIVITY_MESSAGE.to_string();
        }

        match self {
            Self::Catalog(CatalogError::NotFound(_)) => "Product not found".to_string(),
            Self::Catalog(CatalogError::InvalidField { field }) => {
                format!("Invalid {field}: enter a finite number")
            }
            Self::Catalog(CatalogError::IdSpaceExhausted { .. }) => {
                "Failed to add product".to_string()
            }
            Self::Auth(AuthError::InvalidCredentials) => "Invalid email or password".to_string(),
            Self::Access(AuthRejection::RedirectToLogin) => "Please sign in".to_string(),
            Self::Access(AuthRejection::Forbidden { .. }) => {
                "You do not have access to this page".to_string()
            }
            Self::BadRequest(message) => message.clone(),
            _ => self.to_string(),
        }
    }

    /// Log the error, capturing storage failures in Sentry.
    pub fn report(&self) {
        if self.is_storage_failure() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "storage failure"
            );
        } else {
            tracing::warn!(error = %self, "request failed");
        }
    }
}

/// Set the Sentry user context from a session identity.
pub fn set_sentry_user(identity: &Identity) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            username: Some(identity.name.clone()),
            ..Default::default()
        }));
        scope.set_tag("role", identity.role.as_str());
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
        scope.remove_tag("role");
    });
}

#[cfg(test)]
mod tests {
    use slooze_core::ProductId;

    use super::*;
    use crate::middleware::Route;

    fn io_failure() -> StoreError {
        StoreError::Io {
            key: "slooze_products".to_string(),
            source: std::io::Error::other("disk gone"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Catalog(CatalogError::NotFound(ProductId::new("ab12")));
        assert_eq!(err.to_string(), "Catalog error: product ab12 not found");

        let err = AppError::BadRequest("price must be a number".to_string());
        assert_eq!(err.to_string(), "Bad request: price must be a number");
    }

    #[test]
    fn test_storage_failures_hide_details() {
        for err in [
            AppError::Storage(io_failure()),
            AppError::Catalog(CatalogError::Store(io_failure())),
            AppError::Auth(AuthError::Catalog(CatalogError::Store(io_failure()))),
            AppError::Session(SessionError::Store(io_failure())),
        ] {
            assert!(err.is_storage_failure());
            assert_eq!(err.user_message(), "Error connecting to server");
        }
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::Catalog(CatalogError::NotFound(ProductId::new("ab12"))).user_message(),
            "Product not found"
        );
        assert_eq!(
            AppError::Auth(AuthError::InvalidCredentials).user_message(),
            "Invalid email or password"
        );
        assert_eq!(
            AppError::Access(AuthRejection::Forbidden {
                redirect: Route::Products
            })
            .user_message(),
            "You do not have access to this page"
        );
        assert_eq!(
            AppError::Catalog(CatalogError::InvalidField { field: "price" }).user_message(),
            "Invalid price: enter a finite number"
        );
        assert!(!AppError::Auth(AuthError::InvalidCredentials).is_storage_failure());
    }
}
