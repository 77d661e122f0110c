//! Login flow.
//!
//! Matches credentials through the catalog, strips the password, stores the
//! session credential and picks the landing screen for the user's role.

mod error;

pub use error::AuthError;

use tracing::instrument;

use crate::middleware::{Route, SessionStore, landing_for};
use crate::models::Identity;
use crate::services::catalog::CatalogService;

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Who signed in.
    pub identity: Identity,
    /// Encoded session credential.
    pub token: String,
    /// Screen to open next.
    pub landing: Route,
}

/// Login service over a catalog and a session.
pub struct AuthService<'a> {
    catalog: &'a CatalogService,
    session: &'a SessionStore,
}

impl<'a> AuthService<'a> {
    /// Create a new login service.
    #[must_use]
    pub const fn new(catalog: &'a CatalogService, session: &'a SessionStore) -> Self {
        Self { catalog, session }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no user matches, or another
    /// `AuthError` if storage fails.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let Some(user) = self
            .catalog
            .authenticate(email, password)
            .await?
            .into_iter()
            .next()
        else {
            tracing::info!("login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let identity = user.identity();
        let token = self.session.sign_in(&identity)?;
        let landing = landing_for(&identity.role);

        Ok(LoginOutcome {
            identity,
            token,
            landing,
        })
    }

    /// Sign out, dropping all session state.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the session cannot be cleared.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.sign_out()?;
        Ok(())
    }
}
