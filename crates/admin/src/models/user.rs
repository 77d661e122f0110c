//! Catalog user accounts.

use serde::{Deserialize, Serialize};

use slooze_core::Role;

use super::session::Identity;

/// A user account as stored in the `users` collection.
///
/// Accounts are read-only to the catalog; they exist to be matched by
/// [`authenticate`](crate::services::CatalogService::authenticate).
/// Implements `Debug` manually to redact the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login email. Unique by convention, compared case-sensitively.
    pub email: String,
    /// Plain-text password, compared case-sensitively.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Permission role.
    pub role: Role,
}

impl User {
    /// Build a user record.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
            role,
        }
    }

    /// Whether both credentials match exactly.
    #[must_use]
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// Session identity for this user, with the password stripped.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish()
    }
}
