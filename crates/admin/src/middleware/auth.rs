//! Route guards for the navigation shell.
//!
//! Policy: every signed-in role may use the product screens; only `manager`
//! may open the dashboard. A manager lands on the dashboard after login,
//! everyone else on the product list.

use thiserror::Error;

use slooze_core::Role;

use super::session::SessionStore;
use crate::models::Identity;

/// Screens the shell can send a user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login entry point.
    Login,
    /// Manager dashboard.
    Dashboard,
    /// Product list.
    Products,
}

impl Route {
    /// Path of this screen.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Dashboard => "/dashboard",
            Self::Products => "/product",
        }
    }
}

/// Why a guard refused access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthRejection {
    /// No valid credential in the session.
    #[error("not signed in")]
    RedirectToLogin,
    /// Signed in, but the role may not open this screen.
    #[error("role may not open this page")]
    Forbidden {
        /// Where to send the user instead.
        redirect: Route,
    },
}

impl AuthRejection {
    /// Screen the user should be sent to.
    #[must_use]
    pub const fn redirect(self) -> Route {
        match self {
            Self::RedirectToLogin => Route::Login,
            Self::Forbidden { redirect } => redirect,
        }
    }
}

/// Landing screen after login.
#[must_use]
pub const fn landing_for(role: &Role) -> Route {
    if role.can_view_dashboard() {
        Route::Dashboard
    } else {
        Route::Products
    }
}

/// Require any signed-in user.
///
/// # Errors
///
/// Returns `AuthRejection::RedirectToLogin` when signed out.
pub fn require_auth(session: &SessionStore) -> Result<Identity, AuthRejection> {
    session.current().ok_or(AuthRejection::RedirectToLogin)
}

/// Require a user allowed on the dashboard.
///
/// # Errors
///
/// Returns `AuthRejection::RedirectToLogin` when signed out, or
/// `AuthRejection::Forbidden` (redirecting to the product list) for roles
/// other than `manager`.
pub fn require_dashboard(session: &SessionStore) -> Result<Identity, AuthRejection> {
    let identity = require_auth(session)?;
    if identity.role.can_view_dashboard() {
        Ok(identity)
    } else {
        tracing::debug!(role = %identity.role, "dashboard refused");
        Err(AuthRejection::Forbidden {
            redirect: Route::Products,
        })
    }
}
