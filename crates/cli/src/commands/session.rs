//! Login, identity and dashboard commands.

use serde::Serialize;

use slooze_admin::error::{AppError, clear_sentry_user, set_sentry_user};
use slooze_admin::middleware::require_dashboard;
use slooze_admin::state::AppState;

use super::{CliError, emit, signed_in};

#[derive(Serialize)]
struct LoginView<'a> {
    name: &'a str,
    role: &'a str,
    token: &'a str,
    landing: &'a str,
}

/// Sign in and print the session token and landing page.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<(), CliError> {
    // Any token passed in belongs to a previous session
    state.auth().logout().map_err(AppError::from)?;
    clear_sentry_user();

    let outcome = state
        .auth()
        .login(email, password)
        .await
        .map_err(AppError::from)?;
    set_sentry_user(&outcome.identity);

    emit(&LoginView {
        name: &outcome.identity.name,
        role: outcome.identity.role.as_str(),
        token: &outcome.token,
        landing: outcome.landing.path(),
    })
}

/// Print the identity carried by the session token.
pub fn whoami(state: &AppState) -> Result<(), CliError> {
    let identity = signed_in(state)?;
    emit(&identity)
}

/// Print the dashboard figures (managers only).
pub async fn dashboard(state: &AppState) -> Result<(), CliError> {
    let identity = require_dashboard(state.session()).map_err(AppError::from)?;
    set_sentry_user(&identity);

    let summary = state
        .catalog()
        .dashboard_summary()
        .await
        .map_err(AppError::from)?;
    emit(&summary)
}
