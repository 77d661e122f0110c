//! Command implementations.
//!
//! Every command prints its result as pretty JSON on stdout. Failures are
//! reported through [`fail`], which shows the user-facing message only.

pub mod maintenance;
pub mod products;
pub mod session;

use std::process::ExitCode;

use clap::Args;
use serde::Serialize;
use thiserror::Error;

use slooze_admin::error::AppError;
use slooze_admin::middleware::require_auth;
use slooze_admin::models::{Identity, ProductFields};
use slooze_admin::state::AppState;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Application error.
    #[error(transparent)]
    App(#[from] AppError),

    /// Result could not be printed.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Product fields as command-line flags.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product name
    #[arg(long)]
    pub name: String,

    /// Product category
    #[arg(long)]
    pub category: String,

    /// Units in stock
    #[arg(long)]
    pub quantity: i64,

    /// Unit weight
    #[arg(long)]
    pub weight: f64,

    /// Unit price
    #[arg(long)]
    pub price: f64,

    /// Optional description
    #[arg(long)]
    pub description: Option<String>,
}

impl From<ProductArgs> for ProductFields {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            category: args.category,
            quantity: args.quantity,
            weight: args.weight,
            price: args.price,
            description: args.description,
        }
    }
}

/// Print `value` as pretty JSON.
#[allow(clippy::print_stdout)]
pub fn emit<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Require a signed-in session.
pub fn signed_in(state: &AppState) -> Result<Identity, CliError> {
    let identity = require_auth(state.session()).map_err(AppError::from)?;
    slooze_admin::error::set_sentry_user(&identity);
    Ok(identity)
}

/// Report `error` and return the failure exit status.
///
/// Returning instead of exiting lets `main` drop the Sentry guard, which
/// flushes the event captured by the report.
#[allow(clippy::print_stderr)]
pub fn fail(error: &CliError) -> ExitCode {
    let message = match error {
        CliError::App(app) => {
            app.report();
            app.user_message()
        }
        CliError::Output(e) => {
            tracing::error!(error = %e, "failed to write output");
            e.to_string()
        }
    };
    eprintln!("error: {message}");
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_returns_instead_of_exiting() {
        let code = fail(&CliError::App(AppError::BadRequest("bad flag".to_string())));
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
    }

    #[test]
    fn test_product_args_become_fields() {
        let fields = ProductFields::from(ProductArgs {
            name: "Chair".to_string(),
            category: "Home".to_string(),
            quantity: 5,
            weight: 3.2,
            price: 49.99,
            description: None,
        });
        assert_eq!(fields.name, "Chair");
        assert_eq!(fields.quantity, 5);
        assert!(fields.description.is_none());
    }
}
