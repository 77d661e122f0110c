//! Slooze CLI - catalog administration from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and keep the token for later commands
//! export SLOOZE_SESSION=$(slooze login -e manager@slooze.xyz -p 'Manager@123' | jq -r .token)
//!
//! # Browse and edit products
//! slooze products list --search home
//! slooze products add --name Chair --category Home --quantity 5 --weight 3.2 --price 49.99
//! slooze products update 9c1e --name Chair --category Home --quantity 5 --weight 3.2 --price 39.99
//! slooze products delete 9c1e
//!
//! # Manager overview
//! slooze dashboard
//!
//! # Restore the seed data
//! slooze reset
//! ```
//!
//! # Commands
//!
//! - `login` / `whoami` - Session credential
//! - `dashboard` - Manager overview figures
//! - `products` - Product CRUD
//! - `reset` - Overwrite all collections with the seed data

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slooze_admin::config::AdminConfig;
use slooze_admin::state::AppState;

mod commands;

use commands::{CliError, ProductArgs};

#[derive(Parser)]
#[command(name = "slooze")]
#[command(author, version, about = "Slooze catalog admin CLI")]
struct Cli {
    /// Session token from `login`
    #[arg(long, env = "SLOOZE_SESSION", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and print the session token
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Show who the session token belongs to
    Whoami,
    /// Show the manager dashboard figures
    Dashboard,
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Overwrite users and products with the seed data
    Reset,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        /// Only products whose name or category contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product
    Get {
        /// Product id
        id: String,
    },
    /// Add a product
    Add(ProductArgs),
    /// Replace every field of a product
    Update {
        /// Product id
        id: String,

        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Initialize tracing on stderr so stdout stays machine-readable.
fn init_tracing(config: &AdminConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "slooze_admin=info,slooze_cli=info".into());

    let json_layer = config.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!config.log_json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AdminConfig::from_env() {
        Ok(config) => config,
        Err(e) => return commands::fail(&CliError::App(e.into())),
    };

    // Sentry must be initialized before the tracing subscriber. The guard
    // flushes queued events when it drops at the end of main.
    let _sentry_guard = init_sentry(&config);
    init_tracing(&config);

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => return commands::fail(&CliError::App(e.into())),
    };

    match run(cli, &state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => commands::fail(&e),
    }
}

async fn run(cli: Cli, state: &AppState) -> Result<(), CliError> {
    if let Some(token) = &cli.token {
        state
            .session()
            .restore(token)
            .map_err(slooze_admin::error::AppError::from)?;
    }

    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(state, &email, &password).await
        }
        Commands::Whoami => commands::session::whoami(state),
        Commands::Dashboard => commands::session::dashboard(state).await,
        Commands::Products { action } => match action {
            ProductAction::List { search } => {
                commands::products::list(state, search.as_deref()).await
            }
            ProductAction::Get { id } => commands::products::get(state, &id).await,
            ProductAction::Add(fields) => commands::products::add(state, fields).await,
            ProductAction::Update { id, fields } => {
                commands::products::update(state, &id, fields).await
            }
            ProductAction::Delete { id } => commands::products::delete(state, &id).await,
        },
        Commands::Reset => commands::maintenance::reset(state).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_product_flags_parse() {
        let cli = Cli::try_parse_from([
            "slooze",
            "--token",
            "abc",
            "products",
            "update",
            "9c1e",
            "--name",
            "Chair",
            "--category",
            "Home",
            "--quantity",
            "5",
            "--weight",
            "3.2",
            "--price",
            "39.99",
        ]);

        let Ok(cli) = cli else {
            panic!("update flags should parse");
        };
        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert!(matches!(
            cli.command,
            Commands::Products {
                action: ProductAction::Update { .. }
            }
        ));
    }
}
