//! Business logic services.
//!
//! # Services
//!
//! - `catalog` - Simulated product API over the durable collections
//! - `auth` - Login flow producing the session credential
//! - `dashboard` - Manager overview figures

pub mod auth;
pub mod catalog;
pub mod dashboard;

pub use auth::{AuthError, AuthService, LoginOutcome};
pub use catalog::{
    CatalogError, CatalogService, DEFAULT_LATENCY, DeleteOutcome, IdFormat, IdGenerator,
};
pub use dashboard::{CHART_LIMIT, DashboardSummary};
