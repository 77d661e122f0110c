//! Session and access-control layer consumed by the navigation shell.
//!
//! - [`session`] - session credential codec and session-scoped storage
//! - [`auth`] - route guards and role-based landing pages

pub mod auth;
pub mod session;

pub use auth::{AuthRejection, Route, landing_for, require_auth, require_dashboard};
pub use session::{Base64JsonCodec, SessionCredentialCodec, SessionError, SessionStore};
