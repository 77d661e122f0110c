//! Slooze Admin library.
//!
//! Client-side persistence and simulated API for the catalog admin:
//!
//! - [`db`] - durable key-value substrate and whole-collection access
//! - [`services`] - the catalog API, login flow and dashboard figures
//! - [`middleware`] - session credential and route guards
//! - [`models`] - users, products and session identity
//!
//! Front ends build an [`state::AppState`] and call into it; nothing here
//! performs network I/O.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
