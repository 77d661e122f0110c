//! Integration tests for the Slooze catalog admin.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p slooze-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Product lifecycle through the simulated API
//! - `session` - Login, credential restore and route guards
//! - `persistence` - File-backed storage across reopen and reset
//!
//! Everything runs in-process against [`MemoryStore`] or a [`FileStore`]
//! under the system temp directory. Latency is zeroed so tests stay fast.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use slooze_admin::config::AdminConfig;
use slooze_admin::db::{MemoryStore, SeedData};
use slooze_admin::models::ProductFields;
use slooze_admin::services::CatalogService;
use slooze_admin::state::AppState;

/// Catalog over fresh in-memory storage with no latency.
#[must_use]
pub fn catalog_with_seed(seed: SeedData) -> CatalogService {
    CatalogService::new(Arc::new(MemoryStore::new()))
        .with_seed(seed)
        .with_latency(Duration::ZERO)
}

/// Unique directory under the system temp dir. Not created.
#[must_use]
pub fn temp_data_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("slooze-it-{label}-{}", uuid::Uuid::new_v4()))
}

/// Configuration pointing at `data_dir`, with no latency.
///
/// # Panics
///
/// Panics if the fixed test settings fail to parse.
#[must_use]
pub fn test_config(data_dir: &std::path::Path) -> AdminConfig {
    let data_dir = data_dir.display().to_string();
    AdminConfig::from_lookup(|key| match key {
        "SLOOZE_DATA_DIR" => Some(data_dir.clone()),
        "SLOOZE_LATENCY_MS" => Some("0".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

/// Application state over in-memory stores with default seed data.
#[must_use]
pub fn memory_state() -> AppState {
    let config = test_config(&temp_data_dir("unused"));
    AppState::with_stores(
        config,
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryStore::new()),
    )
}

/// Product fields with the given name and price.
#[must_use]
pub fn fields(name: &str, category: &str, price: f64) -> ProductFields {
    ProductFields {
        name: name.to_string(),
        category: category.to_string(),
        quantity: 5,
        weight: 3.2,
        price,
        description: None,
    }
}
