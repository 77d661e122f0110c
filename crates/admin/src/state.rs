//! Application state shared by front ends.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::db::{FileStore, MemoryStore, Store, StoreError};
use crate::middleware::SessionStore;
use crate::services::{AuthService, CatalogService};

/// Application state: the catalog over durable storage plus the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    catalog: CatalogService,
    session: SessionStore,
}

impl AppState {
    /// Build state from configuration: file-backed collections under
    /// `config.data_dir` and an in-memory session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data directory cannot be opened.
    pub fn new(config: AdminConfig) -> Result<Self, StoreError> {
        let durable = Arc::new(FileStore::open(&config.data_dir)?);
        let session = Arc::new(MemoryStore::new());
        tracing::info!(data_dir = %config.data_dir.display(), "catalog storage ready");
        Ok(Self::with_stores(config, durable, session))
    }

    /// Build state over explicit substrates.
    #[must_use]
    pub fn with_stores(
        config: AdminConfig,
        durable: Arc<dyn Store>,
        session: Arc<dyn Store>,
    ) -> Self {
        let catalog = CatalogService::new(durable)
            .with_id_generator(config.id_format.generator())
            .with_latency(config.latency);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                session: SessionStore::new(session),
            }),
        }
    }

    /// Loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The catalog service.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// The session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Login service bound to this state.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.inner.catalog, &self.inner.session)
    }
}
