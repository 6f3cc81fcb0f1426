//! Shared application state
//!
//! One instance is built at startup from the configuration and handed to
//! every request handler. There is no teardown: process exit discards the
//! catalog.

use crate::config::Config;
use crate::services::uploads::UploadStore;
use crate::state::catalog::CatalogState;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application-wide state shared across request handlers
#[derive(Debug)]
pub struct AppState {
    /// The in-memory product catalog
    ///
    /// The write guard is held across each read-modify-write, so concurrent
    /// requests never interleave inside a mutation.
    pub catalog: RwLock<CatalogState>,
    /// Disk-backed store for uploaded product images
    pub uploads: UploadStore,
}

/// Shared handle to the application state
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build the state from configuration, seeding the catalog
    pub fn new(config: &Config) -> Self {
        Self {
            catalog: RwLock::new(CatalogState::seeded()),
            uploads: UploadStore::new(config.uploads.dir.clone()),
        }
    }
}
