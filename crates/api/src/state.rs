use std::sync::Arc;

use kindred_db::DocumentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document store backing every collection.
    pub store: Arc<dyn DocumentStore>,
    /// Server configuration (admin token, payment settings).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
