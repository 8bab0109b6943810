use std::sync::Arc;

use capvote_backend::{DataStore, IdentityProvider};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (everything is behind `Arc`). In production both
/// `store` and `identity` point at the same backend client.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Table reads and the vote upsert.
    pub store: Arc<dyn DataStore>,
    /// Sign-in, code exchange, current user and refresh.
    pub identity: Arc<dyn IdentityProvider>,
}
