//! Shared handler state

use crate::config::ServerConfig;
use crate::platform::{ClientFactory, GitHubClientFactory};
use std::sync::Arc;

/// State cloned into every handler
///
/// Holds no per-request data: each request builds its own remote client
/// from the caller's credential.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Builds remote clients per request
    pub clients: Arc<dyn ClientFactory>,
}

impl AppState {
    /// State backed by real GitHub clients
    pub fn new(config: ServerConfig) -> Self {
        let clients = Arc::new(GitHubClientFactory::new(config.api_root()));
        Self::with_clients(config, clients)
    }

    /// State with a caller-supplied client factory
    pub fn with_clients(config: ServerConfig, clients: Arc<dyn ClientFactory>) -> Self {
        Self {
            config: Arc::new(config),
            clients,
        }
    }
}
