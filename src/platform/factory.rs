//! Remote client factory
//!
//! The HTTP layer receives a credential per request, so clients are built per
//! call rather than shared. The factory trait lets tests hand out doubles.

use crate::platform::{GitHubClient, RemoteRepoClient};
use std::sync::Arc;

/// Builds a [`RemoteRepoClient`] for one caller's credential
pub trait ClientFactory: Send + Sync {
    /// Create a client, anonymous when `token` is `None`
    fn remote_client(&self, token: Option<&str>) -> Arc<dyn RemoteRepoClient>;
}

/// Factory for [`GitHubClient`]s against a fixed API root
#[derive(Debug, Clone)]
pub struct GitHubClientFactory {
    api_url: String,
}

impl GitHubClientFactory {
    /// Create a factory for `api_url`
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// API root the created clients talk to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl ClientFactory for GitHubClientFactory {
    fn remote_client(&self, token: Option<&str>) -> Arc<dyn RemoteRepoClient> {
        Arc::new(GitHubClient::new(
            token.map(ToString::to_string),
            self.api_url.clone(),
        ))
    }
}
