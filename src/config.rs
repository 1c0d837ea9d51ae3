//! Server configuration

use crate::platform::DEFAULT_API_URL;
use clap::Args;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use url::Url;

/// Largest accepted request body (2 MiB)
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Settings for the HTTP surface
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "WFSTUDIO_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// GitHub REST API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Largest accepted request body in bytes
    #[arg(skip = BODY_LIMIT)]
    pub body_limit: usize,
}

impl ServerConfig {
    /// Socket address to bind
    pub const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// API root without a trailing slash
    pub fn api_root(&self) -> String {
        self.api_url.as_str().trim_end_matches('/').to_string()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            api_url: Url::parse(DEFAULT_API_URL).expect("hardcoded API URL is valid"),
            body_limit: BODY_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_root_trims_slash() {
        let config = ServerConfig::default();
        assert_eq!(config.api_url.as_str(), "https://api.github.com/");
        assert_eq!(config.api_root(), "https://api.github.com");
        assert_eq!(config.addr().to_string(), "127.0.0.1:3000");
    }
}
