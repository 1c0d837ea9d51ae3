//! Credential discovery for the command line
//!
//! The HTTP surface takes a token per request; only the CLI looks one up.

mod github;

pub use github::{GitHubAuthConfig, get_github_auth, verify_github_auth};

use std::fmt;

/// Where a token was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// `gh auth token`
    GhCli,
    /// `GITHUB_TOKEN`
    GithubToken,
    /// `GH_TOKEN`
    GhToken,
}

impl fmt::Display for AuthSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GhCli => "gh CLI",
            Self::GithubToken => "GITHUB_TOKEN",
            Self::GhToken => "GH_TOKEN",
        })
    }
}
