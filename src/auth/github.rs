//! GitHub credential lookup

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use std::env;
use tokio::process::Command;
use tracing::debug;

/// A token and where it came from
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Bearer token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Find a GitHub token
///
/// Priority:
/// 1. gh CLI (`gh auth token`)
/// 2. `GITHUB_TOKEN` environment variable
/// 3. `GH_TOKEN` environment variable
pub async fn get_github_auth() -> Result<GitHubAuthConfig> {
    let cli_token = gh_cli_token().await;
    pick_token(cli_token, |key| env::var(key).ok())
}

fn pick_token(
    cli_token: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<GitHubAuthConfig> {
    let candidates = [
        (cli_token, AuthSource::GhCli),
        (lookup("GITHUB_TOKEN"), AuthSource::GithubToken),
        (lookup("GH_TOKEN"), AuthSource::GhToken),
    ];

    candidates
        .into_iter()
        .find_map(|(token, source)| {
            let token = token?.trim().to_string();
            (!token.is_empty()).then_some(GitHubAuthConfig { token, source })
        })
        .ok_or_else(|| {
            Error::Auth(
                "No GitHub authentication found. Run `gh auth login` or set GITHUB_TOKEN"
                    .to_string(),
            )
        })
}

async fn gh_cli_token() -> Option<String> {
    let status = Command::new("gh")
        .args(["auth", "status"])
        .output()
        .await
        .ok()?;

    if !status.status.success() {
        debug!("gh CLI not authenticated");
        return None;
    }

    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}

/// Check the token against `api_url` and return the account login
pub async fn verify_github_auth(config: &GitHubAuthConfig, api_url: &str) -> Result<String> {
    let octocrab = octocrab::Octocrab::builder()
        .base_uri(api_url)
        .map_err(|e| Error::GitHubApi(e.to_string()))?
        .personal_token(config.token.clone())
        .build()
        .map_err(|e| Error::GitHubApi(e.to_string()))?;

    let user = octocrab
        .current()
        .user()
        .await
        .map_err(|e| Error::Auth(format!("Invalid token: {e}")))?;

    Ok(user.login)
}
