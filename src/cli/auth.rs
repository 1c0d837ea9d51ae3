//! Auth command - test and describe authentication

use crate::cli::style::Stylize;
use anstream::println;
use clap::Subcommand;
use workflow_studio::auth::{get_github_auth, verify_github_auth};
use workflow_studio::error::Result;

/// `wfstudio auth` actions
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

/// Run an auth action
pub async fn run_auth(action: AuthAction, api_url: &str) -> Result<()> {
    match action {
        AuthAction::Test => run_auth_test(api_url).await,
        AuthAction::Setup => {
            run_auth_setup();
            Ok(())
        }
    }
}

async fn run_auth_test(api_url: &str) -> Result<()> {
    println!("Testing GitHub authentication...");
    let config = get_github_auth().await?;
    let username = verify_github_auth(&config, api_url).await?;
    println!("{} as {}", "Authenticated".success(), username.accent());
    println!("Token source: {}", config.source.muted());
    Ok(())
}

fn run_auth_setup() {
    println!("{}", "GitHub Authentication Setup".emphasis());
    println!();
    println!("Option 1: GitHub CLI (recommended)");
    println!("  Install: https://cli.github.com/");
    println!("  Run: gh auth login");
    println!();
    println!("Option 2: Environment variable");
    println!("  Set GITHUB_TOKEN or GH_TOKEN");
    println!();
    println!("For GitHub Enterprise:");
    println!("  Set GH_HOST to your instance hostname");
    println!("  Set GITHUB_API_URL to its API root");
}
