//! `publish` command

use crate::cli::codec::read_input;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, arrow};
use anstream::{eprintln, println};
use clap::Args;
use std::path::PathBuf;
use workflow_studio::auth::get_github_auth;
use workflow_studio::codec::parse;
use workflow_studio::error::{Error, Result};
use workflow_studio::platform::{DEFAULT_API_URL, GitHubClient};
use workflow_studio::publish::publish;
use workflow_studio::types::PublishRequest;

/// Arguments of `wfstudio publish`
#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Repository URL (e.g. <https://github.com/owner/repo>)
    #[arg(long)]
    pub repo: String,

    /// Repository-relative path of the workflow file
    #[arg(long, default_value = ".github/workflows/ci.yml")]
    pub path: String,

    /// Local file with the workflow text, `-` for stdin (defaults to `--path`)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Branch name to create
    #[arg(long)]
    pub branch: Option<String>,

    /// Commit message
    #[arg(long)]
    pub message: Option<String>,

    /// Pull request title
    #[arg(long)]
    pub title: Option<String>,

    /// Pull request body
    #[arg(long)]
    pub body: Option<String>,

    /// GitHub REST API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

/// Publish a local workflow file as a pull request
pub async fn run_publish(args: PublishArgs) -> Result<()> {
    let source = args.file.unwrap_or_else(|| PathBuf::from(&args.path));
    let text = read_input(&source)?;
    if text.trim().is_empty() {
        return Err(Error::MalformedInput(format!(
            "{} is empty",
            source.display()
        )));
    }
    if parse(&text).steps.is_empty() {
        eprintln!(
            "{}: no steps found in {}",
            "warning".warn(),
            source.display().accent().for_stderr()
        );
    }

    let auth = get_github_auth().await?;
    let client = GitHubClient::new(Some(auth.token), args.api_url);

    println!("{} {} in {}", arrow(), args.path.accent(), args.repo.emphasis());

    let request = PublishRequest::new(args.path, text)
        .with_branch(args.branch)
        .with_commit_message(args.message)
        .with_pr_title(args.title)
        .with_pr_body(args.body);

    publish(&client, &args.repo, &request, &CliProgress).await?;
    Ok(())
}
