//! wfstudio - visual CI workflow editor backend
//!
//! Serves the editor API and exposes the codec and publish flow on the
//! command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use workflow_studio::config::ServerConfig;
use workflow_studio::platform::DEFAULT_API_URL;

mod cli;

#[derive(Parser)]
#[command(name = "wfstudio")]
#[command(about = "Edit CI workflows and publish them as pull requests")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve(ServerConfig),

    /// Parse workflow text and print the steps as JSON
    Parse {
        /// Workflow file, `-` for stdin
        input: PathBuf,
    },

    /// Generate workflow text from a JSON document or step array
    Generate {
        /// JSON file, `-` for stdin
        input: PathBuf,

        /// Workflow display name
        #[arg(long)]
        name: Option<String>,
    },

    /// Commit a workflow file on a new branch and open a pull request
    Publish(cli::PublishArgs),

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: cli::AuthAction,

        /// GitHub REST API root
        #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "info,workflow_studio=debug,wfstudio=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Serve(config) => workflow_studio::server::serve(config).await?,
        Commands::Parse { input } => cli::run_parse(&input)?,
        Commands::Generate { input, name } => cli::run_generate(&input, name.as_deref())?,
        Commands::Publish(args) => cli::run_publish(args).await?,
        Commands::Auth { action, api_url } => cli::run_auth(action, &api_url).await?,
    }

    Ok(())
}
