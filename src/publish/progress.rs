//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, HTTP server) to observe a
//! publish attempt as it moves through its states.

use crate::error::Error;
use crate::publish::PublishOutcome;
use async_trait::async_trait;
use std::fmt;
use tracing::{info, warn};

/// Publish phase, one per orchestrator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Parsing the repository locator
    ResolvingRepo,
    /// Reading the default branch and its head commit
    FetchingBaseRef,
    /// Creating the working branch
    CreatingBranch,
    /// Retrying branch creation under a disambiguated name
    BranchConflictRetry,
    /// Looking up the target file on the new branch
    CheckingExistingFile,
    /// Committing the file
    WritingFile,
    /// Opening the pull request
    OpeningPullRequest,
    /// Pull request opened
    Done,
    /// Publish aborted
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ResolvingRepo => "Resolving repository",
            Self::FetchingBaseRef => "Fetching base branch",
            Self::CreatingBranch => "Creating branch",
            Self::BranchConflictRetry => "Retrying branch creation",
            Self::CheckingExistingFile => "Checking existing file",
            Self::WritingFile => "Writing file",
            Self::OpeningPullRequest => "Opening pull request",
            Self::Done => "Done",
            Self::Failed => "Failed",
        };
        f.write_str(label)
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during a publish.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called once the pull request is open
    async fn on_published(&self, outcome: &PublishOutcome);

    /// Called when the attempt fails
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_published(&self, _outcome: &PublishOutcome) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}

/// Progress callback that writes to the tracing subscriber
pub struct TracingProgress;

#[async_trait]
impl ProgressCallback for TracingProgress {
    async fn on_phase(&self, phase: Phase) {
        info!(%phase, "publish phase");
    }

    async fn on_published(&self, outcome: &PublishOutcome) {
        info!(
            pr = outcome.pr_number,
            url = %outcome.pr_url,
            branch = %outcome.branch,
            "pull request opened"
        );
    }

    async fn on_error(&self, error: &Error) {
        warn!(%error, "publish failed");
    }

    async fn on_message(&self, message: &str) {
        info!("{message}");
    }
}
