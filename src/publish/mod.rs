//! Publish orchestration
//!
//! Turns a workflow document into a pull request in the target repository:
//! resolve the repository, branch off the default branch, write the file,
//! and open the PR. Each step is one state of [`PublishState`].

mod branch;
mod execute;
mod progress;
mod state;

pub use branch::{BRANCH_PREFIX, candidate_branch_name, disambiguate, sanitize_branch_name};
pub use execute::publish;
pub use progress::{NoopProgress, Phase, ProgressCallback, TracingProgress};
pub use state::{BaseContext, PublishState};

use crate::types::PublishRequest;
use serde::Serialize;

/// Commit message used when the caller gives none
pub const DEFAULT_COMMIT_MESSAGE: &str = "chore: update CI workflow via workflow-studio";

/// PR title used when the caller gives none
pub const DEFAULT_PR_TITLE: &str = "Update CI workflow";

/// PR body used when the caller gives none
pub const DEFAULT_PR_BODY: &str =
    "This PR updates the workflow configuration using workflow-studio.";

/// Result of a successful publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOutcome {
    /// Web URL of the opened PR
    pub pr_url: String,
    /// PR number
    pub pr_number: u64,
    /// Branch that holds the commit
    pub branch: String,
    /// Branch the PR targets
    pub base_branch: String,
    /// Whether the file did not exist before
    pub file_created: bool,
}

impl PublishRequest {
    /// Request for `target_path` with default message, title and body
    pub fn new(target_path: impl Into<String>, text_content: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            text_content: text_content.into(),
            desired_branch_name: None,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            pr_title: DEFAULT_PR_TITLE.to_string(),
            pr_body: DEFAULT_PR_BODY.to_string(),
        }
    }

    /// Set the branch name to try first
    #[must_use]
    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.desired_branch_name = branch;
        self
    }

    /// Override the commit message, ignoring blank values
    #[must_use]
    pub fn with_commit_message(mut self, message: Option<String>) -> Self {
        if let Some(message) = non_blank(message) {
            self.commit_message = message;
        }
        self
    }

    /// Override the PR title, ignoring blank values
    #[must_use]
    pub fn with_pr_title(mut self, title: Option<String>) -> Self {
        if let Some(title) = non_blank(title) {
            self.pr_title = title;
        }
        self
    }

    /// Override the PR body, ignoring blank values
    #[must_use]
    pub fn with_pr_body(mut self, body: Option<String>) -> Self {
        if let Some(body) = non_blank(body) {
            self.pr_body = body;
        }
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
