//! Core types for workflow-studio

use serde::{Deserialize, Serialize};

/// Name used when a step has no display label
pub const UNNAMED_STEP: &str = "Unnamed step";

/// One unit of work in a workflow
///
/// `uses` and `run` may both be empty (rendered as an empty step) or both
/// set; neither combination is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Step {
    /// Display label
    pub name: String,
    /// Reusable action reference (`owner/repo@ref`), empty when absent
    pub uses: String,
    /// Shell command, empty when absent
    pub run: String,
}

impl Step {
    /// Step that invokes a reusable action
    pub fn action(name: impl Into<String>, uses: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uses: uses.into(),
            run: String::new(),
        }
    }

    /// Step that runs a shell command
    pub fn command(name: impl Into<String>, run: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uses: String::new(),
            run: run.into(),
        }
    }

    /// Name to render, falling back to [`UNNAMED_STEP`]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED_STEP
        } else {
            &self.name
        }
    }
}

/// Ordered step list plus its display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDocument {
    /// Workflow display name
    pub display_name: String,
    /// Steps in execution order
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl WorkflowDocument {
    /// Create a document from a name and steps
    pub fn new(display_name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            display_name: display_name.into(),
            steps,
        }
    }
}

/// Repository coordinates parsed from a locator URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoLocator {
    /// Host name (e.g. "github.com")
    pub host: String,
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

/// Repository metadata needed before branching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// Default branch name (main/master)
    pub default_branch: String,
}

/// A branch and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    /// Branch name without the `refs/heads/` prefix
    pub name: String,
    /// Commit SHA at the head of the branch
    pub base_commit_sha: String,
}

/// A file on the remote host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    /// Repository-relative, slash-separated path
    pub path: String,
    /// Version token of the existing revision
    pub content_hash: Option<String>,
    /// Decoded file content, when fetched
    pub content: Option<String>,
}

/// Kind of entry in a directory listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Dir,
    /// Symbolic link
    Symlink,
    /// Git submodule
    Submodule,
}

/// One entry of a remote directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// File name
    pub name: String,
    /// Repository-relative path
    pub path: String,
    /// Version token
    pub sha: String,
    /// Entry kind
    pub kind: EntryKind,
}

/// Create-or-update request for a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrite {
    /// Repository-relative path
    pub path: String,
    /// New file content (UTF-8 text)
    pub content: String,
    /// Commit message
    pub message: String,
    /// Branch to commit on
    pub branch: String,
    /// Version token of the revision being replaced; `None` creates the file
    pub version_hash: Option<String>,
}

/// Pull request to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    /// PR title
    pub title: String,
    /// PR description
    pub body: String,
    /// Source branch
    pub head: String,
    /// Target branch
    pub base: String,
}

/// A pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
}

/// Inputs for one publish action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Repository-relative path of the workflow file
    pub target_path: String,
    /// Workflow text to commit
    pub text_content: String,
    /// Branch name requested by the caller
    pub desired_branch_name: Option<String>,
    /// Commit message
    pub commit_message: String,
    /// PR title
    pub pr_title: String,
    /// PR description
    pub pr_body: String,
}

/// A workflow file loaded from a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowFile {
    /// File name (e.g. "ci.yml")
    pub name: String,
    /// Repository-relative path
    pub path: String,
    /// Version token, absent for files not yet on the remote
    pub content_hash: Option<String>,
    /// Raw workflow text
    pub content: String,
}

/// A reusable action found by marketplace search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceAction {
    /// Full repository name (`owner/repo`)
    pub name: String,
    /// Reference to put in a step's `uses` field
    pub uses: String,
    /// Repository description
    pub description: String,
    /// Star count
    pub stars: u32,
    /// Repository web URL
    pub url: String,
}
