//! Remote repository host access
//!
//! [`RemoteRepoClient`] is the seam between the publish/load flows and the
//! host's REST API, so the same flows run against GitHub or a test double.

mod detection;
mod factory;
mod github;
mod marketplace;

pub use detection::{
    GITHUB_HOST, is_supported_host, parse_repo_locator, parse_repo_locator_with_host,
};
pub use factory::{ClientFactory, GitHubClientFactory};
pub use github::{DEFAULT_API_URL, GitHubClient, USER_AGENT};
pub use marketplace::{MarketplaceClient, search_marketplace};

use crate::error::Result;
use crate::types::{
    BranchRef, DirectoryEntry, FileWrite, NewPullRequest, PullRequest, RemoteFile, RepoLocator,
    RepositoryInfo,
};
use async_trait::async_trait;

/// Authenticated operations against the remote host
///
/// Every call is a single request/response. Failures carry the remote status:
/// 404 surfaces as `RemoteNotFound`, a branch-name collision on
/// [`create_branch_ref`](Self::create_branch_ref) as `RemoteConflict`, and any
/// other non-2xx response as `RemoteRejected`.
#[async_trait]
pub trait RemoteRepoClient: Send + Sync {
    /// Read repository metadata (default branch)
    async fn get_repository(&self, repo: &RepoLocator) -> Result<RepositoryInfo>;

    /// Read the head commit of a branch
    async fn get_branch_ref(&self, repo: &RepoLocator, branch: &str) -> Result<BranchRef>;

    /// Create a branch pointing at `sha`
    async fn create_branch_ref(
        &self,
        repo: &RepoLocator,
        branch: &str,
        sha: &str,
    ) -> Result<BranchRef>;

    /// List a directory
    async fn list_directory(&self, repo: &RepoLocator, path: &str) -> Result<Vec<DirectoryEntry>>;

    /// Read a file, optionally at a specific branch or ref
    async fn get_file(
        &self,
        repo: &RepoLocator,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<RemoteFile>;

    /// Create or update a file; `write.version_hash` must match for updates
    async fn put_file(&self, repo: &RepoLocator, write: &FileWrite) -> Result<RemoteFile>;

    /// Open a pull request
    async fn create_pull_request(
        &self,
        repo: &RepoLocator,
        pr: &NewPullRequest,
    ) -> Result<PullRequest>;
}
