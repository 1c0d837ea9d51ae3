//! Mock remote host for testing
//!
//! These are test utilities - not all may be used by every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use workflow_studio::error::{Error, Result};
use workflow_studio::platform::{ClientFactory, RemoteRepoClient};
use workflow_studio::types::{
    BranchRef, DirectoryEntry, FileWrite, NewPullRequest, PullRequest, RemoteFile, RepoLocator,
    RepositoryInfo,
};

/// Operations of [`RemoteRepoClient`], for error injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    GetRepository,
    GetBranchRef,
    CreateBranchRef,
    ListDirectory,
    GetFile,
    PutFile,
    CreatePullRequest,
}

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetRepository,
    GetBranchRef(String),
    CreateBranchRef { branch: String, sha: String },
    ListDirectory(String),
    GetFile { path: String, git_ref: Option<String> },
    PutFile(FileWrite),
    CreatePullRequest(NewPullRequest),
}

/// Hand-written mock of the remote host
///
/// Features:
/// - Call tracking for verification
/// - Existing branches and files
/// - Scripted branch-name conflicts
/// - Error injection per operation
pub struct MockRemoteClient {
    default_branch: String,
    base_sha: String,
    branches: Mutex<HashSet<String>>,
    files: Mutex<HashMap<String, RemoteFile>>,
    directory: Mutex<Option<Vec<DirectoryEntry>>>,
    conflicts_remaining: Mutex<usize>,
    failures: Mutex<HashMap<Op, (u16, String)>>,
    calls: Mutex<Vec<Call>>,
}

impl Default for MockRemoteClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRemoteClient {
    /// Repository with a `main` branch and no files
    pub fn new() -> Self {
        Self {
            default_branch: "main".to_string(),
            base_sha: "base-sha-123".to_string(),
            branches: Mutex::new(HashSet::from(["main".to_string()])),
            files: Mutex::new(HashMap::new()),
            directory: Mutex::new(None),
            conflicts_remaining: Mutex::new(0),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn base_sha(&self) -> &str {
        &self.base_sha
    }

    // === Setup ===

    /// Add a file visible on every branch
    pub fn add_file(&self, path: &str, sha: &str, content: &str) {
        self.files.lock().unwrap().insert(
            path.to_string(),
            RemoteFile {
                path: path.to_string(),
                content_hash: Some(sha.to_string()),
                content: Some(content.to_string()),
            },
        );
    }

    /// Set the workflows directory listing (absent means 404)
    pub fn set_directory(&self, entries: Vec<DirectoryEntry>) {
        *self.directory.lock().unwrap() = Some(entries);
    }

    /// Mark a branch name as taken
    pub fn add_branch(&self, name: &str) {
        self.branches.lock().unwrap().insert(name.to_string());
    }

    /// Reject the next `n` branch creations as conflicts
    pub fn conflict_next(&self, n: usize) {
        *self.conflicts_remaining.lock().unwrap() = n;
    }

    /// Make `op` fail with a remote status
    pub fn fail(&self, op: Op, status: u16, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, (status, message.to_string()));
    }

    // === Verification ===

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Branch names passed to `create_branch_ref`, in order
    pub fn branch_attempts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateBranchRef { branch, .. } => Some(branch),
                _ => None,
            })
            .collect()
    }

    pub fn put_calls(&self) -> Vec<FileWrite> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::PutFile(w) => Some(w),
                _ => None,
            })
            .collect()
    }

    pub fn pr_calls(&self) -> Vec<NewPullRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreatePullRequest(pr) => Some(pr),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn injected(&self, op: Op) -> Result<()> {
        match self.failures.lock().unwrap().get(&op) {
            Some((404, message)) => Err(Error::RemoteNotFound {
                message: message.clone(),
            }),
            Some((status, message)) => Err(Error::RemoteRejected {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteRepoClient for MockRemoteClient {
    async fn get_repository(&self, _repo: &RepoLocator) -> Result<RepositoryInfo> {
        self.record(Call::GetRepository);
        self.injected(Op::GetRepository)?;
        Ok(RepositoryInfo {
            default_branch: self.default_branch.clone(),
        })
    }

    async fn get_branch_ref(&self, _repo: &RepoLocator, branch: &str) -> Result<BranchRef> {
        self.record(Call::GetBranchRef(branch.to_string()));
        self.injected(Op::GetBranchRef)?;
        if !self.branches.lock().unwrap().contains(branch) {
            return Err(Error::RemoteNotFound {
                message: "Not Found".to_string(),
            });
        }
        Ok(BranchRef {
            name: branch.to_string(),
            base_commit_sha: self.base_sha.clone(),
        })
    }

    async fn create_branch_ref(
        &self,
        _repo: &RepoLocator,
        branch: &str,
        sha: &str,
    ) -> Result<BranchRef> {
        self.record(Call::CreateBranchRef {
            branch: branch.to_string(),
            sha: sha.to_string(),
        });
        self.injected(Op::CreateBranchRef)?;

        let scripted = {
            let mut remaining = self.conflicts_remaining.lock().unwrap();
            let hit = *remaining > 0;
            *remaining = remaining.saturating_sub(1);
            hit
        };
        if scripted || !self.branches.lock().unwrap().insert(branch.to_string()) {
            return Err(Error::RemoteConflict {
                status: 422,
                branch: branch.to_string(),
                message: "Reference already exists".to_string(),
            });
        }

        Ok(BranchRef {
            name: branch.to_string(),
            base_commit_sha: sha.to_string(),
        })
    }

    async fn list_directory(&self, _repo: &RepoLocator, path: &str) -> Result<Vec<DirectoryEntry>> {
        self.record(Call::ListDirectory(path.to_string()));
        self.injected(Op::ListDirectory)?;
        self.directory
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::RemoteNotFound {
                message: "Not Found".to_string(),
            })
    }

    async fn get_file(
        &self,
        _repo: &RepoLocator,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<RemoteFile> {
        self.record(Call::GetFile {
            path: path.to_string(),
            git_ref: git_ref.map(ToString::to_string),
        });
        self.injected(Op::GetFile)?;
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::RemoteNotFound {
                message: "Not Found".to_string(),
            })
    }

    async fn put_file(&self, _repo: &RepoLocator, write: &FileWrite) -> Result<RemoteFile> {
        self.record(Call::PutFile(write.clone()));
        self.injected(Op::PutFile)?;
        Ok(RemoteFile {
            path: write.path.clone(),
            content_hash: Some("new-sha".to_string()),
            content: None,
        })
    }

    async fn create_pull_request(
        &self,
        repo: &RepoLocator,
        pr: &NewPullRequest,
    ) -> Result<PullRequest> {
        self.record(Call::CreatePullRequest(pr.clone()));
        self.injected(Op::CreatePullRequest)?;
        Ok(PullRequest {
            number: 7,
            html_url: format!("https://github.com/{}/{}/pull/7", repo.owner, repo.name),
            base_ref: pr.base.clone(),
            head_ref: pr.head.clone(),
            title: pr.title.clone(),
        })
    }
}

/// Factory handing out one shared mock and recording the tokens it was given
pub struct MockClientFactory {
    pub client: Arc<MockRemoteClient>,
    tokens: Mutex<Vec<Option<String>>>,
}

impl MockClientFactory {
    pub fn new(client: Arc<MockRemoteClient>) -> Self {
        Self {
            client,
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().unwrap().clone()
    }
}

impl ClientFactory for MockClientFactory {
    fn remote_client(&self, token: Option<&str>) -> Arc<dyn RemoteRepoClient> {
        self.tokens
            .lock()
            .unwrap()
            .push(token.map(ToString::to_string));
        self.client.clone()
    }
}
