//! Publish state machine
//!
//! Each state owns exactly the data the next remote call needs, so a state
//! can only be reached once its prerequisites exist. The single permitted
//! retry is a state of its own: a conflict in [`PublishState::CreatingBranch`]
//! moves to [`PublishState::BranchConflictRetry`], and any failure there is
//! terminal.

use crate::error::Error;
use crate::platform::{RemoteRepoClient, parse_repo_locator};
use crate::publish::branch::{candidate_branch_name, disambiguate, now_millis};
use crate::publish::{Phase, PublishOutcome};
use crate::types::{BranchRef, FileWrite, NewPullRequest, PublishRequest, RepoLocator};
use tracing::{debug, info};

/// Repository and base branch shared by every state after the base lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseContext {
    /// Target repository
    pub repo: RepoLocator,
    /// Default branch the PR will target
    pub default_branch: String,
    /// Head of the default branch when the attempt started
    pub base: BranchRef,
}

/// One state of a publish attempt
#[derive(Debug)]
pub enum PublishState {
    /// Parse the repository locator
    ResolvingRepo {
        /// Locator as supplied by the caller
        repo_url: String,
    },
    /// Read the default branch and its head commit
    FetchingBaseRef {
        /// Target repository
        repo: RepoLocator,
    },
    /// First branch creation attempt
    CreatingBranch {
        /// Base context
        ctx: BaseContext,
        /// Branch name to create
        candidate: String,
    },
    /// Second and last branch creation attempt
    BranchConflictRetry {
        /// Base context
        ctx: BaseContext,
        /// Disambiguated branch name
        candidate: String,
    },
    /// Look up the target file on the new branch
    CheckingExistingFile {
        /// Base context
        ctx: BaseContext,
        /// Created branch
        branch: String,
    },
    /// Commit the file
    WritingFile {
        /// Base context
        ctx: BaseContext,
        /// Created branch
        branch: String,
        /// Version hash of the existing file, if there is one
        version_hash: Option<String>,
    },
    /// Open the pull request
    OpeningPullRequest {
        /// Base context
        ctx: BaseContext,
        /// Branch holding the commit
        branch: String,
        /// Whether the commit created the file rather than updating it
        file_created: bool,
    },
    /// Terminal success
    Done(PublishOutcome),
    /// Terminal failure
    Failed(Error),
}

impl PublishState {
    /// Initial state for a locator
    pub fn start(repo_url: impl Into<String>) -> Self {
        Self::ResolvingRepo {
            repo_url: repo_url.into(),
        }
    }

    /// Phase this state represents
    pub const fn phase(&self) -> Phase {
        match self {
            Self::ResolvingRepo { .. } => Phase::ResolvingRepo,
            Self::FetchingBaseRef { .. } => Phase::FetchingBaseRef,
            Self::CreatingBranch { .. } => Phase::CreatingBranch,
            Self::BranchConflictRetry { .. } => Phase::BranchConflictRetry,
            Self::CheckingExistingFile { .. } => Phase::CheckingExistingFile,
            Self::WritingFile { .. } => Phase::WritingFile,
            Self::OpeningPullRequest { .. } => Phase::OpeningPullRequest,
            Self::Done(_) => Phase::Done,
            Self::Failed(_) => Phase::Failed,
        }
    }

    /// Whether no further transition is possible
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_) | Self::Failed(_))
    }

    /// Perform this state's single remote call and return the next state
    ///
    /// Terminal states return themselves unchanged.
    pub async fn advance(self, client: &dyn RemoteRepoClient, request: &PublishRequest) -> Self {
        match self {
            Self::ResolvingRepo { repo_url } => match parse_repo_locator(&repo_url) {
                Ok(repo) => Self::FetchingBaseRef { repo },
                Err(e) => Self::Failed(e),
            },

            Self::FetchingBaseRef { repo } => fetch_base(client, repo, request).await,

            Self::CreatingBranch { ctx, candidate } => {
                match client
                    .create_branch_ref(&ctx.repo, &candidate, &ctx.base.base_commit_sha)
                    .await
                {
                    Ok(_) => Self::CheckingExistingFile {
                        ctx,
                        branch: candidate,
                    },
                    Err(Error::RemoteConflict { .. }) => {
                        let retry = disambiguate(&candidate, now_millis());
                        info!(taken = %candidate, retry = %retry, "branch exists, retrying once");
                        Self::BranchConflictRetry {
                            ctx,
                            candidate: retry,
                        }
                    }
                    Err(e) => Self::Failed(e),
                }
            }

            Self::BranchConflictRetry { ctx, candidate } => {
                match client
                    .create_branch_ref(&ctx.repo, &candidate, &ctx.base.base_commit_sha)
                    .await
                {
                    Ok(_) => Self::CheckingExistingFile {
                        ctx,
                        branch: candidate,
                    },
                    Err(e) => Self::Failed(e),
                }
            }

            Self::CheckingExistingFile { ctx, branch } => {
                match client
                    .get_file(&ctx.repo, &request.target_path, Some(&branch))
                    .await
                {
                    Ok(file) => Self::WritingFile {
                        ctx,
                        branch,
                        version_hash: file.content_hash,
                    },
                    Err(Error::RemoteNotFound { .. }) => {
                        debug!(path = %request.target_path, "target file is new");
                        Self::WritingFile {
                            ctx,
                            branch,
                            version_hash: None,
                        }
                    }
                    Err(e) => Self::Failed(e),
                }
            }

            Self::WritingFile {
                ctx,
                branch,
                version_hash,
            } => {
                let file_created = version_hash.is_none();
                let write = FileWrite {
                    path: request.target_path.clone(),
                    content: request.text_content.clone(),
                    message: request.commit_message.clone(),
                    branch: branch.clone(),
                    version_hash,
                };
                match client.put_file(&ctx.repo, &write).await {
                    Ok(_) => Self::OpeningPullRequest {
                        ctx,
                        branch,
                        file_created,
                    },
                    Err(e) => Self::Failed(e),
                }
            }

            Self::OpeningPullRequest {
                ctx,
                branch,
                file_created,
            } => {
                let pr = NewPullRequest {
                    title: request.pr_title.clone(),
                    body: request.pr_body.clone(),
                    head: branch.clone(),
                    base: ctx.default_branch.clone(),
                };
                match client.create_pull_request(&ctx.repo, &pr).await {
                    Ok(opened) => Self::Done(PublishOutcome {
                        pr_url: opened.html_url,
                        pr_number: opened.number,
                        branch,
                        base_branch: ctx.default_branch,
                        file_created,
                    }),
                    Err(e) => Self::Failed(e),
                }
            }

            terminal @ (Self::Done(_) | Self::Failed(_)) => terminal,
        }
    }
}

async fn fetch_base(
    client: &dyn RemoteRepoClient,
    repo: RepoLocator,
    request: &PublishRequest,
) -> PublishState {
    let info = match client.get_repository(&repo).await {
        Ok(info) => info,
        Err(e) => return PublishState::Failed(e),
    };
    let base = match client.get_branch_ref(&repo, &info.default_branch).await {
        Ok(base) => base,
        Err(e) => return PublishState::Failed(e),
    };

    PublishState::CreatingBranch {
        candidate: candidate_branch_name(request.desired_branch_name.as_deref(), now_millis()),
        ctx: BaseContext {
            repo,
            default_branch: info.default_branch,
            base,
        },
    }
}
