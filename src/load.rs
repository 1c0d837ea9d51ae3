//! Workflow discovery in a remote repository

use crate::error::{Error, Result};
use crate::platform::RemoteRepoClient;
use crate::types::{DirectoryEntry, EntryKind, RepoLocator, WorkflowFile};
use serde::Serialize;
use tracing::{debug, warn};

/// Directory that holds workflow definitions
pub const WORKFLOWS_DIR: &str = ".github/workflows";

/// Workflows found in one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedWorkflows {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Whether at least one workflow file was found
    pub has_actions: bool,
    /// Workflow files in listing order
    pub workflows: Vec<WorkflowFile>,
}

impl LoadedWorkflows {
    fn empty(repo: &RepoLocator) -> Self {
        Self {
            owner: repo.owner.clone(),
            repo: repo.name.clone(),
            has_actions: false,
            workflows: Vec::new(),
        }
    }
}

/// List and fetch every workflow file of `repo`
///
/// A missing workflows directory is not an error: it yields an empty result
/// with `has_actions == false`. Files are fetched one at a time.
pub async fn load_workflows(
    client: &dyn RemoteRepoClient,
    repo: &RepoLocator,
) -> Result<LoadedWorkflows> {
    let entries = match client.list_directory(repo, WORKFLOWS_DIR).await {
        Ok(entries) => entries,
        Err(Error::RemoteNotFound { .. }) => {
            warn!(owner = %repo.owner, repo = %repo.name, "no workflows directory");
            return Ok(LoadedWorkflows::empty(repo));
        }
        Err(e) => return Err(e),
    };

    let mut workflows = Vec::new();
    for entry in entries.iter().filter(|e| is_workflow_file(e)) {
        debug!(path = %entry.path, "fetching workflow");
        let file = client.get_file(repo, &entry.path, None).await?;
        workflows.push(WorkflowFile {
            name: entry.name.clone(),
            path: entry.path.clone(),
            content_hash: file.content_hash.or_else(|| Some(entry.sha.clone())),
            content: file.content.unwrap_or_default(),
        });
    }

    Ok(LoadedWorkflows {
        owner: repo.owner.clone(),
        repo: repo.name.clone(),
        has_actions: !workflows.is_empty(),
        workflows,
    })
}

/// Whether a listing entry is a `.yml`/`.yaml` file
pub fn is_workflow_file(entry: &DirectoryEntry) -> bool {
    let name = entry.name.to_ascii_lowercase();
    entry.kind == EntryKind::File
        && (name.ends_with(".yml") || name.ends_with(".yaml"))
}
