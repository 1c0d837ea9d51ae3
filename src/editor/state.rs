//! Editor application state

use crate::codec::{display_name_from_path, serialize};
use crate::error::{Error, Result};
use crate::types::{PublishRequest, Step, WorkflowDocument, WorkflowFile};

/// Path used when nothing else names the target file
pub const DEFAULT_TARGET_PATH: &str = ".github/workflows/ci.yml";

/// Path given to text imported without an open workflow
pub const IMPORTED_TARGET_PATH: &str = ".github/workflows/imported.yml";

/// Message shown to the user after the last action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    /// Human-readable message
    pub message: String,
    /// Whether the message reports a failure
    pub is_error: bool,
}

impl Status {
    /// Informational status
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    /// Error status
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Optional publish fields collected from the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishForm {
    /// Requested branch name
    pub branch_name: Option<String>,
    /// Commit message override
    pub commit_message: Option<String>,
    /// PR title override
    pub pr_title: Option<String>,
    /// PR body override
    pub pr_body: Option<String>,
}

/// Everything the editor knows between two messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    /// Workflows available for editing
    pub workflows: Vec<WorkflowFile>,
    /// Index into `workflows` of the open workflow
    pub active_workflow: Option<usize>,
    /// Steps on the canvas, in execution order
    pub steps: Vec<Step>,
    /// Index into `steps` of the step being edited
    pub selected_step: Option<usize>,
    /// Repository path the workflow will be written to
    pub target_path: String,
    /// Current workflow text
    pub text: String,
    /// Result of the last action
    pub status: Status,
}

impl EditorState {
    /// Workflow currently open, if any
    pub fn active(&self) -> Option<&WorkflowFile> {
        self.active_workflow.and_then(|i| self.workflows.get(i))
    }

    /// Canvas steps as a document named after the open workflow
    pub fn document(&self) -> WorkflowDocument {
        let file_name = self.active().map_or("workflow.yml", |w| w.name.as_str());
        WorkflowDocument::new(display_name_from_path(file_name), self.steps.clone())
    }

    /// Workflow text regenerated from the canvas
    pub fn generated_text(&self) -> String {
        serialize(&self.document())
    }

    /// Build the publish inputs for the open workflow
    ///
    /// Uses the current text, or freshly generated text when it is blank.
    pub fn publish_request(&self, form: &PublishForm) -> Result<PublishRequest> {
        if self.active().is_none() {
            return Err(Error::MalformedInput(
                "Load or create a workflow first".to_string(),
            ));
        }

        let text = if self.text.trim().is_empty() {
            self.generated_text()
        } else {
            self.text.clone()
        };
        let target_path = match self.target_path.trim() {
            "" => DEFAULT_TARGET_PATH,
            path => path,
        };

        Ok(PublishRequest::new(target_path, text)
            .with_branch(form.branch_name.clone().filter(|b| !b.trim().is_empty()))
            .with_commit_message(form.commit_message.clone())
            .with_pr_title(form.pr_title.clone())
            .with_pr_body(form.pr_body.clone()))
    }
}
