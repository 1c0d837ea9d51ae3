//! Editor transitions
//!
//! [`update`] is pure: it takes the previous state and one message and
//! returns the next state. Rendering is left to [`view`](super::view).

use crate::codec::parse;
use crate::editor::state::{DEFAULT_TARGET_PATH, IMPORTED_TARGET_PATH};
use crate::editor::{EditorState, Status};
use crate::types::{Step, UNNAMED_STEP, WorkflowFile};

/// One user action or async result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Workflows fetched from a repository
    WorkflowsLoaded(Vec<WorkflowFile>),
    /// Open the workflow at this index
    SelectWorkflow(usize),
    /// Begin an empty `ci.yml`
    StartFromScratch,
    /// Parse pasted or uploaded text onto the canvas
    ImportText {
        /// Workflow text
        text: String,
        /// Where the text came from, for status messages
        source: String,
    },
    /// Append a step (from the palette or a search result)
    AddStep(Step),
    /// Select the step at this index for editing
    SelectStep(usize),
    /// Replace the fields of the selected step
    SaveStep {
        /// New name
        name: String,
        /// New action reference
        uses: String,
        /// New command
        run: String,
    },
    /// Remove the selected step
    DeleteStep,
    /// Regenerate the text from the canvas
    GenerateText,
}

/// Apply `msg` to `state`
#[must_use]
pub fn update(mut state: EditorState, msg: Msg) -> EditorState {
    match msg {
        Msg::WorkflowsLoaded(workflows) => {
            state.workflows = workflows;
            if state.workflows.is_empty() {
                state.active_workflow = None;
                state.steps.clear();
                state.selected_step = None;
                state.text.clear();
                state.target_path = DEFAULT_TARGET_PATH.to_string();
                state.status = Status::info("No workflows found. You can start from scratch.");
            } else {
                let count = state.workflows.len();
                state = open_workflow(state, 0);
                state.status = Status::info(format!("Loaded {count} workflow file(s)"));
            }
        }

        Msg::SelectWorkflow(index) => {
            if index < state.workflows.len() {
                state = open_workflow(state, index);
            }
        }

        Msg::StartFromScratch => {
            state.workflows = vec![WorkflowFile {
                name: "ci.yml".to_string(),
                path: DEFAULT_TARGET_PATH.to_string(),
                content_hash: None,
                content: String::new(),
            }];
            state = open_workflow(state, 0);
            state.text = state.generated_text();
            state.status = Status::info("Started a new workflow from scratch");
        }

        Msg::ImportText { text, source } => {
            let steps = parse(&text).steps;
            if steps.is_empty() {
                state.status = Status::error(format!("No steps found in {source}"));
                return state;
            }

            if state.active_workflow.is_none() {
                state.workflows = vec![WorkflowFile {
                    name: "imported.yml".to_string(),
                    path: IMPORTED_TARGET_PATH.to_string(),
                    content_hash: None,
                    content: text.clone(),
                }];
                state.active_workflow = Some(0);
            }

            let count = steps.len();
            state.steps = steps;
            state.selected_step = None;
            state.text = text;
            if state.target_path.is_empty() {
                state.target_path = IMPORTED_TARGET_PATH.to_string();
            }
            state.status = Status::info(format!("Parsed {count} step(s) from {source}"));
        }

        Msg::AddStep(step) => {
            state.status = Status::info(format!("Added {} to canvas", step.display_name()));
            state.steps.push(step);
        }

        Msg::SelectStep(index) => {
            if index < state.steps.len() {
                state.selected_step = Some(index);
            }
        }

        Msg::SaveStep { name, uses, run } => {
            if let Some(step) = state.selected_step.and_then(|i| state.steps.get_mut(i)) {
                let name = name.trim();
                step.name = if name.is_empty() {
                    UNNAMED_STEP.to_string()
                } else {
                    name.to_string()
                };
                step.uses = uses.trim().to_string();
                step.run = run.trim().to_string();
                state.status = Status::info("Node updated");
            }
        }

        Msg::DeleteStep => {
            if let Some(index) = state.selected_step.take() {
                if index < state.steps.len() {
                    state.steps.remove(index);
                    state.status = Status::info("Node deleted");
                }
            }
        }

        Msg::GenerateText => {
            if state.active_workflow.is_none() {
                state.status = Status::error("Load, parse, or create a workflow first");
            } else {
                state.text = state.generated_text();
                state.status = Status::info("Workflow text generated from canvas");
            }
        }
    }
    state
}

fn open_workflow(mut state: EditorState, index: usize) -> EditorState {
    let Some(workflow) = state.workflows.get(index) else {
        return state;
    };
    state.steps = parse(&workflow.content).steps;
    state.target_path = workflow.path.clone();
    state.text = workflow.content.clone();
    state.active_workflow = Some(index);
    state.selected_step = None;
    state
}
