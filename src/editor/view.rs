//! Editor projection for rendering

use crate::editor::{EditorState, Status};
use serde::Serialize;

/// Detail shown for a step with neither action nor command
pub const EMPTY_STEP_DETAIL: &str = "(empty step)";

/// One canvas node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    /// `"<n>. <name>"`, numbered from 1
    pub label: String,
    /// Action reference, else command, else [`EMPTY_STEP_DETAIL`]
    pub detail: String,
    /// Whether the step is selected
    pub selected: bool,
}

/// Render-ready snapshot of the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    /// Paths of the available workflows
    pub workflow_paths: Vec<String>,
    /// Index of the open workflow
    pub active_workflow: Option<usize>,
    /// Canvas nodes
    pub steps: Vec<StepView>,
    /// Target path field
    pub target_path: String,
    /// Text output field
    pub text: String,
    /// Status line
    pub status: String,
    /// Whether the status line reports a failure
    pub status_is_error: bool,
}

/// Project `state` for rendering
pub fn view(state: &EditorState) -> EditorView {
    let steps = state
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let detail = [&step.uses, &step.run]
                .into_iter()
                .find(|s| !s.is_empty())
                .map_or_else(|| EMPTY_STEP_DETAIL.to_string(), Clone::clone);
            StepView {
                label: format!("{}. {}", i + 1, step.name),
                detail,
                selected: state.selected_step == Some(i),
            }
        })
        .collect();

    let Status { message, is_error } = &state.status;

    EditorView {
        workflow_paths: state.workflows.iter().map(|w| w.path.clone()).collect(),
        active_workflow: state.active_workflow,
        steps,
        target_path: state.target_path.clone(),
        text: state.text.clone(),
        status: message.clone(),
        status_is_error: *is_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Step;

    #[test]
    fn test_step_detail_precedence() {
        let state = EditorState {
            steps: vec![
                Step {
                    name: "Both".to_string(),
                    uses: "actions/checkout@v4".to_string(),
                    run: "echo hi".to_string(),
                },
                Step::command("Test", "npm test"),
                Step::default(),
            ],
            selected_step: Some(1),
            ..EditorState::default()
        };

        let rendered = view(&state);
        let details: Vec<_> = rendered.steps.iter().map(|s| s.detail.as_str()).collect();
        assert_eq!(details, ["actions/checkout@v4", "npm test", EMPTY_STEP_DETAIL]);
        assert_eq!(rendered.steps[1].label, "2. Test");
        assert!(rendered.steps[1].selected);
        assert!(!rendered.steps[0].selected);
    }
}
