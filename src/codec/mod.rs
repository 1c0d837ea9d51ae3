//! Workflow text codec
//!
//! Converts between raw workflow text and [`WorkflowDocument`]. Only the
//! step-list subset this crate emits is guaranteed to round-trip; external
//! files are read on a best-effort basis.
//!
//! [`WorkflowDocument`]: crate::types::WorkflowDocument

mod parse;
mod serialize;
pub mod token;

pub use parse::{ACTION_STEP_NAME, DEFAULT_DISPLAY_NAME, RUN_STEP_NAME, parse};
pub use serialize::{PLACEHOLDER_STEP, display_name_from_path, serialize};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Step, WorkflowDocument};

    fn sample_steps() -> Vec<Step> {
        vec![
            Step::action("Checkout", "actions/checkout@v4"),
            Step::command("Test", "npm test"),
        ]
    }

    #[test]
    fn test_round_trip() {
        let doc = WorkflowDocument::new(
            "ci",
            vec![
                Step::action("Checkout", "actions/checkout@v4"),
                Step::command("Install", "npm ci"),
                Step {
                    name: "Both".to_string(),
                    uses: "owner/tool@v2".to_string(),
                    run: "tool --check".to_string(),
                },
                Step::action("Empty", ""),
                Step::command("Script", "set -e\n  indented\n\nmake"),
                Step::command("Literal pipe", "|"),
            ],
        );

        let reparsed = parse(&serialize(&doc));
        assert_eq!(reparsed.steps, doc.steps);
        assert_eq!(reparsed.display_name, "ci");
    }

    #[test]
    fn test_round_trip_preserves_exact_run_text() {
        let runs = [
            "make\n",
            "tail\n\n",
            "\nleading blank",
            "  indented first\nnext",
            " padded ",
            "   ",
            "\n",
        ];
        let steps: Vec<Step> = runs.iter().map(|run| Step::command("Run", *run)).collect();
        let doc = WorkflowDocument::new("ci", steps);

        assert_eq!(parse(&serialize(&doc)).steps, doc.steps);
    }

    #[test]
    fn test_line_breaks_in_names_keep_step_count() {
        let doc = WorkflowDocument::new(
            "ci",
            vec![
                Step::command("Build\n- name: Injected", "make"),
                Step::action("Checkout", "actions/checkout@v4\n- run: echo pwned"),
            ],
        );

        let reparsed = parse(&serialize(&doc));
        assert_eq!(
            reparsed.steps,
            vec![
                Step::command("Build - name: Injected", "make"),
                Step::action("Checkout", "actions/checkout@v4 - run: echo pwned"),
            ]
        );
    }

    #[test]
    fn test_empty_document_yields_placeholder_step() {
        let reparsed = parse(&serialize(&WorkflowDocument::new("ci", vec![])));
        assert_eq!(
            reparsed.steps,
            vec![Step::command("Hello", "echo \"Hello from workflow-studio\"")]
        );
    }

    #[test]
    fn test_checkout_and_test_scenario() {
        let text = serialize(&WorkflowDocument::new("ci", sample_steps()));

        insta::assert_snapshot!(text, @r#"
name: ci
on:
  push:
    branches: [main]
  pull_request:
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - name: Checkout
        uses: actions/checkout@v4
      - name: Test
        run: npm test
"#);

        assert_eq!(parse(&text).steps, sample_steps());
    }

    #[test]
    fn test_external_workflow_best_effort() {
        let text = r"
name: Rust

on:
  push:
    branches: [ main ]

env:
  CARGO_TERM_COLOR: always

jobs:
  build:
    runs-on: ubuntu-latest
    steps:
    - uses: actions/checkout@v4
    - name: Cache
      uses: actions/cache@v4
      with:
        path: target
        key: ${{ runner.os }}-cargo
    - name: Build
      run: cargo build --verbose
    - name: Run tests
      run: |
        cargo test --verbose
        cargo test --doc
";
        let doc = parse(text);
        assert_eq!(doc.display_name, "Rust");
        assert_eq!(
            doc.steps,
            vec![
                Step::action(ACTION_STEP_NAME, "actions/checkout@v4"),
                Step::action("Cache", "actions/cache@v4"),
                Step::command("Build", "cargo build --verbose"),
                Step::command("Run tests", "cargo test --verbose\ncargo test --doc"),
            ]
        );
    }
}
