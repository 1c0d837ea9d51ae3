//! Step model to workflow text

use crate::codec::parse::DEFAULT_DISPLAY_NAME;
use crate::codec::token::is_block_indicator;
use crate::types::{Step, UNNAMED_STEP, WorkflowDocument};
use std::fmt::Write;

const HEADER_TRIGGERS: &str = "\
on:
  push:
    branches: [main]
  pull_request:
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
";

const STEP_INDENT: &str = "      ";
const FIELD_INDENT: &str = "        ";
const BLOCK_INDENT: &str = "          ";

/// Emitted in place of an empty step list so the job stays valid
pub const PLACEHOLDER_STEP: &str = "      - name: Hello\n        run: echo \"Hello from workflow-studio\"\n";

/// Render a document as workflow text
///
/// Output is deterministic: a fixed header, then one block per step in
/// order. Empty `uses`/`run` fields are omitted. Line breaks in the display
/// name, step names and `uses` are folded to single spaces; `run` keeps its
/// exact text through a block scalar whenever a plain value would lose any.
pub fn serialize(document: &WorkflowDocument) -> String {
    let display_name = single_line(&document.display_name);
    let display_name = if display_name.is_empty() {
        DEFAULT_DISPLAY_NAME
    } else {
        display_name.as_str()
    };

    let mut out = format!("name: {display_name}\n{HEADER_TRIGGERS}");

    if document.steps.is_empty() {
        out.push_str(PLACEHOLDER_STEP);
        return out;
    }

    for step in &document.steps {
        write_step(&mut out, step);
    }
    out
}

fn write_step(out: &mut String, step: &Step) {
    let name = single_line(&step.name);
    let name = if name.is_empty() { UNNAMED_STEP } else { name.as_str() };
    let _ = writeln!(out, "{STEP_INDENT}- name: {name}");

    let uses = single_line(&step.uses);
    if !uses.is_empty() {
        let _ = writeln!(out, "{FIELD_INDENT}uses: {uses}");
    }
    if !step.run.is_empty() {
        write_run(out, &step.run);
    }
}

fn write_run(out: &mut String, run: &str) {
    let plain = !run.contains('\n') && run.trim() == run && !is_block_indicator(run);
    if plain {
        let _ = writeln!(out, "{FIELD_INDENT}run: {run}");
        return;
    }

    // Auto-detected indentation would swallow leading spaces of the first line.
    let first_content = run.split('\n').find(|l| !l.trim().is_empty());
    let indent = if first_content.is_none_or(|l| l.starts_with(' ')) {
        "2"
    } else {
        ""
    };
    let chomp = if run.ends_with('\n') { "+" } else { "" };

    let _ = writeln!(out, "{FIELD_INDENT}run: |{indent}{chomp}");
    for line in run.split('\n') {
        if line.is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "{BLOCK_INDENT}{line}");
        }
    }
}

/// Join the lines of a one-line field, dropping line breaks
fn single_line(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Workflow display name derived from a file path
///
/// `".github/workflows/ci.yml"` becomes `"ci"`.
pub fn display_name_from_path(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let lower = file_name.to_ascii_lowercase();
    let stem_len = if lower.ends_with(".yaml") {
        file_name.len() - ".yaml".len()
    } else if lower.ends_with(".yml") {
        file_name.len() - ".yml".len()
    } else {
        file_name.len()
    };
    file_name[..stem_len].to_string()
}
