//! Workflow text to step model
//!
//! A single pass over tokenized lines, driven by an explicit scanner state.
//! Parsing is total: unrecognized lines are skipped and the worst outcome is
//! an empty step list.

use crate::codec::token::{BlockHeader, Chomp, Line, Token, block_header, indentation, tokenize};
use crate::types::{Step, WorkflowDocument};

/// Name given to a step opened by `- uses:`
pub const ACTION_STEP_NAME: &str = "Action step";

/// Name given to a step opened by `- run:`
pub const RUN_STEP_NAME: &str = "Run command";

/// Display name used when the text has no top-level `name:`
pub const DEFAULT_DISPLAY_NAME: &str = "workflow";

/// Scanner state between lines
enum ScanState<'a> {
    /// No step has been opened yet
    Seeking,
    /// A step is open and accepts continuation lines
    InStep(Step),
    /// Collecting the lines of a `run: |` block for the open step
    InRunBlock {
        step: Step,
        key_column: usize,
        header: BlockHeader,
        lines: Vec<&'a str>,
    },
}

struct Scanner<'a> {
    state: ScanState<'a>,
    steps: Vec<Step>,
    display_name: Option<String>,
}

impl<'a> Scanner<'a> {
    const fn new() -> Self {
        Self {
            state: ScanState::Seeking,
            steps: Vec::new(),
            display_name: None,
        }
    }

    fn feed(&mut self, line: Line<'a>) {
        let state = std::mem::replace(&mut self.state, ScanState::Seeking);
        self.state = match state {
            ScanState::InRunBlock {
                step,
                key_column,
                header,
                mut lines,
            } if line.token == Token::Blank || line.indent > key_column => {
                lines.push(line.raw);
                ScanState::InRunBlock {
                    step,
                    key_column,
                    header,
                    lines,
                }
            }
            ScanState::InRunBlock {
                mut step,
                key_column,
                header,
                lines,
            } => {
                step.run = join_block(&lines, header, key_column);
                self.dispatch(ScanState::InStep(step), line)
            }
            other => self.dispatch(other, line),
        };
    }

    fn dispatch(&mut self, state: ScanState<'a>, line: Line<'a>) -> ScanState<'a> {
        match (line.token, state) {
            (Token::StepName(name), state) => {
                self.flush(state);
                ScanState::InStep(Step {
                    name: name.to_string(),
                    ..Step::default()
                })
            }
            (Token::StepUses(uses), state) => {
                self.flush(state);
                ScanState::InStep(Step::action(ACTION_STEP_NAME, uses))
            }
            (Token::StepRun(run), state) => {
                self.flush(state);
                open_run(Step::command(RUN_STEP_NAME, run), &line)
            }
            (Token::Uses(uses), ScanState::InStep(mut step)) => {
                step.uses = uses.to_string();
                ScanState::InStep(step)
            }
            (Token::Run(run), ScanState::InStep(mut step)) => {
                step.run = run.to_string();
                open_run(step, &line)
            }
            (Token::WorkflowName(name), state) => {
                if self.display_name.is_none() {
                    self.display_name = Some(name.to_string());
                }
                state
            }
            (_, state) => state,
        }
    }

    fn flush(&mut self, state: ScanState<'a>) {
        match state {
            ScanState::Seeking => {}
            ScanState::InStep(step) => self.steps.push(step),
            ScanState::InRunBlock {
                mut step,
                key_column,
                header,
                lines,
            } => {
                step.run = join_block(&lines, header, key_column);
                self.steps.push(step);
            }
        }
    }

    fn finish(mut self) -> WorkflowDocument {
        let state = std::mem::replace(&mut self.state, ScanState::Seeking);
        self.flush(state);
        WorkflowDocument {
            display_name: self
                .display_name
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
            steps: self.steps,
        }
    }
}

/// Enter block collection when the step's `run` value is a block indicator
fn open_run<'a>(mut step: Step, line: &Line<'a>) -> ScanState<'a> {
    match block_header(&step.run) {
        Some(header) => {
            step.run.clear();
            ScanState::InRunBlock {
                step,
                key_column: line.key_column(),
                header,
                lines: Vec::new(),
            }
        }
        None => ScanState::InStep(step),
    }
}

/// Dedent and chomp collected block lines
///
/// Content indentation comes from the header when given, otherwise from the
/// first line with non-space content. Leading empty lines are kept.
fn join_block(lines: &[&str], header: BlockHeader, key_column: usize) -> String {
    let base = header.indent.map_or_else(
        || {
            lines
                .iter()
                .find(|l| !l.trim().is_empty())
                .map_or(usize::MAX, |l| indentation(l))
        },
        |n| key_column + n,
    );

    let dedented: Vec<&str> = lines
        .iter()
        .map(|l| &l[base.min(indentation(l))..])
        .collect();

    let body = match header.chomp {
        Chomp::Keep => &dedented[..],
        Chomp::Strip => {
            let end = dedented
                .iter()
                .rposition(|l| !l.is_empty())
                .map_or(0, |i| i + 1);
            &dedented[..end]
        }
    };

    if header.folded {
        body.split(|l| l.is_empty())
            .map(|paragraph| paragraph.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        body.join("\n")
    }
}

/// Parse workflow text into a document
///
/// Never fails. Callers treat an empty `steps` list as "no usable content".
pub fn parse(text: &str) -> WorkflowDocument {
    let mut scanner = Scanner::new();
    for line in tokenize(text) {
        scanner.feed(line);
    }
    scanner.finish()
}
