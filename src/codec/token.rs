//! Line tokenizer for the workflow step grammar
//!
//! Each line is classified on its own; the parser decides what the token
//! means given the current state. Step-opening markers take precedence over
//! continuations, which take precedence over the workflow name.

/// Classification of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Unindented `name:` line
    WorkflowName(&'a str),
    /// `- name:` opens a named step
    StepName(&'a str),
    /// `- uses:` opens an action step
    StepUses(&'a str),
    /// `- run:` opens a command step
    StepRun(&'a str),
    /// `uses:` updates the open step
    Uses(&'a str),
    /// `run:` updates the open step
    Run(&'a str),
    /// Whitespace only
    Blank,
    /// Anything the grammar does not recognize
    Other,
}

/// A tokenized line with its indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Leading spaces before the first non-space character
    pub indent: usize,
    /// Line text without its terminator
    pub raw: &'a str,
    /// Token for the line
    pub token: Token<'a>,
}

impl Line<'_> {
    /// Column at which a value's key starts
    ///
    /// For `- run:` this is the column after the dash, so block content must
    /// be indented deeper than the key itself, not just the dash.
    pub const fn key_column(&self) -> usize {
        match self.token {
            Token::StepName(_) | Token::StepUses(_) | Token::StepRun(_) => self.indent + 2,
            _ => self.indent,
        }
    }
}

#[derive(Clone, Copy)]
enum Marker {
    StepName,
    StepUses,
    StepRun,
    Uses,
    Run,
}

// Order matters: `- uses:` must be tried before `uses:`.
const MARKERS: [(&str, Marker); 5] = [
    ("- name:", Marker::StepName),
    ("- uses:", Marker::StepUses),
    ("- run:", Marker::StepRun),
    ("uses:", Marker::Uses),
    ("run:", Marker::Run),
];

/// Classify one line
pub fn tokenize_line(raw: &str) -> Token<'_> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Token::Blank;
    }

    for (prefix, marker) in MARKERS {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            let value = rest.trim();
            return match marker {
                Marker::StepName => Token::StepName(value),
                Marker::StepUses => Token::StepUses(value),
                Marker::StepRun => Token::StepRun(value),
                Marker::Uses => Token::Uses(value),
                Marker::Run => Token::Run(value),
            };
        }
    }

    if let Some(rest) = raw.strip_prefix("name:") {
        return Token::WorkflowName(rest.trim());
    }

    Token::Other
}

/// Tokenize every line of `text`
pub fn tokenize(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.lines().map(|raw| Line {
        indent: indentation(raw),
        raw,
        token: tokenize_line(raw),
    })
}

/// Number of leading spaces
pub fn indentation(raw: &str) -> usize {
    raw.len() - raw.trim_start_matches(' ').len()
}

/// How a block scalar treats its trailing line breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chomp {
    /// `|` or `|-`: trailing empty lines are dropped
    Strip,
    /// `|+`: trailing empty lines are kept, one line break each
    Keep,
}

/// Parsed block scalar indicator such as `|`, `>-` or `|2+`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// `>` folds lines into paragraphs
    pub folded: bool,
    /// Trailing line handling
    pub chomp: Chomp,
    /// Content indentation relative to the key, when given explicitly
    pub indent: Option<usize>,
}

/// Parse a `run:` value as a block scalar indicator
pub fn block_header(value: &str) -> Option<BlockHeader> {
    let mut chars = value.chars();
    let folded = match chars.next()? {
        '|' => false,
        '>' => true,
        _ => return None,
    };

    let mut header = BlockHeader {
        folded,
        chomp: Chomp::Strip,
        indent: None,
    };
    for c in chars {
        match c {
            '+' => header.chomp = Chomp::Keep,
            '-' => header.chomp = Chomp::Strip,
            '1'..='9' => header.indent = c.to_digit(10).map(|d| d as usize),
            _ => return None,
        }
    }
    Some(header)
}

/// Whether a `run:` value introduces a block scalar (`|`, `>-`, `|2`, ...)
pub fn is_block_indicator(value: &str) -> bool {
    block_header(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_markers() {
        assert_eq!(
            tokenize_line("      - name: Checkout"),
            Token::StepName("Checkout")
        );
        assert_eq!(
            tokenize_line("  - uses: actions/checkout@v4"),
            Token::StepUses("actions/checkout@v4")
        );
        assert_eq!(tokenize_line("- run: npm test  "), Token::StepRun("npm test"));
    }

    #[test]
    fn test_continuations() {
        assert_eq!(
            tokenize_line("        uses: actions/setup-node@v4"),
            Token::Uses("actions/setup-node@v4")
        );
        assert_eq!(tokenize_line("        run: npm ci"), Token::Run("npm ci"));
    }

    #[test]
    fn test_runs_on_is_not_a_run_continuation() {
        assert_eq!(tokenize_line("    runs-on: ubuntu-latest"), Token::Other);
    }

    #[test]
    fn test_workflow_name_requires_no_indent() {
        assert_eq!(tokenize_line("name: CI"), Token::WorkflowName("CI"));
        assert_eq!(tokenize_line("          name: artifact"), Token::Other);
    }

    #[test]
    fn test_blank_and_other() {
        assert_eq!(tokenize_line("   "), Token::Blank);
        assert_eq!(tokenize_line("on:"), Token::Other);
        assert_eq!(tokenize_line("garbage"), Token::Other);
    }

    #[test]
    fn test_key_column() {
        let line = tokenize("      - run: |").next().unwrap();
        assert_eq!(line.indent, 6);
        assert_eq!(line.key_column(), 8);

        let line = tokenize("        run: |").next().unwrap();
        assert_eq!(line.key_column(), 8);
    }

    #[test]
    fn test_block_indicators() {
        for value in ["|", "|-", "|+", ">", ">-", "|2"] {
            assert!(is_block_indicator(value), "{value}");
        }
        for value in ["", "npm test", "| tee out.log", "echo >"] {
            assert!(!is_block_indicator(value), "{value}");
        }
        assert!(!is_block_indicator("|0"));
    }

    #[test]
    fn test_block_header() {
        assert_eq!(
            block_header("|"),
            Some(BlockHeader {
                folded: false,
                chomp: Chomp::Strip,
                indent: None,
            })
        );
        assert_eq!(
            block_header("|2+"),
            Some(BlockHeader {
                folded: false,
                chomp: Chomp::Keep,
                indent: Some(2),
            })
        );
        let folded = block_header(">-").unwrap();
        assert!(folded.folded);
        assert_eq!(folded.chomp, Chomp::Strip);
    }
}
