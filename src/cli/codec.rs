//! `parse` and `generate` commands

use anstream::{print, println};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use workflow_studio::codec::{DEFAULT_DISPLAY_NAME, parse, serialize};
use workflow_studio::error::{Error, Result};
use workflow_studio::types::{Step, WorkflowDocument};

/// Read a file, or stdin when `path` is `-`
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Print the document parsed from workflow text as JSON
pub fn run_parse(input: &Path) -> Result<()> {
    let text = read_input(input)?;
    let document = parse(&text);
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateInput {
    Document(WorkflowDocument),
    Steps(Vec<Step>),
}

/// Print workflow text for a JSON document or bare step array
pub fn run_generate(input: &Path, name: Option<&str>) -> Result<()> {
    let text = read_input(input)?;
    let mut document = match serde_json::from_str(&text) {
        Ok(GenerateInput::Document(document)) => document,
        Ok(GenerateInput::Steps(steps)) => WorkflowDocument::new(DEFAULT_DISPLAY_NAME, steps),
        Err(e) => {
            return Err(Error::MalformedInput(format!(
                "expected a workflow document or step array: {e}"
            )));
        }
    };
    if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
        document.display_name = name.trim().to_string();
    }
    print!("{}", serialize(&document));
    Ok(())
}
