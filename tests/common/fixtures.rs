//! Test data factories for workflow-studio types
//!
//! These are test utilities - not all may be used by every test binary.

#![allow(dead_code)]

use workflow_studio::types::{DirectoryEntry, EntryKind, RepoLocator, Step};

pub const REPO_URL: &str = "https://github.com/acme/widgets";
pub const WORKFLOW_PATH: &str = ".github/workflows/ci.yml";

pub const CI_WORKFLOW: &str = "\
name: ci
on:
  push:
    branches: [main]
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - name: Checkout
        uses: actions/checkout@v4
      - name: Test
        run: npm test
";

/// Checkout + test steps
pub fn sample_steps() -> Vec<Step> {
    vec![
        Step::action("Checkout", "actions/checkout@v4"),
        Step::command("Test", "npm test"),
    ]
}

pub fn make_locator() -> RepoLocator {
    RepoLocator {
        host: "github.com".to_string(),
        owner: "acme".to_string(),
        name: "widgets".to_string(),
    }
}

/// Listing entry under `.github/workflows`
pub fn make_entry(name: &str, kind: EntryKind) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        path: format!(".github/workflows/{name}"),
        sha: format!("{name}-listing-sha"),
        kind,
    }
}
