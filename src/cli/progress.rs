//! Styled progress output for `wfstudio publish`

use crate::cli::style::{Stream, Stylize, check, cross, hyperlink_url};
use anstream::{eprintln, println};
use async_trait::async_trait;
use workflow_studio::error::Error;
use workflow_studio::publish::{Phase, ProgressCallback, PublishOutcome};

/// Prints each publish phase as it is entered
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Done | Phase::Failed => {}
            Phase::BranchConflictRetry => println!("{}...", phase.to_string().warn()),
            _ => println!("{}...", phase.to_string().emphasis()),
        }
    }

    async fn on_published(&self, outcome: &PublishOutcome) {
        let pr_num = format!("#{}", outcome.pr_number);
        let verb = if outcome.file_created {
            "created"
        } else {
            "updated"
        };
        println!(
            "{} Opened PR {} from {} into {} (file {verb})",
            check(),
            pr_num.accent(),
            outcome.branch.accent(),
            outcome.base_branch.emphasis()
        );
        println!("  {}", hyperlink_url(Stream::Stdout, &outcome.pr_url));
    }

    // The error text itself is reported once by the command's return value.
    async fn on_error(&self, _err: &Error) {
        eprintln!("{} {}", cross(), "Publish failed".error());
    }

    async fn on_message(&self, message: &str) {
        println!("  {}", message.muted());
    }
}
