//! Publish driver
//!
//! Steps a [`PublishState`] until it is terminal and reports each phase.

use crate::error::Result;
use crate::platform::RemoteRepoClient;
use crate::publish::{ProgressCallback, PublishOutcome, PublishState};
use crate::types::PublishRequest;
use tracing::debug;

/// Publish `request` to the repository at `repo_url`
///
/// Nothing is rolled back on failure: a branch created before a later step
/// fails stays on the remote.
pub async fn publish(
    client: &dyn RemoteRepoClient,
    repo_url: &str,
    request: &PublishRequest,
    progress: &dyn ProgressCallback,
) -> Result<PublishOutcome> {
    let mut state = PublishState::start(repo_url);

    loop {
        let phase = state.phase();
        progress.on_phase(phase).await;

        if let PublishState::BranchConflictRetry { candidate, .. } = &state {
            progress
                .on_message(&format!("Branch already exists, retrying as {candidate}"))
                .await;
        }

        match state {
            PublishState::Done(outcome) => {
                progress.on_published(&outcome).await;
                return Ok(outcome);
            }
            PublishState::Failed(error) => {
                progress.on_error(&error).await;
                return Err(error);
            }
            pending => {
                state = pending.advance(client, request).await;
                debug!(from = %phase, to = %state.phase(), "publish transition");
            }
        }
    }
}
