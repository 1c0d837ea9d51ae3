//! CLI commands
//!
//! Command implementations for the `wfstudio` binary.

mod auth;
mod codec;
mod progress;
mod publish;
mod style;

pub use auth::{AuthAction, run_auth};
pub use codec::{run_generate, run_parse};
pub use publish::{PublishArgs, run_publish};
