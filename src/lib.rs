//! workflow-studio - visual CI workflow editing, published as pull requests
//!
//! The library holds the step model, the workflow text codec, the remote
//! repository client, and the publish orchestrator. The `wfstudio` binary
//! wraps them in an HTTP surface and a small CLI.

pub mod auth;
pub mod codec;
pub mod config;
pub mod editor;
pub mod error;
pub mod load;
pub mod platform;
pub mod publish;
pub mod server;
pub mod types;
