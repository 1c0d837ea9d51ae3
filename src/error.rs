//! Error types for workflow-studio

use thiserror::Error;

/// Errors produced by the codec, the remote client, and the publish flow
#[derive(Error, Debug)]
pub enum Error {
    /// Repository reference did not match `<host>[:/]<owner>/<name>`
    #[error("invalid repository URL '{0}'. Use https://github.com/owner/repo")]
    InvalidLocator(String),

    /// Remote resource is absent (404)
    #[error("{message}")]
    RemoteNotFound {
        /// Message reported by the remote host
        message: String,
    },

    /// Branch creation collided with an existing ref
    #[error("branch '{branch}' already exists: {message}")]
    RemoteConflict {
        /// HTTP status returned by the remote host (409 or 422)
        status: u16,
        /// Branch name that was rejected
        branch: String,
        /// Message reported by the remote host
        message: String,
    },

    /// Any other non-2xx remote response
    #[error("{message} (status {status})")]
    RemoteRejected {
        /// HTTP status returned by the remote host
        status: u16,
        /// Message reported by the remote host
        message: String,
    },

    /// Request body or arguments could not be used
    #[error("{0}")]
    MalformedInput(String),

    /// Authentication error
    #[error("authentication error: {0}")]
    Auth(String),

    /// GitHub API error raised through octocrab
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Status code reported by the remote host, if this error carries one
    pub const fn remote_status(&self) -> Option<u16> {
        match self {
            Self::RemoteNotFound { .. } => Some(404),
            Self::RemoteConflict { status, .. } | Self::RemoteRejected { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => {
                let status = source.status_code.as_u16();
                if status == 404 {
                    Self::RemoteNotFound {
                        message: source.message.clone(),
                    }
                } else {
                    Self::RemoteRejected {
                        status,
                        message: source.message.clone(),
                    }
                }
            }
            other => Self::GitHubApi(other.to_string()),
        }
    }
}

/// Result type alias for workflow-studio
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_status() {
        let not_found = Error::RemoteNotFound {
            message: "Not Found".to_string(),
        };
        assert_eq!(not_found.remote_status(), Some(404));

        let rejected = Error::RemoteRejected {
            status: 401,
            message: "Bad credentials".to_string(),
        };
        assert_eq!(rejected.remote_status(), Some(401));
        assert_eq!(rejected.to_string(), "Bad credentials (status 401)");

        let conflict = Error::RemoteConflict {
            status: 409,
            branch: "ci-update".to_string(),
            message: "Reference already exists".to_string(),
        };
        assert_eq!(conflict.remote_status(), Some(409));

        assert_eq!(Error::InvalidLocator("x".into()).remote_status(), None);
    }
}
