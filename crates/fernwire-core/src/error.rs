//! Coordinator errors.
//!
//! Decoding failures and backend error replies are recovered before they get
//! here. What remains are state errors: the backend reported a lifecycle
//! state this build cannot mirror. They are returned to the caller and
//! never folded into the event stream.

use thiserror::Error;

/// Errors raised while applying an update.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    /// Authorization state name is not known.
    #[error("unrecognized authorization state: {0}")]
    UnrecognizedAuthorizationState(String),

    /// Connection state name is not known.
    #[error("unrecognized connection state: {0}")]
    UnrecognizedConnectionState(String),
}

impl CoordinatorError {
    /// Raw state name the backend reported.
    pub fn state_name(&self) -> &str {
        match self {
            Self::UnrecognizedAuthorizationState(name)
            | Self::UnrecognizedConnectionState(name) => name,
        }
    }
}
