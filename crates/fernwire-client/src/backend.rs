//! Backend boundary.

use std::time::Duration;

use thiserror::Error;

/// Backend failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Backend is gone; nothing more will be received or accepted.
    #[error("backend closed")]
    Closed,

    /// A single receive failed; the next poll may succeed.
    #[error("receive failed: {0}")]
    Receive(String),

    /// A request could not be handed over.
    #[error("send failed: {0}")]
    Send(String),
}

/// The external JSON messaging library.
///
/// Implementations must accept `send` and `receive` from different threads
/// at the same time: the receiver loop polls on its own thread while the
/// application submits requests.
pub trait Backend: Send + Sync + 'static {
    /// Submit one JSON request without waiting for a reply.
    fn send(&self, request: &str) -> Result<(), BackendError>;

    /// Wait up to `timeout` for the next JSON message.
    ///
    /// `Ok(None)` means the timeout elapsed with nothing to read.
    fn receive(&self, timeout: Duration) -> Result<Option<String>, BackendError>;
}
