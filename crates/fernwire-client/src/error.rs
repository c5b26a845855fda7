//! Client errors.

use fernwire_core::CoordinatorError;
use fernwire_proto::EncodeError;
use thiserror::Error;

use crate::backend::BackendError;

/// Errors surfaced by [`Client`](crate::Client).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Backend reported a state the coordinator cannot mirror.
    #[error(transparent)]
    State(#[from] CoordinatorError),

    /// Request could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[from] EncodeError),

    /// Backend refused the request.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Client was shut down.
    #[error("client is shut down")]
    ShutDown,

    /// Receiver thread could not be started.
    #[error("failed to spawn receiver thread")]
    Spawn(#[source] std::io::Error),
}
