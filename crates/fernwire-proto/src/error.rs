//! Codec errors.

use thiserror::Error;

/// Errors produced while decoding an inbound message.
///
/// All variants are recoverable: the receiver logs the message and moves on
/// to the next one.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Text is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Top-level JSON value is not an object.
    #[error("message is not a JSON object")]
    NotAnObject,

    /// Object carries no string `@type` discriminant.
    #[error("message has no @type discriminant")]
    MissingType,

    /// Discriminant is known but the body does not match its shape.
    #[error("malformed {kind}: {reason}")]
    Malformed {
        /// `@type` of the offending message.
        kind: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl DecodeError {
    pub(crate) fn malformed(kind: &str, reason: impl ToString) -> Self {
        Self::Malformed { kind: kind.to_owned(), reason: reason.to_string() }
    }
}

/// Errors produced while encoding an outbound request.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Raw request object carries no string `@type` discriminant.
    #[error("request has no @type discriminant")]
    MissingType,

    /// Serialization failed.
    #[error("failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),
}
