//! Unclassified inbound messages and request correlation.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{EXTRA_FIELD, JsonMap};

/// Tag stamped on an outbound request as `@extra`.
///
/// The backend copies `@extra` onto the response to that request, which is
/// how a caller correlates a fire-and-forget command with its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestTag(pub u64);

impl fmt::Display for RequestTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Inbound message of a kind the client does not interpret.
///
/// Carries responses to raw requests, error replies and any update the
/// classifier does not know. The body is kept whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// `@type` of the message.
    pub kind: String,
    /// Raw `@extra` value, if present.
    pub extra: Option<Value>,
    /// Full message object, including `@type` and `@extra`.
    pub body: JsonMap,
}

impl Response {
    /// Build a response from a decoded object and its `@type`.
    pub fn new(kind: String, body: JsonMap) -> Self {
        let extra = body.get(EXTRA_FIELD).cloned();
        Self { kind, extra, body }
    }

    /// Request tag echoed by the backend, when `@extra` holds one of ours.
    pub fn tag(&self) -> Option<RequestTag> {
        self.extra.as_ref().and_then(Value::as_u64).map(RequestTag)
    }

    /// Typed error when this is an `error` reply.
    pub fn error(&self) -> Option<ProtocolError> {
        if self.kind != "error" {
            return None;
        }
        let code = self.body.get("code").and_then(Value::as_i64).unwrap_or_default();
        let message =
            self.body.get("message").and_then(Value::as_str).unwrap_or_default().to_owned();
        Some(ProtocolError { code, message })
    }
}

/// Error reported by the backend in reply to a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("backend error {code}: {message}")]
pub struct ProtocolError {
    /// Backend error code.
    pub code: i64,
    /// Backend error message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(value: Value) -> Response {
        let body = value.as_object().cloned().unwrap_or_default();
        let kind = body["@type"].as_str().unwrap().to_owned();
        Response::new(kind, body)
    }

    #[test]
    fn error_reply_exposes_tag_and_error() {
        let reply = response(json!({
            "@type": "error",
            "code": 400,
            "message": "PHONE_NUMBER_INVALID",
            "@extra": 12
        }));

        assert_eq!(reply.tag(), Some(RequestTag(12)));
        assert_eq!(
            reply.error(),
            Some(ProtocolError { code: 400, message: "PHONE_NUMBER_INVALID".into() })
        );
    }

    #[test]
    fn foreign_extra_is_not_a_tag() {
        let reply = response(json!({"@type": "ok", "@extra": "from-someone-else"}));
        assert_eq!(reply.tag(), None);
        assert_eq!(reply.extra, Some(json!("from-someone-else")));
        assert_eq!(reply.error(), None);
    }
}
