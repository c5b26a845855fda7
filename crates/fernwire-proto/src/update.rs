//! Inbound message classification.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    AuthorizationState, Chat, ChatChange, ChatId, ConnectionState, DecodeError, File, JsonMap,
    OptionValue, Response, TYPE_FIELD, UnreadChatCount, UnreadMessageCount, User,
};

/// Name of the option that carries the backend version.
const VERSION_OPTION: &str = "version";

/// A decoded inbound message, classified by its `@type`.
///
/// # Invariants
///
/// - Every JSON object with a string `@type` decodes to exactly one variant;
///   kinds without a dedicated variant become [`Update::Other`].
/// - A known kind whose body does not fit its shape is a
///   [`DecodeError::Malformed`], never silently downgraded to `Other`.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// `updateOption` for `version` carrying a string.
    Version(String),
    /// `updateAuthorizationState`.
    AuthorizationState(AuthorizationState),
    /// Any other `updateOption`.
    Option {
        /// Option name.
        name: String,
        /// New value.
        value: OptionValue,
    },
    /// `updateConnectionState`.
    ConnectionState(ConnectionState),
    /// `updateUser`.
    User(User),
    /// `updateFile`.
    File(File),
    /// `updateNewChat`.
    NewChat(Chat),
    /// One of the partial chat updates listed in [`ChatChange::WIRE_NAMES`].
    ChatChanged {
        /// Chat the change applies to.
        chat_id: ChatId,
        /// Fields to merge.
        change: ChatChange,
        /// Full wire message, forwarded unchanged when the chat is unknown.
        raw: JsonMap,
    },
    /// `updateUnreadMessageCount`.
    UnreadMessageCount(UnreadMessageCount),
    /// `updateUnreadChatCount`.
    UnreadChatCount(UnreadChatCount),
    /// Anything else, forwarded whole.
    Other(Response),
}

#[derive(Deserialize)]
struct StateEnvelope {
    #[serde(rename = "@type")]
    kind: String,
}

#[derive(Deserialize)]
struct AuthorizationStateWire {
    authorization_state: StateEnvelope,
}

#[derive(Deserialize)]
struct ConnectionStateWire {
    state: StateEnvelope,
}

#[derive(Deserialize)]
struct OptionWire {
    name: String,
    value: Value,
}

#[derive(Deserialize)]
struct UserWire {
    user: User,
}

#[derive(Deserialize)]
struct FileWire {
    file: File,
}

#[derive(Deserialize)]
struct NewChatWire {
    chat: Chat,
}

#[derive(Deserialize)]
struct ChatTitleWire {
    chat_id: ChatId,
    title: String,
}

#[derive(Deserialize)]
struct ChatPhotoWire {
    chat_id: ChatId,
    #[serde(default)]
    photo: Option<Value>,
}

#[derive(Deserialize)]
struct ChatLastMessageWire {
    chat_id: ChatId,
    #[serde(default)]
    last_message: Option<Value>,
    #[serde(default)]
    positions: Option<Value>,
}

#[derive(Deserialize)]
struct ChatReadInboxWire {
    chat_id: ChatId,
    last_read_inbox_message_id: i64,
    unread_count: i64,
}

#[derive(Deserialize)]
struct ChatReadOutboxWire {
    chat_id: ChatId,
    last_read_outbox_message_id: i64,
}

#[derive(Deserialize)]
struct ChatUnreadMentionCountWire {
    chat_id: ChatId,
    unread_mention_count: i64,
}

impl Update {
    /// Decode and classify one wire message.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(text).map_err(DecodeError::InvalidJson)?;
        Self::from_value(value)
    }

    /// Classify an already parsed message.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let Value::Object(mut object) = value else {
            return Err(DecodeError::NotAnObject);
        };
        let kind = match object.get(TYPE_FIELD) {
            Some(Value::String(kind)) => kind.clone(),
            _ => return Err(DecodeError::MissingType),
        };

        match kind.as_str() {
            "updateAuthorizationState" => {
                let wire: AuthorizationStateWire = body(&kind, object)?;
                Ok(Self::AuthorizationState(AuthorizationState::from_wire(
                    &wire.authorization_state.kind,
                )))
            },
            "updateConnectionState" => {
                let wire: ConnectionStateWire = body(&kind, object)?;
                Ok(Self::ConnectionState(ConnectionState::from_wire(&wire.state.kind)))
            },
            "updateOption" => {
                let wire: OptionWire = body(&kind, object)?;
                let value = OptionValue::from_wire(&wire.value)?;
                match (wire.name.as_str(), value) {
                    (VERSION_OPTION, OptionValue::String(version)) => Ok(Self::Version(version)),
                    (_, value) => Ok(Self::Option { name: wire.name, value }),
                }
            },
            "updateUser" => Ok(Self::User(body::<UserWire>(&kind, object)?.user)),
            "updateFile" => Ok(Self::File(body::<FileWire>(&kind, object)?.file)),
            "updateNewChat" => Ok(Self::NewChat(body::<NewChatWire>(&kind, object)?.chat)),
            name if ChatChange::WIRE_NAMES.contains(&name) => Self::chat_changed(&kind, object),
            "updateUnreadMessageCount" => {
                object.remove(TYPE_FIELD);
                Ok(Self::UnreadMessageCount(body(&kind, object)?))
            },
            "updateUnreadChatCount" => {
                object.remove(TYPE_FIELD);
                Ok(Self::UnreadChatCount(body(&kind, object)?))
            },
            _ => Ok(Self::Other(Response::new(kind, object))),
        }
    }

    /// Decode a partial chat update, keeping the wire object alongside.
    fn chat_changed(kind: &str, raw: JsonMap) -> Result<Self, DecodeError> {
        let (chat_id, change) = match kind {
            "updateChatTitle" => {
                let wire: ChatTitleWire = body(kind, raw.clone())?;
                (wire.chat_id, ChatChange::Title { title: wire.title })
            },
            "updateChatPhoto" => {
                let wire: ChatPhotoWire = body(kind, raw.clone())?;
                (wire.chat_id, ChatChange::Photo { photo: wire.photo })
            },
            "updateChatLastMessage" => {
                let wire: ChatLastMessageWire = body(kind, raw.clone())?;
                (wire.chat_id, ChatChange::LastMessage {
                    last_message: wire.last_message,
                    positions: wire.positions,
                })
            },
            "updateChatReadInbox" => {
                let wire: ChatReadInboxWire = body(kind, raw.clone())?;
                (wire.chat_id, ChatChange::ReadInbox {
                    last_read_inbox_message_id: wire.last_read_inbox_message_id,
                    unread_count: wire.unread_count,
                })
            },
            "updateChatReadOutbox" => {
                let wire: ChatReadOutboxWire = body(kind, raw.clone())?;
                (wire.chat_id, ChatChange::ReadOutbox {
                    last_read_outbox_message_id: wire.last_read_outbox_message_id,
                })
            },
            "updateChatUnreadMentionCount" => {
                let wire: ChatUnreadMentionCountWire = body(kind, raw.clone())?;
                (wire.chat_id, ChatChange::UnreadMentionCount {
                    unread_mention_count: wire.unread_mention_count,
                })
            },
            other => return Err(DecodeError::malformed(other, "not a partial chat update")),
        };
        Ok(Self::ChatChanged { chat_id, change, raw })
    }

    /// Short name of the update kind, for logs.
    pub fn kind(&self) -> &str {
        match self {
            Self::Version(_) => "version",
            Self::AuthorizationState(_) => "updateAuthorizationState",
            Self::Option { .. } => "updateOption",
            Self::ConnectionState(_) => "updateConnectionState",
            Self::User(_) => "updateUser",
            Self::File(_) => "updateFile",
            Self::NewChat(_) => "updateNewChat",
            Self::ChatChanged { .. } => "chatChanged",
            Self::UnreadMessageCount(_) => "updateUnreadMessageCount",
            Self::UnreadChatCount(_) => "updateUnreadChatCount",
            Self::Other(response) => &response.kind,
        }
    }
}

fn body<T: DeserializeOwned>(kind: &str, object: JsonMap) -> Result<T, DecodeError> {
    serde_json::from_value(Value::Object(object)).map_err(|e| DecodeError::malformed(kind, e))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{FileId, RequestTag, UserId};

    fn decode(value: Value) -> Update {
        Update::decode(&value.to_string()).unwrap()
    }

    #[test]
    fn authorization_state_is_classified() {
        let update = decode(json!({
            "@type": "updateAuthorizationState",
            "authorization_state": {"@type": "authorizationStateWaitCode", "code_info": {}}
        }));
        assert_eq!(update, Update::AuthorizationState(AuthorizationState::WaitCode));
    }

    #[test]
    fn unknown_state_name_is_not_a_decode_error() {
        let update = decode(json!({
            "@type": "updateAuthorizationState",
            "authorization_state": {"@type": "authorizationStateWaitPremiumPurchase"}
        }));
        assert_eq!(
            update,
            Update::AuthorizationState(AuthorizationState::Unrecognized(
                "authorizationStateWaitPremiumPurchase".into()
            ))
        );
    }

    #[test]
    fn version_option_becomes_version_report() {
        let update = decode(json!({
            "@type": "updateOption",
            "name": "version",
            "value": {"@type": "optionValueString", "value": "1.6.0"}
        }));
        assert_eq!(update, Update::Version("1.6.0".into()));
    }

    #[test]
    fn other_options_keep_name_and_value() {
        let update = decode(json!({
            "@type": "updateOption",
            "name": "my_id",
            "value": {"@type": "optionValueInteger", "value": "1001"}
        }));
        assert_eq!(update, Update::Option {
            name: "my_id".into(),
            value: OptionValue::Integer(1001)
        });
    }

    #[test]
    fn records_are_unwrapped() {
        let user = decode(json!({"@type": "updateUser", "user": {"@type": "user", "id": 3}}));
        let Update::User(user) = user else { unreachable!("expected user update") };
        assert_eq!(user.id, UserId::from(3));

        let file = decode(json!({"@type": "updateFile", "file": {"@type": "file", "id": 11}}));
        let Update::File(file) = file else { unreachable!("expected file update") };
        assert_eq!(file.id, FileId(11));
    }

    #[test]
    fn partial_chat_update_is_classified() {
        let update = decode(json!({
            "@type": "updateChatTitle",
            "chat_id": "-1001",
            "title": "Renamed"
        }));
        let Update::ChatChanged { chat_id, change, .. } = update else {
            unreachable!("expected chat change")
        };
        assert_eq!(chat_id, ChatId::from("-1001"));
        assert_eq!(change, ChatChange::Title { title: "Renamed".into() });
    }

    #[test]
    fn partial_chat_update_keeps_wire_object() {
        let wire = json!({
            "@type": "updateChatReadInbox",
            "chat_id": 5,
            "last_read_inbox_message_id": 7,
            "unread_count": 2,
            "@client_id": 1,
            "@extra": "x"
        });
        let Update::ChatChanged { raw, .. } = decode(wire.clone()) else {
            unreachable!("expected chat change")
        };
        assert_eq!(Value::Object(raw), wire);
    }

    #[test]
    fn counters_drop_only_the_discriminant() {
        let update = decode(json!({
            "@type": "updateUnreadMessageCount",
            "chat_list": {"@type": "chatListMain"},
            "unread_count": 5,
            "unread_unmuted_count": 2,
            "@client_id": 1
        }));
        let Update::UnreadMessageCount(count) = update else { unreachable!("expected counter") };
        assert_eq!(count.unread_count, 5);
        assert_eq!(count.unread_unmuted_count, 2);
        assert_eq!(count.extra.get("@client_id"), Some(&json!(1)));
        assert!(!count.extra.contains_key("@type"));
    }

    #[test]
    fn unknown_kind_is_forwarded_whole() {
        let update =
            decode(json!({"@type": "chats", "total_count": 2, "chat_ids": [1, 2], "@extra": 4}));
        let Update::Other(response) = update else { unreachable!("expected other") };
        assert_eq!(response.kind, "chats");
        assert_eq!(response.tag(), Some(RequestTag(4)));
        assert_eq!(response.body.get("total_count"), Some(&json!(2)));
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert!(matches!(Update::decode("{not json"), Err(DecodeError::InvalidJson(_))));
        assert!(matches!(Update::decode("[1,2]"), Err(DecodeError::NotAnObject)));
        assert!(matches!(Update::decode(r#"{"id": 1}"#), Err(DecodeError::MissingType)));
        assert!(matches!(Update::decode(r#"{"@type": 5}"#), Err(DecodeError::MissingType)));
        assert!(matches!(
            Update::decode(r#"{"@type": "updateUser", "user": {"first_name": "x"}}"#),
            Err(DecodeError::Malformed { .. })
        ));
    }
}
