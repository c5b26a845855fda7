//! Chat records and partial chat updates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ChatId, JsonMap};

/// Chat as last reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    /// Chat identifier.
    pub id: ChatId,
    /// Chat title.
    #[serde(default)]
    pub title: String,
    /// Number of unread messages.
    #[serde(default)]
    pub unread_count: i64,
    /// Number of unread messages mentioning the user.
    #[serde(default)]
    pub unread_mention_count: i64,
    /// Last incoming message the user has read.
    #[serde(default)]
    pub last_read_inbox_message_id: i64,
    /// Last outgoing message the peer has read.
    #[serde(default)]
    pub last_read_outbox_message_id: i64,
    /// Raw last message object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Value>,
    /// Raw chat photo object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Value>,
    /// Every other field, as received.
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// A partial update to an already known chat.
///
/// Each variant names the fields it overwrites; everything else on the
/// cached [`Chat`] is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatChange {
    /// `updateChatTitle`.
    Title {
        /// New title.
        title: String,
    },
    /// `updateChatPhoto`.
    Photo {
        /// New photo, `None` when removed.
        photo: Option<Value>,
    },
    /// `updateChatLastMessage`.
    LastMessage {
        /// New last message, `None` when the chat became empty.
        last_message: Option<Value>,
        /// New chat list positions, stored in the residual fields.
        positions: Option<Value>,
    },
    /// `updateChatReadInbox`.
    ReadInbox {
        /// Last incoming message read.
        last_read_inbox_message_id: i64,
        /// Remaining unread messages.
        unread_count: i64,
    },
    /// `updateChatReadOutbox`.
    ReadOutbox {
        /// Last outgoing message read by the peer.
        last_read_outbox_message_id: i64,
    },
    /// `updateChatUnreadMentionCount`.
    UnreadMentionCount {
        /// Remaining unread mentions.
        unread_mention_count: i64,
    },
}

impl ChatChange {
    /// Wire names of the partial chat updates this crate understands.
    pub const WIRE_NAMES: [&'static str; 6] = [
        "updateChatTitle",
        "updateChatPhoto",
        "updateChatLastMessage",
        "updateChatReadInbox",
        "updateChatReadOutbox",
        "updateChatUnreadMentionCount",
    ];

    /// Wire name of the update that carries this change.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Title { .. } => Self::WIRE_NAMES[0],
            Self::Photo { .. } => Self::WIRE_NAMES[1],
            Self::LastMessage { .. } => Self::WIRE_NAMES[2],
            Self::ReadInbox { .. } => Self::WIRE_NAMES[3],
            Self::ReadOutbox { .. } => Self::WIRE_NAMES[4],
            Self::UnreadMentionCount { .. } => Self::WIRE_NAMES[5],
        }
    }

    /// Merge this change into a cached chat.
    pub fn apply(self, chat: &mut Chat) {
        match self {
            Self::Title { title } => chat.title = title,
            Self::Photo { photo } => chat.photo = photo,
            Self::LastMessage { last_message, positions } => {
                chat.last_message = last_message;
                if let Some(positions) = positions {
                    chat.extra.insert("positions".to_owned(), positions);
                }
            },
            Self::ReadInbox { last_read_inbox_message_id, unread_count } => {
                chat.last_read_inbox_message_id = last_read_inbox_message_id;
                chat.unread_count = unread_count;
            },
            Self::ReadOutbox { last_read_outbox_message_id } => {
                chat.last_read_outbox_message_id = last_read_outbox_message_id;
            },
            Self::UnreadMentionCount { unread_mention_count } => {
                chat.unread_mention_count = unread_mention_count;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn chat() -> Chat {
        serde_json::from_value(json!({
            "@type": "chat",
            "id": -100_123,
            "title": "Rustaceans",
            "unread_count": 4,
            "type": {"@type": "chatTypeSupergroup", "supergroup_id": 123}
        }))
        .unwrap()
    }

    #[test]
    fn residual_fields_are_kept() {
        let chat = chat();
        assert_eq!(chat.id, ChatId::from(-100_123));
        assert_eq!(chat.extra.get("type").and_then(|t| t.get("supergroup_id")), Some(&json!(123)));
    }

    #[test]
    fn read_inbox_touches_only_its_fields() {
        let mut chat = chat();
        ChatChange::ReadInbox { last_read_inbox_message_id: 99, unread_count: 0 }.apply(&mut chat);

        assert_eq!(chat.unread_count, 0);
        assert_eq!(chat.last_read_inbox_message_id, 99);
        assert_eq!(chat.title, "Rustaceans");
    }

    #[test]
    fn last_message_stores_positions_in_residual() {
        let mut chat = chat();
        ChatChange::LastMessage {
            last_message: Some(json!({"id": 5})),
            positions: Some(json!([{"order": "1"}])),
        }
        .apply(&mut chat);

        assert_eq!(chat.last_message, Some(json!({"id": 5})));
        assert_eq!(chat.extra.get("positions"), Some(&json!([{"order": "1"}])));
    }
}
