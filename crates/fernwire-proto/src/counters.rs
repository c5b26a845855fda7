//! Unread counters.
//!
//! Both records are replaced wholesale on every update; fields the backend
//! omits decode as zero rather than keeping a previous value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::JsonMap;

/// Unread message counters for a chat list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnreadMessageCount {
    /// Raw chat list the counters apply to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_list: Option<Value>,
    /// Total unread messages.
    #[serde(default)]
    pub unread_count: i64,
    /// Unread messages in unmuted chats.
    #[serde(default)]
    pub unread_unmuted_count: i64,
    /// Every other field, as received.
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// Unread chat counters for a chat list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnreadChatCount {
    /// Raw chat list the counters apply to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_list: Option<Value>,
    /// Total chats in the list.
    #[serde(default)]
    pub total_count: i64,
    /// Chats with unread messages.
    #[serde(default)]
    pub unread_count: i64,
    /// Unmuted chats with unread messages.
    #[serde(default)]
    pub unread_unmuted_count: i64,
    /// Chats marked as unread.
    #[serde(default)]
    pub marked_as_unread_count: i64,
    /// Unmuted chats marked as unread.
    #[serde(default)]
    pub marked_as_unread_unmuted_count: i64,
    /// Every other field, as received.
    #[serde(flatten)]
    pub extra: JsonMap,
}
