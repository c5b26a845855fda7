//! Wire message builders.
//!
//! Each function returns one inbound message as the backend would send it,
//! trimmed to the fields the client reads plus a few it does not.

use serde_json::{Value, json};

/// `updateAuthorizationState` with a state suffix such as `WaitCode`.
pub fn authorization_state(state: &str) -> Value {
    json!({
        "@type": "updateAuthorizationState",
        "authorization_state": {"@type": format!("authorizationState{state}")}
    })
}

/// `updateConnectionState` with a state suffix such as `Ready`.
pub fn connection_state(state: &str) -> Value {
    json!({
        "@type": "updateConnectionState",
        "state": {"@type": format!("connectionState{state}")}
    })
}

/// `updateOption` carrying a string.
pub fn option_string(name: &str, value: &str) -> Value {
    json!({
        "@type": "updateOption",
        "name": name,
        "value": {"@type": "optionValueString", "value": value}
    })
}

/// `updateOption` carrying an integer, encoded as a string as the backend
/// does for 64-bit values.
pub fn option_integer(name: &str, value: i64) -> Value {
    json!({
        "@type": "updateOption",
        "name": name,
        "value": {"@type": "optionValueInteger", "value": value.to_string()}
    })
}

/// `updateOption` for `version`.
pub fn version(version: &str) -> Value {
    option_string("version", version)
}

/// `updateUser`.
pub fn user(id: i64, first_name: &str) -> Value {
    json!({
        "@type": "updateUser",
        "user": {
            "@type": "user",
            "id": id,
            "first_name": first_name,
            "last_name": "",
            "username": first_name.to_lowercase(),
            "phone_number": "",
            "status": {"@type": "userStatusRecently"},
            "is_contact": false,
            "type": {"@type": "userTypeRegular"}
        }
    })
}

/// `updateNewChat`.
pub fn new_chat(id: i64, title: &str) -> Value {
    json!({
        "@type": "updateNewChat",
        "chat": {
            "@type": "chat",
            "id": id,
            "title": title,
            "type": {"@type": "chatTypePrivate", "user_id": id},
            "unread_count": 0,
            "unread_mention_count": 0,
            "last_read_inbox_message_id": 0,
            "last_read_outbox_message_id": 0
        }
    })
}

/// `updateChatTitle`.
pub fn chat_title(id: i64, title: &str) -> Value {
    json!({"@type": "updateChatTitle", "chat_id": id, "title": title})
}

/// `updateChatReadInbox`.
pub fn chat_read_inbox(id: i64, last_read: i64, unread_count: i64) -> Value {
    json!({
        "@type": "updateChatReadInbox",
        "chat_id": id,
        "last_read_inbox_message_id": last_read,
        "unread_count": unread_count
    })
}

/// `updateFile` for a file of `size` bytes with `downloaded` bytes present.
pub fn file(id: i64, size: i64, downloaded: i64) -> Value {
    let completed = downloaded >= size && size > 0;
    let path = if completed { format!("/tmp/files/{id}") } else { String::new() };
    json!({
        "@type": "updateFile",
        "file": {
            "@type": "file",
            "id": id,
            "size": size,
            "expected_size": size,
            "local": {
                "@type": "localFile",
                "path": path,
                "can_be_downloaded": true,
                "is_downloading_active": !completed,
                "is_downloading_completed": completed,
                "downloaded_size": downloaded
            },
            "remote": {
                "@type": "remoteFile",
                "id": format!("remote-{id}"),
                "unique_id": format!("unique-{id}"),
                "is_uploading_completed": true,
                "uploaded_size": size
            }
        }
    })
}

/// `updateUnreadMessageCount` for the main list.
pub fn unread_message_count(unread: i64, unmuted: i64) -> Value {
    json!({
        "@type": "updateUnreadMessageCount",
        "chat_list": {"@type": "chatListMain"},
        "unread_count": unread,
        "unread_unmuted_count": unmuted
    })
}

/// `updateUnreadChatCount` for the main list.
pub fn unread_chat_count(total: i64, unread: i64) -> Value {
    json!({
        "@type": "updateUnreadChatCount",
        "chat_list": {"@type": "chatListMain"},
        "total_count": total,
        "unread_count": unread,
        "unread_unmuted_count": unread,
        "marked_as_unread_count": 0,
        "marked_as_unread_unmuted_count": 0
    })
}

/// `error` reply to the request tagged `extra`.
pub fn error_reply(extra: u64, code: i64, message: &str) -> Value {
    json!({"@type": "error", "code": code, "message": message, "@extra": extra})
}

/// `ok` reply to the request tagged `extra`.
pub fn ok_reply(extra: u64) -> Value {
    json!({"@type": "ok", "@extra": extra})
}
