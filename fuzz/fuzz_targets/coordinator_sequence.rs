//! Fuzz target for the coordinator state machine
//!
//! # Strategy
//!
//! - Structured messages: well-formed wire messages with fuzzed fields
//! - Ids: integer and string encodings of the same small id space
//! - Raw lines: arbitrary text mixed into the stream
//!
//! # Invariants
//!
//! - Every accepted update emits exactly one event, first
//! - A rejected update leaves both states unchanged
//! - A discovered chat is cached afterwards

#![no_main]

use arbitrary::Arbitrary;
use fernwire_core::{Config, Coordinator, CoordinatorAction, Event};
use fernwire_proto::Update;
use libfuzzer_sys::fuzz_target;
use serde_json::{Value, json};

#[derive(Debug, Clone, Arbitrary)]
enum Message {
    Authorization(AuthChoice),
    Connection(u8),
    Option { name: OptionName, value: i32 },
    User { id: IdChoice, name: String },
    NewChat { id: IdChoice, title: String },
    ChatTitle { id: IdChoice, title: String },
    ChatReadInbox { id: IdChoice, unread: i64 },
    File { id: i32, size: i64, downloaded: i64 },
    UnreadMessages { unread: i32, unmuted: i32 },
    Reply { tag: u64, error: bool },
    Raw(String),
}

#[derive(Debug, Clone, Arbitrary)]
enum AuthChoice {
    Known(u8),
    Unknown(String),
}

#[derive(Debug, Clone, Arbitrary)]
enum OptionName {
    MyId,
    Version,
    Other(String),
}

#[derive(Debug, Clone, Arbitrary)]
enum IdChoice {
    Int(u8),
    Str(u8),
}

const AUTHORIZATION_STATES: [&str; 8] = [
    "WaitTdlibParameters",
    "WaitEncryptionKey",
    "WaitPhoneNumber",
    "WaitCode",
    "WaitPassword",
    "Ready",
    "Closing",
    "Closed",
];

const CONNECTION_STATES: [&str; 5] =
    ["WaitingForNetwork", "ConnectingToProxy", "Connecting", "Updating", "Ready"];

fn id_value(id: &IdChoice) -> Value {
    match id {
        IdChoice::Int(n) => json!(n),
        IdChoice::Str(n) => json!(n.to_string()),
    }
}

fn render(message: &Message) -> String {
    let value = match message {
        Message::Authorization(choice) => {
            let name = match choice {
                AuthChoice::Known(n) => {
                    AUTHORIZATION_STATES[usize::from(*n) % AUTHORIZATION_STATES.len()].to_owned()
                },
                AuthChoice::Unknown(name) => name.clone(),
            };
            json!({
                "@type": "updateAuthorizationState",
                "authorization_state": { "@type": format!("authorizationState{name}") },
            })
        },
        Message::Connection(n) => {
            let name = CONNECTION_STATES[usize::from(*n) % CONNECTION_STATES.len()];
            json!({
                "@type": "updateConnectionState",
                "state": { "@type": format!("connectionState{name}") },
            })
        },
        Message::Option { name, value } => {
            let (name, kind) = match name {
                OptionName::MyId => ("my_id".to_owned(), "optionValueInteger"),
                OptionName::Version => ("version".to_owned(), "optionValueString"),
                OptionName::Other(name) => (name.clone(), "optionValueInteger"),
            };
            let value = json!({ "@type": kind, "value": value.to_string() });
            json!({ "@type": "updateOption", "name": name, "value": value })
        },
        Message::User { id, name } => json!({
            "@type": "updateUser",
            "user": { "@type": "user", "id": id_value(id), "first_name": name },
        }),
        Message::NewChat { id, title } => json!({
            "@type": "updateNewChat",
            "chat": { "@type": "chat", "id": id_value(id), "title": title },
        }),
        Message::ChatTitle { id, title } => json!({
            "@type": "updateChatTitle",
            "chat_id": id_value(id),
            "title": title,
        }),
        Message::ChatReadInbox { id, unread } => json!({
            "@type": "updateChatReadInbox",
            "chat_id": id_value(id),
            "last_read_inbox_message_id": 1,
            "unread_count": unread,
        }),
        Message::File { id, size, downloaded } => json!({
            "@type": "updateFile",
            "file": {
                "@type": "file",
                "id": id,
                "size": size,
                "local": { "@type": "localFile", "downloaded_size": downloaded },
            },
        }),
        Message::UnreadMessages { unread, unmuted } => json!({
            "@type": "updateUnreadMessageCount",
            "unread_count": unread,
            "unread_unmuted_count": unmuted,
        }),
        Message::Reply { tag, error } => {
            if *error {
                json!({ "@type": "error", "code": 400, "message": "BAD", "@extra": tag })
            } else {
                json!({ "@type": "ok", "@extra": tag })
            }
        },
        Message::Raw(text) => return text.clone(),
    };
    value.to_string()
}

fuzz_target!(|messages: Vec<Message>| {
    let mut coordinator = Coordinator::new(Config::default());

    for message in &messages {
        let Ok(update) = Update::decode(&render(message)) else {
            continue;
        };

        let authorization_before = coordinator.authorization_state().clone();
        let connection_before = coordinator.connection_state().clone();

        match coordinator.handle(update) {
            Ok(actions) => {
                let emits = actions
                    .iter()
                    .filter(|action| matches!(action, CoordinatorAction::Emit(_)))
                    .count();
                assert_eq!(emits, 1, "accepted update must emit exactly one event");
                assert!(matches!(actions.first(), Some(CoordinatorAction::Emit(_))));

                if let Some(CoordinatorAction::Emit(Event::NewChatDiscovered { id, .. })) =
                    actions.first()
                {
                    assert!(coordinator.chat(id).is_some(), "discovered chat must be cached");
                }
            },
            Err(_) => {
                assert_eq!(coordinator.authorization_state(), &authorization_before);
                assert_eq!(coordinator.connection_state(), &connection_before);
            },
        }
    }
});
