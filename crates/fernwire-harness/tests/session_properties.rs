//! Property-based tests for the coordinator.
//!
//! Arbitrary sequences of wire updates are decoded and applied; the standard
//! invariants must hold after every step.

use fernwire_core::Event;
use fernwire_harness::{InvariantRegistry, SessionRecorder, fixtures};
use fernwire_proto::{Update, UserId};
use proptest::prelude::*;
use serde_json::Value;

static AUTH_STATES: [&str; 8] = [
    "WaitTdlibParameters",
    "WaitEncryptionKey",
    "WaitPhoneNumber",
    "WaitCode",
    "WaitPassword",
    "Ready",
    "LoggingOut",
    "Closing",
];

static CONNECTION_STATES: [&str; 5] =
    ["WaitingForNetwork", "ConnectingToProxy", "Connecting", "Updating", "Ready"];

/// Generate one wire update. Small id ranges make repeats likely.
fn message_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        2 => prop::sample::select(AUTH_STATES.as_slice()).prop_map(fixtures::authorization_state),
        2 => prop::sample::select(CONNECTION_STATES.as_slice())
            .prop_map(fixtures::connection_state),
        1 => "[0-9]\\.[0-9]\\.[0-9]".prop_map(|v| fixtures::version(&v)),
        1 => (0i64..4).prop_map(|id| fixtures::option_integer("my_id", id)),
        1 => "[a-z]{1,6}".prop_map(|v| fixtures::option_string("language_pack_id", &v)),
        3 => (0i64..4, "[A-Z][a-z]{0,5}").prop_map(|(id, name)| fixtures::user(id, &name)),
        3 => (0i64..6, "[a-z ]{0,8}").prop_map(|(id, title)| fixtures::new_chat(id, &title)),
        2 => (0i64..6, "[a-z ]{0,8}").prop_map(|(id, title)| fixtures::chat_title(id, &title)),
        2 => (0i64..6, 0i64..100, 0i64..10)
            .prop_map(|(id, read, unread)| fixtures::chat_read_inbox(id, read, unread)),
        2 => (0i64..4, 1i64..1000, 0i64..1000)
            .prop_map(|(id, size, done)| fixtures::file(id, size, done.min(size))),
        1 => (0i64..50, 0i64..50).prop_map(|(a, b)| fixtures::unread_message_count(a, b)),
        1 => (0i64..50, 0i64..50).prop_map(|(a, b)| fixtures::unread_chat_count(a, b)),
        1 => (1u64..100).prop_map(fixtures::ok_reply),
    ]
}

fn decode(message: &Value) -> Update {
    Update::decode(&message.to_string()).unwrap()
}

proptest! {
    /// Standard invariants hold after every update.
    #[test]
    fn prop_invariants_hold(messages in prop::collection::vec(message_strategy(), 0..60)) {
        let mut recorder = SessionRecorder::default();
        let invariants = InvariantRegistry::standard();

        for message in &messages {
            prop_assert!(recorder.apply(decode(message)).is_ok());

            let snapshot = recorder.snapshot();
            prop_assert!(
                invariants.check_all(&snapshot).is_ok(),
                "invariant violated after {}: {:?}",
                message,
                invariants.check_all(&snapshot)
            );
        }
    }

    /// Events come out in the order their updates went in.
    #[test]
    fn prop_events_follow_update_order(
        messages in prop::collection::vec(message_strategy(), 1..40)
    ) {
        let mut recorder = SessionRecorder::default();
        let mut expected = Vec::new();

        for message in &messages {
            let update = decode(message);
            expected.push(update.kind().to_owned());
            recorder.apply(update).unwrap();
        }

        let events = recorder.snapshot().events;
        prop_assert_eq!(events.len(), expected.len());
        for (event, kind) in events.iter().zip(&expected) {
            let matches = match event {
                Event::VersionDetected(_) => kind == "version",
                Event::AuthorizationStateChanged(_) => kind == "updateAuthorizationState",
                Event::OptionUpdated { .. } => kind == "updateOption",
                Event::ConnectionStateChanged(_) => kind == "updateConnectionState",
                Event::UserUpdated(_) => kind == "updateUser",
                Event::FileUpdated { .. } => kind == "updateFile",
                Event::NewChatDiscovered { .. } => kind == "updateNewChat",
                Event::ChatUpdated { .. } => kind == "updateNewChat" || kind == "chatChanged",
                Event::UnreadMessageCountUpdated(_) => kind == "updateUnreadMessageCount",
                Event::UnreadChatCountUpdated(_) => kind == "updateUnreadChatCount",
                Event::Unhandled(_) => kind == "ok" || kind == "chatChanged",
            };
            prop_assert!(matches, "{} produced {}", kind, event.name());
        }
    }

    /// The last wholesale counter update is what the cache holds.
    #[test]
    fn prop_last_counter_wins(counts in prop::collection::vec(0i64..1000, 1..20)) {
        let mut recorder = SessionRecorder::default();
        for count in &counts {
            recorder.apply(decode(&fixtures::unread_message_count(*count, 0))).unwrap();
        }

        let cached = recorder.coordinator().unread_message_count().map(|c| c.unread_count);
        prop_assert_eq!(cached, counts.last().copied());
    }

    /// Whatever order `my_id` and the user arrive in, the user ends up as self.
    #[test]
    fn prop_self_user_independent_of_order(my_id in 0i64..1000, id_first in any::<bool>()) {
        let mut recorder = SessionRecorder::default();
        let option = decode(&fixtures::option_integer("my_id", my_id));
        let user = decode(&fixtures::user(my_id, "Me"));

        let (first, second) = if id_first { (option, user) } else { (user, option) };
        recorder.apply(first).unwrap();
        recorder.apply(second).unwrap();

        let me = recorder.coordinator().me().map(|me| me.id().clone());
        prop_assert_eq!(me, Some(UserId::from(my_id)));
        prop_assert_eq!(recorder.coordinator().users().len(), 1);
    }
}
