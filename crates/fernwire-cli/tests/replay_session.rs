//! Replaying recorded sessions end to end.

use std::{io::Write, sync::Arc};

use fernwire_cli::{ReplayBackend, SessionOptions, Summary, config, session};
use fernwire_client::Client;
use fernwire_harness::fixtures;
use fernwire_proto::{AuthorizationState, ConnectionState};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};

fn recording(messages: &[Value]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# captured login").unwrap();
    for message in messages {
        writeln!(file, "{message}").unwrap();
    }
    file
}

fn sent_types(backend: &ReplayBackend) -> Vec<String> {
    backend
        .sent()
        .iter()
        .filter_map(|text| serde_json::from_str::<Value>(text).ok())
        .filter_map(|value| value.get("@type").and_then(Value::as_str).map(str::to_owned))
        .collect()
}

#[tokio::test]
async fn login_is_answered_from_prompt_source() {
    let file = recording(&[
        fixtures::version("1.8.0"),
        fixtures::authorization_state("WaitTdlibParameters"),
        fixtures::authorization_state("WaitPhoneNumber"),
        fixtures::authorization_state("WaitCode"),
        fixtures::authorization_state("WaitPassword"),
        fixtures::authorization_state("Ready"),
        fixtures::connection_state("Ready"),
        fixtures::option_integer("my_id", 10),
        fixtures::user(10, "Me"),
        fixtures::user(11, "Friend"),
        fixtures::new_chat(11, "Friend"),
        fixtures::file(3, 100, 100),
    ]);
    let backend = Arc::new(ReplayBackend::open(file.path()).unwrap());
    let config = config::apply_env(Default::default(), |_| None).unwrap();
    let mut client = Client::start(Arc::clone(&backend), config).unwrap();

    let answers = BufReader::new(&b"+15550100\n12345\nhunter2\n"[..]).lines();
    let options = SessionOptions { chat_limit: 20 };
    let summary = session::run(&mut client, Some(answers), &options).await.unwrap();

    assert_eq!(summary, Summary {
        events: 12,
        state_errors: 0,
        version: Some("1.8.0".into()),
        authorization_state: AuthorizationState::Ready,
        connection_state: ConnectionState::Ready,
        users: 2,
        chats: 1,
        files: 1,
    });
    assert_eq!(sent_types(&backend), vec![
        "setLogVerbosityLevel",
        "setTdlibParameters",
        "setAuthenticationPhoneNumber",
        "checkAuthenticationCode",
        "checkAuthenticationPassword",
        "getChats",
    ]);
    assert!(client.me().is_some());
}

#[tokio::test]
async fn prompts_are_skipped_without_source() {
    let file = recording(&[
        fixtures::authorization_state("WaitPhoneNumber"),
        fixtures::authorization_state("WaitPremiumPurchase"),
    ]);
    let backend = Arc::new(ReplayBackend::open(file.path()).unwrap());
    let mut client = Client::start(Arc::clone(&backend), Default::default()).unwrap();

    let summary = session::run::<_, BufReader<&[u8]>>(&mut client, None, &SessionOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.events, 1);
    assert_eq!(summary.state_errors, 1);
    assert_eq!(summary.authorization_state, AuthorizationState::WaitPhoneNumber);
    assert_eq!(sent_types(&backend), vec!["setLogVerbosityLevel"]);
}

#[test]
fn config_file_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api_id = 99\napi_hash = \"feed\"\nlog_verbosity = 3").unwrap();

    let config = config::load_file(file.path()).unwrap();

    assert_eq!(config.api_id, 99);
    assert_eq!(config.api_hash, "feed");
    assert_eq!(config.log_verbosity, 3);
}

#[test]
fn broken_config_names_the_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api_id = \"not a number\"").unwrap();

    let error = config::load_file(file.path()).unwrap_err();
    assert!(error.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn missing_recording_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = ReplayBackend::open(&dir.path().join("absent.jsonl"));
    assert!(result.is_err());
}
