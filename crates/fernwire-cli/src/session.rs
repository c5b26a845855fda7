//! Event loop driving one client session.

use std::fmt;

use fernwire_client::{Backend, Client, Event};
use fernwire_proto::{AuthorizationState, ConnectionState};
use tokio::io::{AsyncBufRead, Lines};

use crate::error::CliError;

/// What the session loop does besides logging events.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Chats to request once authorized. Zero requests none.
    pub chat_limit: i32,
}

/// Totals reported when the session ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Events consumed.
    pub events: usize,
    /// State errors reported.
    pub state_errors: usize,
    /// Backend version, if reported.
    pub version: Option<String>,
    /// Final authorization state.
    pub authorization_state: AuthorizationState,
    /// Final connection state.
    pub connection_state: ConnectionState,
    /// Users cached.
    pub users: usize,
    /// Chats cached.
    pub chats: usize,
    /// Files cached.
    pub files: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "events:        {}", self.events)?;
        writeln!(f, "state errors:  {}", self.state_errors)?;
        writeln!(f, "version:       {}", self.version.as_deref().unwrap_or("unknown"))?;
        writeln!(f, "authorization: {}", self.authorization_state)?;
        writeln!(f, "connection:    {}", self.connection_state)?;
        write!(f, "cached:        {} users, {} chats, {} files", self.users, self.chats, self.files)
    }
}

/// Consume events until the stream ends.
///
/// When `answers` is given, authorization prompts (phone number, code,
/// password) are answered with its next lines in order.
pub async fn run<B, R>(
    client: &mut Client<B>,
    mut answers: Option<Lines<R>>,
    options: &SessionOptions,
) -> Result<Summary, CliError>
where
    B: Backend,
    R: AsyncBufRead + Unpin,
{
    let mut summary = Summary::default();
    let mut chats_requested = false;

    while let Some(next) = client.next_event().await {
        let event = match next {
            Ok(event) => event,
            Err(fernwire_client::ClientError::State(error)) => {
                tracing::error!(%error, "state error");
                summary.state_errors += 1;
                continue;
            },
            Err(error) => return Err(error.into()),
        };
        summary.events += 1;
        log_event(&event);

        let Event::AuthorizationStateChanged(state) = &event else {
            continue;
        };
        match state {
            AuthorizationState::WaitPhoneNumber => {
                if let Some(answer) = next_answer(&mut answers, "phone number").await? {
                    client.set_authentication_phone_number(answer)?;
                }
            },
            AuthorizationState::WaitCode => {
                if let Some(answer) = next_answer(&mut answers, "login code").await? {
                    client.check_authentication_code(answer)?;
                }
            },
            AuthorizationState::WaitPassword => {
                if let Some(answer) = next_answer(&mut answers, "password").await? {
                    client.check_authentication_password(answer)?;
                }
            },
            AuthorizationState::Ready if options.chat_limit > 0 && !chats_requested => {
                client.get_chats(options.chat_limit)?;
                chats_requested = true;
            },
            _ => {},
        }
    }

    let coordinator = client.coordinator();
    summary.version = coordinator.version().map(str::to_owned);
    summary.authorization_state = coordinator.authorization_state().clone();
    summary.connection_state = coordinator.connection_state().clone();
    summary.users = coordinator.users().len();
    summary.chats = coordinator.chats().len();
    summary.files = coordinator.files().count();
    Ok(summary)
}

async fn next_answer<R: AsyncBufRead + Unpin>(
    answers: &mut Option<Lines<R>>,
    prompt: &str,
) -> Result<Option<String>, CliError> {
    let Some(lines) = answers else {
        tracing::info!(prompt, "backend is waiting for input, no prompt source");
        return Ok(None);
    };
    tracing::info!(prompt, "waiting for answer");
    let line = lines.next_line().await.map_err(CliError::Prompt)?;
    if line.is_none() {
        tracing::warn!(prompt, "prompt source exhausted");
    }
    Ok(line.map(|line| line.trim().to_owned()))
}

fn log_event(event: &Event) {
    match event {
        Event::VersionDetected(version) => tracing::info!(%version, "backend version"),
        Event::AuthorizationStateChanged(state) => tracing::info!(%state, "authorization"),
        Event::ConnectionStateChanged(state) => tracing::info!(%state, "connection"),
        Event::OptionUpdated { name, value } => tracing::debug!(%name, %value, "option"),
        Event::UserUpdated(record) => {
            tracing::debug!(user = %record.id(), name = %record.user.display_name(), "user");
        },
        Event::NewChatDiscovered { id, chat } => {
            tracing::info!(chat = %id, title = %chat.title, "new chat");
        },
        Event::ChatUpdated { id, chat } => {
            tracing::debug!(chat = %id, unread = chat.unread_count, "chat updated");
        },
        Event::FileUpdated { id, file } => {
            tracing::debug!(file = %id, progress = file.download_progress(), "file");
        },
        Event::UnreadMessageCountUpdated(count) => {
            tracing::info!(
                unread = count.unread_count,
                unmuted = count.unread_unmuted_count,
                "unread messages"
            );
        },
        Event::UnreadChatCountUpdated(count) => {
            tracing::info!(unread = count.unread_count, total = count.total_count, "unread chats");
        },
        Event::Unhandled(response) => match response.error() {
            Some(error) => tracing::warn!(tag = ?response.tag(), %error, "error reply"),
            None => tracing::debug!(kind = %response.kind, tag = ?response.tag(), "unhandled"),
        },
    }
}
