//! State and cache coordinator.
//!
//! The `Coordinator` consumes classified updates in delivery order, applies
//! each one to exactly one piece of local state and reports what changed.

use std::collections::HashMap;

use fernwire_proto::{
    AuthorizationState, Chat, ChatChange, ChatId, ConnectionState, File, FileId, JsonMap,
    OptionValue, RawId, Request, Response, UnreadChatCount, UnreadMessageCount, Update, User,
    UserId,
};

use crate::{
    cache::{ChatCache, UserCache, UserRecord},
    config::Config,
    error::CoordinatorError,
    event::{CoordinatorAction, Event},
};

/// Option naming the authorized user.
const MY_ID_OPTION: &str = "my_id";

/// Local mirror of the backend session.
///
/// # Invariants
///
/// - Every successfully handled update yields exactly one
///   [`CoordinatorAction::Emit`], placed first in the returned actions.
/// - A failed update changes no state and emits nothing.
/// - A chat enters the cache only through `updateNewChat`; the first
///   insertion of an id is reported as [`Event::NewChatDiscovered`], every
///   later one as [`Event::ChatUpdated`].
/// - Cache entries are never removed during a session.
#[derive(Debug)]
pub struct Coordinator {
    config: Config,
    version: Option<String>,
    authorization_state: AuthorizationState,
    connection_state: ConnectionState,
    options: HashMap<String, OptionValue>,
    users: UserCache,
    chats: ChatCache,
    files: HashMap<FileId, File>,
    unread_messages: Option<UnreadMessageCount>,
    unread_chats: Option<UnreadChatCount>,
}

impl Coordinator {
    /// Create a coordinator in the initial state.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            version: None,
            authorization_state: AuthorizationState::default(),
            connection_state: ConnectionState::default(),
            options: HashMap::new(),
            users: UserCache::default(),
            chats: ChatCache::default(),
            files: HashMap::new(),
            unread_messages: None,
            unread_chats: None,
        }
    }

    /// Commands to issue once, before the first update is consumed.
    pub fn start(&self) -> Vec<CoordinatorAction> {
        vec![CoordinatorAction::Send(Request::SetLogVerbosityLevel {
            new_verbosity_level: self.config.log_verbosity,
        })]
    }

    /// Apply one update and return the resulting actions.
    pub fn handle(&mut self, update: Update) -> Result<Vec<CoordinatorAction>, CoordinatorError> {
        tracing::trace!(kind = update.kind(), "applying update");

        match update {
            Update::Version(version) => Ok(self.handle_version(version)),
            Update::AuthorizationState(state) => self.handle_authorization_state(state),
            Update::Option { name, value } => Ok(self.handle_option(name, value)),
            Update::ConnectionState(state) => self.handle_connection_state(state),
            Update::User(user) => Ok(self.handle_user(user)),
            Update::File(file) => Ok(self.handle_file(file)),
            Update::NewChat(chat) => Ok(self.handle_new_chat(chat)),
            Update::ChatChanged { chat_id, change, raw } => {
                Ok(self.handle_chat_change(chat_id, change, raw))
            },
            Update::UnreadMessageCount(count) => {
                self.unread_messages = Some(count.clone());
                Ok(emit(Event::UnreadMessageCountUpdated(count)))
            },
            Update::UnreadChatCount(count) => {
                self.unread_chats = Some(count.clone());
                Ok(emit(Event::UnreadChatCountUpdated(count)))
            },
            Update::Other(response) => Ok(self.handle_other(response)),
        }
    }

    fn handle_version(&mut self, version: String) -> Vec<CoordinatorAction> {
        tracing::info!(%version, "backend version detected");
        self.version = Some(version.clone());
        emit(Event::VersionDetected(version))
    }

    fn handle_authorization_state(
        &mut self,
        state: AuthorizationState,
    ) -> Result<Vec<CoordinatorAction>, CoordinatorError> {
        if let AuthorizationState::Unrecognized(name) = state {
            tracing::warn!(state = %name, "unrecognized authorization state");
            return Err(CoordinatorError::UnrecognizedAuthorizationState(name));
        }

        tracing::info!(
            from = %self.authorization_state,
            to = %state,
            "authorization state changed"
        );
        self.authorization_state = state.clone();

        let reaction = match state {
            AuthorizationState::WaitParameters => Some(Request::SetTdlibParameters {
                parameters: self.config.tdlib_parameters(),
            }),
            AuthorizationState::WaitEncryptionKey => Some(Request::CheckDatabaseEncryptionKey {
                encryption_key: self.config.encryption_key.clone(),
            }),
            _ => None,
        };

        let mut actions = emit(Event::AuthorizationStateChanged(state));
        actions.extend(reaction.map(CoordinatorAction::Send));
        Ok(actions)
    }

    fn handle_connection_state(
        &mut self,
        state: ConnectionState,
    ) -> Result<Vec<CoordinatorAction>, CoordinatorError> {
        if let ConnectionState::Unrecognized(name) = state {
            tracing::warn!(state = %name, "unrecognized connection state");
            return Err(CoordinatorError::UnrecognizedConnectionState(name));
        }

        tracing::debug!(from = %self.connection_state, to = %state, "connection state changed");
        self.connection_state = state.clone();
        Ok(emit(Event::ConnectionStateChanged(state)))
    }

    fn handle_option(&mut self, name: String, value: OptionValue) -> Vec<CoordinatorAction> {
        tracing::debug!(%name, %value, "option updated");
        self.options.insert(name.clone(), value.clone());

        if name == MY_ID_OPTION {
            match self.my_id() {
                Some(my_id) => self.users.promote(&my_id),
                None => self.users.demote(),
            }
        }

        emit(Event::OptionUpdated { name, value })
    }

    fn handle_user(&mut self, user: User) -> Vec<CoordinatorAction> {
        let my_id = self.my_id();
        let record = self.users.upsert(user, my_id.as_ref());
        tracing::debug!(user = %record.id(), "user updated");
        emit(Event::UserUpdated(record))
    }

    fn handle_file(&mut self, file: File) -> Vec<CoordinatorAction> {
        let id = file.id;
        tracing::debug!(file = %id, progress = file.download_progress(), "file updated");
        self.files.insert(id, file.clone());
        emit(Event::FileUpdated { id, file })
    }

    fn handle_new_chat(&mut self, chat: Chat) -> Vec<CoordinatorAction> {
        let id = chat.id.clone();
        if self.chats.upsert(chat.clone()) {
            tracing::debug!(chat = %id, "new chat discovered");
            emit(Event::NewChatDiscovered { id, chat })
        } else {
            emit(Event::ChatUpdated { id, chat })
        }
    }

    fn handle_chat_change(
        &mut self,
        id: ChatId,
        change: ChatChange,
        raw: JsonMap,
    ) -> Vec<CoordinatorAction> {
        match self.chats.apply(&id, change) {
            Ok(chat) => {
                let chat = chat.clone();
                emit(Event::ChatUpdated { id, chat })
            },
            Err(change) => {
                let kind = change.wire_name();
                tracing::debug!(chat = %id, kind, "change for unknown chat");
                emit(Event::Unhandled(Response::new(kind.to_owned(), raw)))
            },
        }
    }

    fn handle_other(&self, response: Response) -> Vec<CoordinatorAction> {
        match response.error() {
            Some(error) => tracing::warn!(tag = ?response.tag(), %error, "backend error reply"),
            None => {
                tracing::debug!(kind = %response.kind, tag = ?response.tag(), "unhandled message");
            },
        }
        emit(Event::Unhandled(response))
    }

    /// Self identifier from the `my_id` option.
    fn my_id(&self) -> Option<RawId> {
        match self.options.get(MY_ID_OPTION)? {
            OptionValue::Integer(id) => Some(RawId::Int(*id)),
            OptionValue::String(id) => Some(RawId::Str(id.clone())),
            OptionValue::Boolean(_) | OptionValue::Empty => None,
        }
    }

    /// Configuration the coordinator was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Backend version, once reported.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Current authorization state.
    pub fn authorization_state(&self) -> &AuthorizationState {
        &self.authorization_state
    }

    /// Current connection state.
    pub fn connection_state(&self) -> &ConnectionState {
        &self.connection_state
    }

    /// Most recent value of an option.
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// The authorized user, once known.
    pub fn me(&self) -> Option<&UserRecord> {
        self.users.me()
    }

    /// Look up a user, self included.
    pub fn user(&self, id: &UserId) -> Option<&UserRecord> {
        self.users.get(id)
    }

    /// User cache.
    pub fn users(&self) -> &UserCache {
        &self.users
    }

    /// Look up a chat.
    pub fn chat(&self, id: &ChatId) -> Option<&Chat> {
        self.chats.get(id)
    }

    /// Chat cache.
    pub fn chats(&self) -> &ChatCache {
        &self.chats
    }

    /// Look up a file.
    pub fn file(&self, id: FileId) -> Option<&File> {
        self.files.get(&id)
    }

    /// All cached files. Order is unspecified.
    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }

    /// Latest unread message counters.
    pub fn unread_message_count(&self) -> Option<&UnreadMessageCount> {
        self.unread_messages.as_ref()
    }

    /// Latest unread chat counters.
    pub fn unread_chat_count(&self) -> Option<&UnreadChatCount> {
        self.unread_chats.as_ref()
    }
}

fn emit(event: Event) -> Vec<CoordinatorAction> {
    vec![CoordinatorAction::Emit(event)]
}
