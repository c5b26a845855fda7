//! Coordinator events and actions.

use fernwire_proto::{
    AuthorizationState, Chat, ChatId, ConnectionState, File, FileId, OptionValue, Request,
    Response, UnreadChatCount, UnreadMessageCount,
};

use crate::UserRecord;

/// What changed, published once per consumed update.
///
/// Every event carries the full post-update value, so a consumer never has
/// to query the coordinator to learn what an event refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Backend reported its version.
    VersionDetected(String),

    /// Authorization lifecycle moved to a new state.
    AuthorizationStateChanged(AuthorizationState),

    /// An option was set or changed.
    OptionUpdated {
        /// Option name.
        name: String,
        /// New value.
        value: OptionValue,
    },

    /// Connectivity moved to a new state.
    ConnectionStateChanged(ConnectionState),

    /// A user record was inserted or replaced.
    UserUpdated(UserRecord),

    /// A file record was inserted or replaced.
    FileUpdated {
        /// File identifier.
        id: FileId,
        /// Full file record after the update.
        file: File,
    },

    /// A chat was observed for the first time this session.
    NewChatDiscovered {
        /// Chat identifier.
        id: ChatId,
        /// Full chat record.
        chat: Chat,
    },

    /// A known chat was replaced or partially updated.
    ChatUpdated {
        /// Chat identifier.
        id: ChatId,
        /// Full chat record after the update.
        chat: Chat,
    },

    /// Unread message counters were replaced.
    UnreadMessageCountUpdated(UnreadMessageCount),

    /// Unread chat counters were replaced.
    UnreadChatCountUpdated(UnreadChatCount),

    /// A message the coordinator does not interpret, forwarded whole.
    ///
    /// Responses to requests land here; [`Response::tag`] correlates them.
    Unhandled(Response),
}

impl Event {
    /// Short name of the event, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::VersionDetected(_) => "version_detected",
            Self::AuthorizationStateChanged(_) => "authorization_state_changed",
            Self::OptionUpdated { .. } => "option_updated",
            Self::ConnectionStateChanged(_) => "connection_state_changed",
            Self::UserUpdated(_) => "user_updated",
            Self::FileUpdated { .. } => "file_updated",
            Self::NewChatDiscovered { .. } => "new_chat_discovered",
            Self::ChatUpdated { .. } => "chat_updated",
            Self::UnreadMessageCountUpdated(_) => "unread_message_count_updated",
            Self::UnreadChatCountUpdated(_) => "unread_chat_count_updated",
            Self::Unhandled(_) => "unhandled",
        }
    }
}

/// Actions the coordinator produces for the caller to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinatorAction {
    /// Publish an event to consumers.
    Emit(Event),

    /// Hand a command to the backend.
    Send(Request),
}
