//! Fernwire wire model
//!
//! Typed view of the JSON protocol spoken by the messaging backend. Every
//! message is a JSON object whose `@type` field names its kind. Inbound
//! objects are decoded and classified into an [`Update`]; outbound commands
//! are built as [`Request`] values and encoded with a request tag that the
//! backend echoes back in `@extra`.
//!
//! # Records
//!
//! Records the client branches on ([`User`], [`Chat`], [`File`], the unread
//! counters) carry typed fields for what the client reads plus an `extra`
//! map holding every other field exactly as received. New backend fields
//! therefore survive a decode and re-encode without code changes.
//!
//! # Identifiers
//!
//! User and chat identifiers are opaque ([`RawId`]): a JSON integer stays an
//! integer and a JSON string stays a string. File identifiers are numeric.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chat;
mod counters;
mod error;
mod file;
mod id;
mod option;
mod request;
mod response;
mod state;
mod update;
mod user;

pub use chat::{Chat, ChatChange};
pub use counters::{UnreadChatCount, UnreadMessageCount};
pub use error::{DecodeError, EncodeError};
pub use file::{File, LocalFile, RemoteFile};
pub use id::{ChatId, FileId, RawId, UserId};
pub use option::OptionValue;
pub use request::{Request, TdlibParameters, encode_raw};
pub use response::{ProtocolError, RequestTag, Response};
pub use state::{AuthorizationState, ConnectionState};
pub use update::Update;
pub use user::{User, UserStatus};

/// JSON object type used for residual fields and raw messages.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Name of the discriminant field carried by every protocol object.
pub const TYPE_FIELD: &str = "@type";

/// Name of the request tag field echoed back by the backend.
pub const EXTRA_FIELD: &str = "@extra";
