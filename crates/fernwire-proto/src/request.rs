//! Outbound requests.
//!
//! Requests are fire-and-forget: encoding stamps a [`RequestTag`] into
//! `@extra` and the reply, if any, comes back later as an ordinary inbound
//! message.

use serde::Serialize;
use serde_json::Value;

use crate::{EXTRA_FIELD, EncodeError, FileId, JsonMap, RequestTag, TYPE_FIELD};

/// Chat list offset that starts from the top of the list.
const CHAT_LIST_START: &str = "9223372036854775807";

/// Well-known backend commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub enum Request {
    /// Initial session parameters, answering `WaitParameters`.
    SetTdlibParameters {
        /// Session parameters.
        parameters: TdlibParameters,
    },
    /// Local database key, answering `WaitEncryptionKey`.
    CheckDatabaseEncryptionKey {
        /// Encryption key material.
        encryption_key: String,
    },
    /// Backend internal log verbosity.
    SetLogVerbosityLevel {
        /// Verbosity level, 0 (fatal only) to 1023.
        new_verbosity_level: i32,
    },
    /// Phone number, answering `WaitPhoneNumber`.
    SetAuthenticationPhoneNumber {
        /// Phone number in international format.
        phone_number: String,
    },
    /// Login code, answering `WaitCode`.
    CheckAuthenticationCode {
        /// Code received by the user.
        code: String,
    },
    /// Two-step verification password, answering `WaitPassword`.
    CheckAuthenticationPassword {
        /// Password.
        password: String,
    },
    /// Load chats from the main chat list.
    GetChats {
        /// Order to start after; the maximum value starts from the top.
        offset_order: String,
        /// Chat to start after.
        offset_chat_id: i64,
        /// Maximum number of chats.
        limit: i32,
    },
    /// Start downloading a file; progress arrives as file updates.
    DownloadFile {
        /// File to download.
        file_id: FileId,
        /// Priority 1 to 32, higher downloads first.
        priority: i32,
        /// Byte offset to start from.
        offset: i64,
        /// Bytes to download, 0 for the whole file.
        limit: i64,
        /// Whether the reply waits for completion.
        synchronous: bool,
    },
    /// Close the backend session gracefully.
    Close,
}

impl Request {
    /// `getChats` from the top of the main list.
    pub fn get_chats(limit: i32) -> Self {
        Self::GetChats { offset_order: CHAT_LIST_START.to_owned(), offset_chat_id: 0, limit }
    }

    /// `downloadFile` for the whole file at the given priority.
    pub fn download_file(file_id: FileId, priority: i32) -> Self {
        Self::DownloadFile { file_id, priority, offset: 0, limit: 0, synchronous: false }
    }

    /// Wire `@type` of this request, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetTdlibParameters { .. } => "setTdlibParameters",
            Self::CheckDatabaseEncryptionKey { .. } => "checkDatabaseEncryptionKey",
            Self::SetLogVerbosityLevel { .. } => "setLogVerbosityLevel",
            Self::SetAuthenticationPhoneNumber { .. } => "setAuthenticationPhoneNumber",
            Self::CheckAuthenticationCode { .. } => "checkAuthenticationCode",
            Self::CheckAuthenticationPassword { .. } => "checkAuthenticationPassword",
            Self::GetChats { .. } => "getChats",
            Self::DownloadFile { .. } => "downloadFile",
            Self::Close => "close",
        }
    }

    /// Encode to wire JSON with `tag` stamped into `@extra`.
    pub fn encode(&self, tag: RequestTag) -> Result<String, EncodeError> {
        match serde_json::to_value(self)? {
            Value::Object(object) => encode_raw(object, tag),
            _ => Err(EncodeError::MissingType),
        }
    }
}

/// Encode an arbitrary request object with `tag` stamped into `@extra`.
///
/// The object must name its kind in `@type`. An `@extra` already present is
/// overwritten, since the backend echoes exactly one value.
pub fn encode_raw(mut object: JsonMap, tag: RequestTag) -> Result<String, EncodeError> {
    if !object.get(TYPE_FIELD).is_some_and(Value::is_string) {
        return Err(EncodeError::MissingType);
    }
    object.insert(EXTRA_FIELD.to_owned(), Value::from(tag.0));
    Ok(serde_json::to_string(&object)?)
}

/// Session parameters sent once the backend asks for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type", rename = "tdlibParameters")]
pub struct TdlibParameters {
    /// Use the test data center.
    pub use_test_dc: bool,
    /// Directory for the persistent database.
    pub database_directory: String,
    /// Directory for downloaded files.
    pub files_directory: String,
    /// Keep file metadata in the database.
    pub use_file_database: bool,
    /// Keep user, group and chat info in the database.
    pub use_chat_info_database: bool,
    /// Keep messages in the database.
    pub use_message_database: bool,
    /// Enable secret chats.
    pub use_secret_chats: bool,
    /// Application identifier.
    pub api_id: i64,
    /// Application hash.
    pub api_hash: String,
    /// IETF language tag of the user's system.
    pub system_language_code: String,
    /// Device model.
    pub device_model: String,
    /// Operating system version.
    pub system_version: String,
    /// Application version.
    pub application_version: String,
    /// Let the backend delete old files automatically.
    pub enable_storage_optimizer: bool,
    /// Ignore original file names when saving downloads.
    pub ignore_file_names: bool,
}
