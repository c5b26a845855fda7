//! Client configuration.
//!
//! The coordinator treats the configuration as opaque: it only forwards the
//! values into the initial backend commands (`setLogVerbosityLevel`,
//! `setTdlibParameters`, `checkDatabaseEncryptionKey`). Loading it from files
//! or the environment is the embedding application's job.

use std::{fmt, path::PathBuf, time::Duration};

use fernwire_proto::TdlibParameters;
use serde::Deserialize;

/// Default bounded wait for one backend poll.
pub const DEFAULT_RECEIVE_TIMEOUT: Duration = Duration::from_secs(1);

/// Default backend log verbosity (errors only).
pub const DEFAULT_LOG_VERBOSITY: i32 = 1;

/// Configuration consumed at construction.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Application identifier issued by the backend operator.
    pub api_id: i64,
    /// Application hash issued by the backend operator.
    pub api_hash: String,
    /// Directory for the backend database.
    pub database_directory: PathBuf,
    /// Directory for downloaded files. Defaults to `files` under the database
    /// directory.
    pub files_directory: Option<PathBuf>,
    /// Key for the local database. Empty means unencrypted.
    pub encryption_key: String,
    /// Backend internal log verbosity.
    pub log_verbosity: i32,
    /// Use the backend's test environment.
    pub use_test_dc: bool,
    /// Keep messages in the local database.
    pub use_message_database: bool,
    /// Enable secret chats.
    pub use_secret_chats: bool,
    /// IETF language tag reported to the backend.
    pub system_language_code: String,
    /// Device model reported to the backend.
    pub device_model: String,
    /// Operating system version reported to the backend.
    pub system_version: String,
    /// Application version reported to the backend.
    pub application_version: String,
    /// Bounded wait for one receive poll, in milliseconds.
    pub receive_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_id: 0,
            api_hash: String::new(),
            database_directory: PathBuf::from("tdlib"),
            files_directory: None,
            encryption_key: String::new(),
            log_verbosity: DEFAULT_LOG_VERBOSITY,
            use_test_dc: false,
            use_message_database: true,
            use_secret_chats: false,
            system_language_code: "en".to_owned(),
            device_model: "Desktop".to_owned(),
            system_version: std::env::consts::OS.to_owned(),
            application_version: env!("CARGO_PKG_VERSION").to_owned(),
            receive_timeout_ms: DEFAULT_RECEIVE_TIMEOUT.as_millis() as u64,
        }
    }
}

impl Config {
    /// Bounded wait for one receive poll. Never zero.
    pub fn receive_timeout(&self) -> Duration {
        Duration::from_millis(self.receive_timeout_ms.max(1))
    }

    /// Directory for downloaded files.
    pub fn files_directory(&self) -> PathBuf {
        self.files_directory.clone().unwrap_or_else(|| self.database_directory.join("files"))
    }

    /// Parameters for the `setTdlibParameters` command.
    pub fn tdlib_parameters(&self) -> TdlibParameters {
        TdlibParameters {
            use_test_dc: self.use_test_dc,
            database_directory: self.database_directory.to_string_lossy().into_owned(),
            files_directory: self.files_directory().to_string_lossy().into_owned(),
            use_file_database: true,
            use_chat_info_database: true,
            use_message_database: self.use_message_database,
            use_secret_chats: self.use_secret_chats,
            api_id: self.api_id,
            api_hash: self.api_hash.clone(),
            system_language_code: self.system_language_code.clone(),
            device_model: self.device_model.clone(),
            system_version: self.system_version.clone(),
            application_version: self.application_version.clone(),
            enable_storage_optimizer: true,
            ignore_file_names: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_id", &self.api_id)
            .field("api_hash", &"<redacted>")
            .field("database_directory", &self.database_directory)
            .field("files_directory", &self.files_directory)
            .field("encryption_key", &"<redacted>")
            .field("log_verbosity", &self.log_verbosity)
            .field("use_test_dc", &self.use_test_dc)
            .field("use_message_database", &self.use_message_database)
            .field("use_secret_chats", &self.use_secret_chats)
            .field("system_language_code", &self.system_language_code)
            .field("device_model", &self.device_model)
            .field("system_version", &self.system_version)
            .field("application_version", &self.application_version)
            .field("receive_timeout_ms", &self.receive_timeout_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            api_id = 12345
            api_hash = "abcdef"
            database_directory = "/var/lib/fernwire"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_id, 12345);
        assert_eq!(config.log_verbosity, DEFAULT_LOG_VERBOSITY);
        assert_eq!(config.files_directory(), PathBuf::from("/var/lib/fernwire/files"));
        assert_eq!(config.receive_timeout(), DEFAULT_RECEIVE_TIMEOUT);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = toml::from_str::<Config>("api_idd = 1");
        assert!(result.is_err());
    }

    #[test]
    fn debug_hides_secrets() {
        let config = Config {
            api_hash: "very-secret-hash".into(),
            encryption_key: "very-secret-key".into(),
            ..Config::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret"));
    }

    #[test]
    fn parameters_carry_credentials() {
        let config = Config { api_id: 7, api_hash: "h".into(), ..Config::default() };
        let parameters = config.tdlib_parameters();
        assert_eq!(parameters.api_id, 7);
        assert_eq!(parameters.api_hash, "h");
        assert_eq!(parameters.files_directory, "tdlib/files");
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let config = Config { receive_timeout_ms: 0, ..Config::default() };
        assert_eq!(config.receive_timeout(), Duration::from_millis(1));
    }
}
