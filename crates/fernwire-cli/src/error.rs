//! CLI errors.

use std::path::PathBuf;

use fernwire_client::ClientError;
use thiserror::Error;

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid.
    #[error("invalid configuration in {}", path.display())]
    Config {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value for {name}: {value:?}")]
    Env {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// Prompt input failed.
    #[error("failed to read answer")]
    Prompt(#[source] std::io::Error),

    /// Client failure.
    #[error(transparent)]
    Client(#[from] ClientError),
}
