//! Load the client configuration from a TOML file and the environment.
//!
//! Precedence, lowest first: built-in defaults, the config file, then the
//! `FERNWIRE_*` environment variables.

use std::path::Path;

use fernwire_client::Config;

use crate::error::CliError;

/// Overrides `api_id`.
pub const ENV_API_ID: &str = "FERNWIRE_API_ID";

/// Overrides `api_hash`.
pub const ENV_API_HASH: &str = "FERNWIRE_API_HASH";

/// Overrides `encryption_key`.
pub const ENV_ENCRYPTION_KEY: &str = "FERNWIRE_ENCRYPTION_KEY";

/// Load configuration from `path` (if given) and the process environment.
pub fn load(path: Option<&Path>) -> Result<Config, CliError> {
    let config = match path {
        Some(path) => load_file(path)?,
        None => Config::default(),
    };
    apply_env(config, |name| std::env::var(name).ok())
}

/// Parse a configuration file.
pub fn load_file(path: &Path) -> Result<Config, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| CliError::Read { path: path.to_owned(), source })?;
    toml::from_str(&text).map_err(|source| CliError::Config { path: path.to_owned(), source })
}

/// Apply environment overrides read through `lookup`.
pub fn apply_env(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config, CliError> {
    if let Some(value) = lookup(ENV_API_ID) {
        config.api_id =
            value.trim().parse().map_err(|_| CliError::Env { name: ENV_API_ID, value })?;
    }
    if let Some(value) = lookup(ENV_API_HASH) {
        config.api_hash = value;
    }
    if let Some(value) = lookup(ENV_ENCRYPTION_KEY) {
        config.encryption_key = value;
    }
    Ok(config)
}
