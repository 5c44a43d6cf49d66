//! Configuration loader for DarFind.
//!
//! Reads `config.toml` from the data directory (`~/.darfind/` in production)
//! and deserializes it into [`DarfindConfig`]. Falls back to defaults when the
//! file is missing or malformed.
//!
//! Secrets never come from the file. They are read from the environment,
//! after an optional `.env` file in the working directory has been loaded.

use std::path::{Path, PathBuf};

use darfind_types::config::DarfindConfig;
use secrecy::SecretString;

use crate::sqlite::pool::database_url_for;

/// Environment variable holding the language-model API key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable holding the shared secret expected in `X-SECRET-KEY`.
pub const SECRET_KEY_ENV: &str = "DARFIND_SECRET_KEY";

/// Errors raised while assembling runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingSecret(&'static str),
}

/// Resolve the data directory.
///
/// Priority: `DARFIND_DATA_DIR`, then `~/.darfind`, then `.darfind` in the
/// current directory.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DARFIND_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".darfind");
    }

    PathBuf::from(".darfind")
}

/// Load `.env` from the working directory if present. Existing process
/// variables win over file entries.
///
/// Runs before tracing is installed, so the outcome is returned for the
/// caller to log: `Ok(None)` when there is no `.env`, `Ok(Some(path))` when
/// one was loaded.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    missing_is_none(dotenvy::dotenv())
}

fn missing_is_none(
    result: Result<PathBuf, dotenvy::Error>,
) -> Result<Option<PathBuf>, dotenvy::Error> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`DarfindConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> DarfindConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return DarfindConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return DarfindConfig::default();
        }
    };

    match toml::from_str::<DarfindConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            DarfindConfig::default()
        }
    }
}

/// The configured database URL, or `darfind.db` in the data directory.
pub fn resolve_database_url(config: &DarfindConfig, data_dir: &Path) -> String {
    config
        .database_url
        .clone()
        .unwrap_or_else(|| database_url_for(data_dir))
}

/// Read a required, non-empty secret from the environment.
pub fn require_secret(name: &'static str) -> Result<SecretString, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(SecretString::from(value)),
        _ => Err(ConfigError::MissingSecret(name)),
    }
}
