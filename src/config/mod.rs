//! Application configuration.
//!
//! The process is configured by an explicit [`AppConfig`] struct resolved once
//! at startup: an optional `tally.toml` file provides defaults, and the
//! `DATABASE_URL` / `ADMIN_ID` environment variables override it. The
//! administrator identity is required and immutable for the process lifetime.

/// Database connection and table creation
pub mod database;

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Database used when neither the config file nor the environment names one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://tallybot.sqlite?mode=rwc";

/// Default location of the optional configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "tally.toml";

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection string for the SQLite database.
    pub database_url: String,
    /// The single privileged user permitted to edit recorded transactions.
    pub admin_user_id: i64,
}

/// Raw contents of `tally.toml`. Every field is optional; the environment
/// can supply or override any of them.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// Connection string for the SQLite database.
    pub database_url: Option<String>,
    /// The administrator's chat user ID.
    pub admin_user_id: Option<i64>,
}

/// Loads the configuration file from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.as_ref().display()),
    })
}

/// Loads the main application configuration: `tally.toml` if present, then
/// environment overrides.
pub fn load_app_configuration() -> Result<AppConfig> {
    let file = if Path::new(DEFAULT_CONFIG_PATH).exists() {
        Some(load_config_file(DEFAULT_CONFIG_PATH)?)
    } else {
        None
    };

    resolve_configuration(
        file,
        std::env::var("DATABASE_URL").ok(),
        std::env::var("ADMIN_ID").ok(),
    )
}

/// Merges file and environment sources into an [`AppConfig`].
///
/// Environment values win over the file; the database URL falls back to
/// [`DEFAULT_DATABASE_URL`], while a missing administrator identity is a
/// configuration error.
pub fn resolve_configuration(
    file: Option<FileConfig>,
    env_database_url: Option<String>,
    env_admin_id: Option<String>,
) -> Result<AppConfig> {
    let file = file.unwrap_or_default();

    let database_url = env_database_url
        .or(file.database_url)
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    let admin_user_id = match env_admin_id {
        Some(raw) => raw.trim().parse().map_err(|_| Error::Config {
            message: format!("ADMIN_ID must be an integer user ID, got '{raw}'"),
        })?,
        None => file.admin_user_id.ok_or_else(|| Error::Config {
            message: "no administrator configured: set ADMIN_ID or admin_user_id in tally.toml"
                .to_string(),
        })?,
    };

    Ok(AppConfig {
        database_url,
        admin_user_id,
    })
}
