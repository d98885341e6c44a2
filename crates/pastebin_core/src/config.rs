//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_DB_PATH, DEFAULT_HOST, DEFAULT_MAX_PASTE_SIZE, DEFAULT_PASTE_DIR, DEFAULT_PORT,
};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One file per paste under `paste_dir`.
    #[default]
    Files,
    /// Single `pastes` table in an SQLite database at `db_path`.
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "files" | "file" | "fs" => Ok(Self::Files),
            "sqlite" | "db" | "relational" => Ok(Self::Sqlite),
            other => Err(format!(
                "unknown storage backend '{}' (expected 'files' or 'sqlite')",
                other
            )),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Files => f.write_str("files"),
            Self::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Runtime configuration for the pastebin.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend: StorageBackend,
    pub paste_dir: String,
    pub db_path: String,
    pub host: String,
    pub port: u16,
    pub max_paste_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            paste_dir: DEFAULT_PASTE_DIR.to_string(),
            db_path: DEFAULT_DB_PATH.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_paste_size: DEFAULT_MAX_PASTE_SIZE,
        }
    }
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    None
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn backend_from_env() -> StorageBackend {
    match env::var("STORAGE_BACKEND") {
        Ok(value) if !value.trim().is_empty() => value.parse().unwrap_or_else(|err| {
            tracing::warn!("{}; falling back to '{}'", err, StorageBackend::default());
            StorageBackend::default()
        }),
        _ => StorageBackend::default(),
    }
}

fn nonempty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing or invalid.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: backend_from_env(),
            paste_dir: nonempty_env("PASTE_DIR")
                .map(expand_tilde)
                .unwrap_or(defaults.paste_dir),
            db_path: nonempty_env("DB_PATH")
                .map(expand_tilde)
                .unwrap_or(defaults.db_path),
            host: nonempty_env("HOST")
                .map(|host| host.trim().to_string())
                .unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            max_paste_size: env::var("MAX_PASTE_SIZE")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.max_paste_size),
        }
    }
}
