//! Core domain library for the pastebin (config, storage, models, highlighting).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Paste storage backends.
pub mod db;
/// Process-global environment mutation helpers.
pub mod env;
/// Application error types (storage/domain).
pub mod error;
/// Syntax highlighting and the language catalog.
pub mod highlight;
/// Data models for requests, persistence and rendering.
pub mod models;
/// Paste identifier generation.
pub mod naming;
/// Text normalization helpers.
pub mod text;

pub use config::{Config, StorageBackend};
pub use constants::{DEFAULT_PORT, MAX_PASTE_ID_LEN};
pub use db::{Database, PasteStore};
pub use error::AppError;
