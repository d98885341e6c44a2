//! Paste storage layer.
//!
//! Both backends implement [`PasteStore`]; [`Database`] picks one from
//! [`Config::backend`] at startup.

/// File-per-paste backend.
pub mod files;
/// SQLite-backed relational backend.
pub mod sqlite;

use crate::{
    config::{Config, StorageBackend},
    error::AppError,
    models::paste::Paste,
    naming::is_valid_id,
    text::validate_language_tag,
};

pub use files::FilePasteStore;
pub use sqlite::SqlitePasteStore;

/// Storage contract shared by every backend.
///
/// Implementations must be safe to call from concurrent requests.
pub trait PasteStore: Send + Sync {
    /// Insert a new paste under `id`.
    ///
    /// # Errors
    /// - [`AppError::BadRequest`] when `id` or `language` is malformed.
    /// - [`AppError::DuplicateKey`] when `id` is already taken.
    /// - [`AppError::StorageUnavailable`] when the medium cannot be written.
    fn put(&self, id: &str, language: &str, content: &str) -> Result<(), AppError>;

    /// Fetch a paste by exact id.
    ///
    /// # Returns
    /// `Ok(None)` when the id is absent or has an invalid shape.
    ///
    /// # Errors
    /// [`AppError::StorageUnavailable`] when the medium is unreadable or the
    /// record is corrupt.
    fn get(&self, id: &str) -> Result<Option<Paste>, AppError>;

    /// Backend kind, for logs.
    fn backend(&self) -> StorageBackend;
}

/// Shared precondition for `put`, identical across backends.
pub(crate) fn validate_put(id: &str, language: &str) -> Result<(), AppError> {
    if !is_valid_id(id) {
        return Err(AppError::BadRequest(format!("invalid paste id '{}'", id)));
    }
    validate_language_tag(language).map_err(AppError::BadRequest)
}

/// Shared precondition for `get`: malformed ids never reach storage.
pub(crate) fn is_lookup_candidate(id: &str) -> bool {
    if is_valid_id(id) {
        return true;
    }
    tracing::warn!("Rejecting lookup for invalid paste id ({} bytes)", id.len());
    false
}

/// Database handle wrapping the configured paste store.
pub struct Database {
    pub pastes: Box<dyn PasteStore>,
}

impl Database {
    /// Open the backend selected by `config`, creating its directory or file.
    ///
    /// # Errors
    /// Returns [`AppError::StorageUnavailable`] when the directory or database
    /// cannot be created or opened.
    pub fn open(config: &Config) -> Result<Self, AppError> {
        let pastes: Box<dyn PasteStore> = match config.backend {
            StorageBackend::Files => Box::new(FilePasteStore::open(&config.paste_dir)?),
            StorageBackend::Sqlite => Box::new(SqlitePasteStore::open(&config.db_path)?),
        };
        tracing::info!("Using {} paste storage", pastes.backend());
        Ok(Self { pastes })
    }

    /// Wrap an already-open store.
    pub fn from_store(pastes: impl PasteStore + 'static) -> Self {
        Self {
            pastes: Box::new(pastes),
        }
    }

    /// Backend kind of the wrapped store.
    pub fn backend(&self) -> StorageBackend {
        self.pastes.backend()
    }
}

#[cfg(test)]
mod tests;
