//! SQLite paste storage.
//!
//! Schema: `pastes(paste_id PRIMARY KEY, language, content, created_at)`.
//! The primary key turns id collisions into [`AppError::DuplicateKey`].

use super::{is_lookup_candidate, validate_put, PasteStore};
use crate::{config::StorageBackend, error::AppError, models::paste::Paste};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OpenFlags, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// `CURRENT_TIMESTAMP` text format.
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS pastes (
    paste_id TEXT PRIMARY KEY,
    language TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// Paste store backed by a single SQLite table.
///
/// The connection is shared behind a mutex; each call holds the guard only for
/// the duration of its statement.
pub struct SqlitePasteStore {
    conn: Mutex<Connection>,
}

impl SqlitePasteStore {
    /// Open (creating if needed) the database at `path` and ensure the schema.
    ///
    /// # Errors
    /// Returns [`AppError::StorageUnavailable`] when the parent directory, the
    /// database file, or the schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    AppError::StorageUnavailable(format!(
                        "create database directory '{}': {}",
                        parent.display(),
                        err
                    ))
                })?;
                tracing::info!("Created database directory '{}'", parent.display());
            }
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|err| {
            AppError::StorageUnavailable(format!("open database '{}': {}", path.display(), err))
        })?;
        let store = Self::from_connection(conn)?;
        tracing::info!("Connected to SQLite database at '{}'", path.display());
        Ok(store)
    }

    /// Open a private in-memory database. Contents vanish on drop.
    ///
    /// # Errors
    /// Returns [`AppError::StorageUnavailable`] when SQLite cannot initialize.
    pub fn open_in_memory() -> Result<Self, AppError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, AppError> {
        // In-memory databases report "memory" and ignore WAL.
        let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(CREATE_TABLE_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.conn.lock().map_err(|_| {
            AppError::StorageUnavailable("SQLite connection lock poisoned".to_string())
        })
    }
}

fn parse_created_at(id: &str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    NaiveDateTime::parse_from_str(raw, SQLITE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|err| {
            AppError::StorageUnavailable(format!(
                "read paste {}: invalid created_at '{}': {}",
                id, raw, err
            ))
        })
}

impl PasteStore for SqlitePasteStore {
    fn put(&self, id: &str, language: &str, content: &str) -> Result<(), AppError> {
        validate_put(id, language)?;
        let conn = self.connection()?;
        let result = conn.execute(
            "INSERT INTO pastes (paste_id, language, content) VALUES (?1, ?2, ?3)",
            params![id, language, content],
        );
        match result {
            Ok(_) => {
                tracing::debug!("Inserted paste {} ({} bytes)", id, content.len());
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(AppError::DuplicateKey(id.to_string()))
            }
            Err(err) => Err(AppError::StorageUnavailable(format!(
                "insert paste {}: {}",
                id, err
            ))),
        }
    }

    fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        if !is_lookup_candidate(id) {
            return Ok(None);
        }
        let row: Option<(String, String, String)> = {
            let conn = self.connection()?;
            conn.query_row(
                "SELECT language, content, created_at FROM pastes WHERE paste_id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()
            .map_err(|err| AppError::StorageUnavailable(format!("select paste {}: {}", id, err)))?
        };

        let Some((language, content, created_at)) = row else {
            return Ok(None);
        };
        Ok(Some(Paste {
            id: id.to_string(),
            language,
            content,
            created_at: parse_created_at(id, &created_at)?,
        }))
    }

    fn backend(&self) -> StorageBackend {
        StorageBackend::Sqlite
    }
}
