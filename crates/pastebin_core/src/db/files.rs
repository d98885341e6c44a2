//! File-per-paste storage.
//!
//! Each paste lives in `<dir>/<id>`: the first line holds the language tag and
//! the rest of the file is the content, verbatim. Writes go through a
//! dot-prefixed temporary file in the same directory that is linked into place
//! without clobbering, so readers never observe a partial record and an
//! existing id is never overwritten.

use super::{is_lookup_candidate, validate_put, PasteStore};
use crate::{config::StorageBackend, error::AppError, models::paste::Paste};
use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

const TEMP_PREFIX: &str = ".paste-";

/// Paste store keeping one file per paste.
#[derive(Debug, Clone)]
pub struct FilePasteStore {
    dir: PathBuf,
}

impl FilePasteStore {
    /// Open (and create if needed) the paste directory.
    ///
    /// # Errors
    /// Returns [`AppError::StorageUnavailable`] when the directory cannot be
    /// created or the path exists but is not a directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|err| {
                AppError::StorageUnavailable(format!(
                    "create paste directory '{}': {}",
                    dir.display(),
                    err
                ))
            })?;
            tracing::info!("Created paste directory '{}'", dir.display());
        } else if !dir.is_dir() {
            return Err(AppError::StorageUnavailable(format!(
                "paste directory '{}' is not a directory",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    /// Directory holding the paste files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(id)
    }

    fn write_record(&self, id: &str, language: &str, content: &str) -> Result<(), AppError> {
        let write_err = |err: std::io::Error| {
            AppError::StorageUnavailable(format!("write paste {}: {}", id, err))
        };

        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(&self.dir)
            .map_err(write_err)?;
        temp.write_all(language.as_bytes()).map_err(write_err)?;
        temp.write_all(b"\n").map_err(write_err)?;
        temp.write_all(content.as_bytes()).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;

        match temp.persist_noclobber(self.path_for(id)) {
            Ok(_) => Ok(()),
            Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
                Err(AppError::DuplicateKey(id.to_string()))
            }
            Err(err) => Err(write_err(err.error)),
        }
    }
}

/// Split a stored record into `(language, content)`.
fn decode_record(id: &str, bytes: Vec<u8>) -> Result<(String, String), AppError> {
    let text = String::from_utf8(bytes).map_err(|_| {
        AppError::StorageUnavailable(format!("read paste {}: record is not valid UTF-8", id))
    })?;
    let Some((language, content)) = text.split_once('\n') else {
        return Err(AppError::StorageUnavailable(format!(
            "read paste {}: record has no language header",
            id
        )));
    };
    Ok((language.to_string(), content.to_string()))
}

impl PasteStore for FilePasteStore {
    fn put(&self, id: &str, language: &str, content: &str) -> Result<(), AppError> {
        validate_put(id, language)?;
        self.write_record(id, language, content)?;
        tracing::debug!("Wrote paste {} ({} bytes)", id, content.len());
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        if !is_lookup_candidate(id) {
            return Ok(None);
        }
        let read_err = |err: std::io::Error| {
            AppError::StorageUnavailable(format!("read paste {}: {}", id, err))
        };

        let mut file = match File::open(self.path_for(id)) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(read_err(err)),
        };
        let metadata = file.metadata().map_err(read_err)?;
        if !metadata.is_file() {
            return Ok(None);
        }
        let created_at: DateTime<Utc> = metadata.modified().map_err(read_err)?.into();

        let mut bytes = Vec::with_capacity(metadata.len() as usize);
        file.read_to_end(&mut bytes).map_err(read_err)?;
        let (language, content) = decode_record(id, bytes)?;

        Ok(Some(Paste {
            id: id.to_string(),
            language,
            content,
            created_at,
        }))
    }

    fn backend(&self) -> StorageBackend {
        StorageBackend::Files
    }
}
