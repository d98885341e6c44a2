//! Store contract tests run against both backends.

use super::*;
use crate::naming::generate_id;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

fn setup_file_store() -> (FilePasteStore, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let store = FilePasteStore::open(temp_dir.path().join("pastes")).expect("file store");
    (store, temp_dir)
}

fn setup_sqlite_store() -> (SqlitePasteStore, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let store = SqlitePasteStore::open(temp_dir.path().join("pastes.db")).expect("sqlite store");
    (store, temp_dir)
}

/// Every backend under test, each with its owning temp dir.
fn all_stores() -> Vec<(Box<dyn PasteStore>, TempDir)> {
    let (files, files_dir) = setup_file_store();
    let (sqlite, sqlite_dir) = setup_sqlite_store();
    vec![
        (Box::new(files) as Box<dyn PasteStore>, files_dir),
        (Box::new(sqlite) as Box<dyn PasteStore>, sqlite_dir),
    ]
}

mod concurrency;
