//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use pastebin_server::{create_app, AppState, Config, Database, StorageBackend};
use std::path::Path;
use tempfile::TempDir;

pub(crate) fn test_config_for_dir(dir: &Path, backend: StorageBackend) -> Config {
    Config {
        backend,
        paste_dir: dir.join("pastes").to_str().expect("paste dir").to_string(),
        db_path: dir.join("pastes.db").to_str().expect("db path").to_string(),
        port: 0,
        max_paste_size: 64 * 1024,
        ..Config::default()
    }
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    let db = Database::open(&config).expect("open db");
    test_server_for_database(config, db)
}

pub(crate) fn test_server_for_database(config: Config, db: Database) -> TestServer {
    let app = create_app(AppState::new(config, db));
    TestServer::new(app).expect("server")
}

pub(crate) fn setup_test_server(backend: StorageBackend) -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = test_config_for_dir(temp_dir.path(), backend);
    (test_server_for_config(config), temp_dir)
}

/// One server per storage backend.
pub(crate) fn setup_all_servers() -> Vec<(StorageBackend, TestServer, TempDir)> {
    [StorageBackend::Files, StorageBackend::Sqlite]
        .into_iter()
        .map(|backend| {
            let (server, temp_dir) = setup_test_server(backend);
            (backend, server, temp_dir)
        })
        .collect()
}
