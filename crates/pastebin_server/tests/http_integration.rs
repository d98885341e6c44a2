//! Integration tests for the pastebin HTTP pages.

mod support;

use axum::http::StatusCode;
use axum_test::TestResponse;
use pastebin_core::constants::CREATE_ID_ATTEMPTS;
use pastebin_server::{db::PasteStore, models::paste::Paste, AppError, Database, StorageBackend};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use support::{setup_all_servers, setup_test_server, test_config_for_dir, test_server_for_database};

fn location(response: &TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .expect("ascii location")
        .to_string()
}

async fn create(server: &axum_test::TestServer, content: &str, language: &str) -> String {
    let response = server
        .post("/")
        .form(&[("content", content), ("language", language)])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    location(&response)
}

#[tokio::test]
async fn test_index_lists_languages() {
    let (server, _temp) = setup_test_server(StorageBackend::Files);
    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains(r#"<form method="post" action="/">"#));
    assert!(body.contains(r#"<option value="python""#));
    assert!(body.contains(r#"<option value="plain-text" selected>"#));
}

#[tokio::test]
async fn test_create_and_view_paste_on_every_backend() {
    for (backend, server, _temp) in setup_all_servers() {
        let location = create(&server, "print('hi')", "python3").await;
        let id = location.trim_start_matches('/');
        assert_eq!(id.len(), 22, "backend {}", backend);

        let response = server.get(&location).await;
        assert_eq!(response.status_code(), StatusCode::OK, "backend {}", backend);
        let body = response.text();
        assert!(body.contains("<span"), "backend {}", backend);
        assert!(body.contains(r#"class="source""#), "backend {}", backend);
        assert!(body.contains(".hl-"), "backend {}", backend);
        assert!(body.contains(id), "backend {}", backend);
    }
}

#[tokio::test]
async fn test_each_submission_gets_a_new_id() {
    let (server, _temp) = setup_test_server(StorageBackend::Sqlite);
    let first = create(&server, "same", "text").await;
    let second = create(&server, "same", "text").await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_empty_content_is_rejected_and_not_stored() {
    for (backend, server, temp) in setup_all_servers() {
        let response = server
            .post("/")
            .form(&[("content", ""), ("language", "python")])
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "backend {}", backend);
        assert!(response.text().contains("Please provide content to paste."));

        if backend == StorageBackend::Files {
            let stored = std::fs::read_dir(temp.path().join("pastes"))
                .expect("paste dir")
                .count();
            assert_eq!(stored, 0);
        }
    }
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let (server, _temp) = setup_test_server(StorageBackend::Files);

    let response = server.post("/").form(&[("language", "python")]).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.post("/").form(&[("content", "x = 1")]).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.text();
    assert!(body.contains("Please select a language."));
    assert!(body.contains("x = 1"), "submitted content is kept in the form");
}

#[tokio::test]
async fn test_invalid_language_and_oversized_content_are_rejected() {
    let (server, _temp) = setup_test_server(StorageBackend::Files);

    let response = server
        .post("/")
        .form(&[("content", "x"), ("language", "py\nthon")])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let huge = "a".repeat(64 * 1024 + 1);
    let response = server
        .post("/")
        .form(&[("content", huge.as_str()), ("language", "text")])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.text().contains("exceeds maximum"));
}

#[tokio::test]
async fn test_undecodable_bodies_get_the_error_page() {
    let (server, temp) = setup_test_server(StorageBackend::Files);

    let response = server.post("/").text("content=x&language=text").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.text();
    assert!(body.contains("400 Bad Request"), "body: {}", body);
    assert!(body.contains("The request could not be processed."));

    // Past the router body limit, not just the paste size cap.
    let huge = "a".repeat(300 * 1024);
    let response = server
        .post("/")
        .form(&[("content", huge.as_str()), ("language", "text")])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.text().contains("The request could not be processed."));

    let stored = std::fs::read_dir(temp.path().join("pastes"))
        .expect("paste dir")
        .count();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    for (backend, server, _temp) in setup_all_servers() {
        let response = server.get("/doesnotexist123").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "backend {}", backend);
        assert!(response.text().contains("That paste does not exist."));

        let long_id = "a".repeat(101);
        let response = server.get(&format!("/{}", long_id)).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "backend {}", backend);

        let response = server.get("/..%2Fsecret").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "backend {}", backend);
    }
}

#[tokio::test]
async fn test_unmatched_routes_use_not_found_page() {
    let (server, _temp) = setup_test_server(StorageBackend::Files);
    let response = server.get("/a/b/c").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.text().contains("404 Not Found"));
}

#[tokio::test]
async fn test_unknown_language_renders_escaped_plain_text() {
    let (server, _temp) = setup_test_server(StorageBackend::Files);
    let location = create(&server, "<b>hi</b> & bye", "no-such-language-xyz").await;

    let response = server.get(&location).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains(r#"<pre class="source">&lt;b&gt;hi&lt;/b&gt; &amp; bye</pre>"#));
    assert!(!body.contains("<b>hi</b>"));
}

#[tokio::test]
async fn test_corrupt_paste_file_is_a_generic_server_error() {
    let (server, temp) = setup_test_server(StorageBackend::Files);
    std::fs::write(temp.path().join("pastes").join("corrupt1"), b"no header")
        .expect("write corrupt file");

    let response = server.get("/corrupt1").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text();
    assert!(body.contains("An error occurred while accessing paste storage."));
    assert!(!body.contains("corrupt1:"));
    assert!(!body.contains(temp.path().to_str().expect("temp path")));
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let (server, _temp) = setup_test_server(StorageBackend::Files);
    let response = server.get("/").await;
    response.assert_header("x-content-type-options", "nosniff");
    response.assert_header("x-frame-options", "DENY");
    let csp = response.header("content-security-policy");
    assert!(csp.to_str().expect("csp").contains("script-src 'none'"));
}

/// Store that reports every id as taken.
struct AlwaysDuplicate {
    attempts: Arc<AtomicUsize>,
}

impl PasteStore for AlwaysDuplicate {
    fn put(&self, id: &str, _language: &str, _content: &str) -> Result<(), AppError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::DuplicateKey(id.to_string()))
    }

    fn get(&self, _id: &str) -> Result<Option<Paste>, AppError> {
        Ok(None)
    }

    fn backend(&self) -> StorageBackend {
        StorageBackend::Files
    }
}

#[tokio::test]
async fn test_id_collisions_are_retried_then_reported() {
    let temp = tempfile::TempDir::new().expect("temp dir");
    let attempts = Arc::new(AtomicUsize::new(0));
    let db = Database::from_store(AlwaysDuplicate {
        attempts: attempts.clone(),
    });
    let server = test_server_for_database(
        test_config_for_dir(temp.path(), StorageBackend::Files),
        db,
    );

    let response = server
        .post("/")
        .form(&[("content", "x"), ("language", "text")])
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("An error occurred while saving the paste."));
    assert_eq!(attempts.load(Ordering::SeqCst), CREATE_ID_ATTEMPTS);
}
