//! HTTP error mapping for pastebin handlers.

use crate::templates;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use pastebin_core::AppError;

/// Handler error that renders as an HTML error page.
///
/// Internal detail is logged, never sent to the client.
#[derive(Debug)]
pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl HttpError {
    /// Status code and user-facing message for the wrapped error.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            AppError::NotFound => (StatusCode::NOT_FOUND, "That paste does not exist."),
            AppError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                "The request could not be processed.",
            ),
            AppError::DuplicateKey(_) | AppError::StorageUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while accessing paste storage.",
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred.",
            ),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        match &self.0 {
            AppError::NotFound => {}
            AppError::BadRequest(detail) => tracing::debug!("Bad request: {}", detail),
            err if err.is_storage_failure() => tracing::error!("Storage error: {}", err),
            err => tracing::error!("Internal error: {:?}", err),
        }
        (status, Html(templates::render_error_page(status, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_map_to_generic_500() {
        let err = HttpError(AppError::StorageUnavailable(
            "read paste abc: permission denied at /srv/pastes".to_string(),
        ));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("/srv/pastes"));
    }

    #[test]
    fn not_found_and_bad_request_statuses() {
        assert_eq!(
            HttpError(AppError::NotFound).status_and_message().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HttpError(AppError::BadRequest("x".to_string()))
                .status_and_message()
                .0,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn into_response_hides_internal_detail() {
        let response =
            HttpError(AppError::StorageUnavailable("secret-detail".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
