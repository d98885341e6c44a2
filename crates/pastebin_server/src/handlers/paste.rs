//! Paste page handlers.

use crate::{
    error::HttpError,
    templates::{self, IndexPage},
    AppError, AppState,
};
use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use pastebin_core::{
    constants::CREATE_ID_ATTEMPTS,
    highlight::{self, catalog},
    models::paste::CreatePasteForm,
    naming,
    text::{normalize_optional_nonempty, validate_language_tag},
};

const MISSING_CONTENT_MESSAGE: &str = "Please provide content to paste.";
const MISSING_LANGUAGE_MESSAGE: &str = "Please select a language.";
const INVALID_LANGUAGE_MESSAGE: &str = "The selected language is not valid.";
const SAVE_FAILED_MESSAGE: &str = "An error occurred while saving the paste.";

/// Re-render the creation form with the submitted values and a message.
fn form_response(
    status: StatusCode,
    content: &str,
    language: &str,
    message: &str,
) -> Result<Response, HttpError> {
    let page = IndexPage {
        content,
        language,
        error: Some(message),
    };
    let html = templates::render_index(catalog::list(), &page)?;
    Ok((status, Html(html)).into_response())
}

/// Show the creation form.
///
/// # Errors
/// Returns an error if the template fails to render.
pub async fn index() -> Result<Html<String>, HttpError> {
    let html = templates::render_index(catalog::list(), &IndexPage::default())?;
    Ok(Html(html))
}

/// Create a paste from the submitted form and redirect to it.
///
/// Missing or empty `content`/`language` is rejected before storage is
/// touched. A colliding id is retried with a fresh one a bounded number of
/// times.
///
/// # Returns
/// `303 See Other` to `/{id}` on success; the form with an inline message on
/// validation (400) or storage (500) failure. A body that cannot be read as a
/// form gets the 400 error page.
///
/// # Errors
/// Returns an error if the form template fails to render.
pub async fn create_paste(
    State(state): State<AppState>,
    form: Result<Form<CreatePasteForm>, FormRejection>,
) -> Result<Response, HttpError> {
    // Wrong content type, undecodable or oversized bodies.
    let Form(form) = form.map_err(|rejection| {
        AppError::BadRequest(format!(
            "form rejected ({}): {}",
            rejection.status(),
            rejection.body_text()
        ))
    })?;
    let content = form.content.unwrap_or_default();
    let language = normalize_optional_nonempty(form.language);

    if content.is_empty() {
        return form_response(
            StatusCode::BAD_REQUEST,
            &content,
            language.as_deref().unwrap_or_default(),
            MISSING_CONTENT_MESSAGE,
        );
    }
    let Some(language) = language else {
        return form_response(StatusCode::BAD_REQUEST, &content, "", MISSING_LANGUAGE_MESSAGE);
    };
    if validate_language_tag(&language).is_err() {
        return form_response(StatusCode::BAD_REQUEST, &content, "", INVALID_LANGUAGE_MESSAGE);
    }
    if content.len() > state.config.max_paste_size {
        let message = format!(
            "Paste size exceeds maximum of {} bytes.",
            state.config.max_paste_size
        );
        return form_response(StatusCode::BAD_REQUEST, "", &language, &message);
    }

    let mut last_err = AppError::Internal;
    for attempt in 1..=CREATE_ID_ATTEMPTS {
        let id = naming::generate_id();
        match state.db.pastes.put(&id, &language, &content) {
            Ok(()) => {
                tracing::info!(
                    "Created paste {} ({} bytes, language '{}')",
                    id,
                    content.len(),
                    language
                );
                return Ok(Redirect::to(&format!("/{}", id)).into_response());
            }
            Err(AppError::DuplicateKey(dup)) => {
                tracing::warn!(
                    "Paste id {} collided (attempt {}/{})",
                    dup,
                    attempt,
                    CREATE_ID_ATTEMPTS
                );
                last_err = AppError::DuplicateKey(dup);
            }
            Err(err) => {
                last_err = err;
                break;
            }
        }
    }

    match last_err {
        AppError::BadRequest(detail) => {
            tracing::debug!("Paste rejected by store: {}", detail);
            form_response(
                StatusCode::BAD_REQUEST,
                &content,
                &language,
                INVALID_LANGUAGE_MESSAGE,
            )
        }
        err => {
            tracing::error!("Failed to save paste: {}", err);
            form_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &content,
                &language,
                SAVE_FAILED_MESSAGE,
            )
        }
    }
}

/// Show a paste with syntax highlighting.
///
/// # Errors
/// `404` when the id is unknown or malformed, `500` when storage fails.
pub async fn view_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, HttpError> {
    let Some(paste) = state.db.pastes.get(&id)? else {
        if naming::is_valid_id(&id) {
            tracing::warn!("Paste {} not found", id);
        }
        return Err(AppError::NotFound.into());
    };

    let rendered = highlight::render(&paste.content, &paste.language);
    tracing::debug!(
        "Serving paste {} ({} bytes, highlighted: {})",
        paste.id,
        paste.content_len(),
        rendered.is_highlighted()
    );
    Ok(Html(templates::render_paste(&paste, &rendered)?))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> HttpError {
    HttpError(AppError::NotFound)
}
