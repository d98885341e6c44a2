//! HTTP server wiring for the pastebin (routes, handlers, and shared state).

/// HTTP error mapping for handlers.
pub mod error;
/// HTTP handlers for the creation and view pages.
pub mod handlers;
/// Embedded HTML templates.
pub mod templates;

pub use pastebin_core::{
    config, db, highlight, models, naming, AppError, Config, Database, StorageBackend,
    DEFAULT_PORT,
};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use pastebin_core::constants::DEFAULT_HOST;
use pastebin_core::text::is_loopback_host;
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'none'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; frame-ancestors 'none'; base-uri 'self'; form-action 'self'";

/// Form encoding adds overhead on top of the raw paste bytes.
const FORM_BODY_OVERHEAD: usize = 64 * 1024;

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct shared application state.
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// # Returns
/// Configured `axum::Router`.
pub fn create_app(state: AppState) -> Router {
    // Percent-encoding can triple the size of a paste on the wire.
    let body_limit = state
        .config
        .max_paste_size
        .saturating_mul(3)
        .saturating_add(FORM_BODY_OVERHEAD);

    Router::new()
        .route(
            "/",
            get(handlers::paste::index).post(handlers::paste::create_paste),
        )
        .route("/:id", get(handlers::paste::view_paste))
        .fallback(handlers::paste::not_found)
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(SetResponseHeaderLayer::overriding(
                    header::CONTENT_SECURITY_POLICY,
                    HeaderValue::from_static(CONTENT_SECURITY_POLICY),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                )),
        )
}

/// Resolve the listener address from the configured host and port.
///
/// An unparsable host falls back to the loopback default with a warning;
/// `localhost` maps to `127.0.0.1`.
pub fn resolve_bind_address(config: &Config) -> SocketAddr {
    let host = config.host.trim();
    let normalized = host
        .strip_prefix('[')
        .and_then(|value| value.strip_suffix(']'))
        .unwrap_or(host);

    let ip = if normalized.eq_ignore_ascii_case("localhost") {
        IpAddr::from([127, 0, 0, 1])
    } else {
        match normalized.parse::<IpAddr>() {
            Ok(ip) => ip,
            Err(err) => {
                tracing::warn!(
                    "Invalid HOST='{}': {}. Falling back to {}",
                    config.host,
                    err,
                    DEFAULT_HOST
                );
                IpAddr::from([127, 0, 0, 1])
            }
        }
    };
    SocketAddr::new(ip, config.port)
}

/// Warn when binding beyond loopback without an explicit opt-in.
///
/// # Returns
/// `true` when the bind host is not loopback.
pub fn warn_if_public_bind(config: &Config, allow_public_access: bool) -> bool {
    let public = !is_loopback_host(config.host.trim());
    if public && !allow_public_access {
        tracing::warn!(
            "Binding to non-loopback host '{}' - set ALLOW_PUBLIC_ACCESS=1 to acknowledge public exposure",
            config.host
        );
    }
    public
}

/// Run the Axum server with graceful shutdown support.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}
