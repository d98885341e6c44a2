//! Shared constants used across pastebin crates.

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind host. Loopback unless explicitly overridden.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default maximum paste size accepted by the HTTP layer.
pub const DEFAULT_MAX_PASTE_SIZE: usize = 10 * 1024 * 1024;

/// Default directory for the file-per-paste backend.
pub const DEFAULT_PASTE_DIR: &str = "pastes";

/// Default SQLite database file for the relational backend.
pub const DEFAULT_DB_PATH: &str = "pastes.db";

/// Upper bound on identifier length accepted by lookups.
pub const MAX_PASTE_ID_LEN: usize = 100;

/// Upper bound on language tag length accepted by writes.
pub const MAX_LANGUAGE_LEN: usize = 64;

/// Length of identifiers produced by [`crate::naming::generate_id`].
pub const GENERATED_ID_LEN: usize = 22;

/// Attempts the HTTP layer makes with fresh ids when `put` reports a collision.
pub const CREATE_ID_ATTEMPTS: usize = 3;

/// Fixed highlighting theme from syntect's default theme set.
pub const HIGHLIGHT_THEME: &str = "InspiredGitHub";

/// CSS class wrapping highlighted and fallback output.
pub const SOURCE_CSS_CLASS: &str = "source";
