//! HTTP request handlers.

/// Paste creation and view pages.
pub mod paste;
