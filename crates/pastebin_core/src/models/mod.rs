//! Data models shared by storage and HTTP layers.

/// Paste records, form payloads and catalog entries.
pub mod paste;
