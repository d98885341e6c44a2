//! Paste-related data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored paste. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    pub id: String,
    pub language: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Form payload submitted by the creation page.
///
/// Both fields are optional so missing inputs reach the handler and can be
/// reported inline instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePasteForm {
    pub content: Option<String>,
    pub language: Option<String>,
}

/// One entry of the language catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub alias: String,
    pub display_name: String,
}

impl Paste {
    /// Number of content bytes, used for log lines.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}
