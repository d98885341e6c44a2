//! Shared text and host normalization helpers.

use crate::constants::MAX_LANGUAGE_LEN;
use std::net::IpAddr;

/// Trim an optional string and drop empty values.
///
/// # Returns
/// `None` when the input is missing or whitespace-only; otherwise the trimmed
/// string.
pub fn normalize_optional_nonempty(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Check that a language tag can be stored on the first line of a paste file.
///
/// # Errors
/// Returns a human-readable reason when the tag is empty, too long, or contains
/// control characters (newlines included).
pub fn validate_language_tag(language: &str) -> Result<(), String> {
    if language.is_empty() {
        return Err("language tag is empty".to_string());
    }
    if language.len() > MAX_LANGUAGE_LEN {
        return Err(format!("language tag exceeds {} bytes", MAX_LANGUAGE_LEN));
    }
    if language.chars().any(char::is_control) {
        return Err("language tag contains control characters".to_string());
    }
    Ok(())
}

/// Escape HTML-significant characters so text renders literally.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + value.len() / 8);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Return `true` when `host` is localhost or a loopback IP literal.
///
/// Supports bracketed IPv6 hosts (for example `[::1]`).
pub fn is_loopback_host(host: &str) -> bool {
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    let normalized_host = host
        .strip_prefix('[')
        .and_then(|value| value.strip_suffix(']'))
        .unwrap_or(host);
    normalized_host
        .parse::<IpAddr>()
        .map(|ip| ip.is_loopback())
        .unwrap_or(false)
}
