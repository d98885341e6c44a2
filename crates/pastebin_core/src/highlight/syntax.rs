//! Language tag normalization and syntect grammar resolution.

use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::constants::HIGHLIGHT_THEME;

/// Process-wide syntect grammars (newline-terminated variant).
pub(crate) fn syntax_set() -> &'static SyntaxSet {
    static SYNTAXES: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAXES.get_or_init(SyntaxSet::load_defaults_newlines)
}

/// The fixed highlighting theme.
pub(crate) fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let mut themes = ThemeSet::load_defaults().themes;
        themes.remove(HIGHLIGHT_THEME).unwrap_or_else(|| {
            tracing::warn!(
                "Theme '{}' missing from syntect defaults; using an empty theme",
                HIGHLIGHT_THEME
            );
            Theme::default()
        })
    })
}

/// Convert aliases and legacy names to the spelling the resolver tries next.
///
/// # Returns
/// Canonical, lowercase tag (empty for blank input).
pub fn canonicalize(language: &str) -> String {
    let lowered = language.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "python3" | "python2" | "py3" | "py" | "py2" | "python3-traceback" => "python".to_string(),
        "csharp" | "c#" => "cs".to_string(),
        "c++" => "cpp".to_string(),
        "bash" | "sh" | "zsh" | "shell-session" | "console" => "shell".to_string(),
        "yml" => "yaml".to_string(),
        "jsonl" | "json5" => "json".to_string(),
        "js" | "node" | "nodejs" => "javascript".to_string(),
        "ts" | "tsx" => "typescript".to_string(),
        "md" => "markdown".to_string(),
        "rs" => "rust".to_string(),
        "rb" => "ruby".to_string(),
        "golang" => "go".to_string(),
        "m" | "mm" | "objc" | "objective-c" => "objectivec".to_string(),
        "pl" => "perl".to_string(),
        "tex" => "latex".to_string(),
        "make" | "mf" => "makefile".to_string(),
        "postgresql" | "mysql" | "sqlite3" => "sql".to_string(),
        _ => lowered,
    }
}

/// Catalog alias for a syntax display name.
///
/// Lowercases, spells `+` as `p` and `#` as `sharp`, and collapses any other
/// run of non-alphanumerics into a single `-` (`"C++"` becomes `cpp`,
/// `"Bourne Again Shell (bash)"` becomes `bourne-again-shell-bash`).
pub fn alias_for_name(name: &str) -> String {
    let mut alias = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        let expansion = match ch {
            '+' => "p",
            '#' => "sharp",
            c if c.is_ascii_alphanumeric() => "",
            _ => {
                pending_separator = true;
                continue;
            }
        };
        if pending_separator && !alias.is_empty() {
            alias.push('-');
        }
        pending_separator = false;
        if expansion.is_empty() {
            alias.push(ch.to_ascii_lowercase());
        } else {
            alias.push_str(expansion);
        }
    }
    alias
}

fn normalized_syntax_key(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

fn is_plain_text_hint(hint_lower: &str) -> bool {
    matches!(
        hint_lower,
        "text" | "txt" | "plain" | "plaintext" | "plain-text" | "plain text"
    )
}

fn try_resolve_syntax_candidate<'a>(
    ps: &'a SyntaxSet,
    candidate: &str,
) -> Option<&'a SyntaxReference> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return None;
    }

    let visible = || ps.syntaxes().iter().filter(|syntax| !syntax.hidden);

    // Catalog aliases first: `tex` is also an extension of the LaTeX grammar.
    let lowered = trimmed.to_ascii_lowercase();
    if let Some(syntax) = visible().find(|syntax| alias_for_name(&syntax.name) == lowered) {
        return Some(syntax);
    }

    if let Some(syntax) = ps.find_syntax_by_name(trimmed) {
        return Some(syntax);
    }
    if let Some(syntax) = ps.find_syntax_by_extension(trimmed) {
        return Some(syntax);
    }
    if let Some(syntax) = visible().find(|syntax| syntax.name.eq_ignore_ascii_case(trimmed)) {
        return Some(syntax);
    }

    let normalized = normalized_syntax_key(trimmed);
    if !normalized.is_empty() {
        if let Some(syntax) =
            visible().find(|syntax| normalized_syntax_key(&syntax.name) == normalized)
        {
            return Some(syntax);
        }
    }

    visible().find(|syntax| {
        syntax
            .file_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(trimmed))
    })
}

fn syntax_fallback_candidates(canonical: &str) -> &'static [&'static str] {
    match canonical {
        "cs" => &["C#", "cs"],
        "shell" => &["Bourne Again Shell (bash)", "bash", "sh"],
        "cpp" => &["C++", "cpp", "cc"],
        "objectivec" => &["Objective-C", "m"],
        "latex" => &["LaTeX", "tex"],
        "makefile" => &["Makefile", "make"],
        // The bundled grammars have no TypeScript; JavaScript tokenizes it closely enough.
        "typescript" => &["JavaScript", "js"],
        "dockerfile" => &["Bourne Again Shell (bash)", "sh"],
        _ => &[],
    }
}

/// Resolve a stored language tag to a syntect grammar.
///
/// Tries the tag as given first (so every catalog alias maps to its own
/// grammar), then its canonical spelling, then a small fallback table.
///
/// # Returns
/// `None` when the tag is not recognized.
pub fn resolve_syntax<'a>(ps: &'a SyntaxSet, language: &str) -> Option<&'a SyntaxReference> {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lowered = trimmed.to_ascii_lowercase();
    if is_plain_text_hint(&lowered) {
        return Some(ps.find_syntax_plain_text());
    }

    if let Some(syntax) = try_resolve_syntax_candidate(ps, trimmed) {
        return Some(syntax);
    }

    let canonical = canonicalize(trimmed);
    if canonical != lowered {
        if let Some(syntax) = try_resolve_syntax_candidate(ps, &canonical) {
            return Some(syntax);
        }
    }

    syntax_fallback_candidates(&canonical)
        .iter()
        .find_map(|candidate| try_resolve_syntax_candidate(ps, candidate))
}
