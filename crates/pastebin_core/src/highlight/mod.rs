//! Syntax-highlighted HTML rendering.
//!
//! [`render`] never fails: unknown languages and highlighter errors both fall
//! back to an escaped `<pre>` block.

/// Language catalog for the creation form.
pub mod catalog;
/// Language tag resolution against the bundled grammars.
pub mod syntax;

use crate::constants::SOURCE_CSS_CLASS;
use crate::text::escape_html;
use std::sync::OnceLock;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxReference;
use syntect::util::LinesWithEndings;

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

const LINE_NUMBER_CSS: &str = "\
.sourcetable { border-spacing: 0; border-collapse: collapse; width: 100%; }
.sourcetable td { padding: 0; vertical-align: top; }
.sourcetable .linenos { color: #8c8c8c; text-align: right; padding-right: 0.75em; user-select: none; border-right: 1px solid #e1e4e8; }
.sourcetable .code { padding-left: 0.75em; width: 100%; }
.source pre { margin: 0; }
";

/// Rendered paste body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// HTML fragment, safe to embed verbatim.
    pub html: String,
    /// Stylesheet for `html`; empty for the plain fallback.
    pub css: String,
    /// Display name of the grammar used, `None` for the plain fallback.
    pub syntax_name: Option<String>,
}

impl Rendered {
    /// Whether a grammar was applied.
    pub fn is_highlighted(&self) -> bool {
        self.syntax_name.is_some()
    }
}

/// Render `content` as HTML using the grammar for `language`.
///
/// `content` is untrusted: the highlighted branch relies on syntect's escaping
/// and the fallback escapes explicitly.
pub fn render(content: &str, language: &str) -> Rendered {
    let Some(syntax) = syntax::resolve_syntax(syntax::syntax_set(), language) else {
        tracing::warn!(
            "No grammar for language '{}'; rendering as plain text",
            language.escape_debug()
        );
        return render_plain(content);
    };

    match render_highlighted(content, syntax) {
        Ok(rendered) => rendered,
        Err(err) => {
            tracing::warn!(
                "Highlighting as {} failed: {}; rendering as plain text",
                syntax.name,
                err
            );
            render_plain(content)
        }
    }
}

/// Escaped `<pre>` block with no stylesheet.
pub fn render_plain(content: &str) -> Rendered {
    Rendered {
        html: format!(
            "<pre class=\"{}\">{}</pre>",
            SOURCE_CSS_CLASS,
            escape_html(content)
        ),
        css: String::new(),
        syntax_name: None,
    }
}

fn render_highlighted(
    content: &str,
    syntax: &SyntaxReference,
) -> Result<Rendered, syntect::Error> {
    let mut text = strip_blank_edges(content).to_string();
    text.push('\n');

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, syntax::syntax_set(), CLASS_STYLE);
    for line in LinesWithEndings::from(&text) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    let code = generator.finalize();

    let line_numbers = (1..=text.lines().count())
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n");

    let html = format!(
        "<table class=\"{class}table\"><tr>\
         <td class=\"linenos\"><div class=\"linenodiv\"><pre>{line_numbers}</pre></div></td>\
         <td class=\"code\"><div class=\"{class}\"><pre class=\"hl-code\">{code}</pre></div></td>\
         </tr></table>",
        class = SOURCE_CSS_CLASS,
    );

    Ok(Rendered {
        html,
        css: stylesheet().to_string(),
        syntax_name: Some(syntax.name.clone()),
    })
}

/// Drop leading blank lines and trailing whitespace so no empty line is
/// numbered. Indentation of the first non-blank line is kept.
fn strip_blank_edges(content: &str) -> &str {
    let trimmed = content.trim_end();
    let first_visible = trimmed.len() - trimmed.trim_start().len();
    let line_start = trimmed[..first_visible]
        .rfind('\n')
        .map_or(0, |newline| newline + 1);
    &trimmed[line_start..]
}

/// Theme rules plus line-number table rules, computed once.
fn stylesheet() -> &'static str {
    static CSS: OnceLock<String> = OnceLock::new();
    CSS.get_or_init(|| {
        let theme_css = css_for_theme_with_class_style(syntax::theme(), CLASS_STYLE)
            .unwrap_or_else(|err| {
                tracing::warn!("Failed to build theme stylesheet: {}", err);
                String::new()
            });
        format!("{}\n{}", theme_css, LINE_NUMBER_CSS)
    })
}
