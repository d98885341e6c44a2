//! Template engine setup and embedded HTML templates.

use axum::http::StatusCode;
use pastebin_core::{
    highlight::Rendered, models::paste::LanguageOption, models::paste::Paste, text::escape_html,
    AppError,
};
use std::sync::OnceLock;
use tera::{Context, Tera};

/// Language preselected on an empty creation form.
pub const DEFAULT_FORM_LANGUAGE: &str = "plain-text";

fn templates() -> &'static Tera {
    static TEMPLATES: OnceLock<Tera> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        let mut tera = Tera::default();
        if let Err(err) = tera.add_raw_templates(vec![
            ("base.html", BASE_TEMPLATE),
            ("index.html", INDEX_TEMPLATE),
            ("paste.html", PASTE_TEMPLATE),
            ("error.html", ERROR_TEMPLATE),
        ]) {
            tracing::error!("Failed to load templates: {}", err);
        }
        tera
    })
}

fn render(template: &str, context: &Context) -> Result<String, AppError> {
    templates().render(template, context).map_err(|err| {
        tracing::error!("Failed to render {}: {:?}", template, err);
        AppError::Internal
    })
}

/// Values shown on the creation form.
#[derive(Debug, Default)]
pub struct IndexPage<'a> {
    pub content: &'a str,
    pub language: &'a str,
    pub error: Option<&'a str>,
}

/// Render the creation form.
///
/// # Errors
/// Returns [`AppError::Internal`] when the template fails to render.
pub fn render_index(
    languages: &[LanguageOption],
    page: &IndexPage<'_>,
) -> Result<String, AppError> {
    let mut context = Context::new();
    context.insert("languages", languages);
    context.insert("content", page.content);
    context.insert(
        "selected",
        if page.language.is_empty() {
            DEFAULT_FORM_LANGUAGE
        } else {
            page.language
        },
    );
    context.insert("error", &page.error);
    render("index.html", &context)
}

/// Render a stored paste.
///
/// # Errors
/// Returns [`AppError::Internal`] when the template fails to render.
pub fn render_paste(paste: &Paste, rendered: &Rendered) -> Result<String, AppError> {
    let mut context = Context::new();
    context.insert("paste_id", &paste.id);
    context.insert("language", &paste.language);
    context.insert("syntax_name", &rendered.syntax_name);
    context.insert(
        "created_at",
        &paste.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    context.insert("paste_html", &rendered.html);
    context.insert("highlight_css", &rendered.css);
    render("paste.html", &context)
}

/// Render an error page. Falls back to a bare page if templating fails.
pub fn render_error_page(status: StatusCode, message: &str) -> String {
    let mut context = Context::new();
    context.insert("status", &status.as_u16());
    context.insert("reason", status.canonical_reason().unwrap_or("Error"));
    context.insert("message", message);
    render("error.html", &context).unwrap_or_else(|_| {
        format!(
            "<!DOCTYPE html><html><body><h1>{}</h1><p>{}</p></body></html>",
            status.as_u16(),
            escape_html(message)
        )
    })
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}Pastebin{% endblock %}</title>
    <style>
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
            margin: 0;
            background: #f6f8fa;
            color: #24292f;
        }
        main { max-width: 1100px; margin: 0 auto; padding: 24px 32px; }
        header { border-bottom: 1px solid #d0d7de; background: #fff; padding: 14px 32px; }
        header a { color: inherit; text-decoration: none; font-weight: 600; }
        textarea {
            width: 100%;
            min-height: 360px;
            font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
            font-size: 13px;
            padding: 10px;
        }
        .controls { display: flex; gap: 12px; align-items: center; margin-top: 12px; }
        .message { padding: 10px 14px; border-radius: 6px; margin-bottom: 16px; }
        .message.error { background: #ffebe9; border: 1px solid #ff8182; }
        .meta { color: #57606a; font-size: 13px; margin-bottom: 12px; }
        .paste { background: #fff; border: 1px solid #d0d7de; border-radius: 6px; overflow-x: auto; padding: 8px 0; }
        .paste pre { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 13px; }
        pre.source { margin: 0; padding: 0 12px; white-space: pre; }
    </style>
    {% block head %}{% endblock %}
</head>
<body>
    <header><a href="/">Pastebin</a></header>
    <main>
        {% block content %}{% endblock %}
    </main>
</body>
</html>
"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}New paste - Pastebin{% endblock %}
{% block content %}
{% if error %}<div class="message error">{{ error }}</div>{% endif %}
<form method="post" action="/">
    <textarea name="content" placeholder="Paste your text here" autofocus>{{ content }}</textarea>
    <div class="controls">
        <label for="language">Language</label>
        <select id="language" name="language">
            {% for lang in languages %}
            <option value="{{ lang.alias }}"{% if lang.alias == selected %} selected{% endif %}>{{ lang.display_name }}</option>
            {% endfor %}
        </select>
        <button type="submit">Create paste</button>
    </div>
</form>
{% endblock %}
"##;

const PASTE_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}{{ paste_id }} - Pastebin{% endblock %}
{% block head %}{% if highlight_css %}<style>{{ highlight_css | safe }}</style>{% endif %}{% endblock %}
{% block content %}
<div class="meta">
    <strong>{{ paste_id }}</strong>
    &middot; {% if syntax_name %}{{ syntax_name }}{% else %}{{ language }} (plain text){% endif %}
    &middot; {{ created_at }}
</div>
<div class="paste">{{ paste_html | safe }}</div>
{% endblock %}
"##;

const ERROR_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}{{ status }} {{ reason }} - Pastebin{% endblock %}
{% block content %}
<h1>{{ status }} {{ reason }}</h1>
<p>{{ message }}</p>
<p><a href="/">Create a new paste</a></p>
{% endblock %}
"##;
