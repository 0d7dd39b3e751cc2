//! Markdown to HTML rendering.

use pulldown_cmark::{Options, Parser, html};

/// Preview length in characters of raw markdown source.
pub const PREVIEW_CHARS: usize = 40;

/// Render markdown to HTML.
pub fn render(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Render the listing preview: the first `PREVIEW_CHARS` characters of the
/// source with a trailing ellipsis when truncated. Truncation counts chars,
/// never bytes, so multibyte content cannot be split mid-codepoint.
pub fn render_preview(markdown: &str) -> String {
    let mut chars = markdown.chars();
    let mut preview: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        preview.push_str("...");
    }
    render(&preview)
}
