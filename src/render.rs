//! Markdown to HTML rendering
//!
//! The forward direction delegates to `pulldown-cmark` and wraps the
//! resulting fragment in a fixed, self-contained HTML document with an
//! inline stylesheet.

use log::debug;
use pulldown_cmark::{Options, Parser, html};

/// Title of every generated document
pub const DOCUMENT_TITLE: &str = "Converted from Markdown";

const DOCUMENT_STYLE: &str = r#"        body { font-family: Arial, sans-serif; line-height: 1.6; padding: 20px; max-width: 800px; margin: 0 auto; }
        h1, h2, h3, h4, h5, h6 { color: #333; }
        pre { background-color: #f5f5f5; padding: 10px; border-radius: 5px; overflow-x: auto; }
        code { font-family: 'Courier New', Courier, monospace; background-color: #f5f5f5; padding: 2px 4px; border-radius: 3px; }
        blockquote { border-left: 4px solid #ddd; padding-left: 16px; margin-left: 0; color: #666; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border: 1px solid #ddd; padding: 8px 12px; text-align: left; }
        th { background-color: #f2f2f2; }"#;

fn render_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options
}

/// Render Markdown to an HTML fragment, without the document shell
///
/// ```rust
/// use nextmd_converter::render::markdown_fragment;
///
/// assert_eq!(markdown_fragment("# Title"), "<h1>Title</h1>\n");
/// ```
pub fn markdown_fragment(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, render_options());
    let mut fragment = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut fragment, parser);
    fragment
}

/// Render Markdown to a complete HTML document
///
/// Empty input yields an empty string rather than an empty document.
pub fn markdown_to_html(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let fragment = markdown_fragment(markdown);
    debug!(
        "converted Markdown to HTML, input length: {} characters",
        markdown.chars().count()
    );
    wrap_document(&fragment)
}

/// Wrap an HTML fragment in the static document shell
pub fn wrap_document(fragment: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
{style}
    </style>
</head>
<body>
{fragment}
</body>
</html>"#,
        title = DOCUMENT_TITLE,
        style = DOCUMENT_STYLE,
        fragment = fragment,
    )
}
