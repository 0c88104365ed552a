//! Robustness tests for untrusted HTML input
//!
//! This suite checks that program text in `script`/`style` never leaks into
//! the Markdown output, and that malformed or hostile input always yields a
//! string instead of a panic or an error.

use nextmd_converter::converter::{CONVERSION_ERROR_PREFIX, MarkdownConverter, html_to_markdown};
use nextmd_converter::parser::parse_html;
use proptest::prelude::*;

/// Test that script tags are completely removed from output
#[test]
fn test_script_tag_removal() {
    let html = r#"<html><body>
        <p>Before dangerous element</p>
        <script>alert('xss')</script>
        <p>After dangerous element</p>
    </body></html>"#;

    let dom = parse_html(html).expect("Failed to parse HTML");
    let markdown = MarkdownConverter::new().convert(&dom).expect("Failed to convert");

    assert!(!markdown.contains("<script"));
    assert!(!markdown.contains("alert"));
    assert!(!markdown.contains("xss"));

    assert_eq!(markdown, "Before dangerous element\nAfter dangerous element");
}

/// The converter skips scripts without detaching them from the caller's tree
#[test]
fn test_conversion_leaves_tree_intact() {
    let dom = parse_html("<p>a</p><script>b()</script>").expect("Failed to parse HTML");
    let converter = MarkdownConverter::new();

    assert_eq!(converter.convert(&dom).unwrap(), "a");
    assert_eq!(converter.convert(&dom).unwrap(), "a");

    let body_children = dom.document.children.borrow()[0].children.borrow()[1]
        .children
        .borrow()
        .len();
    assert_eq!(body_children, 2);
}

/// Test that inline script tags are removed
#[test]
fn test_inline_script_removal() {
    let markdown = html_to_markdown(r#"<p>Text <script>malicious()</script> more text</p>"#);

    assert!(!markdown.contains("malicious"));
    assert_eq!(markdown, "Text more text");
}

/// Script content that looks like Markdown must not appear either
#[test]
fn test_markdown_lookalike_script_removed() {
    let html = "<h1>Doc</h1><script>// # Heading\n// **bold** [x](y)</script>";
    assert_eq!(html_to_markdown(html), "# Doc");
}

/// Test that style blocks are removed, in head and body
#[test]
fn test_style_removal() {
    let html = r#"<html><head><style>body { color: red; }</style></head>
        <body><style>.x { display: none }</style><p>Visible</p></body></html>"#;

    let markdown = html_to_markdown(html);
    assert!(!markdown.contains("color"));
    assert!(!markdown.contains("display"));
    assert_eq!(markdown, "Visible");
}

/// Script inside a table must not produce cells
#[test]
fn test_script_inside_table() {
    let html = "<table><tr><th>A</th></tr><tr><td>1<script>'|x|'</script></td></tr></table>";
    assert_eq!(html_to_markdown(html), "| A |\n| --- |\n| 1 |");
}

/// Event handler attributes never reach the output, since only
/// `href`/`src`/`alt` are read
#[test]
fn test_event_handler_attributes_ignored() {
    let html = r#"<p onclick="alert('xss')">Click me</p><img src="a.png" onerror="steal()">"#;
    let markdown = html_to_markdown(html);

    assert!(!markdown.contains("onclick"));
    assert!(!markdown.contains("steal"));
    assert_eq!(markdown, "Click me\n![Image](a.png)");
}

/// Link targets are copied verbatim, no URL rewriting takes place
#[test]
fn test_link_targets_are_verbatim() {
    let html = r##"<a href="/relative/path">R</a><a href="#anchor">A</a>"##;
    assert_eq!(html_to_markdown(html), "[R](/relative/path)\n[A](#anchor)");
}

#[test]
fn test_truncated_html() {
    let cases = [
        "<h1>Unclosed",
        "<ul><li>one<li>two",
        "<table><tr><td>cell",
        "<a href=\"https://x.com",
        "<p><b><i>overlapping</b></i></p>",
        "</div></span>",
        "<",
        "<!--",
    ];

    for html in cases {
        let markdown = html_to_markdown(html);
        assert!(
            !markdown.starts_with(CONVERSION_ERROR_PREFIX),
            "{:?} produced {:?}",
            html,
            markdown
        );
    }
}

#[test]
fn test_unclosed_list_items() {
    assert_eq!(html_to_markdown("<ul><li>one<li>two"), "- one\n- two");
}

#[test]
fn test_deep_nesting() {
    let depth = 500;
    let html = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));
    assert_eq!(html_to_markdown(&html), "deep");
}

#[test]
fn test_null_and_control_characters() {
    let markdown = html_to_markdown("<p>a\u{0}b\u{7}c</p>");
    assert!(!markdown.starts_with(CONVERSION_ERROR_PREFIX));
    assert!(markdown.contains('a'));
    assert!(markdown.contains('c'));
}

proptest! {
    #[test]
    fn prop_never_panics_on_arbitrary_input(input in "\\PC{0,300}") {
        let _ = html_to_markdown(&input);
    }

    #[test]
    fn prop_never_panics_on_tag_soup(
        parts in prop::collection::vec(
            prop::sample::select(vec![
                "<p>", "</p>", "<ul>", "<li>", "</ul>", "<ol>", "<table>", "<tr>", "<th>",
                "<td>", "</table>", "<pre>", "<code>", "</code>", "<blockquote>", "<a href=x>",
                "</a>", "<img>", "<hr>", "<b>", "</i>", "text", " ", "\n", "<script>", "<h3>",
            ]),
            0..40,
        )
    ) {
        let html: String = parts.concat();
        let markdown = html_to_markdown(&html);
        prop_assert!(!markdown.starts_with(CONVERSION_ERROR_PREFIX));
    }

    #[test]
    fn prop_script_payload_never_leaks(payload in "[A-Z]{16}") {
        let html = format!("<div><p>keep</p><script>{}</script></div>", payload);
        let markdown = html_to_markdown(&html);
        prop_assert!(!markdown.contains(&payload));
        prop_assert_eq!(markdown, "keep");
    }
}
