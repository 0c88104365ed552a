//! Non-content elements
//!
//! `script` and `style` elements carry program text, not document text. Their
//! content must never reach the Markdown output, even when it happens to look
//! like Markdown. The converter never descends into them: they render to
//! nothing, never count as a top-level fragment and are invisible to the raw
//! text extraction used for code.
//!
//! The parsed tree itself is left untouched.

use markup5ever_rcdom::{Handle, NodeData};

/// Elements skipped together with all their children
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style"];

/// Check whether a tag is skipped during conversion
///
/// ```
/// use nextmd_converter::sanitize::is_non_content;
///
/// assert!(is_non_content("script"));
/// assert!(!is_non_content("div"));
/// ```
pub fn is_non_content(tag_name: &str) -> bool {
    NON_CONTENT_ELEMENTS.contains(&tag_name)
}

/// Check whether a node is a non-content element
pub fn is_non_content_node(node: &Handle) -> bool {
    matches!(
        node.data,
        NodeData::Element { ref name, .. } if is_non_content(name.local.as_ref())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::descendants_named;
    use crate::parser::parse_html;

    #[test]
    fn test_script_and_style_nodes() {
        let dom = parse_html(
            "<html><head><style>p{}</style></head><body><script>x()</script><p>Hi</p></body></html>",
        )
        .unwrap();
        assert!(is_non_content_node(&descendants_named(&dom.document, "script")[0]));
        assert!(is_non_content_node(&descendants_named(&dom.document, "style")[0]));
        assert!(!is_non_content_node(&descendants_named(&dom.document, "p")[0]));
    }

    #[test]
    fn test_text_is_content() {
        let dom = parse_html("<p>Hi</p>").unwrap();
        let p = descendants_named(&dom.document, "p")[0].clone();
        let text = p.children.borrow()[0].clone();
        assert!(!is_non_content_node(&text));
    }

    #[test]
    fn test_noscript_is_content() {
        assert!(!is_non_content("noscript"));
        assert!(!is_non_content("template"));
    }
}
