//! Markdown converter - transforms a DOM tree to Markdown
//!
//! This module holds the HTML-to-Markdown half of the crate. It walks an
//! html5ever `RcDom` recursively and renders every node to a Markdown
//! fragment. The walk is a pure fold over the tree: no state survives a call,
//! the tree is only read, and concurrent conversions are fully independent.
//!
//! # Document Level
//!
//! 1. `script` and `style` subtrees are skipped (see [`crate::sanitize`])
//! 2. The top-level sequence is the children of `body`, or of the document
//!    when there is no `body`
//! 3. Each top-level element is rendered on its own and the fragments are
//!    joined with a single newline, in document order
//!
//! Whitespace-only text between top-level elements contributes nothing, not
//! even a blank line.
//!
//! # Element Handlers
//!
//! | Element | Markdown |
//! |---|---|
//! | `h1`..`h6` | `#`..`######` + space + content |
//! | `p` | content |
//! | `strong`, `b` | `**content**` |
//! | `em`, `i` | `*content*` |
//! | `a` | `[content](href)` |
//! | `img` | `![alt](src)`, alt defaults to `Image` |
//! | `code` | `` `text` ``, or a fenced block when inside `pre` |
//! | `pre` | its `code` children as fenced blocks, nothing else |
//! | `blockquote` | every content line prefixed with `> ` |
//! | `ul`, `ol` | one `- ` / `N. ` line per direct `li` |
//! | `hr` | `---` |
//! | `table` | pipe rows: `th` header + separator, then `td` rows |
//! | anything else | content, no syntax of its own |
//!
//! "Content" is the concatenation of the rendered children, so inline markup
//! nests: `<h1><strong>Bold</strong> text</h1>` becomes `# **Bold** text`.
//!
//! # Text
//!
//! Text nodes render trimmed. When trimming removes whitespace at the join
//! of two sibling fragments, a single space is kept there. This includes
//! whitespace at the edges of an element's own text (`<b>Bold </b>text`
//! becomes `**Bold** text`) and whitespace between block siblings, which is
//! joined the same way as inline content. Whitespace never turns into a line
//! break.
//!
//! Markdown metacharacters in text are passed through unescaped.
//!
//! # Examples
//!
//! ```rust
//! use nextmd_converter::converter::html_to_markdown;
//!
//! assert_eq!(html_to_markdown("<h2>Title</h2>"), "## Title");
//! assert_eq!(html_to_markdown("<ul><li>One</li><li>Two</li></ul>"), "- One\n- Two");
//! assert_eq!(html_to_markdown(""), "");
//! ```

use std::panic::{self, AssertUnwindSafe};

use log::{debug, error};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::element::{ElementKind, RenderContext, attribute, children_named, descendants_named};
use crate::error::ConversionError;
use crate::parser::parse_html;
use crate::sanitize::is_non_content_node;

/// Prefix of the string returned when a conversion fails
pub const CONVERSION_ERROR_PREFIX: &str = "conversion error: ";

/// Alt text used for images without an `alt` attribute
const DEFAULT_IMAGE_ALT: &str = "Image";

/// Convert HTML text to Markdown, never failing
///
/// Empty input yields an empty string. Any failure, including a panic inside
/// the conversion, is logged and reported as a string starting with
/// [`CONVERSION_ERROR_PREFIX`] instead of being propagated.
///
/// ```rust
/// use nextmd_converter::converter::html_to_markdown;
///
/// assert_eq!(
///     html_to_markdown(r#"<a href="https://x.com">Link</a>"#),
///     "[Link](https://x.com)"
/// );
/// ```
pub fn html_to_markdown(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| try_html_to_markdown(html)))
        .unwrap_or_else(|payload| Err(ConversionError::InternalError(panic_message(&*payload))));

    match outcome {
        Ok(markdown) => markdown,
        Err(err) => fallback(&err),
    }
}

/// Log a failed conversion and build the string returned in its place
fn fallback(err: &ConversionError) -> String {
    error!("HTML to Markdown conversion failed: {}", err);
    format!("{}{}", CONVERSION_ERROR_PREFIX, err)
}

/// Convert HTML text to Markdown, reporting failures as typed errors
///
/// # Errors
///
/// Propagates parser errors. Empty input is not an error.
pub fn try_html_to_markdown(html: &str) -> Result<String, ConversionError> {
    if html.is_empty() {
        return Ok(String::new());
    }

    let dom = parse_html(html)?;
    let markdown = MarkdownConverter::new().convert(&dom)?;

    debug!(
        "converted HTML to Markdown, input length: {} characters",
        html.chars().count()
    );
    Ok(markdown)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unexpected panic during conversion".to_string()
    }
}

/// Main Markdown converter
///
/// The converter carries no configuration and no per-call state; it exists to
/// group the element handlers. One instance can serve any number of
/// conversions.
///
/// ```rust
/// use nextmd_converter::converter::MarkdownConverter;
/// use nextmd_converter::parser::parse_html;
///
/// let dom = parse_html("<h1>Hello World</h1><p>This is a test.</p>").expect("Parse failed");
/// let markdown = MarkdownConverter::new().convert(&dom).expect("Conversion failed");
/// assert_eq!(markdown, "# Hello World\nThis is a test.");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownConverter;

impl MarkdownConverter {
    /// Create a new converter
    pub fn new() -> Self {
        Self
    }

    /// Convert a parsed DOM tree to Markdown
    ///
    /// Renders the top-level sequence and joins the fragments with `\n`.
    /// The tree is not modified.
    ///
    /// # Errors
    ///
    /// Currently infallible for any tree html5ever produces; the `Result`
    /// keeps room for trees built by other means.
    pub fn convert(&self, dom: &RcDom) -> Result<String, ConversionError> {
        let fragments: Vec<String> = top_level_nodes(&dom.document)
            .iter()
            .filter(|node| contributes_fragment(node))
            .map(|node| self.render_node(node, RenderContext::Flow))
            .collect();

        Ok(fragments.join("\n"))
    }

    /// Render one node to a Markdown fragment
    ///
    /// `ctx` is the kind of the element whose content is being rendered.
    fn render_node(&self, node: &Handle, ctx: RenderContext) -> String {
        if is_non_content_node(node) {
            return String::new();
        }

        if let Some(kind) = ElementKind::of(node) {
            return self.render_element(node, kind, ctx);
        }

        match node.data {
            NodeData::Text { ref contents } => contents.borrow().trim().to_string(),
            NodeData::Document => self.render_content(node, RenderContext::Flow),
            _ => String::new(),
        }
    }

    /// Dispatch an element to its handler
    fn render_element(&self, node: &Handle, kind: ElementKind, ctx: RenderContext) -> String {
        let inner = RenderContext::Within(kind);

        match kind {
            ElementKind::Heading(level) => self.handle_heading(node, level, inner),
            ElementKind::Paragraph => self.render_content(node, inner),
            ElementKind::Strong => format!("**{}**", self.render_content(node, inner)),
            ElementKind::Emphasis => format!("*{}*", self.render_content(node, inner)),
            ElementKind::Anchor => self.handle_link(node, inner),
            ElementKind::Image => self.handle_image(node),
            ElementKind::Code => self.handle_code(node, ctx),
            ElementKind::Pre => self.handle_pre(node),
            ElementKind::Blockquote => self.handle_blockquote(node, inner),
            ElementKind::UnorderedList => self.handle_list(node, false),
            ElementKind::OrderedList => self.handle_list(node, true),
            ElementKind::HorizontalRule => "---".to_string(),
            ElementKind::Table => self.handle_table(node),

            // Rows, cells and items outside their containers, plus everything
            // outside the vocabulary, are transparent
            ElementKind::ListItem
            | ElementKind::TableRow
            | ElementKind::TableHeader
            | ElementKind::TableData
            | ElementKind::Other => self.render_content(node, inner),
        }
    }

    /// Concatenate the rendered direct children of `node`
    ///
    /// Text children are trimmed; whitespace that was trimmed at a join
    /// between two non-empty fragments is kept as one space. For element
    /// children the whitespace at the edges of their own text counts too.
    /// Block siblings are joined by the same rule, so whitespace between two
    /// paragraphs becomes a space and never a line break.
    fn render_content(&self, node: &Handle, ctx: RenderContext) -> String {
        let mut output = String::new();
        let mut pending_space = false;

        for child in node.children.borrow().iter() {
            if let NodeData::Text { ref contents } = child.data {
                let raw = contents.borrow();
                let raw: &str = &raw;
                let trimmed = raw.trim();
                if raw.starts_with(char::is_whitespace) {
                    pending_space = true;
                }
                if trimmed.is_empty() {
                    continue;
                }
                push_fragment(&mut output, trimmed, pending_space);
                pending_space = raw.ends_with(char::is_whitespace);
                continue;
            }

            let fragment = self.render_node(child, ctx);
            let leading = edge_whitespace(child, Edge::Start).unwrap_or(false);
            let trailing = edge_whitespace(child, Edge::End).unwrap_or(false);
            if fragment.is_empty() {
                pending_space |= leading || trailing;
                continue;
            }
            push_fragment(&mut output, &fragment, pending_space || leading);
            pending_space = trailing;
        }

        output
    }

    /// `#` repeated `level` times, a space, then the content
    fn handle_heading(&self, node: &Handle, level: u8, ctx: RenderContext) -> String {
        format!(
            "{} {}",
            "#".repeat(usize::from(level)),
            self.render_content(node, ctx)
        )
    }

    /// `[content](href)`, with an empty target when `href` is missing
    fn handle_link(&self, node: &Handle, ctx: RenderContext) -> String {
        let href = attribute(node, "href").unwrap_or_default();
        format!("[{}]({})", self.render_content(node, ctx), href)
    }

    /// `![alt](src)`; a missing `alt` becomes `Image`, a present but empty
    /// one stays empty
    fn handle_image(&self, node: &Handle) -> String {
        let src = attribute(node, "src").unwrap_or_default();
        let alt = attribute(node, "alt").unwrap_or_else(|| DEFAULT_IMAGE_ALT.to_string());
        format!("![{}]({})", alt, src)
    }

    /// Inline code, or a fenced block when the enclosing element is `pre`
    ///
    /// The code text is taken verbatim: tags are dropped, whitespace is not
    /// touched.
    fn handle_code(&self, node: &Handle, ctx: RenderContext) -> String {
        let mut code = String::new();
        extract_code_content(node, &mut code);

        if ctx.is_within(ElementKind::Pre) {
            format!("```\n{}\n```", code)
        } else {
            format!("`{}`", code)
        }
    }

    /// A `pre` has no syntax of its own; its `code` children carry the block
    fn handle_pre(&self, node: &Handle) -> String {
        children_named(node, "code")
            .iter()
            .map(|code| self.render_node(code, RenderContext::Within(ElementKind::Pre)))
            .collect()
    }

    fn handle_blockquote(&self, node: &Handle, ctx: RenderContext) -> String {
        self.render_content(node, ctx)
            .split('\n')
            .map(|line| format!("> {}", line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One line per direct `li` child
    ///
    /// Ordered lists always count from 1; `start` and `value` are ignored.
    /// Nested lists are not indented, they render inline with their item.
    fn handle_list(&self, node: &Handle, ordered: bool) -> String {
        let item_ctx = RenderContext::Within(ElementKind::ListItem);

        children_named(node, "li")
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let content = self.render_content(item, item_ctx);
                if ordered {
                    format!("{}. {}", index + 1, content)
                } else {
                    format!("- {}", content)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Pipe table
    ///
    /// Headers are every `th` below the table, followed by a `---` separator
    /// row of the same width. Data rows are every `tr` below the table that
    /// has at least one `td` below it. Row widths are not reconciled.
    fn handle_table(&self, node: &Handle) -> String {
        let mut rows = Vec::new();

        let headers: Vec<String> = descendants_named(node, "th")
            .iter()
            .map(|th| self.render_content(th, RenderContext::Within(ElementKind::TableHeader)))
            .collect();

        if !headers.is_empty() {
            rows.push(format_row(&headers));
            rows.push(format_row(&vec!["---".to_string(); headers.len()]));
        }

        for tr in descendants_named(node, "tr") {
            let cells: Vec<String> = descendants_named(&tr, "td")
                .iter()
                .map(|td| self.render_content(td, RenderContext::Within(ElementKind::TableData)))
                .collect();

            if !cells.is_empty() {
                rows.push(format_row(&cells));
            }
        }

        rows.join("\n")
    }
}

/// Children of the first `body` element, or of the document itself
fn top_level_nodes(document: &Handle) -> Vec<Handle> {
    match descendants_named(document, "body").first() {
        Some(body) => body.children.borrow().clone(),
        None => document.children.borrow().clone(),
    }
}

/// Whether a top-level node yields a fragment of its own
///
/// Elements always do, even when they render empty. `script`/`style`, blank
/// text, comments and doctypes do not.
fn contributes_fragment(node: &Handle) -> bool {
    match node.data {
        NodeData::Element { .. } => !is_non_content_node(node),
        NodeData::Text { ref contents } => !contents.borrow().trim().is_empty(),
        _ => false,
    }
}

/// `| a | b |`
fn format_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

fn push_fragment(output: &mut String, fragment: &str, space_before: bool) {
    if space_before
        && !output.is_empty()
        && !output.ends_with(char::is_whitespace)
        && !fragment.starts_with(char::is_whitespace)
    {
        output.push(' ');
    }
    output.push_str(fragment);
}

#[derive(Clone, Copy)]
enum Edge {
    Start,
    End,
}

/// Whether the first (or last) text below `node` has whitespace at that edge
///
/// `None` when there is no text before an image or rule is reached.
fn edge_whitespace(node: &Handle, edge: Edge) -> Option<bool> {
    match node.data {
        NodeData::Text { ref contents } => {
            let text = contents.borrow();
            if text.is_empty() {
                return None;
            }
            Some(match edge {
                Edge::Start => text.starts_with(char::is_whitespace),
                Edge::End => text.ends_with(char::is_whitespace),
            })
        }
        NodeData::Element { .. } if !is_non_content_node(node) => {
            if matches!(
                ElementKind::of(node),
                Some(ElementKind::Image | ElementKind::HorizontalRule)
            ) {
                return Some(false);
            }
            let children = node.children.borrow();
            match edge {
                Edge::Start => children.iter().find_map(|c| edge_whitespace(c, edge)),
                Edge::End => children.iter().rev().find_map(|c| edge_whitespace(c, edge)),
            }
        }
        _ => None,
    }
}

/// Concatenate every text node below `node`, without normalization
fn extract_code_content(node: &Handle, output: &mut String) {
    match node.data {
        NodeData::Text { ref contents } => output.push_str(&contents.borrow()),
        NodeData::Element { .. } if !is_non_content_node(node) => {
            for child in node.children.borrow().iter() {
                extract_code_content(child, output);
            }
        }
        _ => {}
    }
}
