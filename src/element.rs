//! Element vocabulary recognized by the converter
//!
//! Tag names are resolved to an [`ElementKind`] once per element, and the
//! converter dispatches on the kind with a single `match`. Anything outside
//! the vocabulary is [`ElementKind::Other`] and renders transparently.

use markup5ever_rcdom::{Handle, NodeData};

/// Kind of an HTML element, as far as Markdown rendering is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `h1` to `h6`, carrying the level
    Heading(u8),
    Paragraph,
    /// `strong` or `b`
    Strong,
    /// `em` or `i`
    Emphasis,
    Anchor,
    Image,
    Code,
    Pre,
    Blockquote,
    UnorderedList,
    OrderedList,
    ListItem,
    HorizontalRule,
    Table,
    TableRow,
    TableHeader,
    TableData,
    Other,
}

impl ElementKind {
    /// Resolve a lowercase tag name
    ///
    /// ```rust
    /// use nextmd_converter::element::ElementKind;
    ///
    /// assert_eq!(ElementKind::from_tag("h3"), ElementKind::Heading(3));
    /// assert_eq!(ElementKind::from_tag("b"), ElementKind::Strong);
    /// assert_eq!(ElementKind::from_tag("section"), ElementKind::Other);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" => ElementKind::Heading(1),
            "h2" => ElementKind::Heading(2),
            "h3" => ElementKind::Heading(3),
            "h4" => ElementKind::Heading(4),
            "h5" => ElementKind::Heading(5),
            "h6" => ElementKind::Heading(6),
            "p" => ElementKind::Paragraph,
            "strong" | "b" => ElementKind::Strong,
            "em" | "i" => ElementKind::Emphasis,
            "a" => ElementKind::Anchor,
            "img" => ElementKind::Image,
            "code" => ElementKind::Code,
            "pre" => ElementKind::Pre,
            "blockquote" => ElementKind::Blockquote,
            "ul" => ElementKind::UnorderedList,
            "ol" => ElementKind::OrderedList,
            "li" => ElementKind::ListItem,
            "hr" => ElementKind::HorizontalRule,
            "table" => ElementKind::Table,
            "tr" => ElementKind::TableRow,
            "th" => ElementKind::TableHeader,
            "td" => ElementKind::TableData,
            _ => ElementKind::Other,
        }
    }

    /// Kind of a DOM node, `None` for text, comments and the document itself
    pub fn of(node: &Handle) -> Option<Self> {
        match node.data {
            NodeData::Element { ref name, .. } => Some(Self::from_tag(name.local.as_ref())),
            _ => None,
        }
    }
}

/// The enclosing element kind, passed down the recursion
///
/// Only `code` looks at it today: inside `pre` it becomes a fenced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderContext {
    #[default]
    Flow,
    Within(ElementKind),
}

impl RenderContext {
    pub fn is_within(self, kind: ElementKind) -> bool {
        self == RenderContext::Within(kind)
    }
}

/// Value of an attribute, `None` if the node is not an element or lacks it
pub fn attribute(node: &Handle, key: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == key)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Direct children with the given tag, in document order
pub fn children_named(node: &Handle, tag: &str) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| is_element_named(child, tag))
        .cloned()
        .collect()
}

/// All descendants with the given tag, in document (pre-)order
pub fn descendants_named(node: &Handle, tag: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_descendants(node, tag, &mut found);
    found
}

fn collect_descendants(node: &Handle, tag: &str, found: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if is_element_named(child, tag) {
            found.push(child.clone());
        }
        collect_descendants(child, tag, found);
    }
}

fn is_element_named(node: &Handle, tag: &str) -> bool {
    matches!(node.data, NodeData::Element { ref name, .. } if name.local.as_ref() == tag)
}
