//! NextMD Converter - Markdown and HTML conversion library
//!
//! This library converts documents in both directions between Markdown and
//! HTML. HTML to Markdown is a custom tree walk over an html5ever DOM;
//! Markdown to HTML delegates to `pulldown-cmark` and wraps the result in a
//! standalone document.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `parser`: HTML5 parsing using html5ever
//! - `element`: the element vocabulary and DOM navigation helpers
//! - `sanitize`: `script`/`style` elements the converter skips
//! - `converter`: Markdown generation from the DOM tree
//! - `render`: Markdown to HTML rendering
//! - `charset`: character encoding detection for HTML files
//! - `files`: file-to-file conversion
//! - `config`: application configuration
//!
//! # Example
//!
//! ```rust
//! use nextmd_converter::{html_to_markdown, markdown_to_html};
//!
//! assert_eq!(html_to_markdown("<h1><strong>Bold</strong> text</h1>"), "# **Bold** text");
//! assert!(markdown_to_html("# Title").contains("<h1>Title</h1>"));
//! ```

// Module declarations
pub mod charset;
pub mod config;
pub mod converter;
pub mod element;
pub mod error;
pub mod files;
pub mod parser;
pub mod render;
pub mod sanitize;

// Re-export main types for convenience
pub use config::Config;
pub use converter::{MarkdownConverter, html_to_markdown, try_html_to_markdown};
pub use error::ConversionError;
pub use files::{ConversionDirection, convert_file};
pub use parser::parse_html;
pub use render::markdown_to_html;
