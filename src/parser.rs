//! HTML5 parser using html5ever
//!
//! This module turns HTML text into an `RcDom` tree. html5ever implements the
//! WHATWG parsing algorithm, so malformed markup (unclosed tags, stray end
//! tags, truncated documents) is recovered exactly the way a browser would
//! recover it, and parsing itself never fails.
//!
//! Two properties of the resulting tree matter to the converter:
//!
//! - Every document gets implicit `html`, `head` and `body` elements.
//! - Table rows are wrapped in an implicit `tbody` when the source omits it.
//!
//! # Examples
//!
//! ```rust
//! use nextmd_converter::parser::parse_html;
//!
//! let dom = parse_html("<h1>Hello").expect("Parser handles malformed HTML");
//! ```

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::RcDom;

use crate::charset::decode_html;
use crate::error::ConversionError;

/// Parse HTML text into a DOM tree
///
/// # Errors
///
/// - `ConversionError::InvalidInput`: the input is empty
pub fn parse_html(html: &str) -> Result<RcDom, ConversionError> {
    if html.is_empty() {
        return Err(ConversionError::InvalidInput(
            "HTML input is empty".to_string(),
        ));
    }

    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    Ok(dom)
}

/// Parse raw HTML bytes, decoding them with the declared charset first
///
/// # Errors
///
/// - `ConversionError::EncodingError`: the bytes do not decode
/// - `ConversionError::InvalidInput`: the input is empty
pub fn parse_html_bytes(html: &[u8]) -> Result<RcDom, ConversionError> {
    let text = decode_html(html)?;
    parse_html(&text)
}
