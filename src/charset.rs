//! Character encoding detection for HTML files
//!
//! HTML read from disk arrives as bytes. Before it reaches the parser it is
//! decoded to UTF-8 using the first declaration found in this cascade:
//!
//! 1. **Byte order mark**: a UTF-8 BOM is stripped and wins over everything else
//! 2. **HTML Meta Tags**: `<meta charset>` or `<meta http-equiv="Content-Type">`
//! 3. **Default to UTF-8**: if nothing is declared
//!
//! # Examples
//!
//! ```rust
//! use nextmd_converter::charset::detect_charset;
//!
//! let html = b"<html><head><meta charset=\"windows-1252\"></head></html>";
//! assert_eq!(detect_charset(html), "WINDOWS-1252");
//!
//! assert_eq!(detect_charset(b"<p>No charset</p>"), "UTF-8");
//! ```

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::error::ConversionError;

/// Default charset when detection fails
const DEFAULT_CHARSET: &str = "UTF-8";

/// Maximum bytes to scan for meta charset tags (first 1024 bytes)
const META_SCAN_LIMIT: usize = 1024;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Detect the character encoding of an HTML document
///
/// Returns the charset name normalized to uppercase, defaulting to `"UTF-8"`.
pub fn detect_charset(html: &[u8]) -> String {
    if html.starts_with(UTF8_BOM) {
        return DEFAULT_CHARSET.to_string();
    }

    if let Some(charset) = extract_charset_from_html(html) {
        return normalize_charset(&charset);
    }

    DEFAULT_CHARSET.to_string()
}

/// Extract charset from HTML meta tags
///
/// # Supported Formats
///
/// - HTML5: `<meta charset="UTF-8">`
/// - HTML4: `<meta http-equiv="Content-Type" content="text/html; charset=UTF-8">`
///
/// Only the first 1024 bytes are scanned; charset declarations belong early
/// in `<head>`.
///
/// ```rust
/// use nextmd_converter::charset::extract_charset_from_html;
///
/// let html = b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=ISO-8859-1\">";
/// assert_eq!(extract_charset_from_html(html), Some("ISO-8859-1".to_string()));
///
/// assert_eq!(extract_charset_from_html(b"<body>No charset</body>"), None);
/// ```
pub fn extract_charset_from_html(html: &[u8]) -> Option<String> {
    let scan_limit = std::cmp::min(html.len(), META_SCAN_LIMIT);

    // Lossy is fine here, the declaration itself is always ASCII
    let html_str = String::from_utf8_lossy(&html[..scan_limit]);

    static HTML5_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let html5_regex = HTML5_REGEX
        .get_or_init(|| Regex::new(r#"(?i)<meta\s+charset\s*=\s*["']?([^"';>\s/]+)"#).ok());

    if let Some(regex) = html5_regex.as_ref()
        && let Some(m) = regex.captures(&html_str).and_then(|caps| caps.get(1))
    {
        return Some(m.as_str().to_string());
    }

    static HTML4_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let html4_regex = HTML4_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?i)<meta\s+http-equiv\s*=\s*["']?Content-Type["']?\s+content\s*=\s*["']?[^"'>]*charset\s*=\s*([^"';>\s]+)"#,
        )
        .ok()
    });

    html4_regex
        .as_ref()?
        .captures(&html_str)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Normalize charset name to uppercase
pub fn normalize_charset(charset: &str) -> String {
    charset.to_uppercase()
}

/// Decode HTML bytes to a UTF-8 string using the detected charset
///
/// # Errors
///
/// - `ConversionError::EncodingError` if the bytes are invalid for the
///   detected charset or the charset is not supported by `encoding_rs`.
pub fn decode_html(html: &[u8]) -> Result<Cow<'_, str>, ConversionError> {
    let charset = detect_charset(html);
    let body = html.strip_prefix(UTF8_BOM).unwrap_or(html);

    if charset == DEFAULT_CHARSET || charset == "UTF8" {
        return decode_utf8(body);
    }

    let encoding = encoding_rs::Encoding::for_label(charset.as_bytes()).ok_or_else(|| {
        ConversionError::EncodingError(format!("Unsupported charset '{}'", charset))
    })?;

    // Other UTF-8 labels, e.g. `unicode-1-1-utf-8`
    if encoding == encoding_rs::UTF_8 {
        return decode_utf8(body);
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| {
            ConversionError::EncodingError(format!(
                "Invalid byte sequence for charset '{}'",
                charset
            ))
        })
}

/// Decode bytes that must be UTF-8 (Markdown sources, undeclared HTML)
///
/// A leading UTF-8 BOM is dropped.
pub fn decode_utf8(bytes: &[u8]) -> Result<Cow<'_, str>, ConversionError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes).map(Cow::Borrowed).map_err(|e| {
        ConversionError::EncodingError(format!(
            "Invalid UTF-8 at byte position {}: {}",
            e.valid_up_to(),
            e
        ))
    })
}
