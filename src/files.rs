//! File-to-file conversion
//!
//! The conversion direction is picked from the file extensions: Markdown in
//! and HTML out renders, HTML in and Markdown out converts back. Any other
//! pairing is rejected before the input is read.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::charset::{decode_html, decode_utf8};
use crate::converter::html_to_markdown;
use crate::error::ConversionError;
use crate::render::markdown_to_html;

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Direction of a file conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionDirection {
    MarkdownToHtml,
    HtmlToMarkdown,
}

impl ConversionDirection {
    /// Pick the direction from the input and output extensions
    ///
    /// Extensions are compared case-insensitively.
    ///
    /// ```rust
    /// use std::path::Path;
    /// use nextmd_converter::files::ConversionDirection;
    ///
    /// let direction = ConversionDirection::from_paths(Path::new("a.MD"), Path::new("a.html"));
    /// assert_eq!(direction.unwrap(), ConversionDirection::MarkdownToHtml);
    ///
    /// assert!(ConversionDirection::from_paths(Path::new("a.txt"), Path::new("a.md")).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// `ConversionError::InvalidInput` for any unsupported pairing.
    pub fn from_paths(input: &Path, output: &Path) -> Result<Self, ConversionError> {
        let input_ext = extension_of(input);
        let output_ext = extension_of(output);

        let is_markdown = |ext: &str| MARKDOWN_EXTENSIONS.contains(&ext);
        let is_html = |ext: &str| HTML_EXTENSIONS.contains(&ext);

        if is_markdown(&input_ext) && is_html(&output_ext) {
            Ok(ConversionDirection::MarkdownToHtml)
        } else if is_html(&input_ext) && is_markdown(&output_ext) {
            Ok(ConversionDirection::HtmlToMarkdown)
        } else {
            Err(ConversionError::InvalidInput(format!(
                "unsupported conversion: .{} -> .{}",
                input_ext, output_ext
            )))
        }
    }

    /// Convert already-loaded input bytes in this direction
    ///
    /// # Errors
    ///
    /// `ConversionError::EncodingError` when the bytes cannot be decoded.
    pub fn convert_bytes(self, input: &[u8]) -> Result<String, ConversionError> {
        match self {
            ConversionDirection::MarkdownToHtml => Ok(markdown_to_html(&decode_utf8(input)?)),
            ConversionDirection::HtmlToMarkdown => Ok(html_to_markdown(&decode_html(input)?)),
        }
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Convert `input` into `output`, choosing the direction from the extensions
///
/// Missing parent directories of `output` are created.
///
/// # Errors
///
/// - `ConversionError::InvalidInput`: missing input or unsupported pairing
/// - `ConversionError::EncodingError`: input bytes do not decode
/// - `ConversionError::Io`: reading, creating the output directory or writing failed
pub fn convert_file(input: &Path, output: &Path) -> Result<(), ConversionError> {
    info!(
        "converting file: {} -> {}",
        input.display(),
        output.display()
    );

    let result = convert_file_inner(input, output);
    match &result {
        Ok(()) => info!("file converted: {}", output.display()),
        Err(err) => debug!("file conversion failed: {}", err),
    }
    result
}

fn convert_file_inner(input: &Path, output: &Path) -> Result<(), ConversionError> {
    if !input.exists() {
        return Err(ConversionError::InvalidInput(format!(
            "input file does not exist: {}",
            input.display()
        )));
    }

    let direction = ConversionDirection::from_paths(input, output)?;

    let bytes = fs::read(input).map_err(|e| {
        ConversionError::Io(format!("failed to read {}: {}", input.display(), e))
    })?;
    debug!("read input file, size: {} bytes", bytes.len());

    let converted = direction.convert_bytes(&bytes).map_err(|err| match err {
        ConversionError::EncodingError(msg) => ConversionError::EncodingError(format!(
            "cannot decode {}: {}",
            input.display(),
            msg
        )),
        other => other,
    })?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            ConversionError::Io(format!(
                "failed to create output directory {}: {}",
                parent.display(),
                e
            ))
        })?;
        debug!("created output directory: {}", parent.display());
    }

    fs::write(output, converted).map_err(|e| {
        ConversionError::Io(format!("failed to write {}: {}", output.display(), e))
    })
}
