//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while converting between HTML and Markdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// HTML parsing failed
    ParseError(String),
    /// Input bytes could not be decoded
    EncodingError(String),
    /// Invalid input data (missing file, unsupported extension pairing, bad config)
    InvalidInput(String),
    /// Reading or writing a file failed
    Io(String),
    /// Internal error
    InternalError(String),
}

impl ConversionError {
    /// Get numeric error code, used as the CLI exit status
    pub fn code(&self) -> u32 {
        match self {
            ConversionError::ParseError(_) => 1,
            ConversionError::EncodingError(_) => 2,
            ConversionError::InvalidInput(_) => 5,
            ConversionError::Io(_) => 6,
            ConversionError::InternalError(_) => 99,
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConversionError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            ConversionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ConversionError::Io(msg) => write!(f, "I/O error: {}", msg),
            ConversionError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::Io(err.to_string())
    }
}
