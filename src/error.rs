//! Error types for redakt.

use std::path::Path;
use thiserror::Error;

/// Result type for redakt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for redakt operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A detector failed or is unavailable. Always fatal for the current
    /// run: a broken detector would silently produce incomplete redaction.
    #[error("detector error: {0}")]
    Detector(String),

    /// A detector produced a malformed span (out-of-range offsets or
    /// offsets off a character boundary). Programming error in the
    /// detector, never silently clipped.
    #[error("invalid span: {0}")]
    InvalidSpan(String),

    /// A recognizer pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Text extraction from a document failed.
    #[error("failed to extract text from {path}: {message}")]
    Extraction {
        /// Path of the document that could not be read.
        path: String,
        /// Underlying failure description.
        message: String,
    },

    /// Input file has an extension no extractor handles.
    #[error("unsupported file type '{0}' (supported: pdf, docx, log, txt)")]
    UnsupportedExtension(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a detector error.
    pub fn detector(msg: impl Into<String>) -> Self {
        Error::Detector(msg.into())
    }

    /// Create an invalid span error.
    pub fn invalid_span(msg: impl Into<String>) -> Self {
        Error::InvalidSpan(msg.into())
    }

    /// Create an extraction error for a file.
    pub fn extraction(path: &Path, message: impl Into<String>) -> Self {
        Error::Extraction {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}
