//! Error types for pdf2transcript.
//!
//! Provides [`TranscriptError`] for fatal errors that stop a conversion run.
//! The core pipeline itself is total; errors originate at the boundaries
//! (document parsing, file I/O) and are converted into this type so callers
//! handle one error surface.

use std::fmt;

/// Fatal error types for transcript conversion.
///
/// These errors indicate conditions that prevent producing the transcript.
/// An input document that parses but contains no text is not an error; it
/// yields an empty transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptError {
    /// Error parsing document structure or syntax.
    ParseError(String),
    /// I/O error reading input or writing output.
    IoError(String),
    /// Error resolving font or encoding information.
    FontError(String),
    /// Error while walking a page content stream.
    ContentError(String),
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::ParseError(msg) => write!(f, "parse error: {msg}"),
            TranscriptError::IoError(msg) => write!(f, "I/O error: {msg}"),
            TranscriptError::FontError(msg) => write!(f, "font error: {msg}"),
            TranscriptError::ContentError(msg) => write!(f, "content error: {msg}"),
            TranscriptError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for TranscriptError {}

impl From<std::io::Error> for TranscriptError {
    fn from(err: std::io::Error) -> Self {
        TranscriptError::IoError(err.to_string())
    }
}
