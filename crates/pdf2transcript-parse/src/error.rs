//! Error types for the parsing layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps backend-specific failures and converts them into the core
//! [`TranscriptError`] for unified error handling.

use pdf2transcript_core::TranscriptError;
use thiserror::Error;

/// Error type for PDF parsing backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error resolving font or encoding information.
    #[error("font error: {0}")]
    Font(String),

    /// Error while decoding or walking a page content stream.
    #[error("content error: {0}")]
    Content(String),

    /// Wrapped core error.
    #[error(transparent)]
    Core(#[from] TranscriptError),
}

impl From<BackendError> for TranscriptError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => TranscriptError::ParseError(msg),
            BackendError::Io(e) => TranscriptError::IoError(e.to_string()),
            BackendError::Font(msg) => TranscriptError::FontError(msg),
            BackendError::Content(msg) => TranscriptError::ContentError(msg),
            BackendError::Core(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let err = BackendError::Parse("bad xref table".to_string());
        assert_eq!(err.to_string(), "PDF parse error: bad xref table");
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: BackendError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn converts_into_transcript_error() {
        let err: TranscriptError = BackendError::Parse("broken".to_string()).into();
        assert_eq!(err, TranscriptError::ParseError("broken".to_string()));

        let err: TranscriptError = BackendError::Font("no ToUnicode".to_string()).into();
        assert_eq!(err, TranscriptError::FontError("no ToUnicode".to_string()));

        let err: TranscriptError = BackendError::Content("truncated".to_string()).into();
        assert_eq!(err, TranscriptError::ContentError("truncated".to_string()));
    }

    #[test]
    fn core_error_round_trips_unchanged() {
        let core = TranscriptError::IoError("disk full".to_string());
        let err: TranscriptError = BackendError::Core(core.clone()).into();
        assert_eq!(err, core);
    }
}
