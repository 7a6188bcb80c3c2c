//! pdf2transcript-parse: PDF parsing backend and positioned-text extraction.
//!
//! This crate opens PDF documents, walks each page's content stream, and
//! emits positioned text runs for the transcript pipeline in
//! pdf2transcript-core. Parsing is abstracted behind the [`PdfBackend`]
//! trait; the default implementation is [`LopdfBackend`].

pub mod backend;
pub mod content;
pub mod error;
pub mod font;
pub mod lopdf_backend;

pub use backend::{PageText, PdfBackend, TextRun};
pub use error::BackendError;
pub use lopdf_backend::{LopdfBackend, LopdfDocument, LopdfPage};
pub use pdf2transcript_core;
