//! pdf2transcript: convert two-column dialogue PDFs into line-numbered
//! transcripts.
//!
//! Interview transcripts are often typeset as two-column dialogue: the
//! answering speaker in the left column, the questioning speaker in the
//! right. This crate extracts the text with positions, decides per page
//! whether the two-column layout is really present, tags each line 答
//! (left), 问 (right), or ? (undetermined), merges sentence fragments that
//! the layout broke across rows, and renders numbered `[L<n>][<marker>]`
//! lines.
//!
//! The pipeline stages live in `pdf2transcript-core`; PDF parsing lives in
//! `pdf2transcript-parse`. This crate ties them together behind [`Pdf`].
//!
//! # Example
//!
//! ```ignore
//! use pdf2transcript::{ExtractOptions, Pdf};
//!
//! let pdf = Pdf::open_file("interview.pdf")?;
//! let transcript = pdf.to_transcript(&ExtractOptions::default())?;
//! println!("{}", transcript.render());
//! ```

pub mod pdf;

pub use pdf::{Pdf, Transcript};

pub use pdf2transcript_core::{
    Block, BlockExtractor, ColumnDetector, DEFAULT_PAGE_WIDTH, ExtractOptions, LineWriter,
    MergedLine, PageContent, PageItems, Role, RoleClassifier, SentenceMerger, Summary,
    TranscriptError, TwoColumnMap, WordItem,
};
pub use pdf2transcript_parse::{BackendError, LopdfBackend, PageText, PdfBackend, TextRun};
