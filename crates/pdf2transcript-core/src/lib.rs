//! Core data types and algorithms for pdf2transcript (backend-independent).
//!
//! This crate contains the layout-to-transcript pipeline: block extraction
//! and ordering, per-page column-layout detection, role classification from
//! horizontal position, sentence merging, and numbered-line rendering. It
//! knows nothing about PDF itself; page content arrives as plain word/
//! position data (or a raw text fallback) supplied by a backend crate.
//!
//! Pipeline order:
//!
//! ```text
//! page content → BlockExtractor → ColumnDetector → RoleClassifier
//!              → SentenceMerger → LineWriter
//! ```

pub mod block;
pub mod columns;
pub mod error;
pub mod merge;
pub mod render;
pub mod role;

pub use block::{
    Block, BlockExtractor, ExtractOptions, PageContent, PageItems, WordItem, DEFAULT_PAGE_WIDTH,
};
pub use columns::{ColumnDetector, TwoColumnMap};
pub use error::TranscriptError;
pub use merge::{MergedLine, SentenceMerger};
pub use render::{LineWriter, Summary};
pub use role::{Role, RoleClassifier};
