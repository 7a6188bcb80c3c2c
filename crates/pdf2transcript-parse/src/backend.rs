//! PDF parsing backend trait.
//!
//! Defines the [`PdfBackend`] trait that abstracts PDF parsing operations.
//! This enables pluggable backends (e.g., lopdf, pdf-rs) for PDF reading.

use pdf2transcript_core::TranscriptError;

/// One positioned text emission from a page content stream.
///
/// A run is the parse-layer analog of a word item: the text shown by one
/// text-showing operator together with the pen position it was shown at,
/// in top-left page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Decoded Unicode text of the run.
    pub text: String,
    /// Left edge of the run, measured from the page's left edge.
    pub x0: f64,
    /// Top edge of the run, measured from the page's top edge.
    pub top: f64,
}

/// The text content of one page, in one of two mutually exclusive forms.
///
/// Pages whose content stream yields positioned runs use the `Runs` form;
/// pages where no run could be positioned fall back to a flat string.
#[derive(Debug, Clone, PartialEq)]
pub enum PageText {
    /// Positioned runs from the content-stream walk.
    Runs(Vec<TextRun>),
    /// Raw page text with no position data.
    Raw(String),
}

/// Trait abstracting PDF parsing operations.
///
/// A backend provides methods to open PDF documents, access pages, and
/// extract each page's width and positioned text.
///
/// # Associated Types
///
/// - `Document`: The parsed PDF document representation.
/// - `Page`: A reference to a single page within a document.
/// - `Error`: Backend-specific error type, convertible to [`TranscriptError`].
///
/// # Usage
///
/// ```ignore
/// let doc = MyBackend::open(pdf_bytes)?;
/// let page_count = MyBackend::page_count(&doc);
/// let page = MyBackend::get_page(&doc, 0)?;
/// let width = MyBackend::page_width(&doc, &page)?;
/// let text = MyBackend::page_text(&doc, &page)?;
/// ```
pub trait PdfBackend {
    /// The parsed PDF document type.
    type Document;

    /// A reference to a single page within a document.
    type Page;

    /// Backend-specific error type, convertible to [`TranscriptError`].
    type Error: std::error::Error + Into<TranscriptError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not represent a valid PDF document.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Access a page by 0-based index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the page cannot be
    /// loaded.
    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error>;

    /// Get the page's width, if the document reports one.
    ///
    /// # Errors
    ///
    /// Returns an error if the page dictionary cannot be resolved. A page
    /// whose size entry is simply absent yields `Ok(None)`.
    fn page_width(doc: &Self::Document, page: &Self::Page) -> Result<Option<f64>, Self::Error>;

    /// Extract the page's text as positioned runs, or as a raw string when
    /// no run could be positioned.
    ///
    /// # Errors
    ///
    /// Returns an error if the content stream cannot be read or decoded.
    fn page_text(doc: &Self::Document, page: &Self::Page) -> Result<PageText, Self::Error>;
}
