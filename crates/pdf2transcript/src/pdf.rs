//! Top-level PDF document type for opening and converting to a transcript.

use pdf2transcript_core::{
    BlockExtractor, ColumnDetector, ExtractOptions, LineWriter, MergedLine, PageContent,
    PageItems, RoleClassifier, SentenceMerger, Summary, TranscriptError, WordItem,
};
use pdf2transcript_parse::{LopdfBackend, LopdfDocument, PageText, PdfBackend};

/// The result of converting a document: merged lines plus run counts.
///
/// Produced by [`Pdf::to_transcript`]. The lines are in final order and
/// carry their roles; [`render`](Transcript::render) serializes them as
/// `[L<n>][<marker>] text` rows.
#[derive(Debug, Clone)]
pub struct Transcript {
    lines: Vec<MergedLine>,
    summary: Summary,
}

impl Transcript {
    /// The merged lines, in output order.
    pub fn lines(&self) -> &[MergedLine] {
        &self.lines
    }

    /// Number of raw blocks extracted from the document.
    pub fn block_count(&self) -> usize {
        self.summary.blocks
    }

    /// Number of merged lines.
    pub fn line_count(&self) -> usize {
        self.summary.lines
    }

    /// Number of merged lines tagged 答 or 问.
    pub fn tagged_count(&self) -> usize {
        self.summary.tagged
    }

    /// The run counts as one value.
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Render the transcript as numbered output text.
    pub fn render(&self) -> String {
        LineWriter::render(&self.lines)
    }
}

/// A PDF document opened for transcript conversion.
///
/// # Example
///
/// ```ignore
/// use pdf2transcript::{ExtractOptions, Pdf};
///
/// let pdf = Pdf::open_file("interview.pdf")?;
/// let transcript = pdf.to_transcript(&ExtractOptions::default())?;
/// std::fs::write("transcript_with_lines.txt", transcript.render())?;
/// ```
pub struct Pdf {
    doc: LopdfDocument,
}

impl Pdf {
    /// Open a PDF document from a file path.
    ///
    /// Convenience wrapper around [`Pdf::open`] that reads the file into
    /// memory first.
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError`] if the file cannot be read or is not a
    /// valid PDF.
    #[cfg(feature = "std")]
    pub fn open_file(path: impl AsRef<std::path::Path>) -> Result<Self, TranscriptError> {
        let bytes = std::fs::read(path.as_ref())
            .map_err(|e| TranscriptError::IoError(e.to_string()))?;
        Self::open(&bytes)
    }

    /// Open a PDF document from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError`] if the bytes are not a valid PDF, or the
    /// document is encrypted.
    pub fn open(bytes: &[u8]) -> Result<Self, TranscriptError> {
        let doc = LopdfBackend::open(bytes)?;
        Ok(Self { doc })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        LopdfBackend::page_count(&self.doc)
    }

    /// Run the full conversion pipeline over every page.
    ///
    /// Extracts positioned blocks, detects each page's column layout,
    /// classifies roles, merges continuation fragments, and returns the
    /// result as a [`Transcript`].
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError`] if a page cannot be read.
    pub fn to_transcript(&self, options: &ExtractOptions) -> Result<Transcript, TranscriptError> {
        let mut pages = Vec::with_capacity(self.page_count());
        for index in 0..self.page_count() {
            let page = LopdfBackend::get_page(&self.doc, index)?;
            let width = LopdfBackend::page_width(&self.doc, &page)?;
            let items = match LopdfBackend::page_text(&self.doc, &page)? {
                PageText::Runs(runs) => PageItems::Words(
                    runs.into_iter()
                        .map(|run| WordItem {
                            text: run.text,
                            x0: run.x0,
                            top: run.top,
                        })
                        .collect(),
                ),
                PageText::Raw(text) => PageItems::Raw(text),
            };
            pages.push(PageContent { width, items });
        }

        let blocks = BlockExtractor::extract(&pages, options);
        let two_column = ColumnDetector::detect(&blocks);
        // The merger expects stripped, non-empty fragments; run text can
        // carry whitespace from the content stream.
        let fragments = blocks
            .iter()
            .filter_map(|block| {
                let text = block.text.trim();
                if text.is_empty() {
                    return None;
                }
                Some((
                    text.to_string(),
                    RoleClassifier::classify(block, &two_column),
                ))
            })
            .collect();
        let lines = SentenceMerger::merge(fragments);
        let summary = Summary::tally(blocks.len(), &lines);

        Ok(Transcript { lines, summary })
    }
}
