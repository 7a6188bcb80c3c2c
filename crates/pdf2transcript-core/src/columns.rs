//! Per-page two-column layout detection.
//!
//! A page only counts as two-column dialogue when it actually shows text on
//! both sides of its midline. Pages that fail the test (or carry no usable
//! positions at all) are body text and classify as undetermined downstream.

use std::collections::BTreeMap;

use crate::block::{Block, DEFAULT_PAGE_WIDTH};

/// Per-page layout decision: `true` means the page has both a left and a
/// right column. Pages with no qualifying blocks are absent from the map,
/// and absence must be read as "not two-column".
pub type TwoColumnMap = BTreeMap<usize, bool>;

/// Decides, per page, whether the page genuinely exhibits a two-column layout.
pub struct ColumnDetector;

impl ColumnDetector {
    /// Build the [`TwoColumnMap`] for a document's block list.
    ///
    /// Only blocks with a known `x0` and non-empty trimmed text qualify. The
    /// midline is `page_width / 2`, taken from the page's first qualifying
    /// block (all blocks on a page carry the same width). A page maps to
    /// `true` iff it has at least one qualifying block strictly left of the
    /// midline and at least one at or right of it.
    pub fn detect(blocks: &[Block]) -> TwoColumnMap {
        let mut by_page: BTreeMap<usize, Vec<&Block>> = BTreeMap::new();
        for block in blocks {
            if block.x0.is_some() && !block.text.trim().is_empty() {
                by_page.entry(block.page).or_default().push(block);
            }
        }

        let mut map = TwoColumnMap::new();
        for (page, page_blocks) in by_page {
            let width = page_blocks[0].page_width;
            let width = if width > 0.0 { width } else { DEFAULT_PAGE_WIDTH };
            let midline = width / 2.0;
            let has_left = page_blocks
                .iter()
                .any(|b| b.x0.is_some_and(|x0| x0 < midline));
            let has_right = page_blocks
                .iter()
                .any(|b| b.x0.is_some_and(|x0| x0 >= midline));
            map.insert(page, has_left && has_right);
        }
        map
    }
}
