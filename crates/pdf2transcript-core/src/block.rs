//! Positioned text blocks and the row-based block extractor.
//!
//! A [`Block`] is one visual row of page content with enough position data to
//! order it and to classify its column. [`BlockExtractor`] builds the
//! document-wide block list from per-page content, which arrives either as
//! word-level items with coordinates or as a raw fallback string.

use std::collections::BTreeMap;

/// Default page width in PDF points (A4 portrait), used whenever a page
/// reports no usable width.
pub const DEFAULT_PAGE_WIDTH: f64 = 595.28;

/// Options for block extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Rounding step applied to `top` when grouping word items into rows.
    /// Items whose quantized `top` coincides land on the same row.
    pub row_quantum: f64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { row_quantum: 0.1 }
    }
}

/// A word-level item from one page, carrying its position.
///
/// Coordinates use the top-left convention: `x0` is measured from the page's
/// left edge, `top` from the page's top edge.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordItem {
    /// The text content of this item.
    pub text: String,
    /// Left edge of the item.
    pub x0: f64,
    /// Top edge of the item.
    pub top: f64,
}

/// The content of one page, in one of two mutually exclusive forms.
///
/// A backend supplies word-level items when it can position text; pages where
/// that is not possible fall back to a raw text string. The two strategies
/// are deliberately explicit variants rather than an empty-items convention.
#[derive(Debug, Clone, PartialEq)]
pub enum PageItems {
    /// Word-level items with coordinates.
    Words(Vec<WordItem>),
    /// Raw page text with no position data, split on line breaks.
    Raw(String),
}

/// One page of input to the extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    /// Reported page width, if any. Non-positive values are treated as absent.
    pub width: Option<f64>,
    /// The page's text content.
    pub items: PageItems,
}

/// A minimal positioned text unit extracted from one row of page content.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// Joined text of the row.
    pub text: String,
    /// Left coordinate of the row's first word; `None` for fallback blocks.
    pub x0: Option<f64>,
    /// Vertical ordering coordinate. For fallback blocks this is a synthetic
    /// increasing ordinal, not a real coordinate.
    pub top: f64,
    /// 1-based page number.
    pub page: usize,
    /// Width of the page this block came from.
    pub page_width: f64,
}

/// Extracts the ordered document-wide block list from per-page content.
pub struct BlockExtractor;

impl BlockExtractor {
    /// Extract blocks from all pages, in final reading order.
    ///
    /// Pages are numbered from 1 in iteration order. Word items are grouped
    /// into rows by quantized `top`; each row joins its items left-to-right
    /// with single spaces. Pages without word items contribute one block per
    /// non-empty line of their raw text, with `x0 = None` and a synthetic
    /// `top` taken from the running count of blocks already emitted.
    ///
    /// The returned list is sorted by `(page, top, x0-or-zero)` ascending.
    /// Rows whose joined text is empty after trimming are never emitted.
    pub fn extract(pages: &[PageContent], options: &ExtractOptions) -> Vec<Block> {
        let mut blocks: Vec<Block> = Vec::new();

        for (index, page) in pages.iter().enumerate() {
            let page_no = index + 1;
            let page_width = page
                .width
                .filter(|w| *w > 0.0)
                .unwrap_or(DEFAULT_PAGE_WIDTH);

            match &page.items {
                PageItems::Words(words) => {
                    Self::extract_word_rows(words, page_no, page_width, options, &mut blocks);
                }
                PageItems::Raw(text) => {
                    for line in text.lines() {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        blocks.push(Block {
                            text: trimmed.to_string(),
                            x0: None,
                            top: blocks.len() as f64,
                            page: page_no,
                            page_width,
                        });
                    }
                }
            }
        }

        // Extraction walks page by page; consumers need one linear stream.
        // total_cmp keeps the sort defined even for non-finite coordinates.
        blocks.sort_by(|a, b| {
            a.page
                .cmp(&b.page)
                .then(a.top.total_cmp(&b.top))
                .then(a.x0.unwrap_or(0.0).total_cmp(&b.x0.unwrap_or(0.0)))
        });
        blocks
    }

    /// Group one page's word items into row blocks.
    fn extract_word_rows(
        words: &[WordItem],
        page_no: usize,
        page_width: f64,
        options: &ExtractOptions,
        blocks: &mut Vec<Block>,
    ) {
        let quantum = options.row_quantum;
        let mut rows: BTreeMap<i64, Vec<&WordItem>> = BTreeMap::new();
        for word in words {
            let key = (word.top / quantum).round() as i64;
            rows.entry(key).or_default().push(word);
        }

        for (key, mut row) in rows {
            row.sort_by(|a, b| a.x0.total_cmp(&b.x0));
            let text = row
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            if text.trim().is_empty() {
                continue;
            }
            blocks.push(Block {
                text,
                x0: Some(row[0].x0),
                top: key as f64 * quantum,
                page: page_no,
                page_width,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_word(text: &str, x0: f64, top: f64) -> WordItem {
        WordItem {
            text: text.to_string(),
            x0,
            top,
        }
    }

    fn words_page(words: Vec<WordItem>) -> PageContent {
        PageContent {
            width: Some(595.28),
            items: PageItems::Words(words),
        }
    }

    fn raw_page(text: &str) -> PageContent {
        PageContent {
            width: Some(595.28),
            items: PageItems::Raw(text.to_string()),
        }
    }

    #[test]
    fn words_on_one_row_join_with_spaces() {
        let pages = vec![words_page(vec![
            make_word("Hello", 10.0, 100.0),
            make_word("world", 40.0, 100.0),
        ])];
        let blocks = BlockExtractor::extract(&pages, &ExtractOptions::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Hello world");
        assert_eq!(blocks[0].x0, Some(10.0));
        assert_eq!(blocks[0].top, 100.0);
        assert_eq!(blocks[0].page, 1);
    }

    #[test]
    fn row_words_sorted_by_x0_before_joining() {
        let pages = vec![words_page(vec![
            make_word("world", 40.0, 100.0),
            make_word("Hello", 10.0, 100.0),
        ])];
        let blocks = BlockExtractor::extract(&pages, &ExtractOptions::default());
        assert_eq!(blocks[0].text, "Hello world");
        assert_eq!(blocks[0].x0, Some(10.0));
    }

    #[test]
    fn near_equal_tops_group_into_one_row() {
        // 100.04 and 99.96 both quantize to 100.0 at the default 0.1 step.
        let pages = vec![words_page(vec![
            make_word("a", 10.0, 100.04),
            make_word("b", 30.0, 99.96),
        ])];
        let blocks = BlockExtractor::extract(&pages, &ExtractOptions::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "a b");
        assert_eq!(blocks[0].top, 100.0);
    }

    #[test]
    fn non_finite_coordinates_do_not_panic_the_sort() {
        // Hostile matrix math upstream can yield NaN or infinite positions;
        // extraction must still order the rest deterministically.
        let pages = vec![words_page(vec![
            make_word("stray", f64::NAN, 100.0),
            make_word("second", 10.0, 120.0),
            make_word("first", 10.0, 100.0),
        ])];
        let blocks = BlockExtractor::extract(&pages, &ExtractOptions::default());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "first stray");
        assert_eq!(blocks[1].text, "second");
    }

    #[test]
    fn distinct_tops_stay_separate_rows() {
        let pages = vec![words_page(vec![
            make_word("first", 10.0, 100.0),
            make_word("second", 10.0, 114.0),
        ])];
        let blocks = BlockExtractor::extract(&pages, &ExtractOptions::default());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "first");
        assert_eq!(blocks[1].text, "second");
    }

    #[test]
    fn whitespace_only_row_is_dropped() {
        let pages = vec![words_page(vec![
            make_word("  ", 10.0, 100.0),
            make_word("kept", 10.0, 200.0),
        ])];
        let blocks = BlockExtractor::extract(&pages, &ExtractOptions::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "kept");
    }

    #[test]
    fn raw_fallback_emits_ordinal_tops_and_no_x0() {
        let pages = vec![raw_page("line one\n\n  line two  \nline three")];
        let blocks = BlockExtractor::extract(&pages, &ExtractOptions::default());
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].text, "line one");
        assert_eq!(blocks[1].text, "line two");
        assert_eq!(blocks[2].text, "line three");
        for (i, block) in blocks.iter().enumerate() {
            assert_eq!(block.x0, None);
            assert_eq!(block.top, i as f64);
        }
    }

    #[test]
    fn fallback_ordinals_continue_across_pages() {
        // The synthetic top is the running count of blocks already emitted,
        // document-wide, so later fallback pages keep ascending tops.
        let pages = vec![
            words_page(vec![
                make_word("w1", 10.0, 50.0),
                make_word("w2", 10.0, 80.0),
            ]),
            raw_page("fallback"),
        ];
        let blocks = BlockExtractor::extract(&pages, &ExtractOptions::default());
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2].text, "fallback");
        assert_eq!(blocks[2].top, 2.0);
        assert_eq!(blocks[2].page, 2);
    }

    #[test]
    fn missing_or_bogus_page_width_uses_default() {
        let pages = vec![
            PageContent {
                width: None,
                items: PageItems::Words(vec![make_word("a", 10.0, 100.0)]),
            },
            PageContent {
                width: Some(0.0),
                items: PageItems::Words(vec![make_word("b", 10.0, 100.0)]),
            },
        ];
        let blocks = BlockExtractor::extract(&pages, &ExtractOptions::default());
        assert_eq!(blocks[0].page_width, DEFAULT_PAGE_WIDTH);
        assert_eq!(blocks[1].page_width, DEFAULT_PAGE_WIDTH);
    }

    #[test]
    fn empty_page_contributes_no_blocks() {
        let pages = vec![
            words_page(vec![]),
            raw_page(""),
            words_page(vec![make_word("only", 10.0, 100.0)]),
        ];
        let blocks = BlockExtractor::extract(&pages, &ExtractOptions::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].page, 3);
    }

    #[test]
    fn output_is_ordered_by_page_top_and_x0() {
        let pages = vec![
            words_page(vec![
                make_word("p1-low", 10.0, 300.0),
                make_word("p1-right", 400.0, 100.0),
                make_word("p1-left", 10.0, 100.0),
            ]),
            words_page(vec![make_word("p2", 10.0, 50.0)]),
        ];
        let blocks = BlockExtractor::extract(&pages, &ExtractOptions::default());
        let order: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(order, vec!["p1-left p1-right", "p1-low", "p2"]);

        for pair in blocks.windows(2) {
            let a = (pair[0].page, pair[0].top, pair[0].x0.unwrap_or(0.0));
            let b = (pair[1].page, pair[1].top, pair[1].x0.unwrap_or(0.0));
            assert!(a <= b, "blocks out of order: {a:?} > {b:?}");
        }
    }

    #[test]
    fn extraction_is_deterministic() {
        let pages = vec![
            words_page(vec![
                make_word("b", 200.0, 100.0),
                make_word("a", 10.0, 100.0),
                make_word("c", 10.0, 200.0),
            ]),
            raw_page("x\ny"),
        ];
        let first = BlockExtractor::extract(&pages, &ExtractOptions::default());
        let second = BlockExtractor::extract(&pages, &ExtractOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn vertically_aligned_columns_share_one_row() {
        // Row grouping keys on top alone, so both columns land in one block
        // when their baselines coincide.
        let pages = vec![words_page(vec![
            make_word("左", 10.0, 100.0),
            make_word("右", 400.0, 100.0),
        ])];
        let blocks = BlockExtractor::extract(&pages, &ExtractOptions::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "左 右");
    }
}
