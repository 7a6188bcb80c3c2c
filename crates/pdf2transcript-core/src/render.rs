//! Numbered-line rendering and the run summary.

use crate::merge::MergedLine;
use crate::role::Role;

/// Counts reported after a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Raw blocks extracted from the document.
    pub blocks: usize,
    /// Merged lines produced.
    pub lines: usize,
    /// Merged lines carrying a 答/问 role.
    pub tagged: usize,
}

impl Summary {
    /// Tally the summary for a merged result.
    pub fn tally(blocks: usize, lines: &[MergedLine]) -> Self {
        Self {
            blocks,
            lines: lines.len(),
            tagged: lines
                .iter()
                .filter(|l| l.role != Role::Undetermined)
                .count(),
        }
    }
}

/// Serializes merged lines with sequential numbering and role markers.
pub struct LineWriter;

impl LineWriter {
    /// Render merged lines as `[L<n>][<marker>] <text>` rows, one per line,
    /// numbered from 1. The result is the full output file content; an empty
    /// input renders as an empty string.
    pub fn render(lines: &[MergedLine]) -> String {
        let mut out = String::new();
        for (index, line) in lines.iter().enumerate() {
            out.push_str(&format!(
                "[L{}][{}] {}\n",
                index + 1,
                line.role.marker(),
                line.text
            ));
        }
        out
    }
}
