//! Speaker-role classification from horizontal position.

use crate::block::{Block, DEFAULT_PAGE_WIDTH};
use crate::columns::TwoColumnMap;

/// Speaker role inferred for a block or merged line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Left column, the answering side. Rendered as "答".
    Left,
    /// Right column, the questioning side. Rendered as "问".
    Right,
    /// No usable position, or a page without two columns. Rendered as "?".
    Undetermined,
}

impl Role {
    /// The marker used for this role in rendered output.
    pub fn marker(&self) -> &'static str {
        match self {
            Role::Left => "答",
            Role::Right => "问",
            Role::Undetermined => "?",
        }
    }
}

/// Maps a block to its [`Role`] using the page layout decision and the
/// block's horizontal position.
///
/// Classification is pure: the role is computed on demand and never stored
/// on the block.
pub struct RoleClassifier;

impl RoleClassifier {
    /// Classify one block against the two-column map.
    ///
    /// Blocks without an `x0`, and blocks on pages that are absent from the
    /// map or mapped to `false`, are `Undetermined`. Otherwise the block is
    /// `Left` when `x0` is strictly left of the page midline and `Right`
    /// when at or right of it.
    pub fn classify(block: &Block, two_column: &TwoColumnMap) -> Role {
        let Some(x0) = block.x0 else {
            return Role::Undetermined;
        };
        if !two_column.get(&block.page).copied().unwrap_or(false) {
            return Role::Undetermined;
        }
        let width = if block.page_width > 0.0 {
            block.page_width
        } else {
            DEFAULT_PAGE_WIDTH
        };
        if x0 < width / 2.0 {
            Role::Left
        } else {
            Role::Right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_block(x0: Option<f64>, page: usize) -> Block {
        Block {
            text: "text".to_string(),
            x0,
            top: 100.0,
            page,
            page_width: 595.28,
        }
    }

    fn two_column_page(page: usize) -> TwoColumnMap {
        let mut map = TwoColumnMap::new();
        map.insert(page, true);
        map
    }

    #[test]
    fn left_of_midline_is_left() {
        let map = two_column_page(1);
        assert_eq!(
            RoleClassifier::classify(&make_block(Some(10.0), 1), &map),
            Role::Left
        );
    }

    #[test]
    fn right_of_midline_is_right() {
        let map = two_column_page(1);
        assert_eq!(
            RoleClassifier::classify(&make_block(Some(400.0), 1), &map),
            Role::Right
        );
    }

    #[test]
    fn exactly_on_midline_is_right() {
        let map = two_column_page(1);
        assert_eq!(
            RoleClassifier::classify(&make_block(Some(297.64), 1), &map),
            Role::Right
        );
    }

    #[test]
    fn missing_x0_is_undetermined() {
        let map = two_column_page(1);
        assert_eq!(
            RoleClassifier::classify(&make_block(None, 1), &map),
            Role::Undetermined
        );
    }

    #[test]
    fn page_absent_from_map_is_undetermined() {
        let map = TwoColumnMap::new();
        assert_eq!(
            RoleClassifier::classify(&make_block(Some(10.0), 1), &map),
            Role::Undetermined
        );
    }

    #[test]
    fn single_column_page_is_undetermined() {
        let mut map = TwoColumnMap::new();
        map.insert(1, false);
        assert_eq!(
            RoleClassifier::classify(&make_block(Some(10.0), 1), &map),
            Role::Undetermined
        );
    }

    #[test]
    fn classification_is_pure() {
        let map = two_column_page(3);
        let block = make_block(Some(50.0), 3);
        let first = RoleClassifier::classify(&block, &map);
        let second = RoleClassifier::classify(&block, &map);
        assert_eq!(first, second);
        assert_eq!(first, Role::Left);
    }

    #[test]
    fn markers_match_output_convention() {
        assert_eq!(Role::Left.marker(), "答");
        assert_eq!(Role::Right.marker(), "问");
        assert_eq!(Role::Undetermined.marker(), "?");
    }
}
