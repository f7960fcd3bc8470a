/// Row-span descriptor for one (row, column) cell.
///
/// `count` is signed. On the anchor ("main") cell of a merge it is the number
/// of rows the merge extends below the anchor. On a subordinate cell it is the
/// negated distance to the anchor, so `index + count` always lands on the
/// anchor row. Ordinary cells carry `count == 0` and `is_main_row == true`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSpan<K> {
    pub count: isize,
    pub is_main_row: bool,
    pub main_row_key: K,
}

impl<K> RowSpan<K> {
    /// Descriptor for a cell that takes part in no merge.
    pub fn single(row_key: K) -> Self {
        Self {
            count: 0,
            is_main_row: true,
            main_row_key: row_key,
        }
    }

    /// Anchor of a merge covering `rows_below` rows under it.
    pub fn anchor(row_key: K, rows_below: isize) -> Self {
        Self {
            count: rows_below,
            is_main_row: true,
            main_row_key: row_key,
        }
    }

    /// Subordinate cell `rows_below_anchor` rows under `main_row_key`.
    pub fn subordinate(main_row_key: K, rows_below_anchor: isize) -> Self {
        Self {
            count: -rows_below_anchor,
            is_main_row: false,
            main_row_key,
        }
    }

    /// True if this cell is the anchor of a multi-row merge.
    pub fn is_merge_anchor(&self) -> bool {
        self.is_main_row && self.count > 0
    }
}
