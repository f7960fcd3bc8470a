//! In-memory row/column registries and coordinate provider.
//!
//! Cell positions are derived once from the column list and the uniform row
//! height, and merge ranges are expanded into per-cell span descriptors, so
//! every lookup the engines make is a map or vector access.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Dimensions;
use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::provider::{ColumnRegistry, CoordinateProvider, RowRegistry};
use crate::types::{CellRect, RowSpan};

/// Row key type of the in-memory registry
pub type RowKey = u32;

/// Default column width in pixels
pub const DEFAULT_COL_WIDTH: f32 = 80.0;

fn default_col_width() -> f32 {
    DEFAULT_COL_WIDTH
}

/// A column of the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub name: String,
    #[serde(default = "default_col_width")]
    pub width: f32,
    /// Hidden columns take no space and are skipped by navigation
    #[serde(default)]
    pub hidden: bool,
    /// Column belongs to the fixed left region
    #[serde(default)]
    pub fixed_left: bool,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: DEFAULT_COL_WIDTH,
            hidden: false,
            fixed_left: false,
        }
    }

    pub fn fixed(name: impl Into<String>) -> Self {
        Self {
            fixed_left: true,
            ..Self::new(name)
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// A vertical merge: rows `start_row..=end_row` (indices) of one column
/// presented as a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowMerge {
    pub column: String,
    pub start_row: usize,
    pub end_row: usize,
}

impl RowMerge {
    pub fn new(column: impl Into<String>, start_row: usize, end_row: usize) -> Self {
        Self {
            column: column.into(),
            start_row,
            end_row,
        }
    }
}

/// Information about a merged cell
#[derive(Debug, Clone, Copy)]
struct MergeInfo {
    /// True if this cell is the anchor (first row) of the merge
    is_origin: bool,
    /// Row index of the merge anchor
    origin_row: usize,
    /// Number of rows in the merge
    row_span: usize,
}

/// Description of a whole grid, as loaded from JSON by the CLI and bindings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridSpec {
    /// Number of rows, keyed `0..rows` (ignored when `row_keys` is given)
    pub rows: usize,
    pub row_keys: Option<Vec<RowKey>>,
    pub columns: Vec<ColumnSpec>,
    pub merges: Vec<RowMerge>,
    pub dimensions: Dimensions,
    pub config: GridConfig,
}

impl GridSpec {
    /// # Errors
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the registries described by this spec.
    ///
    /// # Errors
    /// Returns an error if the configuration, rows, columns or merges are
    /// inconsistent.
    pub fn build_layout(&self) -> Result<GridLayout> {
        self.config.validate()?;
        let row_keys = match &self.row_keys {
            Some(keys) => keys.clone(),
            None => sequential_keys(self.rows)?,
        };
        GridLayout::new(row_keys, self.columns.clone(), &self.merges, self.dimensions)
    }
}

/// Row keys `0..count`.
///
/// # Errors
/// Returns `InvalidConfig` if `count` does not fit the key type.
pub fn sequential_keys(count: usize) -> Result<Vec<RowKey>> {
    let count = RowKey::try_from(count)
        .map_err(|_| GridError::InvalidConfig(format!("row count {count} too large")))?;
    Ok((0..count).collect())
}

/// Pre-computed registries and geometry for a grid
#[derive(Debug, Clone)]
pub struct GridLayout {
    /// Row keys in display order
    row_keys: Vec<RowKey>,
    /// Reverse lookup of `row_keys`
    row_index: HashMap<RowKey, usize>,
    /// All columns, fixed left region first
    columns: Vec<ColumnSpec>,
    /// Reverse lookup of `columns` by name
    column_index: HashMap<String, usize>,
    /// Left edge of each column relative to its region (0 width when hidden)
    col_positions: Vec<f32>,
    /// Total width of the scrollable region's columns
    rside_content_width: f32,
    /// Merge ranges as given
    merge_ranges: Vec<RowMerge>,
    /// Merge info lookup by (row index, column index)
    merges: HashMap<(usize, usize), MergeInfo>,
    dimensions: Dimensions,
    /// Bumped by every `set_rows`
    revision: u64,
}

impl GridLayout {
    /// Create a layout from ordered row keys, columns and merge ranges.
    ///
    /// Columns flagged `fixed_left` are moved in front of the others, keeping
    /// their relative order.
    ///
    /// # Errors
    /// Returns an error if dimensions are invalid, a row key or column name is
    /// duplicated, or a merge is out of range, names an unknown column, or
    /// overlaps another merge.
    pub fn new(
        row_keys: Vec<RowKey>,
        columns: Vec<ColumnSpec>,
        merge_ranges: &[RowMerge],
        dimensions: Dimensions,
    ) -> Result<Self> {
        dimensions.validate()?;

        let mut row_index = HashMap::with_capacity(row_keys.len());
        for (i, key) in row_keys.iter().enumerate() {
            if row_index.insert(*key, i).is_some() {
                return Err(GridError::DuplicateRowKey(key.to_string()));
            }
        }

        let (mut ordered, rest): (Vec<ColumnSpec>, Vec<ColumnSpec>) =
            columns.into_iter().partition(|c| c.fixed_left);
        ordered.extend(rest);

        let mut column_index = HashMap::with_capacity(ordered.len());
        for (i, column) in ordered.iter().enumerate() {
            if column_index.insert(column.name.clone(), i).is_some() {
                return Err(GridError::InvalidConfig(format!(
                    "duplicate column name: {}",
                    column.name
                )));
            }
        }

        // Pre-compute column positions, each region starting at 0
        let mut col_positions = Vec::with_capacity(ordered.len());
        let mut lside_x: f32 = 0.0;
        let mut rside_x: f32 = 0.0;
        for column in &ordered {
            let w = if column.hidden { 0.0 } else { column.width };
            if column.fixed_left {
                col_positions.push(lside_x);
                lside_x += w;
            } else {
                col_positions.push(rside_x);
                rside_x += w;
            }
        }

        let mut layout = GridLayout {
            row_keys,
            row_index,
            columns: ordered,
            column_index,
            col_positions,
            rside_content_width: rside_x,
            merge_ranges: Vec::new(),
            merges: HashMap::new(),
            dimensions,
            revision: 0,
        };
        for merge in merge_ranges {
            layout.add_merge(merge)?;
        }
        Ok(layout)
    }

    /// Layout with rows keyed `0..row_count`.
    ///
    /// # Errors
    /// See [`GridLayout::new`].
    pub fn with_row_count(
        row_count: usize,
        columns: Vec<ColumnSpec>,
        merge_ranges: &[RowMerge],
        dimensions: Dimensions,
    ) -> Result<Self> {
        Self::new(sequential_keys(row_count)?, columns, merge_ranges, dimensions)
    }

    fn add_merge(&mut self, merge: &RowMerge) -> Result<()> {
        let col = *self
            .column_index
            .get(&merge.column)
            .ok_or_else(|| GridError::UnknownColumn(merge.column.clone()))?;
        if merge.start_row > merge.end_row || merge.end_row >= self.row_keys.len() {
            return Err(GridError::InvalidMerge(format!(
                "rows {}..={} of column {} do not fit {} rows",
                merge.start_row,
                merge.end_row,
                merge.column,
                self.row_keys.len()
            )));
        }
        if (merge.start_row..=merge.end_row).any(|r| self.merges.contains_key(&(r, col))) {
            return Err(GridError::InvalidMerge(format!(
                "rows {}..={} of column {} overlap another merge",
                merge.start_row, merge.end_row, merge.column
            )));
        }
        // Single-row merges are ordinary cells
        if merge.start_row == merge.end_row {
            return Ok(());
        }

        let row_span = merge.end_row - merge.start_row + 1;
        for r in merge.start_row..=merge.end_row {
            self.merges.insert(
                (r, col),
                MergeInfo {
                    is_origin: r == merge.start_row,
                    origin_row: merge.start_row,
                    row_span,
                },
            );
        }
        self.merge_ranges.push(merge.clone());
        Ok(())
    }

    /// Merge ranges currently applied
    pub fn merges(&self) -> &[RowMerge] {
        &self.merge_ranges
    }

    pub fn row_keys(&self) -> &[RowKey] {
        &self.row_keys
    }

    /// Replace the row sequence (data reload). Merges that no longer fit the
    /// new row count are dropped.
    ///
    /// # Errors
    /// Returns `DuplicateRowKey` if a key appears twice; the layout is left
    /// unchanged in that case.
    pub fn set_rows(&mut self, row_keys: Vec<RowKey>) -> Result<()> {
        let mut row_index = HashMap::with_capacity(row_keys.len());
        for (i, key) in row_keys.iter().enumerate() {
            if row_index.insert(*key, i).is_some() {
                return Err(GridError::DuplicateRowKey(key.to_string()));
            }
        }
        let row_count = row_keys.len();
        self.row_keys = row_keys;
        self.row_index = row_index;
        self.revision += 1;

        let previous = std::mem::take(&mut self.merge_ranges);
        self.merges.clear();
        for merge in previous.iter().filter(|m| m.end_row < row_count) {
            self.add_merge(merge)?;
        }
        let dropped = previous.len() - self.merge_ranges.len();
        if dropped > 0 {
            log::debug!("[layout] dropped {dropped} merges after row reload ({row_count} rows)");
        }
        Ok(())
    }

    /// Resize the body
    pub fn set_body_height(&mut self, body_height: f32) {
        self.dimensions.body_height = body_height.max(0.0);
    }

    /// # Errors
    /// Returns `InvalidConfig` if the new dimensions are invalid.
    pub fn set_dimensions(&mut self, dimensions: Dimensions) -> Result<()> {
        dimensions.validate()?;
        self.dimensions = dimensions;
        Ok(())
    }

    fn row_extent(&self, row: usize, col: Option<usize>) -> (f32, f32) {
        let row_height = self.dimensions.row_height;
        let (first, span) = match col.and_then(|c| self.merges.get(&(row, c))) {
            Some(merge) => (merge.origin_row, merge.row_span),
            None => (row, 1),
        };
        let top = first as f32 * row_height;
        (top, top + span as f32 * row_height)
    }
}

impl RowRegistry for GridLayout {
    type Key = RowKey;

    fn row_count(&self) -> usize {
        self.row_keys.len()
    }

    fn row_at(&self, index: usize) -> Option<RowKey> {
        self.row_keys.get(index).copied()
    }

    fn index_of_row_key(&self, key: &RowKey) -> Option<usize> {
        self.row_index.get(key).copied()
    }

    fn row_span(&self, key: &RowKey, column_name: &str) -> Option<RowSpan<RowKey>> {
        let row = self.index_of_row_key(key)?;
        let merge = self
            .column_index
            .get(column_name)
            .and_then(|col| self.merges.get(&(row, *col)));
        let Some(merge) = merge else {
            return Some(RowSpan::single(*key));
        };
        let rows_below = isize::try_from(merge.row_span - 1).ok()?;
        if merge.is_origin {
            Some(RowSpan::anchor(*key, rows_below))
        } else {
            let main_row_key = self.row_at(merge.origin_row)?;
            let offset = isize::try_from(row - merge.origin_row).ok()?;
            Some(RowSpan::subordinate(main_row_key, offset))
        }
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

impl ColumnRegistry for GridLayout {
    fn visible_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !c.hidden)
            .map(|c| c.name.clone())
            .collect()
    }

    fn index_of_column_name(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .filter(|c| !c.hidden)
            .position(|c| c.name == name)
    }

    fn is_in_fixed_left_region(&self, name: &str) -> bool {
        self.column_index
            .get(name)
            .and_then(|i| self.columns.get(*i))
            .is_some_and(|c| c.fixed_left)
    }
}

impl CoordinateProvider<RowKey> for GridLayout {
    fn cell_rect(&self, row_key: &RowKey, column_name: &str) -> Option<CellRect> {
        let row = self.index_of_row_key(row_key)?;
        let col = *self.column_index.get(column_name)?;
        let column = self.columns.get(col)?;
        let left = self.col_positions.get(col).copied()?;
        let width = if column.hidden { 0.0 } else { column.width };
        let (top, bottom) = self.row_extent(row, Some(col));
        Some(CellRect {
            top,
            bottom,
            left,
            right: left + width,
        })
    }

    fn total_content_height(&self) -> f32 {
        self.row_keys.len() as f32 * self.dimensions.row_height
    }

    fn total_content_width(&self) -> f32 {
        self.rside_content_width
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("c1"),
            ColumnSpec::fixed("id").with_width(40.0),
            ColumnSpec::new("c2").with_width(100.0),
            ColumnSpec::new("c3").hidden(),
        ]
    }

    fn layout_with(merges: &[RowMerge]) -> GridLayout {
        GridLayout::with_row_count(10, columns(), merges, Dimensions::default()).unwrap()
    }

    #[test]
    fn test_basic_layout() {
        let layout = layout_with(&[]);
        assert_eq!(layout.row_count(), 10);
        assert_eq!(layout.row_at(3), Some(3));
        assert_eq!(layout.row_at(10), None);
        assert_eq!(layout.index_of_row_key(&7), Some(7));
        assert_eq!(layout.total_content_height(), 200.0);
        assert_eq!(layout.total_content_width(), DEFAULT_COL_WIDTH + 100.0);
    }

    #[test]
    fn test_fixed_columns_come_first() {
        let layout = layout_with(&[]);
        assert_eq!(layout.visible_columns(), vec!["id", "c1", "c2"]);
        assert_eq!(layout.index_of_column_name("c1"), Some(1));
        assert_eq!(layout.index_of_column_name("c3"), None);
        assert!(layout.is_in_fixed_left_region("id"));
        assert!(!layout.is_in_fixed_left_region("c2"));
        assert!(!layout.is_in_fixed_left_region("missing"));
    }

    #[test]
    fn test_cell_rect_is_region_relative() {
        let layout = layout_with(&[]);
        let rect = layout.cell_rect(&2, "id").unwrap();
        assert_eq!((rect.left, rect.right), (0.0, 40.0));
        assert_eq!((rect.top, rect.bottom), (40.0, 60.0));

        let rect = layout.cell_rect(&2, "c2").unwrap();
        assert_eq!((rect.left, rect.right), (DEFAULT_COL_WIDTH, DEFAULT_COL_WIDTH + 100.0));
        assert!(layout.cell_rect(&42, "c2").is_none());
        assert!(layout.cell_rect(&2, "nope").is_none());
    }

    #[test]
    fn test_merged_cells() {
        let layout = layout_with(&[RowMerge::new("c1", 2, 5)]);

        assert_eq!(layout.row_span(&2, "c1"), Some(RowSpan::anchor(2, 3)));
        assert_eq!(layout.row_span(&4, "c1"), Some(RowSpan::subordinate(2, 2)));
        assert_eq!(layout.row_span(&4, "c2"), Some(RowSpan::single(4)));
        assert_eq!(layout.row_span(&99, "c1"), None);

        // Every cell of the merge reports the merged extent
        for key in 2..=5 {
            let rect = layout.cell_rect(&key, "c1").unwrap();
            assert_eq!((rect.top, rect.bottom), (40.0, 120.0));
        }
    }

    #[test]
    fn test_merge_validation() {
        let err = GridLayout::with_row_count(
            10,
            columns(),
            &[RowMerge::new("c1", 8, 10)],
            Dimensions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidMerge(_)));

        let err = GridLayout::with_row_count(
            10,
            columns(),
            &[RowMerge::new("zz", 1, 2)],
            Dimensions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GridError::UnknownColumn(_)));

        let err = GridLayout::with_row_count(
            10,
            columns(),
            &[RowMerge::new("c1", 1, 3), RowMerge::new("c1", 3, 4)],
            Dimensions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidMerge(_)));
    }

    #[test]
    fn test_duplicate_row_key() {
        let err = GridLayout::new(vec![1, 2, 1], columns(), &[], Dimensions::default())
            .unwrap_err();
        assert!(matches!(err, GridError::DuplicateRowKey(_)));
    }

    #[test]
    fn test_set_rows_drops_merges_past_end() {
        let mut layout = layout_with(&[RowMerge::new("c1", 1, 2), RowMerge::new("c2", 6, 8)]);
        layout.set_rows(vec![10, 11, 12, 13, 14]).unwrap();
        assert_eq!(layout.merges(), &[RowMerge::new("c1", 1, 2)]);
        assert_eq!(layout.row_span(&11, "c1"), Some(RowSpan::anchor(11, 1)));
        assert_eq!(layout.row_span(&12, "c1"), Some(RowSpan::subordinate(11, 1)));
        assert_eq!(layout.index_of_row_key(&3), None);
        assert_eq!(layout.revision(), 1);

        // Rejected reloads leave the rows (and revision) alone
        assert!(layout.set_rows(vec![1, 1]).is_err());
        assert_eq!(layout.revision(), 1);
    }

    #[test]
    fn test_spec_from_json() {
        let spec = GridSpec::from_json(
            r#"{
                "rows": 4,
                "columns": [{"name": "a"}, {"name": "b", "fixedLeft": true, "width": 30}],
                "merges": [{"column": "a", "startRow": 0, "endRow": 1}],
                "dimensions": {"bodyHeight": 50, "rowHeight": 10}
            }"#,
        )
        .unwrap();
        let layout = spec.build_layout().unwrap();
        assert_eq!(layout.visible_columns(), vec!["b", "a"]);
        assert_eq!(layout.row_span(&1, "a"), Some(RowSpan::subordinate(0, 1)));
        assert_eq!(layout.dimensions().body_height, 50.0);
    }
}
