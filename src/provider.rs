//! Interfaces the engines consume from the surrounding grid.
//!
//! The engines only ever read through these traits; row data, column models
//! and pixel geometry stay owned by the layers that implement them. Wrapping
//! an implementation in `RefCell` keeps it mutable by its owner while shared
//! with the engines through `Rc`.

use std::cell::RefCell;
use std::fmt::Debug;

use crate::layout::Dimensions;
use crate::types::{CellRect, RowSpan};

/// Ordered row sequence with per-cell span metadata.
pub trait RowRegistry {
    type Key: Clone + PartialEq + Debug;

    fn row_count(&self) -> usize;

    fn row_at(&self, index: usize) -> Option<Self::Key>;

    fn index_of_row_key(&self, key: &Self::Key) -> Option<usize>;

    /// Span descriptor of a cell. `None` only when the row key is unknown;
    /// cells outside any merge report [`RowSpan::single`].
    fn row_span(&self, key: &Self::Key, column_name: &str) -> Option<RowSpan<Self::Key>>;

    /// Changes whenever the row sequence is replaced, even at the same
    /// length. Registries that never replace their rows can keep the default.
    fn revision(&self) -> u64 {
        0
    }
}

/// Ordered visible columns, partitioned into a fixed left region followed by
/// the independently scrollable right region.
pub trait ColumnRegistry {
    fn visible_columns(&self) -> Vec<String>;

    /// Position of a column within [`ColumnRegistry::visible_columns`].
    fn index_of_column_name(&self, name: &str) -> Option<usize>;

    fn is_in_fixed_left_region(&self, name: &str) -> bool;
}

/// Pixel geometry of the grid body.
pub trait CoordinateProvider<K> {
    fn cell_rect(&self, row_key: &K, column_name: &str) -> Option<CellRect>;

    fn total_content_height(&self) -> f32;

    /// Width of the scrollable (right) column region's content.
    fn total_content_width(&self) -> f32;

    fn dimensions(&self) -> Dimensions;
}

impl<T: RowRegistry> RowRegistry for RefCell<T> {
    type Key = T::Key;

    fn row_count(&self) -> usize {
        self.borrow().row_count()
    }

    fn row_at(&self, index: usize) -> Option<Self::Key> {
        self.borrow().row_at(index)
    }

    fn index_of_row_key(&self, key: &Self::Key) -> Option<usize> {
        self.borrow().index_of_row_key(key)
    }

    fn row_span(&self, key: &Self::Key, column_name: &str) -> Option<RowSpan<Self::Key>> {
        self.borrow().row_span(key, column_name)
    }

    fn revision(&self) -> u64 {
        self.borrow().revision()
    }
}

impl<T: ColumnRegistry> ColumnRegistry for RefCell<T> {
    fn visible_columns(&self) -> Vec<String> {
        self.borrow().visible_columns()
    }

    fn index_of_column_name(&self, name: &str) -> Option<usize> {
        self.borrow().index_of_column_name(name)
    }

    fn is_in_fixed_left_region(&self, name: &str) -> bool {
        self.borrow().is_in_fixed_left_region(name)
    }
}

impl<K, T: CoordinateProvider<K>> CoordinateProvider<K> for RefCell<T> {
    fn cell_rect(&self, row_key: &K, column_name: &str) -> Option<CellRect> {
        self.borrow().cell_rect(row_key, column_name)
    }

    fn total_content_height(&self) -> f32 {
        self.borrow().total_content_height()
    }

    fn total_content_width(&self) -> f32 {
        self.borrow().total_content_width()
    }

    fn dimensions(&self) -> Dimensions {
        self.borrow().dimensions()
    }
}
