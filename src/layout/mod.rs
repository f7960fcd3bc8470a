//! Geometry of the grid body: axis metrics, scroll offsets and the in-memory
//! registries.
//!
//! This module handles:
//! - Axis metrics (body size, row height, scrollbars)
//! - Scroll offsets and their valid range
//! - Row/column registries with merge-aware cell positions

mod dimensions;
mod grid_layout;
mod viewport;

pub(crate) use dimensions::floor_to_index;
pub use dimensions::{Dimensions, Scrollbars, DEFAULT_ROW_HEIGHT, DEFAULT_SCROLLBAR_SIZE};
pub use grid_layout::{
    sequential_keys, ColumnSpec, GridLayout, GridSpec, RowKey, RowMerge, DEFAULT_COL_WIDTH,
};
pub use viewport::Viewport;
