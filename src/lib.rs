//! gridcore - cursor and viewport core for tabular grid widgets
//!
//! Two engines over injected row/column registries and pixel geometry:
//! - Buffered row windowing: only the rows near the viewport are materialized,
//!   and the range is recomputed only when scrolling nears a buffer edge
//! - Focus navigation: one active cell, span-aware moves across merged cells,
//!   and scroll correction that keeps the focused cell visible
//!
//! # Usage (Rust)
//!
//! ```
//! use std::rc::Rc;
//! use gridcore::{ColumnSpec, Dimensions, Direction, Grid, GridConfig, GridLayout};
//!
//! let layout = GridLayout::with_row_count(
//!     1000,
//!     vec![ColumnSpec::new("name"), ColumnSpec::new("price")],
//!     &[],
//!     Dimensions::default(),
//! )?;
//! let mut grid = Grid::new(Rc::new(layout), GridConfig::default())?;
//! grid.focus(Some(0), Some("name"), true);
//! grid.move_focus(Direction::PageDown);
//! assert!(grid.window().is_some());
//! # Ok::<(), gridcore::GridError>(())
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridcore';
//! await init();
//! const view = new GridView(JSON.stringify(spec));
//! view.set_scroll_top(400);
//! const { startIndex, endIndex } = view.window();
//! ```

pub mod bindings;
pub mod config;
pub mod error;
pub mod focus;
pub mod grid;
pub mod layout;
pub mod observer;
pub mod provider;
pub mod render;
pub mod types;

use wasm_bindgen::prelude::*;

pub use bindings::GridView;
pub use config::{GridConfig, RenderConfig};
pub use error::{GridError, Result};
pub use focus::FocusModel;
pub use grid::Grid;
pub use layout::{ColumnSpec, Dimensions, GridLayout, GridSpec, RowKey, RowMerge, Viewport};
pub use provider::{ColumnRegistry, CoordinateProvider, RowRegistry};
pub use render::SmartRenderer;

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
