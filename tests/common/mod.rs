//! Common test utilities: grid builders and event recorders.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use gridcore::{
    ColumnSpec, Dimensions, FocusEvent, Grid, GridConfig, GridLayout, RenderedWindow, RowKey,
    RowMerge,
};

/// Body 100px, rows 10px, no horizontal scrollbar: 10 rows per page, a
/// 3-row buffer and a 10px hit margin with default ratios.
#[must_use]
pub fn small_dims() -> Dimensions {
    Dimensions {
        body_height: 100.0,
        row_height: 10.0,
        lside_width: 0.0,
        rside_width: 200.0,
        scroll_x: false,
        scroll_y: true,
        scrollbar_size: 17.0,
    }
}

/// Columns `id` (fixed, 40px), `a`, `b`, `c` (80px each).
#[must_use]
pub fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::fixed("id").with_width(40.0),
        ColumnSpec::new("a"),
        ColumnSpec::new("b"),
        ColumnSpec::new("c"),
    ]
}

#[must_use]
pub fn layout(rows: usize, merges: &[RowMerge], dims: Dimensions) -> GridLayout {
    GridLayout::with_row_count(rows, columns(), merges, dims).unwrap()
}

/// Grid over a shared, externally mutable layout.
#[must_use]
pub fn shared_grid(
    rows: usize,
    merges: &[RowMerge],
    dims: Dimensions,
) -> (Rc<RefCell<GridLayout>>, Grid<RefCell<GridLayout>>) {
    let source = Rc::new(RefCell::new(layout(rows, merges, dims)));
    let grid = Grid::new(Rc::clone(&source), GridConfig::default()).unwrap();
    (source, grid)
}

#[must_use]
pub fn grid(rows: usize, merges: &[RowMerge], dims: Dimensions) -> Grid<GridLayout> {
    Grid::new(Rc::new(layout(rows, merges, dims)), GridConfig::default()).unwrap()
}

pub type EventLog = Rc<RefCell<Vec<FocusEvent<RowKey>>>>;

/// Subscribe a recorder to the grid's focus events.
pub fn record_focus(grid: &mut Grid<GridLayout>) -> EventLog {
    let events: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    grid.subscribe_focus(move |event, _| sink.borrow_mut().push(event.clone()));
    events
}

/// Subscribe a recorder to the grid's published windows.
pub fn record_windows(grid: &mut Grid<GridLayout>) -> Rc<RefCell<Vec<RenderedWindow>>> {
    let windows = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&windows);
    grid.subscribe_window(move |window, _| sink.borrow_mut().push(*window));
    windows
}

pub fn range(window: Option<RenderedWindow>) -> (usize, usize) {
    let window = window.expect("grid has rows");
    (window.start_index, window.end_index)
}
