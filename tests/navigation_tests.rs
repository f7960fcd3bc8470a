//! Focus navigation tests
//!
//! Keyboard-style moves through a 50-row grid where column `a` merges rows
//! 10..=14, plus a hand-written registry with string keys.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::rc::Rc;

use common::*;
use gridcore::{
    CellRect, ColumnRegistry, CoordinateProvider, Dimensions, Direction, FocusEvent, FocusModel,
    Grid, GridConfig, RowMerge, RowRegistry, RowSpan,
};
use test_case::test_case;

fn merged_grid() -> Grid<gridcore::GridLayout> {
    grid(50, &[RowMerge::new("a", 10, 14)], small_dims())
}

// ============================================================================
// Vertical moves
// ============================================================================

#[test]
fn test_down_through_merge() {
    let mut grid = merged_grid();
    grid.focus(Some(9), Some("a"), true);

    assert!(grid.move_focus(Direction::Down));
    assert_eq!(grid.which().row_key, Some(10));
    assert!(grid.move_focus(Direction::Down));
    assert_eq!(grid.which().row_key, Some(15));
}

#[test]
fn test_up_into_merge_lands_on_anchor() {
    let mut grid = merged_grid();
    grid.focus(Some(15), Some("a"), true);

    assert!(grid.move_focus(Direction::Up));
    assert_eq!(grid.which().row_key, Some(10));
    assert!(grid.move_focus(Direction::Up));
    assert_eq!(grid.which().row_key, Some(9));
}

#[test]
fn test_merge_ignored_in_other_columns() {
    let mut grid = merged_grid();
    grid.focus(Some(9), Some("b"), true);
    for expected in 10..=15 {
        assert!(grid.move_focus(Direction::Down));
        assert_eq!(grid.which().row_key, Some(expected));
    }
}

#[test_case(12 ; "from subordinate")]
#[test_case(14 ; "from last subordinate")]
#[test_case(10 ; "from anchor")]
fn test_column_move_into_merge_keeps_row(row: u32) {
    // Row keys stay put on horizontal moves, even inside a merge
    let mut grid = merged_grid();
    grid.focus(Some(row), Some("b"), true);
    assert!(grid.move_focus(Direction::Left));
    assert_eq!(grid.which().row_key, Some(row));
    assert_eq!(grid.which().column_name, "a");
    // Any vertical move from inside resolves around the merge
    assert_eq!(grid.focus_model().prev_row_key(1), Some(9));
    assert_eq!(grid.focus_model().next_row_key(1), Some(15));
    assert_eq!(
        grid.focus_model().row_key().copied(),
        Some(row),
        "queries do not move focus"
    );
}

#[test_case(0, "a", 10 ; "page lands on anchor")]
#[test_case(2, "a", 10 ; "page lands inside merge")]
#[test_case(5, "a", 15 ; "page lands past merge")]
#[test_case(2, "b", 12 ; "plain column")]
#[test_case(45, "b", 49 ; "saturates at last row")]
fn test_page_down(from: u32, column: &str, expected: u32) {
    let mut grid = merged_grid();
    grid.focus(Some(from), Some(column), true);
    assert!(grid.move_focus(Direction::PageDown));
    assert_eq!(grid.which().row_key, Some(expected));
}

#[test]
fn test_page_up_saturates() {
    let mut grid = merged_grid();
    grid.focus(Some(4), Some("b"), true);
    assert!(grid.move_focus(Direction::PageUp));
    assert_eq!(grid.which().row_key, Some(0));
}

#[test]
fn test_top_and_bottom() {
    let mut grid = merged_grid();
    grid.focus(Some(20), Some("b"), true);

    assert!(grid.move_focus(Direction::Bottom));
    assert_eq!(grid.which().row_key, Some(49));
    assert_eq!(grid.which().column_name, "b");
    assert_eq!(grid.viewport().scroll_top, 400.0);

    assert!(grid.move_focus(Direction::Top));
    assert_eq!(grid.which().row_key, Some(0));
    assert_eq!(grid.viewport().scroll_top, 0.0);
}

// ============================================================================
// Horizontal moves
// ============================================================================

#[test]
fn test_left_right_saturate() {
    let mut grid = merged_grid();
    grid.focus(Some(0), Some("id"), true);

    assert!(grid.move_focus(Direction::Left));
    assert_eq!(grid.which().column_name, "id");

    for expected in ["a", "b", "c", "c"] {
        assert!(grid.move_focus(Direction::Right));
        assert_eq!(grid.which().column_name, expected);
    }
}

#[test]
fn test_home_end() {
    let mut grid = merged_grid();
    grid.focus(Some(3), Some("b"), true);

    assert!(grid.move_focus(Direction::End));
    assert_eq!(grid.which().column_name, "c");
    assert!(grid.move_focus(Direction::Home));
    assert_eq!(grid.which().column_name, "id");
    assert_eq!(grid.which().row_key, Some(3));
}

#[test]
fn test_index_queries() {
    let mut grid = merged_grid();
    grid.focus(Some(9), Some("a"), false);
    let model = grid.focus_model();
    assert_eq!(model.next_row_index(1), Some(10));
    assert_eq!(model.prev_row_index(1), Some(8));
    assert_eq!(model.next_column_index(), Some(2));
    assert_eq!(model.prev_column_index(), Some(0));
}

// ============================================================================
// Focus state and events
// ============================================================================

#[test]
fn test_move_without_column_is_ignored() {
    let mut grid = merged_grid();
    grid.select(5);
    let events = record_focus(&mut grid);
    assert!(!grid.move_focus(Direction::Down));
    assert!(events.borrow().is_empty());
    assert_eq!(grid.which().row_key, Some(5));
}

#[test]
fn test_move_emits_transition_events() {
    let mut grid = merged_grid();
    grid.focus(Some(9), Some("a"), true);
    let events = record_focus(&mut grid);

    grid.move_focus(Direction::Down);
    assert_eq!(
        *events.borrow(),
        vec![
            FocusEvent::Blur {
                row_key: Some(9),
                column_name: "a".to_string()
            },
            FocusEvent::Blur {
                row_key: Some(9),
                column_name: String::new()
            },
            FocusEvent::Unselect { row_key: Some(9) },
            FocusEvent::Select { row_key: 10 },
            FocusEvent::Focus {
                row_key: Some(10),
                column_name: "a".to_string()
            },
        ]
    );
}

#[test]
fn test_previous_focus_tracks_moves() {
    let mut grid = merged_grid();
    grid.focus(Some(3), Some("b"), true);
    grid.move_focus(Direction::Right);
    grid.move_focus(Direction::Down);

    let model = grid.focus_model();
    assert_eq!(model.previous_row_key(), Some(&3));
    assert_eq!(model.previous_column_name(), "c");
    assert_eq!(model.index_of(true).row, Some(3));
    assert_eq!(model.index_of(false).row, Some(4));
}

#[test]
fn test_unselect_and_blur_events_when_unfocused() {
    let mut grid = merged_grid();
    let events = record_focus(&mut grid);
    grid.unselect();
    assert_eq!(
        *events.borrow(),
        vec![
            FocusEvent::Blur {
                row_key: None,
                column_name: String::new()
            },
            FocusEvent::Unselect { row_key: None },
        ]
    );
}

// ============================================================================
// Custom registries
// ============================================================================

/// Rows keyed by name, with a single two-row merge in "note" over rows 1..=2.
struct NamedRows {
    keys: Vec<String>,
}

impl NamedRows {
    fn new() -> Self {
        Self {
            keys: ["alpha", "beta", "gamma", "delta"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl RowRegistry for NamedRows {
    type Key = String;

    fn row_count(&self) -> usize {
        self.keys.len()
    }

    fn row_at(&self, index: usize) -> Option<String> {
        self.keys.get(index).cloned()
    }

    fn index_of_row_key(&self, key: &String) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    fn row_span(&self, key: &String, column_name: &str) -> Option<RowSpan<String>> {
        let index = self.index_of_row_key(key)?;
        Some(match (column_name, index) {
            ("note", 1) => RowSpan::anchor(key.clone(), 1),
            ("note", 2) => RowSpan::subordinate("beta".to_string(), 1),
            _ => RowSpan::single(key.clone()),
        })
    }
}

impl ColumnRegistry for NamedRows {
    fn visible_columns(&self) -> Vec<String> {
        vec!["name".to_string(), "note".to_string()]
    }

    fn index_of_column_name(&self, name: &str) -> Option<usize> {
        self.visible_columns().iter().position(|c| c == name)
    }

    fn is_in_fixed_left_region(&self, name: &str) -> bool {
        name == "name"
    }
}

impl CoordinateProvider<String> for NamedRows {
    fn cell_rect(&self, row_key: &String, _column_name: &str) -> Option<CellRect> {
        let index = self.index_of_row_key(row_key)?;
        let top = index as f32 * 20.0;
        Some(CellRect {
            top,
            bottom: top + 20.0,
            left: 0.0,
            right: 100.0,
        })
    }

    fn total_content_height(&self) -> f32 {
        self.keys.len() as f32 * 20.0
    }

    fn total_content_width(&self) -> f32 {
        100.0
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions::default()
    }
}

#[test]
fn test_custom_registry_with_string_keys() {
    let rows = Rc::new(NamedRows::new());
    let mut model = FocusModel::new(Rc::clone(&rows), Rc::clone(&rows), rows);

    model.focus(Some("alpha".to_string()), Some("note"), None);
    assert_eq!(model.next_row_key(1).as_deref(), Some("beta"));

    model.focus(Some("gamma".to_string()), None, None);
    assert_eq!(model.next_row_key(1).as_deref(), Some("delta"));
    assert_eq!(model.prev_row_key(1).as_deref(), Some("alpha"));

    model.focus(Some("delta".to_string()), None, None);
    assert_eq!(model.prev_row_key(1).as_deref(), Some("beta"));
}

#[test]
fn test_grid_over_custom_registry() {
    let mut grid = Grid::new(Rc::new(NamedRows::new()), GridConfig::default()).unwrap();
    assert_eq!(range(grid.window()), (0, 3));

    grid.focus(Some("beta".to_string()), Some("name"), true);
    assert!(grid.move_focus(Direction::Bottom));
    assert_eq!(grid.which().row_key.as_deref(), Some("delta"));
}
