//! Directional moves from the focused cell.
//!
//! Vertical moves are span-aware: a multi-row merge in the focused column is
//! traversed as one unit, so a move never lands inside a merge except on its
//! anchor row. Horizontal moves step through the visible columns. All moves
//! saturate at the first/last row or column and return `None` when nothing is
//! focused or the registries cannot resolve the focused cell.

use super::FocusModel;
use crate::provider::{ColumnRegistry, CoordinateProvider, RowRegistry};
use crate::types::RowSpan;

impl<R, C, P> FocusModel<R, C, P>
where
    R: RowRegistry,
    C: ColumnRegistry,
    P: CoordinateProvider<R::Key>,
{
    /// Key of the row `offset` positions from the focused row, clamped to the
    /// registry bounds.
    pub fn find_row_key(&self, offset: isize) -> Option<R::Key> {
        let index = self.focused_row_index()?;
        self.row_key_from(index, offset)
    }

    /// Name of the visible column `offset` positions from the focused one,
    /// clamped to the visible columns.
    pub fn find_column_name(&self, offset: isize) -> Option<String> {
        if !self.has() {
            return None;
        }
        let columns = self.columns.visible_columns();
        let last = columns.len().checked_sub(1)?;
        let index = self.columns.index_of_column_name(&self.column_name)?;
        let target = index.saturating_add_signed(offset).min(last);
        columns.into_iter().nth(target)
    }

    /// Row key reached by moving down `offset` rows (a single step when
    /// `offset <= 1`), skipping over merges in the focused column. A longer
    /// jump that ends inside a merge falls back to the merge's anchor.
    pub fn next_row_key(&self, offset: usize) -> Option<R::Key> {
        let index = self.focused_row_index()?;
        if offset > 1 {
            return self.settle(index, isize::try_from(offset).ok()?);
        }

        let row_key = self.row_key.as_ref()?;
        let span = self.span_at(row_key)?;
        let step = if span.is_merge_anchor() {
            span.count + 1
        } else if !span.is_main_row {
            // count is the negated distance to the anchor
            let anchor = self.span_at(&span.main_row_key)?;
            anchor.count + span.count + 1
        } else {
            1
        };
        self.settle(index, step)
    }

    /// Row key reached by moving up `offset` rows (a single step when
    /// `offset <= 1`), skipping over merges in the focused column.
    pub fn prev_row_key(&self, offset: usize) -> Option<R::Key> {
        let index = self.focused_row_index()?;
        if offset > 1 {
            return self.settle(index, -isize::try_from(offset).ok()?);
        }

        let row_key = self.row_key.as_ref()?;
        let span = self.span_at(row_key)?;
        let step = if span.is_main_row { -1 } else { span.count - 1 };
        self.settle(index, step)
    }

    pub fn next_column_name(&self) -> Option<String> {
        self.find_column_name(1)
    }

    pub fn prev_column_name(&self) -> Option<String> {
        self.find_column_name(-1)
    }

    pub fn next_row_index(&self, offset: usize) -> Option<usize> {
        let key = self.next_row_key(offset)?;
        self.rows.index_of_row_key(&key)
    }

    pub fn prev_row_index(&self, offset: usize) -> Option<usize> {
        let key = self.prev_row_key(offset)?;
        self.rows.index_of_row_key(&key)
    }

    pub fn next_column_index(&self) -> Option<usize> {
        let name = self.next_column_name()?;
        self.columns.index_of_column_name(&name)
    }

    pub fn prev_column_index(&self) -> Option<usize> {
        let name = self.prev_column_name()?;
        self.columns.index_of_column_name(&name)
    }

    pub fn first_row_key(&self) -> Option<R::Key> {
        self.rows.row_at(0)
    }

    pub fn last_row_key(&self) -> Option<R::Key> {
        let last = self.rows.row_count().checked_sub(1)?;
        self.rows.row_at(last)
    }

    pub fn first_column_name(&self) -> Option<String> {
        self.columns.visible_columns().into_iter().next()
    }

    pub fn last_column_name(&self) -> Option<String> {
        self.columns.visible_columns().into_iter().last()
    }

    /// Row `offset` positions from `index` (clamped), or the anchor of the
    /// merge that row is a subordinate part of.
    fn settle(&self, index: usize, offset: isize) -> Option<R::Key> {
        let last = self.rows.row_count().checked_sub(1)?;
        let target_index = index.saturating_add_signed(offset).min(last);
        let target = self.rows.row_at(target_index)?;
        let span = self.span_at(&target)?;
        if span.is_main_row {
            Some(target)
        } else {
            self.row_key_from(target_index, span.count)
        }
    }

    fn focused_row_index(&self) -> Option<usize> {
        if !self.has() {
            return None;
        }
        let row_key = self.row_key.as_ref()?;
        self.rows.index_of_row_key(row_key)
    }

    fn row_key_from(&self, index: usize, offset: isize) -> Option<R::Key> {
        let last = self.rows.row_count().checked_sub(1)?;
        self.rows.row_at(index.saturating_add_signed(offset).min(last))
    }

    fn span_at(&self, row_key: &R::Key) -> Option<RowSpan<R::Key>> {
        self.rows.row_span(row_key, &self.column_name)
    }
}
