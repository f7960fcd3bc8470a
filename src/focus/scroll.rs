//! Scroll correction that keeps the focused cell visible.
//!
//! Pure computation: the caller owns the scroll container and applies the
//! returned offsets.

use super::FocusModel;
use crate::layout::Viewport;
use crate::provider::{ColumnRegistry, CoordinateProvider, RowRegistry};
use crate::types::ScrollAdjustment;

impl<R, C, P> FocusModel<R, C, P>
where
    R: RowRegistry,
    C: ColumnRegistry,
    P: CoordinateProvider<R::Key>,
{
    /// Offsets that bring the focused cell into view from `viewport`.
    ///
    /// Vertically the cell is aligned to the top edge when above the body and
    /// to the bottom edge (above a horizontal scrollbar) when below it.
    /// Horizontal correction only applies to the scrollable column region;
    /// revealing a cell past the right edge leaves one extra pixel of margin.
    pub fn adjust_scroll(&self, viewport: &Viewport) -> ScrollAdjustment {
        let mut adjustment = ScrollAdjustment::default();
        let Some(row_key) = self.row_key.as_ref() else {
            return adjustment;
        };
        if self.column_name.is_empty() {
            return adjustment;
        }
        let Some(rect) = self.coords.cell_rect(row_key, &self.column_name) else {
            log::debug!(
                "[focus] no geometry for {row_key:?}/{}, scroll unchanged",
                self.column_name
            );
            return adjustment;
        };
        let dims = self.coords.dimensions();

        let bottom_allowance = self.scrollbars.horizontal_allowance();
        if rect.top < viewport.scroll_top {
            adjustment.scroll_top = Some(rect.top);
        } else if rect.bottom > dims.body_height + viewport.scroll_top - bottom_allowance {
            adjustment.scroll_top = Some(rect.bottom - dims.body_height + bottom_allowance);
        }

        if !self.columns.is_in_fixed_left_region(&self.column_name) {
            let right_allowance = self.scrollbars.vertical_allowance();
            let visible_left = viewport.scroll_left;
            let visible_right = viewport.scroll_left + dims.rside_width - right_allowance;
            if rect.left < visible_left {
                adjustment.scroll_left = Some(rect.left);
            } else if rect.right > visible_right {
                adjustment.scroll_left = Some(rect.right - dims.rside_width + right_allowance + 1.0);
            }
        }

        adjustment
    }
}
