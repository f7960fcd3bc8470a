//! Scroll offsets of the grid body and their valid range.

use super::dimensions::floor_to_index;
use super::Dimensions;

/// Scroll state of the body - the part of the content currently in view
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// Vertical scroll offset in content pixels
    pub scroll_top: f32,
    /// Horizontal scroll offset of the scrollable column region
    pub scroll_left: f32,
}

impl Viewport {
    /// Create a viewport scrolled to the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest vertical offset that still shows content. A horizontal
    /// scrollbar overlaps the body bottom, so it extends the range.
    pub fn max_scroll_top(dims: &Dimensions, total_height: f32) -> f32 {
        let visible_height = dims.body_height - dims.scrollbars().horizontal_allowance();
        (total_height - visible_height).max(0.0)
    }

    /// Largest horizontal offset of the scrollable column region.
    pub fn max_scroll_left(dims: &Dimensions, total_width: f32) -> f32 {
        let visible_width = dims.rside_width - dims.scrollbars().vertical_allowance();
        (total_width - visible_width).max(0.0)
    }

    /// Clamp both offsets to their valid range.
    pub fn clamp_scroll(&mut self, dims: &Dimensions, total_height: f32, total_width: f32) {
        self.scroll_top = clamp_offset(self.scroll_top, Self::max_scroll_top(dims, total_height));
        self.scroll_left = clamp_offset(self.scroll_left, Self::max_scroll_left(dims, total_width));
    }

    /// Scroll by delta amounts
    pub fn scroll_by(
        &mut self,
        delta_top: f32,
        delta_left: f32,
        dims: &Dimensions,
        total_height: f32,
        total_width: f32,
    ) {
        self.scroll_top += delta_top;
        self.scroll_left += delta_left;
        self.clamp_scroll(dims, total_height, total_width);
    }

    /// Rows whose pixel extent intersects the body (inclusive), for uniform
    /// row heights. `None` when there are no rows.
    pub fn visible_rows(&self, dims: &Dimensions, row_count: usize) -> Option<(usize, usize)> {
        let last = row_count.checked_sub(1)?;
        let start = floor_to_index(self.scroll_top / dims.row_height).min(last);
        let end_px = self.scroll_top + dims.body_height;
        let end = floor_to_index((end_px / dims.row_height).ceil())
            .saturating_sub(1)
            .clamp(start, last);
        Some((start, end))
    }
}

fn clamp_offset(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max.max(0.0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn dims() -> Dimensions {
        Dimensions {
            body_height: 100.0,
            row_height: 10.0,
            rside_width: 200.0,
            scroll_x: false,
            scroll_y: false,
            ..Dimensions::default()
        }
    }

    #[test]
    fn test_max_scroll_top() {
        assert_eq!(Viewport::max_scroll_top(&dims(), 500.0), 400.0);
        assert_eq!(Viewport::max_scroll_top(&dims(), 50.0), 0.0);

        let with_bar = Dimensions {
            scroll_x: true,
            scrollbar_size: 17.0,
            ..dims()
        };
        assert_eq!(Viewport::max_scroll_top(&with_bar, 500.0), 417.0);
    }

    #[test]
    fn test_clamp_scroll() {
        let mut viewport = Viewport {
            scroll_top: 900.0,
            scroll_left: -20.0,
        };
        viewport.clamp_scroll(&dims(), 500.0, 300.0);
        assert_eq!(viewport.scroll_top, 400.0);
        assert_eq!(viewport.scroll_left, 0.0);
    }

    #[test]
    fn test_scroll_by() {
        let mut viewport = Viewport::new();
        viewport.scroll_by(150.0, 40.0, &dims(), 500.0, 300.0);
        assert_eq!(viewport.scroll_top, 150.0);
        assert_eq!(viewport.scroll_left, 40.0);
        viewport.scroll_by(-500.0, 500.0, &dims(), 500.0, 300.0);
        assert_eq!(viewport.scroll_top, 0.0);
        assert_eq!(viewport.scroll_left, 100.0);
    }

    #[test]
    fn test_visible_rows() {
        let mut viewport = Viewport::new();
        assert_eq!(viewport.visible_rows(&dims(), 50), Some((0, 9)));

        viewport.scroll_top = 105.0;
        assert_eq!(viewport.visible_rows(&dims(), 50), Some((10, 20)));

        viewport.scroll_top = 400.0;
        assert_eq!(viewport.visible_rows(&dims(), 50), Some((40, 49)));

        assert_eq!(viewport.visible_rows(&dims(), 0), None);
    }
}
