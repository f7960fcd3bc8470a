//! Buffered row windowing.
//!
//! The renderer keeps a window of rows wider than the body by a buffer on
//! each side. Scrolling inside the window is free; only when the scroll
//! offset comes within the hit margin of a buffered edge (and the document
//! still extends past that edge) is the window recomputed.

use std::rc::Rc;

use crate::config::RenderConfig;
use crate::layout::{floor_to_index, Dimensions, Viewport};
use crate::observer::{Observable, Observers, SubscriptionId};
use crate::provider::{CoordinateProvider, RowRegistry};
use crate::types::{RenderedWindow, ScrollAdjustment};

/// Pixels pre-rendered beyond each visible edge, truncated to whole pixels.
pub fn buffer_size(dims: &Dimensions, config: &RenderConfig) -> f32 {
    (dims.body_height * config.buffer_ratio).floor()
}

/// Hysteresis margin, truncated to whole pixels.
pub fn buffer_hit_size(dims: &Dimensions, config: &RenderConfig) -> f32 {
    (dims.body_height * config.buffer_hit_ratio).floor()
}

/// Rows to materialize for a scroll offset. `None` when there are no rows.
///
/// The visible span counts `floor(body / row)` rows past the first visible
/// one, which covers a partially visible trailing row. Buffer rows are added
/// on both sides and clamped at the document edges.
pub fn compute_range(
    scroll_top: f32,
    dims: &Dimensions,
    row_count: usize,
    config: &RenderConfig,
) -> Option<RenderedWindow> {
    let last_index = row_count.checked_sub(1)?;
    let row_height = dims.row_height;
    if !row_height.is_finite() || row_height <= 0.0 {
        return None;
    }
    let scroll_top = scroll_top.max(0.0);

    let buffer_size = buffer_size(dims, config);
    let buffer_row_count = floor_to_index(buffer_size / row_height);
    let visible_row_count = floor_to_index(dims.body_height / row_height);

    let start_visible = floor_to_index(scroll_top / row_height);
    let end_visible = start_visible.saturating_add(visible_row_count);

    let end_index = end_visible.saturating_add(buffer_row_count).min(last_index);
    let start_index = start_visible.saturating_sub(buffer_row_count).min(end_index);

    let top = (scroll_top - buffer_size).max(0.0);
    let bottom = top + (end_index - start_index + 1) as f32 * row_height;

    Some(RenderedWindow {
        top,
        bottom,
        start_index,
        end_index,
    })
}

/// True if scrolling to `candidate` brings the body within the hit margin of
/// a buffered edge that can still grow. Never true at a document boundary
/// already reached on that side.
pub fn should_refresh(
    window: &RenderedWindow,
    candidate: f32,
    dims: &Dimensions,
    row_count: usize,
    config: &RenderConfig,
) -> bool {
    let Some(last_index) = row_count.checked_sub(1) else {
        return false;
    };
    let hit_size = buffer_hit_size(dims, config);

    let near_top = candidate < window.top + hit_size && window.start_index > 0;
    let near_bottom = candidate > window.bottom - dims.body_height - hit_size
        && window.end_index < last_index;

    near_top || near_bottom
}

/// Stateful windowing engine over injected row registry and geometry.
pub struct SmartRenderer<R, P> {
    rows: Rc<R>,
    coords: Rc<P>,
    config: RenderConfig,
    viewport: Viewport,
    window: Option<RenderedWindow>,
    /// Metrics the current window was computed for
    dims: Dimensions,
    observers: Observers<RenderedWindow, SmartRenderer<R, P>>,
}

impl<R, P> SmartRenderer<R, P>
where
    R: RowRegistry,
    P: CoordinateProvider<R::Key>,
{
    /// Create a renderer scrolled to the top with its initial window computed.
    pub fn new(rows: Rc<R>, coords: Rc<P>, config: RenderConfig) -> Self {
        let dims = coords.dimensions();
        let mut renderer = Self {
            rows,
            coords,
            config,
            viewport: Viewport::new(),
            window: None,
            dims,
            observers: Observers::new(),
        };
        renderer.refresh();
        renderer
    }

    /// Currently published window
    pub fn window(&self) -> Option<RenderedWindow> {
        self.window
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> RenderConfig {
        self.config
    }

    pub fn max_scroll_top(&self) -> f32 {
        Viewport::max_scroll_top(&self.coords.dimensions(), self.coords.total_content_height())
    }

    pub fn max_scroll_left(&self) -> f32 {
        Viewport::max_scroll_left(&self.coords.dimensions(), self.coords.total_content_width())
    }

    /// Window for a scroll offset under the current metrics, without
    /// publishing it.
    pub fn compute_range(&self, scroll_top: f32) -> Option<RenderedWindow> {
        compute_range(
            scroll_top,
            &self.coords.dimensions(),
            self.rows.row_count(),
            &self.config,
        )
    }

    /// Whether moving to `candidate` requires recomputing the window.
    pub fn should_refresh(&self, candidate: f32) -> bool {
        self.window.is_some_and(|window| {
            should_refresh(
                &window,
                candidate,
                &self.coords.dimensions(),
                self.rows.row_count(),
                &self.config,
            )
        })
    }

    /// Recompute the window for the current scroll offset and publish it if
    /// it changed. Returns true if it changed.
    pub fn refresh(&mut self) -> bool {
        self.dims = self.coords.dimensions();
        let window = self.compute_range(self.viewport.scroll_top);
        if window == self.window {
            return false;
        }
        self.publish(window);
        true
    }

    fn publish(&mut self, window: Option<RenderedWindow>) {
        self.window = window;
        match window {
            Some(w) => {
                log::debug!(
                    "[render] window rows {}..={} ({} rows, top {}, bottom {}) at scroll_top {}",
                    w.start_index,
                    w.end_index,
                    w.row_count(),
                    w.top,
                    w.bottom,
                    self.viewport.scroll_top
                );
                self.notify(&w);
            }
            None => log::debug!("[render] no rows to render"),
        }
    }

    /// Scroll vertically. The offset is clamped to the scrollable range; the
    /// window is recomputed only if the new offset hits a buffer edge.
    /// Returns true if the window was refreshed.
    pub fn set_scroll_top(&mut self, scroll_top: f32) -> bool {
        let max = self.max_scroll_top();
        let scroll_top = if scroll_top.is_nan() {
            0.0
        } else {
            scroll_top.clamp(0.0, max)
        };
        self.viewport.scroll_top = scroll_top;

        let refresh = self.window.is_none() || self.should_refresh(scroll_top);
        log::trace!("[render] scroll_top {scroll_top}: refresh={refresh}");
        refresh && self.refresh()
    }

    pub fn set_scroll_left(&mut self, scroll_left: f32) {
        let max = self.max_scroll_left();
        self.viewport.scroll_left = if scroll_left.is_nan() {
            0.0
        } else {
            scroll_left.clamp(0.0, max)
        };
    }

    /// Scroll by wheel deltas. Returns true if the window was refreshed.
    pub fn scroll_by(&mut self, delta_top: f32, delta_left: f32) -> bool {
        self.viewport.scroll_by(
            delta_top,
            delta_left,
            &self.coords.dimensions(),
            self.coords.total_content_height(),
            self.coords.total_content_width(),
        );
        self.set_scroll_top(self.viewport.scroll_top)
    }

    /// Rows intersecting the body at the current offset.
    pub fn visible_rows(&self) -> Option<(usize, usize)> {
        self.viewport
            .visible_rows(&self.coords.dimensions(), self.rows.row_count())
    }

    /// Apply a scroll correction. Returns true if the window was refreshed.
    pub fn apply_scroll(&mut self, adjustment: &ScrollAdjustment) -> bool {
        if let Some(left) = adjustment.scroll_left {
            self.set_scroll_left(left);
        }
        match adjustment.scroll_top {
            Some(top) => self.set_scroll_top(top),
            None => false,
        }
    }

    /// React to changed metrics (body or row height, scrollbars, region
    /// widths). Returns true if the window was refreshed.
    pub fn sync_dimensions(&mut self) -> bool {
        let dims = self.coords.dimensions();
        if dims == self.dims {
            return false;
        }
        log::debug!("[render] dimensions {:?} -> {dims:?}", self.dims);
        self.reset()
    }

    /// Re-clamp the scroll offsets and recompute the window from scratch,
    /// for when the row registry or metrics changed underneath.
    pub fn reset(&mut self) -> bool {
        let dims = self.coords.dimensions();
        self.viewport.clamp_scroll(
            &dims,
            self.coords.total_content_height(),
            self.coords.total_content_width(),
        );
        self.refresh()
    }

    /// Like [`SmartRenderer::reset`], but republishes the window even when
    /// its range is unchanged, since the rows behind it were replaced.
    /// Returns true if a window was published.
    pub fn reload(&mut self) -> bool {
        let dims = self.coords.dimensions();
        self.viewport.clamp_scroll(
            &dims,
            self.coords.total_content_height(),
            self.coords.total_content_width(),
        );
        self.dims = dims;
        let window = self.compute_range(self.viewport.scroll_top);
        if window.is_none() && self.window.is_none() {
            return false;
        }
        self.publish(window);
        true
    }

    /// Listen for published window changes. The listener receives the
    /// renderer and may scroll it from inside the notification.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&RenderedWindow, &mut Self) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

impl<R, P> Observable<RenderedWindow> for SmartRenderer<R, P> {
    fn observers_mut(&mut self) -> &mut Observers<RenderedWindow, Self> {
        &mut self.observers
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::layout::{ColumnSpec, GridLayout};

    fn dims(body_height: f32, row_height: f32) -> Dimensions {
        Dimensions {
            body_height,
            row_height,
            scroll_x: false,
            ..Dimensions::default()
        }
    }

    #[test]
    fn test_buffer_sizes_truncate() {
        let config = RenderConfig::default();
        assert_eq!(buffer_size(&dims(100.0, 10.0), &config), 30.0);
        assert_eq!(buffer_hit_size(&dims(100.0, 10.0), &config), 10.0);
        assert_eq!(buffer_size(&dims(55.0, 10.0), &config), 16.0);
    }

    #[test]
    fn test_compute_range_empty() {
        let config = RenderConfig::default();
        assert_eq!(compute_range(0.0, &dims(100.0, 10.0), 0, &config), None);
    }

    #[test]
    fn test_compute_range_fewer_rows_than_body() {
        let config = RenderConfig::default();
        let window = compute_range(0.0, &dims(100.0, 10.0), 4, &config).unwrap();
        assert_eq!((window.start_index, window.end_index), (0, 3));
        assert_eq!(window.bottom, 40.0);
    }

    #[test]
    fn test_compute_range_past_end_stays_ordered() {
        let config = RenderConfig::default();
        let window = compute_range(10_000.0, &dims(100.0, 10.0), 50, &config).unwrap();
        assert!(window.start_index <= window.end_index);
        assert_eq!(window.end_index, 49);
    }

    #[test]
    fn test_should_refresh_false_without_rows() {
        let config = RenderConfig::default();
        let window = RenderedWindow {
            top: 0.0,
            bottom: 0.0,
            start_index: 0,
            end_index: 0,
        };
        assert!(!should_refresh(&window, 500.0, &dims(100.0, 10.0), 0, &config));
    }

    fn renderer(rows: usize) -> SmartRenderer<GridLayout, GridLayout> {
        let layout = Rc::new(
            GridLayout::with_row_count(rows, vec![ColumnSpec::new("c")], &[], dims(100.0, 10.0))
                .unwrap(),
        );
        SmartRenderer::new(Rc::clone(&layout), layout, RenderConfig::default())
    }

    #[test]
    fn test_scroll_by_accumulates_and_clamps() {
        let mut renderer = renderer(50);
        assert!(!renderer.scroll_by(20.0, 0.0));
        assert!(renderer.scroll_by(20.0, 0.0));
        assert_eq!(renderer.viewport().scroll_top, 40.0);
        assert_eq!(renderer.visible_rows(), Some((4, 13)));

        renderer.scroll_by(10_000.0, 0.0);
        assert_eq!(renderer.viewport().scroll_top, 400.0);
        assert_eq!(renderer.visible_rows(), Some((40, 49)));
        assert_eq!(renderer.window().unwrap().end_index, 49);
    }

    #[test]
    fn test_reset_publishes_only_on_change() {
        let mut renderer = renderer(50);
        let published = Rc::new(std::cell::RefCell::new(0));
        let sink = Rc::clone(&published);
        renderer.subscribe(move |_, _| *sink.borrow_mut() += 1);

        assert!(!renderer.reset());
        assert!(!renderer.sync_dimensions());
        assert_eq!(*published.borrow(), 0);
    }

    #[test]
    fn test_reload_republishes_same_range() {
        let mut renderer = renderer(50);
        let published = Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = Rc::clone(&published);
        renderer.subscribe(move |window, _| sink.borrow_mut().push(*window));

        assert!(renderer.reload());
        assert_eq!(*published.borrow(), vec![renderer.window().unwrap()]);
    }

    #[test]
    fn test_listener_scrolls_before_return() {
        let mut renderer = renderer(50);
        // Jump to the end as soon as the window leaves the top
        renderer.subscribe(|window, renderer| {
            if window.start_index > 0 && window.end_index < 49 {
                renderer.set_scroll_top(400.0);
            }
        });

        assert!(renderer.set_scroll_top(100.0));
        assert_eq!(renderer.viewport().scroll_top, 400.0);
        assert_eq!(renderer.window().unwrap().end_index, 49);
    }
}
