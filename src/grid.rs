//! `Grid` - wires the windowing and focus engines to one set of collaborators.
//!
//! Rendering flows scroll offset -> window; navigation flows move request ->
//! focus -> scroll correction -> (possibly) a new window. The grid owns both
//! engines and the scroll offsets; row data and geometry stay with the
//! injected source.

use std::rc::Rc;

use crate::config::GridConfig;
use crate::error::Result;
use crate::focus::FocusModel;
use crate::layout::Viewport;
use crate::observer::SubscriptionId;
use crate::provider::{ColumnRegistry, CoordinateProvider, RowRegistry};
use crate::render::SmartRenderer;
use crate::types::{Direction, FocusEvent, Focused, RenderedWindow, ScrollAdjustment};

/// Cursor-and-viewport core of one grid instance.
///
/// `S` supplies rows, columns and geometry; the external layer keeps a
/// handle to it and calls [`Grid::sync`] after mutating it.
pub struct Grid<S: RowRegistry> {
    source: Rc<S>,
    config: GridConfig,
    renderer: SmartRenderer<S, S>,
    focus: FocusModel<S, S, S>,
    /// Row count the engines were last synced to
    row_count: usize,
    /// Row registry revision the engines were last synced to
    revision: u64,
}

impl<S> Grid<S>
where
    S: RowRegistry + ColumnRegistry + CoordinateProvider<<S as RowRegistry>::Key>,
{
    /// Build both engines over `source` and compute the initial window.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration or the source's current
    /// dimensions are out of range.
    pub fn new(source: Rc<S>, config: GridConfig) -> Result<Self> {
        config.validate()?;
        source.dimensions().validate()?;

        let renderer = SmartRenderer::new(Rc::clone(&source), Rc::clone(&source), config.render);
        let focus = FocusModel::new(Rc::clone(&source), Rc::clone(&source), Rc::clone(&source));
        let row_count = source.row_count();
        let revision = source.revision();
        Ok(Self {
            source,
            config,
            renderer,
            focus,
            row_count,
            revision,
        })
    }

    pub fn source(&self) -> &Rc<S> {
        &self.source
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn renderer(&self) -> &SmartRenderer<S, S> {
        &self.renderer
    }

    pub fn focus_model(&self) -> &FocusModel<S, S, S> {
        &self.focus
    }

    pub fn focus_model_mut(&mut self) -> &mut FocusModel<S, S, S> {
        &mut self.focus
    }

    pub fn window(&self) -> Option<RenderedWindow> {
        self.renderer.window()
    }

    pub fn viewport(&self) -> Viewport {
        self.renderer.viewport()
    }

    pub fn which(&self) -> Focused<S::Key> {
        self.focus.which()
    }

    /// Returns true if the window was refreshed.
    pub fn set_scroll_top(&mut self, scroll_top: f32) -> bool {
        self.renderer.set_scroll_top(scroll_top)
    }

    pub fn set_scroll_left(&mut self, scroll_left: f32) {
        self.renderer.set_scroll_left(scroll_left);
    }

    /// Returns true if the window was refreshed.
    pub fn scroll_by(&mut self, delta_top: f32, delta_left: f32) -> bool {
        self.renderer.scroll_by(delta_top, delta_left)
    }

    /// Pick up changes the external layer made to the source.
    ///
    /// Replaced rows (a new count or registry revision) clear the focus,
    /// including the previous focus, and republish the window. Changed
    /// metrics re-clamp the scroll offsets and recompute the window. Returns
    /// true if a window was published.
    pub fn sync(&mut self) -> bool {
        self.focus.set_scrollbars(self.source.dimensions().scrollbars());

        let row_count = self.source.row_count();
        let revision = self.source.revision();
        if row_count != self.row_count || revision != self.revision {
            log::debug!(
                "[grid] rows replaced ({} -> {row_count}, revision {revision}), reloading",
                self.row_count
            );
            self.row_count = row_count;
            self.revision = revision;
            self.focus.unselect();
            self.focus.clear_previous();
            return self.renderer.reload();
        }
        self.renderer.sync_dimensions()
    }

    pub fn select(&mut self, row_key: S::Key) {
        self.focus.select(row_key);
    }

    pub fn unselect(&mut self) {
        self.focus.unselect();
    }

    pub fn blur(&mut self) {
        self.focus.blur();
    }

    /// Focus a cell; missing arguments keep the current row/column. With
    /// `scroll_into_view`, the scroll offsets are corrected so the cell is
    /// visible and the window follows. A focus listener that redirects the
    /// focus is processed first, so the correction targets the final cell.
    pub fn focus(
        &mut self,
        row_key: Option<S::Key>,
        column_name: Option<&str>,
        scroll_into_view: bool,
    ) -> ScrollAdjustment {
        let viewport = self.renderer.viewport();
        let adjustment = self
            .focus
            .focus(row_key, column_name, scroll_into_view.then_some(&viewport));
        if !adjustment.is_empty() {
            self.renderer.apply_scroll(&adjustment);
        }
        adjustment
    }

    /// Move focus one step in `direction` and scroll it into view. Returns
    /// false (leaving focus untouched) if there is no focused cell or the
    /// registries cannot resolve the target.
    pub fn move_focus(&mut self, direction: Direction) -> bool {
        let page = self.source.dimensions().rows_per_page().max(1);
        let focus = &self.focus;
        let target = match direction {
            Direction::Up => focus.prev_row_key(1).map(|key| (Some(key), None)),
            Direction::Down => focus.next_row_key(1).map(|key| (Some(key), None)),
            Direction::PageUp => focus.prev_row_key(page).map(|key| (Some(key), None)),
            Direction::PageDown => focus.next_row_key(page).map(|key| (Some(key), None)),
            Direction::Left => focus.prev_column_name().map(|name| (None, Some(name))),
            Direction::Right => focus.next_column_name().map(|name| (None, Some(name))),
            Direction::Home => focus.first_column_name().map(|name| (None, Some(name))),
            Direction::End => focus.last_column_name().map(|name| (None, Some(name))),
            Direction::Top => focus.first_row_key().map(|key| (Some(key), None)),
            Direction::Bottom => focus.last_row_key().map(|key| (Some(key), None)),
        };
        if !focus.has() {
            return false;
        }
        let Some((row_key, column_name)) = target else {
            return false;
        };
        self.focus(row_key, column_name.as_deref(), true);
        true
    }

    /// The listener receives the focus model and may change focus from
    /// inside the notification.
    pub fn subscribe_focus(
        &mut self,
        listener: impl FnMut(&FocusEvent<S::Key>, &mut FocusModel<S, S, S>) + 'static,
    ) -> SubscriptionId {
        self.focus.subscribe(listener)
    }

    pub fn unsubscribe_focus(&mut self, id: SubscriptionId) -> bool {
        self.focus.unsubscribe(id)
    }

    /// The listener receives the renderer and may scroll it from inside the
    /// notification.
    pub fn subscribe_window(
        &mut self,
        listener: impl FnMut(&RenderedWindow, &mut SmartRenderer<S, S>) + 'static,
    ) -> SubscriptionId {
        self.renderer.subscribe(listener)
    }

    pub fn unsubscribe_window(&mut self, id: SubscriptionId) -> bool {
        self.renderer.unsubscribe(id)
    }
}
