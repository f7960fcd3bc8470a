//! JavaScript surface over an in-memory grid.
//!
//! `GridView` owns both the registries (`GridLayout`) and the engines. The
//! host page forwards scroll, resize and key events and reads back the row
//! window to render and the focused cell.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::error::GridError;
use crate::grid::Grid;
use crate::layout::{sequential_keys, GridLayout, GridSpec, RowKey};
use crate::types::Direction;

fn to_js(e: &GridError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn serialize<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

#[wasm_bindgen]
pub struct GridView {
    layout: Rc<RefCell<GridLayout>>,
    grid: Grid<RefCell<GridLayout>>,
}

#[wasm_bindgen]
impl GridView {
    /// Build a view from a JSON grid description (rows, columns, merges,
    /// dimensions, config).
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or describes an invalid grid.
    #[wasm_bindgen(constructor)]
    pub fn new(spec_json: &str) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let spec = GridSpec::from_json(spec_json).map_err(|e| to_js(&e))?;
        let layout = Rc::new(RefCell::new(spec.build_layout().map_err(|e| to_js(&e))?));
        let grid = Grid::new(Rc::clone(&layout), spec.config).map_err(|e| to_js(&e))?;
        Ok(GridView { layout, grid })
    }

    /// Returns true if the row window changed.
    #[wasm_bindgen]
    pub fn set_scroll_top(&mut self, scroll_top: f32) -> bool {
        self.grid.set_scroll_top(scroll_top)
    }

    #[wasm_bindgen]
    pub fn set_scroll_left(&mut self, scroll_left: f32) {
        self.grid.set_scroll_left(scroll_left);
    }

    /// Scroll by wheel deltas. Returns true if the row window changed.
    #[wasm_bindgen]
    pub fn scroll(&mut self, delta_x: f32, delta_y: f32) -> bool {
        self.grid.scroll_by(delta_y, delta_x)
    }

    #[wasm_bindgen]
    pub fn scroll_top(&self) -> f32 {
        self.grid.viewport().scroll_top
    }

    #[wasm_bindgen]
    pub fn scroll_left(&self) -> f32 {
        self.grid.viewport().scroll_left
    }

    /// Resize the body. Returns true if the row window changed.
    #[wasm_bindgen]
    pub fn set_body_height(&mut self, body_height: f32) -> bool {
        self.layout.borrow_mut().set_body_height(body_height);
        self.grid.sync()
    }

    /// Reload with `count` rows keyed `0..count`. Clears the focus.
    ///
    /// # Errors
    /// Returns an error if `count` does not fit the row key type.
    #[wasm_bindgen]
    pub fn set_row_count(&mut self, count: usize) -> Result<bool, JsValue> {
        let keys = sequential_keys(count).map_err(|e| to_js(&e))?;
        self.layout
            .borrow_mut()
            .set_rows(keys)
            .map_err(|e| to_js(&e))?;
        Ok(self.grid.sync())
    }

    /// Current row window as `{top, bottom, startIndex, endIndex}`, or
    /// `undefined` when there are no rows.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    #[wasm_bindgen]
    pub fn window(&self) -> Result<JsValue, JsValue> {
        serialize(&self.grid.window())
    }

    /// Focused cell as `{rowKey, columnName}`.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    #[wasm_bindgen]
    pub fn which(&self) -> Result<JsValue, JsValue> {
        serialize(&self.grid.which())
    }

    /// Focus a cell and scroll it into view. Returns the applied scroll
    /// correction as `{scrollTop, scrollLeft}`.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    #[wasm_bindgen]
    pub fn focus(
        &mut self,
        row_key: Option<RowKey>,
        column_name: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let adjustment = self.grid.focus(row_key, column_name.as_deref(), true);
        serialize(&adjustment)
    }

    #[wasm_bindgen]
    pub fn select(&mut self, row_key: RowKey) {
        self.grid.select(row_key);
    }

    #[wasm_bindgen]
    pub fn unselect(&mut self) {
        self.grid.unselect();
    }

    #[wasm_bindgen]
    pub fn blur(&mut self) {
        self.grid.blur();
    }

    /// Handle a navigation key (`KeyboardEvent.key`). Returns true if focus
    /// moved, so the caller can prevent the default scroll.
    #[wasm_bindgen]
    pub fn on_key_down(&mut self, key: &str, ctrl: bool) -> bool {
        Direction::from_key(key, ctrl).is_some_and(|direction| self.grid.move_focus(direction))
    }

    #[wasm_bindgen]
    pub fn next_row_key(&self, offset: usize) -> Option<RowKey> {
        self.grid.focus_model().next_row_key(offset)
    }

    #[wasm_bindgen]
    pub fn prev_row_key(&self, offset: usize) -> Option<RowKey> {
        self.grid.focus_model().prev_row_key(offset)
    }

    #[wasm_bindgen]
    pub fn next_column_name(&self) -> Option<String> {
        self.grid.focus_model().next_column_name()
    }

    #[wasm_bindgen]
    pub fn prev_column_name(&self) -> Option<String> {
        self.grid.focus_model().prev_column_name()
    }

    /// Register a callback for focus events (`{type, rowKey, columnName}`).
    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen]
    pub fn on_focus_event(&mut self, callback: js_sys::Function) {
        self.grid.subscribe_focus(move |event, _| {
            if let Ok(value) = serde_wasm_bindgen::to_value(event) {
                let _ = callback.call1(&JsValue::NULL, &value);
            }
        });
    }

    /// Register a callback for row window changes.
    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen]
    pub fn on_window_change(&mut self, callback: js_sys::Function) {
        self.grid.subscribe_window(move |window, _| {
            if let Ok(value) = serde_wasm_bindgen::to_value(window) {
                let _ = callback.call1(&JsValue::NULL, &value);
            }
        });
    }
}
