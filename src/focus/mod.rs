//! Focus model - the single active cell and the selected row.
//!
//! State machine over `{unfocused}` (no row) and `{focused(row, column)}`:
//! - `select` / `unselect` move the row selection
//! - `focus` / `blur` move the active column within the selected row
//! - every transition emits a [`FocusEvent`] synchronously, in call order;
//!   listeners get the model and may change focus again before the call
//!   returns
//!
//! Navigation queries (`next_row_key`, `prev_column_name`, ...) live in
//! `navigation`, scroll correction in `scroll`.

mod navigation;
mod scroll;

use std::rc::Rc;

use crate::layout::{Scrollbars, Viewport};
use crate::observer::{Observable, Observers, SubscriptionId};
use crate::provider::{ColumnRegistry, CoordinateProvider, RowRegistry};
use crate::types::{FocusEvent, FocusIndex, Focused, ScrollAdjustment};

/// Focus state plus the collaborators it navigates over.
pub struct FocusModel<R: RowRegistry, C, P> {
    rows: Rc<R>,
    columns: Rc<C>,
    coords: Rc<P>,
    row_key: Option<R::Key>,
    /// Empty when no column is focused
    column_name: String,
    /// Last non-null row key, kept across unselect/blur
    prev_row_key: Option<R::Key>,
    /// Last non-empty column name, kept across unselect/blur
    prev_column_name: String,
    scrollbars: Scrollbars,
    observers: Observers<FocusEvent<R::Key>, FocusModel<R, C, P>>,
}

impl<R, C, P> FocusModel<R, C, P>
where
    R: RowRegistry,
    C: ColumnRegistry,
    P: CoordinateProvider<R::Key>,
{
    /// Create an unfocused model. Scrollbar metrics are taken from the
    /// coordinate provider's current dimensions.
    pub fn new(rows: Rc<R>, columns: Rc<C>, coords: Rc<P>) -> Self {
        let scrollbars = coords.dimensions().scrollbars();
        Self {
            rows,
            columns,
            coords,
            row_key: None,
            column_name: String::new(),
            prev_row_key: None,
            prev_column_name: String::new(),
            scrollbars,
            observers: Observers::new(),
        }
    }

    pub fn row_key(&self) -> Option<&R::Key> {
        self.row_key.as_ref()
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn previous_row_key(&self) -> Option<&R::Key> {
        self.prev_row_key.as_ref()
    }

    pub fn previous_column_name(&self) -> &str {
        &self.prev_column_name
    }

    pub fn scrollbars(&self) -> Scrollbars {
        self.scrollbars
    }

    pub fn set_scrollbars(&mut self, scrollbars: Scrollbars) {
        self.scrollbars = scrollbars;
    }

    /// Select a row. Any previously selected row is unselected first; the
    /// focused column is not set.
    pub fn select(&mut self, row_key: R::Key) {
        self.unselect();
        log::debug!("[focus] select {row_key:?}");
        self.row_key = Some(row_key.clone());
        self.notify(&FocusEvent::Select { row_key });
    }

    /// Blur the focused cell and release the selected row.
    pub fn unselect(&mut self) {
        self.blur();
        self.notify(&FocusEvent::Unselect {
            row_key: self.row_key.clone(),
        });
        self.row_key = None;
    }

    /// Focus a cell. Missing arguments default to the current row/column.
    ///
    /// The current focus is saved as "previous" first (only the parts that
    /// are set), then the old cell is blurred. If `scroll_from` is given, the
    /// returned adjustment brings the new cell into view relative to that
    /// viewport; otherwise it is empty.
    pub fn focus(
        &mut self,
        row_key: Option<R::Key>,
        column_name: Option<&str>,
        scroll_from: Option<&Viewport>,
    ) -> ScrollAdjustment {
        let row_key = row_key.or_else(|| self.row_key.clone());
        let column_name = column_name.map_or_else(|| self.column_name.clone(), str::to_owned);

        self.save_previous();
        self.blur();
        if row_key != self.row_key {
            match row_key.clone() {
                Some(key) => self.select(key),
                None => self.unselect(),
            }
        }
        // A column can only be focused inside a selected row
        if self.row_key.is_some() && !column_name.is_empty() && column_name != self.column_name {
            self.column_name.clone_from(&column_name);
        }

        log::debug!("[focus] focus {row_key:?}/{column_name}");
        self.notify(&FocusEvent::Focus {
            row_key,
            column_name,
        });

        match scroll_from {
            Some(viewport) => self.adjust_scroll(viewport),
            None => ScrollAdjustment::default(),
        }
    }

    /// Remove column focus. The selected row stays selected.
    pub fn blur(&mut self) {
        self.notify(&FocusEvent::Blur {
            row_key: self.row_key.clone(),
            column_name: self.column_name.clone(),
        });
        if self.row_key.is_some() {
            self.column_name.clear();
        }
    }

    /// Current focus
    pub fn which(&self) -> Focused<R::Key> {
        Focused {
            row_key: self.row_key.clone(),
            column_name: self.column_name.clone(),
        }
    }

    /// Current (or previous) focus as registry indices.
    pub fn index_of(&self, previous: bool) -> FocusIndex {
        let (row_key, column_name) = if previous {
            (self.prev_row_key.as_ref(), self.prev_column_name.as_str())
        } else {
            (self.row_key.as_ref(), self.column_name.as_str())
        };
        FocusIndex {
            row: row_key.and_then(|key| self.rows.index_of_row_key(key)),
            column: self.columns.index_of_column_name(column_name),
        }
    }

    /// True if a row is selected and a column is focused in it.
    pub fn has(&self) -> bool {
        self.row_key.is_some() && !self.column_name.is_empty()
    }

    /// Forget the previous focus.
    pub fn clear_previous(&mut self) {
        self.prev_row_key = None;
        self.prev_column_name.clear();
    }

    fn save_previous(&mut self) {
        if self.row_key.is_some() {
            self.prev_row_key.clone_from(&self.row_key);
        }
        if !self.column_name.is_empty() {
            self.prev_column_name.clone_from(&self.column_name);
        }
    }

    /// Listen for focus transitions. The listener receives the model and may
    /// issue further focus changes from inside the notification.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&FocusEvent<R::Key>, &mut Self) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

impl<R: RowRegistry, C, P> Observable<FocusEvent<R::Key>> for FocusModel<R, C, P> {
    fn observers_mut(&mut self) -> &mut Observers<FocusEvent<R::Key>, Self> {
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
    use std::cell::RefCell;

    use crate::layout::{ColumnSpec, Dimensions, GridLayout, RowKey};

    type Model = FocusModel<GridLayout, GridLayout, GridLayout>;

    fn model() -> Model {
        let layout = Rc::new(
            GridLayout::with_row_count(
                5,
                vec![ColumnSpec::new("c1"), ColumnSpec::new("c2")],
                &[],
                Dimensions::default(),
            )
            .unwrap(),
        );
        FocusModel::new(Rc::clone(&layout), Rc::clone(&layout), layout)
    }

    fn recorded(model: &mut Model) -> Rc<RefCell<Vec<FocusEvent<RowKey>>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        model.subscribe(move |e, _| sink.borrow_mut().push(e.clone()));
        events
    }

    #[test]
    fn test_focus_then_which() {
        let mut model = model();
        model.focus(Some(2), Some("c2"), None);
        assert_eq!(
            model.which(),
            Focused {
                row_key: Some(2),
                column_name: "c2".to_string()
            }
        );
        assert!(model.has());
        assert_eq!(
            model.index_of(false),
            FocusIndex {
                row: Some(2),
                column: Some(1)
            }
        );
    }

    #[test]
    fn test_unselect_clears_row_and_column() {
        let mut model = model();
        model.focus(Some(1), Some("c1"), None);
        model.unselect();
        assert_eq!(model.row_key(), None);
        assert_eq!(model.column_name(), "");
        assert!(!model.has());

        // Idempotent
        model.unselect();
        assert_eq!(model.row_key(), None);
    }

    #[test]
    fn test_blur_keeps_row() {
        let mut model = model();
        model.focus(Some(3), Some("c1"), None);
        model.blur();
        assert_eq!(model.row_key(), Some(&3));
        assert_eq!(model.column_name(), "");
    }

    #[test]
    fn test_select_does_not_focus_column() {
        let mut model = model();
        model.select(4);
        assert_eq!(model.row_key(), Some(&4));
        assert_eq!(model.column_name(), "");
        assert!(!model.has());
    }

    #[test]
    fn test_focus_defaults_to_current_values() {
        let mut model = model();
        model.focus(Some(1), Some("c2"), None);
        model.focus(Some(3), None, None);
        assert_eq!(model.which().column_name, "c2");
        model.focus(None, Some("c1"), None);
        assert_eq!(model.row_key(), Some(&3));
        assert_eq!(model.column_name(), "c1");
    }

    #[test]
    fn test_column_requires_row() {
        let mut model = model();
        model.focus(None, Some("c1"), None);
        assert_eq!(model.row_key(), None);
        assert_eq!(model.column_name(), "");
    }

    #[test]
    fn test_previous_survives_unselect() {
        let mut model = model();
        model.focus(Some(1), Some("c1"), None);
        model.focus(Some(2), Some("c2"), None);
        assert_eq!(model.previous_row_key(), Some(&1));
        assert_eq!(model.previous_column_name(), "c1");

        model.unselect();
        // Partial focus does not wipe the previous record
        model.focus(None, None, None);
        assert_eq!(model.previous_row_key(), Some(&1));
        assert_eq!(model.previous_column_name(), "c1");
        assert_eq!(
            model.index_of(true),
            FocusIndex {
                row: Some(1),
                column: Some(0)
            }
        );

        model.clear_previous();
        assert_eq!(model.previous_row_key(), None);
        assert_eq!(model.previous_column_name(), "");
    }

    #[test]
    fn test_event_order_on_focus_change() {
        let mut model = model();
        model.focus(Some(1), Some("c1"), None);
        let events = recorded(&mut model);

        model.focus(Some(2), Some("c2"), None);
        assert_eq!(
            *events.borrow(),
            vec![
                FocusEvent::Blur {
                    row_key: Some(1),
                    column_name: "c1".to_string()
                },
                FocusEvent::Blur {
                    row_key: Some(1),
                    column_name: String::new()
                },
                FocusEvent::Unselect { row_key: Some(1) },
                FocusEvent::Select { row_key: 2 },
                FocusEvent::Focus {
                    row_key: Some(2),
                    column_name: "c2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_event_order_same_row() {
        let mut model = model();
        model.focus(Some(1), Some("c1"), None);
        let events = recorded(&mut model);

        model.focus(None, Some("c2"), None);
        assert_eq!(
            *events.borrow(),
            vec![
                FocusEvent::Blur {
                    row_key: Some(1),
                    column_name: "c1".to_string()
                },
                FocusEvent::Focus {
                    row_key: Some(1),
                    column_name: "c2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_listener_redirects_focus_before_return() {
        let mut model = model();
        model.subscribe(|event, model| {
            if let FocusEvent::Focus {
                row_key: Some(4), ..
            } = event
            {
                model.focus(Some(3), None, None);
            }
        });

        model.focus(Some(4), Some("c1"), None);
        assert_eq!(
            model.which(),
            Focused {
                row_key: Some(3),
                column_name: "c1".to_string()
            }
        );
        assert_eq!(model.previous_row_key(), Some(&4));
    }

    #[test]
    fn test_unsubscribe_stops_events() {
        let mut model = model();
        let events = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&events);
        let id = model.subscribe(move |_, _| *sink.borrow_mut() += 1);
        model.select(1);
        let seen = *events.borrow();
        assert!(model.unsubscribe(id));
        model.select(2);
        assert_eq!(*events.borrow(), seen);
    }
}
