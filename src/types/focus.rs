use serde::Serialize;

/// Snapshot of the focused cell.
///
/// `column_name` is empty when no column is focused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Focused<K> {
    pub row_key: Option<K>,
    pub column_name: String,
}

/// Focus resolved to registry positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FocusIndex {
    pub row: Option<usize>,
    pub column: Option<usize>,
}

/// Notification emitted by the focus model, in call order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FocusEvent<K> {
    /// A row became selected
    #[serde(rename_all = "camelCase")]
    Select { row_key: K },
    /// The selected row (if any) was released
    #[serde(rename_all = "camelCase")]
    Unselect { row_key: Option<K> },
    /// A cell gained focus
    #[serde(rename_all = "camelCase")]
    Focus {
        row_key: Option<K>,
        column_name: String,
    },
    /// The focused cell (if any) lost focus
    #[serde(rename_all = "camelCase")]
    Blur {
        row_key: Option<K>,
        column_name: String,
    },
}

/// Direction of a keyboard-style focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// One body height up
    PageUp,
    /// One body height down
    PageDown,
    /// First visible column, same row
    Home,
    /// Last visible column, same row
    End,
    /// First row, same column
    Top,
    /// Last row, same column
    Bottom,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value to a move. With `ctrl`, Home/End
    /// jump to the first/last row instead of the first/last column.
    pub fn from_key(key: &str, ctrl: bool) -> Option<Self> {
        let direction = match key {
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Home" if ctrl => Self::Top,
            "End" if ctrl => Self::Bottom,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => return None,
        };
        Some(direction)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_key() {
        assert_eq!(Direction::from_key("ArrowDown", false), Some(Direction::Down));
        assert_eq!(Direction::from_key("Home", false), Some(Direction::Home));
        assert_eq!(Direction::from_key("Home", true), Some(Direction::Top));
        assert_eq!(Direction::from_key("End", true), Some(Direction::Bottom));
        assert_eq!(Direction::from_key("Enter", false), None);
    }

    #[test]
    fn test_focus_event_serializes_tagged() {
        let event: FocusEvent<u32> = FocusEvent::Focus {
            row_key: Some(3),
            column_name: "price".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"focus","rowKey":3,"columnName":"price"}"#);
    }
}
