//! JavaScript binding tests, run with `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridcore::GridView;
use serde_json::Value;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

const SPEC: &str = r#"{
    "rows": 50,
    "columns": [{"name": "id", "fixedLeft": true}, {"name": "a"}, {"name": "b"}],
    "merges": [{"column": "a", "startRow": 10, "endRow": 14}],
    "dimensions": {"bodyHeight": 100, "rowHeight": 10, "scrollX": false}
}"#;

fn to_json(value: JsValue) -> Value {
    serde_wasm_bindgen::from_value(value).unwrap()
}

#[wasm_bindgen_test]
fn test_window_round_trip() {
    let mut view = GridView::new(SPEC).unwrap();
    let window = to_json(view.window().unwrap());
    assert_eq!(window["startIndex"].as_f64(), Some(0.0));
    assert_eq!(window["endIndex"].as_f64(), Some(13.0));

    assert!(view.set_scroll_top(100.0));
    let window = to_json(view.window().unwrap());
    assert_eq!(window["startIndex"].as_f64(), Some(7.0));
    assert_eq!(window["endIndex"].as_f64(), Some(23.0));
}

#[wasm_bindgen_test]
fn test_keyboard_navigation() {
    let mut view = GridView::new(SPEC).unwrap();
    view.focus(Some(9), Some("a".to_string())).unwrap();
    assert!(view.on_key_down("ArrowDown", false));
    assert_eq!(to_json(view.which().unwrap())["rowKey"].as_f64(), Some(10.0));
    assert_eq!(view.next_row_key(1), Some(15));
    assert!(view.on_key_down("End", true));
    assert_eq!(to_json(view.which().unwrap())["rowKey"].as_f64(), Some(49.0));
    assert!(!view.on_key_down("Enter", false));
}

#[wasm_bindgen_test]
fn test_invalid_spec_rejected() {
    assert!(GridView::new("{").is_err());
    assert!(GridView::new(r#"{"rows": 3, "merges": [{"column": "x", "startRow": 0, "endRow": 1}]}"#).is_err());
}

#[wasm_bindgen_test]
fn test_row_count_reload() {
    let mut view = GridView::new(SPEC).unwrap();
    view.focus(Some(3), Some("b".to_string())).unwrap();
    assert!(view.set_row_count(5).unwrap());
    assert_eq!(to_json(view.which().unwrap())["rowKey"], Value::Null);
    assert_eq!(view.scroll_top(), 0.0);
}
