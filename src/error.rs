//! Structured error types for gridcore.
//!
//! Engine queries never fail; they report absence with `Option`. Errors only
//! come from building inputs: configuration, axis metrics and merge layouts.

/// All errors that can occur while configuring a grid core.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Configuration or axis metrics out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A merge range that does not fit the row/column registries.
    #[error("Invalid merge: {0}")]
    InvalidMerge(String),

    /// Reference to a column that is not registered.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Two rows registered under the same key.
    #[error("Duplicate row key: {0}")]
    DuplicateRowKey(String),

    /// Grid description could not be read as JSON.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
