/// The contiguous slice of rows currently materialized for display.
///
/// Invariant: `start_index <= end_index <= last row index`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedWindow {
    /// Pixel offset of the rendered zone, clamped at 0
    pub top: f32,
    /// Pixel offset marking the end of the rendered zone
    pub bottom: f32,
    /// First materialized row index (inclusive)
    pub start_index: usize,
    /// Last materialized row index (inclusive)
    pub end_index: usize,
}

impl RenderedWindow {
    /// Number of materialized rows.
    pub fn row_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// True if the row index is materialized.
    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }
}
