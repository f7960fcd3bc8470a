/// Pixel rectangle of a cell, as reported by the coordinate provider.
///
/// `left`/`right` are relative to the origin of the column region (fixed left
/// or scrollable right) the cell belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct CellRect {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

/// Target scroll offsets computed by scroll correction.
///
/// `None` on an axis means that axis needs no change.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollAdjustment {
    pub scroll_top: Option<f32>,
    pub scroll_left: Option<f32>,
}

impl ScrollAdjustment {
    /// True if neither axis has to move.
    pub fn is_empty(&self) -> bool {
        self.scroll_top.is_none() && self.scroll_left.is_none()
    }
}
