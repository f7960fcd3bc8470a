//! Axis metrics published by the external layout layer.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f32 = 20.0;

/// Default body (viewport) height in pixels
pub const DEFAULT_BODY_HEIGHT: f32 = 600.0;

/// Default width of the scrollable column region in pixels
pub const DEFAULT_RSIDE_WIDTH: f32 = 800.0;

/// Default scrollbar thickness in pixels
pub const DEFAULT_SCROLLBAR_SIZE: f32 = 17.0;

/// Read-only sizing of the grid body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dimensions {
    /// Height of the scrollable body in pixels
    pub body_height: f32,
    /// Uniform row height in pixels
    pub row_height: f32,
    /// Width of the fixed left column region
    pub lside_width: f32,
    /// Width of the scrollable right column region
    pub rside_width: f32,
    /// Horizontal scrollbar present
    pub scroll_x: bool,
    /// Vertical scrollbar present
    pub scroll_y: bool,
    /// Scrollbar thickness
    pub scrollbar_size: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            body_height: DEFAULT_BODY_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
            lside_width: 0.0,
            rside_width: DEFAULT_RSIDE_WIDTH,
            scroll_x: true,
            scroll_y: true,
            scrollbar_size: DEFAULT_SCROLLBAR_SIZE,
        }
    }
}

impl Dimensions {
    /// # Errors
    /// Returns `InvalidConfig` if the row height is not a positive number or
    /// any size is negative.
    pub fn validate(&self) -> Result<()> {
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "rowHeight must be positive, got {}",
                self.row_height
            )));
        }
        let sizes = [
            ("bodyHeight", self.body_height),
            ("lsideWidth", self.lside_width),
            ("rsideWidth", self.rside_width),
            ("scrollbarSize", self.scrollbar_size),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(GridError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn scrollbars(&self) -> Scrollbars {
        Scrollbars {
            horizontal: self.scroll_x,
            vertical: self.scroll_y,
            size: self.scrollbar_size,
        }
    }

    /// Number of whole rows that fit in the body.
    pub fn rows_per_page(&self) -> usize {
        floor_to_index(self.body_height / self.row_height)
    }
}

/// Scrollbar presence and thickness, used to shrink the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scrollbars {
    pub horizontal: bool,
    pub vertical: bool,
    pub size: f32,
}

impl Default for Scrollbars {
    fn default() -> Self {
        Dimensions::default().scrollbars()
    }
}

impl Scrollbars {
    /// Height eaten at the bottom of the body by a horizontal scrollbar.
    pub fn horizontal_allowance(&self) -> f32 {
        if self.horizontal {
            self.size
        } else {
            0.0
        }
    }

    /// Width eaten at the right of the body by a vertical scrollbar.
    pub fn vertical_allowance(&self) -> f32 {
        if self.vertical {
            self.size
        } else {
            0.0
        }
    }
}

/// Truncate a non-negative pixel quotient to an index. Negative and
/// non-finite values map to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn floor_to_index(value: f32) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.floor() as usize
}
