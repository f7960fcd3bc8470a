//! Per-grid tuning knobs.
//!
//! Both ratios are fractions of the body (viewport) height. The buffer ratio
//! decides how much is pre-rendered above and below the visible rows; the hit
//! ratio is the hysteresis band that gates recomputing that range.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Default fraction of the body height rendered beyond each visible edge.
pub const DEFAULT_BUFFER_RATIO: f32 = 0.3;

/// Default fraction of the body height used as the refresh hit margin.
pub const DEFAULT_BUFFER_HIT_RATIO: f32 = 0.1;

/// Windowing engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub buffer_ratio: f32,
    pub buffer_hit_ratio: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            buffer_ratio: DEFAULT_BUFFER_RATIO,
            buffer_hit_ratio: DEFAULT_BUFFER_HIT_RATIO,
        }
    }
}

impl RenderConfig {
    /// Check that the ratios describe a usable hysteresis band.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if a ratio is negative or not finite, or if the
    /// hit margin is wider than the buffer it guards.
    pub fn validate(&self) -> Result<()> {
        if !self.buffer_ratio.is_finite() || self.buffer_ratio < 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "bufferRatio must be a non-negative number, got {}",
                self.buffer_ratio
            )));
        }
        if !self.buffer_hit_ratio.is_finite() || self.buffer_hit_ratio < 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "bufferHitRatio must be a non-negative number, got {}",
                self.buffer_hit_ratio
            )));
        }
        if self.buffer_hit_ratio > self.buffer_ratio {
            return Err(GridError::InvalidConfig(format!(
                "bufferHitRatio ({}) exceeds bufferRatio ({})",
                self.buffer_hit_ratio, self.buffer_ratio
            )));
        }
        Ok(())
    }
}

/// Top-level grid configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub render: RenderConfig,
}

impl GridConfig {
    /// Parse and validate a configuration from JSON. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the values are invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `InvalidConfig` if any section is out of range.
    pub fn validate(&self) -> Result<()> {
        self.render.validate()
    }
}
