//! Editor configuration.

use crate::surface::{DEFAULT_MARKER_RADIUS, StrokeStyle};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for the editor core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial canvas width.
    pub canvas_width: f64,
    /// Initial canvas height.
    pub canvas_height: f64,
    /// A click selects a line when its squared distance is at most this.
    pub selection_threshold_sq: f64,
    /// Multiplier applied to pointer movement while dragging a line.
    pub move_scale: f64,
    /// Radius of selected-endpoint markers.
    pub marker_radius: f64,
    /// Stroke width for lines.
    pub stroke_width: f64,
    /// Move lines all-or-nothing instead of segment by segment.
    pub strict_moves: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            selection_threshold_sq: 10.0,
            move_scale: 0.5,
            marker_radius: DEFAULT_MARKER_RADIUS,
            stroke_width: 1.0,
            strict_moves: false,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("move_scale", self.move_scale)?;
        non_negative("selection_threshold_sq", self.selection_threshold_sq)?;
        non_negative("marker_radius", self.marker_radius)?;
        non_negative("stroke_width", self.stroke_width)?;
        Ok(())
    }

    /// Stroke style derived from this configuration.
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::new(
            Color::from_rgba8(0, 0, 0, 255),
            self.stroke_width,
            self.marker_radius,
        )
    }
}

fn positive(field: &'static str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("expected a positive number, got {value}"),
        });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("expected a non-negative number, got {value}"),
        });
    }
    Ok(())
}
