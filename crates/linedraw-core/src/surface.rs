//! Drawing surface abstraction.
//!
//! Shapes render themselves by issuing stroke calls against a
//! [`DrawingSurface`]; the backend decides what a stroke becomes.

use kurbo::{Point, Rect};
use peniko::Color;

/// Default radius of the endpoint markers drawn on selected segments.
pub const DEFAULT_MARKER_RADIUS: f64 = 5.0;

/// Stroke properties for a render pass.
#[derive(Debug, Clone, Copy)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
    /// Radius of the circles marking a selected segment's endpoints.
    pub marker_radius: f64,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f64, marker_radius: f64) -> Self {
        Self {
            color,
            width,
            marker_radius,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color::from_rgba8(0, 0, 0, 255), 1.0, DEFAULT_MARKER_RADIUS)
    }
}

/// Trait for drawing backends.
pub trait DrawingSurface {
    /// Stroke a straight path between two points.
    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Stroke a circle outline around a point.
    fn stroke_circle(&mut self, center: Point, radius: f64, style: &StrokeStyle);

    /// Clear a rectangular region.
    fn clear_rect(&mut self, rect: Rect);
}
