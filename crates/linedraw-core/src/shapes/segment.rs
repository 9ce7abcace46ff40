//! Straight segment between two endpoints.

use super::{CanvasBounds, point_to_segment_dist_sq, squared_distance};
use crate::surface::{DrawingSurface, StrokeStyle};
use kurbo::{Point, Vec2};

/// A single straight piece of a [`Line`](super::Line).
#[derive(Debug, Clone)]
pub struct Segment {
    start: Point,
    end: Point,
    /// Cached at construction; translation preserves length.
    squared_length: f64,
    selected: bool,
    bounds: CanvasBounds,
}

impl Segment {
    /// Create a segment from `start` to `end` inside `bounds`.
    ///
    /// Zero-length segments are allowed.
    pub fn new(start: Point, end: Point, bounds: CanvasBounds) -> Self {
        Self {
            start,
            end,
            squared_length: squared_distance(start, end),
            selected: false,
            bounds,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Squared length as measured at construction.
    pub fn squared_length(&self) -> f64 {
        self.squared_length
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// The canvas this segment must stay within.
    pub fn bounds(&self) -> &CanvasBounds {
        &self.bounds
    }

    /// Check whether moving by `delta` would keep both endpoints on the canvas.
    pub fn can_translate(&self, delta: Vec2) -> bool {
        self.bounds.contains(self.start + delta) && self.bounds.contains(self.end + delta)
    }

    /// Move both endpoints by `delta`.
    ///
    /// Returns `false` and leaves the segment untouched if either endpoint
    /// would leave the canvas.
    pub fn translate(&mut self, delta: Vec2) -> bool {
        if !self.can_translate(delta) {
            return false;
        }
        self.start += delta;
        self.end += delta;
        true
    }

    /// Minimum squared distance from `point` to this segment.
    pub fn squared_distance_from_point(&self, point: Point) -> f64 {
        point_to_segment_dist_sq(point, self.start, self.end)
    }

    /// Stroke the segment, marking both endpoints when selected.
    pub fn render(&self, surface: &mut dyn DrawingSurface, style: &StrokeStyle) {
        surface.stroke_line(self.start, self.end, style);
        if self.selected {
            surface.stroke_circle(self.start, style.marker_radius, style);
            surface.stroke_circle(self.end, style.marker_radius, style);
        }
    }
}
