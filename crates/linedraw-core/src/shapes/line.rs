//! Polyline built from contiguous segments.

use super::{CanvasBounds, Segment, ShapeId};
use crate::surface::{DrawingSurface, StrokeStyle};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a line treats segments that cannot move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveMode {
    /// Move every segment that fits and leave the rest in place.
    #[default]
    Lenient,
    /// Move all segments or none of them.
    Strict,
}

/// Result of translating a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Every segment moved.
    Moved,
    /// Some segments moved and `rejected` did not; the chain is now broken.
    Partial { rejected: usize },
    /// No segment moved.
    Rejected,
}

impl MoveOutcome {
    /// True only when every segment moved.
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

/// An ordered chain of segments.
///
/// Each new segment starts where the previous one ended, so the chain is
/// continuous until a lenient [`translate`](Line::translate) partially fails.
#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) id: ShapeId,
    first_point: Point,
    segments: Vec<Segment>,
    selected: bool,
    bounds: CanvasBounds,
}

impl Line {
    /// Create a line starting at `first_point`, with one segment if
    /// `second_point` is given.
    pub fn new(first_point: Point, bounds: CanvasBounds, second_point: Option<Point>) -> Self {
        let mut line = Self {
            id: Uuid::new_v4(),
            first_point,
            segments: Vec::new(),
            selected: false,
            bounds,
        };
        if let Some(point) = second_point {
            line.add_segment(point);
        }
        line
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// The point the chain starts from; follows the first segment when it moves.
    pub fn first_point(&self) -> Point {
        self.first_point
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn bounds(&self) -> &CanvasBounds {
        &self.bounds
    }

    /// Current end of the chain.
    fn tail(&self) -> Point {
        self.segments
            .last()
            .map(Segment::end)
            .unwrap_or(self.first_point)
    }

    /// Append a segment from the current tail to `point`.
    pub fn add_segment(&mut self, point: Point) {
        let start = self.tail();
        self.segments
            .push(Segment::new(start, point, self.bounds.clone()));
    }

    /// Get the start point followed by every segment's end point.
    ///
    /// Describes the chain as drawn only while it is continuous.
    pub fn all_points(&self) -> Vec<Point> {
        let mut pts = Vec::with_capacity(self.segments.len() + 1);
        pts.push(self.segments.first().map(Segment::start).unwrap_or(self.first_point));
        pts.extend(self.segments.iter().map(Segment::end));
        pts
    }

    /// Translate every segment independently.
    ///
    /// Segments that moved stay moved even when a later one is rejected.
    pub fn translate(&mut self, delta: Vec2) -> MoveOutcome {
        self.translate_with(delta, MoveMode::Lenient)
    }

    /// Translate using the given mode.
    pub fn translate_with(&mut self, delta: Vec2, mode: MoveMode) -> MoveOutcome {
        if mode == MoveMode::Strict && !self.segments.iter().all(|s| s.can_translate(delta)) {
            return MoveOutcome::Rejected;
        }

        let rejected = self
            .segments
            .iter_mut()
            .map(|segment| segment.translate(delta))
            .filter(|moved| !moved)
            .count();

        if let Some(first) = self.segments.first() {
            self.first_point = first.start();
        }

        match rejected {
            0 => MoveOutcome::Moved,
            n if n == self.segments.len() => MoveOutcome::Rejected,
            n => MoveOutcome::Partial { rejected: n },
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Set the selection state of the line and all of its segments.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        for segment in &mut self.segments {
            segment.set_selected(selected);
        }
    }

    /// Smallest squared distance from `point` to any segment, or `None` for
    /// a line without segments.
    pub fn squared_distance_from_nearest_segment(&self, point: Point) -> Option<f64> {
        self.segments
            .iter()
            .map(|s| s.squared_distance_from_point(point))
            .reduce(f64::min)
    }

    /// Render every segment in chain order.
    pub fn render(&self, surface: &mut dyn DrawingSurface, style: &StrokeStyle) {
        for segment in &self.segments {
            segment.render(surface, style);
        }
    }
}
