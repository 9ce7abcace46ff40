//! Shape definitions for the editor.

mod line;
mod segment;

pub use line::{Line, MoveMode, MoveOutcome};
pub use segment::Segment;

use kurbo::{Point, Rect, Size, Vec2};
use std::cell::Cell;
use std::rc::Rc;
use uuid::Uuid;

/// Unique identifier for lines.
pub type ShapeId = Uuid;

/// Shared handle to the drawable area `[0, width] x [0, height]`.
///
/// Every segment of a drawing session holds a clone of the same handle, so a
/// [`resize`](Self::resize) is observed by all existing geometry at once.
#[derive(Debug, Clone)]
pub struct CanvasBounds(Rc<Cell<Size>>);

impl CanvasBounds {
    /// Create bounds of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self(Rc::new(Cell::new(Size::new(width, height))))
    }

    /// Current size.
    pub fn size(&self) -> Size {
        self.0.get()
    }

    pub fn width(&self) -> f64 {
        self.size().width
    }

    pub fn height(&self) -> f64 {
        self.size().height
    }

    /// Change the size for every holder of this handle.
    pub fn resize(&self, width: f64, height: f64) {
        self.0.set(Size::new(width, height));
    }

    /// The canvas area as a rectangle anchored at the origin.
    pub fn rect(&self) -> Rect {
        self.size().to_rect()
    }

    /// Check if a point lies inside the closed canvas rectangle.
    pub fn contains(&self, point: Point) -> bool {
        let size = self.size();
        point.x >= 0.0 && point.y >= 0.0 && point.x <= size.width && point.y <= size.height
    }
}

/// Squared distance from a point to the closed segment a→b.
pub fn point_to_segment_dist_sq(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        // Degenerate segment
        return pv.hypot2();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot2()
}

/// Squared Euclidean distance between two points.
pub fn squared_distance(a: Point, b: Point) -> f64 {
    let d: Vec2 = b - a;
    d.hypot2()
}
