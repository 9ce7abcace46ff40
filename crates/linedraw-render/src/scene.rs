//! Recorded scene of stroke primitives.

use crate::renderer::{RenderError, RenderResult, Renderer};
use kurbo::{Circle, Line as KurboLine, Point, Rect, Shape};
use linedraw_core::{Canvas, DrawingSurface, StrokeStyle};
use peniko::Color;

/// A single drawing command.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// A stroked straight line.
    Stroke {
        line: KurboLine,
        color: Color,
        width: f64,
    },
    /// A stroked circle marking a selected endpoint.
    Marker {
        circle: Circle,
        color: Color,
        width: f64,
    },
    /// A cleared region.
    Clear(Rect),
}

impl Primitive {
    /// Bounding box of the drawn geometry; `None` for clears.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Primitive::Stroke { line, width, .. } => {
                let half = width / 2.0;
                Some(line.bounding_box().inflate(half, half))
            }
            Primitive::Marker { circle, width, .. } => {
                let half = width / 2.0;
                Some(circle.bounding_box().inflate(half, half))
            }
            Primitive::Clear(_) => None,
        }
    }
}

/// [`DrawingSurface`] that records primitives in paint order.
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    primitives: Vec<Primitive>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded so far.
    pub fn reset(&mut self) {
        self.primitives.clear();
    }

    /// All primitives in paint order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Stroked lines in paint order.
    pub fn strokes(&self) -> impl Iterator<Item = &KurboLine> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Stroke { line, .. } => Some(line),
            _ => None,
        })
    }

    /// Endpoint markers in paint order.
    pub fn markers(&self) -> impl Iterator<Item = &Circle> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Marker { circle, .. } => Some(circle),
            _ => None,
        })
    }

    /// Union of the bounds of every drawn primitive.
    pub fn bounds(&self) -> RenderResult<Rect> {
        self.primitives
            .iter()
            .filter_map(Primitive::bounds)
            .reduce(|a, b| a.union(b))
            .ok_or(RenderError::EmptyScene)
    }
}

fn covers(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

impl DrawingSurface for SceneBuilder {
    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.primitives.push(Primitive::Stroke {
            line: KurboLine::new(from, to),
            color: style.color,
            width: style.width,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, style: &StrokeStyle) {
        self.primitives.push(Primitive::Marker {
            circle: Circle::new(center, radius),
            color: style.color,
            width: style.width,
        });
    }

    fn clear_rect(&mut self, rect: Rect) {
        // Anything fully under the cleared area is gone for good
        self.primitives
            .retain(|p| p.bounds().is_none_or(|b| !covers(rect, b)));
        self.primitives.push(Primitive::Clear(rect));
    }
}

impl Renderer for SceneBuilder {
    fn build_scene(&mut self, canvas: &Canvas) {
        self.reset();
        canvas.render(&mut *self);
        log::trace!("Built scene with {} primitives", self.primitives.len());
    }
}
