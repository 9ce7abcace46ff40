//! Renderer trait abstraction.

use linedraw_core::Canvas;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Scene has no drawable primitives")]
    EmptyScene,
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the drawing commands for a frame.
    ///
    /// Called once per redraw; replaces whatever the previous frame built.
    fn build_scene(&mut self, canvas: &Canvas);
}
