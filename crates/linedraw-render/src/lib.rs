//! Linedraw Render Library
//!
//! Turns a [`linedraw_core::Canvas`] into a flat list of drawable
//! primitives that a paint backend can replay.

mod renderer;
mod scene;

pub use renderer::{RenderError, RenderResult, Renderer};
pub use scene::{Primitive, SceneBuilder};
