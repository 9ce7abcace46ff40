//! Linedraw Core Library
//!
//! Geometry, hit-testing and editing state for the linedraw editor. The UI
//! layer feeds pointer events into a [`Canvas`] and hands it a
//! [`DrawingSurface`] to render into.

pub mod canvas;
pub mod config;
pub mod shapes;
pub mod surface;
pub mod tools;

pub use canvas::{Canvas, CanvasDocument, SelectionChange, ToolbarState};
pub use config::{ConfigError, ConfigResult, EditorConfig};
pub use shapes::{CanvasBounds, Line, MoveMode, MoveOutcome, Segment, ShapeId};
pub use surface::{DrawingSurface, StrokeStyle};
pub use tools::{ToolKind, ToolManager, ToolState};
