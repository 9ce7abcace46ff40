//! Tool system for the editor.

use crate::shapes::ShapeId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Two clicks place a single segment.
    #[default]
    Line,
    /// Click to select or deselect a line.
    Select,
    /// Press on a line and drag it.
    Move,
    /// Press and drag to draw a multi-segment line.
    Pencil,
}

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// The line tool has its first click and waits for the second.
    PendingSegment { start: Point },
    /// The pencil is drawing into a line.
    Stroke { line: ShapeId },
}

/// Manages the current tool and its state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, dropping any interaction in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Register a line-tool click.
    ///
    /// The first click is stored; the second returns both endpoints and
    /// resets the tool.
    pub fn click_segment(&mut self, point: Point) -> Option<(Point, Point)> {
        match self.state {
            ToolState::PendingSegment { start } => {
                self.state = ToolState::Idle;
                Some((start, point))
            }
            _ => {
                self.state = ToolState::PendingSegment { start: point };
                None
            }
        }
    }

    /// Start drawing into `line`.
    pub fn begin_stroke(&mut self, line: ShapeId) {
        self.state = ToolState::Stroke { line };
    }

    /// Line currently being drawn, if any.
    pub fn stroke(&self) -> Option<ShapeId> {
        match self.state {
            ToolState::Stroke { line } => Some(line),
            _ => None,
        }
    }

    /// Finish the current stroke, returning its line.
    pub fn end_stroke(&mut self) -> Option<ShapeId> {
        let line = self.stroke();
        if line.is_some() {
            self.state = ToolState::Idle;
        }
        line
    }
}
