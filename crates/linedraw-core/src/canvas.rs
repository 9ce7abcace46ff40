//! Canvas document and editor state.

use crate::config::{ConfigResult, EditorConfig};
use crate::shapes::{CanvasBounds, Line, MoveMode, MoveOutcome, ShapeId};
use crate::surface::DrawingSurface;
use crate::tools::{ToolKind, ToolManager};
use kurbo::{Point, Vec2};

/// What a selection click changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// The line is now the only selected line.
    Selected(ShapeId),
    /// The already selected line was clicked again and is now deselected.
    Deselected(ShapeId),
    /// Nothing was in reach; every selection was cleared.
    Cleared,
}

/// The ordered collection of lines in a drawing.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    /// Lines in paint order (back to front).
    lines: Vec<Line>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line on top of the others.
    pub fn add_line(&mut self, line: Line) {
        log::debug!("Adding line {}", line.id());
        self.lines.push(line);
    }

    /// Remove a line from the document.
    pub fn remove_line(&mut self, id: ShapeId) -> Option<Line> {
        let index = self.lines.iter().position(|l| l.id() == id)?;
        log::debug!("Removing line {}", id);
        Some(self.lines.remove(index))
    }

    /// Clear all lines from the document.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn get_line(&self, id: ShapeId) -> Option<&Line> {
        self.lines.iter().find(|l| l.id() == id)
    }

    pub fn get_line_mut(&mut self, id: ShapeId) -> Option<&mut Line> {
        self.lines.iter_mut().find(|l| l.id() == id)
    }

    /// Lines in paint order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Find the closest line within `threshold_sq` of a point.
    ///
    /// Lines without segments are skipped. Ties go to the earlier line.
    pub fn nearest_line(&self, point: Point, threshold_sq: f64) -> Option<ShapeId> {
        let mut best: Option<(ShapeId, f64)> = None;
        for line in &self.lines {
            let Some(dist) = line.squared_distance_from_nearest_segment(point) else {
                continue;
            };
            if dist > threshold_sq {
                continue;
            }
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((line.id(), dist));
            }
        }
        best.map(|(id, _)| id)
    }

    /// The selected line, if any.
    pub fn selected_line(&self) -> Option<&Line> {
        self.lines.iter().find(|l| l.is_selected())
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected_line().map(Line::id)
    }

    /// Deselect every line.
    pub fn clear_selection(&mut self) {
        for line in &mut self.lines {
            line.set_selected(false);
        }
    }

    /// Apply a selection click at `point`.
    ///
    /// Clicking the selected line deselects it, clicking another line makes
    /// it the only selection, and clicking empty space clears everything.
    pub fn select_at(&mut self, point: Point, threshold_sq: f64) -> SelectionChange {
        let Some(id) = self.nearest_line(point, threshold_sq) else {
            self.clear_selection();
            log::trace!("Selection cleared at {:?}", point);
            return SelectionChange::Cleared;
        };

        let already_selected = self.get_line(id).is_some_and(Line::is_selected);
        if already_selected {
            if let Some(line) = self.get_line_mut(id) {
                line.set_selected(false);
            }
            log::trace!("Deselected line {}", id);
            SelectionChange::Deselected(id)
        } else {
            self.clear_selection();
            if let Some(line) = self.get_line_mut(id) {
                line.set_selected(true);
            }
            log::trace!("Selected line {}", id);
            SelectionChange::Selected(id)
        }
    }

    /// Delete the selected line.
    pub fn delete_selection(&mut self) -> Option<Line> {
        let id = self.selected_id()?;
        self.remove_line(id)
    }
}

/// Which toolbar actions make sense right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolbarState {
    pub show_select: bool,
    pub show_move: bool,
    pub show_erase: bool,
}

/// Runtime editor state.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Tool manager.
    pub tool_manager: ToolManager,
    /// Editor settings.
    pub config: EditorConfig,
    /// Drawable area shared with every segment.
    bounds: CanvasBounds,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a canvas with the default configuration.
    pub fn new() -> Self {
        Self::build(EditorConfig::default())
    }

    /// Create a canvas with the given configuration.
    ///
    /// Fails if the configuration does not validate.
    pub fn with_config(config: EditorConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EditorConfig) -> Self {
        let bounds = CanvasBounds::new(config.canvas_width, config.canvas_height);
        Self {
            document: CanvasDocument::new(),
            tool_manager: ToolManager::new(),
            config,
            bounds,
        }
    }

    pub fn bounds(&self) -> &CanvasBounds {
        &self.bounds
    }

    /// Resize the canvas; existing lines see the new bounds immediately.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds.resize(width, height);
    }

    pub fn tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    /// Switch tools, dropping any interaction in progress and all selections.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool_manager.set_tool(tool);
        self.document.clear_selection();
    }

    /// Handle a pointer press. Returns true if a redraw is needed.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        match self.tool_manager.current_tool {
            ToolKind::Line => {
                if let Some((start, end)) = self.tool_manager.click_segment(point) {
                    let line = Line::new(start, self.bounds.clone(), Some(end));
                    self.document.add_line(line);
                }
            }
            ToolKind::Pencil => {
                let line = Line::new(point, self.bounds.clone(), None);
                self.tool_manager.begin_stroke(line.id());
                self.document.add_line(line);
            }
            ToolKind::Select | ToolKind::Move => {
                self.document
                    .select_at(point, self.config.selection_threshold_sq);
            }
        }
        true
    }

    /// Handle pointer motion. `movement` is the raw pointer delta since the
    /// previous event. Returns true if a redraw is needed.
    pub fn pointer_move(&mut self, point: Point, movement: Vec2) -> bool {
        match self.tool_manager.current_tool {
            ToolKind::Move => match self.move_selection(movement * self.config.move_scale) {
                Some(outcome) => outcome != MoveOutcome::Rejected,
                None => false,
            },
            ToolKind::Pencil => {
                let Some(id) = self.tool_manager.stroke() else {
                    return false;
                };
                match self.document.get_line_mut(id) {
                    Some(line) => {
                        line.add_segment(point);
                        true
                    }
                    None => false,
                }
            }
            ToolKind::Line | ToolKind::Select => false,
        }
    }

    /// Handle a pointer release. Returns true if a redraw is needed.
    pub fn pointer_up(&mut self) -> bool {
        match self.tool_manager.current_tool {
            ToolKind::Move => {
                self.document.clear_selection();
                true
            }
            ToolKind::Pencil => {
                self.tool_manager.end_stroke();
                false
            }
            ToolKind::Line | ToolKind::Select => false,
        }
    }

    /// Translate the selected line, if any.
    pub fn move_selection(&mut self, delta: Vec2) -> Option<MoveOutcome> {
        let mode = if self.config.strict_moves {
            MoveMode::Strict
        } else {
            MoveMode::Lenient
        };
        let id = self.document.selected_id()?;
        let line = self.document.get_line_mut(id)?;
        let outcome = line.translate_with(delta, mode);
        if !outcome.is_moved() {
            log::debug!("invalid move of line {} by {:?}: {:?}", id, delta, outcome);
        }
        Some(outcome)
    }

    /// Delete the selected line.
    pub fn erase_selection(&mut self) -> Option<Line> {
        self.document.delete_selection()
    }

    /// Toolbar visibility for the current state.
    pub fn toolbar_state(&self) -> ToolbarState {
        let has_lines = !self.document.is_empty();
        ToolbarState {
            show_select: has_lines,
            show_move: has_lines,
            show_erase: self.tool() == ToolKind::Select && self.document.selected_line().is_some(),
        }
    }

    /// Clear the canvas and draw every line in paint order.
    pub fn render(&self, surface: &mut dyn DrawingSurface) {
        surface.clear_rect(self.bounds.rect());
        let style = self.config.stroke_style();
        for line in self.document.lines() {
            line.render(surface, &style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::surface::recording::{Call, RecordingSurface};

    fn canvas_100() -> Canvas {
        Canvas::with_config(EditorConfig {
            canvas_width: 100.0,
            canvas_height: 100.0,
            ..EditorConfig::default()
        })
        .unwrap()
    }

    fn line(canvas: &Canvas, a: (f64, f64), b: (f64, f64)) -> Line {
        Line::new(
            Point::new(a.0, a.1),
            canvas.bounds().clone(),
            Some(Point::new(b.0, b.1)),
        )
    }

    #[test]
    fn test_add_and_remove_line() {
        let canvas = canvas_100();
        let mut doc = CanvasDocument::new();
        let l = line(&canvas, (0.0, 0.0), (10.0, 0.0));
        let id = l.id();
        doc.add_line(l);
        assert_eq!(doc.len(), 1);
        assert!(doc.get_line(id).is_some());
        assert!(doc.remove_line(id).is_some());
        assert!(doc.is_empty());
        assert!(doc.remove_line(id).is_none());
    }

    #[test]
    fn test_nearest_line_threshold() {
        let canvas = canvas_100();
        let mut doc = CanvasDocument::new();
        let near = line(&canvas, (0.0, 0.0), (10.0, 0.0));
        let near_id = near.id();
        doc.add_line(near);
        doc.add_line(line(&canvas, (0.0, 50.0), (10.0, 50.0)));

        assert_eq!(doc.nearest_line(Point::new(5.0, 3.0), 10.0), Some(near_id));
        // 4^2 = 16 is beyond the threshold
        assert_eq!(doc.nearest_line(Point::new(5.0, 4.0), 10.0), None);
    }

    #[test]
    fn test_nearest_line_prefers_closest_then_earliest() {
        let canvas = canvas_100();
        let mut doc = CanvasDocument::new();
        let first = line(&canvas, (0.0, 0.0), (10.0, 0.0));
        let second = line(&canvas, (0.0, 4.0), (10.0, 4.0));
        let third = line(&canvas, (0.0, 2.0), (10.0, 2.0));
        let (first_id, third_id) = (first.id(), third.id());
        doc.add_line(first);
        doc.add_line(second);
        doc.add_line(third);

        assert_eq!(doc.nearest_line(Point::new(5.0, 2.5), 10.0), Some(third_id));
        // Equidistant from first and third
        assert_eq!(doc.nearest_line(Point::new(5.0, 1.0), 10.0), Some(first_id));
    }

    #[test]
    fn test_nearest_line_skips_empty_lines() {
        let canvas = canvas_100();
        let mut doc = CanvasDocument::new();
        doc.add_line(Line::new(Point::new(5.0, 5.0), canvas.bounds().clone(), None));
        assert_eq!(doc.nearest_line(Point::new(5.0, 5.0), 10.0), None);
    }

    #[test]
    fn test_select_toggle_and_clear() {
        let canvas = canvas_100();
        let mut doc = CanvasDocument::new();
        let a = line(&canvas, (0.0, 0.0), (10.0, 0.0));
        let b = line(&canvas, (0.0, 50.0), (10.0, 50.0));
        let (a_id, b_id) = (a.id(), b.id());
        doc.add_line(a);
        doc.add_line(b);

        assert_eq!(doc.select_at(Point::new(5.0, 0.0), 10.0), SelectionChange::Selected(a_id));
        assert_eq!(doc.selected_id(), Some(a_id));

        assert_eq!(doc.select_at(Point::new(5.0, 50.0), 10.0), SelectionChange::Selected(b_id));
        assert_eq!(doc.selected_id(), Some(b_id));
        assert!(!doc.get_line(a_id).unwrap().is_selected());

        assert_eq!(doc.select_at(Point::new(5.0, 50.0), 10.0), SelectionChange::Deselected(b_id));
        assert_eq!(doc.selected_id(), None);

        doc.select_at(Point::new(5.0, 0.0), 10.0);
        assert_eq!(doc.select_at(Point::new(50.0, 25.0), 10.0), SelectionChange::Cleared);
        assert_eq!(doc.selected_id(), None);
    }

    #[test]
    fn test_delete_selection() {
        let canvas = canvas_100();
        let mut doc = CanvasDocument::new();
        for y in [0.0, 20.0, 40.0] {
            doc.add_line(line(&canvas, (0.0, y), (10.0, y)));
        }
        let target = doc.lines()[1].id();
        doc.select_at(Point::new(5.0, 20.0), 10.0);

        let removed = doc.delete_selection().unwrap();
        assert_eq!(removed.id(), target);
        assert_eq!(doc.len(), 2);
        assert!(doc.lines().iter().all(|l| !l.is_selected()));
        assert!(doc.delete_selection().is_none());
    }

    #[test]
    fn test_line_tool_two_clicks() {
        let mut canvas = canvas_100();
        canvas.pointer_down(Point::new(10.0, 10.0));
        assert!(canvas.document.is_empty());
        canvas.pointer_down(Point::new(30.0, 10.0));
        assert_eq!(canvas.document.len(), 1);
        let line = &canvas.document.lines()[0];
        assert_eq!(line.len(), 1);
        assert_eq!(line.segments()[0].start(), Point::new(10.0, 10.0));
        assert_eq!(line.segments()[0].end(), Point::new(30.0, 10.0));
    }

    #[test]
    fn test_set_tool_resets_state() {
        let mut canvas = canvas_100();
        canvas.pointer_down(Point::new(10.0, 10.0));
        canvas.set_tool(ToolKind::Line);
        canvas.pointer_down(Point::new(20.0, 20.0));
        assert!(canvas.document.is_empty());

        canvas.pointer_down(Point::new(40.0, 20.0));
        canvas.set_tool(ToolKind::Select);
        canvas.pointer_down(Point::new(30.0, 20.0));
        assert!(canvas.document.selected_line().is_some());
        canvas.set_tool(ToolKind::Move);
        assert!(canvas.document.selected_line().is_none());
    }

    #[test]
    fn test_pencil_draws_chain() {
        let mut canvas = canvas_100();
        canvas.set_tool(ToolKind::Pencil);
        canvas.pointer_down(Point::new(10.0, 10.0));
        assert!(canvas.pointer_move(Point::new(12.0, 11.0), Vec2::new(2.0, 1.0)));
        assert!(canvas.pointer_move(Point::new(15.0, 15.0), Vec2::new(3.0, 4.0)));
        canvas.pointer_up();
        assert!(!canvas.pointer_move(Point::new(20.0, 20.0), Vec2::new(5.0, 5.0)));

        assert_eq!(canvas.document.len(), 1);
        assert_eq!(
            canvas.document.lines()[0].all_points(),
            vec![Point::new(10.0, 10.0), Point::new(12.0, 11.0), Point::new(15.0, 15.0)]
        );
    }

    #[test]
    fn test_move_tool_drags_selected_line() {
        let mut canvas = canvas_100();
        canvas.document.add_line(line(&canvas, (10.0, 10.0), (20.0, 10.0)));
        canvas.set_tool(ToolKind::Move);

        canvas.pointer_down(Point::new(15.0, 10.0));
        // Pointer movement is halved
        assert!(canvas.pointer_move(Point::new(25.0, 14.0), Vec2::new(10.0, 4.0)));
        let seg = &canvas.document.lines()[0].segments()[0];
        assert_eq!(seg.start(), Point::new(15.0, 12.0));
        assert_eq!(seg.end(), Point::new(25.0, 12.0));

        canvas.pointer_up();
        assert!(canvas.document.selected_line().is_none());
        assert!(!canvas.pointer_move(Point::new(30.0, 14.0), Vec2::new(10.0, 4.0)));
    }

    #[test]
    fn test_move_rejected_at_edge() {
        let mut canvas = canvas_100();
        canvas.document.add_line(line(&canvas, (90.0, 90.0), (95.0, 95.0)));
        canvas.set_tool(ToolKind::Move);
        canvas.pointer_down(Point::new(92.0, 92.0));

        assert!(!canvas.pointer_move(Point::new(0.0, 0.0), Vec2::new(20.0, 20.0)));
        assert_eq!(canvas.move_selection(Vec2::new(10.0, 10.0)), Some(MoveOutcome::Rejected));
        assert_eq!(canvas.move_selection(Vec2::new(5.0, 5.0)), Some(MoveOutcome::Moved));
    }

    #[test]
    fn test_strict_moves_config() {
        let mut canvas = Canvas::with_config(EditorConfig {
            canvas_width: 100.0,
            canvas_height: 100.0,
            strict_moves: true,
            ..EditorConfig::default()
        })
        .unwrap();
        let mut l = line(&canvas, (10.0, 50.0), (20.0, 50.0));
        l.add_segment(Point::new(90.0, 50.0));
        canvas.document.add_line(l);
        canvas.set_tool(ToolKind::Select);
        canvas.pointer_down(Point::new(15.0, 50.0));

        assert_eq!(canvas.move_selection(Vec2::new(20.0, 0.0)), Some(MoveOutcome::Rejected));
        assert_eq!(
            canvas.document.lines()[0].segments()[0].start(),
            Point::new(10.0, 50.0)
        );
    }

    #[test]
    fn test_partial_move_still_redraws() {
        let mut canvas = canvas_100();
        let mut l = line(&canvas, (10.0, 50.0), (20.0, 50.0));
        l.add_segment(Point::new(90.0, 50.0));
        canvas.document.add_line(l);
        canvas.set_tool(ToolKind::Move);
        canvas.pointer_down(Point::new(15.0, 50.0));

        // Halved to 20: the first segment fits, the second would reach x = 110
        assert!(canvas.pointer_move(Point::new(55.0, 50.0), Vec2::new(40.0, 0.0)));
        let segs = canvas.document.lines()[0].segments();
        assert_eq!(segs[0].start(), Point::new(30.0, 50.0));
        assert_eq!(segs[1].start(), Point::new(20.0, 50.0));
        assert_ne!(segs[0].end(), segs[1].start());
        assert_eq!(
            canvas.move_selection(Vec2::new(15.0, 0.0)),
            Some(MoveOutcome::Partial { rejected: 1 })
        );
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let err = Canvas::with_config(EditorConfig {
            move_scale: f64::NAN,
            ..EditorConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "move_scale", .. }));
    }

    #[test]
    fn test_resize_reaches_existing_lines() {
        let mut canvas = canvas_100();
        canvas.document.add_line(line(&canvas, (90.0, 10.0), (95.0, 10.0)));
        canvas.set_tool(ToolKind::Select);
        canvas.pointer_down(Point::new(92.0, 10.0));
        assert_eq!(canvas.move_selection(Vec2::new(50.0, 0.0)), Some(MoveOutcome::Rejected));

        canvas.resize(200.0, 100.0);
        assert_eq!(canvas.move_selection(Vec2::new(50.0, 0.0)), Some(MoveOutcome::Moved));
    }

    #[test]
    fn test_erase_only_selected() {
        let mut canvas = canvas_100();
        for y in [0.0, 20.0, 40.0, 60.0] {
            canvas.document.add_line(line(&canvas, (0.0, y), (10.0, y)));
        }
        canvas.set_tool(ToolKind::Select);
        assert!(canvas.erase_selection().is_none());
        canvas.pointer_down(Point::new(5.0, 40.0));
        assert!(canvas.erase_selection().is_some());
        assert_eq!(canvas.document.len(), 3);
        assert!(canvas.document.selected_line().is_none());
    }

    #[test]
    fn test_toolbar_state() {
        let mut canvas = canvas_100();
        assert_eq!(canvas.toolbar_state(), ToolbarState::default());

        canvas.document.add_line(line(&canvas, (0.0, 0.0), (10.0, 0.0)));
        let state = canvas.toolbar_state();
        assert!(state.show_select && state.show_move && !state.show_erase);

        canvas.set_tool(ToolKind::Select);
        canvas.pointer_down(Point::new(5.0, 0.0));
        assert!(canvas.toolbar_state().show_erase);

        canvas.set_tool(ToolKind::Move);
        canvas.pointer_down(Point::new(5.0, 0.0));
        assert!(!canvas.toolbar_state().show_erase);
    }

    #[test]
    fn test_render_clears_then_draws() {
        let mut canvas = canvas_100();
        canvas.document.add_line(line(&canvas, (0.0, 0.0), (10.0, 0.0)));
        canvas.document.add_line(line(&canvas, (0.0, 20.0), (10.0, 20.0)));
        canvas.set_tool(ToolKind::Select);
        canvas.pointer_down(Point::new(5.0, 20.0));

        let mut surface = RecordingSurface::default();
        canvas.render(&mut surface);
        assert_eq!(surface.calls[0], Call::Clear(kurbo::Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(surface.calls[1], Call::Line(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        assert_eq!(surface.lines(), 2);
        assert_eq!(surface.circles(), 2);
    }
}
