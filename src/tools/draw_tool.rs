use egui::{Color32, Modifiers, Pos2};
use log::debug;

use super::{Tool, ToolContext, ToolOutput};
use crate::command::Command;
use crate::shape::Shape;

/// Draws a new shape of the current mode's kind.
///
/// The shape under construction lives here, not in the scene store:
/// subscribers never see a partial object. Pointer-down allocates the id
/// and anchors the start point, pointer-move drags the current point, and
/// only pointer-up commits the finished shape, exactly once, through a
/// create command.
pub struct DrawShapeTool {
    /// Style applied to newly drawn shapes.
    pub stroke_color: Color32,
    pub fill_color: Color32,
    provisional: Option<Shape>,
}

impl Default for DrawShapeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawShapeTool {
    pub fn new() -> Self {
        Self {
            stroke_color: Color32::BLACK,
            fill_color: Color32::WHITE,
            provisional: None,
        }
    }
}

impl Tool for DrawShapeTool {
    fn name(&self) -> &'static str {
        "Draw"
    }

    fn on_pointer_down(
        &mut self,
        pos: Pos2,
        _modifiers: Modifiers,
        ctx: &mut ToolContext<'_>,
    ) -> Option<ToolOutput> {
        // Select mode never routes here; a missing kind means the mode
        // changed between frames, so just stay idle.
        let kind = ctx.store.state().mode.shape_kind()?;
        let id = ctx.ids.next_id();
        debug!("draw gesture started: {} id {}", kind.label(), id);
        self.provisional = Some(Shape::new(
            id,
            kind,
            pos,
            self.stroke_color,
            self.fill_color,
        ));
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<ToolOutput> {
        if let Some(shape) = &mut self.provisional {
            shape.current = pos;
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<ToolOutput> {
        let mut shape = self.provisional.take()?;
        shape.current = pos;
        // A click without movement commits a degenerate shape; a
        // zero-length line is simply never hittable afterwards.
        Some(ToolOutput::Execute(Command::create(shape)))
    }

    fn preview(&self) -> Option<&Shape> {
        self.provisional.as_ref()
    }

    fn is_active(&self) -> bool {
        self.provisional.is_some()
    }

    fn cancel(&mut self) {
        self.provisional = None;
    }
}
