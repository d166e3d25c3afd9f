//! Pointer-gesture interpretation.
//!
//! A gesture is one pointer-down → pointer-move… → pointer-up sequence.
//! Tools move between exactly two states, idle and active; there is no
//! other state machine here. The active tool is chosen from the scene
//! mode: the three drawing modes share [`DrawShapeTool`], select mode uses
//! [`SelectTool`].

mod draw_tool;
mod select_tool;

pub use draw_tool::DrawShapeTool;
pub use select_tool::SelectTool;

use egui::{Modifiers, Pos2};

use crate::command::Command;
use crate::id_generator::IdGenerator;
use crate::scene::SceneStore;
use crate::shape::Shape;

/// Everything a tool may touch while interpreting a gesture.
pub struct ToolContext<'a> {
    pub store: &'a mut SceneStore,
    pub ids: &'a mut IdGenerator,
}

/// What a pointer event asks the session to do with a command.
pub enum ToolOutput {
    /// Execute against the store and push onto the undo stack.
    Execute(Command),
    /// Already applied to the store incrementally during the gesture;
    /// push onto the undo stack without executing again.
    Record(Command),
}

/// Interface shared by the gesture tools.
pub trait Tool {
    fn name(&self) -> &'static str;

    /// Pointer pressed on the canvas.
    fn on_pointer_down(
        &mut self,
        pos: Pos2,
        modifiers: Modifiers,
        ctx: &mut ToolContext<'_>,
    ) -> Option<ToolOutput>;

    /// Pointer moved while held down. Delivery continues even when the
    /// pointer leaves the canvas rect; the host keeps the capture alive
    /// until release.
    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolOutput>;

    /// Pointer released; ends the gesture exactly once.
    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolOutput>;

    /// The provisional shape to draw on top of the committed scene while a
    /// draw gesture is in flight.
    fn preview(&self) -> Option<&Shape> {
        None
    }

    /// True between pointer-down and pointer-up.
    fn is_active(&self) -> bool;

    /// Drop an in-flight gesture without emitting a command, e.g. when the
    /// mode changes out from under the tool.
    fn cancel(&mut self);
}
