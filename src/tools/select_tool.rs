use std::collections::BTreeSet;

use egui::{Modifiers, Pos2, Vec2};
use log::debug;

use super::{Tool, ToolContext, ToolOutput};
use crate::command::Command;
use crate::shape::registry;

/// An in-flight drag of the selected objects.
struct DragState {
    ids: Vec<usize>,
    origin: Pos2,
    /// Translation already applied to the store by previous move events.
    applied: Vec2,
}

/// Selects objects by hit-test and drags them.
///
/// Hit ties resolve to the highest z-index (top-most wins). Plain click
/// replaces the selection with the hit object; shift-click unions it in.
/// An empty-space click clears the selection (unless shift is held) and
/// ends the gesture immediately.
#[derive(Default)]
pub struct SelectTool {
    drag: Option<DragState>,
}

impl SelectTool {
    pub fn new() -> Self {
        Self { drag: None }
    }
}

impl Tool for SelectTool {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn on_pointer_down(
        &mut self,
        pos: Pos2,
        modifiers: Modifiers,
        ctx: &mut ToolContext<'_>,
    ) -> Option<ToolOutput> {
        let hit = ctx
            .store
            .state()
            .objects
            .iter()
            .filter(|obj| registry::hit_test(obj, pos))
            .max_by_key(|obj| obj.z_index)
            .map(|obj| obj.id);

        let Some(hit_id) = hit else {
            // Empty space: shift keeps the selection, otherwise clear it.
            // Either way the gesture ends here; there is nothing to drag.
            if !modifiers.shift {
                ctx.store.set_selected_ids([]);
            }
            return None;
        };

        let selection: Vec<usize> = if modifiers.shift {
            let mut ids: BTreeSet<usize> = ctx.store.state().selected_ids.clone();
            ids.insert(hit_id);
            ids.into_iter().collect()
        } else {
            vec![hit_id]
        };
        ctx.store.set_selected_ids(selection.iter().copied());

        debug!("drag gesture started on {:?}", selection);
        self.drag = Some(DragState {
            ids: selection,
            origin: pos,
            applied: Vec2::ZERO,
        });
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolOutput> {
        if let Some(drag) = &mut self.drag {
            // The delta is always measured from the gesture origin; only
            // the difference to what earlier events applied hits the store.
            let total = pos - drag.origin;
            let step = total - drag.applied;
            if step != Vec2::ZERO {
                ctx.store.move_objects(&drag.ids, step);
                drag.applied = total;
            }
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolOutput> {
        let drag = self.drag.take()?;
        let total = pos - drag.origin;
        let step = total - drag.applied;
        if step != Vec2::ZERO {
            ctx.store.move_objects(&drag.ids, step);
        }
        if total == Vec2::ZERO {
            // A click that never moved anything leaves no undo entry.
            return None;
        }
        // The store already saw every increment; record one command
        // covering the whole gesture so undo reverses it in a single step.
        Some(ToolOutput::Record(Command::move_by(drag.ids, total)))
    }

    fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    fn cancel(&mut self) {
        self.drag = None;
    }
}
