//! Pure projection from scene state to paint primitives.

use std::collections::BTreeSet;

use egui::{Color32, Painter, Rect, Shape as PaintShape};

use crate::scene::SceneState;
use crate::shape::{registry, Shape};

/// Canvas background; filling it is the per-frame "clear".
const BACKGROUND: Color32 = Color32::WHITE;

/// Project the committed scene into paint order.
///
/// Objects are stable-sorted ascending by z-index (ties keep their
/// existing relative order), then drawn; dashed selection outlines for
/// every selected object follow after all normal draws, so indicators sit
/// on top regardless of z-order.
pub fn scene_shapes(objects: &[Shape], selected_ids: &BTreeSet<usize>) -> Vec<PaintShape> {
    let mut sorted: Vec<&Shape> = objects.iter().collect();
    sorted.sort_by_key(|obj| obj.z_index);

    let mut ops = Vec::new();
    for obj in &sorted {
        ops.extend(registry::paint_ops(obj));
    }
    for obj in &sorted {
        if selected_ids.contains(&obj.id) {
            ops.extend(registry::selection_outline(obj));
        }
    }
    ops
}

/// Paint one frame: clear, the committed scene, then the in-progress
/// provisional shape (if any) on top. Painting from scratch every frame
/// is what keeps preview frames from accumulating.
pub fn render(painter: &Painter, canvas: Rect, state: &SceneState, preview: Option<&Shape>) {
    painter.rect_filled(canvas, 0.0, BACKGROUND);
    painter.extend(scene_shapes(&state.objects, &state.selected_ids));
    if let Some(shape) = preview {
        painter.extend(registry::paint_ops(shape));
    }
}
