//! Per-kind shape behavior: how each kind paints itself, how it hit-tests,
//! and which size fields the property panel exposes for it.
//!
//! This is the one place kind dispatch lives. Every function matches on
//! [`ShapeKind`] exhaustively; adding a kind without handling it here does
//! not compile.

use egui::{Color32, Pos2, Shape as PaintShape, Stroke, Vec2};

use super::{Shape, ShapeKind};
use crate::geometry;

/// Stroke width for normal shape outlines.
const STROKE_WIDTH: f32 = 1.0;

/// Selection overlay style: dashed blue, always drawn on top.
const SELECTION_COLOR: Color32 = Color32::from_rgb(0x00, 0x66, 0xff);
const SELECTION_STROKE_WIDTH: f32 = 2.0;
const DASH_LENGTH: f32 = 5.0;
const GAP_LENGTH: f32 = 5.0;

/// Segments used to approximate a circle when tracing its dashed outline.
const CIRCLE_OUTLINE_SEGMENTS: usize = 64;

/// Paint primitives for one shape, fill before stroke.
pub fn paint_ops(shape: &Shape) -> Vec<PaintShape> {
    let stroke = Stroke::new(STROKE_WIDTH, shape.stroke_color);
    match shape.kind {
        ShapeKind::Line => {
            vec![PaintShape::line_segment([shape.start, shape.current], stroke)]
        }
        ShapeKind::Rectangle => {
            let bounds = shape.corner_bounds();
            vec![
                PaintShape::rect_filled(bounds, 0.0, shape.fill_color),
                PaintShape::rect_stroke(bounds, 0.0, stroke),
            ]
        }
        ShapeKind::Circle => {
            let radius = shape.radius();
            vec![
                PaintShape::circle_filled(shape.start, radius, shape.fill_color),
                PaintShape::circle_stroke(shape.start, radius, stroke),
            ]
        }
    }
}

/// Dashed overlay tracing the same path as the shape, used as the
/// selection indicator.
pub fn selection_outline(shape: &Shape) -> Vec<PaintShape> {
    let stroke = Stroke::new(SELECTION_STROKE_WIDTH, SELECTION_COLOR);
    let path: Vec<Pos2> = match shape.kind {
        ShapeKind::Line => vec![shape.start, shape.current],
        ShapeKind::Rectangle => {
            let b = shape.corner_bounds();
            vec![
                b.left_top(),
                b.right_top(),
                b.right_bottom(),
                b.left_bottom(),
                b.left_top(),
            ]
        }
        ShapeKind::Circle => {
            let radius = shape.radius();
            (0..=CIRCLE_OUTLINE_SEGMENTS)
                .map(|i| {
                    let angle = i as f32 / CIRCLE_OUTLINE_SEGMENTS as f32 * std::f32::consts::TAU;
                    shape.start + radius * Vec2::angled(angle)
                })
                .collect()
        }
    };
    PaintShape::dashed_line(&path, stroke, DASH_LENGTH, GAP_LENGTH)
}

/// Whether a pointer at `point` counts as hitting `shape`.
pub fn hit_test(shape: &Shape, point: Pos2) -> bool {
    match shape.kind {
        ShapeKind::Line => geometry::hit_line(point, shape.start, shape.current),
        ShapeKind::Rectangle => geometry::hit_rectangle(point, shape.start, shape.current),
        ShapeKind::Circle => geometry::hit_circle(point, shape.start, shape.current),
    }
}

/// One numeric size field the property panel exposes for a shape kind,
/// together with how an edit maps back onto the stored points.
pub struct SizeField {
    pub label: &'static str,
    pub get: fn(&Shape) -> f32,
    pub set: fn(&mut Shape, f32),
}

/// Editable size fields per kind.
///
/// Width and height are signed, relative to `start`; editing them moves
/// only the matching axis of `current`. Editing a circle's radius
/// re-anchors the rim point along the x-axis from the center.
pub fn size_fields(kind: ShapeKind) -> &'static [SizeField] {
    const LINE: &[SizeField] = &[
        SizeField {
            label: "End X",
            get: |s| s.current.x,
            set: |s, v| s.current.x = v,
        },
        SizeField {
            label: "End Y",
            get: |s| s.current.y,
            set: |s, v| s.current.y = v,
        },
    ];
    const RECTANGLE: &[SizeField] = &[
        SizeField {
            label: "Width",
            get: |s| s.current.x - s.start.x,
            set: |s, v| s.current.x = s.start.x + v,
        },
        SizeField {
            label: "Height",
            get: |s| s.current.y - s.start.y,
            set: |s, v| s.current.y = s.start.y + v,
        },
    ];
    const CIRCLE: &[SizeField] = &[SizeField {
        label: "Radius",
        get: Shape::radius,
        set: |s, v| s.current = egui::pos2(s.start.x + v, s.start.y),
    }];

    match kind {
        ShapeKind::Line => LINE,
        ShapeKind::Rectangle => RECTANGLE,
        ShapeKind::Circle => CIRCLE,
    }
}
