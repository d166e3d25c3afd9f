//! Pure geometric predicates shared by hit-testing and the property panel.
//!
//! Everything here is stateless: shapes come in as their two stored points
//! and answers come out as plain values.

use egui::{Pos2, Rect};

/// Pixel distance within which a click counts as hitting a line.
pub const LINE_HIT_THRESHOLD: f32 = 5.0;

/// Radius of a circle shape: the distance from its center to the rim point.
pub fn circle_radius(center: Pos2, rim: Pos2) -> f32 {
    center.distance(rim)
}

/// Normalized bounding box of two opposite corner points. The corners are
/// stored as dragged and may be in any relative order.
pub fn corner_bounds(a: Pos2, b: Pos2) -> Rect {
    Rect::from_two_pos(a, b)
}

/// Perpendicular distance from `point` to the infinite line through `a` and
/// `b`, or `None` when `a == b` (the divisor would be zero).
pub fn distance_to_line(point: Pos2, a: Pos2, b: Pos2) -> Option<f32> {
    let d = b - a;
    let length = d.length();
    if length == 0.0 {
        return None;
    }
    let numerator = (d.y * point.x - d.x * point.y + b.x * a.y - b.y * a.x).abs();
    Some(numerator / length)
}

/// Whether a click at `point` selects the line through `a` and `b`.
///
/// The test runs against the infinite line, not the segment: a point past
/// either endpoint but inside the threshold band still hits. A zero-length
/// line never hits.
pub fn hit_line(point: Pos2, a: Pos2, b: Pos2) -> bool {
    match distance_to_line(point, a, b) {
        Some(distance) => distance < LINE_HIT_THRESHOLD,
        None => false,
    }
}

/// Whether `point` lies in the rectangle spanned by two opposite corners,
/// boundary inclusive.
pub fn hit_rectangle(point: Pos2, a: Pos2, b: Pos2) -> bool {
    let bounds = corner_bounds(a, b);
    point.x >= bounds.min.x
        && point.x <= bounds.max.x
        && point.y >= bounds.min.y
        && point.y <= bounds.max.y
}

/// Whether `point` lies in the circle centered at `center` whose rim passes
/// through `rim`, boundary inclusive.
pub fn hit_circle(point: Pos2, center: Pos2, rim: Pos2) -> bool {
    point.distance(center) <= circle_radius(center, rim)
}
