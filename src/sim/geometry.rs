//! 2D geometry helpers
//!
//! Screen coordinates: x grows right, y grows down. A positive rotation turns
//! a heading clockwise on screen.

use glam::Vec2;

use crate::normalize_degrees;

/// Reference heading ("up" on screen)
pub const UP: Vec2 = Vec2::new(0.0, -1.0);
pub const DOWN: Vec2 = Vec2::new(0.0, 1.0);
pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);

/// Rotate `v` by `degrees` (clockwise on screen for positive angles)
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Rotate a unit heading, renormalizing so repeated turns don't drift in length
#[inline]
pub fn rotate_heading(dir: Vec2, degrees: f32) -> Vec2 {
    rotate_deg(dir, degrees).try_normalize().unwrap_or(UP)
}

/// Angle from `dir` to the `UP` reference in degrees, normalized to [0, 360)
pub fn angle_to_up(dir: Vec2) -> f32 {
    let delta = UP.y.atan2(UP.x) - dir.y.atan2(dir.x);
    normalize_degrees(delta.to_degrees())
}

/// True if A, B, C turn counter-clockwise (in y-down coordinates: clockwise on screen)
#[inline]
pub fn ccw(a: Vec2, b: Vec2, c: Vec2) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// True iff segments AB and CD straddle each other
pub fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
}

/// Clamp a position so a circle of `radius` stays inside `[0, bounds]`
#[inline]
pub fn clamp_to_bounds(pos: Vec2, radius: f32, bounds: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.max(radius).min(bounds.x - radius),
        pos.y.max(radius).min(bounds.y - radius),
    )
}

/// Half-open containment test `[0, w) x [0, h)`
#[inline]
pub fn in_bounds(pos: Vec2, bounds: Vec2) -> bool {
    pos.x >= 0.0 && pos.x < bounds.x && pos.y >= 0.0 && pos.y < bounds.y
}
