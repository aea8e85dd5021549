//! Backface test over pixel-space triangles
use crate::algebra::Vec2;

/// Twice the signed area of the triangle `p0, p1, p2` (the edge function
/// of `p2` against edge `p0 -> p1`)
#[inline]
pub fn signed_area(p0: &Vec2, p1: &Vec2, p2: &Vec2) -> f64 {
    (p1.x - p0.x) * (p2.y - p0.y) - (p1.y - p0.y) * (p2.x - p0.x)
}

/// Front-facing when the signed area is not positive. Zero-area
/// (edge-on) triangles count as visible.
#[inline]
pub fn is_front_facing(p0: &Vec2, p1: &Vec2, p2: &Vec2) -> bool {
    signed_area(p0, p1, p2) <= 0.0
}
