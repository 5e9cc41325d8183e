//! Vector helpers shared by every contact test
//!
//! `glam::Vec2` is the vector type; this module only adds the few segment
//! operations glam does not have.

use glam::Vec2;

/// Closest point to `p` on segment `[a, b]`
///
/// Projects onto the infinite line and clamps the parameter to `[0, 1]`.
/// `a == b` is not guarded; boards reject zero-length segments on build.
#[inline]
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let t = ((p - a).dot(ab) / ab.dot(ab)).clamp(0.0, 1.0);
    a + ab * t
}

/// Rotate +90° (counter-clockwise in y-up coordinates)
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Unit normal of a segment direction, rotated -90°
#[inline]
pub fn right_normal(dir: Vec2) -> Vec2 {
    Vec2::new(dir.y, -dir.x).normalize_or_zero()
}

/// Unit vector from `from` toward `to`, or `fallback` when they coincide
#[inline]
pub fn direction_or(from: Vec2, to: Vec2, fallback: Vec2) -> (Vec2, f32) {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 {
        (delta / dist, dist)
    } else {
        (fallback, 0.0)
    }
}
