//! Concave arc geometry for curved roofs
//!
//! The ball rides along the inside of a circle. Only part of the circle is
//! solid: the resolver only tests the upper half (`y <= center.y`) and the
//! simulation step only offers the right half (`x >= center.x`), which
//! leaves the top-right quarter as the roof. Gating by half-plane keeps the
//! ball from snagging on the missing part of the circle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The inside of a circle, used as a roof
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcaveArc {
    pub center: Vec2,
    pub radius: f32,
}

impl ConcaveArc {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Right half-plane, checked by the step before resolving
    #[inline]
    pub fn in_right_half(&self, point: Vec2) -> bool {
        point.x >= self.center.x
    }

    /// Upper half-plane (screen coordinates, y grows downward)
    #[inline]
    pub fn in_upper_half(&self, point: Vec2) -> bool {
        point.y <= self.center.y
    }

    /// Inward surface normal (toward the center) for a point inside the arc
    pub fn inward_normal_at(&self, point: Vec2) -> Vec2 {
        (self.center - point).normalize_or_zero()
    }

    /// Sample points along the solid quarter, for renderers and debugging
    pub fn sample_edge(&self, num_points: usize) -> Vec<Vec2> {
        use std::f32::consts::FRAC_PI_2;

        (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1).max(1) as f32;
                // -90° (top) to 0° (right)
                let theta = -FRAC_PI_2 + t * FRAC_PI_2;
                self.center + Vec2::new(theta.cos(), theta.sin()) * self.radius
            })
            .collect()
    }
}
