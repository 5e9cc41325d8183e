//! Table entities
//!
//! Static geometry is immutable once built. The only fields that change
//! during play are the ball's motion, flipper angles, plunger travel and
//! target lit flags.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{closest_point_on_segment, right_normal};
use crate::consts::*;

/// The ball (point mass with a radius)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Always 1.0; resolvers treat the ball as unit mass
    pub mass: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            mass: 1.0,
        }
    }

    /// Semi-implicit Euler: gravity, then drag, then position
    pub fn integrate(&mut self, dt: f32, gravity: f32, drag: f32) {
        self.vel.y += gravity * dt;
        self.vel *= drag.powf(dt);
        self.pos += self.vel * dt;
    }

    /// Put the ball back at rest at `pos`
    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }

    /// Move the ball off the table after the last drain
    pub fn park(&mut self) {
        self.respawn(Vec2::new(PARKED_X, PARKED_Y));
    }
}

/// A thin straight segment with a precomputed normal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
    /// `end - start`
    pub dir: Vec2,
    pub len: f32,
    /// `dir` rotated -90°, normalized
    pub normal: Vec2,
}

impl LineSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        let dir = end - start;
        Self {
            start,
            end,
            dir,
            len: dir.length(),
            normal: right_normal(dir),
        }
    }

    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        closest_point_on_segment(p, self.start, self.end)
    }
}

/// Which flipper button drives a flipper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipperSide {
    Left,
    Right,
}

/// A kinematic flipper rotating about a fixed pivot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flipper {
    pub pivot: Vec2,
    pub length: f32,
    /// Current angle (radians)
    pub angle: f32,
    /// Angle when the button is released
    pub rest_angle: f32,
    /// Angle when the button is held
    pub active_angle: f32,
    /// Recomputed every update, never integrated
    pub angular_vel: f32,
    pub side: FlipperSide,
    /// Derived from `angle`; refreshed by every update
    pub tip: Vec2,
}

impl Flipper {
    pub fn new(pivot: Vec2, length: f32, rest_angle: f32, active_angle: f32, side: FlipperSide) -> Self {
        let mut flipper = Self {
            pivot,
            length,
            angle: rest_angle,
            rest_angle,
            active_angle,
            angular_vel: 0.0,
            side,
            tip: pivot,
        };
        flipper.update_tip();
        flipper
    }

    fn update_tip(&mut self) {
        self.tip = self.pivot + Vec2::new(self.angle.cos(), self.angle.sin()) * self.length;
    }

    /// Chase the rest or active angle with a proportional controller
    pub fn update(&mut self, held: bool, strength: f32, dt: f32) {
        let target = if held { self.active_angle } else { self.rest_angle };
        self.angular_vel = (target - self.angle) * strength;
        self.angle += self.angular_vel * dt;
        self.update_tip();
    }

    /// Velocity of the flipper surface at `point` (ω × r)
    #[inline]
    pub fn surface_velocity(&self, point: Vec2) -> Vec2 {
        let r = point - self.pivot;
        Vec2::new(-self.angular_vel * r.y, self.angular_vel * r.x)
    }

    pub fn segment(&self) -> (Vec2, Vec2) {
        (self.pivot, self.tip)
    }
}

/// Plunger phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlungerState {
    #[default]
    Resting,
    Charging,
    Releasing,
}

/// One-dimensional launch actuator at the bottom of the shooter lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plunger {
    /// Bottom-center anchor
    pub anchor: Vec2,
    pub width: f32,
    pub height: f32,
    /// Lane walls the ball must sit between to touch the plunger
    pub lane_left: f32,
    pub lane_right: f32,
    pub max_displacement: f32,
    /// Displacement gained per unit of time while charging
    pub charge_rate: f32,
    /// How far the plunger is pulled down (0..max)
    pub displacement: f32,
    /// Top edge, `anchor.y - height + displacement`
    pub top_y: f32,
    /// Locked on the first releasing step, 0 otherwise
    pub launch_speed: f32,
    pub state: PlungerState,
}

impl Plunger {
    pub fn new(anchor: Vec2, width: f32, height: f32, lane_left: f32, lane_right: f32) -> Self {
        Self {
            anchor,
            width,
            height,
            lane_left,
            lane_right,
            max_displacement: PLUNGER_MAX_DISPLACEMENT,
            charge_rate: PLUNGER_CHARGE_RATE,
            displacement: 0.0,
            top_y: anchor.y - height,
            launch_speed: 0.0,
            state: PlungerState::Resting,
        }
    }

    pub fn update(&mut self, charging: bool, dt: f32) {
        if charging {
            self.state = PlungerState::Charging;
            if self.displacement < self.max_displacement {
                self.displacement += self.charge_rate * dt;
            }
            self.launch_speed = 0.0;
        } else if self.displacement > 0.0 {
            self.state = PlungerState::Releasing;
            if self.launch_speed == 0.0 {
                self.launch_speed =
                    (self.displacement * PLUNGER_LAUNCH_FACTOR).max(PLUNGER_MIN_LAUNCH);
            }
            self.displacement = (self.displacement - self.launch_speed * dt).max(0.0);
        } else {
            self.state = PlungerState::Resting;
            self.launch_speed = 0.0;
        }
        self.top_y = self.anchor.y - self.height + self.displacement;
    }

    /// Is `x` strictly between the lane walls?
    #[inline]
    pub fn in_lane(&self, x: f32) -> bool {
        x > self.lane_left && x < self.lane_right
    }
}

/// Round pop bumper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bumper {
    pub pos: Vec2,
    pub radius: f32,
}

impl Bumper {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }
}

/// Segment that kicks the ball off its front face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slingshot {
    /// `segment.normal` is the front face
    pub segment: LineSegment,
}

impl Slingshot {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            segment: LineSegment::new(start, end),
        }
    }
}

/// Drop-style target that goes dark when hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub segment: LineSegment,
    pub lit: bool,
}

impl Target {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            segment: LineSegment::new(start, end),
            lit: true,
        }
    }
}
