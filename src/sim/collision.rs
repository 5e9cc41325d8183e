//! Collision detection and response
//!
//! Every obstacle resolves the same way: find the contact normal and
//! penetration, push the ball out along the normal, then reflect the
//! normal velocity component with restitution if the ball is moving into
//! the surface. Obstacles differ only in how they find the normal and in
//! what they add on top (kicks, score, lit state, audio cues).

use glam::Vec2;

use super::arc::ConcaveArc;
use super::entities::{Ball, Bumper, Flipper, LineSegment, Plunger, PlungerState, Slingshot, Target};
use super::geometry::{closest_point_on_segment, direction_or, perpendicular};
use crate::audio::{AudioCue, EventQueue};
use crate::consts::PLUNGER_DAMPING;
use crate::settings::PhysicsConfig;

/// Result of a contact test that touched the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Surface normal at the contact (pointing toward the ball)
    pub normal: Vec2,
    /// Overlap removed by the positional correction
    pub penetration: f32,
    /// Normal velocity before response (relative to the surface)
    pub approach: f32,
}

impl Contact {
    /// Was the ball moving into the surface (so velocity was reflected)?
    #[inline]
    pub fn reflected(&self) -> bool {
        self.approach < 0.0
    }
}

/// Everything a resolver may read or emit besides the ball and obstacle
pub struct ContactContext<'a> {
    pub config: &'a PhysicsConfig,
    pub events: &'a mut EventQueue,
}

/// Shared capability of every obstacle on the table
pub trait Collide {
    /// Resolve the ball against this obstacle, returning the score earned
    fn resolve(&mut self, ball: &mut Ball, ctx: &mut ContactContext<'_>) -> u64;
}

/// Push the ball out of a segment thickened by `half_thickness`
///
/// Applies only the positional correction. Returns the normal and overlap.
fn push_out_of_segment(
    ball: &mut Ball,
    a: Vec2,
    b: Vec2,
    half_thickness: f32,
    fallback: Vec2,
) -> Option<(Vec2, f32)> {
    let closest = closest_point_on_segment(ball.pos, a, b);
    let (normal, dist) = direction_or(closest, ball.pos, fallback);
    let threshold = ball.radius + half_thickness;
    if dist >= threshold {
        return None;
    }
    let overlap = threshold - dist;
    ball.pos += normal * overlap;
    Some((normal, overlap))
}

/// Restitution response along `normal` when the approach speed is negative
#[inline]
fn reflect(ball: &mut Ball, normal: Vec2, approach: f32, restitution: f32) {
    if approach < 0.0 {
        ball.vel += normal * (-(1.0 + restitution) * approach);
    }
}

/// Static wall
pub fn resolve_ball_line(ball: &mut Ball, line: &LineSegment, config: &PhysicsConfig) -> Option<Contact> {
    let (normal, penetration) =
        push_out_of_segment(ball, line.start, line.end, config.wall_half_thickness, line.normal)?;
    let approach = ball.vel.dot(normal);
    reflect(ball, normal, approach, config.restitution);
    Some(Contact {
        normal,
        penetration,
        approach,
    })
}

/// Inside of a circular roof (upper half only)
pub fn resolve_ball_arc(ball: &mut Ball, arc: &ConcaveArc, config: &PhysicsConfig) -> Option<Contact> {
    if !arc.in_upper_half(ball.pos) {
        return None;
    }
    let dist = ball.pos.distance(arc.center);
    let penetration = dist + ball.radius - arc.radius;
    if penetration <= 0.0 {
        return None;
    }
    let normal = arc.inward_normal_at(ball.pos);
    ball.pos += normal * penetration;
    let approach = ball.vel.dot(normal);
    reflect(ball, normal, approach, config.restitution);
    Some(Contact {
        normal,
        penetration,
        approach,
    })
}

/// Moving flipper segment
///
/// The response uses the ball's velocity relative to the flipper surface at
/// the contact point, then hands part of the surface velocity to the ball.
pub fn resolve_ball_flipper(ball: &mut Ball, flipper: &Flipper, ctx: &mut ContactContext<'_>) -> Option<Contact> {
    let (pivot, tip) = flipper.segment();
    let fallback = perpendicular(tip - pivot).normalize_or_zero();
    let closest = closest_point_on_segment(ball.pos, pivot, tip);
    let (normal, penetration) =
        push_out_of_segment(ball, pivot, tip, ctx.config.wall_half_thickness, fallback)?;

    let surface_vel = flipper.surface_velocity(closest);
    let approach = (ball.vel - surface_vel).dot(normal);
    if approach < 0.0 {
        reflect(ball, normal, approach, ctx.config.restitution);
        ball.vel += surface_vel * ctx.config.flipper_grip;

        // Resting on a held flipper would otherwise cue every sub-step
        if approach < -ctx.config.flipper_cue_speed {
            ctx.events.push(AudioCue::FlipperHit);
        }
    }
    Some(Contact {
        normal,
        penetration,
        approach,
    })
}

/// Pop bumper: scores and cues on any contact, kicks when approached
pub fn resolve_ball_bumper(ball: &mut Ball, bumper: &Bumper, ctx: &mut ContactContext<'_>) -> u64 {
    let (normal, dist) = direction_or(bumper.pos, ball.pos, Vec2::NEG_Y);
    let threshold = ball.radius + bumper.radius;
    if dist >= threshold {
        return 0;
    }
    ball.pos += normal * (threshold - dist);

    let approach = ball.vel.dot(normal);
    if approach < 0.0 {
        reflect(ball, normal, approach, ctx.config.restitution);
        ball.vel += normal * ctx.config.kick;
    }
    ctx.events.push(AudioCue::BumperHit);
    ctx.config.bumper_score
}

/// Slingshot: plain wall from behind, powered kick off the front face
pub fn resolve_ball_slingshot(ball: &mut Ball, sling: &Slingshot, ctx: &mut ContactContext<'_>) -> u64 {
    let seg = &sling.segment;
    let Some((normal, _)) =
        push_out_of_segment(ball, seg.start, seg.end, ctx.config.wall_half_thickness, seg.normal)
    else {
        return 0;
    };

    let approach = ball.vel.dot(normal);
    if approach >= 0.0 {
        return 0;
    }
    reflect(ball, normal, approach, ctx.config.restitution);

    if normal.dot(seg.normal) > 0.0 {
        ball.vel += normal * ctx.config.kick;
        ctx.events.push(AudioCue::BumperHit);
        return ctx.config.slingshot_score;
    }
    0
}

/// Target: scores once per lit cycle, on a reflecting hit
pub fn resolve_ball_target(ball: &mut Ball, target: &mut Target, ctx: &mut ContactContext<'_>) -> u64 {
    let seg = &target.segment;
    let Some((normal, _)) =
        push_out_of_segment(ball, seg.start, seg.end, ctx.config.wall_half_thickness, seg.normal)
    else {
        return 0;
    };

    let approach = ball.vel.dot(normal);
    if approach >= 0.0 {
        return 0;
    }
    reflect(ball, normal, approach, ctx.config.restitution);

    if target.lit {
        target.lit = false;
        ctx.events.push(AudioCue::TargetHit);
        return ctx.config.target_score;
    }
    0
}

/// Plunger top versus the ball, inside the shooter lane
///
/// Returns true when the ball was resting on (or launched by) the plunger.
pub fn resolve_ball_plunger(ball: &mut Ball, plunger: &Plunger) -> bool {
    if !plunger.in_lane(ball.pos.x) || ball.pos.y + ball.radius <= plunger.top_y {
        return false;
    }
    ball.pos.y = plunger.top_y - ball.radius;

    if plunger.state == PlungerState::Releasing {
        ball.vel.y = -plunger.launch_speed;
    } else if ball.vel.y > 0.0 {
        ball.vel.y *= PLUNGER_DAMPING;
    }
    true
}

impl Collide for LineSegment {
    fn resolve(&mut self, ball: &mut Ball, ctx: &mut ContactContext<'_>) -> u64 {
        resolve_ball_line(ball, self, ctx.config);
        0
    }
}

impl Collide for ConcaveArc {
    fn resolve(&mut self, ball: &mut Ball, ctx: &mut ContactContext<'_>) -> u64 {
        resolve_ball_arc(ball, self, ctx.config);
        0
    }
}

impl Collide for Flipper {
    fn resolve(&mut self, ball: &mut Ball, ctx: &mut ContactContext<'_>) -> u64 {
        resolve_ball_flipper(ball, self, ctx);
        0
    }
}

impl Collide for Bumper {
    fn resolve(&mut self, ball: &mut Ball, ctx: &mut ContactContext<'_>) -> u64 {
        resolve_ball_bumper(ball, self, ctx)
    }
}

impl Collide for Slingshot {
    fn resolve(&mut self, ball: &mut Ball, ctx: &mut ContactContext<'_>) -> u64 {
        resolve_ball_slingshot(ball, self, ctx)
    }
}

impl Collide for Target {
    fn resolve(&mut self, ball: &mut Ball, ctx: &mut ContactContext<'_>) -> u64 {
        resolve_ball_target(ball, self, ctx)
    }
}

impl Collide for Plunger {
    fn resolve(&mut self, ball: &mut Ball, _ctx: &mut ContactContext<'_>) -> u64 {
        resolve_ball_plunger(ball, self);
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::FlipperSide;
    use proptest::prelude::*;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        let mut ball = Ball::new(Vec2::new(x, y), 10.0);
        ball.vel = Vec2::new(vx, vy);
        ball
    }

    fn floor() -> LineSegment {
        // Pointing +x so the normal (rotated -90°) is -y: up in screen space
        LineSegment::new(Vec2::new(0.0, 500.0), Vec2::new(200.0, 500.0))
    }

    #[test]
    fn test_wall_miss() {
        let config = PhysicsConfig::default();
        let mut ball = ball_at(100.0, 480.0, 0.0, 3.0);
        assert!(resolve_ball_line(&mut ball, &floor(), &config).is_none());
        assert_eq!(ball.pos, Vec2::new(100.0, 480.0));
    }

    #[test]
    fn test_wall_bounce_with_restitution() {
        let config = PhysicsConfig::default();
        let wall = floor();
        assert!((wall.normal - Vec2::new(0.0, -1.0)).length() < 1e-6);

        let mut ball = ball_at(100.0, 490.0, 1.0, 5.0);
        let contact = resolve_ball_line(&mut ball, &wall, &config).unwrap();
        assert!(contact.reflected());
        assert!((contact.penetration - 5.0).abs() < 1e-4);
        assert!((ball.pos.y - 485.0).abs() < 1e-4);
        // v' = v - 1.4 * vn * n
        assert!((ball.vel.y - -2.0).abs() < 1e-4);
        assert!((ball.vel.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_wall_depenetrates_without_reflecting_when_leaving() {
        let config = PhysicsConfig::default();
        let mut ball = ball_at(100.0, 490.0, 0.0, -3.0);
        let contact = resolve_ball_line(&mut ball, &floor(), &config).unwrap();
        assert!(!contact.reflected());
        assert!((ball.pos.y - 485.0).abs() < 1e-4);
        assert_eq!(ball.vel, Vec2::new(0.0, -3.0));
    }

    #[test]
    fn test_wall_center_on_line_uses_static_normal() {
        let config = PhysicsConfig::default();
        let wall = floor();
        let mut ball = ball_at(100.0, 500.0, 0.0, 2.0);
        let contact = resolve_ball_line(&mut ball, &wall, &config).unwrap();
        assert_eq!(contact.normal, wall.normal);
        assert!((ball.pos.y - 485.0).abs() < 1e-4);
        assert!(ball.vel.y < 0.0);
        assert!(ball.pos.is_finite() && ball.vel.is_finite());
    }

    #[test]
    fn test_bumper_kick_and_score() {
        let config = PhysicsConfig::default();
        let mut events = EventQueue::new();
        let mut ctx = ContactContext {
            config: &config,
            events: &mut events,
        };
        let bumper = Bumper::new(Vec2::new(250.0, 180.0), 14.0);
        let mut ball = ball_at(250.0, 160.0, 0.0, 3.0);

        let score = resolve_ball_bumper(&mut ball, &bumper, &mut ctx);
        assert_eq!(score, 100);
        assert!((ball.pos.y - 156.0).abs() < 1e-4);
        // -3 reflected with e = 0.4 gives -1.2, plus the 5 unit kick upward
        assert!((ball.vel.y - -6.2).abs() < 1e-4);
        assert_eq!(events.drain().collect::<Vec<_>>(), vec![AudioCue::BumperHit]);
    }

    #[test]
    fn test_bumper_scores_without_reflection() {
        let config = PhysicsConfig::default();
        let mut events = EventQueue::new();
        let mut ctx = ContactContext {
            config: &config,
            events: &mut events,
        };
        let bumper = Bumper::new(Vec2::new(250.0, 180.0), 14.0);
        // Overlapping but already moving away
        let mut ball = ball_at(250.0, 160.0, 0.0, -2.0);

        assert_eq!(resolve_ball_bumper(&mut ball, &bumper, &mut ctx), 100);
        assert_eq!(ball.vel, Vec2::new(0.0, -2.0));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_bumper_coincident_center_is_finite() {
        let config = PhysicsConfig::default();
        let mut events = EventQueue::new();
        let mut ctx = ContactContext {
            config: &config,
            events: &mut events,
        };
        let bumper = Bumper::new(Vec2::new(60.0, 80.0), 14.0);
        let mut ball = ball_at(60.0, 80.0, 0.0, 0.0);
        resolve_ball_bumper(&mut ball, &bumper, &mut ctx);
        assert!(ball.pos.is_finite());
        assert!((ball.pos.distance(bumper.pos) - 24.0).abs() < 1e-4);
    }

    fn left_slingshot() -> Slingshot {
        Slingshot::new(Vec2::new(120.0, 590.0), Vec2::new(160.0, 660.0))
    }

    #[test]
    fn test_slingshot_front_face_kicks() {
        let config = PhysicsConfig::default();
        let mut events = EventQueue::new();
        let mut ctx = ContactContext {
            config: &config,
            events: &mut events,
        };
        let sling = left_slingshot();
        let front = sling.segment.normal;
        let mid = (sling.segment.start + sling.segment.end) * 0.5;
        let mut ball = Ball::new(mid + front * 12.0, 10.0);
        ball.vel = -front * 2.0;

        let score = resolve_ball_slingshot(&mut ball, &sling, &mut ctx);
        assert_eq!(score, 50);
        // -2 reflected to 0.8, plus the kick
        assert!((ball.vel.dot(front) - 5.8).abs() < 1e-3);
        assert_eq!(events.drain().collect::<Vec<_>>(), vec![AudioCue::BumperHit]);
    }

    #[test]
    fn test_slingshot_back_face_plain_bounce() {
        let config = PhysicsConfig::default();
        let mut events = EventQueue::new();
        let mut ctx = ContactContext {
            config: &config,
            events: &mut events,
        };
        let sling = left_slingshot();
        let front = sling.segment.normal;
        let mid = (sling.segment.start + sling.segment.end) * 0.5;
        let mut ball = Ball::new(mid - front * 12.0, 10.0);
        ball.vel = front * 2.0;

        let score = resolve_ball_slingshot(&mut ball, &sling, &mut ctx);
        assert_eq!(score, 0);
        assert!((ball.vel.dot(front) - -0.8).abs() < 1e-3);
        assert!(events.is_empty());
    }

    #[test]
    fn test_target_goes_dark_once() {
        let config = PhysicsConfig::default();
        let mut events = EventQueue::new();
        let mut ctx = ContactContext {
            config: &config,
            events: &mut events,
        };
        let mut target = Target::new(Vec2::new(200.0, 300.0), Vec2::new(100.0, 300.0));
        let mut ball = ball_at(150.0, 290.0, 0.0, 2.0);
        assert_eq!(resolve_ball_target(&mut ball, &mut target, &mut ctx), 200);
        assert!(!target.lit);

        let mut ball = ball_at(150.0, 290.0, 0.0, 2.0);
        assert_eq!(resolve_ball_target(&mut ball, &mut target, &mut ctx), 0);
        assert!(ball.vel.y < 0.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_target_graze_does_not_score() {
        let config = PhysicsConfig::default();
        let mut events = EventQueue::new();
        let mut ctx = ContactContext {
            config: &config,
            events: &mut events,
        };
        let mut target = Target::new(Vec2::new(200.0, 300.0), Vec2::new(100.0, 300.0));
        let mut ball = ball_at(150.0, 290.0, 0.0, -1.0);
        assert_eq!(resolve_ball_target(&mut ball, &mut target, &mut ctx), 0);
        assert!(target.lit);
        assert!((ball.pos.y - 285.0).abs() < 1e-4);
    }

    #[test]
    fn test_flipper_static_acts_like_wall() {
        let config = PhysicsConfig::default();
        let mut events = EventQueue::new();
        let mut ctx = ContactContext {
            config: &config,
            events: &mut events,
        };
        // Horizontal flipper, not moving
        let flipper = Flipper::new(Vec2::new(100.0, 700.0), 60.0, 0.0, -0.5, FlipperSide::Left);
        let mut ball = ball_at(130.0, 688.0, 0.0, 1.0);
        let contact = resolve_ball_flipper(&mut ball, &flipper, &mut ctx).unwrap();
        assert!(contact.reflected());
        assert!((ball.pos.y - 685.0).abs() < 1e-4);
        assert!((ball.vel.y - -0.4).abs() < 1e-4);
        // Gentle contact stays quiet
        assert!(events.is_empty());
    }

    #[test]
    fn test_flipper_flick_adds_surface_velocity() {
        let config = PhysicsConfig::default();
        let mut events = EventQueue::new();
        let mut ctx = ContactContext {
            config: &config,
            events: &mut events,
        };
        let mut flipper = Flipper::new(Vec2::new(100.0, 700.0), 60.0, 0.0, -0.5, FlipperSide::Left);
        // Swinging upward (negative ω lifts the tip in screen space)
        flipper.angular_vel = -0.3;
        let mut ball = ball_at(150.0, 688.0, 0.0, 0.0);

        let contact = resolve_ball_flipper(&mut ball, &flipper, &mut ctx).unwrap();
        assert!(contact.reflected());
        // Surface moves at (0, -15) under the ball: relative approach of -15
        assert!((contact.approach - -15.0).abs() < 1e-3);
        // 1.4 * 15 up from the reflection, plus half the surface velocity
        assert!((ball.vel.y - -28.5).abs() < 1e-3);
        assert_eq!(events.drain().collect::<Vec<_>>(), vec![AudioCue::FlipperHit]);
    }

    #[test]
    fn test_flipper_center_on_segment_uses_perpendicular() {
        let config = PhysicsConfig::default();
        let mut events = EventQueue::new();
        let mut ctx = ContactContext {
            config: &config,
            events: &mut events,
        };
        let flipper = Flipper::new(Vec2::new(100.0, 700.0), 60.0, 0.0, -0.5, FlipperSide::Left);
        let mut ball = ball_at(130.0, 700.0, 0.0, 0.0);
        let contact = resolve_ball_flipper(&mut ball, &flipper, &mut ctx).unwrap();
        assert!((contact.normal - Vec2::new(0.0, 1.0)).length() < 1e-6);
        assert!((ball.pos.y - 715.0).abs() < 1e-4);
    }

    #[test]
    fn test_arc_only_upper_half() {
        let config = PhysicsConfig::default();
        let arc = ConcaveArc::new(Vec2::new(250.0, 250.0), 240.0);

        // Below center: ignored even though outside the circle
        let mut ball = ball_at(495.0, 260.0, 1.0, 0.0);
        assert!(resolve_ball_arc(&mut ball, &arc, &config).is_none());

        // Against the roof from inside
        let mut ball = ball_at(250.0, 15.0, 0.0, -4.0);
        let contact = resolve_ball_arc(&mut ball, &arc, &config).unwrap();
        assert!((contact.penetration - 5.0).abs() < 1e-3);
        assert!((ball.pos.y - 20.0).abs() < 1e-3);
        assert!((ball.vel.y - 1.6).abs() < 1e-4);
    }

    fn plunger() -> Plunger {
        Plunger::new(Vec2::new(474.0, 800.0), 30.0, 70.0, 458.0, 490.0)
    }

    #[test]
    fn test_plunger_damps_falling_ball() {
        let p = plunger();
        let mut ball = ball_at(474.0, 725.0, 0.0, 4.0);
        assert!(resolve_ball_plunger(&mut ball, &p));
        assert_eq!(ball.pos.y, 720.0);
        assert_eq!(ball.vel.y, -2.0);
    }

    #[test]
    fn test_plunger_launches_when_releasing() {
        let mut p = plunger();
        for _ in 0..320 {
            p.update(true, 0.125);
        }
        p.update(false, 0.125);
        let mut ball = ball_at(474.0, p.top_y, 0.0, 0.0);
        assert!(resolve_ball_plunger(&mut ball, &p));
        assert!((ball.vel.y - -24.0).abs() < 1e-3);
    }

    #[test]
    fn test_plunger_ignores_ball_outside_lane() {
        let p = plunger();
        let mut ball = ball_at(300.0, 760.0, 0.0, 4.0);
        assert!(!resolve_ball_plunger(&mut ball, &p));
        assert_eq!(ball.vel.y, 4.0);
    }

    proptest! {
        #[test]
        fn prop_wall_depenetrates(
            x in -50.0f32..250.0,
            y in 470.0f32..530.0,
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
        ) {
            let config = PhysicsConfig::default();
            let wall = floor();
            let mut ball = ball_at(x, y, vx, vy);
            resolve_ball_line(&mut ball, &wall, &config);
            let dist = ball.pos.distance(wall.closest_point(ball.pos));
            prop_assert!(dist >= ball.radius + config.wall_half_thickness - 1e-3);
        }

        #[test]
        fn prop_bumper_amplifies_outward_speed(
            angle in 0.0f32..std::f32::consts::TAU,
            depth in 0.5f32..20.0,
            speed in 0.1f32..30.0,
        ) {
            let config = PhysicsConfig::default();
            let mut events = EventQueue::new();
            let mut ctx = ContactContext { config: &config, events: &mut events };
            let bumper = Bumper::new(Vec2::new(250.0, 180.0), 14.0);
            let n = Vec2::new(angle.cos(), angle.sin());
            let mut ball = Ball::new(bumper.pos + n * (24.0 - depth), 10.0);
            ball.vel = -n * speed;
            let before = ball.vel.dot(n);

            resolve_ball_bumper(&mut ball, &bumper, &mut ctx);
            let after = ball.vel.dot(n);
            prop_assert!(after > before);
            prop_assert!(after >= config.kick - 1e-3);
        }
    }

    #[test]
    fn test_trait_dispatch_matches_free_functions() {
        let config = PhysicsConfig::default();
        let mut events = EventQueue::new();
        let mut ctx = ContactContext {
            config: &config,
            events: &mut events,
        };

        let mut direct = ball_at(100.0, 490.0, 1.0, 3.0);
        let mut dispatched = direct.clone();
        resolve_ball_line(&mut direct, &floor(), &config);
        floor().resolve(&mut dispatched, &mut ctx);
        assert_eq!(direct.pos, dispatched.pos);
        assert_eq!(direct.vel, dispatched.vel);

        let mut target = Target::new(Vec2::new(0.0, 500.0), Vec2::new(200.0, 500.0));
        let mut ball = ball_at(100.0, 490.0, 0.0, 3.0);
        assert_eq!(target.resolve(&mut ball, &mut ctx), config.target_score);
        assert!(!target.lit);

        let mut plunger = Plunger::new(Vec2::new(474.0, 800.0), 30.0, 70.0, 458.0, 490.0);
        let mut ball = ball_at(474.0, 725.0, 0.0, 2.0);
        assert_eq!(plunger.resolve(&mut ball, &mut ctx), 0);
        assert_eq!(ball.pos.y, 720.0);
        assert_eq!(ball.vel.y, -1.0);
    }
}
