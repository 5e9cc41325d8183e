//! Deterministic simulation module
//!
//! All table physics lives here. This module must be pure and deterministic:
//! - Fixed sub-steps only
//! - Fixed phase order within a sub-step, list order within a phase
//! - Inputs arrive as an explicit snapshot
//! - No rendering, audio or platform dependencies

pub mod arc;
pub mod board;
pub mod collision;
pub mod entities;
pub mod geometry;
pub mod snapshot;
pub mod state;
pub mod target_bank;
pub mod tick;

pub use arc::ConcaveArc;
pub use board::{Board, BoardDef, BoardError};
pub use collision::{
    Collide, Contact, ContactContext, resolve_ball_arc, resolve_ball_bumper, resolve_ball_flipper,
    resolve_ball_line, resolve_ball_plunger, resolve_ball_slingshot, resolve_ball_target,
};
pub use entities::{Ball, Bumper, Flipper, FlipperSide, LineSegment, Plunger, PlungerState, Slingshot, Target};
pub use geometry::closest_point_on_segment;
pub use snapshot::Snapshot;
pub use state::{GamePhase, GameState};
pub use target_bank::TargetBank;
pub use tick::{SubstepOutcome, TickInput, substep, tick};
