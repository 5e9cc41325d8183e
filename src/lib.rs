//! Neon Pinball - physics and collision core for an arcade pinball table
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, collisions, game state)
//! - `audio`: Audio-trigger events emitted by the simulation
//! - `settings`: Data-driven physics tuning
//! - `attract`: Seeded self-playing input for demos and soak runs

pub mod attract;
pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{AudioCue, AudioSink, EventQueue};
pub use settings::PhysicsConfig;

/// Game configuration constants
pub mod consts {
    /// Physics sub-steps per rendered frame
    pub const SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 500.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;
    /// Ball is drained once it falls this far below the playfield
    pub const DRAIN_MARGIN: f32 = 100.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const LAUNCH_X: f32 = 474.0;
    pub const LAUNCH_Y: f32 = 600.0;
    /// Where the ball waits after the last life is lost
    pub const PARKED_X: f32 = -1000.0;
    pub const PARKED_Y: f32 = -1000.0;

    /// Walls, slingshots, targets and flippers are drawn 10 units thick
    pub const WALL_HALF_THICKNESS: f32 = 5.0;

    /// Plunger travel
    pub const PLUNGER_MAX_DISPLACEMENT: f32 = 80.0;
    /// Displacement gained per unit of time while charging
    pub const PLUNGER_CHARGE_RATE: f32 = 2.0;
    pub const PLUNGER_LAUNCH_FACTOR: f32 = 0.3;
    pub const PLUNGER_MIN_LAUNCH: f32 = 5.0;
    /// Ball vertical speed multiplier when it lands on a resting plunger
    pub const PLUNGER_DAMPING: f32 = -0.5;

    pub const STARTING_LIVES: u8 = 3;
}
