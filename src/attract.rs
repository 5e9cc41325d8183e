//! Attract mode - the table plays itself
//!
//! Produces one `TickInput` per frame from the current state. Seeded, so a
//! given seed always replays the same game.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Flipper, GameState, PlungerState, TickInput};

/// How close (beyond its length) the ball must be before a flipper fires
const FLIP_REACH: f32 = 25.0;
/// Frames to wait on the game-over screen before starting again
const RESTART_DELAY: u32 = 120;

/// Seeded input generator
#[derive(Debug, Clone)]
pub struct AttractMode {
    rng: Pcg32,
    /// Frames left to hold the plunger
    charge_frames: u32,
    /// Frames left to hold each flipper after firing
    hold: [u32; 2],
    game_over_frames: u32,
}

impl AttractMode {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            charge_frames: 0,
            hold: [0; 2],
            game_over_frames: 0,
        }
    }

    /// Decide this frame's input
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();

        if state.is_game_over() {
            self.game_over_frames += 1;
            if self.game_over_frames >= RESTART_DELAY {
                self.game_over_frames = 0;
                input.restart = true;
            }
            return input;
        }

        // Plunger: wait for the ball to settle, then pull back a random amount
        let plunger = &state.board.plunger;
        let ball = &state.ball;
        let resting_on_plunger = plunger.in_lane(ball.pos.x)
            && (ball.pos.y + ball.radius - plunger.top_y).abs() < 1.0
            && ball.vel.length() < 0.5;
        if self.charge_frames > 0 {
            self.charge_frames -= 1;
            input.charge = true;
        } else if resting_on_plunger && plunger.state == PlungerState::Resting {
            self.charge_frames = self.rng.random_range(15..=45);
            log::debug!("Attract mode charging plunger for {} frames", self.charge_frames);
            input.charge = true;
        }

        // Flippers: fire when the ball drops within reach, sometimes late
        for (i, flipper) in state.board.flippers.iter().enumerate() {
            if self.hold[i] > 0 {
                self.hold[i] -= 1;
            } else if ball_in_reach(flipper, state) && self.rng.random_bool(0.8) {
                self.hold[i] = self.rng.random_range(6..=14);
            }
        }
        input.left_flipper = self.hold[0] > 0;
        input.right_flipper = self.hold[1] > 0;
        input
    }
}

fn ball_in_reach(flipper: &Flipper, state: &GameState) -> bool {
    let ball = &state.ball;
    ball.vel.y > 0.0 && ball.pos.distance(flipper.pivot) < flipper.length + FLIP_REACH
}
