//! Fixed sub-step simulation tick
//!
//! One call to [`tick`] is one rendered frame: a fixed number of equal
//! sub-steps, each running the phases in the same order every time.

use super::collision::{Collide, ContactContext};
use super::entities::Ball;
use super::state::{GamePhase, GameState};
use crate::audio::{AudioCue, EventQueue};

/// Input snapshot for one frame (held for every sub-step of that frame)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left_flipper: bool,
    pub right_flipper: bool,
    /// Pull the plunger back
    pub charge: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a new game (only honoured after game over)
    pub restart: bool,
}

/// How a sub-step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstepOutcome {
    Continue,
    /// Ball drained; the rest of the frame is skipped
    Drained,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, events: &mut EventQueue) {
    if input.pause {
        state.toggle_pause();
    }
    if input.restart && state.is_game_over() {
        state.restart();
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.frame_count += 1;
    let dt = state.config.dt();
    for _ in 0..state.config.substeps {
        if substep(state, input, dt, events) == SubstepOutcome::Drained {
            break;
        }
    }
}

fn resolve_all<T: Collide>(items: &mut [T], ball: &mut Ball, ctx: &mut ContactContext<'_>) -> u64 {
    items.iter_mut().map(|item| item.resolve(ball, ctx)).sum()
}

/// One fixed sub-step: integrate, drain check, then every obstacle phase
pub fn substep(state: &mut GameState, input: &TickInput, dt: f32, events: &mut EventQueue) -> SubstepOutcome {
    let config = &state.config;
    let board = &mut state.board;
    let ball = &mut state.ball;

    ball.integrate(dt, config.gravity, config.drag);

    if ball.pos.y > board.drain_line(config.drain_margin) {
        state.lives = state.lives.saturating_sub(1);
        events.push(AudioCue::Drain);
        if state.lives > 0 {
            log::info!("Ball drained, {} lives left", state.lives);
            ball.respawn(board.launch_position);
        } else {
            log::info!("Game over with score {}", state.score);
            state.phase = GamePhase::GameOver;
            ball.park();
        }
        return SubstepOutcome::Drained;
    }

    let mut ctx = ContactContext { config, events };
    let mut score = 0;
    resolve_all(&mut board.walls, ball, &mut ctx);
    if let Some(arc) = &mut board.arc {
        if arc.in_right_half(ball.pos) {
            arc.resolve(ball, &mut ctx);
        }
    }
    score += resolve_all(&mut board.bumpers, ball, &mut ctx);
    score += resolve_all(&mut board.slingshots, ball, &mut ctx);
    score += resolve_all(&mut board.target_banks, ball, &mut ctx);

    let [left, right] = &mut board.flippers;
    left.update(input.left_flipper, config.flipper_strength, dt);
    right.update(input.right_flipper, config.flipper_strength, dt);
    resolve_all(&mut board.flippers, ball, &mut ctx);

    board.plunger.update(input.charge, dt);
    board.plunger.resolve(ball, &mut ctx);

    state.score += score;
    SubstepOutcome::Continue
}
