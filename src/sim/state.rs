//! Game state and core simulation types
//!
//! The single aggregate the step function writes: ball, board, score,
//! lives and phase. Renderers read it through `snapshot()` between frames.

use serde::{Deserialize, Serialize};

use super::board::{Board, BoardDef, BoardError};
use super::entities::Ball;
use crate::settings::PhysicsConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation running
    Playing,
    /// Frames are skipped until unpaused
    Paused,
    /// Lives exhausted; waits for a restart
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub ball: Ball,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// Frames simulated since start (paused and game-over frames excluded)
    pub frame_count: u64,
    pub config: PhysicsConfig,
}

impl GameState {
    /// Start a game on a built board with the ball at the launch position
    pub fn new(board: Board, config: PhysicsConfig) -> Self {
        let ball = Ball::new(board.launch_position, config.ball_radius);
        Self {
            lives: config.starting_lives,
            board,
            ball,
            score: 0,
            phase: GamePhase::Playing,
            frame_count: 0,
            config,
        }
    }

    /// Start a game on the shipped table
    pub fn classic(config: PhysicsConfig) -> Result<Self, BoardError> {
        Ok(Self::new(BoardDef::classic().build()?, config))
    }

    /// Reset score, lives, ball and targets for a new game
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.phase = GamePhase::Playing;
        self.ball.respawn(self.board.launch_position);
        for bank in &mut self.board.target_banks {
            bank.reset();
        }
        log::info!("New game started with {} lives", self.lives);
    }

    /// Toggle between Playing and Paused (no effect on game over)
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }
}
