//! Read-only view for renderers and the HUD
//!
//! A snapshot is an owned copy taken between frames, so drawing code can
//! never reach back into the live simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arc::ConcaveArc;
use super::entities::{FlipperSide, PlungerState};
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentView {
    pub start: Vec2,
    pub end: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BumperView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub start: Vec2,
    pub end: Vec2,
    pub lit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipperView {
    pub pivot: Vec2,
    pub tip: Vec2,
    pub angle: f32,
    pub side: FlipperSide,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlungerView {
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub state: PlungerState,
}

/// Everything a frame needs to draw the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    pub ball: BallView,
    pub walls: Vec<SegmentView>,
    pub arc: Option<ConcaveArc>,
    pub bumpers: Vec<BumperView>,
    pub slingshots: Vec<SegmentView>,
    /// Grouped by bank
    pub target_banks: Vec<Vec<TargetView>>,
    pub flippers: Vec<FlipperView>,
    pub plunger: PlungerView,
    pub score: u64,
    pub lives: u8,
    pub paused: bool,
    pub game_over: bool,
}

impl GameState {
    /// Copy out the drawable state
    pub fn snapshot(&self) -> Snapshot {
        let board = &self.board;
        Snapshot {
            width: board.width,
            height: board.height,
            ball: BallView {
                pos: self.ball.pos,
                radius: self.ball.radius,
            },
            walls: board
                .walls
                .iter()
                .map(|w| SegmentView {
                    start: w.start,
                    end: w.end,
                })
                .collect(),
            arc: board.arc,
            bumpers: board
                .bumpers
                .iter()
                .map(|b| BumperView {
                    pos: b.pos,
                    radius: b.radius,
                })
                .collect(),
            slingshots: board
                .slingshots
                .iter()
                .map(|s| SegmentView {
                    start: s.segment.start,
                    end: s.segment.end,
                })
                .collect(),
            target_banks: board
                .target_banks
                .iter()
                .map(|bank| {
                    bank.targets
                        .iter()
                        .map(|t| TargetView {
                            start: t.segment.start,
                            end: t.segment.end,
                            lit: t.lit,
                        })
                        .collect()
                })
                .collect(),
            flippers: board
                .flippers
                .iter()
                .map(|f| FlipperView {
                    pivot: f.pivot,
                    tip: f.tip,
                    angle: f.angle,
                    side: f.side,
                })
                .collect(),
            plunger: PlungerView {
                x: board.plunger.anchor.x,
                y: board.plunger.top_y,
                width: board.plunger.width,
                height: board.plunger.height,
                state: board.plunger.state,
            },
            score: self.score,
            lives: self.lives,
            paused: self.phase == GamePhase::Paused,
            game_over: self.phase == GamePhase::GameOver,
        }
    }
}
