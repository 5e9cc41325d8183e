//! Board layout
//!
//! A `BoardDef` is the plain-data description of a table (what a layout
//! file contains). `build` validates it and produces the live `Board` the
//! simulation mutates. The set of obstacles never changes after build.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::arc::ConcaveArc;
use super::entities::{Bumper, Flipper, FlipperSide, LineSegment, Plunger, Slingshot};
use super::target_bank::TargetBank;
use crate::consts::*;

/// Reasons a layout cannot be turned into a board
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid board JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{kind} {index} has zero length")]
    ZeroLengthSegment { kind: &'static str, index: usize },
    #[error("bumper {0} must have a positive radius")]
    BadBumperRadius(usize),
    #[error("target bank {0} is empty")]
    EmptyTargetBank(usize),
    #[error("a board needs exactly two flippers, found {0}")]
    FlipperCount(usize),
    #[error("flipper {0} must have a positive finite length")]
    BadFlipperLength(usize),
    #[error("plunger lane [{0}, {1}] is empty")]
    BadLane(f32, f32),
}

/// Concave roof description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcDef {
    pub center: [f32; 2],
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipperDef {
    pub pivot: [f32; 2],
    pub length: f32,
    pub rest_angle: f32,
    pub active_angle: f32,
    pub side: FlipperSide,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlungerDef {
    /// Bottom-center of the plunger
    pub anchor: [f32; 2],
    pub width: f32,
    pub height: f32,
    /// x of the two shooter lane walls
    pub lane: [f32; 2],
}

/// Plain-data table layout; segments are `[x1, y1, x2, y2]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDef {
    pub width: f32,
    pub height: f32,
    pub launch_position: [f32; 2],
    pub walls: Vec<[f32; 4]>,
    #[serde(default)]
    pub arc: Option<ArcDef>,
    /// `[x, y, radius]`
    pub bumpers: Vec<[f32; 3]>,
    pub slingshots: Vec<[f32; 4]>,
    pub flippers: Vec<FlipperDef>,
    pub plunger: PlungerDef,
    pub target_banks: Vec<Vec<[f32; 4]>>,
}

fn v(p: [f32; 2]) -> Vec2 {
    Vec2::from_array(p)
}

fn segment_points(s: &[f32; 4]) -> (Vec2, Vec2) {
    (Vec2::new(s[0], s[1]), Vec2::new(s[2], s[3]))
}

fn check_segments(kind: &'static str, segments: &[[f32; 4]]) -> Result<(), BoardError> {
    for (index, s) in segments.iter().enumerate() {
        let (a, b) = segment_points(s);
        if a.distance_squared(b) == 0.0 {
            return Err(BoardError::ZeroLengthSegment { kind, index });
        }
    }
    Ok(())
}

impl BoardDef {
    /// The shipped 500x800 table
    pub fn classic() -> Self {
        use std::f32::consts::PI;

        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            launch_position: [LAUNCH_X, LAUNCH_Y],
            walls: vec![
                // Left wall and flat ceiling
                [10.0, 10.0, 10.0, 560.0],
                [10.0, 10.0, 420.0, 10.0],
                // Top-right bevel out of the shooter lane
                [420.0, 10.0, 490.0, 80.0],
                // Shooter lane inner and outer walls
                [458.0, 320.0, 458.0, 850.0],
                [490.0, 80.0, 490.0, 850.0],
                // Funnel toward the flippers
                [10.0, 560.0, 175.0, 740.0],
                [458.0, 560.0, 325.0, 740.0],
                // Left cove barrier
                [150.0, 360.0, 180.0, 400.0],
                [180.0, 400.0, 180.0, 460.0],
            ],
            arc: None,
            bumpers: vec![
                [60.0, 80.0, 14.0],
                // Triangle
                [220.0, 130.0, 14.0],
                [280.0, 130.0, 14.0],
                [250.0, 180.0, 14.0],
                // Left cove
                [60.0, 460.0, 14.0],
            ],
            slingshots: vec![
                [120.0, 590.0, 160.0, 660.0],
                [340.0, 660.0, 380.0, 590.0],
            ],
            flippers: vec![
                FlipperDef {
                    pivot: [175.0, 740.0],
                    length: 60.0,
                    rest_angle: 0.52,
                    active_angle: -0.52,
                    side: FlipperSide::Left,
                },
                FlipperDef {
                    pivot: [325.0, 740.0],
                    length: 60.0,
                    rest_angle: PI - 0.52,
                    active_angle: PI + 0.52,
                    side: FlipperSide::Right,
                },
            ],
            plunger: PlungerDef {
                anchor: [474.0, 800.0],
                width: 30.0,
                height: 70.0,
                lane: [458.0, 490.0],
            },
            target_banks: vec![
                // Top bank, slanted up-right
                vec![
                    [170.0, 110.0, 188.0, 98.0],
                    [192.0, 95.0, 210.0, 83.0],
                    [214.0, 80.0, 232.0, 68.0],
                ],
                // Bottom bank, slanted down-right
                vec![
                    [215.0, 200.0, 233.0, 212.0],
                    [237.0, 215.0, 255.0, 227.0],
                    [259.0, 230.0, 277.0, 242.0],
                ],
                // Left cove bank
                vec![[40.0, 330.0, 70.0, 345.0], [75.0, 347.0, 105.0, 362.0]],
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate and build the live board
    pub fn build(&self) -> Result<Board, BoardError> {
        check_segments("wall", &self.walls)?;
        check_segments("slingshot", &self.slingshots)?;
        for (i, bank) in self.target_banks.iter().enumerate() {
            if bank.is_empty() {
                return Err(BoardError::EmptyTargetBank(i));
            }
            check_segments("target", bank)?;
        }
        for (i, b) in self.bumpers.iter().enumerate() {
            if b[2] <= 0.0 {
                return Err(BoardError::BadBumperRadius(i));
            }
        }

        let [lane_left, lane_right] = self.plunger.lane;
        if lane_left >= lane_right {
            return Err(BoardError::BadLane(lane_left, lane_right));
        }

        // List order decides which button drives which flipper; `side` is a tag
        let [l, r] = self.flippers.as_slice() else {
            return Err(BoardError::FlipperCount(self.flippers.len()));
        };
        for (i, f) in self.flippers.iter().enumerate() {
            if !(f.length.is_finite() && f.length > 0.0) {
                return Err(BoardError::BadFlipperLength(i));
            }
        }
        let make_flipper = |f: &FlipperDef| Flipper::new(v(f.pivot), f.length, f.rest_angle, f.active_angle, f.side);

        let board = Board {
            width: self.width,
            height: self.height,
            launch_position: v(self.launch_position),
            walls: self
                .walls
                .iter()
                .map(|s| {
                    let (a, b) = segment_points(s);
                    LineSegment::new(a, b)
                })
                .collect(),
            arc: self.arc.as_ref().map(|a| ConcaveArc::new(v(a.center), a.radius)),
            bumpers: self
                .bumpers
                .iter()
                .map(|b| Bumper::new(Vec2::new(b[0], b[1]), b[2]))
                .collect(),
            slingshots: self
                .slingshots
                .iter()
                .map(|s| {
                    let (a, b) = segment_points(s);
                    Slingshot::new(a, b)
                })
                .collect(),
            target_banks: self
                .target_banks
                .iter()
                .map(|bank| TargetBank::from_segments(bank.iter().map(segment_points)))
                .collect(),
            flippers: [make_flipper(l), make_flipper(r)],
            plunger: Plunger::new(
                v(self.plunger.anchor),
                self.plunger.width,
                self.plunger.height,
                lane_left,
                lane_right,
            ),
        };

        log::debug!(
            "Built board: {} walls, {} bumpers, {} slingshots, {} target banks",
            board.walls.len(),
            board.bumpers.len(),
            board.slingshots.len(),
            board.target_banks.len()
        );
        Ok(board)
    }
}

impl Default for BoardDef {
    fn default() -> Self {
        Self::classic()
    }
}

/// Live table: fixed obstacle set with per-entity dynamic state
#[derive(Debug, Clone)]
pub struct Board {
    pub width: f32,
    pub height: f32,
    pub launch_position: Vec2,
    pub walls: Vec<LineSegment>,
    pub arc: Option<ConcaveArc>,
    pub bumpers: Vec<Bumper>,
    pub slingshots: Vec<Slingshot>,
    pub target_banks: Vec<TargetBank>,
    /// Driven by the left and right buttons, in that order
    pub flippers: [Flipper; 2],
    pub plunger: Plunger,
}

impl Board {
    /// y below which the ball counts as drained
    #[inline]
    pub fn drain_line(&self, margin: f32) -> f32 {
        self.height + margin
    }
}
