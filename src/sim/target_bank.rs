//! Target banks
//!
//! A bank owns a row of targets. Knocking every target dark awards the
//! completion bonus and relights the whole bank in the same update, so a
//! fully dark bank is never observable from outside.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Collide, ContactContext};
use super::entities::{Ball, Target};

/// Ordered group of targets sharing a completion bonus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetBank {
    pub targets: Vec<Target>,
}

impl TargetBank {
    pub fn new(targets: Vec<Target>) -> Self {
        Self { targets }
    }

    /// Build from `(start, end)` pairs
    pub fn from_segments(segments: impl IntoIterator<Item = (Vec2, Vec2)>) -> Self {
        Self::new(segments.into_iter().map(|(a, b)| Target::new(a, b)).collect())
    }

    /// Resolve the ball against every target, then check for completion
    pub fn update(&mut self, ball: &mut Ball, ctx: &mut ContactContext<'_>) -> u64 {
        let mut score = 0;
        for target in &mut self.targets {
            score += target.resolve(ball, ctx);
        }

        if self.targets.iter().all(|t| !t.lit) {
            log::debug!("Target bank of {} complete", self.targets.len());
            score += ctx.config.bank_bonus;
            self.reset();
        }
        score
    }

    /// Relight every target
    pub fn reset(&mut self) {
        for target in &mut self.targets {
            target.lit = true;
        }
    }

    pub fn lit_count(&self) -> usize {
        self.targets.iter().filter(|t| t.lit).count()
    }
}

impl Collide for TargetBank {
    fn resolve(&mut self, ball: &mut Ball, ctx: &mut ContactContext<'_>) -> u64 {
        self.update(ball, ctx)
    }
}
