//! Simulation state and input operations
//!
//! Everything the renderer reads and the input callbacks mutate lives here.
//! Input operations are plain methods: the host environment serializes them
//! against ticks, so they take effect on the next tick with no queuing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::stage::{self, StageGeometry};

/// Active arena layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stage {
    /// Rotating midline barrier plus a fan on each side
    #[default]
    One,
    /// Central fan plus rectangular side-wall segments
    Two,
}

impl Stage {
    /// The stage played after the next round reset
    pub fn other(self) -> Self {
        match self {
            Stage::One => Stage::Two,
            Stage::Two => Stage::One,
        }
    }

    /// Geometry constants for this stage
    pub fn geometry(self) -> &'static StageGeometry {
        match self {
            Stage::One => &stage::STAGE_ONE,
            Stage::Two => &stage::STAGE_TWO,
        }
    }

    /// Stage number for status lines
    pub fn number(self) -> u8 {
        match self {
            Stage::One => 1,
            Stage::Two => 2,
        }
    }
}

/// Paddle tilt, named for the bias it puts on the outgoing horizontal speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tilt {
    /// Contact forces the horizontal speed non-negative
    Positive,
    #[default]
    Neutral,
    /// Contact forces the horizontal speed non-positive
    Negative,
}

/// The ball
///
/// Velocity components are either 0 or drawn from the small discrete set the
/// collision rules produce (serve ±0.15, kick ±0.12, boosts in ±0.01 steps).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// One player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Paddle {
    /// Horizontal position, kept inside ±PADDLE_TRAVEL
    pub x: f32,
    pub tilt: Tilt,
}

impl Paddle {
    /// Slide by `delta`, staying inside the travel limits
    pub fn slide(&mut self, delta: f32) {
        self.x = (self.x + delta).clamp(-PADDLE_TRAVEL, PADDLE_TRAVEL);
    }
}

/// Scores, round-control flags and the rotation angles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub score_one: u32,
    pub score_two: u32,
    /// Fan-boost counter, reported in the status line; never read by physics
    pub level: u32,
    /// Horizontal speed banked by a paddle absorb, reused by the next
    /// zero-speed recovery. Reset only at round end.
    pub stored_vx: f32,
    /// Set on the serve tick, cleared when the ball leaves the arena
    pub rally_started: bool,
    /// Barrier rotation in degrees, wraps above 360
    pub barrier_angle: f32,
    /// Fan blade spin in degrees, wraps above 360; cosmetic
    pub fan_angle: f32,
}

/// Complete simulation state, one owned instance per running match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub ball: Ball,
    pub bottom: Paddle,
    pub top: Paddle,
    pub round: RoundState,
    pub stage: Stage,
    pub paused: bool,
}

impl SimState {
    pub fn new() -> Self {
        Self::default()
    }

    // Input operations, called by the host between ticks.

    /// Move the bottom paddle (keyboard, ±PADDLE_STEP per press)
    pub fn move_bottom(&mut self, delta: f32) {
        self.bottom.slide(delta);
    }

    /// Move the top paddle (pointer, ±TOP_PADDLE_STEP per unit of motion)
    pub fn move_top(&mut self, delta: f32) {
        self.top.slide(delta);
    }

    pub fn set_bottom_tilt(&mut self, tilt: Tilt) {
        self.bottom.tilt = tilt;
    }

    pub fn set_top_tilt(&mut self, tilt: Tilt) {
        self.top.tilt = tilt;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Swap the active stage in place; nothing else is reset
    pub fn toggle_stage(&mut self) {
        self.stage = self.stage.other();
    }

    /// Push both speed components one step further from zero.
    /// A stopped vertical component falls through to the downward branch;
    /// a stopped horizontal component is left alone.
    pub fn trim_speed_up(&mut self) {
        let v = self.ball.vel;
        if v.x > 0.0 {
            self.ball.vel.x = v.x + SPEED_STEP;
        } else if v.x < 0.0 {
            self.ball.vel.x = v.x - SPEED_STEP;
        }
        if v.y > 0.0 {
            self.ball.vel.y = v.y + SPEED_STEP;
        } else {
            self.ball.vel.y = v.y - SPEED_STEP;
        }
    }

    /// Pull both speed components one step back toward zero (and through it)
    pub fn trim_speed_down(&mut self) {
        let v = self.ball.vel;
        if v.x > 0.0 {
            self.ball.vel.x = v.x - SPEED_STEP;
        } else if v.x < 0.0 {
            self.ball.vel.x = v.x + SPEED_STEP;
        }
        if v.y > 0.0 {
            self.ball.vel.y = v.y - SPEED_STEP;
        } else {
            self.ball.vel.y = v.y + SPEED_STEP;
        }
    }

    /// Read-only copy for the renderer and host
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ball_pos: self.ball.pos,
            bottom_x: self.bottom.x,
            bottom_tilt: self.bottom.tilt,
            top_x: self.top.x,
            top_tilt: self.top.tilt,
            stage: self.stage,
            barrier_angle: self.round.barrier_angle,
            fan_angle: self.round.fan_angle,
            paused: self.paused,
            score_one: self.round.score_one,
            score_two: self.round.score_two,
            level: self.round.level,
        }
    }
}

/// What the renderer needs each tick, decoupled from the live state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ball_pos: Vec2,
    pub bottom_x: f32,
    pub bottom_tilt: Tilt,
    pub top_x: f32,
    pub top_tilt: Tilt,
    pub stage: Stage,
    pub barrier_angle: f32,
    pub fan_angle: f32,
    pub paused: bool,
    pub score_one: u32,
    pub score_two: u32,
    pub level: u32,
}
