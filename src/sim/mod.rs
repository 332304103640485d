//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected choice source only (no ambient randomness)
//! - No rendering or platform dependencies

pub mod rng;
pub mod round;
pub mod rules;
pub mod stage;
pub mod state;
pub mod tick;

pub use rng::{Chooser, GameRng};
pub use stage::{FanZone, SideWall, StageGeometry};
pub use state::{Ball, Paddle, SimState, Snapshot, Stage, Tilt};
pub use tick::tick;
