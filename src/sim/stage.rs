//! Static per-stage geometry
//!
//! Pure data lookup keyed by the active stage; the rules in `rules.rs`
//! consume these constants. Distances are arena units, the same frame the
//! renderer draws in.

use crate::consts::DEFAULT_KICK;

/// A fan zone sitting on the horizontal midline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanZone {
    /// Zone center on the x axis
    pub center_x: f32,
    /// Sensing half-width
    pub half_width: f32,
    /// Bounce-back guard half-width around the centerline
    pub inner_half_width: f32,
    /// Kick magnitude for a stopped ball when nothing is remembered.
    /// Only the stage-two center fan can start a dead ball by itself.
    pub idle_kick: Option<f32>,
}

/// Rotating barrier extents (stage one)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barrier {
    /// Horizontal reach of the spinning plank
    pub half_span: f32,
}

/// Side wall segments (stage two). The segments cover |y| >= gap_half_height
/// on both sides; the midline gap wraps the ball to the far side instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideWall {
    /// Wall x position, mirrored on both sides
    pub x: f32,
    /// Half-height of the midline gap between the segments
    pub gap_half_height: f32,
    /// Inward offset applied when wrapping through the gap
    pub nudge: f32,
}

/// Everything geometric that differs between the two stages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageGeometry {
    /// Fan zones in evaluation order
    pub fans: &'static [FanZone],
    pub barrier: Option<Barrier>,
    /// Hard bound reflecting horizontal speed (stage one)
    pub side_bound: Option<f32>,
    pub wall: Option<SideWall>,
    /// Ball y position at serve
    pub serve_y: f32,
}

pub static STAGE_ONE: StageGeometry = StageGeometry {
    fans: &[
        FanZone {
            center_x: 6.8,
            half_width: 1.4,
            inner_half_width: 0.5,
            idle_kick: None,
        },
        FanZone {
            center_x: -6.8,
            half_width: 1.4,
            inner_half_width: 0.5,
            idle_kick: None,
        },
    ],
    barrier: Some(Barrier { half_span: 14.0 }),
    side_bound: Some(9.4),
    wall: None,
    serve_y: 0.1,
};

pub static STAGE_TWO: StageGeometry = StageGeometry {
    fans: &[FanZone {
        center_x: 0.0,
        half_width: 2.5,
        inner_half_width: 1.0,
        idle_kick: Some(DEFAULT_KICK),
    }],
    barrier: None,
    side_bound: None,
    wall: Some(SideWall {
        x: 9.8,
        gap_half_height: 4.5,
        nudge: 0.1,
    }),
    serve_y: 0.0,
};
