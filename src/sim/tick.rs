//! Fixed timestep simulation tick
//!
//! Advances the world by exactly one discrete step. Order per tick: rotation
//! angles (unless paused), serve, zone rules in table order, boundary settle,
//! Euler integration (unless paused), stage wall clamps. Zone rules run on
//! the pre-integration position every tick, pause or not; tunneling through
//! a thin zone between ticks is accepted behavior.

use crate::consts::*;

use super::rng::Chooser;
use super::round;
use super::rules;
use super::state::SimState;

/// One discrete simulation step
pub fn tick(state: &mut SimState, rng: &mut dyn Chooser) {
    if !state.paused {
        state.round.fan_angle += FAN_SPIN;
        if state.round.fan_angle > 360.0 {
            state.round.fan_angle -= 360.0;
        }
        state.round.barrier_angle += BARRIER_SPIN;
        if state.round.barrier_angle > 360.0 {
            state.round.barrier_angle -= 360.0;
        }
    }

    round::serve(state, rng);

    for rule in rules::ZONE_RULES {
        (rule.apply)(state, rng);
    }

    round::settle(state);

    if !state.paused {
        let vel = state.ball.vel;
        state.ball.pos += vel;
    }

    rules::clamp_to_stage(state);
}
