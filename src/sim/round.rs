//! Round lifecycle: serve, exit detection, reset, stage swap

use glam::Vec2;

use crate::consts::*;

use super::rng::Chooser;
use super::state::SimState;

/// First tick after a reset: restore the barrier, stop the ball horizontally
/// and serve it vertically with a random sign. Runs even while paused; the
/// rally flag keeps it a one-shot.
pub(crate) fn serve(state: &mut SimState, rng: &mut dyn Chooser) {
    if !state.round.rally_started {
        state.round.barrier_angle = SERVE_BARRIER_ANGLE;
        state.ball.vel.x = 0.0;
        state.ball.vel.y = if rng.coin() { SERVE_SPEED } else { -SERVE_SPEED };
    }
    state.round.rally_started = true;
}

/// Detect an out-of-bounds ball and run the reset: exactly one score
/// increment, ball to the incoming stage's serve spot, paddles centered,
/// match paused, stage swapped. Velocities are left for the next serve to
/// overwrite.
pub(crate) fn settle(state: &mut SimState) {
    let y = state.ball.pos.y;
    if y <= EXIT_Y && y >= -EXIT_Y {
        return;
    }

    if y > EXIT_Y {
        state.round.score_two += 1;
    } else {
        state.round.score_one += 1;
    }

    let next = state.stage.other();
    state.ball.pos = Vec2::new(0.0, next.geometry().serve_y);
    state.round.rally_started = false;
    state.bottom.x = 0.0;
    state.top.x = 0.0;

    log::info!(
        "round over: player one {} -- player two {}, final speed ({:.2}, {:.2}), level {}, stage {}",
        state.round.score_one,
        state.round.score_two,
        state.ball.vel.x,
        state.ball.vel.y,
        state.round.level,
        state.stage.number(),
    );

    state.round.level = 0;
    state.round.stored_vx = 0.0;
    state.paused = true;
    state.stage = next;
}
