//! Per-tick collision rules
//!
//! The resolver is an ordered table of predicate+response rules. Every rule
//! is evaluated on every tick, in table order, against the pre-integration
//! ball position; stage gating happens inside each predicate. Some branches
//! deliberately test a stale copy of a value mutated moments earlier; that
//! asymmetry is part of the game feel and must not be "fixed".

use crate::consts::*;

use super::rng::Chooser;
use super::stage::FanZone;
use super::state::{SimState, Tilt};

/// One entry of the resolver table
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&mut SimState, &mut dyn Chooser),
}

/// Zone rules in their fixed evaluation order
pub const ZONE_RULES: &[Rule] = &[
    Rule {
        name: "fans",
        apply: fan_contact,
    },
    Rule {
        name: "barrier",
        apply: barrier_contact,
    },
    Rule {
        name: "paddle-bottom",
        apply: bottom_paddle_contact,
    },
    Rule {
        name: "paddle-top",
        apply: top_paddle_contact,
    },
];

/// Fan zones sit on the horizontal midline and only sense a ball within
/// ±MIDLINE_BAND of it.
fn fan_contact(state: &mut SimState, rng: &mut dyn Chooser) {
    let fans = state.stage.geometry().fans;
    for fan in fans {
        let pos = state.ball.pos;
        if (pos.x - fan.center_x).abs() <= fan.half_width
            && pos.y < MIDLINE_BAND
            && pos.y > -MIDLINE_BAND
        {
            log::trace!("fan at x={} caught the ball", fan.center_x);
            fan_response(state, rng, fan);
        }
    }
}

/// Randomized fan decision tree, first satisfied branch wins:
/// 1. a stopped ball recovers the remembered speed with a coin-flipped sign
///    (the center fan alone falls back to a fixed kick when nothing is
///    remembered),
/// 2. else a coin flip reverses the horizontal speed,
/// 3. else both components get a boost along their current signs and the
///    level counter ticks up.
///
/// Branches 1 and 3 are followed by a bounce-back negate of the live
/// horizontal speed when the ball sits inside the narrow guard band around
/// the fan's centerline; the flip branch is exempt.
fn fan_response(state: &mut SimState, rng: &mut dyn Chooser, fan: &FanZone) {
    let v = state.ball.vel;
    let stored = state.round.stored_vx;
    let mut flipped = false;

    if v.x == 0.0 {
        match fan.idle_kick {
            Some(kick) if stored == 0.0 => {
                state.ball.vel.x = if rng.coin() { -kick } else { kick };
            }
            _ => {
                state.ball.vel.x = if rng.coin() { stored } else { -stored };
            }
        }
    } else if rng.coin() {
        state.ball.vel.x = -v.x;
        flipped = true;
    } else if v.y < 0.0 && v.x < 0.0 {
        state.ball.vel.x = v.x - SPEED_STEP;
        state.ball.vel.y = v.y - SPEED_STEP;
        state.round.level += 1;
    } else if v.y > 0.0 && v.x < 0.0 {
        state.ball.vel.x = v.x - SPEED_STEP;
        state.ball.vel.y = v.y + SPEED_STEP;
        state.round.level += 1;
    } else if v.y > 0.0 && v.x > 0.0 {
        state.ball.vel.x = v.x + SPEED_STEP;
        state.ball.vel.y = v.y + SPEED_STEP;
        state.round.level += 1;
    } else if v.y < 0.0 && v.x > 0.0 {
        state.ball.vel.x = v.x + SPEED_STEP;
        state.ball.vel.y = v.y - SPEED_STEP;
        state.round.level += 1;
    }

    if !flipped && (state.ball.pos.x - fan.center_x).abs() <= fan.inner_half_width {
        state.ball.vel.x = -state.ball.vel.x;
    }
}

/// The rotating barrier blocks the midline while its angle passes through
/// one of six 50°-wide windows around 0° and 180°. The wrapped angle stays
/// in (0, 360], but the negative aliases are checked all the same.
fn barrier_contact(state: &mut SimState, rng: &mut dyn Chooser) {
    let Some(barrier) = &state.stage.geometry().barrier else {
        return;
    };
    let pos = state.ball.pos;
    if pos.x <= barrier.half_span
        && pos.x >= -barrier.half_span
        && pos.y < MIDLINE_BAND
        && pos.y > -MIDLINE_BAND
        && angle_blocks(state.round.barrier_angle)
    {
        log::trace!("barrier blocked at angle {}", state.round.barrier_angle);
        state.ball.vel.y = -state.ball.vel.y;
        let stored = state.round.stored_vx;
        if state.ball.vel.x == 0.0 {
            if stored == 0.0 {
                state.ball.vel.x = if rng.coin() { DEFAULT_KICK } else { -DEFAULT_KICK };
            } else if rng.coin() {
                state.ball.vel.x = stored;
            } else {
                state.ball.vel.x = -stored;
            }
        } else if rng.coin() {
            state.ball.vel.x = -state.ball.vel.x;
        }
    }
}

/// True while the barrier angle lies inside a blocking window
pub(crate) fn angle_blocks(angle: f32) -> bool {
    (335.0..=360.0).contains(&angle)
        || (0.0..=25.0).contains(&angle)
        || (-360.0..=-335.0).contains(&angle)
        || (-25.0..=0.0).contains(&angle)
        || (155.0..=205.0).contains(&angle)
        || (-205.0..=-155.0).contains(&angle)
}

#[derive(Clone, Copy)]
enum PaddleEnd {
    Bottom,
    Top,
}

fn bottom_paddle_contact(state: &mut SimState, rng: &mut dyn Chooser) {
    paddle_contact(state, rng, PaddleEnd::Bottom);
}

fn top_paddle_contact(state: &mut SimState, rng: &mut dyn Chooser) {
    paddle_contact(state, rng, PaddleEnd::Top);
}

/// Paddle contact: the tilt decides the horizontal response, the vertical
/// speed always reverses away from the paddle.
fn paddle_contact(state: &mut SimState, rng: &mut dyn Chooser, end: PaddleEnd) {
    let pos = state.ball.pos;
    let (paddle_x, tilt, in_band) = match end {
        PaddleEnd::Bottom => (
            state.bottom.x,
            state.bottom.tilt,
            pos.y < -CONTACT_NEAR && pos.y > -CONTACT_FAR,
        ),
        PaddleEnd::Top => (
            state.top.x,
            state.top.tilt,
            pos.y > CONTACT_NEAR && pos.y < CONTACT_FAR,
        ),
    };
    if !in_band || (pos.x - paddle_x).abs() > PADDLE_HALF_WIDTH {
        return;
    }

    // The three-way draw is consumed on every contact, even when the tilt
    // branch taken never looks at it.
    let draw = rng.choose(3);
    match tilt {
        Tilt::Positive => force_sign(state, 1.0),
        Tilt::Negative => force_sign(state, -1.0),
        Tilt::Neutral => neutral_response(state, draw),
    }
    state.ball.vel.y = -state.ball.vel.y;
}

/// Tilted paddle: force the outgoing horizontal speed to carry `sign`.
/// A stopped ball is kicked with the remembered magnitude, or the default
/// when nothing is remembered.
fn force_sign(state: &mut SimState, sign: f32) {
    let vx = state.ball.vel.x;
    let stored = state.round.stored_vx;
    if vx * sign > 0.0 {
        // already headed the right way
    } else if vx * sign < 0.0 {
        state.ball.vel.x = -vx;
    } else if stored == 0.0 {
        state.ball.vel.x = sign * DEFAULT_KICK;
    } else {
        state.ball.vel.x = sign * stored.abs();
    }
}

/// Neutral paddle: the draw picks reverse (0), absorb (1) or pass-through
/// (2). A stopped ball instead uses the draw to pick a kick direction, with
/// the third outcome leaving it stopped.
fn neutral_response(state: &mut SimState, draw: u32) {
    let vx = state.ball.vel.x;
    let stored = state.round.stored_vx;
    if vx == 0.0 {
        if draw == 0 {
            state.ball.vel.x = if stored == 0.0 { -DEFAULT_KICK } else { -stored.abs() };
        } else if draw == 1 {
            state.ball.vel.x = if stored == 0.0 { DEFAULT_KICK } else { stored.abs() };
        }
    } else if draw == 0 {
        state.ball.vel.x = -vx;
    } else if draw == 1 {
        state.round.stored_vx = vx;
        state.ball.vel.x = 0.0;
    }
}

/// Post-integration wall handling. Stage one reflects horizontal speed at
/// its side bound; stage two wraps a ball through the midline gap to the
/// far side and reflects it off the wall segments elsewhere.
pub fn clamp_to_stage(state: &mut SimState) {
    let geometry = state.stage.geometry();
    if let Some(wall) = &geometry.wall {
        let pos = state.ball.pos;
        if pos.x < -wall.x && pos.y > -wall.gap_half_height && pos.y < wall.gap_half_height {
            state.ball.pos.x = -pos.x - wall.nudge;
        } else if pos.x > wall.x && pos.y > -wall.gap_half_height && pos.y < wall.gap_half_height {
            state.ball.pos.x = -pos.x + wall.nudge;
        } else if pos.y <= -wall.gap_half_height || pos.y >= wall.gap_half_height {
            if pos.x > wall.x {
                state.ball.vel.x = -state.ball.vel.x;
            }
            if pos.x < -wall.x {
                state.ball.vel.x = -state.ball.vel.x;
            }
        }
    }
    if let Some(bound) = geometry.side_bound {
        let x = state.ball.pos.x;
        if x > bound {
            state.ball.vel.x = -state.ball.vel.x;
        }
        if x < -bound {
            state.ball.vel.x = -state.ball.vel.x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedChooser;
    use crate::sim::state::Stage;
    use glam::Vec2;
    use proptest::prelude::*;

    fn state_with(stage: Stage, pos: (f32, f32), vel: (f32, f32)) -> SimState {
        let mut state = SimState::new();
        state.stage = stage;
        state.ball.pos = Vec2::new(pos.0, pos.1);
        state.ball.vel = Vec2::new(vel.0, vel.1);
        state.round.rally_started = true;
        state
    }

    #[test]
    fn zone_rules_keep_their_evaluation_order() {
        let names: Vec<_> = ZONE_RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(names, ["fans", "barrier", "paddle-bottom", "paddle-top"]);
    }

    #[test]
    fn right_fan_flip_branch_reverses_horizontal() {
        let mut state = state_with(Stage::One, (6.8, 0.0), (-0.10, -0.05));
        let mut rng = ScriptedChooser::new(&[0]);
        fan_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(0.10, -0.05));
        assert_eq!(state.round.level, 0);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn right_fan_boost_follows_the_sign_pair_and_bounces_back() {
        let mut state = state_with(Stage::One, (6.8, 0.0), (-0.10, -0.05));
        let mut rng = ScriptedChooser::new(&[1]);
        fan_contact(&mut state, &mut rng);
        // boost to (-0.11, -0.06), then the guard band negates the live x
        assert!((state.ball.vel.x - 0.11).abs() < 1e-6);
        assert!((state.ball.vel.y + 0.06).abs() < 1e-6);
        assert_eq!(state.round.level, 1);
    }

    #[test]
    fn fan_recovers_remembered_speed_for_a_stopped_ball() {
        let mut state = state_with(Stage::One, (7.5, 0.0), (0.0, 0.05));
        state.round.stored_vx = 0.2;
        let mut rng = ScriptedChooser::new(&[0]);
        fan_contact(&mut state, &mut rng);
        // outside the guard band, so the recovered speed keeps its coin sign
        assert_eq!(state.ball.vel, Vec2::new(0.2, 0.05));
    }

    #[test]
    fn fan_guard_band_negates_a_fresh_recovery() {
        let mut state = state_with(Stage::One, (6.9, 0.0), (0.0, 0.05));
        state.round.stored_vx = 0.2;
        let mut rng = ScriptedChooser::new(&[0]);
        fan_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(-0.2, 0.05));
    }

    #[test]
    fn side_fan_cannot_start_a_dead_ball() {
        let mut state = state_with(Stage::One, (6.8, 0.0), (0.0, 0.1));
        let mut rng = ScriptedChooser::new(&[0]);
        fan_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel.x, 0.0);
    }

    #[test]
    fn center_fan_kicks_a_dead_ball_with_nothing_remembered() {
        for (outcome, expected) in [(0u32, -0.12f32), (1, 0.12)] {
            let mut state = state_with(Stage::Two, (2.0, 0.05), (0.0, -0.15));
            let mut rng = ScriptedChooser::new(&[outcome]);
            fan_contact(&mut state, &mut rng);
            assert_eq!(state.ball.vel, Vec2::new(expected, -0.15));
        }
    }

    proptest! {
        #[test]
        fn side_fans_respond_identically_for_equal_velocities(
            dx in -1.4f32..1.4,
            vx in prop::sample::select(vec![-0.12f32, -0.01, 0.0, 0.01, 0.12]),
            vy in prop::sample::select(vec![-0.15f32, 0.0, 0.15]),
            outcome in 0u32..2,
        ) {
            let mut right = state_with(Stage::One, (6.8 + dx, 0.0), (vx, vy));
            let mut left = state_with(Stage::One, (-6.8 - dx, 0.0), (vx, vy));
            fan_contact(&mut right, &mut ScriptedChooser::new(&[outcome]));
            fan_contact(&mut left, &mut ScriptedChooser::new(&[outcome]));
            prop_assert_eq!(right.ball.vel, left.ball.vel);
            prop_assert_eq!(right.round.level, left.round.level);
        }
    }

    #[test]
    fn barrier_blocking_windows() {
        for angle in [0.0f32, 10.0, 25.0, 155.0, 180.0, 205.0, 335.0, 360.0] {
            assert!(angle_blocks(angle), "angle {angle} should block");
        }
        for angle in [25.5f32, 31.0, 90.0, 154.5, 205.5, 334.5] {
            assert!(!angle_blocks(angle), "angle {angle} should pass");
        }
    }

    #[test]
    fn barrier_reflects_vertical_and_maybe_horizontal() {
        let mut state = state_with(Stage::One, (3.0, 0.05), (0.10, 0.12));
        state.round.barrier_angle = 160.0;
        let mut rng = ScriptedChooser::new(&[0]);
        barrier_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(-0.10, -0.12));

        // tails keeps the horizontal component
        let mut state = state_with(Stage::One, (3.0, 0.05), (0.10, 0.12));
        state.round.barrier_angle = 160.0;
        let mut rng = ScriptedChooser::new(&[1]);
        barrier_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(0.10, -0.12));
    }

    #[test]
    fn barrier_kicks_a_stopped_ball() {
        let mut state = state_with(Stage::One, (0.0, 0.05), (0.0, 0.15));
        state.round.barrier_angle = 20.0;
        let mut rng = ScriptedChooser::new(&[0]);
        barrier_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(0.12, -0.15));

        // a remembered speed takes precedence over the default kick
        let mut state = state_with(Stage::One, (0.0, 0.05), (0.0, 0.15));
        state.round.barrier_angle = 20.0;
        state.round.stored_vx = 0.14;
        let mut rng = ScriptedChooser::new(&[1]);
        barrier_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(-0.14, -0.15));
    }

    #[test]
    fn open_barrier_lets_the_ball_through() {
        let mut state = state_with(Stage::One, (3.0, 0.05), (0.10, 0.12));
        state.round.barrier_angle = 90.0;
        let mut rng = ScriptedChooser::new(&[]);
        barrier_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(0.10, 0.12));
    }

    #[test]
    fn tilted_paddle_forces_outgoing_direction() {
        let mut state = state_with(Stage::One, (1.5, -7.7), (-0.12, -0.15));
        state.bottom.tilt = Tilt::Positive;
        let mut rng = ScriptedChooser::new(&[2]);
        bottom_paddle_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(0.12, 0.15));
        assert_eq!(rng.remaining(), 0, "the draw is consumed even when unused");
    }

    #[test]
    fn tilted_paddle_kicks_a_stopped_ball_with_the_remembered_magnitude() {
        let mut state = state_with(Stage::One, (0.0, -7.7), (0.0, -0.15));
        state.bottom.tilt = Tilt::Negative;
        state.round.stored_vx = 0.14;
        let mut rng = ScriptedChooser::new(&[0]);
        bottom_paddle_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(-0.14, 0.15));
    }

    #[test]
    fn neutral_paddle_reverse_outcome() {
        let mut state = state_with(Stage::One, (0.5, -7.7), (0.14, -0.15));
        let mut rng = ScriptedChooser::new(&[0]);
        bottom_paddle_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(-0.14, 0.15));
    }

    #[test]
    fn neutral_absorb_banks_speed_for_a_later_recovery() {
        let mut state = state_with(Stage::One, (0.5, -7.7), (0.14, -0.15));
        let mut rng = ScriptedChooser::new(&[1]);
        bottom_paddle_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(0.0, 0.15));
        assert_eq!(state.round.stored_vx, 0.14);

        // the banked speed comes back at full magnitude on the next
        // zero-speed fan contact
        state.ball.pos = Vec2::new(7.5, 0.0);
        let mut rng = ScriptedChooser::new(&[0]);
        fan_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel.x.abs(), 0.14);
    }

    #[test]
    fn neutral_paddle_kick_directions_for_a_stopped_ball() {
        for (draw, expected) in [(0u32, -0.12f32), (1, 0.12)] {
            let mut state = state_with(Stage::One, (0.0, -7.7), (0.0, -0.15));
            let mut rng = ScriptedChooser::new(&[draw]);
            bottom_paddle_contact(&mut state, &mut rng);
            assert_eq!(state.ball.vel, Vec2::new(expected, 0.15));
        }

        // the third outcome leaves it stopped
        let mut state = state_with(Stage::One, (0.0, -7.7), (0.0, -0.15));
        let mut rng = ScriptedChooser::new(&[2]);
        bottom_paddle_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(0.0, 0.15));
    }

    #[test]
    fn top_paddle_mirrors_bottom_contact() {
        let mut state = state_with(Stage::Two, (-1.0, 7.7), (0.12, 0.15));
        state.top.x = -0.5;
        state.top.tilt = Tilt::Negative;
        let mut rng = ScriptedChooser::new(&[0]);
        top_paddle_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(-0.12, -0.15));
    }

    #[test]
    fn paddle_misses_outside_its_window() {
        let mut state = state_with(Stage::One, (3.0, -7.7), (0.12, -0.15));
        let mut rng = ScriptedChooser::new(&[]);
        bottom_paddle_contact(&mut state, &mut rng);
        assert_eq!(state.ball.vel, Vec2::new(0.12, -0.15));
    }

    #[test]
    fn stage_one_bound_reflects_horizontal_speed_only() {
        let mut state = state_with(Stage::One, (9.5, 3.0), (0.2, 0.1));
        clamp_to_stage(&mut state);
        assert_eq!(state.ball.vel, Vec2::new(-0.2, 0.1));
        assert_eq!(state.ball.pos, Vec2::new(9.5, 3.0));
    }

    proptest! {
        #[test]
        fn stage_one_bound_reflection_holds_everywhere(
            x in 9.41f32..20.0,
            vx in 0.01f32..0.5,
            vy in -0.5f32..0.5,
        ) {
            let mut state = state_with(Stage::One, (x, 3.0), (vx, vy));
            clamp_to_stage(&mut state);
            prop_assert_eq!(state.ball.vel.x, -vx);
            prop_assert_eq!(state.ball.vel.y, vy);
        }
    }

    #[test]
    fn stage_two_midline_gap_wraps_the_ball_across() {
        let mut state = state_with(Stage::Two, (9.9, 1.0), (0.2, 0.0));
        clamp_to_stage(&mut state);
        assert!((state.ball.pos.x + 9.8).abs() < 1e-6);
        assert_eq!(state.ball.vel, Vec2::new(0.2, 0.0));

        let mut state = state_with(Stage::Two, (-9.95, -2.0), (-0.2, 0.05));
        clamp_to_stage(&mut state);
        assert!((state.ball.pos.x - 9.85).abs() < 1e-6);
        assert_eq!(state.ball.vel, Vec2::new(-0.2, 0.05));
    }

    #[test]
    fn stage_two_wall_segments_reflect_horizontal_speed() {
        let mut state = state_with(Stage::Two, (9.9, 5.0), (0.2, 0.1));
        clamp_to_stage(&mut state);
        assert_eq!(state.ball.vel, Vec2::new(-0.2, 0.1));
        assert_eq!(state.ball.pos, Vec2::new(9.9, 5.0));
    }
}
