//! Fan Pong headless host loop
//!
//! Stands in for the windowing collaborators: drives the scheduler at the
//! nominal cadence, feeds input from a small autopilot and logs round
//! results. Quit is Ctrl-C; the scheduler re-arms until the process ends.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use fan_pong::consts::{PADDLE_STEP, TOP_PADDLE_STEP};
use fan_pong::scheduler::TickScheduler;
use fan_pong::settings::Settings;
use fan_pong::sim::{self, GameRng, SimState};

fn main() {
    env_logger::init();

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(time_seed);
    log::info!("starting match with seed {seed}");

    let mut state = SimState::new();
    let mut rng = GameRng::from_seed(seed);
    let mut scheduler =
        TickScheduler::with_period(Instant::now(), Duration::from_millis(settings.tick_ms));

    let mut ticks: u64 = 0;
    loop {
        for _ in 0..scheduler.due(Instant::now()) {
            if settings.autoplay {
                autopilot(&mut state);
            }
            sim::tick(&mut state, &mut rng);
            ticks += 1;

            if settings.trace_snapshots {
                if let Ok(line) = serde_json::to_string(&state.snapshot()) {
                    log::trace!("{line}");
                }
            }

            if let Some(limit) = settings.max_ticks {
                if ticks >= limit {
                    log::info!(
                        "tick limit reached: player one {} -- player two {}",
                        state.round.score_one,
                        state.round.score_two
                    );
                    return;
                }
            }
        }

        let deadline = scheduler.next_deadline();
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
    }
}

/// Keeps an unattended match running: restarts paused rounds and slides both
/// paddles toward the ball, one input step per tick.
fn autopilot(state: &mut SimState) {
    if state.paused {
        state.toggle_pause();
    }
    let target = state.ball.pos.x;
    if target > state.bottom.x + PADDLE_STEP / 2.0 {
        state.move_bottom(PADDLE_STEP);
    } else if target < state.bottom.x - PADDLE_STEP / 2.0 {
        state.move_bottom(-PADDLE_STEP);
    }
    if target > state.top.x + TOP_PADDLE_STEP / 2.0 {
        state.move_top(TOP_PADDLE_STEP);
    } else if target < state.top.x - TOP_PADDLE_STEP / 2.0 {
        state.move_top(-TOP_PADDLE_STEP);
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
