//! Fixed-cadence tick scheduling
//!
//! The host loop owns the clock; the scheduler only does deadline
//! bookkeeping: nominal 25 ms period, first tick due 1 ms after creation,
//! unconditional re-arm per consumed tick. A late host catches up one full
//! tick at a time; there is no variable-timestep interpolation.

use std::time::{Duration, Instant};

use crate::consts::{FIRST_TICK_MS, TICK_MS};

#[derive(Debug, Clone)]
pub struct TickScheduler {
    period: Duration,
    next: Instant,
}

impl TickScheduler {
    pub fn new(now: Instant) -> Self {
        Self::with_period(now, Duration::from_millis(TICK_MS))
    }

    /// Scheduler with a non-standard period (host override)
    pub fn with_period(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next: now + Duration::from_millis(FIRST_TICK_MS),
        }
    }

    /// Number of ticks due at `now`; each one re-arms the deadline
    pub fn due(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while now >= self.next {
            self.next += self.period;
            ticks += 1;
        }
        ticks
    }

    /// Deadline of the next tick, for host sleeping
    pub fn next_deadline(&self) -> Instant {
        self.next
    }
}
