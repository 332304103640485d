//! Fan Pong - a two-player, two-stage arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision rules, round lifecycle, state)
//! - `scheduler`: Fixed-cadence tick scheduling for the host loop
//! - `settings`: Runner configuration
//!
//! Rendering, textures and window/input plumbing are external collaborators:
//! they read `SimState::snapshot()` and call the input operations on
//! [`sim::SimState`] between ticks.

pub mod scheduler;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Nominal tick period (milliseconds)
    pub const TICK_MS: u64 = 25;
    /// Delay before the very first tick (milliseconds)
    pub const FIRST_TICK_MS: u64 = 1;

    /// Horizontal travel limit for both paddles
    pub const PADDLE_TRAVEL: f32 = 8.6;
    /// Half-width of the paddle contact window
    pub const PADDLE_HALF_WIDTH: f32 = 2.0;
    /// Keyboard step for the bottom paddle
    pub const PADDLE_STEP: f32 = 0.6;
    /// Pointer step for the top paddle
    pub const TOP_PADDLE_STEP: f32 = 0.1;

    /// Near edge of the paddle contact band (|y| strictly above this)
    pub const CONTACT_NEAR: f32 = 7.6;
    /// Far edge of the paddle contact band (|y| strictly below this)
    pub const CONTACT_FAR: f32 = 7.8;
    /// A ball past |y| > EXIT_Y ends the round
    pub const EXIT_Y: f32 = 8.3;
    /// Fans and the barrier sense the ball within |y| < MIDLINE_BAND
    pub const MIDLINE_BAND: f32 = 0.1;

    /// Vertical speed assigned at serve
    pub const SERVE_SPEED: f32 = 0.15;
    /// Horizontal speed assigned when nothing is remembered
    pub const DEFAULT_KICK: f32 = 0.12;
    /// Increment applied by fan boosts and the speed-trim inputs
    pub const SPEED_STEP: f32 = 0.01;

    /// Fan blade spin per unpaused tick (degrees)
    pub const FAN_SPIN: f32 = 20.0;
    /// Barrier rotation per unpaused tick (degrees)
    pub const BARRIER_SPIN: f32 = 5.0;
    /// Barrier angle restored at every serve (degrees)
    pub const SERVE_BARRIER_ANGLE: f32 = 31.0;
}
