//! Space Duel - a deterministic two-player arcade combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, barriers, ships, tick, observations)
//! - `env`: Turn-synchronous episode controller (`reset` / `step`)
//! - `agent`: Decision-making collaborators that pick actions from observations
//! - `settings`: Data-driven simulation configuration

pub mod agent;
pub mod env;
pub mod error;
pub mod settings;
pub mod sim;

pub use agent::{Agent, Idle, NonShooter, RandomAgent, ScriptedAgent};
pub use env::{RenderFrame, ShooterEnv, StepInfo, StepResult, play_episode};
pub use error::{ConfigError, SimError};
pub use settings::{ActionSet, AngleEncoding, BarrierLayout, BarrierSpec, SimulationConfig};

/// Reference simulation constants
pub mod consts {
    /// Full-size arena dimensions
    pub const ARENA_WIDTH: f32 = 600.0;
    pub const ARENA_HEIGHT: f32 = 450.0;

    /// Ship defaults (40px sprite)
    pub const SHIP_RADIUS: f32 = 20.0;
    /// Degrees turned per rotate action
    pub const ROTATION_STEP_DEG: f32 = 15.0;

    /// Projectile defaults (10px sprite)
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 60.0;
    /// Standard deviation of the velocity jitter added at fire time
    pub const PROJECTILE_JITTER_STD: f32 = 2.5;
    /// Live projectiles per ship
    pub const MAX_PROJECTILES: usize = 2;

    /// Hit radius inflation to stop projectiles skipping over ships between ticks
    pub const FUDGE_FACTOR: f32 = 1.5;

    /// Barrier thickness (full width across the short axis)
    pub const BARRIER_WIDTH: f32 = 6.0;
    /// Barrier length as a fraction of arena height
    pub const BARRIER_LENGTH_FRACTION: f32 = 0.3;

    /// Where projectiles are parked after hitting a barrier
    pub const PARKED_PROJECTILE: (f32, f32) = (-100.0, -100.0);
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Map `value` in [0, max] linearly onto [-1, 1]
#[inline]
pub fn normalise(value: f32, max: f32) -> f32 {
    2.0 * (value / max) - 1.0
}
