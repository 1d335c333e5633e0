//! Error types
//!
//! Every error here is a caller contract violation or a configuration
//! mistake. The simulation has no I/O, so nothing is retryable.

use thiserror::Error;

use crate::sim::PlayerId;

/// Failures surfaced by the episode controller and the tick
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Action code outside the configured action set
    #[error("{player} sent action code {code}, expected 0..{action_count}")]
    InvalidAction {
        player: PlayerId,
        code: u8,
        action_count: u8,
    },
    /// `step` called after the episode ended without a `reset`
    #[error("episode has terminated; call reset() before stepping again")]
    EpisodeTerminated,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration-time failures, detected before any tick runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("barrier {index} has degenerate length {length}")]
    DegenerateBarrier { index: usize, length: f32 },
    #[error("invalid barrier orientation tag '{0}', expected 'horizontal' or 'vertical'")]
    InvalidOrientation(String),
    #[error("barrier {index} is centred outside the arena")]
    BarrierOutOfBounds { index: usize },
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("projectile cap must be at least 1")]
    ZeroProjectileCap,
    #[error("tick limit must be at least 1 when set")]
    ZeroTickLimit,
    #[error("spawn facing must be a non-zero vector")]
    DegenerateSpawnFacing,
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("failed to serialize configuration: {0}")]
    Serialize(String),
    #[error("failed to access configuration file: {0}")]
    Io(String),
}
