//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Injected, seeded RNG only
//! - Stable iteration order (player 1 before player 2, projectiles oldest first)
//! - No rendering or platform dependencies

pub mod action;
pub mod barrier;
pub mod geometry;
pub mod observation;
pub mod rng;
pub mod state;
pub mod tick;

pub use action::Action;
pub use barrier::{Barrier, BarrierOrientation};
pub use observation::observe;
pub use rng::{RngState, SimRng};
pub use state::{Arena, ArenaPhase, MatchResult, PlayerId, Projectile, Ship, Side, Spawn};
pub use tick::{TickInput, TickOutcome, tick};
