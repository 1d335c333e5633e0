//! Static rectangular barriers
//!
//! A barrier is a thin axis-aligned rectangle. Blocking uses inflated point
//! containment plus a crossing test against the two long edges. Movers are
//! assumed to be large next to the barrier thickness.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::segments_intersect;
use crate::consts::BARRIER_WIDTH;
use crate::error::ConfigError;
use crate::settings::BarrierSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarrierOrientation {
    Horizontal,
    Vertical,
}

impl FromStr for BarrierOrientation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(BarrierOrientation::Horizontal),
            "vertical" => Ok(BarrierOrientation::Vertical),
            other => Err(ConfigError::InvalidOrientation(other.to_string())),
        }
    }
}

/// An immutable axis-aligned barrier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub orientation: BarrierOrientation,
    pub center: Vec2,
    pub length: f32,
    /// Top-left corner of the hit-box
    pub min: Vec2,
    /// Bottom-right corner of the hit-box
    pub max: Vec2,
}

impl Barrier {
    pub fn new(orientation: BarrierOrientation, center: Vec2, length: f32) -> Self {
        let half = match orientation {
            BarrierOrientation::Vertical => Vec2::new(BARRIER_WIDTH / 2.0, length / 2.0),
            BarrierOrientation::Horizontal => Vec2::new(length / 2.0, BARRIER_WIDTH / 2.0),
        };
        Self {
            orientation,
            center,
            length,
            min: center - half,
            max: center + half,
        }
    }

    /// Build a barrier from a config entry, rejecting degenerate geometry
    pub fn from_spec(index: usize, spec: &BarrierSpec, bounds: Vec2) -> Result<Self, ConfigError> {
        if !(spec.length.is_finite() && spec.length > 0.0) {
            return Err(ConfigError::DegenerateBarrier {
                index,
                length: spec.length,
            });
        }
        let center = Vec2::new(spec.center.0, spec.center.1);
        let inside = center.is_finite()
            && center.x >= 0.0
            && center.x <= bounds.x
            && center.y >= 0.0
            && center.y <= bounds.y;
        if !inside {
            return Err(ConfigError::BarrierOutOfBounds { index });
        }
        Ok(Self::new(spec.orientation, center, spec.length))
    }

    /// The two long edges of the rectangle
    pub fn long_edges(&self) -> [(Vec2, Vec2); 2] {
        match self.orientation {
            BarrierOrientation::Vertical => [
                (self.min, Vec2::new(self.min.x, self.max.y)),
                (Vec2::new(self.max.x, self.min.y), self.max),
            ],
            BarrierOrientation::Horizontal => [
                (self.min, Vec2::new(self.max.x, self.min.y)),
                (Vec2::new(self.min.x, self.max.y), self.max),
            ],
        }
    }

    /// Does a circle of `radius` centred at `point` overlap the hit-box
    pub fn overlaps(&self, point: Vec2, radius: f32) -> bool {
        point.x > self.min.x - radius
            && point.x < self.max.x + radius
            && point.y > self.min.y - radius
            && point.y < self.max.y + radius
    }

    /// Does moving a circle of `radius` from `from` to `to` hit this barrier
    pub fn blocks(&self, from: Vec2, to: Vec2, radius: f32) -> bool {
        if self.overlaps(to, radius) {
            return true;
        }
        self.long_edges()
            .iter()
            .any(|&(a, b)| segments_intersect(a, b, from, to))
    }
}

/// Resolve barrier specs into geometry, failing on the first invalid entry
pub fn build_barriers(specs: &[BarrierSpec], bounds: Vec2) -> Result<Vec<Barrier>, ConfigError> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| Barrier::from_spec(index, spec, bounds))
        .collect()
}

/// True if any barrier blocks the move
pub fn any_blocks(barriers: &[Barrier], from: Vec2, to: Vec2, radius: f32) -> bool {
    barriers.iter().any(|b| b.blocks(from, to, radius))
}
