//! Simulation configuration
//!
//! One explicit struct holds every tunable the arena needs. It is passed to
//! the arena at construction and never mutated during an episode.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::BarrierOrientation;

/// Which discrete actions a ship accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActionSet {
    /// Rotate CW, rotate CCW, forward, fire
    Basic,
    /// Basic plus strafe left / strafe right
    #[default]
    Strafe,
}

impl ActionSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionSet::Basic => "basic",
            ActionSet::Strafe => "strafe",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" | "4" => Some(ActionSet::Basic),
            "strafe" | "6" => Some(ActionSet::Strafe),
            _ => None,
        }
    }

    /// Number of valid action codes
    pub fn action_count(&self) -> u8 {
        match self {
            ActionSet::Basic => 4,
            ActionSet::Strafe => 6,
        }
    }
}

/// How an entity's heading is written into the observation vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AngleEncoding {
    /// x, y, angle mapped onto [-1, 1)
    Normalized,
    /// x, y, sin(angle), cos(angle); continuous across 0°/360°
    #[default]
    SinCos,
}

impl AngleEncoding {
    /// Observation fields contributed by each entity
    pub fn fields_per_entity(&self) -> usize {
        match self {
            AngleEncoding::Normalized => 3,
            AngleEncoding::SinCos => 4,
        }
    }
}

/// A single barrier description, resolved into geometry at arena construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarrierSpec {
    pub orientation: BarrierOrientation,
    pub center: (f32, f32),
    pub length: f32,
}

impl BarrierSpec {
    pub fn new(orientation: BarrierOrientation, center: Vec2, length: f32) -> Self {
        Self {
            orientation,
            center: (center.x, center.y),
            length,
        }
    }
}

/// Obstacle layout for the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BarrierLayout {
    /// Open arena
    None,
    /// Four barriers framing the centre
    #[default]
    Standard,
    Custom { barriers: Vec<BarrierSpec> },
}

impl BarrierLayout {
    /// Resolve the layout into barrier specs for an arena of `size`
    pub fn specs(&self, size: Vec2) -> Vec<BarrierSpec> {
        match self {
            BarrierLayout::None => Vec::new(),
            BarrierLayout::Standard => standard_layout(size),
            BarrierLayout::Custom { barriers } => barriers.clone(),
        }
    }
}

/// Two vertical barriers left and right of centre, two horizontal above and below
pub fn standard_layout(size: Vec2) -> Vec<BarrierSpec> {
    let length = (size.y * BARRIER_LENGTH_FRACTION).floor();
    let at = |fx: f32, fy: f32| Vec2::new((size.x * fx).floor(), (size.y * fy).floor());
    vec![
        BarrierSpec::new(BarrierOrientation::Vertical, at(0.2, 0.5), length),
        BarrierSpec::new(BarrierOrientation::Vertical, at(0.8, 0.5), length),
        BarrierSpec::new(BarrierOrientation::Horizontal, at(0.5, 0.2), length),
        BarrierSpec::new(BarrierOrientation::Horizontal, at(0.5, 0.8), length),
    ]
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === Arena ===
    /// Full-size arena width
    pub arena_width: f32,
    /// Full-size arena height
    pub arena_height: f32,
    /// Halve both arena dimensions (faster episodes)
    pub half_sized: bool,
    pub barriers: BarrierLayout,

    // === Ships ===
    pub ship_radius: f32,
    pub rotation_step_deg: f32,
    pub action_set: ActionSet,
    /// Draw player 1's facing at random (player 2 faces the opposite way).
    /// When false both ships face inward from their spawn point.
    pub random_spawn_facing: bool,

    // === Projectiles ===
    pub projectile_radius: f32,
    pub projectile_speed: f32,
    /// Gaussian jitter std-dev applied per velocity component (0 disables)
    pub projectile_jitter_std: f32,
    pub max_projectiles: usize,
    pub fudge_factor: f32,

    // === Episode ===
    pub angle_encoding: AngleEncoding,
    /// End the episode as a draw after this many ticks
    pub max_ticks: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            half_sized: false,
            barriers: BarrierLayout::Standard,

            ship_radius: SHIP_RADIUS,
            rotation_step_deg: ROTATION_STEP_DEG,
            action_set: ActionSet::Strafe,
            random_spawn_facing: false,

            projectile_radius: PROJECTILE_RADIUS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_jitter_std: PROJECTILE_JITTER_STD,
            max_projectiles: MAX_PROJECTILES,
            fudge_factor: FUDGE_FACTOR,

            angle_encoding: AngleEncoding::SinCos,
            max_ticks: None,
        }
    }
}

impl SimulationConfig {
    /// Half-sized arena (300x225)
    pub fn half_size() -> Self {
        Self {
            half_sized: true,
            ..Self::default()
        }
    }

    /// Toggle the standard barrier layout on or off
    pub fn with_barriers(mut self, include: bool) -> Self {
        self.barriers = if include {
            BarrierLayout::Standard
        } else {
            BarrierLayout::None
        };
        self
    }

    /// Effective arena size after the half-size toggle
    pub fn arena_size(&self) -> Vec2 {
        let size = Vec2::new(self.arena_width, self.arena_height);
        if self.half_sized { size * 0.5 } else { size }
    }

    /// Length of each player's observation vector
    pub fn observation_len(&self) -> usize {
        (2 + 2 * self.max_projectiles) * self.angle_encoding.fields_per_entity()
    }

    /// Check every numeric field. Barrier geometry is checked when the arena is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("ship_radius", self.ship_radius),
            ("rotation_step_deg", self.rotation_step_deg),
            ("projectile_radius", self.projectile_radius),
            ("projectile_speed", self.projectile_speed),
            ("fudge_factor", self.fudge_factor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        // Zero jitter is allowed
        if !(self.projectile_jitter_std.is_finite() && self.projectile_jitter_std >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "projectile_jitter_std",
                value: self.projectile_jitter_std,
            });
        }
        if self.max_projectiles == 0 {
            return Err(ConfigError::ZeroProjectileCap);
        }
        if self.max_ticks == Some(0) {
            return Err(ConfigError::ZeroTickLimit);
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json).map_err(|e| ConfigError::Io(e.to_string()))?;
        log::info!("Simulation config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_size_arena() {
        assert_eq!(SimulationConfig::default().arena_size(), Vec2::new(600.0, 450.0));
        assert_eq!(SimulationConfig::half_size().arena_size(), Vec2::new(300.0, 225.0));
    }

    #[test]
    fn test_observation_len() {
        let mut config = SimulationConfig::default();
        assert_eq!(config.observation_len(), 24);
        config.angle_encoding = AngleEncoding::Normalized;
        assert_eq!(config.observation_len(), 18);
        config.max_projectiles = 3;
        assert_eq!(config.observation_len(), 24);
    }

    #[test]
    fn test_action_set_parse() {
        assert_eq!(ActionSet::from_str("Basic"), Some(ActionSet::Basic));
        assert_eq!(ActionSet::from_str("6"), Some(ActionSet::Strafe));
        assert_eq!(ActionSet::from_str("eight"), None);
        assert_eq!(ActionSet::Strafe.as_str(), "strafe");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = SimulationConfig {
            ship_radius: 0.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "ship_radius",
                value: 0.0
            })
        );

        let config = SimulationConfig {
            max_projectiles: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroProjectileCap));

        let config = SimulationConfig {
            projectile_jitter_std: 0.0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_tick_limit() {
        let config = SimulationConfig {
            max_ticks: Some(0),
            ..SimulationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickLimit));
        assert!(matches!(
            SimulationConfig::from_json(r#"{ "max_ticks": 0 }"#),
            Err(ConfigError::ZeroTickLimit)
        ));

        let config = SimulationConfig {
            max_ticks: Some(1),
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialize_error_is_not_a_parse_error() {
        let err = ConfigError::Serialize("key must be a string".to_string());
        assert_eq!(err.to_string(), "failed to serialize configuration: key must be a string");
        assert_ne!(err, ConfigError::Parse("key must be a string".to_string()));
        assert!(SimulationConfig::default().to_json().is_ok());
    }

    #[test]
    fn test_json_partial_and_full() {
        let config = SimulationConfig::from_json(r#"{ "half_sized": true, "action_set": "basic" }"#)
            .unwrap();
        assert!(config.half_sized);
        assert_eq!(config.action_set, ActionSet::Basic);
        assert_eq!(config.ship_radius, SHIP_RADIUS);

        let json = config.to_json().unwrap();
        assert_eq!(SimulationConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_custom_barriers() {
        let json = r#"{
            "barriers": {
                "kind": "custom",
                "barriers": [{ "orientation": "vertical", "center": [100.0, 100.0], "length": 50.0 }]
            }
        }"#;
        let config = SimulationConfig::from_json(json).unwrap();
        let specs = config.barriers.specs(config.arena_size());
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].orientation, BarrierOrientation::Vertical);
    }

    #[test]
    fn test_json_rejects_unknown_orientation() {
        let json = r#"{
            "barriers": {
                "kind": "custom",
                "barriers": [{ "orientation": "diagonal", "center": [100.0, 100.0], "length": 50.0 }]
            }
        }"#;
        assert!(matches!(
            SimulationConfig::from_json(json),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_standard_layout_positions() {
        let specs = standard_layout(Vec2::new(600.0, 450.0));
        assert_eq!(specs.len(), 4);
        assert_eq!(specs[0].center, (120.0, 225.0));
        assert_eq!(specs[3].center, (300.0, 360.0));
        assert!(specs.iter().all(|s| s.length == 135.0));
    }
}
