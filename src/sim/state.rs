//! Arena state and entity types
//!
//! The arena owns both ships, each ship owns its live projectiles, and the
//! barriers are shared read-only geometry.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::barrier::{Barrier, any_blocks, build_barriers};
use super::geometry::{DOWN, LEFT, RIGHT, UP, angle_to_up, clamp_to_bounds, in_bounds, rotate_deg, rotate_heading};
use super::rng::gaussian_jitter;
use crate::consts::PARKED_PROJECTILE;
use crate::error::ConfigError;
use crate::settings::SimulationConfig;

/// Player slot. Ship identity for win attribution is this id alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Array index into `Arena::ships`
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// 1 or 2
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// A projectile in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading of the firing ship at launch
    pub dir: Vec2,
    pub radius: f32,
    /// Set when the last move crossed a barrier
    pub hit_barrier: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, dir: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            dir,
            radius,
            hit_barrier: false,
        }
    }

    /// Heading in degrees [0, 360)
    pub fn angle(&self) -> f32 {
        angle_to_up(self.dir)
    }

    /// Move one tick. A barrier crossing parks the projectile off-field.
    pub fn advance(&mut self, barriers: &[Barrier]) {
        let next = self.pos + self.vel;
        if any_blocks(barriers, self.pos, next, self.radius) {
            self.pos = Vec2::new(PARKED_PROJECTILE.0, PARKED_PROJECTILE.1);
            self.hit_barrier = true;
            return;
        }
        self.pos = next;
    }

    /// Still in play: inside the arena and not stopped by a barrier
    pub fn is_live(&self, bounds: Vec2) -> bool {
        !self.hit_barrier && in_bounds(self.pos, bounds)
    }

    /// Distance test with both radii inflated by `fudge`
    pub fn hits(&self, ship: &Ship, fudge: f32) -> bool {
        self.pos.distance(ship.pos) < self.radius * fudge + ship.radius * fudge
    }
}

/// Side for strafing, relative to the current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub player: PlayerId,
    pub pos: Vec2,
    /// Unit heading
    pub dir: Vec2,
    /// Zeroed at the start of every action
    pub vel: Vec2,
    pub radius: f32,
    pub dead: bool,
    /// Live projectiles, oldest first
    pub projectiles: Vec<Projectile>,
}

impl Ship {
    pub fn new(player: PlayerId, pos: Vec2, dir: Vec2, radius: f32) -> Self {
        Self {
            player,
            pos,
            dir: dir.try_normalize().unwrap_or(UP),
            vel: Vec2::ZERO,
            radius,
            dead: false,
            projectiles: Vec::new(),
        }
    }

    /// Heading in degrees [0, 360)
    pub fn angle(&self) -> f32 {
        angle_to_up(self.dir)
    }

    pub fn rotate(&mut self, clockwise: bool, step_deg: f32) {
        let sign = if clockwise { 1.0 } else { -1.0 };
        self.dir = rotate_heading(self.dir, step_deg * sign);
    }

    /// Step one radius forward unless a barrier is in the way
    pub fn move_forward(&mut self, barriers: &[Barrier]) {
        self.translate(self.dir, barriers);
    }

    /// Step one radius sideways without turning
    pub fn strafe(&mut self, side: Side, barriers: &[Barrier]) {
        let degrees = match side {
            Side::Left => -90.0,
            Side::Right => 90.0,
        };
        self.translate(rotate_deg(self.dir, degrees), barriers);
    }

    fn translate(&mut self, dir: Vec2, barriers: &[Barrier]) {
        let next = self.pos + dir * self.radius;
        if any_blocks(barriers, self.pos, next, self.radius) {
            return;
        }
        self.pos = next;
    }

    /// Launch a projectile if under the cap. Returns whether one was fired.
    pub fn fire<R: Rng>(
        &mut self,
        inherited_vel: Vec2,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> bool {
        if self.projectiles.len() >= config.max_projectiles {
            return false;
        }
        let vel = self.dir * config.projectile_speed
            + inherited_vel
            + gaussian_jitter(rng, config.projectile_jitter_std);
        self.projectiles
            .push(Projectile::new(self.pos, vel, self.dir, config.projectile_radius));
        true
    }

    /// Apply exactly one action. Velocity is reset first, so nothing carries
    /// over between ticks except what a fired projectile inherits.
    pub fn apply_action<R: Rng>(
        &mut self,
        action: Action,
        config: &SimulationConfig,
        barriers: &[Barrier],
        rng: &mut R,
    ) {
        let inherited = self.vel;
        self.vel = Vec2::ZERO;
        match action {
            Action::RotateClockwise => self.rotate(true, config.rotation_step_deg),
            Action::RotateCounterClockwise => self.rotate(false, config.rotation_step_deg),
            Action::MoveForward => self.move_forward(barriers),
            Action::Fire => {
                self.fire(inherited, config, rng);
            }
            Action::StrafeLeft => self.strafe(Side::Left, barriers),
            Action::StrafeRight => self.strafe(Side::Right, barriers),
        }
    }

    /// Physics step: integrate velocity and clamp inside the arena
    pub fn advance(&mut self, bounds: Vec2) {
        self.pos = clamp_to_bounds(self.pos + self.vel, self.radius, bounds);
    }
}

/// Episode lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaPhase {
    Active,
    /// Terminal; a new arena is built on reset
    Terminated,
}

/// How a terminated episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Player1Wins,
    Player2Wins,
    /// Both ships hit on the same tick; scored as a draw
    MutualDestruction,
    /// `max_ticks` reached without a hit
    TimeLimit,
}

impl MatchResult {
    /// Reward from player 1's perspective
    pub fn reward(&self) -> i8 {
        match self {
            MatchResult::Player1Wins => 1,
            MatchResult::Player2Wins => -1,
            MatchResult::MutualDestruction | MatchResult::TimeLimit => 0,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            MatchResult::Player1Wins => "Player 1 wins!",
            MatchResult::Player2Wins => "Player 2 wins!",
            MatchResult::MutualDestruction => "Both players destroyed!",
            MatchResult::TimeLimit => "Time limit reached",
        }
    }
}

/// Candidate spawn points: left, right, top, bottom
pub fn spawn_points(bounds: Vec2) -> [Vec2; 4] {
    [
        Vec2::new((bounds.x * 0.1).floor(), (bounds.y / 2.0).floor()),
        Vec2::new((bounds.x * 0.9).floor(), (bounds.y / 2.0).floor()),
        Vec2::new((bounds.x / 2.0).floor(), (bounds.y * 0.1).floor()),
        Vec2::new((bounds.x / 2.0).floor(), (bounds.y * 0.9).floor()),
    ]
}

/// Inward facing for each spawn point
pub const SPAWN_FACINGS: [Vec2; 4] = [RIGHT, LEFT, DOWN, UP];

/// The spawn point across the arena from `index`
pub fn opposite_spawn(index: usize) -> usize {
    match index {
        0 => 1,
        1 => 0,
        2 => 3,
        _ => 2,
    }
}

/// Spawn assignment for both players
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    /// Index into `spawn_points` for player 1; player 2 takes the opposite
    pub index: usize,
    /// Player 1 facing; player 2 faces the opposite way
    pub facing: Vec2,
}

impl Spawn {
    /// Both ships face inward from `index`
    pub fn inward(index: usize) -> Self {
        let index = index % 4;
        Self {
            index,
            facing: SPAWN_FACINGS[index],
        }
    }

    /// Draw a fair spawn. Player 2 is the point reflection of player 1.
    pub fn draw<R: Rng>(rng: &mut R, random_facing: bool) -> Self {
        let index = rng.random_range(0..4usize);
        if random_facing {
            let facing = SPAWN_FACINGS[rng.random_range(0..4usize)];
            Self { index, facing }
        } else {
            Self::inward(index)
        }
    }
}

/// The whole simulation world for one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub config: SimulationConfig,
    pub bounds: Vec2,
    pub barriers: Vec<Barrier>,
    /// Indexed by `PlayerId::index`
    pub ships: [Ship; 2],
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: ArenaPhase,
    pub result: Option<MatchResult>,
}

impl Arena {
    /// Build a fresh arena. Barrier geometry and the spawn facing are validated here.
    pub fn new(config: SimulationConfig, spawn: Spawn) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = config.arena_size();
        let barriers = build_barriers(&config.barriers.specs(bounds), bounds)?;

        let facing = spawn
            .facing
            .try_normalize()
            .ok_or(ConfigError::DegenerateSpawnFacing)?;
        let points = spawn_points(bounds);
        let p1_index = spawn.index % 4;
        let p2_index = opposite_spawn(p1_index);
        let ships = [
            Ship::new(PlayerId::One, points[p1_index], facing, config.ship_radius),
            Ship::new(PlayerId::Two, points[p2_index], -facing, config.ship_radius),
        ];

        Ok(Self {
            config,
            bounds,
            barriers,
            ships,
            time_ticks: 0,
            phase: ArenaPhase::Active,
            result: None,
        })
    }

    /// Build an arena with a freshly drawn spawn
    pub fn with_random_spawn<R: Rng>(config: SimulationConfig, rng: &mut R) -> Result<Self, ConfigError> {
        let spawn = Spawn::draw(rng, config.random_spawn_facing);
        log::debug!(
            "Spawning at point {} facing ({:.0}, {:.0})",
            spawn.index,
            spawn.facing.x,
            spawn.facing.y
        );
        Self::new(config, spawn)
    }

    pub fn ship(&self, player: PlayerId) -> &Ship {
        &self.ships[player.index()]
    }

    pub fn ship_mut(&mut self, player: PlayerId) -> &mut Ship {
        &mut self.ships[player.index()]
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == ArenaPhase::Terminated
    }

    /// Status line for display; empty while the episode runs
    pub fn message(&self) -> &'static str {
        self.result.map(|r| r.message()).unwrap_or("")
    }

    /// Copy of this arena with the two ships trading player slots
    pub fn swap_seats(&self) -> Arena {
        let mut swapped = self.clone();
        swapped.ships.swap(0, 1);
        for ship in &mut swapped.ships {
            ship.player = ship.player.opponent();
        }
        swapped.result = self.result.map(|r| match r {
            MatchResult::Player1Wins => MatchResult::Player2Wins,
            MatchResult::Player2Wins => MatchResult::Player1Wins,
            other => other,
        });
        swapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::barrier::BarrierOrientation;
    use crate::sim::rng::RngState;

    fn ship_at(x: f32, y: f32, dir: Vec2) -> Ship {
        Ship::new(PlayerId::One, Vec2::new(x, y), dir, 20.0)
    }

    #[test]
    fn test_player_ids() {
        assert_eq!(PlayerId::One.opponent(), PlayerId::Two);
        assert_eq!(PlayerId::Two.number(), 2);
        assert_eq!(PlayerId::Two.to_string(), "player 2");
    }

    #[test]
    fn test_rotate_keeps_unit_heading() {
        let mut ship = ship_at(100.0, 100.0, UP);
        ship.rotate(true, 15.0);
        assert!((ship.angle() - 345.0).abs() < 1e-3);
        ship.rotate(false, 15.0);
        ship.rotate(false, 15.0);
        assert!((ship.angle() - 15.0).abs() < 1e-3);
        assert!((ship.dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_forward_steps_one_radius() {
        let mut ship = ship_at(100.0, 100.0, RIGHT);
        ship.move_forward(&[]);
        assert_eq!(ship.pos, Vec2::new(120.0, 100.0));
    }

    #[test]
    fn test_move_forward_blocked_by_barrier() {
        let barrier = Barrier::new(BarrierOrientation::Vertical, Vec2::new(140.0, 100.0), 60.0);
        let mut ship = ship_at(100.0, 100.0, RIGHT);
        ship.move_forward(std::slice::from_ref(&barrier));
        assert_eq!(ship.pos, Vec2::new(100.0, 100.0));

        // Facing away is free
        ship.dir = LEFT;
        ship.move_forward(std::slice::from_ref(&barrier));
        assert_eq!(ship.pos, Vec2::new(80.0, 100.0));
    }

    #[test]
    fn test_strafe_keeps_heading() {
        let mut ship = ship_at(100.0, 100.0, UP);
        ship.strafe(Side::Left, &[]);
        assert!((ship.pos - Vec2::new(80.0, 100.0)).length() < 1e-4);
        ship.strafe(Side::Right, &[]);
        ship.strafe(Side::Right, &[]);
        assert!((ship.pos - Vec2::new(120.0, 100.0)).length() < 1e-4);
        assert_eq!(ship.dir, UP);
    }

    #[test]
    fn test_strafe_blocked_by_barrier() {
        // Barrier on the ship's right while it faces up
        let barrier = Barrier::new(BarrierOrientation::Vertical, Vec2::new(140.0, 100.0), 60.0);
        let mut ship = ship_at(100.0, 100.0, UP);
        ship.strafe(Side::Right, std::slice::from_ref(&barrier));
        assert_eq!(ship.pos, Vec2::new(100.0, 100.0));
        assert_eq!(ship.dir, UP);

        ship.strafe(Side::Left, std::slice::from_ref(&barrier));
        assert!((ship.pos - Vec2::new(80.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_fire_respects_cap() {
        let config = SimulationConfig::default();
        let mut rng = RngState::new(3).to_rng();
        let mut ship = ship_at(100.0, 100.0, UP);
        assert!(ship.fire(Vec2::ZERO, &config, &mut rng));
        assert!(ship.fire(Vec2::ZERO, &config, &mut rng));
        assert!(!ship.fire(Vec2::ZERO, &config, &mut rng));
        assert_eq!(ship.projectiles.len(), config.max_projectiles);
    }

    #[test]
    fn test_fire_velocity_without_jitter() {
        let config = SimulationConfig {
            projectile_jitter_std: 0.0,
            ..SimulationConfig::default()
        };
        let mut rng = RngState::new(3).to_rng();
        let mut ship = ship_at(100.0, 100.0, RIGHT);
        ship.fire(Vec2::new(0.0, 2.0), &config, &mut rng);
        let p = &ship.projectiles[0];
        assert_eq!(p.pos, ship.pos);
        assert_eq!(p.vel, Vec2::new(60.0, 2.0));
        assert!((p.angle() - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_apply_action_resets_velocity() {
        let config = SimulationConfig {
            projectile_jitter_std: 0.0,
            ..SimulationConfig::default()
        };
        let mut rng = RngState::new(3).to_rng();
        let mut ship = ship_at(100.0, 100.0, UP);
        ship.vel = Vec2::new(5.0, 0.0);
        ship.apply_action(Action::Fire, &config, &[], &mut rng);
        assert_eq!(ship.vel, Vec2::ZERO);
        // Projectile read the velocity before the reset
        assert_eq!(ship.projectiles[0].vel, Vec2::new(5.0, -60.0));
    }

    #[test]
    fn test_advance_clamps_to_arena() {
        let bounds = Vec2::new(300.0, 225.0);
        let mut ship = ship_at(290.0, 5.0, UP);
        ship.advance(bounds);
        assert_eq!(ship.pos, Vec2::new(280.0, 20.0));
    }

    #[test]
    fn test_projectile_parks_on_barrier() {
        let barrier = Barrier::new(BarrierOrientation::Vertical, Vec2::new(130.0, 100.0), 60.0);
        let mut p = Projectile::new(Vec2::new(100.0, 100.0), Vec2::new(60.0, 0.0), RIGHT, 5.0);
        p.advance(std::slice::from_ref(&barrier));
        assert!(p.hit_barrier);
        assert!(!p.is_live(Vec2::new(300.0, 225.0)));
    }

    #[test]
    fn test_projectile_hit_uses_fudge_factor() {
        let ship = ship_at(100.0, 100.0, UP);
        // Plain radius sum is 25, inflated is 37.5
        let p = Projectile::new(Vec2::new(130.0, 100.0), Vec2::ZERO, UP, 5.0);
        assert!(p.hits(&ship, 1.5));
        assert!(!p.hits(&ship, 1.0));
        let far = Projectile::new(Vec2::new(140.0, 100.0), Vec2::ZERO, UP, 5.0);
        assert!(!far.hits(&ship, 1.5));
    }

    #[test]
    fn test_spawns_are_opposite() {
        let config = SimulationConfig::half_size();
        for index in 0..4 {
            let arena = Arena::new(config.clone(), Spawn::inward(index)).unwrap();
            let [p1, p2] = &arena.ships;
            // Point reflection through the arena centre (up to integer flooring)
            let centre = arena.bounds / 2.0;
            assert!(((p1.pos + p2.pos) / 2.0 - centre).length() <= 1.0);
            assert_eq!(p1.dir, -p2.dir);
            // Inward facing points toward the centre
            assert!(p1.dir.dot(centre - p1.pos) > 0.0);
        }
    }

    #[test]
    fn test_random_facing_spawn_is_mirrored() {
        let config = SimulationConfig {
            random_spawn_facing: true,
            ..SimulationConfig::half_size()
        };
        let mut rng = RngState::new(11).to_rng();
        for _ in 0..16 {
            let arena = Arena::with_random_spawn(config.clone(), &mut rng).unwrap();
            assert_eq!(arena.ships[0].dir, -arena.ships[1].dir);
            assert_ne!(arena.ships[0].pos, arena.ships[1].pos);
        }
    }

    #[test]
    fn test_arena_rejects_bad_barrier() {
        let config = SimulationConfig {
            barriers: crate::settings::BarrierLayout::Custom {
                barriers: vec![crate::settings::BarrierSpec::new(
                    BarrierOrientation::Vertical,
                    Vec2::new(100.0, 100.0),
                    -5.0,
                )],
            },
            ..SimulationConfig::default()
        };
        assert!(matches!(
            Arena::new(config, Spawn::inward(0)),
            Err(ConfigError::DegenerateBarrier { index: 0, .. })
        ));
    }

    #[test]
    fn test_arena_rejects_zero_facing() {
        let spawn = Spawn {
            index: 0,
            facing: Vec2::ZERO,
        };
        assert_eq!(
            Arena::new(SimulationConfig::default(), spawn),
            Err(ConfigError::DegenerateSpawnFacing)
        );
    }

    #[test]
    fn test_arena_normalizes_facing_before_mirroring() {
        let spawn = Spawn {
            index: 2,
            facing: Vec2::new(0.0, 3.0),
        };
        let arena = Arena::new(SimulationConfig::default(), spawn).unwrap();
        assert_eq!(arena.ships[0].dir, DOWN);
        assert_eq!(arena.ships[1].dir, UP);
    }

    #[test]
    fn test_swap_seats() {
        let arena = Arena::new(SimulationConfig::default(), Spawn::inward(0)).unwrap();
        let swapped = arena.swap_seats();
        assert_eq!(swapped.ships[0].player, PlayerId::One);
        assert_eq!(swapped.ships[0].pos, arena.ships[1].pos);
        assert_eq!(swapped.ships[1].pos, arena.ships[0].pos);
    }
}
