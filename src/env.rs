//! Turn-synchronous episode controller
//!
//! `ShooterEnv` wraps an arena, an opponent agent and a seeded RNG behind a
//! `reset` / `step` interface. Each `step` runs exactly one tick.

use rand::Rng;
use serde::Serialize;

use crate::agent::Agent;
use crate::error::SimError;
use crate::settings::SimulationConfig;
use crate::sim::action::decode;
use crate::sim::tick::{apply_action, ensure_active, resolve};
use crate::sim::{Arena, Barrier, MatchResult, PlayerId, RngState, SimRng, observe};

/// Auxiliary step information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StepInfo {
    pub tick: u64,
    pub result: Option<MatchResult>,
}

/// Observation, reward and done flag from player 1's perspective
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub observation: Vec<f32>,
    /// -1.0, 0.0 or 1.0
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

/// Read-only snapshot for a renderer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShipView {
    pub player: PlayerId,
    pub pos: (f32, f32),
    /// Degrees, [0, 360)
    pub angle: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProjectileView {
    pub owner: PlayerId,
    pub pos: (f32, f32),
    pub radius: f32,
}

/// Everything a renderer draws after a tick. Dead ships and their
/// projectiles are left out.
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame<'a> {
    pub ships: Vec<ShipView>,
    pub projectiles: Vec<ProjectileView>,
    pub barriers: &'a [Barrier],
    pub message: &'static str,
}

impl<'a> RenderFrame<'a> {
    pub fn from_arena(arena: &'a Arena) -> Self {
        let live = || arena.ships.iter().filter(|s| !s.dead);
        Self {
            ships: live()
                .map(|s| ShipView {
                    player: s.player,
                    pos: (s.pos.x, s.pos.y),
                    angle: s.angle(),
                    radius: s.radius,
                })
                .collect(),
            projectiles: live()
                .flat_map(|s| {
                    s.projectiles.iter().map(move |p| ProjectileView {
                        owner: s.player,
                        pos: (p.pos.x, p.pos.y),
                        radius: p.radius,
                    })
                })
                .collect(),
            barriers: &arena.barriers,
            message: arena.message(),
        }
    }
}

/// Two-player environment driven from player 1's seat
///
/// The RNG is cloned alongside the arena at the start of each step, so a
/// rejected opponent action can be rolled back.
pub struct ShooterEnv<O: Agent, R: Rng = SimRng> {
    config: SimulationConfig,
    opponent: O,
    rng: R,
    arena: Arena,
    episodes: u64,
}

impl<O: Agent> ShooterEnv<O, SimRng> {
    /// Environment with a seeded PCG stream
    pub fn with_seed(config: SimulationConfig, opponent: O, seed: u64) -> Result<Self, SimError> {
        Self::new(config, opponent, RngState::new(seed).to_rng())
    }
}

impl<O: Agent, R: Rng + Clone> ShooterEnv<O, R> {
    /// Validate the config and build the first episode
    pub fn new(config: SimulationConfig, opponent: O, mut rng: R) -> Result<Self, SimError> {
        let arena = Arena::with_random_spawn(config.clone(), &mut rng)?;
        Ok(Self {
            config,
            opponent,
            rng,
            arena,
            episodes: 1,
        })
    }

    /// Rebuild the arena with a fresh spawn. Returns player 1's first observation.
    pub fn reset(&mut self) -> Result<StepResult, SimError> {
        self.arena = Arena::with_random_spawn(self.config.clone(), &mut self.rng)?;
        self.episodes += 1;
        log::debug!("Episode {} reset", self.episodes);
        Ok(StepResult {
            observation: self.observation(PlayerId::One),
            reward: 0.0,
            done: false,
            info: StepInfo::default(),
        })
    }

    /// Run one tick with player 1's action code
    ///
    /// Player 1's action is applied first. The opponent then picks player 2's
    /// action from an observation that already reflects it. If either code is
    /// invalid the arena and RNG are left as they were.
    pub fn step(&mut self, action: Option<u8>) -> Result<StepResult, SimError> {
        ensure_active(&self.arena)?;
        let set = self.config.action_set;
        let player1 = decode(action, set, PlayerId::One)?;

        let saved = (self.arena.clone(), self.rng.clone());
        apply_action(&mut self.arena, PlayerId::One, player1, &mut self.rng);

        let opponent_obs = self.observation(PlayerId::Two);
        let player2 = match decode(self.opponent.choose_action(&opponent_obs), set, PlayerId::Two) {
            Ok(player2) => player2,
            Err(e) => {
                (self.arena, self.rng) = saved;
                return Err(e);
            }
        };
        apply_action(&mut self.arena, PlayerId::Two, player2, &mut self.rng);

        let outcome = resolve(&mut self.arena);
        Ok(StepResult {
            observation: self.observation(PlayerId::One),
            reward: f32::from(outcome.reward),
            done: outcome.done,
            info: StepInfo {
                tick: self.arena.time_ticks,
                result: outcome.result,
            },
        })
    }

    pub fn observation(&self, player: PlayerId) -> Vec<f32> {
        observe(&self.arena, player)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn opponent_mut(&mut self) -> &mut O {
        &mut self.opponent
    }

    /// Episodes started so far, including the current one
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    pub fn render_frame(&self) -> RenderFrame<'_> {
        RenderFrame::from_arena(&self.arena)
    }
}

/// Play one episode from a fresh reset. Returns player 1's total return.
pub fn play_episode<O: Agent, R: Rng + Clone, A: Agent>(
    env: &mut ShooterEnv<O, R>,
    agent: &mut A,
) -> Result<f32, SimError> {
    let mut state = env.reset()?;
    let mut total = 0.0;
    while !state.done {
        let action = agent.choose_action(&state.observation);
        state = env.step(action)?;
        total += state.reward;
    }
    Ok(total)
}
