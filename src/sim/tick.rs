//! Per-tick state transition
//!
//! Order matters for fairness: both actions, then movement, then culling,
//! then hit resolution. A projectile stopped by a barrier is culled before
//! hits are tested, so it can never score on the tick it hits.
//!
//! `tick` runs a whole step. The action phase (`apply_action`) and the
//! resolve phase (`resolve`) are also public, so a controller can ask player
//! 2 for a move after player 1 has acted.

use rand::Rng;

use super::action::Action;
use super::state::{Arena, ArenaPhase, MatchResult, PlayerId, Projectile, Ship};
use crate::error::SimError;

/// Actions for a single tick. `None` is a legal no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub player1: Option<Action>,
    pub player2: Option<Action>,
}

impl TickInput {
    pub fn new(player1: Option<Action>, player2: Option<Action>) -> Self {
        Self { player1, player2 }
    }

    fn for_player(&self, player: PlayerId) -> Option<Action> {
        match player {
            PlayerId::One => self.player1,
            PlayerId::Two => self.player2,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Indexed by `PlayerId::index`: was that ship hit this tick
    pub ships_hit: [bool; 2],
    pub result: Option<MatchResult>,
    /// Player 1's reward: -1, 0 or +1
    pub reward: i8,
    pub done: bool,
}

/// Advance the arena by one tick
///
/// Fails without touching state if the episode already ended or an action
/// is outside the configured action set.
pub fn tick<R: Rng>(arena: &mut Arena, input: &TickInput, rng: &mut R) -> Result<TickOutcome, SimError> {
    ensure_active(arena)?;
    for player in [PlayerId::One, PlayerId::Two] {
        check_action(arena, player, input.for_player(player))?;
    }

    // Actions, player 1 first
    for player in [PlayerId::One, PlayerId::Two] {
        apply_action(arena, player, input.for_player(player), rng);
    }
    Ok(resolve(arena))
}

/// Error if the episode has already ended
pub fn ensure_active(arena: &Arena) -> Result<(), SimError> {
    if arena.phase == ArenaPhase::Terminated {
        return Err(SimError::EpisodeTerminated);
    }
    Ok(())
}

/// Error if `action` is outside the configured action set
pub fn check_action(arena: &Arena, player: PlayerId, action: Option<Action>) -> Result<(), SimError> {
    let set = arena.config.action_set;
    match action {
        Some(action) if !Action::all(set).contains(&action) => Err(SimError::InvalidAction {
            player,
            code: action.code(),
            action_count: set.action_count(),
        }),
        _ => Ok(()),
    }
}

/// Action phase for one ship. `None` is a no-op. The action must already
/// have passed `check_action`.
pub fn apply_action<R: Rng>(arena: &mut Arena, player: PlayerId, action: Option<Action>, rng: &mut R) {
    if let Some(action) = action {
        arena.ships[player.index()].apply_action(action, &arena.config, &arena.barriers, rng);
    }
}

/// Resolve phase: movement, culling, hits and termination. Runs once per
/// tick after both ships have acted.
pub fn resolve(arena: &mut Arena) -> TickOutcome {
    arena.time_ticks += 1;
    let bounds = arena.bounds;
    let fudge = arena.config.fudge_factor;

    // Movement
    for ship in arena.ships.iter_mut().filter(|s| !s.dead) {
        ship.advance(bounds);
        for projectile in &mut ship.projectiles {
            projectile.advance(&arena.barriers);
        }
    }

    // Cull projectiles that left the arena or hit a barrier
    for ship in &mut arena.ships {
        ship.projectiles.retain(|p| p.is_live(bounds));
    }

    // Hit resolution. Both directions are tested before anything is removed,
    // so the outcome does not depend on evaluation order.
    let [ship1, ship2] = &arena.ships;
    let hits_by_p1 = projectile_hits(&ship1.projectiles, ship2, fudge);
    let hits_by_p2 = projectile_hits(&ship2.projectiles, ship1, fudge);
    let ships_hit = [hits_by_p2.contains(&true), hits_by_p1.contains(&true)];

    arena.ships[0].projectiles = consume(&arena.ships[0].projectiles, &hits_by_p1);
    arena.ships[1].projectiles = consume(&arena.ships[1].projectiles, &hits_by_p2);

    let result = match ships_hit {
        [true, true] => Some(MatchResult::MutualDestruction),
        [false, true] => Some(MatchResult::Player1Wins),
        [true, false] => Some(MatchResult::Player2Wins),
        [false, false] => match arena.config.max_ticks {
            Some(limit) if arena.time_ticks >= limit => Some(MatchResult::TimeLimit),
            _ => None,
        },
    };

    for (ship, hit) in arena.ships.iter_mut().zip(ships_hit) {
        if hit {
            ship.dead = true;
        }
    }

    if let Some(result) = result {
        arena.phase = ArenaPhase::Terminated;
        arena.result = Some(result);
        log::info!("Episode over after {} ticks: {}", arena.time_ticks, result.message());
    } else {
        log::trace!("Tick {} resolved with no hits", arena.time_ticks);
    }

    TickOutcome {
        ships_hit,
        result,
        reward: result.map(|r| r.reward()).unwrap_or(0),
        done: result.is_some(),
    }
}

/// For each projectile: does it connect with `target`
fn projectile_hits(projectiles: &[Projectile], target: &Ship, fudge: f32) -> Vec<bool> {
    projectiles.iter().map(|p| p.hits(target, fudge)).collect()
}

/// Rebuild the projectile list without the ones that scored
fn consume(projectiles: &[Projectile], hit: &[bool]) -> Vec<Projectile> {
    projectiles
        .iter()
        .zip(hit)
        .filter(|&(_, &hit)| !hit)
        .map(|(p, _)| p.clone())
        .collect()
}
