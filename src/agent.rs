//! Decision-making collaborators
//!
//! An agent maps an observation to an action code, or `None` for "no action
//! this tick". Agents never see or mutate the arena directly.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::settings::ActionSet;
use crate::sim::{Action, RngState, SimRng};

pub trait Agent {
    fn choose_action(&mut self, observation: &[f32]) -> Option<u8>;
}

impl<F> Agent for F
where
    F: FnMut(&[f32]) -> Option<u8>,
{
    fn choose_action(&mut self, observation: &[f32]) -> Option<u8> {
        self(observation)
    }
}

/// Uniformly random over the whole action set
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: SimRng,
    action_count: u8,
}

impl RandomAgent {
    pub fn new(set: ActionSet, seed: u64) -> Self {
        Self {
            rng: RngState::new(seed).to_rng(),
            action_count: set.action_count(),
        }
    }
}

impl Agent for RandomAgent {
    fn choose_action(&mut self, _observation: &[f32]) -> Option<u8> {
        Some(self.rng.random_range(0..self.action_count))
    }
}

/// Random, but never fires
#[derive(Debug, Clone)]
pub struct NonShooter {
    rng: SimRng,
    codes: Vec<u8>,
}

impl NonShooter {
    pub fn new(set: ActionSet, seed: u64) -> Self {
        let codes = Action::all(set)
            .iter()
            .filter(|a| **a != Action::Fire)
            .map(Action::code)
            .collect();
        Self {
            rng: RngState::new(seed).to_rng(),
            codes,
        }
    }
}

impl Agent for NonShooter {
    fn choose_action(&mut self, _observation: &[f32]) -> Option<u8> {
        self.codes.choose(&mut self.rng).copied()
    }
}

/// Replays a fixed list of codes in a loop
#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    script: Vec<Option<u8>>,
    cursor: usize,
}

impl ScriptedAgent {
    pub fn new(script: Vec<Option<u8>>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Loop over `actions`
    pub fn cycle(actions: &[Action]) -> Self {
        Self::new(actions.iter().map(|a| Some(a.code())).collect())
    }
}

impl Agent for ScriptedAgent {
    fn choose_action(&mut self, _observation: &[f32]) -> Option<u8> {
        if self.script.is_empty() {
            return None;
        }
        let code = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        code
    }
}

/// Never acts
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl Agent for Idle {
    fn choose_action(&mut self, _observation: &[f32]) -> Option<u8> {
        None
    }
}
