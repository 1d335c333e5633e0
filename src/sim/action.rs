//! Discrete ship actions
//!
//! Integer codes from agents map onto `Action` through an explicit table.
//! Codes outside the configured action set are rejected, never clamped.

use serde::{Deserialize, Serialize};

use super::state::PlayerId;
use crate::error::SimError;
use crate::settings::ActionSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    RotateClockwise,
    RotateCounterClockwise,
    MoveForward,
    Fire,
    StrafeLeft,
    StrafeRight,
}

/// Code -> action table. The basic action set uses the first four entries.
const ACTION_TABLE: [Action; 6] = [
    Action::RotateClockwise,
    Action::RotateCounterClockwise,
    Action::MoveForward,
    Action::Fire,
    Action::StrafeLeft,
    Action::StrafeRight,
];

impl Action {
    /// Decode an agent's action code for `player`
    pub fn from_code(code: u8, set: ActionSet, player: PlayerId) -> Result<Self, SimError> {
        let action_count = set.action_count();
        if code >= action_count {
            return Err(SimError::InvalidAction {
                player,
                code,
                action_count,
            });
        }
        Ok(ACTION_TABLE[code as usize])
    }

    pub fn code(&self) -> u8 {
        match self {
            Action::RotateClockwise => 0,
            Action::RotateCounterClockwise => 1,
            Action::MoveForward => 2,
            Action::Fire => 3,
            Action::StrafeLeft => 4,
            Action::StrafeRight => 5,
        }
    }

    /// Actions available in `set`, in code order
    pub fn all(set: ActionSet) -> &'static [Action] {
        &ACTION_TABLE[..set.action_count() as usize]
    }

    pub fn is_strafe(&self) -> bool {
        matches!(self, Action::StrafeLeft | Action::StrafeRight)
    }
}

/// Decode an optional code; `None` is a legal "no action this tick"
pub fn decode(code: Option<u8>, set: ActionSet, player: PlayerId) -> Result<Option<Action>, SimError> {
    code.map(|c| Action::from_code(c, set, player)).transpose()
}
