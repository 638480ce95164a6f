//! Player actions.
//!
//! Controllers never mutate the board directly. They return a
//! `PlayerAction` and the game manager validates and applies it.
//! Actions name tiles by coordinate so they stay meaningful in logs and
//! history after the board is torn down.

use serde::{Deserialize, Serialize};

use super::coord::CubeCoord;
use super::team::Team;

/// Something a player wants to do on their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Summon a skull on a valid summon tile. Ends the turn.
    Summon(CubeCoord),
    /// Mark one of the player's own skulls for sacrifice.
    MarkSacrifice(CubeCoord),
    /// Unmark the current sacrifice.
    CancelSacrifice,
    /// Sacrifice the marked skull and summon on a destination two tiles
    /// away. Ends the turn.
    SacrificeSummon {
        sacrifice: CubeCoord,
        destination: CubeCoord,
    },
}

impl PlayerAction {
    /// Whether applying this action ends the acting player's turn.
    #[must_use]
    pub const fn ends_turn(self) -> bool {
        matches!(
            self,
            PlayerAction::Summon(_) | PlayerAction::SacrificeSummon { .. }
        )
    }
}

/// An applied action, for match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub team: Team,
    pub action: PlayerAction,
    /// Turn number the action was taken on (starts at 1).
    pub turn: u32,
}
