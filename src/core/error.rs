//! Error types.
//!
//! Rule violations are returned as `GameError` and, at the match level,
//! logged and dropped without touching state. Nothing here is fatal.

use thiserror::Error;

use super::coord::CubeCoord;
use super::team::Team;

/// A rejected board or turn operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("tile {0} does not exist")]
    UnknownTile(CubeCoord),

    #[error("tile {0} is already on the board")]
    DuplicateTile(CubeCoord),

    #[error("tile {0} is not free")]
    TileNotFree(CubeCoord),

    #[error("{team} cannot summon on tile {coord}")]
    NotSummonable { team: Team, coord: CubeCoord },

    #[error("tile {coord} holds no {team} skull")]
    NotOwnSkull { team: Team, coord: CubeCoord },

    #[error("{0} has no skull marked for sacrifice")]
    NoSacrificeMarked(Team),

    #[error("tile {coord} is not a sacrifice destination for {team}")]
    InvalidSacrificeTarget { team: Team, coord: CubeCoord },

    #[error("it is not {0}'s turn")]
    NotYourTurn(Team),

    #[error("{0}'s turn has already ended")]
    TurnAlreadyEnded(Team),

    #[error("no match is in progress")]
    NoMatchInProgress,

    #[error("a match is already in progress")]
    MatchInProgress,
}

/// An invalid `MatchConfig`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("board radius must be at least 3 to hold the start tiles, got {0}")]
    RadiusTooSmall(u32),

    #[error("`{name}` must be a finite, non-negative number of seconds, got {value}")]
    InvalidDuration { name: &'static str, value: f32 },

    #[error("`{name}` must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}
