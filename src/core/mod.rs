//! Core types: coordinates, teams, ids, RNG, configuration, actions, errors.
//!
//! Everything here is independent of the board and the match flow.

pub mod coord;
pub mod team;
pub mod ids;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use coord::{CubeCoord, Direction, BOARD_LAYOUT, TILE_HEIGHT, TILE_WIDTH};
pub use team::{Team, TeamMap};
pub use ids::{SkullId, TileId};
pub use rng::{GameRng, GameRngState};
pub use config::MatchConfig;
pub use action::{ActionRecord, PlayerAction};
pub use error::{ConfigError, GameError};
