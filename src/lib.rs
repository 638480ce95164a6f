//! # hex-skulls
//!
//! Rules engine and board-state manager for a two-player, turn-based
//! hex-grid game. Players summon skulls onto tiles; a summon converts every
//! adjacent enemy skull, one after another. The match ends when the board
//! is full or neither side can move, and the team holding more tiles wins.
//!
//! ## Design Principles
//!
//! 1. **Arena, not references**: the board owns its tiles in a slot-indexed
//!    arena; tiles, skulls and controllers refer to each other by id.
//!
//! 2. **Frame-driven**: every delay (reveal, hide, kill, conversion, turn
//!    transition) is a countdown advanced by `GameManager::update`. There are
//!    no callbacks and no threads.
//!
//! 3. **Deterministic**: all randomness flows from one seeded `GameRng`, so
//!    a seed replays a whole match.
//!
//! ## Modules
//!
//! - `core`: Coordinates, teams, ids, RNG, configuration, actions, errors
//! - `board`: Layouts, tiles and the board arena with its derived state
//! - `skull`: Skull roster, summoning, conversion chains and kills
//! - `game`: Controllers, tutorial script and the match phase machine
//!
//! ## Logging
//!
//! The crate logs through the `log` facade and never installs a logger.

pub mod core;
pub mod board;
pub mod skull;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    CubeCoord, Direction,
    Team, TeamMap,
    SkullId, TileId,
    GameRng, GameRngState,
    MatchConfig,
    PlayerAction, ActionRecord,
    ConfigError, GameError,
};

pub use crate::board::{Board, BoardLayout, Occupant, Tile, TileVariant, TileVisibility};

pub use crate::skull::{Skull, SkullEvent, SkullRoster};

pub use crate::game::{
    GameManager, MatchMode, Phase,
    GameResult, MatchEvent, MatchOutcome,
    FrameContext, InputState, AudioSink, Presentation, Sound,
    Controller, ControllerKind, HumanController, ComputerController, TutorialScriptController,
};
