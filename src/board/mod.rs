//! The hex board: layouts, tiles and the tile arena.

pub mod layout;
pub mod tile;
pub mod grid;

pub use layout::{start_coordinates, BoardLayout, TileVariant, BLUE_START_COORDINATES, RED_START_COORDINATES};
pub use tile::{HideOutcome, Occupant, Tile, TileTransition, TileVisibility};
pub use grid::{Board, SACRIFICE_DISTANCE};
