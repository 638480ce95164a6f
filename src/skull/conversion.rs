//! Conversion targets.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;
use crate::core::{Direction, SkullId, Team, TileId};

/// One opponent skull queued for conversion.
///
/// Records the skull that stood on the tile when the chain was built so a
/// changed occupant can be detected when the conversion fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConversion {
    pub tile: TileId,
    pub skull: SkullId,
    pub direction: Direction,
}

/// A tile has at most six neighbours.
pub type ConversionQueue = SmallVec<[PendingConversion; 6]>;

/// Opponent-occupied neighbours of `tile`, from `team`'s point of view.
///
/// Returned in direction order; the roster shuffles them.
#[must_use]
pub fn get_neighboring_opponents(board: &Board, tile: TileId, team: Team) -> ConversionQueue {
    board
        .tile(tile)
        .neighbors()
        .filter_map(|(direction, id)| {
            let occupant = board.tile(id).occupant()?;
            (occupant.team != team).then_some(PendingConversion {
                tile: id,
                skull: occupant.skull,
                direction,
            })
        })
        .collect()
}
