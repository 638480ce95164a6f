//! Board layouts and start tiles.
//!
//! A match is played on the full hex disk minus a fixed set of removed
//! tiles. Every layout is point-symmetric so neither team is favoured, and
//! no layout removes a start tile.

use serde::{Deserialize, Serialize};

use crate::core::{CubeCoord, GameRng, Team};

/// Blue's fixed start tiles (left edge).
pub const BLUE_START_COORDINATES: [CubeCoord; 2] =
    [CubeCoord::axial(-3, 1), CubeCoord::axial(-3, 2)];

/// Red's fixed start tiles (right edge).
pub const RED_START_COORDINATES: [CubeCoord; 2] =
    [CubeCoord::axial(3, -1), CubeCoord::axial(3, -2)];

const LAYOUT_A_REMOVED: [CubeCoord; 1] = [CubeCoord::ORIGIN];

const LAYOUT_B_REMOVED: [CubeCoord; 4] = [
    CubeCoord::axial(0, 2),
    CubeCoord::axial(0, -2),
    CubeCoord::axial(-1, 1),
    CubeCoord::axial(1, -1),
];

const LAYOUT_C_REMOVED: [CubeCoord; 6] = [
    CubeCoord::axial(3, 0),
    CubeCoord::axial(-3, 0),
    CubeCoord::axial(0, 3),
    CubeCoord::axial(0, -3),
    CubeCoord::axial(3, -3),
    CubeCoord::axial(-3, 3),
];

/// Tiles kept by the tutorial layout: the centre, one path tile per side
/// and the start tiles.
const TUTORIAL_KEPT: [CubeCoord; 6] = [
    CubeCoord::axial(-2, 1),
    CubeCoord::axial(2, -1),
    BLUE_START_COORDINATES[0],
    BLUE_START_COORDINATES[1],
    RED_START_COORDINATES[0],
    RED_START_COORDINATES[1],
];

/// Start tiles for a team.
#[must_use]
pub fn start_coordinates(team: Team) -> &'static [CubeCoord] {
    match team {
        Team::Blue => &BLUE_START_COORDINATES,
        Team::Red => &RED_START_COORDINATES,
    }
}

/// Which sprite variant a tile uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileVariant {
    BlueStart,
    RedStart,
    Normal,
}

impl TileVariant {
    /// Classify a coordinate by start-tile membership.
    #[must_use]
    pub fn classify(coord: CubeCoord) -> Self {
        if BLUE_START_COORDINATES.contains(&coord) {
            TileVariant::BlueStart
        } else if RED_START_COORDINATES.contains(&coord) {
            TileVariant::RedStart
        } else {
            TileVariant::Normal
        }
    }

    /// Sprite atlas key for this variant.
    #[must_use]
    pub const fn sprite_name(self) -> &'static str {
        match self {
            TileVariant::BlueStart => "hex_blue_starter",
            TileVariant::RedStart => "hex_red_starter",
            TileVariant::Normal => "hex",
        }
    }
}

/// Board layout selectable from the menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardLayout {
    /// Full board with the centre removed.
    #[default]
    A,
    /// Holes on the north/south axis and beside the centre.
    B,
    /// All six corners cut.
    C,
    /// One of A, B or C, chosen per match.
    Random,
    /// Compact board used by the tutorial.
    Tutorial,
}

impl BoardLayout {
    /// Layouts `Random` chooses between.
    pub const PLAYABLE: [BoardLayout; 3] = [BoardLayout::A, BoardLayout::B, BoardLayout::C];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            BoardLayout::A => "Board: A",
            BoardLayout::B => "Board: B",
            BoardLayout::C => "Board: C",
            BoardLayout::Random => "Board: Random",
            BoardLayout::Tutorial => "Board: Tutorial",
        }
    }

    /// The next menu option (A, B, C, Random, then back to A).
    #[must_use]
    pub const fn next_option(self) -> Self {
        match self {
            BoardLayout::A => BoardLayout::B,
            BoardLayout::B => BoardLayout::C,
            BoardLayout::C => BoardLayout::Random,
            BoardLayout::Random | BoardLayout::Tutorial => BoardLayout::A,
        }
    }

    /// Replace `Random` with a concrete playable layout.
    pub fn resolve(self, rng: &mut GameRng) -> Self {
        match self {
            BoardLayout::Random => rng
                .choose(&Self::PLAYABLE)
                .copied()
                .unwrap_or(BoardLayout::A),
            other => other,
        }
    }

    /// Coordinates removed from a board of `radius` by this layout.
    ///
    /// `Random` removes nothing; resolve it first.
    #[must_use]
    pub fn removed_coordinates(self, radius: u32) -> Vec<CubeCoord> {
        match self {
            BoardLayout::A => LAYOUT_A_REMOVED.to_vec(),
            BoardLayout::B => LAYOUT_B_REMOVED.to_vec(),
            BoardLayout::C => LAYOUT_C_REMOVED.to_vec(),
            BoardLayout::Random => Vec::new(),
            BoardLayout::Tutorial => CubeCoord::disk(CubeCoord::ORIGIN, radius)
                .filter(|c| c.length() > 1 && !TUTORIAL_KEPT.contains(c))
                .collect(),
        }
    }
}
