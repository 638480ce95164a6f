//! Cube coordinates for the hex board.
//!
//! Every tile is addressed by a `(q, r, s)` triple with `q + r + s == 0`.
//! The layout is flat-topped: increasing `q` moves right, increasing `r`
//! moves up the screen.
//!
//! ## Usage
//!
//! ```
//! use hex_skulls::core::{CubeCoord, Direction};
//!
//! let origin = CubeCoord::ORIGIN;
//! let north = origin.neighbor(Direction::North);
//!
//! assert_eq!(origin.distance(north), 1);
//! assert_eq!(CubeCoord::disk(CubeCoord::ORIGIN, 2).count(), 19);
//! ```

use glam::Vec2;
use hexx::{EdgeDirection, Hex, HexLayout, HexOrientation};
use serde::{Deserialize, Serialize};

/// Width of one tile sprite in world units.
pub const TILE_WIDTH: f32 = 14.0;

/// Height of one tile sprite in world units.
pub const TILE_HEIGHT: f32 = 11.0;

/// Flat-topped projection with world `y` growing down the screen.
pub const BOARD_LAYOUT: HexLayout = HexLayout {
    orientation: HexOrientation::Flat,
    origin: Vec2::ZERO,
    scale: Vec2::new(TILE_WIDTH, -TILE_HEIGHT),
};

/// A cube coordinate on the hex grid.
///
/// Wraps an axial `hexx::Hex` (`x` is `q`, `y` is `r`); `s` is derived, so
/// the zero-sum invariant always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeCoord(Hex);

impl CubeCoord {
    /// The centre of the board.
    pub const ORIGIN: Self = Self(Hex::ZERO);

    /// Create a coordinate from all three components.
    ///
    /// Returns `None` if the components do not sum to zero.
    #[must_use]
    pub const fn new(q: i32, r: i32, s: i32) -> Option<Self> {
        if q + r + s == 0 {
            Some(Self(Hex::new(q, r)))
        } else {
            None
        }
    }

    /// Create a coordinate from `q` and `r`, deriving `s = -q - r`.
    #[must_use]
    pub const fn axial(q: i32, r: i32) -> Self {
        Self(Hex::new(q, r))
    }

    #[must_use]
    pub const fn q(self) -> i32 {
        self.0.x()
    }

    #[must_use]
    pub const fn r(self) -> i32 {
        self.0.y()
    }

    #[must_use]
    pub const fn s(self) -> i32 {
        self.0.z()
    }

    /// The underlying axial hex.
    #[must_use]
    pub const fn hex(self) -> Hex {
        self.0
    }

    /// The components as a tuple.
    #[must_use]
    pub const fn to_tuple(self) -> (i32, i32, i32) {
        (self.q(), self.r(), self.s())
    }

    /// The adjacent coordinate in `direction`.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        Self(self.0.neighbor(direction.edge()))
    }

    /// Hex distance in tiles.
    #[must_use]
    pub const fn distance(self, other: Self) -> u32 {
        self.0.unsigned_distance_to(other.0)
    }

    /// Distance from the board centre.
    #[must_use]
    pub const fn length(self) -> u32 {
        self.0.ulength()
    }

    /// Project to world space.
    #[must_use]
    pub fn world_position(self) -> Vec2 {
        BOARD_LAYOUT.hex_to_world_pos(self.0)
    }

    /// Every coordinate within `radius` of `center`, each exactly once.
    ///
    /// Scans the bounding cube in `q`, `r`, `s` order and keeps the
    /// zero-sum triples, so the order is stable across runs.
    pub fn disk(center: Self, radius: u32) -> impl Iterator<Item = Self> {
        let radius = radius as i32;
        let (cq, cr, cs) = center.to_tuple();
        (cq - radius..=cq + radius).flat_map(move |q| {
            (cr - radius..=cr + radius).flat_map(move |r| {
                (cs - radius..=cs + radius).filter_map(move |s| Self::new(q, r, s))
            })
        })
    }

    /// Number of coordinates in a disk of `radius`.
    #[must_use]
    pub const fn disk_size(radius: u32) -> usize {
        Hex::range_count(radius) as usize
    }

    /// Coordinates at exactly `radius` from `center`.
    pub fn ring(center: Self, radius: u32) -> impl Iterator<Item = Self> {
        Self::disk(center, radius).filter(move |c| c.distance(center) == radius)
    }

    /// Point reflection through the origin.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        Self(self.0.const_neg())
    }
}

impl From<Hex> for CubeCoord {
    fn from(hex: Hex) -> Self {
        Self(hex)
    }
}

impl From<CubeCoord> for Hex {
    fn from(coord: CubeCoord) -> Self {
        coord.0
    }
}

impl PartialOrd for CubeCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CubeCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.q(), self.r()).cmp(&(other.q(), other.r()))
    }
}

impl std::fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.q(), self.r(), self.s())
    }
}

/// The six neighbour directions of a flat-topped hex.
///
/// `r` grows up the screen here while hexx names flat edges with `y`
/// growing down, so north maps to hexx's bottom edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    /// All directions, in neighbour-slot order.
    pub const ALL: [Direction; 6] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// The hexx edge this direction crosses.
    #[must_use]
    pub const fn edge(self) -> EdgeDirection {
        match self {
            Direction::NorthWest => EdgeDirection::FLAT_BOTTOM_LEFT,
            Direction::North => EdgeDirection::FLAT_BOTTOM,
            Direction::NorthEast => EdgeDirection::FLAT_BOTTOM_RIGHT,
            Direction::SouthWest => EdgeDirection::FLAT_TOP_LEFT,
            Direction::South => EdgeDirection::FLAT_TOP,
            Direction::SouthEast => EdgeDirection::FLAT_TOP_RIGHT,
        }
    }

    /// Unit offset for one step in this direction.
    #[must_use]
    pub const fn offset(self) -> CubeCoord {
        CubeCoord(self.edge().into_hex())
    }

    /// The direction pointing back.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::NorthWest => Direction::SouthEast,
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::South => Direction::North,
            Direction::SouthEast => Direction::NorthWest,
        }
    }

    /// Slot index in a tile's neighbour array.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Direction::NorthWest => 0,
            Direction::North => 1,
            Direction::NorthEast => 2,
            Direction::SouthWest => 3,
            Direction::South => 4,
            Direction::SouthEast => 5,
        }
    }

    /// Short name used by effect sprites ("nw", "n", ...).
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Direction::NorthWest => "nw",
            Direction::North => "n",
            Direction::NorthEast => "ne",
            Direction::SouthWest => "sw",
            Direction::South => "s",
            Direction::SouthEast => "se",
        }
    }
}
