//! Identifiers for board entities.
//!
//! Tiles and skulls refer to each other by id rather than by reference:
//!
//! - `TileId`: slot index into the board's tile arena. Stable for the
//!   lifetime of the board (tiles are never removed, only disabled).
//! - `SkullId`: key into the skull roster. Never reused within a session,
//!   so a stale id simply fails to resolve.

use serde::{Deserialize, Serialize};

/// Slot index of a tile in the board arena.
///
/// Only a `Board` mints these, so outside the crate an id always comes from
/// a board lookup:
///
/// ```compile_fail
/// let id = hex_skulls::core::TileId(3);
/// ```
///
/// ```compile_fail
/// let id = hex_skulls::core::TileId::new(3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub(crate) u32);

impl TileId {
    #[must_use]
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Unique identifier of a placed skull.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkullId(pub u64);

impl SkullId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SkullId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Skull({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_id_index() {
        assert_eq!(TileId::new(7).index(), 7);
        assert_eq!(format!("{}", TileId::new(3)), "Tile(3)");
    }

    #[test]
    fn test_skull_id_display() {
        assert_eq!(SkullId(42).raw(), 42);
        assert_eq!(format!("{}", SkullId(42)), "Skull(42)");
    }

    #[test]
    fn test_serialization() {
        let id = TileId(12);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: TileId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
