//! Skulls and the conversion chain.
//!
//! ## Conversion
//!
//! A skull summoned by a player captures its opponent-occupied neighbours
//! once, in shuffled order, and converts them one per `conversion_delay`.
//! A conversion replaces the target with a new skull of the capturing team;
//! converted skulls never start a chain of their own, so a summon reaches at
//! most six tiles.
//!
//! ## Kill
//!
//! Killing detaches a skull from its tile immediately and removes it from
//! the roster after a delay.

mod conversion;
mod roster;

pub use conversion::{get_neighboring_opponents, ConversionQueue, PendingConversion};
pub use roster::{Skull, SkullEvent, SkullRoster};
