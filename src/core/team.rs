//! Teams and per-team data storage.
//!
//! ## Team
//!
//! The two sides of a match. Blue always sits on the left edge and is
//! human-controlled; red sits on the right edge.
//!
//! ## TeamMap
//!
//! Fixed two-slot storage indexed by `Team`, used for counters, valid-tile
//! lists and players.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One side of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    /// Both teams, blue first.
    pub const ALL: [Team; 2] = [Team::Blue, Team::Red];

    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }

    /// Slot index (blue = 0, red = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Team::Blue => 0,
            Team::Red => 1,
        }
    }

    /// Lowercase name, as used in sprite and log keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Team::Blue => "blue",
            Team::Red => "red",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-team data storage.
///
/// ## Example
///
/// ```
/// use hex_skulls::core::{Team, TeamMap};
///
/// let mut tiles: TeamMap<u32> = TeamMap::with_value(0);
/// tiles[Team::Red] += 3;
///
/// assert_eq!(tiles[Team::Blue], 0);
/// assert_eq!(tiles[Team::Red], 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    data: [T; 2],
}

impl<T> TeamMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(Team) -> T) -> Self {
        Self {
            data: [factory(Team::Blue), factory(Team::Red)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    #[must_use]
    pub fn get(&self, team: Team) -> &T {
        &self.data[team.index()]
    }

    pub fn get_mut(&mut self, team: Team) -> &mut T {
        &mut self.data[team.index()]
    }

    /// Iterate over (Team, &T) pairs, blue first.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        Team::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Team, &mut T) pairs, blue first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Team, &mut T)> {
        Team::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Borrow both entries mutably at once.
    pub fn both_mut(&mut self) -> (&mut T, &mut T) {
        let [blue, red] = &mut self.data;
        (blue, red)
    }
}

impl<T> Index<Team> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        self.get(team)
    }
}

impl<T> IndexMut<Team> for TeamMap<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        self.get_mut(team)
    }
}
