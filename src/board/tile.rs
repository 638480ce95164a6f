//! A single board cell.
//!
//! ## Lifecycle
//!
//! Tiles are created once when the board is generated and linked to their
//! neighbours in a second pass. Each match then drives them through
//!
//! ```text
//! Hidden -> Revealing(delay, timer) -> Revealed -> Hiding(delay) -> Hidden
//! ```
//!
//! The board counts these transitions; its `revealed_tiles` and
//! `enabled_tiles` counters gate match setup and teardown.

use serde::{Deserialize, Serialize};

use super::layout::TileVariant;
use crate::core::{CubeCoord, Direction, SkullId, Team, TeamMap, TileId};

/// The skull standing on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occupant {
    pub skull: SkullId,
    pub team: Team,
}

/// Reveal/hide state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TileVisibility {
    Hidden,
    /// Waiting `delay`, then animating for `timer` seconds.
    Revealing { delay: f32, timer: f32 },
    Revealed,
    /// Waiting `delay` before disappearing.
    Hiding { delay: f32 },
}

/// A visibility change completed during `Tile::update`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileTransition {
    Revealed,
    Hidden,
}

/// What `Tile::hide` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HideOutcome {
    /// The tile was revealed and will hide after its delay.
    Scheduled,
    /// The tile was still revealing; it is now hidden and was never counted
    /// as revealed.
    Cancelled,
    /// Nothing to do.
    Ignored,
}

/// A board cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    coord: CubeCoord,
    variant: TileVariant,
    /// Part of the current match's layout.
    in_play: bool,
    /// Revealed and accepting skulls.
    enabled: bool,
    visibility: TileVisibility,
    reveal_duration: f32,
    occupant: Option<Occupant>,
    neighbors: [Option<TileId>; 6],
    can_summon: TeamMap<bool>,
    highlight: Option<Team>,
}

impl Tile {
    pub(crate) fn new(id: TileId, coord: CubeCoord) -> Self {
        Self {
            id,
            coord,
            variant: TileVariant::classify(coord),
            in_play: false,
            enabled: false,
            visibility: TileVisibility::Hidden,
            reveal_duration: 0.0,
            occupant: None,
            neighbors: [None; 6],
            can_summon: TeamMap::with_value(false),
            highlight: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[must_use]
    pub fn coord(&self) -> CubeCoord {
        self.coord
    }

    #[must_use]
    pub fn variant(&self) -> TileVariant {
        self.variant
    }

    #[must_use]
    pub fn in_play(&self) -> bool {
        self.in_play
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn visibility(&self) -> TileVisibility {
        self.visibility
    }

    #[must_use]
    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    /// Team of the skull on this tile, if any.
    #[must_use]
    pub fn occupant_team(&self) -> Option<Team> {
        self.occupant.map(|o| o.team)
    }

    /// In play and unoccupied.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.enabled && self.occupant.is_none()
    }

    /// Derived summon eligibility, as of the last board recompute.
    #[must_use]
    pub fn can_summon(&self, team: Team) -> bool {
        self.can_summon[team]
    }

    #[must_use]
    pub fn blue_can_summon(&self) -> bool {
        self.can_summon[Team::Blue]
    }

    #[must_use]
    pub fn red_can_summon(&self) -> bool {
        self.can_summon[Team::Red]
    }

    #[must_use]
    pub fn highlight(&self) -> Option<Team> {
        self.highlight
    }

    /// Linked neighbour in `direction`. `None` past the board edge.
    #[must_use]
    pub fn neighbor(&self, direction: Direction) -> Option<TileId> {
        self.neighbors[direction.index()]
    }

    /// All linked neighbours.
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, TileId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.neighbor(d).map(|id| (d, id)))
    }

    /// Drawn this frame.
    #[must_use]
    pub fn visible(&self) -> bool {
        match self.visibility {
            TileVisibility::Hidden => false,
            TileVisibility::Revealing { delay, .. } => delay <= 0.0,
            TileVisibility::Revealed | TileVisibility::Hiding { .. } => true,
        }
    }

    /// Reveal animation progress in `[0, 1]`.
    #[must_use]
    pub fn reveal_progress(&self) -> f32 {
        match self.visibility {
            TileVisibility::Hidden => 0.0,
            TileVisibility::Revealing { timer, .. } => {
                if self.reveal_duration <= 0.0 {
                    1.0
                } else {
                    ((self.reveal_duration - timer) / self.reveal_duration).clamp(0.0, 1.0)
                }
            }
            TileVisibility::Revealed | TileVisibility::Hiding { .. } => 1.0,
        }
    }

    pub(crate) fn set_neighbor(&mut self, direction: Direction, tile: Option<TileId>) {
        self.neighbors[direction.index()] = tile;
    }

    pub(crate) fn set_occupant(&mut self, occupant: Option<Occupant>) {
        self.occupant = occupant;
    }

    pub(crate) fn set_can_summon(&mut self, team: Team, value: bool) {
        self.can_summon[team] = value;
    }

    pub(crate) fn set_highlight(&mut self, team: Option<Team>) {
        self.highlight = team;
    }

    /// Reset per-match state and mark whether the tile is in the layout.
    pub(crate) fn reset_for_match(&mut self, in_play: bool) {
        self.in_play = in_play;
        self.enabled = false;
        self.visibility = TileVisibility::Hidden;
        self.occupant = None;
        self.can_summon = TeamMap::with_value(false);
        self.highlight = None;
    }

    /// Start revealing after `delay` seconds.
    ///
    /// Returns `false` if the tile is not hidden.
    pub(crate) fn reveal(&mut self, delay: f32, duration: f32) -> bool {
        if self.visibility != TileVisibility::Hidden {
            return false;
        }
        self.reveal_duration = duration;
        self.visibility = TileVisibility::Revealing {
            delay,
            timer: duration,
        };
        true
    }

    /// Start hiding after `delay` seconds. The tile leaves play immediately.
    pub(crate) fn hide(&mut self, delay: f32) -> HideOutcome {
        match self.visibility {
            TileVisibility::Revealed => {
                self.enabled = false;
                self.highlight = None;
                self.visibility = TileVisibility::Hiding { delay };
                HideOutcome::Scheduled
            }
            TileVisibility::Revealing { .. } => {
                self.enabled = false;
                self.visibility = TileVisibility::Hidden;
                HideOutcome::Cancelled
            }
            TileVisibility::Hidden | TileVisibility::Hiding { .. } => HideOutcome::Ignored,
        }
    }

    /// Advance timers by `dt`.
    pub(crate) fn update(&mut self, dt: f32) -> Option<TileTransition> {
        match self.visibility {
            TileVisibility::Revealing { delay, timer } => {
                let delay = (delay - dt).max(0.0);
                let timer = if delay <= 0.0 { (timer - dt).max(0.0) } else { timer };

                if delay <= 0.0 && timer <= 0.0 {
                    self.visibility = TileVisibility::Revealed;
                    self.enabled = true;
                    Some(TileTransition::Revealed)
                } else {
                    self.visibility = TileVisibility::Revealing { delay, timer };
                    None
                }
            }
            TileVisibility::Hiding { delay } => {
                let delay = delay - dt;
                if delay <= 0.0 {
                    self.visibility = TileVisibility::Hidden;
                    Some(TileTransition::Hidden)
                } else {
                    self.visibility = TileVisibility::Hiding { delay };
                    None
                }
            }
            TileVisibility::Hidden | TileVisibility::Revealed => None,
        }
    }
}
