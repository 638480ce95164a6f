//! Skull entities and the roster that owns them.

use rustc_hash::FxHashMap;

use super::conversion::{get_neighboring_opponents, ConversionQueue, PendingConversion};
use crate::board::{Board, Occupant};
use crate::core::{CubeCoord, GameError, GameRng, MatchConfig, SkullId, Team, TileId};

/// A placed skull.
#[derive(Clone, Debug)]
pub struct Skull {
    id: SkullId,
    team: Team,
    /// `None` once killed or converted.
    tile: Option<TileId>,
    coord: CubeCoord,
    summoned_by_player: bool,
    neighbors_to_convert: ConversionQueue,
    conversion_timer: f32,
    /// Seconds left before removal from the roster.
    dying: Option<f32>,
}

impl Skull {
    #[must_use]
    pub fn id(&self) -> SkullId {
        self.id
    }

    #[must_use]
    pub fn team(&self) -> Team {
        self.team
    }

    #[must_use]
    pub fn tile(&self) -> Option<TileId> {
        self.tile
    }

    /// Where the skull stands (or stood, once detached).
    #[must_use]
    pub fn coord(&self) -> CubeCoord {
        self.coord
    }

    /// Placed by a player action rather than by a conversion.
    #[must_use]
    pub fn summoned_by_player(&self) -> bool {
        self.summoned_by_player
    }

    /// Conversions still to fire, in firing order.
    #[must_use]
    pub fn neighbors_to_convert(&self) -> &[PendingConversion] {
        &self.neighbors_to_convert
    }

    #[must_use]
    pub fn conversion_timer(&self) -> f32 {
        self.conversion_timer
    }

    #[must_use]
    pub fn is_dying(&self) -> bool {
        self.dying.is_some()
    }

    /// Seconds until a killed skull leaves the roster.
    #[must_use]
    pub fn removal_delay(&self) -> Option<f32> {
        self.dying
    }
}

/// Something the roster did during `update`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkullEvent {
    /// `from` was replaced by `to`, now owned by `team`.
    Converted {
        coord: CubeCoord,
        from: SkullId,
        to: SkullId,
        team: Team,
    },
    /// The target tile no longer held the recorded skull.
    ConversionSkipped { coord: CubeCoord, skull: SkullId },
    /// A killed skull left the roster.
    Removed { skull: SkullId, team: Team },
}

/// Owns every skull in the match.
///
/// Tiles hold an `Occupant` pointing back here by id. Skulls are iterated in
/// id order so a tick is deterministic.
#[derive(Clone, Debug)]
pub struct SkullRoster {
    skulls: FxHashMap<SkullId, Skull>,
    next_id: u64,
    conversion_delay: f32,
    kill_fade_time: f32,
}

impl SkullRoster {
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            skulls: FxHashMap::default(),
            next_id: 1,
            conversion_delay: config.conversion_delay,
            kill_fade_time: config.kill_fade_time,
        }
    }

    #[must_use]
    pub fn get(&self, id: SkullId) -> Option<&Skull> {
        self.skulls.get(&id)
    }

    /// Skull standing on `tile`, if any.
    #[must_use]
    pub fn on_tile(&self, board: &Board, tile: TileId) -> Option<&Skull> {
        board.tile(tile).occupant().and_then(|o| self.get(o.skull))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.skulls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skulls.is_empty()
    }

    /// All skulls, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Skull> {
        let mut skulls: Vec<&Skull> = self.skulls.values().collect();
        skulls.sort_unstable_by_key(|s| s.id);
        skulls.into_iter()
    }

    /// Conversions still queued across all skulls.
    #[must_use]
    pub fn pending_conversions(&self) -> usize {
        self.skulls.values().map(|s| s.neighbors_to_convert.len()).sum()
    }

    /// No conversion chain is running.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.skulls.values().all(|s| s.neighbors_to_convert.is_empty())
    }

    /// Place a player-summoned skull and queue its conversions.
    ///
    /// The opponent neighbours are captured and shuffled once, here. Only the
    /// tile must be free; turn and eligibility checks belong to the caller.
    pub fn summon(
        &mut self,
        board: &mut Board,
        team: Team,
        tile: TileId,
        rng: &mut GameRng,
    ) -> Result<SkullId, GameError> {
        let target = board.tile(tile);
        if !target.is_free() {
            return Err(GameError::TileNotFree(target.coord()));
        }

        let mut pending = get_neighboring_opponents(board, tile, team);
        rng.shuffle(&mut pending);

        let id = self.place(board, team, tile, true);
        if let Some(skull) = self.skulls.get_mut(&id) {
            skull.neighbors_to_convert = pending;
            skull.conversion_timer = self.conversion_delay;
        }
        Ok(id)
    }

    fn place(&mut self, board: &mut Board, team: Team, tile: TileId, summoned_by_player: bool) -> SkullId {
        let id = SkullId(self.next_id);
        self.next_id += 1;

        let coord = board.tile(tile).coord();
        board.tile_mut(tile).set_occupant(Some(Occupant { skull: id, team }));
        self.skulls.insert(
            id,
            Skull {
                id,
                team,
                tile: Some(tile),
                coord,
                summoned_by_player,
                neighbors_to_convert: ConversionQueue::new(),
                conversion_timer: 0.0,
                dying: None,
            },
        );
        id
    }

    /// Detach a skull from its tile now and remove it after `delay`.
    ///
    /// Any conversions it still had queued are dropped. Returns `false` for
    /// an unknown or already-dying skull.
    pub fn kill(&mut self, board: &mut Board, id: SkullId, delay: f32) -> bool {
        let Some(skull) = self.skulls.get_mut(&id) else {
            return false;
        };
        if skull.dying.is_some() {
            return false;
        }

        if let Some(tile) = skull.tile.take() {
            if board.tile(tile).occupant().map(|o| o.skull) == Some(id) {
                board.tile_mut(tile).set_occupant(None);
            }
        }
        skull.neighbors_to_convert.clear();
        skull.dying = Some(delay);
        true
    }

    /// Advance conversion and removal timers.
    ///
    /// Each skull fires at most one conversion per call, so a chain plays out
    /// strictly one target at a time, `conversion_delay` apart.
    pub fn update(&mut self, board: &mut Board, dt: f32) -> Vec<SkullEvent> {
        let mut events = Vec::new();
        let mut ids: Vec<SkullId> = self.skulls.keys().copied().collect();
        ids.sort_unstable();

        for id in ids {
            let Some(skull) = self.skulls.get_mut(&id) else {
                continue;
            };

            if let Some(remaining) = skull.dying {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    let team = skull.team;
                    self.skulls.remove(&id);
                    board.update_tile_counts();
                    events.push(SkullEvent::Removed { skull: id, team });
                } else {
                    skull.dying = Some(remaining);
                }
                continue;
            }

            if skull.neighbors_to_convert.is_empty() {
                continue;
            }
            skull.conversion_timer -= dt;
            if skull.conversion_timer > 0.0 {
                continue;
            }
            skull.conversion_timer = self.conversion_delay;
            let target = skull.neighbors_to_convert.remove(0);
            let team = skull.team;

            events.push(self.convert(board, target, team));
        }

        events
    }

    /// Replace the skull recorded in `target` with a fresh one of `team`.
    fn convert(&mut self, board: &mut Board, target: PendingConversion, team: Team) -> SkullEvent {
        let tile = board.tile(target.tile);
        let coord = tile.coord();
        let still_there = tile.occupant() == Some(Occupant { skull: target.skull, team: team.opponent() });

        if !still_there {
            log::debug!("conversion at {} skipped: {} is gone", coord, target.skull);
            return SkullEvent::ConversionSkipped { coord, skull: target.skull };
        }

        self.kill(board, target.skull, self.kill_fade_time);
        let to = self.place(board, team, target.tile, false);
        board.update_tile_counts();
        log::debug!("{} at {} converted to {} ({})", target.skull, coord, team, to);

        SkullEvent::Converted { coord, from: target.skull, to, team }
    }

    /// Drop every skull without touching the board.
    pub fn clear(&mut self) {
        self.skulls.clear();
    }
}
