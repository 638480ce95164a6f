//! The board: tile arena, adjacency and per-turn derived state.
//!
//! ## Ownership
//!
//! The board owns every tile in a slot-indexed arena and keeps a
//! coordinate index beside it. Tiles link to each other by `TileId`, and
//! occupancy is stored as an `Occupant` (skull id plus team) so adjacency
//! questions never need the skull roster.
//!
//! ## Derived state
//!
//! Summon eligibility, sacrifice destinations and tile counts are always
//! rebuilt from scratch by a full scan. Callers recompute after any change
//! to occupancy or layout; nothing is patched incrementally.

use glam::Vec2;
use rustc_hash::FxHashMap;

use super::layout::{start_coordinates, BoardLayout};
use super::tile::{HideOutcome, Tile, TileTransition};
use crate::core::{CubeCoord, Direction, GameError, GameRng, MatchConfig, Team, TeamMap, TileId};
use crate::skull::SkullRoster;

/// Hex distance between a sacrificed skull and its summon destination.
pub const SACRIFICE_DISTANCE: u32 = 2;

/// Hex board.
#[derive(Clone, Debug)]
pub struct Board {
    radius: u32,
    tiles: Vec<Tile>,
    index: FxHashMap<CubeCoord, TileId>,

    /// Layout of the current match, after resolving `Random`.
    layout: Option<BoardLayout>,
    /// Tiles in play for the current match, in reveal order.
    new_game_tiles: Vec<TileId>,

    valid_tiles: TeamMap<Vec<TileId>>,
    sacrifice_tiles: TeamMap<Vec<TileId>>,
    hovered_tile: Option<TileId>,

    total_tiles: u32,
    free_tiles: u32,
    team_tiles: TeamMap<u32>,
    enabled_tiles: u32,
    revealed_tiles: u32,
}

impl Board {
    /// Create an empty board of the given radius.
    #[must_use]
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            tiles: Vec::with_capacity(CubeCoord::disk_size(radius)),
            index: FxHashMap::default(),
            layout: None,
            new_game_tiles: Vec::new(),
            valid_tiles: TeamMap::default(),
            sacrifice_tiles: TeamMap::default(),
            hovered_tile: None,
            total_tiles: 0,
            free_tiles: 0,
            team_tiles: TeamMap::with_value(0),
            enabled_tiles: 0,
            revealed_tiles: 0,
        }
    }

    /// Create a board holding every coordinate within `radius`, linked.
    #[must_use]
    pub fn generate(radius: u32) -> Self {
        let mut board = Self::new(radius);
        for coord in CubeCoord::disk(CubeCoord::ORIGIN, radius) {
            board.insert_tile(coord);
        }
        board.set_neighbors();
        board
    }

    /// Insert a tile. Fails if the coordinate is already present.
    pub fn add_tile(&mut self, coord: CubeCoord) -> Result<TileId, GameError> {
        if self.index.contains_key(&coord) {
            return Err(GameError::DuplicateTile(coord));
        }
        Ok(self.insert_tile(coord))
    }

    /// Append a tile for a coordinate not yet on the board.
    fn insert_tile(&mut self, coord: CubeCoord) -> TileId {
        let id = TileId::new(self.tiles.len() as u32);
        self.tiles.push(Tile::new(id, coord));
        self.index.insert(coord, id);
        id
    }

    /// Link every tile to its existing neighbours.
    ///
    /// Run once after all tiles are added. Edge tiles get fewer than six.
    pub fn set_neighbors(&mut self) {
        for i in 0..self.tiles.len() {
            let coord = self.tiles[i].coord();
            for direction in Direction::ALL {
                let neighbor = self.index.get(&coord.neighbor(direction)).copied();
                self.tiles[i].set_neighbor(direction, neighbor);
            }
        }
    }

    // === Lookup ===

    #[must_use]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Tile at a coordinate. `None` outside the board.
    #[must_use]
    pub fn get_tile(&self, coord: CubeCoord) -> Option<&Tile> {
        self.index.get(&coord).map(|id| &self.tiles[id.index()])
    }

    /// Id of the tile at a coordinate.
    #[must_use]
    pub fn tile_id(&self, coord: CubeCoord) -> Option<TileId> {
        self.index.get(&coord).copied()
    }

    /// Tile by id.
    ///
    /// Ids are only handed out by this board, so a foreign id is a bug.
    #[must_use]
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id.index()]
    }

    /// All tiles in arena order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn distance(&self, a: TileId, b: TileId) -> u32 {
        self.tile(a).coord().distance(self.tile(b).coord())
    }

    /// Whether `coord` is one of `team`'s start tiles.
    #[must_use]
    pub fn is_start_tile(&self, team: Team, coord: CubeCoord) -> bool {
        start_coordinates(team).contains(&coord)
    }

    // === Match lifecycle ===

    /// Layout of the current match.
    #[must_use]
    pub fn layout(&self) -> Option<BoardLayout> {
        self.layout
    }

    /// Tiles in play this match.
    #[must_use]
    pub fn new_game_tiles(&self) -> &[TileId] {
        &self.new_game_tiles
    }

    /// Reset per-match state and apply a layout.
    ///
    /// `Random` is resolved with `rng`. Removed tiles stay disabled and are
    /// left out of `new_game_tiles`. Returns the layout actually used.
    pub fn setup_board_for_new_game(&mut self, layout: BoardLayout, rng: &mut GameRng) -> BoardLayout {
        let layout = layout.resolve(rng);
        let removed = layout.removed_coordinates(self.radius);

        self.total_tiles = 0;
        self.free_tiles = 0;
        self.team_tiles = TeamMap::with_value(0);
        self.enabled_tiles = 0;
        self.revealed_tiles = 0;
        self.hovered_tile = None;
        self.valid_tiles = TeamMap::default();
        self.sacrifice_tiles = TeamMap::default();
        self.new_game_tiles.clear();

        for tile in &mut self.tiles {
            let in_play = !removed.contains(&tile.coord());
            tile.reset_for_match(in_play);
            if in_play {
                self.new_game_tiles.push(tile.id());
            }
        }

        self.total_tiles = self.new_game_tiles.len() as u32;
        self.layout = Some(layout);
        log::debug!(
            "board: layout {:?} with {} of {} tiles",
            layout,
            self.total_tiles,
            self.tiles.len()
        );
        layout
    }

    /// Reveal the match tiles in shuffled order, one every `reveal_stagger`.
    pub fn reveal_tiles(&mut self, rng: &mut GameRng, config: &MatchConfig) {
        rng.shuffle(&mut self.new_game_tiles);
        for (i, &id) in self.new_game_tiles.iter().enumerate() {
            let delay = i as f32 * config.reveal_stagger;
            if self.tiles[id.index()].reveal(delay, config.reveal_duration) {
                self.enabled_tiles += 1;
            }
        }
    }

    /// Remove every skull and hide every tile, in shuffled order.
    ///
    /// Skull `i` is killed after `i * kill_stagger`; tile `i` hides after
    /// `hide_offset + i * hide_stagger`, so pieces vanish before their tiles.
    pub fn tear_down(&mut self, skulls: &mut SkullRoster, rng: &mut GameRng, config: &MatchConfig) {
        let mut order: Vec<TileId> = self.tiles.iter().map(Tile::id).collect();
        rng.shuffle(&mut order);

        for (i, id) in order.into_iter().enumerate() {
            let step = i as f32;
            if let Some(occupant) = self.tiles[id.index()].occupant() {
                skulls.kill(self, occupant.skull, step * config.kill_stagger);
            }
            match self.tiles[id.index()].hide(config.hide_offset + step * config.hide_stagger) {
                HideOutcome::Scheduled | HideOutcome::Cancelled => {
                    self.enabled_tiles = self.enabled_tiles.saturating_sub(1);
                }
                HideOutcome::Ignored => {}
            }
        }

        self.valid_tiles = TeamMap::default();
        self.sacrifice_tiles = TeamMap::default();
        self.hovered_tile = None;
    }

    /// Advance reveal/hide timers and count completed transitions.
    pub fn update(&mut self, dt: f32) {
        for tile in &mut self.tiles {
            match tile.update(dt) {
                Some(TileTransition::Revealed) => self.revealed_tiles += 1,
                Some(TileTransition::Hidden) => {
                    self.revealed_tiles = self.revealed_tiles.saturating_sub(1);
                }
                None => {}
            }
        }
    }

    /// Tiles in play (revealing or revealed).
    #[must_use]
    pub fn enabled_tiles(&self) -> u32 {
        self.enabled_tiles
    }

    /// Tiles whose reveal has finished and that have not finished hiding.
    #[must_use]
    pub fn revealed_tiles(&self) -> u32 {
        self.revealed_tiles
    }

    /// Every tile in play has finished revealing.
    #[must_use]
    pub fn is_fully_revealed(&self) -> bool {
        self.enabled_tiles > 0 && self.revealed_tiles == self.enabled_tiles
    }

    // === Derived state ===

    /// Rebuild summon eligibility for both teams.
    ///
    /// A free tile is valid for a team if it is one of that team's start
    /// tiles or touches one of that team's skulls. A tile can be valid for
    /// both teams at once.
    pub fn update_valid_tiles_for_summoning(&mut self) {
        let (blue, red) = self.valid_tiles.both_mut();
        blue.clear();
        red.clear();

        for i in 0..self.tiles.len() {
            let tile = &self.tiles[i];
            let free = tile.is_free();
            let coord = tile.coord();

            let mut eligible = TeamMap::with_value(false);
            if free {
                for team in Team::ALL {
                    let adjacent = tile
                        .neighbors()
                        .any(|(_, n)| self.tiles[n.index()].occupant_team() == Some(team));
                    eligible[team] = adjacent || start_coordinates(team).contains(&coord);
                }
            }

            let tile = &mut self.tiles[i];
            for team in Team::ALL {
                tile.set_can_summon(team, eligible[team]);
                if eligible[team] {
                    self.valid_tiles[team].push(tile.id());
                }
            }
        }
    }

    /// Tiles `team` may summon on, as of the last recompute.
    #[must_use]
    pub fn valid_tiles(&self, team: Team) -> &[TileId] {
        &self.valid_tiles[team]
    }

    #[must_use]
    pub fn valid_blue_tiles(&self) -> &[TileId] {
        &self.valid_tiles[Team::Blue]
    }

    #[must_use]
    pub fn valid_red_tiles(&self) -> &[TileId] {
        &self.valid_tiles[Team::Red]
    }

    /// Rebuild sacrifice destinations for the skull on `sacrifice_tile`.
    ///
    /// Destinations are free tiles exactly two steps away that are not the
    /// opponent's start tiles. Only the sacrificing team's list is filled;
    /// the other is cleared. Returns that team, or `None` if the tile is
    /// empty.
    pub fn update_valid_tiles_for_sacrifice(&mut self, sacrifice_tile: TileId) -> Option<Team> {
        self.clear_sacrifice_tiles();

        let origin = self.tile(sacrifice_tile);
        let team = origin.occupant_team()?;
        let from = origin.coord();

        let destinations: Vec<TileId> = self
            .tiles
            .iter()
            .filter(|t| {
                t.is_free()
                    && t.coord().distance(from) == SACRIFICE_DISTANCE
                    && !self.is_start_tile(team.opponent(), t.coord())
            })
            .map(Tile::id)
            .collect();

        self.sacrifice_tiles[team] = destinations;
        Some(team)
    }

    /// Sacrifice destinations for `team`, as of the last recompute.
    #[must_use]
    pub fn sacrifice_tiles(&self, team: Team) -> &[TileId] {
        &self.sacrifice_tiles[team]
    }

    pub fn clear_sacrifice_tiles(&mut self) {
        let (blue, red) = self.sacrifice_tiles.both_mut();
        blue.clear();
        red.clear();
    }

    /// Whether any of `team`'s skulls has a sacrifice destination.
    #[must_use]
    pub fn has_sacrifice_moves(&self, team: Team) -> bool {
        self.tiles
            .iter()
            .filter(|t| t.occupant_team() == Some(team))
            .any(|origin| {
                self.tiles.iter().any(|t| {
                    t.is_free()
                        && t.coord().distance(origin.coord()) == SACRIFICE_DISTANCE
                        && !self.is_start_tile(team.opponent(), t.coord())
                })
            })
    }

    #[must_use]
    pub fn blue_has_sacrifice_moves(&self) -> bool {
        self.has_sacrifice_moves(Team::Blue)
    }

    #[must_use]
    pub fn red_has_sacrifice_moves(&self) -> bool {
        self.has_sacrifice_moves(Team::Red)
    }

    /// Recount free and per-team tiles.
    pub fn update_tile_counts(&mut self) {
        let mut free = 0;
        let mut teams = TeamMap::with_value(0);
        for tile in &self.tiles {
            if tile.is_free() {
                free += 1;
            }
            if let Some(team) = tile.occupant_team() {
                teams[team] += 1;
            }
        }
        self.free_tiles = free;
        self.team_tiles = teams;
    }

    /// Tiles in this match's layout.
    #[must_use]
    pub fn total_tiles(&self) -> u32 {
        self.total_tiles
    }

    #[must_use]
    pub fn free_tiles(&self) -> u32 {
        self.free_tiles
    }

    #[must_use]
    pub fn team_tiles(&self, team: Team) -> u32 {
        self.team_tiles[team]
    }

    #[must_use]
    pub fn blue_tiles(&self) -> u32 {
        self.team_tiles[Team::Blue]
    }

    #[must_use]
    pub fn red_tiles(&self) -> u32 {
        self.team_tiles[Team::Red]
    }

    /// Share of the layout held by `team`, for the score bar.
    #[must_use]
    pub fn score_ratio(&self, team: Team) -> f32 {
        if self.total_tiles == 0 {
            0.0
        } else {
            self.team_tiles[team] as f32 / self.total_tiles as f32
        }
    }

    // === Presentation state ===

    /// Find the enabled tile under the cursor.
    pub fn update_hover(&mut self, cursor: Vec2, hover_radius: f32) -> Option<TileId> {
        self.hovered_tile = self
            .tiles
            .iter()
            .filter(|t| t.enabled())
            .find(|t| t.coord().world_position().distance(cursor) < hover_radius)
            .map(Tile::id);
        self.hovered_tile
    }

    #[must_use]
    pub fn hovered_tile(&self) -> Option<TileId> {
        self.hovered_tile
    }

    /// Highlight `team`'s valid summon tiles, or clear all highlights.
    pub fn refresh_highlights(&mut self, team: Option<Team>) {
        self.apply_highlights(team, |board, team| board.valid_tiles[team].clone());
    }

    /// Highlight `team`'s sacrifice destinations.
    pub fn highlight_sacrifice_tiles(&mut self, team: Team) {
        self.apply_highlights(Some(team), |board, team| board.sacrifice_tiles[team].clone());
    }

    fn apply_highlights(&mut self, team: Option<Team>, select: impl Fn(&Self, Team) -> Vec<TileId>) {
        for tile in &mut self.tiles {
            tile.set_highlight(None);
        }
        if let Some(team) = team {
            for id in select(self, team) {
                self.tiles[id.index()].set_highlight(Some(team));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tile::{Occupant, TileVisibility};
    use crate::core::SkullId;
    use crate::skull::SkullEvent;

    /// Board with every tile of `layout` revealed.
    fn revealed_board(radius: u32, layout: BoardLayout) -> Board {
        let mut board = Board::generate(radius);
        let mut rng = GameRng::new(42);
        board.setup_board_for_new_game(layout, &mut rng);
        board.reveal_tiles(&mut rng, &MatchConfig::instant());
        board.update(0.0);
        board
    }

    fn place(board: &mut Board, coord: CubeCoord, team: Team, skull: u64) {
        let id = board.tile_id(coord).unwrap();
        board.tile_mut(id).set_occupant(Some(Occupant { skull: SkullId(skull), team }));
    }

    #[test]
    fn test_generate_sizes() {
        for radius in 0..5 {
            let board = Board::generate(radius);
            assert_eq!(board.len(), CubeCoord::disk_size(radius));
        }
    }

    #[test]
    fn test_add_tile_rejects_duplicates() {
        let mut board = Board::new(1);
        assert!(board.add_tile(CubeCoord::ORIGIN).is_ok());
        assert_eq!(
            board.add_tile(CubeCoord::ORIGIN),
            Err(GameError::DuplicateTile(CubeCoord::ORIGIN))
        );
    }

    #[test]
    fn test_get_tile_outside_board() {
        let board = Board::generate(1);
        assert!(board.get_tile(CubeCoord::axial(2, 0)).is_none());
        assert!(board.get_tile(CubeCoord::axial(1, 0)).is_some());
    }

    #[test]
    fn test_neighbor_counts() {
        let board = Board::generate(1);
        let center = board.get_tile(CubeCoord::ORIGIN).unwrap();
        assert_eq!(center.neighbors().count(), 6);

        // Ring tiles touch the centre and two ring tiles.
        let edge = board.get_tile(CubeCoord::axial(1, -1)).unwrap();
        assert_eq!(edge.neighbors().count(), 3);
    }

    #[test]
    fn test_neighbor_symmetry() {
        let board = Board::generate(3);
        for tile in board.tiles() {
            for (direction, neighbor) in tile.neighbors() {
                let back = board.tile(neighbor).neighbor(direction.opposite());
                assert_eq!(back, Some(tile.id()));
            }
        }
    }

    #[test]
    fn test_setup_excludes_removed_tiles() {
        let mut board = Board::generate(3);
        let mut rng = GameRng::new(1);
        let layout = board.setup_board_for_new_game(BoardLayout::C, &mut rng);

        assert_eq!(layout, BoardLayout::C);
        assert_eq!(board.total_tiles(), 37 - 6);
        assert_eq!(board.new_game_tiles().len(), 31);
        let corner = board.get_tile(CubeCoord::axial(3, 0)).unwrap();
        assert!(!corner.in_play());
    }

    #[test]
    fn test_setup_resolves_random() {
        let mut board = Board::generate(3);
        let mut rng = GameRng::new(5);
        let layout = board.setup_board_for_new_game(BoardLayout::Random, &mut rng);
        assert!(BoardLayout::PLAYABLE.contains(&layout));
        assert_eq!(board.layout(), Some(layout));
    }

    #[test]
    fn test_reveal_stagger_and_counters() {
        let mut board = Board::generate(3);
        let mut rng = GameRng::new(3);
        let config = MatchConfig::default();
        board.setup_board_for_new_game(BoardLayout::A, &mut rng);
        board.reveal_tiles(&mut rng, &config);

        assert_eq!(board.enabled_tiles(), 36);
        assert_eq!(board.revealed_tiles(), 0);
        assert!(!board.is_fully_revealed());

        // Last tile waits 35 * 0.05s, then animates for 2s.
        board.update(1.0);
        assert!(board.revealed_tiles() < 36);
        for _ in 0..40 {
            board.update(0.1);
        }
        assert_eq!(board.revealed_tiles(), 36);
        assert!(board.is_fully_revealed());

        let removed = board.get_tile(CubeCoord::ORIGIN).unwrap();
        assert!(!removed.enabled());
    }

    #[test]
    fn test_valid_tiles_from_start_coordinates() {
        let mut board = revealed_board(3, BoardLayout::A);
        board.update_valid_tiles_for_summoning();

        let blue: Vec<_> = board.valid_blue_tiles().iter().map(|&id| board.tile(id).coord()).collect();
        assert_eq!(blue.len(), 2);
        for coord in start_coordinates(Team::Blue) {
            assert!(blue.contains(coord));
        }
        assert_eq!(board.valid_red_tiles().len(), 2);
    }

    #[test]
    fn test_valid_tiles_from_adjacency() {
        let mut board = revealed_board(3, BoardLayout::A);
        place(&mut board, CubeCoord::axial(-3, 1), Team::Blue, 1);
        board.update_valid_tiles_for_summoning();

        for &id in board.valid_blue_tiles() {
            let tile = board.tile(id);
            assert!(tile.is_free());
            assert!(tile.blue_can_summon());
        }

        // The occupied start tile is no longer valid; its free neighbours are.
        let occupied = board.tile_id(CubeCoord::axial(-3, 1)).unwrap();
        assert!(!board.valid_blue_tiles().contains(&occupied));
        let north = board.tile_id(CubeCoord::axial(-3, 2)).unwrap();
        let northeast = board.tile_id(CubeCoord::axial(-2, 1)).unwrap();
        assert!(board.valid_blue_tiles().contains(&north));
        assert!(board.valid_blue_tiles().contains(&northeast));
    }

    #[test]
    fn test_contested_tile_valid_for_both() {
        let mut board = revealed_board(3, BoardLayout::B);
        place(&mut board, CubeCoord::axial(-1, 0), Team::Blue, 1);
        place(&mut board, CubeCoord::axial(1, 0), Team::Red, 2);
        board.update_valid_tiles_for_summoning();

        let shared = board.get_tile(CubeCoord::axial(0, 0)).unwrap();
        assert!(shared.blue_can_summon());
        assert!(shared.red_can_summon());
        assert!(board.valid_blue_tiles().contains(&shared.id()));
        assert!(board.valid_red_tiles().contains(&shared.id()));
    }

    #[test]
    fn test_sacrifice_destinations() {
        let mut board = revealed_board(3, BoardLayout::A);
        let origin = CubeCoord::axial(1, 0);
        place(&mut board, origin, Team::Blue, 1);
        let origin_id = board.tile_id(origin).unwrap();

        assert_eq!(board.update_valid_tiles_for_sacrifice(origin_id), Some(Team::Blue));
        assert!(board.sacrifice_tiles(Team::Red).is_empty());

        let destinations: Vec<_> = board
            .sacrifice_tiles(Team::Blue)
            .iter()
            .map(|&id| board.tile(id).coord())
            .collect();
        assert!(!destinations.is_empty());
        for coord in &destinations {
            assert_eq!(coord.distance(origin), 2);
            assert!(!RED_START.contains(coord));
        }
        // Both red start tiles are two steps from (1, 0, -1) but excluded.
        let expected = CubeCoord::disk(origin, 2)
            .filter(|c| c.distance(origin) == 2)
            .filter(|c| board.get_tile(*c).is_some_and(Tile::is_free))
            .filter(|c| !RED_START.contains(c))
            .count();
        assert_eq!(destinations.len(), expected);
    }

    const RED_START: [CubeCoord; 2] = crate::board::layout::RED_START_COORDINATES;

    #[test]
    fn test_sacrifice_on_empty_tile() {
        let mut board = revealed_board(3, BoardLayout::A);
        let id = board.tile_id(CubeCoord::axial(1, 0)).unwrap();
        assert_eq!(board.update_valid_tiles_for_sacrifice(id), None);
        assert!(board.sacrifice_tiles(Team::Blue).is_empty());
    }

    #[test]
    fn test_has_sacrifice_moves() {
        let mut board = revealed_board(3, BoardLayout::A);
        assert!(!board.blue_has_sacrifice_moves());

        place(&mut board, CubeCoord::axial(-3, 1), Team::Blue, 1);
        assert!(board.blue_has_sacrifice_moves());
        assert!(!board.red_has_sacrifice_moves());
    }

    #[test]
    fn test_tile_counts() {
        let mut board = revealed_board(3, BoardLayout::A);
        place(&mut board, CubeCoord::axial(1, -1), Team::Blue, 1);
        place(&mut board, CubeCoord::axial(-1, 1), Team::Red, 2);
        place(&mut board, CubeCoord::axial(-1, 0), Team::Red, 3);
        board.update_tile_counts();

        assert_eq!(board.blue_tiles(), 1);
        assert_eq!(board.red_tiles(), 2);
        assert_eq!(board.free_tiles(), 36 - 3);
    }

    #[test]
    fn test_tear_down_hides_everything() {
        let mut board = revealed_board(3, BoardLayout::A);
        let mut skulls = SkullRoster::new(&MatchConfig::default());
        let mut rng = GameRng::new(9);
        let config = MatchConfig::default();

        let tile = board.tile_id(CubeCoord::axial(-3, 1)).unwrap();
        skulls.summon(&mut board, Team::Blue, tile, &mut rng).unwrap();
        board.update_tile_counts();
        assert_eq!(board.blue_tiles(), 1);

        board.tear_down(&mut skulls, &mut rng, &config);
        assert_eq!(board.enabled_tiles(), 0);
        assert!(board.tile(tile).occupant().is_none());

        // Hides finish within 0.5 + 36 * 0.05 seconds.
        for _ in 0..30 {
            board.update(0.1);
        }
        assert_eq!(board.revealed_tiles(), 0);
    }

    #[test]
    fn test_reveal_delay_follows_list_position() {
        let mut board = Board::generate(3);
        let mut rng = GameRng::new(8);
        let config = MatchConfig::default();
        board.setup_board_for_new_game(BoardLayout::B, &mut rng);
        let mut before: Vec<TileId> = board.new_game_tiles().to_vec();
        board.reveal_tiles(&mut rng, &config);

        for (i, &id) in board.new_game_tiles().iter().enumerate() {
            assert_eq!(
                board.tile(id).visibility(),
                TileVisibility::Revealing {
                    delay: i as f32 * config.reveal_stagger,
                    timer: config.reveal_duration,
                },
                "tile {i}"
            );
        }

        // Shuffled, not filtered.
        let mut after = board.new_game_tiles().to_vec();
        before.sort();
        after.sort();
        assert_eq!(before, after);
        for tile in board.tiles().filter(|t| !t.in_play()) {
            assert_eq!(tile.visibility(), TileVisibility::Hidden);
        }
    }

    /// Skulls on the board before a teardown, with their tiles.
    fn summon_spread(board: &mut Board, skulls: &mut SkullRoster, rng: &mut GameRng) -> Vec<(TileId, SkullId)> {
        let spots = [
            (Team::Blue, -3, 1),
            (Team::Blue, -1, 2),
            (Team::Blue, 0, -3),
            (Team::Red, 3, -1),
            (Team::Red, 1, -2),
            (Team::Red, 0, 3),
        ];
        spots
            .into_iter()
            .map(|(team, q, r)| {
                let tile = board.tile_id(CubeCoord::axial(q, r)).unwrap();
                (tile, skulls.summon(board, team, tile, rng).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_tear_down_delays_follow_list_position() {
        let mut board = revealed_board(3, BoardLayout::A);
        let config = MatchConfig::default();
        let mut skulls = SkullRoster::new(&config);
        let mut rng = GameRng::new(10);
        let placed = summon_spread(&mut board, &mut skulls, &mut rng);

        board.tear_down(&mut skulls, &mut rng, &config);

        // Every revealed tile hides at `hide_offset + i * hide_stagger` for
        // a distinct position `i` in the shuffled order.
        let mut position = vec![None; board.len()];
        let mut seen = Vec::new();
        for tile in board.tiles() {
            match tile.visibility() {
                TileVisibility::Hiding { delay } => {
                    let i = ((delay - config.hide_offset) / config.hide_stagger).round() as usize;
                    assert!(i < board.len());
                    assert_eq!(delay, config.hide_offset + i as f32 * config.hide_stagger);
                    assert!(!seen.contains(&i), "position {i} used twice");
                    seen.push(i);
                    position[tile.id().index()] = Some(i);
                }
                other => {
                    assert!(!tile.in_play(), "{} left {:?}", tile.coord(), other);
                }
            }
        }
        assert_eq!(seen.len(), 36);

        // The skull on tile `i` is removed after `i * kill_stagger`.
        for (tile, skull) in placed {
            let i = position[tile.index()].unwrap();
            let removal = skulls.get(skull).unwrap().removal_delay().unwrap();
            assert_eq!(removal, i as f32 * config.kill_stagger);
            let TileVisibility::Hiding { delay } = board.tile(tile).visibility() else {
                panic!("occupied tile not hiding");
            };
            assert!(removal < delay);
        }
    }

    #[test]
    fn test_tear_down_removes_skulls_before_their_tiles() {
        let mut board = revealed_board(3, BoardLayout::A);
        let config = MatchConfig::default();
        let mut skulls = SkullRoster::new(&config);
        let mut rng = GameRng::new(11);
        let placed = summon_spread(&mut board, &mut skulls, &mut rng);

        board.tear_down(&mut skulls, &mut rng, &config);

        let mut removed_at = FxHashMap::default();
        let mut hidden_at = FxHashMap::default();
        for frame in 0..400 {
            for event in skulls.update(&mut board, 0.01) {
                if let SkullEvent::Removed { skull, .. } = event {
                    removed_at.insert(skull, frame);
                }
            }
            board.update(0.01);
            for &(tile, _) in &placed {
                if board.tile(tile).visibility() == TileVisibility::Hidden {
                    hidden_at.entry(tile).or_insert(frame);
                }
            }
        }

        assert!(skulls.is_empty());
        assert_eq!(board.revealed_tiles(), 0);
        for (tile, skull) in placed {
            let removed = removed_at[&skull];
            let hidden = hidden_at[&tile];
            assert!(removed < hidden, "{skull} removed at {removed}, tile hidden at {hidden}");
        }
    }

    #[test]
    fn test_generate_ids_match_arena_slots() {
        let board = Board::generate(3);
        for (slot, tile) in board.tiles().enumerate() {
            assert_eq!(tile.id().index(), slot);
            assert_eq!(board.tile_id(tile.coord()), Some(tile.id()));
        }
        let coords: Vec<_> = board.tiles().map(Tile::coord).collect();
        let disk: Vec<_> = CubeCoord::disk(CubeCoord::ORIGIN, 3).collect();
        assert_eq!(coords, disk);
    }

    #[test]
    fn test_hover() {
        let mut board = revealed_board(3, BoardLayout::A);
        let coord = CubeCoord::axial(1, 1);
        let cursor = coord.world_position() + Vec2::new(2.0, -1.0);
        let hovered = board.update_hover(cursor, 10.0);
        assert_eq!(hovered, board.tile_id(coord));

        // Removed centre tile is never hovered.
        assert_eq!(board.update_hover(Vec2::ZERO, 5.0), None);
    }

    #[test]
    fn test_highlights() {
        let mut board = revealed_board(3, BoardLayout::A);
        board.update_valid_tiles_for_summoning();
        board.refresh_highlights(Some(Team::Red));

        let highlighted: Vec<_> = board.tiles().filter(|t| t.highlight().is_some()).map(Tile::id).collect();
        assert_eq!(highlighted, board.valid_red_tiles().to_vec());

        board.refresh_highlights(None);
        assert!(board.tiles().all(|t| t.highlight().is_none()));
    }

    #[test]
    fn test_score_ratio() {
        let mut board = revealed_board(3, BoardLayout::A);
        assert_eq!(board.score_ratio(Team::Blue), 0.0);
        place(&mut board, CubeCoord::axial(-3, 1), Team::Blue, 1);
        board.update_tile_counts();
        assert!((board.score_ratio(Team::Blue) - 1.0 / 36.0).abs() < 1e-6);
    }
}
