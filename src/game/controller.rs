//! Player controllers.
//!
//! Each team is driven by a `Controller`. The manager calls
//! `on_turn_start` when the team's turn begins and `update_input` every
//! frame of that turn until it returns an action. Controllers only propose
//! actions; the manager validates and applies them.

use crate::board::Board;
use crate::core::{CubeCoord, GameRng, PlayerAction, Team, TileId};
use crate::skull::get_neighboring_opponents;

use super::context::InputState;
use super::tutorial::{MatchSnapshot, TutorialScript};

/// What a controller sees during its turn.
#[derive(Clone, Copy, Debug)]
pub struct TurnView<'a> {
    pub team: Team,
    pub board: &'a Board,
    pub input: &'a InputState,
    /// Tile of the skull this team marked for sacrifice.
    pub sacrifice: Option<TileId>,
    pub delta_time: f32,
}

/// Which kind of controller drives a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControllerKind {
    Human,
    Computer,
    TutorialScript,
}

/// Turn-taking strategy for one team.
pub trait Controller: std::fmt::Debug {
    fn kind(&self) -> ControllerKind;

    /// A new match is starting.
    fn reset(&mut self) {}

    /// The team's turn has begun. Valid tiles are already up to date.
    fn on_turn_start(&mut self, _team: Team, _board: &Board) {}

    /// Propose an action for this frame, if any.
    fn update_input(&mut self, view: &TurnView<'_>, rng: &mut GameRng) -> Option<PlayerAction>;

    /// Watch the match. Returns instruction text to show, if it changed.
    fn observe(&mut self, _snapshot: &MatchSnapshot, _dt: f32) -> Option<&'static str> {
        None
    }

    /// Current tutorial step, for scripted controllers.
    fn tutorial_step(&self) -> Option<usize> {
        None
    }
}

/// Mouse-driven player.
///
/// Primary click on a hovered tile summons, or completes a marked sacrifice
/// when the tile is a sacrifice destination. Secondary click on one of the
/// team's own skulls marks it for sacrifice; a second secondary click
/// cancels.
#[derive(Clone, Debug, Default)]
pub struct HumanController;

impl HumanController {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Controller for HumanController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Human
    }

    fn update_input(&mut self, view: &TurnView<'_>, _rng: &mut GameRng) -> Option<PlayerAction> {
        let board = view.board;

        if view.input.secondary_pressed {
            if view.sacrifice.is_some() {
                return Some(PlayerAction::CancelSacrifice);
            }
            let tile = board.tile(board.hovered_tile()?);
            return (tile.occupant_team() == Some(view.team))
                .then_some(PlayerAction::MarkSacrifice(tile.coord()));
        }

        if !view.input.primary_pressed {
            return None;
        }
        let hovered = board.hovered_tile()?;
        let tile = board.tile(hovered);

        if let Some(sacrifice) = view.sacrifice {
            if board.sacrifice_tiles(view.team).contains(&hovered) {
                return Some(PlayerAction::SacrificeSummon {
                    sacrifice: board.tile(sacrifice).coord(),
                    destination: tile.coord(),
                });
            }
        }

        (tile.is_free() && tile.can_summon(view.team)).then_some(PlayerAction::Summon(tile.coord()))
    }
}

/// Computer opponent.
///
/// Waits `think_time`, then summons on the valid tile that converts the most
/// opponent skulls. Ties are broken at random.
#[derive(Clone, Debug)]
pub struct ComputerController {
    think_time: f32,
    timer: f32,
}

impl ComputerController {
    #[must_use]
    pub fn new(think_time: f32) -> Self {
        Self {
            think_time,
            timer: think_time,
        }
    }

    /// Count down the thinking pause. Returns `true` once it is over.
    fn tick(&mut self, dt: f32) -> bool {
        self.timer -= dt;
        self.timer <= 0.0
    }

    /// Best summon for `team`, or `None` when nothing is valid.
    pub fn choose_move(board: &Board, team: Team, rng: &mut GameRng) -> Option<CubeCoord> {
        let scored: Vec<(TileId, usize)> = board
            .valid_tiles(team)
            .iter()
            .map(|&id| (id, get_neighboring_opponents(board, id, team).len()))
            .collect();
        let best = scored.iter().map(|&(_, score)| score).max()?;
        let candidates: Vec<TileId> = scored
            .into_iter()
            .filter(|&(_, score)| score == best)
            .map(|(id, _)| id)
            .collect();

        rng.choose(&candidates).map(|&id| board.tile(id).coord())
    }
}

impl Controller for ComputerController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Computer
    }

    fn on_turn_start(&mut self, _team: Team, _board: &Board) {
        self.timer = self.think_time;
    }

    fn update_input(&mut self, view: &TurnView<'_>, rng: &mut GameRng) -> Option<PlayerAction> {
        if !self.tick(view.delta_time) {
            return None;
        }
        Self::choose_move(view.board, view.team, rng).map(PlayerAction::Summon)
    }
}

/// Red in the tutorial: plays the script's moves and shows its text.
#[derive(Clone, Debug)]
pub struct TutorialScriptController {
    script: TutorialScript,
    computer: ComputerController,
    planned: Option<CubeCoord>,
}

impl TutorialScriptController {
    #[must_use]
    pub fn new(script: TutorialScript, think_time: f32) -> Self {
        Self {
            script,
            computer: ComputerController::new(think_time),
            planned: None,
        }
    }

    #[must_use]
    pub fn script(&self) -> &TutorialScript {
        &self.script
    }
}

impl Controller for TutorialScriptController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::TutorialScript
    }

    fn reset(&mut self) {
        self.script.reset();
        self.planned = None;
    }

    fn on_turn_start(&mut self, team: Team, board: &Board) {
        self.planned = self.script.current().and_then(|step| step.red_move);
        self.computer.on_turn_start(team, board);
    }

    fn update_input(&mut self, view: &TurnView<'_>, rng: &mut GameRng) -> Option<PlayerAction> {
        if !self.computer.tick(view.delta_time) {
            return None;
        }

        if let Some(coord) = self.planned.take() {
            let valid = view
                .board
                .tile_id(coord)
                .is_some_and(|id| view.board.valid_tiles(view.team).contains(&id));
            if valid {
                return Some(PlayerAction::Summon(coord));
            }
            log::warn!(
                "tutorial: scripted move {} is not available to {}, choosing another",
                coord,
                view.team
            );
        }

        ComputerController::choose_move(view.board, view.team, rng).map(PlayerAction::Summon)
    }

    fn observe(&mut self, snapshot: &MatchSnapshot, dt: f32) -> Option<&'static str> {
        self.script.advance(snapshot, dt).map(|step| step.text)
    }

    fn tutorial_step(&self) -> Option<usize> {
        Some(self.script.index())
    }
}
