//! Match flow: the phase machine that runs a game from menu to menu.
//!
//! ## Phases
//!
//! ```text
//! MainMenu -> BoardSetup -> TurnLoop -> Scoring -> Teardown -> MainMenu
//! ```
//!
//! - **BoardSetup** waits until every tile in the layout has finished
//!   revealing, then starts the first turn.
//! - **TurnLoop** alternates turns. A finished turn starts the inter-turn
//!   timer (`time_between_turns` plus `conversion_turn_delay` per queued
//!   conversion); the next turn begins once the timer has run out and no
//!   conversion chain is still playing. A team with nowhere to summon is
//!   skipped. The end-of-game check runs before every turn.
//! - **Scoring** shows the result and waits for its animation.
//! - **Teardown** kills every skull, hides every tile and returns to the
//!   menu once the last tile is hidden.
//!
//! ## Driving a match
//!
//! ```
//! use hex_skulls::core::MatchConfig;
//! use hex_skulls::game::{
//!     FrameContext, GameManager, HeadlessAudio, HeadlessPresentation, InputState, MatchMode, Phase,
//! };
//!
//! let mut manager = GameManager::new(MatchConfig::instant()).unwrap();
//! manager.start_game(MatchMode::OnePlayer).unwrap();
//!
//! let mut audio = HeadlessAudio::default();
//! let mut ui = HeadlessPresentation::new();
//! let mut ctx = FrameContext::new(0.016, InputState::idle(), &mut audio, &mut ui);
//! manager.update(&mut ctx);
//! manager.update(&mut ctx);
//!
//! assert_eq!(manager.phase(), Phase::TurnLoop);
//! ```

use im::Vector;

use crate::board::{Board, BoardLayout};
use crate::core::{
    ActionRecord, ConfigError, CubeCoord, GameError, GameRng, MatchConfig, PlayerAction, SkullId, Team,
    TeamMap, TileId,
};
use crate::skull::{SkullEvent, SkullRoster};

use super::context::{AudioSink, FrameContext, Presentation, Sound};
use super::controller::{
    ComputerController, Controller, ControllerKind, HumanController, TurnView, TutorialScriptController,
};
use super::events::{GameResult, MatchEvent, MatchOutcome};
use super::tutorial::{MatchSnapshot, TutorialScript};

/// Where the match flow is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    MainMenu,
    BoardSetup,
    TurnLoop,
    Scoring,
    Teardown,
}

/// Who plays red.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Red follows the tutorial script on the tutorial board.
    Tutorial,
    /// Red is the computer.
    #[default]
    OnePlayer,
    /// Both teams are human.
    TwoPlayers,
}

/// Random streams for one match.
#[derive(Clone, Debug)]
struct MatchRng {
    board: GameRng,
    skulls: GameRng,
    players: GameRng,
}

impl MatchRng {
    fn new(session: &GameRng, index: u32) -> Self {
        let root = session.for_context(&format!("match-{index}"));
        Self {
            board: root.for_context("board"),
            skulls: root.for_context("skulls"),
            players: root.for_context("players"),
        }
    }
}

/// Owns the board, the skulls and both controllers, and runs the match.
#[derive(Debug)]
pub struct GameManager {
    config: MatchConfig,
    session_rng: GameRng,
    rng: MatchRng,
    matches_played: u32,

    board: Board,
    skulls: SkullRoster,
    players: TeamMap<Box<dyn Controller>>,
    mode: MatchMode,
    layout_choice: BoardLayout,

    phase: Phase,
    current_player: Option<Team>,
    next_player: Team,
    turn_ended: bool,
    turn_end_timer: f32,
    /// Extra inter-turn time for the conversion chain of the last summon.
    next_turn_delay: f32,
    turn_number: u32,
    game_started: bool,
    game_ended: bool,
    forfeit_timer: f32,
    /// Tile of the skull the current player marked for sacrifice.
    sacrifice: Option<TileId>,
    outcome: Option<MatchOutcome>,
    result_shown: bool,
    menu_visible: bool,

    events: Vec<MatchEvent>,
    pending_sounds: Vec<Sound>,
    history: Vector<ActionRecord>,
    sound_enabled: bool,
}

impl GameManager {
    /// Create a manager sitting in the main menu.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let session_rng = GameRng::new(config.seed);
        let rng = MatchRng::new(&session_rng, 0);
        let board = Board::generate(config.board_radius);
        let skulls = SkullRoster::new(&config);
        let think_time = config.computer_think_time;

        Ok(Self {
            players: TeamMap::new(|team| -> Box<dyn Controller> {
                match team {
                    Team::Blue => Box::new(HumanController::new()),
                    Team::Red => Box::new(ComputerController::new(think_time)),
                }
            }),
            next_player: config.first_team,
            config,
            session_rng,
            rng,
            matches_played: 0,
            board,
            skulls,
            mode: MatchMode::default(),
            layout_choice: BoardLayout::default(),
            phase: Phase::MainMenu,
            current_player: None,
            turn_ended: false,
            turn_end_timer: 0.0,
            next_turn_delay: 0.0,
            turn_number: 0,
            game_started: false,
            game_ended: false,
            forfeit_timer: 0.0,
            sacrifice: None,
            outcome: None,
            result_shown: false,
            menu_visible: false,
            events: Vec::new(),
            pending_sounds: Vec::new(),
            history: Vector::new(),
            sound_enabled: true,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn skulls(&self) -> &SkullRoster {
        &self.skulls
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    #[must_use]
    pub fn current_player(&self) -> Option<Team> {
        self.current_player
    }

    #[must_use]
    pub fn next_player(&self) -> Team {
        self.next_player
    }

    #[must_use]
    pub fn turn_ended(&self) -> bool {
        self.turn_ended
    }

    #[must_use]
    pub fn turn_end_timer(&self) -> f32 {
        self.turn_end_timer
    }

    /// Turns started this match, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn game_started(&self) -> bool {
        self.game_started
    }

    #[must_use]
    pub fn game_ended(&self) -> bool {
        self.game_ended
    }

    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    /// Tile of the skull marked for sacrifice.
    #[must_use]
    pub fn sacrifice_tile(&self) -> Option<TileId> {
        self.sacrifice
    }

    /// Applied actions of the current match.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn controller_kind(&self, team: Team) -> ControllerKind {
        self.players[team].kind()
    }

    /// Tutorial step, in tutorial matches.
    #[must_use]
    pub fn tutorial_step(&self) -> Option<usize> {
        self.players.iter().find_map(|(_, p)| p.tutorial_step())
    }

    /// Forfeit hold progress in `[0, 1]`.
    #[must_use]
    pub fn forfeit_progress(&self) -> f32 {
        if self.config.forfeit_max_time <= 0.0 {
            return if self.forfeit_timer > 0.0 { 1.0 } else { 0.0 };
        }
        (self.forfeit_timer / self.config.forfeit_max_time).clamp(0.0, 1.0)
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    // === Menu ===

    #[must_use]
    pub fn layout_choice(&self) -> BoardLayout {
        self.layout_choice
    }

    /// Layout for the next non-tutorial match.
    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.layout_choice = layout;
    }

    /// Advance the layout menu option. Returns the new choice.
    pub fn cycle_layout(&mut self) -> BoardLayout {
        self.layout_choice = self.layout_choice.next_option();
        self.layout_choice
    }

    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Replace a team's controller. Takes effect from the next turn start.
    pub fn set_controller(&mut self, team: Team, controller: Box<dyn Controller>) {
        self.players[team] = controller;
    }

    /// Leave the menu and start a match.
    ///
    /// Installs the controllers for `mode` (blue is always human), lays out
    /// the board and begins the staggered reveal.
    pub fn start_game(&mut self, mode: MatchMode) -> Result<(), GameError> {
        if self.phase != Phase::MainMenu {
            return Err(GameError::MatchInProgress);
        }

        let think_time = self.config.computer_think_time;
        self.players[Team::Blue] = Box::new(HumanController::new());
        self.players[Team::Red] = match mode {
            MatchMode::Tutorial => Box::new(TutorialScriptController::new(TutorialScript::default(), think_time)),
            MatchMode::OnePlayer => Box::new(ComputerController::new(think_time)),
            MatchMode::TwoPlayers => Box::new(HumanController::new()),
        };
        for (_, player) in self.players.iter_mut() {
            player.reset();
        }

        self.matches_played += 1;
        self.rng = MatchRng::new(&self.session_rng, self.matches_played);
        self.mode = mode;
        self.current_player = None;
        self.next_player = self.config.first_team;
        self.turn_ended = false;
        self.turn_end_timer = 0.0;
        self.next_turn_delay = 0.0;
        self.turn_number = 0;
        self.game_started = true;
        self.game_ended = false;
        self.forfeit_timer = 0.0;
        self.sacrifice = None;
        self.outcome = None;
        self.result_shown = false;
        self.history = Vector::new();
        self.skulls.clear();

        let requested = match mode {
            MatchMode::Tutorial => BoardLayout::Tutorial,
            MatchMode::OnePlayer | MatchMode::TwoPlayers => self.layout_choice,
        };
        let layout = self.board.setup_board_for_new_game(requested, &mut self.rng.board);
        self.board.reveal_tiles(&mut self.rng.board, &self.config);
        self.phase = Phase::BoardSetup;

        log::info!("game started: {:?} on layout {:?}", mode, layout);
        self.events.push(MatchEvent::GameStarted { layout });
        Ok(())
    }

    // === Frame update ===

    /// Advance the match by one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        let dt = ctx.delta_time;
        self.sync_menu(ctx.presentation);

        self.board.update(dt);
        if matches!(self.phase, Phase::BoardSetup | Phase::TurnLoop) {
            self.board.update_hover(ctx.input.cursor, self.config.hover_radius);
        }

        let skull_events = self.skulls.update(&mut self.board, dt);
        self.record_skull_events(skull_events);

        self.update_forfeit(ctx.input.forfeit_held, dt);
        self.observe(dt, ctx.presentation);

        match self.phase {
            Phase::MainMenu => {}
            Phase::BoardSetup => self.update_board_setup(ctx.presentation),
            Phase::TurnLoop => self.update_turn_loop(ctx),
            Phase::Scoring => self.update_scoring(ctx.presentation),
            Phase::Teardown => self.update_teardown(),
        }

        self.sync_menu(ctx.presentation);
        self.flush_sounds(ctx.audio);
    }

    fn sync_menu(&mut self, presentation: &mut dyn Presentation) {
        let want = self.phase == Phase::MainMenu;
        if want != self.menu_visible {
            if want {
                presentation.show_main_menu();
            } else {
                presentation.hide_main_menu();
            }
            self.menu_visible = want;
        }
    }

    fn flush_sounds(&mut self, audio: &mut dyn AudioSink) {
        let enabled = self.sound_enabled;
        for sound in self.pending_sounds.drain(..) {
            if enabled {
                audio.play(sound);
            }
        }
    }

    fn record_skull_events(&mut self, events: Vec<SkullEvent>) {
        for event in events {
            let event = match event {
                SkullEvent::Converted { coord, from, to, team } => {
                    self.pending_sounds.push(Sound::Conversion);
                    MatchEvent::Converted { coord, from, to, team }
                }
                SkullEvent::ConversionSkipped { coord, .. } => MatchEvent::ConversionSkipped { coord },
                SkullEvent::Removed { skull, team } => MatchEvent::SkullRemoved { skull, team },
            };
            self.events.push(event);
        }
    }

    fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            current_player: self.current_player,
            blue_tiles: self.board.blue_tiles(),
            red_tiles: self.board.red_tiles(),
            free_tiles: self.board.free_tiles(),
            turn_number: self.turn_number,
        }
    }

    /// Let controllers watch the match and forward any instruction text.
    fn observe(&mut self, dt: f32, presentation: &mut dyn Presentation) {
        if !self.game_started || self.game_ended {
            return;
        }
        let snapshot = self.snapshot();
        for team in Team::ALL {
            if let Some(text) = self.players[team].observe(&snapshot, dt) {
                presentation.show_tutorial_text(text);
                if let Some(index) = self.players[team].tutorial_step() {
                    self.events.push(MatchEvent::TutorialStep { index });
                }
            }
        }
    }

    fn update_forfeit(&mut self, held: bool, dt: f32) {
        let active = self.game_started
            && !self.game_ended
            && matches!(self.phase, Phase::BoardSetup | Phase::TurnLoop);
        if !active || !held {
            self.forfeit_timer = 0.0;
            return;
        }

        self.forfeit_timer += dt;
        if self.forfeit_timer > self.config.forfeit_max_time {
            log::info!("game forfeited after holding for {:.2}s", self.forfeit_timer);
            self.board.update_tile_counts();
            self.end_game(true);
        }
    }

    fn update_board_setup(&mut self, presentation: &mut dyn Presentation) {
        if !self.board.is_fully_revealed() {
            return;
        }
        log::info!("board ready: {} tiles", self.board.enabled_tiles());
        self.events.push(MatchEvent::BoardReady);
        self.phase = Phase::TurnLoop;
        self.start_turn(self.config.first_team, presentation);
    }

    fn update_turn_loop(&mut self, ctx: &mut FrameContext<'_>) {
        if self.game_ended {
            return;
        }

        if self.turn_ended {
            self.turn_end_timer -= ctx.delta_time;
            if self.turn_end_timer <= 0.0 && self.skulls.is_settled() {
                self.start_turn(self.next_player, ctx.presentation);
            }
            return;
        }

        let Some(team) = self.current_player else {
            return;
        };

        if self.board.valid_tiles(team).is_empty() {
            log::info!("{} has nowhere to summon, skipping turn {}", team, self.turn_number);
            self.events.push(MatchEvent::TurnSkipped { team });
            self.end_turn();
            return;
        }

        let view = TurnView {
            team,
            board: &self.board,
            input: &ctx.input,
            sacrifice: self.sacrifice,
            delta_time: ctx.delta_time,
        };
        let Some(action) = self.players[team].update_input(&view, &mut self.rng.players) else {
            return;
        };

        if let Err(err) = self.apply_action(team, action) {
            log::error!("{} action {:?} rejected: {}", team, action, err);
        }
    }

    /// Promote `team` to current player, unless the game is over.
    fn start_turn(&mut self, team: Team, presentation: &mut dyn Presentation) {
        if self.check_for_game_end() {
            return;
        }

        self.current_player = Some(team);
        self.turn_ended = false;
        self.turn_end_timer = 0.0;
        self.turn_number += 1;
        self.board.refresh_highlights(Some(team));
        self.players[team].on_turn_start(team, &self.board);

        log::info!("turn {}: {}", self.turn_number, team);
        self.events.push(MatchEvent::TurnStarted {
            team,
            turn: self.turn_number,
        });
        self.observe(0.0, presentation);
    }

    fn end_turn(&mut self) {
        if let Some(team) = self.current_player.take() {
            self.next_player = team.opponent();
        }
        self.turn_ended = true;
        self.turn_end_timer = self.config.time_between_turns + self.next_turn_delay;
        self.next_turn_delay = 0.0;
        self.sacrifice = None;
        self.board.clear_sacrifice_tiles();
        self.board.refresh_highlights(None);
    }

    fn update_scoring(&mut self, presentation: &mut dyn Presentation) {
        if !self.result_shown {
            if let Some(outcome) = &self.outcome {
                presentation.show_result(outcome);
            }
            self.result_shown = true;
            return;
        }
        if presentation.is_result_animating() {
            return;
        }

        log::info!("tearing down the board");
        self.board.tear_down(&mut self.skulls, &mut self.rng.board, &self.config);
        self.phase = Phase::Teardown;
    }

    fn update_teardown(&mut self) {
        if self.board.revealed_tiles() > 0 {
            return;
        }
        self.skulls.clear();
        self.game_started = false;
        self.current_player = None;
        self.turn_ended = false;
        self.phase = Phase::MainMenu;
        log::info!("returned to main menu");
        self.events.push(MatchEvent::ReturnedToMenu);
    }

    // === Rules ===

    /// Validate and apply an action for `team`.
    ///
    /// A rejected action leaves the match untouched. Summons end the turn.
    pub fn apply_action(&mut self, team: Team, action: PlayerAction) -> Result<(), GameError> {
        if self.phase != Phase::TurnLoop || self.game_ended {
            return Err(GameError::NoMatchInProgress);
        }
        if self.turn_ended {
            return Err(GameError::TurnAlreadyEnded(team));
        }
        if self.current_player != Some(team) {
            return Err(GameError::NotYourTurn(team));
        }

        match action {
            PlayerAction::Summon(coord) => {
                let tile = self.summonable_tile(team, coord)?;
                self.summon_skull(team, tile)?;
            }
            PlayerAction::MarkSacrifice(coord) => {
                let tile = self.own_skull_tile(team, coord)?;
                self.board.update_valid_tiles_for_sacrifice(tile);
                self.board.highlight_sacrifice_tiles(team);
                self.sacrifice = Some(tile);
                self.events.push(MatchEvent::SacrificeMarked { team, coord });
            }
            PlayerAction::CancelSacrifice => {
                if self.sacrifice.take().is_none() {
                    return Err(GameError::NoSacrificeMarked(team));
                }
                self.board.clear_sacrifice_tiles();
                self.board.refresh_highlights(Some(team));
                self.events.push(MatchEvent::SacrificeCancelled { team });
            }
            PlayerAction::SacrificeSummon { sacrifice, destination } => {
                self.sacrifice_summon(team, sacrifice, destination)?;
            }
        }

        self.history.push_back(ActionRecord {
            team,
            action,
            turn: self.turn_number,
        });
        if action.ends_turn() {
            self.end_turn();
        }
        Ok(())
    }

    fn tile_at(&self, coord: CubeCoord) -> Result<TileId, GameError> {
        self.board.tile_id(coord).ok_or(GameError::UnknownTile(coord))
    }

    fn summonable_tile(&self, team: Team, coord: CubeCoord) -> Result<TileId, GameError> {
        let id = self.tile_at(coord)?;
        let tile = self.board.tile(id);
        if !tile.is_free() {
            return Err(GameError::TileNotFree(coord));
        }
        if !tile.can_summon(team) {
            return Err(GameError::NotSummonable { team, coord });
        }
        Ok(id)
    }

    fn own_skull_tile(&self, team: Team, coord: CubeCoord) -> Result<TileId, GameError> {
        let id = self.tile_at(coord)?;
        if self.board.tile(id).occupant_team() != Some(team) {
            return Err(GameError::NotOwnSkull { team, coord });
        }
        Ok(id)
    }

    fn sacrifice_summon(
        &mut self,
        team: Team,
        sacrifice: CubeCoord,
        destination: CubeCoord,
    ) -> Result<(), GameError> {
        let marked = self.sacrifice.ok_or(GameError::NoSacrificeMarked(team))?;
        let source = self.own_skull_tile(team, sacrifice)?;
        if source != marked {
            return Err(GameError::InvalidSacrificeTarget { team, coord: sacrifice });
        }

        let target = self.tile_at(destination)?;
        if !self.board.sacrifice_tiles(team).contains(&target) {
            return Err(GameError::InvalidSacrificeTarget { team, coord: destination });
        }
        if !self.board.tile(target).is_free() {
            return Err(GameError::TileNotFree(destination));
        }
        let Some(occupant) = self.board.tile(source).occupant() else {
            return Err(GameError::NotOwnSkull { team, coord: sacrifice });
        };

        self.skulls.kill(&mut self.board, occupant.skull, self.config.sacrifice_kill_delay);
        self.pending_sounds.push(Sound::Explosion);
        self.events.push(MatchEvent::Sacrificed { team, coord: sacrifice });
        self.sacrifice = None;
        self.board.clear_sacrifice_tiles();

        self.summon_skull(team, target)?;
        Ok(())
    }

    fn summon_skull(&mut self, team: Team, tile: TileId) -> Result<SkullId, GameError> {
        let skull = self.skulls.summon(&mut self.board, team, tile, &mut self.rng.skulls)?;
        let pending = self
            .skulls
            .get(skull)
            .map_or(0, |s| s.neighbors_to_convert().len());
        self.next_turn_delay = pending as f32 * self.config.conversion_turn_delay;
        self.board.update_tile_counts();

        let coord = self.board.tile(tile).coord();
        log::debug!("{} summoned at {} with {} pending conversions", team, coord, pending);
        self.pending_sounds.push(Sound::Summon);
        self.events.push(MatchEvent::Summoned {
            team,
            coord,
            skull,
            pending,
        });
        Ok(skull)
    }

    /// End the match if the board is full or neither team can summon.
    ///
    /// Recomputes valid tiles and counts first. Returns whether the game has
    /// ended.
    pub fn check_for_game_end(&mut self) -> bool {
        if !self.game_started || self.game_ended {
            return self.game_ended;
        }

        self.board.update_valid_tiles_for_summoning();
        self.board.update_tile_counts();

        let board_full = self.board.free_tiles() == 0;
        let both_stuck = self.board.valid_blue_tiles().is_empty() && self.board.valid_red_tiles().is_empty();
        if !board_full && !both_stuck {
            return false;
        }

        self.end_game(false);
        true
    }

    fn end_game(&mut self, forfeited: bool) {
        let blue_tiles = self.board.blue_tiles();
        let red_tiles = self.board.red_tiles();
        let result = match self.mode {
            MatchMode::Tutorial => GameResult::TutorialComplete,
            MatchMode::OnePlayer | MatchMode::TwoPlayers => GameResult::from_scores(blue_tiles, red_tiles),
        };
        let outcome = MatchOutcome {
            result,
            forfeited,
            blue_tiles,
            red_tiles,
        };

        self.game_ended = true;
        self.current_player = None;
        self.turn_ended = false;
        self.sacrifice = None;
        self.forfeit_timer = 0.0;
        self.board.clear_sacrifice_tiles();
        self.board.refresh_highlights(None);
        self.outcome = Some(outcome);
        self.result_shown = false;
        self.phase = Phase::Scoring;

        log::info!(
            "game ended: {} (blue {}, red {}{})",
            result.banner(),
            blue_tiles,
            red_tiles,
            if forfeited { ", forfeited" } else { "" }
        );
        self.events.push(MatchEvent::GameEnded(outcome));
    }
}
