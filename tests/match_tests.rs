//! Match flow integration tests.
//!
//! These drive `GameManager` frame by frame through the public API only,
//! with headless audio and presentation.

use hex_skulls::board::BoardLayout;
use hex_skulls::core::{CubeCoord, GameError, MatchConfig, PlayerAction, Team};
use hex_skulls::game::{
    ComputerController, ControllerKind, FrameContext, GameManager, GameResult, HeadlessAudio,
    HeadlessPresentation, InputState, MatchEvent, MatchMode, Phase, Sound, TUTORIAL_STEPS,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct Session {
    manager: GameManager,
    audio: HeadlessAudio,
    ui: HeadlessPresentation,
}

impl Session {
    fn new(config: MatchConfig) -> Self {
        init_logging();
        Self {
            manager: GameManager::new(config).unwrap(),
            audio: HeadlessAudio::default(),
            ui: HeadlessPresentation::new(),
        }
    }

    fn frame(&mut self, dt: f32, input: InputState) {
        let mut ctx = FrameContext::new(dt, input, &mut self.audio, &mut self.ui);
        self.manager.update(&mut ctx);
    }

    fn idle(&mut self) {
        self.frame(0.016, InputState::idle());
    }

    /// Tick until `done` holds, failing after `limit` frames.
    fn run_until(&mut self, limit: usize, done: impl Fn(&GameManager) -> bool) {
        for _ in 0..limit {
            if done(&self.manager) {
                return;
            }
            self.idle();
        }
        assert!(done(&self.manager), "condition not reached in {limit} frames");
    }

    fn summon(&mut self, team: Team, q: i32, r: i32) {
        self.manager
            .apply_action(team, PlayerAction::Summon(CubeCoord::axial(q, r)))
            .unwrap();
        self.idle();
    }

    fn click(&mut self, q: i32, r: i32) {
        self.frame(0.016, InputState::click(CubeCoord::axial(q, r).world_position()));
    }

    fn secondary_click(&mut self, q: i32, r: i32) {
        self.frame(0.016, InputState::secondary_click(CubeCoord::axial(q, r).world_position()));
    }
}

/// Run a computer-vs-computer match to the end and return its history.
fn simulate(seed: u64) -> Session {
    let mut session = Session::new(MatchConfig::instant().with_seed(seed));
    session.manager.start_game(MatchMode::OnePlayer).unwrap();
    session
        .manager
        .set_controller(Team::Blue, Box::new(ComputerController::new(0.0)));
    session.run_until(5_000, GameManager::game_ended);
    session
}

// =============================================================================
// Full matches
// =============================================================================

#[test]
fn test_computer_match_runs_to_completion() {
    let mut session = simulate(7);
    let manager = &session.manager;

    let outcome = manager.outcome().unwrap();
    assert!(!outcome.forfeited);
    assert_eq!(outcome.result, GameResult::from_scores(outcome.blue_tiles, outcome.red_tiles));
    assert!(outcome.blue_tiles + outcome.red_tiles <= manager.board().total_tiles());

    let board = manager.board();
    let stuck = board.valid_blue_tiles().is_empty() && board.valid_red_tiles().is_empty();
    assert!(board.free_tiles() == 0 || stuck);

    assert!(manager.history().len() >= 2);
    for record in manager.history() {
        assert!(matches!(record.action, PlayerAction::Summon(_)));
    }
    assert!(session.audio.count(Sound::Summon) >= manager.history().len());

    // Scoring, teardown, back to the menu.
    session.run_until(100, |m| m.phase() == Phase::MainMenu);
    assert!(session.manager.skulls().is_empty());
    assert_eq!(session.manager.board().revealed_tiles(), 0);
    assert_eq!(session.ui.results.len(), 1);
    assert!(session.ui.menu_visible);
    assert!(session.manager.events().contains(&MatchEvent::ReturnedToMenu));
}

#[test]
fn test_same_seed_replays_same_match() {
    let a = simulate(11);
    let b = simulate(11);
    assert_eq!(a.manager.history(), b.manager.history());
    assert_eq!(a.manager.outcome(), b.manager.outcome());
}

#[test]
fn test_back_to_back_matches() {
    let mut session = simulate(3);
    session.run_until(100, |m| m.phase() == Phase::MainMenu);

    session.manager.set_layout(BoardLayout::B);
    session.manager.start_game(MatchMode::TwoPlayers).unwrap();
    assert!(session.manager.history().is_empty());
    assert!(session.manager.outcome().is_none());

    session.run_until(10, |m| m.phase() == Phase::TurnLoop);
    assert_eq!(session.manager.board().total_tiles(), 33);
    assert_eq!(session.manager.board().free_tiles(), 33);
    assert_eq!(session.manager.current_player(), Some(Team::Blue));
    assert_eq!(session.manager.turn_number(), 1);
}

// =============================================================================
// Human input
// =============================================================================

#[test]
fn test_clicks_summon_and_sacrifice() {
    let mut session = Session::new(MatchConfig::instant());
    session.manager.start_game(MatchMode::TwoPlayers).unwrap();
    session.idle();

    // A click off the valid tiles does nothing.
    session.click(0, 0);
    assert_eq!(session.manager.current_player(), Some(Team::Blue));

    session.click(-3, 1);
    assert_eq!(session.manager.board().blue_tiles(), 1);
    session.idle();

    session.click(3, -1);
    session.idle();
    session.click(-2, 1);
    session.idle();
    session.click(2, -1);
    session.idle();
    assert_eq!(session.manager.current_player(), Some(Team::Blue));

    // Mark, cancel, mark again.
    session.secondary_click(-3, 1);
    assert!(session.manager.sacrifice_tile().is_some());
    session.secondary_click(0, 0);
    assert!(session.manager.sacrifice_tile().is_none());
    session.secondary_click(-3, 1);
    let board = session.manager.board();
    let destination = board.tile_id(CubeCoord::axial(-1, 0)).unwrap();
    assert!(board.sacrifice_tiles(Team::Blue).contains(&destination));
    assert_eq!(board.tile(destination).highlight(), Some(Team::Blue));

    session.click(-1, 0);
    let board = session.manager.board();
    assert!(board.get_tile(CubeCoord::axial(-3, 1)).unwrap().is_free());
    assert_eq!(
        board.get_tile(CubeCoord::axial(-1, 0)).unwrap().occupant_team(),
        Some(Team::Blue)
    );
    assert_eq!(board.blue_tiles(), 2);
    assert!(session.manager.turn_ended());

    let events = session.manager.drain_events();
    assert!(events.contains(&MatchEvent::SacrificeMarked {
        team: Team::Blue,
        coord: CubeCoord::axial(-3, 1)
    }));
    assert!(events.contains(&MatchEvent::SacrificeCancelled { team: Team::Blue }));
    assert!(events.contains(&MatchEvent::Sacrificed {
        team: Team::Blue,
        coord: CubeCoord::axial(-3, 1)
    }));

    session.idle();
    assert!(session
        .manager
        .events()
        .iter()
        .any(|e| matches!(e, MatchEvent::SkullRemoved { team: Team::Blue, .. })));
    assert_eq!(session.audio.count(Sound::Explosion), 1);
    assert_eq!(session.manager.current_player(), Some(Team::Red));
}

#[test]
fn test_sacrifice_rejects_bad_destination() {
    let mut session = Session::new(MatchConfig::instant());
    session.manager.start_game(MatchMode::TwoPlayers).unwrap();
    session.idle();
    session.summon(Team::Blue, -3, 1);
    session.summon(Team::Red, 3, -1);

    let sacrifice = CubeCoord::axial(-3, 1);
    assert_eq!(
        session.manager.apply_action(
            Team::Blue,
            PlayerAction::SacrificeSummon {
                sacrifice,
                destination: CubeCoord::axial(-1, 0)
            }
        ),
        Err(GameError::NoSacrificeMarked(Team::Blue))
    );

    session
        .manager
        .apply_action(Team::Blue, PlayerAction::MarkSacrifice(sacrifice))
        .unwrap();
    assert_eq!(
        session.manager.apply_action(
            Team::Blue,
            PlayerAction::SacrificeSummon {
                sacrifice,
                destination: CubeCoord::axial(-3, 2)
            }
        ),
        Err(GameError::InvalidSacrificeTarget {
            team: Team::Blue,
            coord: CubeCoord::axial(-3, 2)
        })
    );
    assert!(!session.manager.turn_ended());
    assert_eq!(session.manager.board().blue_tiles(), 1);
}

// =============================================================================
// Tutorial
// =============================================================================

#[test]
fn test_tutorial_script_drives_red() {
    let mut session = Session::new(MatchConfig::instant());
    session.manager.start_game(MatchMode::Tutorial).unwrap();
    assert_eq!(session.manager.controller_kind(Team::Red), ControllerKind::TutorialScript);

    let tick = |s: &mut Session| s.frame(2.0, InputState::idle());
    let blue = |s: &mut Session, q: i32, r: i32| {
        s.manager
            .apply_action(Team::Blue, PlayerAction::Summon(CubeCoord::axial(q, r)))
            .unwrap();
    };

    tick(&mut session);
    assert_eq!(session.manager.board().total_tiles(), 13);
    assert_eq!(session.manager.tutorial_step(), Some(1));
    assert_eq!(session.ui.tutorial_texts.first().map(String::as_str), Some(TUTORIAL_STEPS[1].text));
    assert_eq!(session.manager.current_player(), Some(Team::Blue));

    for (q, r) in [(-3, 1), (-2, 1), (-1, 1), (-1, 0)] {
        blue(&mut session, q, r);
        tick(&mut session);
        tick(&mut session);
        tick(&mut session);
    }

    // Red followed the script, ending on the centre next to two blue skulls.
    let red_moves: Vec<CubeCoord> = session
        .manager
        .history()
        .iter()
        .filter(|record| record.team == Team::Red)
        .filter_map(|record| match record.action {
            PlayerAction::Summon(coord) => Some(coord),
            _ => None,
        })
        .collect();
    assert_eq!(
        red_moves,
        vec![
            CubeCoord::axial(3, -1),
            CubeCoord::axial(2, -1),
            CubeCoord::axial(1, -1),
            CubeCoord::ORIGIN,
        ]
    );

    tick(&mut session);
    tick(&mut session);
    let board = session.manager.board();
    assert_eq!(board.blue_tiles(), 2);
    assert_eq!(board.red_tiles(), 6);
    assert_eq!(board.free_tiles(), 5);
    assert!(session.manager.tutorial_step().unwrap() >= 8);
    assert_eq!(session.audio.count(Sound::Conversion), 2);
    assert_eq!(session.manager.current_player(), Some(Team::Blue));

    // Leaving the tutorial early still counts as completing it.
    let hold = InputState {
        forfeit_held: true,
        ..InputState::idle()
    };
    session.frame(2.0, hold);
    let outcome = session.manager.outcome().unwrap();
    assert!(outcome.forfeited);
    assert_eq!(outcome.result, GameResult::TutorialComplete);
}

#[test]
fn test_forfeit_only_counts_in_match() {
    let mut session = Session::new(MatchConfig::instant());
    let hold = InputState {
        forfeit_held: true,
        ..InputState::idle()
    };
    session.frame(5.0, hold);
    assert_eq!(session.manager.forfeit_progress(), 0.0);
    assert_eq!(session.manager.phase(), Phase::MainMenu);
    assert!(session.manager.outcome().is_none());
}
