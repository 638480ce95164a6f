//! Scripted tutorial.
//!
//! The tutorial is a linear list of steps. Each step shows a line of
//! instruction text and waits on a gate: a predicate over a
//! `MatchSnapshot`. Steps may also dictate where red summons, which is how
//! the script steers the match towards situations worth explaining.

use crate::core::{CubeCoord, Team};

/// The parts of match state tutorial gates look at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchSnapshot {
    pub current_player: Option<Team>,
    pub blue_tiles: u32,
    pub red_tiles: u32,
    pub free_tiles: u32,
    pub turn_number: u32,
}

impl MatchSnapshot {
    #[must_use]
    pub fn team_tiles(&self, team: Team) -> u32 {
        match team {
            Team::Blue => self.blue_tiles,
            Team::Red => self.red_tiles,
        }
    }
}

/// Condition for leaving a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TutorialGate {
    Immediately,
    CurrentPlayerIs(Team),
    TeamTilesAtLeast(Team, u32),
    FreeTilesAtMost(u32),
    /// Seconds spent on the step.
    Elapsed(f32),
    /// Final step.
    Never,
}

impl TutorialGate {
    #[must_use]
    pub fn is_open(&self, snapshot: &MatchSnapshot, elapsed: f32) -> bool {
        match *self {
            TutorialGate::Immediately => true,
            TutorialGate::CurrentPlayerIs(team) => snapshot.current_player == Some(team),
            TutorialGate::TeamTilesAtLeast(team, count) => snapshot.team_tiles(team) >= count,
            TutorialGate::FreeTilesAtMost(count) => snapshot.free_tiles <= count,
            TutorialGate::Elapsed(seconds) => elapsed >= seconds,
            TutorialGate::Never => false,
        }
    }
}

/// One tutorial step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TutorialStep {
    pub text: &'static str,
    pub gate: TutorialGate,
    /// Where red summons if its turn starts during this step.
    pub red_move: Option<CubeCoord>,
}

impl TutorialStep {
    const fn new(text: &'static str, gate: TutorialGate) -> Self {
        Self {
            text,
            gate,
            red_move: None,
        }
    }

    const fn with_red_move(mut self, q: i32, r: i32) -> Self {
        self.red_move = Some(CubeCoord::axial(q, r));
        self
    }
}

/// The built-in script, played on the tutorial layout.
pub const TUTORIAL_STEPS: [TutorialStep; 11] = [
    TutorialStep::new(
        "Welcome! Fill the board with more skulls than your opponent.",
        TutorialGate::Elapsed(2.0),
    ),
    TutorialStep::new(
        "Click a glowing tile on the left edge to summon your first skull.",
        TutorialGate::TeamTilesAtLeast(Team::Blue, 1),
    ),
    TutorialStep::new(
        "Red starts from the right edge.",
        TutorialGate::TeamTilesAtLeast(Team::Red, 1),
    )
    .with_red_move(3, -1),
    TutorialStep::new(
        "New skulls must touch one of your skulls. Grow towards the centre.",
        TutorialGate::TeamTilesAtLeast(Team::Blue, 2),
    ),
    TutorialStep::new(
        "Red grows too.",
        TutorialGate::TeamTilesAtLeast(Team::Red, 2),
    )
    .with_red_move(2, -1),
    TutorialStep::new(
        "Take the middle before red does.",
        TutorialGate::CurrentPlayerIs(Team::Red),
    )
    .with_red_move(1, -1),
    TutorialStep::new(
        "Summoning next to enemy skulls converts every one of them.",
        TutorialGate::CurrentPlayerIs(Team::Blue),
    ),
    TutorialStep::new(
        "Red can convert your skulls the same way.",
        TutorialGate::CurrentPlayerIs(Team::Red),
    )
    .with_red_move(0, 0),
    TutorialStep::new(
        "Right-click one of your skulls to sacrifice it, then summon two tiles away.",
        TutorialGate::FreeTilesAtMost(5),
    ),
    TutorialStep::new(
        "A turn with nowhere to summon is skipped.",
        TutorialGate::FreeTilesAtMost(2),
    ),
    TutorialStep::new(
        "The match ends when the board is full. Good luck!",
        TutorialGate::Never,
    ),
];

/// Progress through a list of steps.
#[derive(Clone, Debug)]
pub struct TutorialScript {
    steps: Vec<TutorialStep>,
    index: usize,
    elapsed: f32,
    /// The first step has been handed out.
    started: bool,
}

impl Default for TutorialScript {
    fn default() -> Self {
        Self::new(TUTORIAL_STEPS.to_vec())
    }
}

impl TutorialScript {
    #[must_use]
    pub fn new(steps: Vec<TutorialStep>) -> Self {
        Self {
            steps,
            index: 0,
            elapsed: 0.0,
            started: false,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> Option<&TutorialStep> {
        self.steps.get(self.index)
    }

    /// On the last step.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.index + 1 >= self.steps.len()
    }

    /// Back to the first step.
    pub fn reset(&mut self) {
        self.index = 0;
        self.elapsed = 0.0;
        self.started = false;
    }

    /// Advance past every open gate.
    ///
    /// Returns the step entered, if the step changed (the first call always
    /// returns the first step).
    pub fn advance(&mut self, snapshot: &MatchSnapshot, dt: f32) -> Option<&TutorialStep> {
        let mut changed = !self.started;
        self.started = true;
        self.elapsed += dt;

        while !self.is_finished() {
            let Some(step) = self.steps.get(self.index) else {
                break;
            };
            if !step.gate.is_open(snapshot, self.elapsed) {
                break;
            }
            self.index += 1;
            self.elapsed = 0.0;
            changed = true;
            log::info!("tutorial: step {}", self.index);
        }

        if changed {
            self.current()
        } else {
            None
        }
    }
}
