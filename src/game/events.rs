//! Match results and the per-frame event feed.

use serde::{Deserialize, Serialize};

use crate::board::BoardLayout;
use crate::core::{CubeCoord, SkullId, Team};

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// A team held strictly more tiles.
    Winner(Team),
    /// Equal tile counts.
    Draw,
    /// Tutorial matches always end this way.
    TutorialComplete,
}

impl GameResult {
    /// Compare final tile counts.
    #[must_use]
    pub fn from_scores(blue_tiles: u32, red_tiles: u32) -> Self {
        match blue_tiles.cmp(&red_tiles) {
            std::cmp::Ordering::Greater => GameResult::Winner(Team::Blue),
            std::cmp::Ordering::Less => GameResult::Winner(Team::Red),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    #[must_use]
    pub fn winner(self) -> Option<Team> {
        match self {
            GameResult::Winner(team) => Some(team),
            GameResult::Draw | GameResult::TutorialComplete => None,
        }
    }

    /// Banner text for the result screen.
    #[must_use]
    pub const fn banner(self) -> &'static str {
        match self {
            GameResult::Winner(Team::Blue) => "Blue wins!",
            GameResult::Winner(Team::Red) => "Red wins!",
            GameResult::Draw => "Draw!",
            GameResult::TutorialComplete => "Tutorial complete!",
        }
    }
}

/// Final state of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub result: GameResult,
    /// Ended by holding the forfeit key.
    pub forfeited: bool,
    pub blue_tiles: u32,
    pub red_tiles: u32,
}

/// Something that happened during a frame.
///
/// Drained by the caller with `GameManager::drain_events` to drive effects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    GameStarted { layout: BoardLayout },
    BoardReady,
    TurnStarted { team: Team, turn: u32 },
    /// The team had nowhere to summon.
    TurnSkipped { team: Team },
    Summoned { team: Team, coord: CubeCoord, skull: SkullId, pending: usize },
    SacrificeMarked { team: Team, coord: CubeCoord },
    SacrificeCancelled { team: Team },
    Sacrificed { team: Team, coord: CubeCoord },
    Converted { coord: CubeCoord, from: SkullId, to: SkullId, team: Team },
    ConversionSkipped { coord: CubeCoord },
    SkullRemoved { skull: SkullId, team: Team },
    TutorialStep { index: usize },
    GameEnded(MatchOutcome),
    ReturnedToMenu,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scores() {
        assert_eq!(GameResult::from_scores(5, 3), GameResult::Winner(Team::Blue));
        assert_eq!(GameResult::from_scores(3, 5), GameResult::Winner(Team::Red));
        assert_eq!(GameResult::from_scores(4, 4), GameResult::Draw);
        assert_eq!(GameResult::from_scores(0, 0), GameResult::Draw);
    }

    #[test]
    fn test_winner_and_banner() {
        assert_eq!(GameResult::Winner(Team::Red).winner(), Some(Team::Red));
        assert_eq!(GameResult::Draw.winner(), None);
        assert_eq!(GameResult::TutorialComplete.banner(), "Tutorial complete!");
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = MatchOutcome {
            result: GameResult::Winner(Team::Blue),
            forfeited: true,
            blue_tiles: 10,
            red_tiles: 8,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let back: MatchOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}
