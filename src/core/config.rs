//! Match configuration.
//!
//! All delays are in seconds of simulated frame time. The defaults are the
//! tuning the game ships with; tests shorten or zero them freely.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::team::Team;

/// Timing and tuning parameters for a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Board radius in tiles. The start tiles sit on the radius-3 ring.
    pub board_radius: u32,

    /// Delay between consecutive tile reveals at match start.
    pub reveal_stagger: f32,

    /// Length of a single tile's reveal animation.
    pub reveal_duration: f32,

    /// Extra delay before the first tile hides during teardown,
    /// so skulls vanish before their tiles.
    pub hide_offset: f32,

    /// Delay between consecutive tile hides during teardown.
    pub hide_stagger: f32,

    /// Delay between consecutive skull kills during teardown.
    pub kill_stagger: f32,

    /// Delay between conversions in one chain.
    pub conversion_delay: f32,

    /// Turn-transition time added per pending conversion.
    pub conversion_turn_delay: f32,

    /// Pause between the end of one turn and the start of the next.
    pub time_between_turns: f32,

    /// How long the forfeit key must be held.
    pub forfeit_max_time: f32,

    /// Delay before a sacrificed skull is removed.
    pub sacrifice_kill_delay: f32,

    /// Time a killed skull lingers before it leaves the roster.
    pub kill_fade_time: f32,

    /// Computer "thinking" pause before it moves.
    pub computer_think_time: f32,

    /// Cursor distance (world units) within which a tile counts as hovered.
    pub hover_radius: f32,

    /// Team that moves first.
    pub first_team: Team,

    /// Seed for every random decision in the session.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_radius: 3,
            reveal_stagger: 0.05,
            reveal_duration: 2.0,
            hide_offset: 0.5,
            hide_stagger: 0.05,
            kill_stagger: 0.05,
            conversion_delay: 0.1,
            conversion_turn_delay: 0.3,
            time_between_turns: 0.5,
            forfeit_max_time: 1.0,
            sacrifice_kill_delay: 0.3,
            kill_fade_time: 0.3,
            computer_think_time: 0.6,
            hover_radius: 10.0,
            first_team: Team::Blue,
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Config with every delay set to zero; turns advance on the next tick.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            reveal_stagger: 0.0,
            reveal_duration: 0.0,
            hide_offset: 0.0,
            hide_stagger: 0.0,
            kill_stagger: 0.0,
            conversion_delay: 0.0,
            conversion_turn_delay: 0.0,
            time_between_turns: 0.0,
            sacrifice_kill_delay: 0.0,
            kill_fade_time: 0.0,
            computer_think_time: 0.0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_board_radius(mut self, radius: u32) -> Self {
        self.board_radius = radius;
        self
    }

    #[must_use]
    pub fn with_first_team(mut self, team: Team) -> Self {
        self.first_team = team;
        self
    }

    #[must_use]
    pub fn with_time_between_turns(mut self, seconds: f32) -> Self {
        self.time_between_turns = seconds;
        self
    }

    #[must_use]
    pub fn with_conversion_delay(mut self, seconds: f32) -> Self {
        self.conversion_delay = seconds;
        self
    }

    #[must_use]
    pub fn with_conversion_turn_delay(mut self, seconds: f32) -> Self {
        self.conversion_turn_delay = seconds;
        self
    }

    #[must_use]
    pub fn with_forfeit_max_time(mut self, seconds: f32) -> Self {
        self.forfeit_max_time = seconds;
        self
    }

    #[must_use]
    pub fn with_computer_think_time(mut self, seconds: f32) -> Self {
        self.computer_think_time = seconds;
        self
    }

    /// Check that the board can hold the start tiles and all timings are sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_radius < 3 {
            return Err(ConfigError::RadiusTooSmall(self.board_radius));
        }

        let durations = [
            ("reveal_stagger", self.reveal_stagger),
            ("reveal_duration", self.reveal_duration),
            ("hide_offset", self.hide_offset),
            ("hide_stagger", self.hide_stagger),
            ("kill_stagger", self.kill_stagger),
            ("conversion_delay", self.conversion_delay),
            ("conversion_turn_delay", self.conversion_turn_delay),
            ("time_between_turns", self.time_between_turns),
            ("forfeit_max_time", self.forfeit_max_time),
            ("sacrifice_kill_delay", self.sacrifice_kill_delay),
            ("kill_fade_time", self.kill_fade_time),
            ("computer_think_time", self.computer_think_time),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }

        if !self.hover_radius.is_finite() || self.hover_radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "hover_radius",
                value: self.hover_radius,
            });
        }

        Ok(())
    }
}
