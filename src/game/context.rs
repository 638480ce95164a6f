//! Per-frame collaborators passed into `GameManager::update`.
//!
//! The manager never reaches for global state. Input, audio and the UI
//! overlay it talks to all arrive through a `FrameContext` built by the
//! caller each frame. Headless implementations record what they were asked
//! to do, for tests and simulations.

use glam::Vec2;

use super::events::MatchOutcome;

/// Input polled this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    /// Primary button went down this frame.
    pub primary_pressed: bool,
    /// Secondary button went down this frame.
    pub secondary_pressed: bool,
    /// Cursor in world coordinates.
    pub cursor: Vec2,
    /// Forfeit key is held.
    pub forfeit_held: bool,
}

impl InputState {
    /// Nothing pressed, cursor at the origin.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// A primary click at `cursor`.
    #[must_use]
    pub fn click(cursor: Vec2) -> Self {
        Self {
            primary_pressed: true,
            cursor,
            ..Self::default()
        }
    }

    /// A secondary click at `cursor`.
    #[must_use]
    pub fn secondary_click(cursor: Vec2) -> Self {
        Self {
            secondary_pressed: true,
            cursor,
            ..Self::default()
        }
    }

    /// Cursor resting at `cursor`.
    #[must_use]
    pub fn hover(cursor: Vec2) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }
}

/// Sound effects the core asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Summon,
    Conversion,
    Explosion,
}

/// Fire-and-forget audio output.
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// UI overlay the match flow drives.
pub trait Presentation {
    fn show_main_menu(&mut self);
    fn hide_main_menu(&mut self);
    /// Start the result animation.
    fn show_result(&mut self, outcome: &MatchOutcome);
    /// The result animation is still playing.
    fn is_result_animating(&self) -> bool;
    fn show_tutorial_text(&mut self, text: &str);
}

/// Everything the manager needs from outside for one frame.
pub struct FrameContext<'a> {
    pub delta_time: f32,
    pub input: InputState,
    pub audio: &'a mut dyn AudioSink,
    pub presentation: &'a mut dyn Presentation,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        delta_time: f32,
        input: InputState,
        audio: &'a mut dyn AudioSink,
        presentation: &'a mut dyn Presentation,
    ) -> Self {
        Self {
            delta_time,
            input,
            audio,
            presentation,
        }
    }
}

/// Audio sink that records every sound.
#[derive(Clone, Debug, Default)]
pub struct HeadlessAudio {
    pub played: Vec<Sound>,
}

impl HeadlessAudio {
    #[must_use]
    pub fn count(&self, sound: Sound) -> usize {
        self.played.iter().filter(|&&s| s == sound).count()
    }
}

impl AudioSink for HeadlessAudio {
    fn play(&mut self, sound: Sound) {
        self.played.push(sound);
    }
}

/// Presentation that records calls.
///
/// The result animation lasts `result_frames` calls to `is_result_animating`.
#[derive(Clone, Debug, Default)]
pub struct HeadlessPresentation {
    pub menu_visible: bool,
    pub results: Vec<MatchOutcome>,
    pub tutorial_texts: Vec<String>,
    pub result_frames: u32,
    remaining_frames: std::cell::Cell<u32>,
}

impl HeadlessPresentation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the result animation running for `frames` polls.
    #[must_use]
    pub fn with_result_frames(mut self, frames: u32) -> Self {
        self.result_frames = frames;
        self
    }
}

impl Presentation for HeadlessPresentation {
    fn show_main_menu(&mut self) {
        self.menu_visible = true;
    }

    fn hide_main_menu(&mut self) {
        self.menu_visible = false;
    }

    fn show_result(&mut self, outcome: &MatchOutcome) {
        self.results.push(*outcome);
        self.remaining_frames.set(self.result_frames);
    }

    fn is_result_animating(&self) -> bool {
        let remaining = self.remaining_frames.get();
        if remaining == 0 {
            return false;
        }
        self.remaining_frames.set(remaining - 1);
        true
    }

    fn show_tutorial_text(&mut self, text: &str) {
        self.tutorial_texts.push(text.to_string());
    }
}
