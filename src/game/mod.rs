//! Match flow: controllers, the tutorial script and the game manager.
//!
//! The manager is driven one frame at a time through `GameManager::update`
//! with a `FrameContext` carrying input, audio and the UI overlay.

pub mod events;
pub mod context;
pub mod controller;
pub mod tutorial;
pub mod manager;

pub use events::{GameResult, MatchEvent, MatchOutcome};
pub use context::{
    AudioSink, FrameContext, HeadlessAudio, HeadlessPresentation, InputState, Presentation, Sound,
};
pub use controller::{
    ComputerController, Controller, ControllerKind, HumanController, TurnView, TutorialScriptController,
};
pub use tutorial::{MatchSnapshot, TutorialGate, TutorialScript, TutorialStep, TUTORIAL_STEPS};
pub use manager::{GameManager, MatchMode, Phase};
