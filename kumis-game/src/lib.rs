//! Warisan Mbah Kumis Game Engine
//!
//! Platform-agnostic core for the Kumis fungal-biology visual novel: the phase
//! machine, typewriter dialog, scene orchestration and scored mini-games.
//! Nothing here touches a browser; timers are described as [`TimerSpec`]s and
//! fed back in as [`Tick`]s by whichever front end is driving.

pub mod autoplay;
pub mod config;
pub mod constants;
pub mod content;
pub mod controller;
pub mod dialog;
pub mod ending;
pub mod gallery;
pub mod input;
pub mod menu;
pub mod minigame;
pub mod phase;
pub mod player;
pub mod scene;
pub mod store;
pub mod timers;

// Re-export commonly used types
pub use autoplay::{AutoplayError, Autoplayer, Playthrough, Strategy};
pub use config::{ArcadeConfig, ConfigError, GameConfig, TemperatureConfig, TransitionTimings};
pub use content::{
    Content, ContentError, DialogChoice, DialogLine, Emotion, Fungi, FungiKind, MiniGameSpec,
    PhaseScript,
};
pub use controller::{ControllerEvent, GameController, Screen};
pub use dialog::{DialogEngine, DialogSignal, DialogState};
pub use ending::{EndingSummary, EndingTier, percentage};
pub use gallery::{GalleryFilter, GalleryView};
pub use input::InputKey;
pub use menu::{MainMenu, MenuOption};
pub use minigame::{MiniGame, MiniGameAction, MiniGameKind, MiniGameOutcome};
pub use phase::{Phase, PhaseError, PhaseEvent, transition};
pub use player::{PlayerForm, PlayerFormError, PlayerInfo};
pub use scene::{Scene, SceneEffect, SceneStage, TransitionStage};
pub use store::{GameProgress, GameStore, ProgressUpdate};
pub use timers::{Repeat, ScopeId, TaskScope, Tick, TimerKind, TimerSpec, VirtualClock};
