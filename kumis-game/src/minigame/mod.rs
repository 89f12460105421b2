//! Scored mini-games.
//!
//! Every game is a plain state machine: the UI feeds it [`MiniGameAction`]s
//! and timer [`Tick`]s, and it hands back a [`MiniGameOutcome`] exactly once,
//! when the player leaves its result screen.
pub mod arcade;
pub mod choice;
pub mod temperature;
pub mod typed;
pub mod word_guess;

use crate::config::GameConfig;
use crate::content::MiniGameSpec;
use crate::input::InputKey;
use crate::timers::{Tick, TimerSpec};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use arcade::{ArcadeGame, ArcadeMode, Species, Target};
pub use choice::{QuizItem, QuizRound};
pub use temperature::{TemperatureGame, TemperatureZone};
pub use typed::{Attempt, TypedItem, TypedRound};
pub use word_guess::{GuessRow, LetterStatus, WordGuess, WordRound};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiniGameKind {
    MultipleChoice,
    TrueFalse,
    PickWord,
    Sorting,
    FillBlank,
    WordScramble,
    WordGuess,
    ClickTarget,
    FindObject,
    SpeedClick,
    Microscope,
    Temperature,
}

impl MiniGameKind {
    pub const ALL: [MiniGameKind; 12] = [
        MiniGameKind::MultipleChoice,
        MiniGameKind::TrueFalse,
        MiniGameKind::PickWord,
        MiniGameKind::Sorting,
        MiniGameKind::FillBlank,
        MiniGameKind::WordScramble,
        MiniGameKind::WordGuess,
        MiniGameKind::ClickTarget,
        MiniGameKind::FindObject,
        MiniGameKind::SpeedClick,
        MiniGameKind::Microscope,
        MiniGameKind::Temperature,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::TrueFalse => "true_false",
            Self::PickWord => "pick_word",
            Self::Sorting => "sorting",
            Self::FillBlank => "fill_blank",
            Self::WordScramble => "word_scramble",
            Self::WordGuess => "word_guess",
            Self::ClickTarget => "click_target",
            Self::FindObject => "find_object",
            Self::SpeedClick => "speed_click",
            Self::Microscope => "microscope",
            Self::Temperature => "temperature",
        }
    }

    /// Games driven by a countdown rather than by questions.
    #[must_use]
    pub const fn is_timed(self) -> bool {
        matches!(
            self,
            Self::ClickTarget
                | Self::FindObject
                | Self::SpeedClick
                | Self::Microscope
                | Self::Temperature
        )
    }
}

impl fmt::Display for MiniGameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final result of one mini-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniGameOutcome {
    pub kind: MiniGameKind,
    pub score: u32,
    pub total_questions: u32,
}

/// One-shot latch guarding outcome delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    reported: bool,
}

impl Completion {
    pub fn report(&mut self, kind: MiniGameKind, score: u32, total_questions: u32) -> Option<MiniGameOutcome> {
        if self.reported {
            log::debug!("{kind} already reported, ignoring");
            return None;
        }
        self.reported = true;
        Some(MiniGameOutcome {
            kind,
            score,
            total_questions,
        })
    }

    #[must_use]
    pub const fn is_reported(&self) -> bool {
        self.reported
    }
}

/// Player input addressed to the active mini-game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MiniGameAction {
    /// Pick an option by index. True/false uses 0 for true and 1 for false.
    Select(usize),
    /// Leave the explanation or result panel.
    Next,
    /// Replace the typed answer.
    Input(String),
    Submit,
    ToggleHint,
    Key(InputKey),
    /// Click an arcade target by id.
    Click(u32),
    Start,
    RaiseTemperature,
    LowerTemperature,
}

/// A running mini-game session.
#[derive(Debug, Clone)]
pub enum MiniGame {
    MultipleChoice(QuizRound<crate::content::ChoiceQuestion>),
    TrueFalse(QuizRound<crate::content::TrueFalseQuestion>),
    PickWord(QuizRound<crate::content::PickWordQuestion>),
    Sorting(QuizRound<crate::content::SortingQuestion>),
    FillBlank(TypedRound<crate::content::FillBlankQuestion>),
    WordScramble(TypedRound<crate::content::ScrambleQuestion>),
    WordGuess(WordGuess),
    Arcade(ArcadeGame),
    Temperature(TemperatureGame),
}

impl MiniGame {
    /// Build a fresh session from its content.
    #[must_use]
    pub fn start(spec: &MiniGameSpec, config: &GameConfig, seed: u64) -> Self {
        let total = spec.question_count();
        match spec {
            MiniGameSpec::MultipleChoice { questions } => Self::MultipleChoice(QuizRound::new(
                MiniGameKind::MultipleChoice,
                questions.clone(),
            )),
            MiniGameSpec::TrueFalse { questions } => {
                Self::TrueFalse(QuizRound::new(MiniGameKind::TrueFalse, questions.clone()))
            }
            MiniGameSpec::PickWord { questions } => {
                Self::PickWord(QuizRound::new(MiniGameKind::PickWord, questions.clone()))
            }
            MiniGameSpec::Sorting { questions } => {
                Self::Sorting(QuizRound::new(MiniGameKind::Sorting, questions.clone()))
            }
            MiniGameSpec::FillBlank { questions } => {
                Self::FillBlank(TypedRound::new(MiniGameKind::FillBlank, questions.clone()))
            }
            MiniGameSpec::WordScramble { questions } => Self::WordScramble(TypedRound::new(
                MiniGameKind::WordScramble,
                questions.clone(),
            )),
            MiniGameSpec::WordGuess { questions } => Self::WordGuess(WordGuess::new(questions.clone())),
            MiniGameSpec::ClickTarget => {
                Self::Arcade(ArcadeGame::new(ArcadeMode::ClickTarget, &config.arcade, total, seed))
            }
            MiniGameSpec::FindObject => {
                Self::Arcade(ArcadeGame::new(ArcadeMode::FindObject, &config.arcade, total, seed))
            }
            MiniGameSpec::SpeedClick => {
                Self::Arcade(ArcadeGame::new(ArcadeMode::SpeedClick, &config.arcade, total, seed))
            }
            MiniGameSpec::Microscope => {
                Self::Arcade(ArcadeGame::new(ArcadeMode::Microscope, &config.arcade, total, seed))
            }
            MiniGameSpec::Temperature => {
                Self::Temperature(TemperatureGame::new(&config.temperature, total, seed))
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> MiniGameKind {
        match self {
            Self::MultipleChoice(g) => g.kind(),
            Self::TrueFalse(g) => g.kind(),
            Self::PickWord(g) => g.kind(),
            Self::Sorting(g) => g.kind(),
            Self::FillBlank(g) => g.kind(),
            Self::WordScramble(g) => g.kind(),
            Self::WordGuess(_) => MiniGameKind::WordGuess,
            Self::Arcade(g) => g.mode().kind(),
            Self::Temperature(_) => MiniGameKind::Temperature,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        match self {
            Self::MultipleChoice(g) => g.score(),
            Self::TrueFalse(g) => g.score(),
            Self::PickWord(g) => g.score(),
            Self::Sorting(g) => g.score(),
            Self::FillBlank(g) => g.score(),
            Self::WordScramble(g) => g.score(),
            Self::WordGuess(g) => g.score(),
            Self::Arcade(g) => g.score(),
            Self::Temperature(g) => g.score(),
        }
    }

    /// Route player input. Returns the outcome when this input ends the game.
    pub fn apply(&mut self, action: MiniGameAction) -> Option<MiniGameOutcome> {
        match (self, action) {
            (Self::MultipleChoice(g), MiniGameAction::Select(i)) => {
                g.select(i);
                None
            }
            (Self::MultipleChoice(g), MiniGameAction::Next) => g.next(),
            (Self::TrueFalse(g), MiniGameAction::Select(i)) => {
                g.select(i);
                None
            }
            (Self::TrueFalse(g), MiniGameAction::Next) => g.next(),
            (Self::PickWord(g), MiniGameAction::Select(i)) => {
                g.select(i);
                None
            }
            (Self::PickWord(g), MiniGameAction::Next) => g.next(),
            (Self::Sorting(g), MiniGameAction::Select(i)) => {
                g.select(i);
                None
            }
            (Self::Sorting(g), MiniGameAction::Next) => g.next(),
            (Self::FillBlank(g), action) => apply_typed(g, action),
            (Self::WordScramble(g), action) => apply_typed(g, action),
            (Self::WordGuess(g), MiniGameAction::Key(key)) => {
                g.press(key);
                None
            }
            (Self::WordGuess(g), MiniGameAction::Submit) => {
                g.press(InputKey::Enter);
                None
            }
            (Self::WordGuess(g), MiniGameAction::Next) => g.next(),
            (Self::Arcade(g), MiniGameAction::Click(id)) => {
                g.click(id);
                None
            }
            (Self::Arcade(g), MiniGameAction::Next) => g.finish(),
            (Self::Temperature(g), MiniGameAction::Start) => {
                g.start();
                None
            }
            (Self::Temperature(g), MiniGameAction::RaiseTemperature) => {
                g.nudge(1.0);
                None
            }
            (Self::Temperature(g), MiniGameAction::LowerTemperature) => {
                g.nudge(-1.0);
                None
            }
            (Self::Temperature(g), MiniGameAction::Next) => g.finish(),
            (game, action) => {
                log::debug!("{} ignores {action:?}", game.kind());
                None
            }
        }
    }

    /// Deliver a timer tick. Stale ticks are dropped.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        match self {
            Self::Arcade(g) => g.on_tick(tick),
            Self::Temperature(g) => g.on_tick(tick),
            _ => false,
        }
    }

    /// Timers this game needs running right now.
    #[must_use]
    pub fn timers(&self) -> Vec<TimerSpec> {
        match self {
            Self::Arcade(g) => g.timers(),
            Self::Temperature(g) => g.timers(),
            _ => Vec::new(),
        }
    }
}

fn apply_typed<Q: TypedItem>(round: &mut TypedRound<Q>, action: MiniGameAction) -> Option<MiniGameOutcome> {
    match action {
        MiniGameAction::Input(text) => round.set_input(text),
        MiniGameAction::Submit | MiniGameAction::Key(InputKey::Enter) => {
            round.submit();
        }
        MiniGameAction::ToggleHint => round.toggle_hint(),
        MiniGameAction::Next => return round.next(),
        other => log::debug!("{} ignores {other:?}", round.kind()),
    }
    None
}
