//! Headless driver that plays the game through the controller.
//!
//! Used by the tester binary and integration tests. Timers run on a
//! [`VirtualClock`], so a full playthrough is deterministic for a seed.
use crate::controller::{ControllerEvent, GameController, Screen};
use crate::ending::EndingSummary;
use crate::input::InputKey;
use crate::minigame::{
    ArcadeGame, MiniGame, MiniGameAction, MiniGameKind, MiniGameOutcome, QuizItem, QuizRound,
    TemperatureGame, TypedItem, TypedRound, WordGuess,
};
use crate::scene::SceneStage;
use crate::timers::VirtualClock;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const DEFAULT_STEP_LIMIT: usize = 250_000;
const RANDOM_SKIP_CHANCE: f64 = 0.05;

/// How the driver answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Perfect,
    Random,
    Worst,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Perfect, Strategy::Random, Strategy::Worst];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Random => "random",
            Self::Worst => "worst",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown strategy '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutoplayError {
    #[error("no input or timer can move the game on {screen:?} ({stage:?})")]
    Stuck {
        screen: Screen,
        stage: Option<SceneStage>,
    },
    #[error("{0} offers no input and no timer")]
    MiniGameStalled(MiniGameKind),
    #[error("gave up after {0} steps")]
    StepLimit(usize),
}

/// What one complete run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playthrough {
    pub strategy: Strategy,
    pub seed: u64,
    pub steps: usize,
    pub virtual_ms: u64,
    pub completed_mini_games: Vec<MiniGameKind>,
    pub skipped_dialogs: u32,
    pub summary: EndingSummary,
}

#[derive(Debug, Clone)]
pub struct Autoplayer {
    strategy: Strategy,
    rng: ChaCha20Rng,
    clock: VirtualClock,
    step_limit: usize,
    last_click_ms: Option<u64>,
}

impl Autoplayer {
    #[must_use]
    pub fn new(strategy: Strategy, seed: u64) -> Self {
        Self {
            strategy,
            rng: ChaCha20Rng::seed_from_u64(seed),
            clock: VirtualClock::default(),
            step_limit: DEFAULT_STEP_LIMIT,
            last_click_ms: None,
        }
    }

    #[must_use]
    pub const fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = limit;
        self
    }

    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Play from the menu to the ending screen.
    ///
    /// # Errors
    ///
    /// Returns [`AutoplayError::Stuck`] if a screen offers neither input nor
    /// timers, and [`AutoplayError::StepLimit`] if the run never ends.
    pub fn play(
        &mut self,
        controller: &mut GameController,
        name: &str,
        class: &str,
    ) -> Result<Playthrough, AutoplayError> {
        let mut skipped = 0;
        for step in 0..self.step_limit {
            let events = match controller.screen() {
                Screen::Menu => vec![ControllerEvent::Key(InputKey::Enter)],
                Screen::Gallery | Screen::Credits => vec![ControllerEvent::BackToMenu],
                Screen::PlayerForm => vec![
                    ControllerEvent::PlayerName(name.to_string()),
                    ControllerEvent::PlayerClass(class.to_string()),
                    ControllerEvent::SubmitPlayer,
                ],
                Screen::Ending => {
                    let Some(summary) = controller.ending_summary() else {
                        return Err(Self::stuck(controller));
                    };
                    return Ok(Playthrough {
                        strategy: self.strategy,
                        seed: controller.seed(),
                        steps: step,
                        virtual_ms: self.clock.now_ms(),
                        completed_mini_games: controller
                            .store()
                            .progress()
                            .completed_mini_games
                            .clone(),
                        skipped_dialogs: skipped,
                        summary,
                    });
                }
                Screen::Story(_) => {
                    let events = self.story_events(controller);
                    if events.contains(&ControllerEvent::ConfirmSkip) {
                        skipped += 1;
                    }
                    events
                }
            };
            if events.is_empty() {
                let Some(tick) = self.clock.next_tick(&controller.timers()) else {
                    return Err(Self::stuck(controller));
                };
                controller.handle(ControllerEvent::Tick(tick));
                continue;
            }
            for event in events {
                controller.handle(event);
            }
        }
        Err(AutoplayError::StepLimit(self.step_limit))
    }

    /// Play one mini-game on its own until it reports.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Autoplayer::play`].
    pub fn play_mini_game(&mut self, game: &mut MiniGame) -> Result<MiniGameOutcome, AutoplayError> {
        for _ in 0..self.step_limit {
            let actions = self.mini_game_actions(game);
            if actions.is_empty() {
                let Some(tick) = self.clock.next_tick(&game.timers()) else {
                    return Err(AutoplayError::MiniGameStalled(game.kind()));
                };
                game.on_tick(tick);
                continue;
            }
            for action in actions {
                if let Some(outcome) = game.apply(action) {
                    return Ok(outcome);
                }
            }
        }
        Err(AutoplayError::StepLimit(self.step_limit))
    }

    fn stuck(controller: &GameController) -> AutoplayError {
        AutoplayError::Stuck {
            screen: controller.screen(),
            stage: controller.scene().map(crate::scene::Scene::stage),
        }
    }

    fn story_events(&mut self, controller: &GameController) -> Vec<ControllerEvent> {
        let Some(scene) = controller.scene() else {
            return Vec::new();
        };
        match scene.stage() {
            SceneStage::Transition(_) | SceneStage::Complete => Vec::new(),
            SceneStage::Summary => vec![ControllerEvent::ContinueSummary],
            SceneStage::Dialog => {
                let dialog = scene.dialog();
                if self.strategy == Strategy::Random
                    && dialog.index() == 0
                    && !dialog.is_typing()
                    && !dialog.is_confirming_skip()
                    && self.rng.gen_bool(RANDOM_SKIP_CHANCE)
                {
                    return vec![ControllerEvent::RequestSkip, ControllerEvent::ConfirmSkip];
                }
                let choices = dialog.choices().len();
                if choices > 0 {
                    let pick = match self.strategy {
                        Strategy::Random => self.rng.gen_range(0..choices),
                        Strategy::Perfect | Strategy::Worst => 0,
                    };
                    vec![ControllerEvent::Choose(pick)]
                } else if dialog.is_typing() {
                    Vec::new()
                } else {
                    vec![ControllerEvent::AdvanceDialog]
                }
            }
            SceneStage::MiniGame => scene
                .minigame()
                .map(|game| self.mini_game_actions(game))
                .unwrap_or_default()
                .into_iter()
                .map(ControllerEvent::MiniGame)
                .collect(),
        }
    }

    /// The next batch of inputs for `game`; empty means "wait for a timer".
    pub fn mini_game_actions(&mut self, game: &MiniGame) -> Vec<MiniGameAction> {
        match game {
            MiniGame::MultipleChoice(g) => self.quiz(g),
            MiniGame::TrueFalse(g) => self.quiz(g),
            MiniGame::PickWord(g) => self.quiz(g),
            MiniGame::Sorting(g) => self.quiz(g),
            MiniGame::FillBlank(g) => self.typed(g),
            MiniGame::WordScramble(g) => self.typed(g),
            MiniGame::WordGuess(g) => self.word_guess(g),
            MiniGame::Arcade(g) => self.arcade(g),
            MiniGame::Temperature(g) => self.temperature(g),
        }
    }

    fn quiz<Q: QuizItem>(&mut self, round: &QuizRound<Q>) -> Vec<MiniGameAction> {
        let Some(question) = round.current() else {
            return vec![MiniGameAction::Next];
        };
        if round.selected().is_some() {
            return vec![MiniGameAction::Next];
        }
        let count = question.option_count().max(1);
        let correct = question.correct_index();
        let pick = match self.strategy {
            Strategy::Perfect => correct,
            Strategy::Worst => (0..count).find(|i| *i != correct).unwrap_or(0),
            Strategy::Random => self.rng.gen_range(0..count),
        };
        vec![MiniGameAction::Select(pick), MiniGameAction::Next]
    }

    fn typed<Q: TypedItem>(&mut self, round: &TypedRound<Q>) -> Vec<MiniGameAction> {
        let Some(question) = round.current() else {
            return vec![MiniGameAction::Next];
        };
        if round.is_resolved() {
            return vec![MiniGameAction::Next];
        }
        let right = match self.strategy {
            Strategy::Perfect => true,
            Strategy::Worst => false,
            Strategy::Random => self.rng.gen_bool(0.5),
        };
        let guess = if right {
            question.answer().to_string()
        } else {
            "salah".to_string()
        };
        vec![MiniGameAction::Input(guess), MiniGameAction::Submit]
    }

    fn word_guess(&mut self, game: &WordGuess) -> Vec<MiniGameAction> {
        let round = game.round();
        if game.current().is_none() || round.is_over() {
            return vec![MiniGameAction::Next];
        }
        let answer: Vec<char> = game
            .current()
            .map(|q| q.answer.to_ascii_uppercase().chars().collect())
            .unwrap_or_default();
        let letters: Vec<char> = match self.strategy {
            Strategy::Perfect => answer,
            Strategy::Worst => {
                let filler = if answer.contains(&'Z') { 'Q' } else { 'Z' };
                vec![filler; round.word_len()]
            }
            Strategy::Random => (0..round.word_len())
                .map(|_| char::from(self.rng.gen_range(b'A'..=b'Z')))
                .collect(),
        };
        let mut actions: Vec<MiniGameAction> = std::iter::repeat_n(
            MiniGameAction::Key(InputKey::Backspace),
            round.typing().chars().count(),
        )
        .collect();
        actions.extend(letters.into_iter().map(|c| MiniGameAction::Key(InputKey::Char(c))));
        actions.push(MiniGameAction::Submit);
        actions
    }

    /// At most one click per timer tick.
    fn arcade(&mut self, game: &ArcadeGame) -> Vec<MiniGameAction> {
        if game.is_over() {
            return vec![MiniGameAction::Next];
        }
        let now = self.clock.now_ms();
        if self.last_click_ms == Some(now) {
            return Vec::new();
        }
        let wanted = match self.strategy {
            Strategy::Perfect => game.targets().iter().find(|t| t.good),
            Strategy::Worst => game.targets().iter().find(|t| !t.good),
            Strategy::Random => {
                let targets = game.targets();
                if targets.is_empty() || self.rng.gen_bool(0.5) {
                    None
                } else {
                    targets.get(self.rng.gen_range(0..targets.len()))
                }
            }
        };
        let Some(target) = wanted else {
            return Vec::new();
        };
        self.last_click_ms = Some(now);
        vec![MiniGameAction::Click(target.id)]
    }

    fn temperature(&mut self, game: &TemperatureGame) -> Vec<MiniGameAction> {
        if game.result().is_some() {
            return vec![MiniGameAction::Next];
        }
        if !game.is_running() {
            return vec![MiniGameAction::Start];
        }
        let step = game.config().nudge;
        let action = match self.strategy {
            Strategy::Perfect if game.value() < game.target() - step => {
                Some(MiniGameAction::RaiseTemperature)
            }
            Strategy::Perfect if game.value() > game.target() + step => {
                Some(MiniGameAction::LowerTemperature)
            }
            Strategy::Perfect => None,
            Strategy::Worst if game.value() < game.config().max => {
                Some(MiniGameAction::RaiseTemperature)
            }
            Strategy::Worst => None,
            Strategy::Random => match self.rng.gen_range(0..4) {
                0 => Some(MiniGameAction::RaiseTemperature),
                1 => Some(MiniGameAction::LowerTemperature),
                _ => None,
            },
        };
        action.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::content::{Content, MiniGameSpec};

    fn practice(kind: MiniGameKind) -> MiniGameSpec {
        Content::load_from_static()
            .unwrap()
            .practice()
            .iter()
            .find(|spec| spec.kind() == kind)
            .cloned()
            .unwrap()
    }

    #[test]
    fn strategy_names_parse() {
        assert_eq!("PERFECT".parse::<Strategy>(), Ok(Strategy::Perfect));
        assert!("lucky".parse::<Strategy>().is_err());
    }

    #[test]
    fn perfect_fill_blank_scores_first_try() {
        let spec = practice(MiniGameKind::FillBlank);
        let mut game = MiniGame::start(&spec, &GameConfig::default(), 1);
        let outcome = Autoplayer::new(Strategy::Perfect, 1)
            .play_mini_game(&mut game)
            .unwrap();
        assert_eq!(outcome.score, 15 * outcome.total_questions);
    }

    #[test]
    fn worst_temperature_overheats() {
        let spec = practice(MiniGameKind::Temperature);
        let mut game = MiniGame::start(&spec, &GameConfig::default(), 3);
        let outcome = Autoplayer::new(Strategy::Worst, 3)
            .play_mini_game(&mut game)
            .unwrap();
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.kind, MiniGameKind::Temperature);
    }

    #[test]
    fn step_limit_is_reported() {
        let spec = practice(MiniGameKind::ClickTarget);
        let mut game = MiniGame::start(&spec, &GameConfig::default(), 5);
        let err = Autoplayer::new(Strategy::Worst, 5)
            .with_step_limit(3)
            .play_mini_game(&mut game)
            .unwrap_err();
        assert_eq!(err, AutoplayError::StepLimit(3));
    }
}
