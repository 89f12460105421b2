//! Game state store: phase, player identity and cumulative progress.
use crate::minigame::MiniGameKind;
use crate::phase::{Phase, PhaseError, PhaseEvent, transition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the player has accumulated during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameProgress {
    pub player_name: Option<String>,
    pub player_class: Option<String>,
    pub current_act: u8,
    pub total_quiz_score: u32,
    pub total_quiz_questions: u32,
    pub completed_mini_games: Vec<MiniGameKind>,
    pub player_choices: BTreeMap<String, bool>,
}

/// Partial update merged into [`GameProgress`]; `None` fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressUpdate {
    pub current_act: Option<u8>,
    pub total_quiz_score: Option<u32>,
    pub total_quiz_questions: Option<u32>,
    pub completed_mini_games: Option<Vec<MiniGameKind>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStore {
    phase: Phase,
    progress: GameProgress,
    active_mini_game: Option<MiniGameKind>,
}

impl GameStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn progress(&self) -> &GameProgress {
        &self.progress
    }

    #[must_use]
    pub const fn active_mini_game(&self) -> Option<MiniGameKind> {
        self.active_mini_game
    }

    /// Set the phase unconditionally.
    pub fn set_phase(&mut self, phase: Phase) {
        log::debug!("phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Move the phase along the transition table.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::InvalidTransition`] and leaves the phase unchanged
    /// when the event has no edge from the current phase.
    pub fn fire(&mut self, event: PhaseEvent) -> Result<Phase, PhaseError> {
        let next = transition(self.phase, event)?;
        self.set_phase(next);
        Ok(next)
    }

    pub fn update_progress(&mut self, update: ProgressUpdate) {
        let ProgressUpdate {
            current_act,
            total_quiz_score,
            total_quiz_questions,
            completed_mini_games,
        } = update;
        if let Some(act) = current_act {
            self.progress.current_act = act;
        }
        if let Some(score) = total_quiz_score {
            self.progress.total_quiz_score = score;
        }
        if let Some(questions) = total_quiz_questions {
            self.progress.total_quiz_questions = questions;
        }
        if let Some(games) = completed_mini_games {
            self.progress.completed_mini_games = games;
        }
    }

    pub fn start_mini_game(&mut self, kind: MiniGameKind) {
        self.active_mini_game = Some(kind);
    }

    /// Bank a finished mini-game's score. Never changes the phase.
    pub fn end_mini_game(&mut self, score: u32, total_questions: u32) {
        self.progress.total_quiz_score = self.progress.total_quiz_score.saturating_add(score);
        self.progress.total_quiz_questions = self
            .progress
            .total_quiz_questions
            .saturating_add(total_questions);
        if let Some(kind) = self.active_mini_game.take() {
            self.progress.completed_mini_games.push(kind);
        }
        log::info!(
            "mini-game banked {score}/{total_questions}; running {}/{}",
            self.progress.total_quiz_score,
            self.progress.total_quiz_questions
        );
    }

    pub fn set_player_info(&mut self, name: impl Into<String>, class: impl Into<String>) {
        self.progress.player_name = Some(name.into());
        self.progress.player_class = Some(class.into());
    }

    pub fn make_choice(&mut self, id: impl Into<String>, value: bool) {
        self.progress.player_choices.insert(id.into(), value);
    }

    /// Back to a fresh menu, forgetting the player.
    pub fn reset_game(&mut self) {
        *self = Self::default();
    }
}
