//! Fixed-answer quizzes: multiple choice, true/false, pick-word and sorting.
use super::{Completion, MiniGameKind, MiniGameOutcome};
use crate::constants::POINTS_PER_CORRECT;
use crate::content::{ChoiceQuestion, PickWordQuestion, SortingQuestion, TrueFalseQuestion};

/// A question with one correct option.
pub trait QuizItem {
    fn option_count(&self) -> usize;
    fn correct_index(&self) -> usize;
    fn explanation(&self) -> &str;
}

impl QuizItem for ChoiceQuestion {
    fn option_count(&self) -> usize {
        self.options.len()
    }
    fn correct_index(&self) -> usize {
        self.correct
    }
    fn explanation(&self) -> &str {
        &self.explanation
    }
}

impl QuizItem for PickWordQuestion {
    fn option_count(&self) -> usize {
        self.options.len()
    }
    fn correct_index(&self) -> usize {
        self.correct
    }
    fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Option 0 is "true", option 1 is "false".
impl QuizItem for TrueFalseQuestion {
    fn option_count(&self) -> usize {
        2
    }
    fn correct_index(&self) -> usize {
        usize::from(!self.is_true)
    }
    fn explanation(&self) -> &str {
        &self.explanation
    }
}

impl QuizItem for SortingQuestion {
    fn option_count(&self) -> usize {
        self.options.len()
    }
    fn correct_index(&self) -> usize {
        self.options
            .iter()
            .position(|id| *id == self.correct)
            .unwrap_or(usize::MAX)
    }
    fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Sequential quiz: answer, read the explanation, move on.
#[derive(Debug, Clone)]
pub struct QuizRound<Q> {
    kind: MiniGameKind,
    questions: Vec<Q>,
    index: usize,
    correct: u32,
    selected: Option<usize>,
    completion: Completion,
}

impl<Q: QuizItem> QuizRound<Q> {
    #[must_use]
    pub fn new(kind: MiniGameKind, questions: Vec<Q>) -> Self {
        Self {
            kind,
            questions,
            index: 0,
            correct: 0,
            selected: None,
            completion: Completion::default(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> MiniGameKind {
        self.kind
    }

    #[must_use]
    pub fn current(&self) -> Option<&Q> {
        if self.completion.is_reported() {
            return None;
        }
        self.questions.get(self.index)
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub const fn correct_count(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.correct * POINTS_PER_CORRECT
    }

    /// Whether the current answer was right, once one is locked in.
    #[must_use]
    pub fn answer_was_correct(&self) -> Option<bool> {
        let question = self.current()?;
        self.selected.map(|s| s == question.correct_index())
    }

    /// Lock in an answer. Ignored once answered or when out of range.
    pub fn select(&mut self, option: usize) -> Option<bool> {
        if self.selected.is_some() {
            return None;
        }
        let question = self.current()?;
        if option >= question.option_count() {
            log::debug!("{} option {option} out of range", self.kind);
            return None;
        }
        let hit = option == question.correct_index();
        self.selected = Some(option);
        if hit {
            self.correct += 1;
        }
        Some(hit)
    }

    /// Advance past the explanation; the last question reports the outcome.
    pub fn next(&mut self) -> Option<MiniGameOutcome> {
        if self.completion.is_reported() {
            return None;
        }
        if self.selected.is_none() && !self.questions.is_empty() {
            return None;
        }
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            self.selected = None;
            return None;
        }
        self.selected = None;
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        self.completion.report(self.kind, self.score(), total)
    }
}
