//! Six-guess word puzzle with per-letter feedback.
use super::{Completion, MiniGameKind, MiniGameOutcome};
use crate::constants::{
    WORD_GUESS_BASE_POINTS, WORD_GUESS_MAX_GUESSES, WORD_GUESS_MIN_POINTS, WORD_GUESS_STEP_PENALTY,
};
use crate::content::WordGuessQuestion;
use crate::input::InputKey;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    Correct,
    Present,
    Absent,
}

/// Feedback for one guessed letter.
///
/// Exact position wins; otherwise any occurrence in the answer counts as
/// present, regardless of how many times the letter was already matched.
#[must_use]
pub fn letter_status(answer: &[char], index: usize, letter: char) -> LetterStatus {
    if answer.get(index) == Some(&letter) {
        LetterStatus::Correct
    } else if answer.contains(&letter) {
        LetterStatus::Present
    } else {
        LetterStatus::Absent
    }
}

/// Points for solving on guess number `guesses` (1-based).
#[must_use]
pub fn points_for_guesses(guesses: usize) -> u32 {
    let penalty = u32::try_from(guesses.saturating_sub(1))
        .unwrap_or(u32::MAX)
        .saturating_mul(WORD_GUESS_STEP_PENALTY);
    WORD_GUESS_BASE_POINTS
        .saturating_sub(penalty)
        .max(WORD_GUESS_MIN_POINTS)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRow {
    pub word: String,
    pub feedback: SmallVec<[LetterStatus; 8]>,
}

/// Board state for a single answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRound {
    answer: Vec<char>,
    rows: Vec<GuessRow>,
    typing: String,
    keyboard: BTreeMap<char, LetterStatus>,
    solved: bool,
}

impl WordRound {
    #[must_use]
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_ascii_uppercase().chars().collect(),
            rows: Vec::new(),
            typing: String::new(),
            keyboard: BTreeMap::new(),
            solved: false,
        }
    }

    #[must_use]
    pub fn word_len(&self) -> usize {
        self.answer.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[GuessRow] {
        &self.rows
    }

    #[must_use]
    pub fn typing(&self) -> &str {
        &self.typing
    }

    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.solved || self.rows.len() >= WORD_GUESS_MAX_GUESSES
    }

    #[must_use]
    pub fn key_status(&self, letter: char) -> Option<LetterStatus> {
        self.keyboard.get(&letter.to_ascii_uppercase()).copied()
    }

    /// Points earned on this board; zero unless solved.
    #[must_use]
    pub fn points(&self) -> u32 {
        if self.solved {
            points_for_guesses(self.rows.len())
        } else {
            0
        }
    }

    pub fn press(&mut self, key: InputKey) {
        if self.is_over() {
            return;
        }
        match key {
            InputKey::Enter => {
                if self.typing.chars().count() == self.word_len() {
                    self.commit();
                }
            }
            InputKey::Backspace => {
                self.typing.pop();
            }
            other => {
                if let Some(letter) = other.letter()
                    && self.typing.chars().count() < self.word_len()
                {
                    self.typing.push(letter);
                }
            }
        }
    }

    fn commit(&mut self) {
        let word = std::mem::take(&mut self.typing);
        let feedback: SmallVec<[LetterStatus; 8]> = word
            .chars()
            .enumerate()
            .map(|(idx, letter)| letter_status(&self.answer, idx, letter))
            .collect();
        for (letter, status) in word.chars().zip(feedback.iter().copied()) {
            let entry = self.keyboard.entry(letter).or_insert(status);
            if *entry != LetterStatus::Correct {
                *entry = status;
            }
        }
        self.solved = word.chars().eq(self.answer.iter().copied());
        self.rows.push(GuessRow { word, feedback });
    }
}

/// A sequence of word puzzles.
#[derive(Debug, Clone)]
pub struct WordGuess {
    questions: Vec<WordGuessQuestion>,
    index: usize,
    round: WordRound,
    score: u32,
    completion: Completion,
}

impl WordGuess {
    #[must_use]
    pub fn new(questions: Vec<WordGuessQuestion>) -> Self {
        let round = WordRound::new(questions.first().map_or("", |q| q.answer.as_str()));
        Self {
            questions,
            index: 0,
            round,
            score: 0,
            completion: Completion::default(),
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&WordGuessQuestion> {
        if self.completion.is_reported() {
            return None;
        }
        self.questions.get(self.index)
    }

    #[must_use]
    pub const fn round(&self) -> &WordRound {
        &self.round
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

    /// Banked points plus the current board once it is solved.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score + self.round.points()
    }

    pub fn press(&mut self, key: InputKey) {
        if self.current().is_some() {
            self.round.press(key);
        }
    }

    /// Leave a finished board; the last one reports the outcome.
    pub fn next(&mut self) -> Option<MiniGameOutcome> {
        if self.completion.is_reported() {
            return None;
        }
        if !self.round.is_over() && !self.questions.is_empty() {
            return None;
        }
        self.score += self.round.points();
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            self.round = WordRound::new(&self.questions[self.index].answer);
            return None;
        }
        self.round = WordRound::new("");
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        self.completion
            .report(MiniGameKind::WordGuess, self.score, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_word(round: &mut WordRound, word: &str) {
        for c in word.chars() {
            round.press(InputKey::Char(c));
        }
        round.press(InputKey::Enter);
    }

    fn question(answer: &str) -> WordGuessQuestion {
        WordGuessQuestion {
            answer: answer.into(),
            hint: String::new(),
            explanation: String::new(),
            image: None,
        }
    }

    #[test]
    fn scoring_curve() {
        assert_eq!(points_for_guesses(1), 25);
        assert_eq!(points_for_guesses(2), 22);
        assert_eq!(points_for_guesses(6), 10);
        assert_eq!(points_for_guesses(9), 5);
        assert_eq!(points_for_guesses(40), 5);
    }

    #[test]
    fn feedback_is_not_multiset_aware() {
        let answer: Vec<char> = "ONCOM".chars().collect();
        // second O is present even though both O's are already placed
        let statuses: Vec<_> = "OOOOO"
            .chars()
            .enumerate()
            .map(|(i, c)| letter_status(&answer, i, c))
            .collect();
        assert_eq!(
            statuses,
            vec![
                LetterStatus::Correct,
                LetterStatus::Present,
                LetterStatus::Present,
                LetterStatus::Correct,
                LetterStatus::Present
            ]
        );
    }

    #[test]
    fn enter_requires_full_length_and_letters_only() {
        let mut round = WordRound::new("TEMPE");
        round.press(InputKey::Char('t'));
        round.press(InputKey::Char('3'));
        round.press(InputKey::Enter);
        assert!(round.rows().is_empty());
        assert_eq!(round.typing(), "T");
        for c in "EMPEX".chars() {
            round.press(InputKey::Char(c));
        }
        assert_eq!(round.typing(), "TEMPE");
        round.press(InputKey::Backspace);
        assert_eq!(round.typing(), "TEMP");
    }

    #[test]
    fn keyboard_never_downgrades_correct() {
        let mut round = WordRound::new("TEMPE");
        type_word(&mut round, "TOTAL");
        assert_eq!(round.key_status('T'), Some(LetterStatus::Correct));
        type_word(&mut round, "ETTTT");
        assert_eq!(round.key_status('T'), Some(LetterStatus::Correct));
        assert_eq!(round.key_status('O'), Some(LetterStatus::Absent));
        assert_eq!(round.key_status('E'), Some(LetterStatus::Present));
    }

    #[test]
    fn win_on_third_guess_scores_nineteen() {
        let mut game = WordGuess::new(vec![question("ONCOM")]);
        for word in ["KAPAN", "TEMPE", "ONCOM"] {
            for c in word.chars() {
                game.press(InputKey::Char(c));
            }
            game.press(InputKey::Enter);
        }
        assert!(game.round().is_solved());
        let outcome = game.next().unwrap();
        assert_eq!(outcome.score, 19);
    }

    #[test]
    fn exhausted_guesses_score_zero() {
        let mut game = WordGuess::new(vec![question("TEMPE"), question("ONCOM")]);
        assert!(game.next().is_none(), "board not finished");
        for _ in 0..WORD_GUESS_MAX_GUESSES {
            for c in "KAPAN".chars() {
                game.press(InputKey::Char(c));
            }
            game.press(InputKey::Enter);
        }
        assert!(game.round().is_over());
        game.press(InputKey::Char('A'));
        assert_eq!(game.round().typing(), "");
        assert!(game.next().is_none());
        assert_eq!(game.index(), 1);
        assert_eq!(game.score(), 0);
    }
}
