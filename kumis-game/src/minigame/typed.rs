//! Free-text answers: fill-in-the-blank and word scramble.
use super::{Completion, MiniGameKind, MiniGameOutcome};
use crate::constants::{
    TYPED_MAX_ATTEMPTS, TYPED_POINTS_FIRST_TRY, TYPED_POINTS_LATER_TRY, TYPED_POINTS_SECOND_TRY,
};
use crate::content::{FillBlankQuestion, ScrambleQuestion};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

pub trait TypedItem {
    fn accepts(&self, input: &str) -> bool;
    fn answer(&self) -> &str;
    fn hint(&self) -> String;
    fn explanation(&self) -> &str;
}

impl TypedItem for FillBlankQuestion {
    fn accepts(&self, input: &str) -> bool {
        let normalize = |text: &str| text.trim().to_lowercase();
        let guess = normalize(input);
        guess == normalize(&self.answer)
            || self.alternatives.iter().any(|alt| normalize(alt) == guess)
    }

    fn answer(&self) -> &str {
        &self.answer
    }

    /// First letter of the answer.
    fn hint(&self) -> String {
        self.answer
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    fn explanation(&self) -> &str {
        &self.explanation
    }
}

fn squash(text: &str) -> String {
    WHITESPACE.replace_all(&text.trim().to_lowercase(), "").into_owned()
}

impl TypedItem for ScrambleQuestion {
    fn accepts(&self, input: &str) -> bool {
        squash(input) == squash(&self.answer)
    }

    fn answer(&self) -> &str {
        &self.answer
    }

    fn hint(&self) -> String {
        self.hint.clone()
    }

    fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Result of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Correct { points: u32 },
    Wrong { remaining: u32 },
    /// Out of attempts; the answer is shown and scores nothing.
    Revealed,
}

const fn points_for(previous_attempts: u32) -> u32 {
    match previous_attempts {
        0 => TYPED_POINTS_FIRST_TRY,
        1 => TYPED_POINTS_SECOND_TRY,
        _ => TYPED_POINTS_LATER_TRY,
    }
}

#[derive(Debug, Clone)]
pub struct TypedRound<Q> {
    kind: MiniGameKind,
    questions: Vec<Q>,
    index: usize,
    score: u32,
    input: String,
    attempts: u32,
    last: Option<Attempt>,
    show_hint: bool,
    completion: Completion,
}

impl<Q: TypedItem> TypedRound<Q> {
    #[must_use]
    pub fn new(kind: MiniGameKind, questions: Vec<Q>) -> Self {
        Self {
            kind,
            questions,
            index: 0,
            score: 0,
            input: String::new(),
            attempts: 0,
            last: None,
            show_hint: false,
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
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub const fn last_attempt(&self) -> Option<Attempt> {
        self.last
    }

    /// The answer is on screen: solved or out of attempts.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self.last, Some(Attempt::Correct { .. } | Attempt::Revealed))
    }

    #[must_use]
    pub const fn hint_visible(&self) -> bool {
        self.show_hint
    }

    pub fn set_input(&mut self, text: String) {
        if !self.is_resolved() {
            self.input = text;
        }
    }

    pub fn toggle_hint(&mut self) {
        if !self.is_resolved() {
            self.show_hint = !self.show_hint;
        }
    }

    /// Grade the current input. Blank input and resolved questions are ignored.
    pub fn submit(&mut self) -> Option<Attempt> {
        if self.is_resolved() || self.input.trim().is_empty() {
            return None;
        }
        let question = self.current()?;
        let hit = question.accepts(&self.input);
        let previous = self.attempts;
        self.attempts += 1;
        let attempt = if hit {
            let points = points_for(previous);
            self.score += points;
            Attempt::Correct { points }
        } else if self.attempts >= TYPED_MAX_ATTEMPTS {
            Attempt::Revealed
        } else {
            Attempt::Wrong {
                remaining: TYPED_MAX_ATTEMPTS - self.attempts,
            }
        };
        self.last = Some(attempt);
        Some(attempt)
    }

    /// Move on once the answer is shown; the last question reports the outcome.
    pub fn next(&mut self) -> Option<MiniGameOutcome> {
        if self.completion.is_reported() {
            return None;
        }
        if !self.is_resolved() && !self.questions.is_empty() {
            return None;
        }
        self.input.clear();
        self.attempts = 0;
        self.last = None;
        self.show_hint = false;
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            return None;
        }
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        self.completion.report(self.kind, self.score, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> FillBlankQuestion {
        FillBlankQuestion {
            sentence: "Khamir bereproduksi dengan ___.".into(),
            answer: "bertunas".into(),
            alternatives: vec!["Budding".into()],
            explanation: String::new(),
            image: None,
        }
    }

    fn scramble() -> ScrambleQuestion {
        ScrambleQuestion {
            scrambled: "MOCNO".into(),
            answer: "ONCOM".into(),
            hint: "merah".into(),
            explanation: String::new(),
            image: None,
        }
    }

    fn submit<Q: TypedItem>(round: &mut TypedRound<Q>, text: &str) -> Option<Attempt> {
        round.set_input(text.to_string());
        round.submit()
    }

    #[test]
    fn points_drop_with_attempts() {
        let mut round = TypedRound::new(MiniGameKind::FillBlank, vec![blank(), blank(), blank()]);
        assert_eq!(submit(&mut round, "  BERTUNAS "), Some(Attempt::Correct { points: 15 }));
        round.next();
        assert_eq!(submit(&mut round, "spora"), Some(Attempt::Wrong { remaining: 2 }));
        assert_eq!(submit(&mut round, "budding"), Some(Attempt::Correct { points: 10 }));
        round.next();
        submit(&mut round, "a");
        submit(&mut round, "b");
        assert_eq!(round.attempts(), 2);
        assert_eq!(submit(&mut round, "bertunas"), Some(Attempt::Correct { points: 5 }));
        let outcome = round.next().unwrap();
        assert_eq!(outcome.score, 30);
        assert_eq!(outcome.total_questions, 3);
    }

    #[test]
    fn third_miss_reveals_for_zero() {
        let mut round = TypedRound::new(MiniGameKind::FillBlank, vec![blank()]);
        submit(&mut round, "x");
        submit(&mut round, "y");
        assert_eq!(submit(&mut round, "z"), Some(Attempt::Revealed));
        assert!(round.is_resolved());
        assert_eq!(submit(&mut round, "bertunas"), None);
        assert_eq!(round.next().map(|o| o.score), Some(0));
    }

    #[test]
    fn blank_input_is_not_an_attempt() {
        let mut round = TypedRound::new(MiniGameKind::FillBlank, vec![blank()]);
        assert_eq!(submit(&mut round, "   "), None);
        assert_eq!(round.attempts(), 0);
        assert!(round.next().is_none());
    }

    #[test]
    fn authored_answers_are_trimmed_too() {
        let padded = FillBlankQuestion {
            answer: "bertunas ".into(),
            alternatives: vec![" Budding".into()],
            ..blank()
        };
        assert!(padded.accepts("Bertunas"));
        assert!(padded.accepts("budding  "));
        assert!(!padded.accepts("spora"));
    }

    #[test]
    fn scramble_ignores_inner_whitespace() {
        let mut round = TypedRound::new(MiniGameKind::WordScramble, vec![scramble()]);
        assert_eq!(submit(&mut round, " on com "), Some(Attempt::Correct { points: 15 }));
    }

    #[test]
    fn hints_toggle_and_reset() {
        let mut round = TypedRound::new(MiniGameKind::FillBlank, vec![blank(), blank()]);
        assert_eq!(round.current().map(TypedItem::hint), Some("B".to_string()));
        round.toggle_hint();
        assert!(round.hint_visible());
        submit(&mut round, "bertunas");
        round.next();
        assert!(!round.hint_visible());
        assert_eq!(round.input(), "");
    }
}
