//! Typewriter dialog playback.
//!
//! Each line is revealed one character per typewriter tick. Advance input is
//! ignored while a line is still typing; once it is fully shown the player
//! either advances or, if the line offers choices, picks one.
use crate::content::{DialogChoice, DialogLine};
use crate::timers::{Repeat, TaskScope, Tick, TimerKind, TimerSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    Typing,
    Idle,
    Choices,
    Finished { skipped: bool },
}

/// What an input did to the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogSignal {
    Ignored,
    NextLine(usize),
    Chose {
        index: usize,
        choice: DialogChoice,
        next: Option<usize>,
    },
    Finished {
        skipped: bool,
    },
}

impl DialogSignal {
    #[must_use]
    pub const fn finished(&self) -> Option<bool> {
        match self {
            Self::Finished { skipped } => Some(*skipped),
            Self::Chose { next: None, .. } => Some(false),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DialogEngine {
    lines: Vec<DialogLine>,
    index: usize,
    revealed: usize,
    state: DialogState,
    confirming_skip: bool,
    processing: bool,
    typewriter: TaskScope,
    ms_per_char: u32,
}

impl DialogEngine {
    #[must_use]
    pub fn new(lines: Vec<DialogLine>, ms_per_char: u32) -> Self {
        let mut engine = Self {
            lines,
            index: 0,
            revealed: 0,
            state: DialogState::Finished { skipped: false },
            confirming_skip: false,
            processing: false,
            typewriter: TaskScope::default(),
            ms_per_char,
        };
        if !engine.lines.is_empty() {
            engine.enter_line(0);
        }
        engine
    }

    fn enter_line(&mut self, index: usize) {
        self.index = index;
        self.revealed = 0;
        self.processing = false;
        self.state = DialogState::Typing;
        self.typewriter.enter();
        if self.current_line().is_none_or(|l| l.text.is_empty()) {
            self.finish_typing();
        }
    }

    fn finish_typing(&mut self) {
        self.typewriter.cancel();
        let line = self.current_line();
        let revealed = line.map_or(0, DialogLine::char_count);
        let has_choices = line.is_some_and(|l| !l.choices.is_empty());
        self.revealed = revealed;
        self.state = if has_choices {
            DialogState::Choices
        } else {
            DialogState::Idle
        };
    }

    fn leave_line(&mut self) -> DialogSignal {
        self.processing = true;
        let next = self.index + 1;
        if next < self.lines.len() {
            self.enter_line(next);
            DialogSignal::NextLine(next)
        } else {
            self.typewriter.cancel();
            self.state = DialogState::Finished { skipped: false };
            DialogSignal::Finished { skipped: false }
        }
    }

    #[must_use]
    pub const fn state(&self) -> DialogState {
        self.state
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line on screen; `None` once finished or for an empty script.
    #[must_use]
    pub fn current_line(&self) -> Option<&DialogLine> {
        if matches!(self.state, DialogState::Finished { .. }) {
            return None;
        }
        self.lines.get(self.index)
    }

    /// The part of the current line revealed so far.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        let Some(line) = self.current_line() else {
            return "";
        };
        match line.text.char_indices().nth(self.revealed) {
            Some((byte, _)) => &line.text[..byte],
            None => &line.text,
        }
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.state == DialogState::Typing
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, DialogState::Finished { .. })
    }

    #[must_use]
    pub fn was_skipped(&self) -> bool {
        self.state == DialogState::Finished { skipped: true }
    }

    #[must_use]
    pub const fn is_confirming_skip(&self) -> bool {
        self.confirming_skip
    }

    /// Choices to show, only once the line is fully typed.
    #[must_use]
    pub fn choices(&self) -> &[DialogChoice] {
        match (self.state, self.current_line()) {
            (DialogState::Choices, Some(line)) => &line.choices,
            _ => &[],
        }
    }

    /// Reveal one more character. Ticks from an earlier line are dropped.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        if tick.kind != TimerKind::Typewriter
            || !self.typewriter.accepts(tick)
            || self.confirming_skip
        {
            return false;
        }
        let total = self.current_line().map_or(0, DialogLine::char_count);
        self.revealed = (self.revealed + 1).min(total);
        if self.revealed >= total {
            self.finish_typing();
        }
        true
    }

    pub fn advance(&mut self) -> DialogSignal {
        if self.confirming_skip || self.processing {
            return DialogSignal::Ignored;
        }
        match self.state {
            DialogState::Idle => self.leave_line(),
            DialogState::Typing | DialogState::Choices | DialogState::Finished { .. } => {
                DialogSignal::Ignored
            }
        }
    }

    /// Pick a choice on the current line; advances exactly once.
    pub fn choose(&mut self, index: usize) -> DialogSignal {
        if self.confirming_skip || self.processing || self.state != DialogState::Choices {
            return DialogSignal::Ignored;
        }
        let Some(choice) = self.choices().get(index).cloned() else {
            return DialogSignal::Ignored;
        };
        let next = match self.leave_line() {
            DialogSignal::NextLine(next) => Some(next),
            _ => None,
        };
        DialogSignal::Chose {
            index,
            choice,
            next,
        }
    }

    pub fn request_skip(&mut self) {
        if !self.is_finished() {
            self.confirming_skip = true;
        }
    }

    pub fn cancel_skip(&mut self) {
        self.confirming_skip = false;
    }

    pub fn confirm_skip(&mut self) -> DialogSignal {
        if !self.confirming_skip {
            return DialogSignal::Ignored;
        }
        self.confirming_skip = false;
        self.typewriter.cancel();
        self.state = DialogState::Finished { skipped: true };
        DialogSignal::Finished { skipped: true }
    }

    #[must_use]
    pub fn timers(&self) -> Vec<TimerSpec> {
        if self.state != DialogState::Typing || self.confirming_skip {
            return Vec::new();
        }
        self.typewriter
            .spec(TimerKind::Typewriter, self.ms_per_char, Repeat::Interval)
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> Vec<DialogLine> {
        vec![
            DialogLine::new("Pak Kumis", "Halo"),
            DialogLine::new("Raka", "Ya?").with_choices(vec![
                DialogChoice {
                    text: "Belajar".into(),
                    choice_id: Some("eager".into()),
                    value: true,
                },
                DialogChoice {
                    text: "Nanti".into(),
                    choice_id: None,
                    value: true,
                },
            ]),
            DialogLine::new("Narrator", "Selesai."),
        ]
    }

    fn type_out(engine: &mut DialogEngine) {
        while let Some(spec) = engine.timers().first().copied() {
            assert!(engine.on_tick(spec.tick()));
        }
    }

    #[test]
    fn typewriter_reveals_one_char_per_tick() {
        let mut engine = DialogEngine::new(script(), 25);
        assert!(engine.is_typing());
        assert_eq!(engine.visible_text(), "");
        let tick = engine.timers()[0].tick();
        engine.on_tick(tick);
        engine.on_tick(tick);
        assert_eq!(engine.visible_text(), "Ha");
        assert_eq!(engine.timers()[0].period_ms, 25);
        type_out(&mut engine);
        assert_eq!(engine.state(), DialogState::Idle);
        assert_eq!(engine.visible_text(), "Halo");
    }

    #[test]
    fn advance_while_typing_is_ignored() {
        let mut engine = DialogEngine::new(script(), 25);
        assert_eq!(engine.advance(), DialogSignal::Ignored);
        assert_eq!(engine.index(), 0);
        type_out(&mut engine);
        assert_eq!(engine.advance(), DialogSignal::NextLine(1));
    }

    #[test]
    fn stale_tick_from_previous_line_is_dropped() {
        let mut engine = DialogEngine::new(script(), 25);
        let old = engine.timers()[0].tick();
        type_out(&mut engine);
        engine.advance();
        assert!(!engine.on_tick(old));
        assert_eq!(engine.visible_text(), "");
    }

    #[test]
    fn choice_advances_exactly_once() {
        let mut engine = DialogEngine::new(script(), 25);
        type_out(&mut engine);
        engine.advance();
        assert!(engine.choices().is_empty(), "hidden while typing");
        assert_eq!(engine.choose(0), DialogSignal::Ignored);
        type_out(&mut engine);
        assert_eq!(engine.state(), DialogState::Choices);
        assert_eq!(engine.advance(), DialogSignal::Ignored);
        let signal = engine.choose(0);
        assert!(matches!(
            signal,
            DialogSignal::Chose { index: 0, next: Some(2), ref choice } if choice.choice_id.as_deref() == Some("eager")
        ));
        assert_eq!(engine.choose(1), DialogSignal::Ignored);
        assert_eq!(engine.index(), 2);
    }

    #[test]
    fn finishing_after_last_line() {
        let mut engine = DialogEngine::new(vec![DialogLine::new("A", "x")], 25);
        type_out(&mut engine);
        assert_eq!(engine.advance(), DialogSignal::Finished { skipped: false });
        assert!(engine.current_line().is_none());
        assert_eq!(engine.advance(), DialogSignal::Ignored);
    }

    #[test]
    fn advancing_length_times_finishes_once() {
        let lines: Vec<DialogLine> = ["Satu", "Dua", "Tiga", "Empat"]
            .into_iter()
            .map(|text| DialogLine::new("Bu Siti", text))
            .collect();
        let mut engine = DialogEngine::new(lines, 25);
        let len = engine.len();
        let mut finished = 0;
        for _ in 0..len {
            type_out(&mut engine);
            if engine.advance() == (DialogSignal::Finished { skipped: false }) {
                finished += 1;
            }
        }
        assert_eq!(finished, 1);
        assert!(engine.is_finished());
        assert_eq!(engine.advance(), DialogSignal::Ignored);
    }

    #[test]
    fn skip_requires_confirmation() {
        let mut engine = DialogEngine::new(script(), 25);
        engine.request_skip();
        assert!(engine.timers().is_empty(), "typing paused under overlay");
        assert_eq!(engine.advance(), DialogSignal::Ignored);
        engine.cancel_skip();
        assert!(engine.is_typing());
        engine.request_skip();
        assert_eq!(engine.confirm_skip(), DialogSignal::Finished { skipped: true });
        assert!(engine.was_skipped());
        assert!(engine.timers().is_empty());
        assert_eq!(engine.confirm_skip(), DialogSignal::Ignored);
    }

    #[test]
    fn empty_script_is_finished() {
        let engine = DialogEngine::new(Vec::new(), 25);
        assert!(engine.is_finished());
        assert!(!engine.was_skipped());
        assert!(engine.current_line().is_none());
        assert_eq!(engine.visible_text(), "");
    }

    #[test]
    fn multibyte_text_reveals_by_char() {
        let mut engine = DialogEngine::new(vec![DialogLine::new("A", "CO₂ ok")], 25);
        let tick = engine.timers()[0].tick();
        for _ in 0..3 {
            engine.on_tick(tick);
        }
        assert_eq!(engine.visible_text(), "CO₂");
    }
}
