//! Static story content: dialog scripts, question sets and the fungi catalogue.
use crate::constants::UNQUESTIONED_GAME_WEIGHT;
use crate::minigame::MiniGameKind;
use crate::phase::Phase;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

const STORY_DATA: &str = include_str!("../../kumis-web/static/assets/data/story.json");
const MINIGAME_DATA: &str = include_str!("../../kumis-web/static/assets/data/minigames.json");
const FUNGI_DATA: &str = include_str!("../../kumis-web/static/assets/data/fungi.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} has no dialog script")]
    MissingPhase(Phase),
    #[error("{context} question {index}: {reason}")]
    InvalidQuestion {
        context: String,
        index: usize,
        reason: String,
    },
    #[error("unknown fungi id '{0}'")]
    UnknownFungi(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    #[default]
    Normal,
    Happy,
    Sad,
    Surprised,
    Worried,
}

impl Emotion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Surprised => "surprised",
            Self::Worried => "worried",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogChoice {
    pub text: String,
    /// Narrative flag recorded in the player's progress when picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice_id: Option<String>,
    #[serde(default = "default_true")]
    pub value: bool,
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogLine {
    pub speaker: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<DialogChoice>,
}

impl DialogLine {
    #[must_use]
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            emotion: None,
            choices: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_choices(mut self, choices: Vec<DialogChoice>) -> Self {
        self.choices = choices;
        self
    }

    #[must_use]
    pub fn emotion(&self) -> Emotion {
        self.emotion.unwrap_or_default()
    }

    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrueFalseQuestion {
    pub statement: String,
    pub is_true: bool,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Sentence with a `___` gap and a set of candidate words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickWordQuestion {
    pub sentence: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Match a description to one of several fungi from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingQuestion {
    pub description: String,
    pub correct: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillBlankQuestion {
    pub sentence: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrambleQuestion {
    pub scrambled: String,
    pub answer: String,
    pub hint: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGuessQuestion {
    pub answer: String,
    pub hint: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A mini-game bound to a phase, with its question data when it has any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MiniGameSpec {
    MultipleChoice { questions: Vec<ChoiceQuestion> },
    TrueFalse { questions: Vec<TrueFalseQuestion> },
    PickWord { questions: Vec<PickWordQuestion> },
    Sorting { questions: Vec<SortingQuestion> },
    FillBlank { questions: Vec<FillBlankQuestion> },
    WordScramble { questions: Vec<ScrambleQuestion> },
    WordGuess { questions: Vec<WordGuessQuestion> },
    ClickTarget,
    FindObject,
    SpeedClick,
    Microscope,
    Temperature,
}

impl MiniGameSpec {
    #[must_use]
    pub const fn kind(&self) -> MiniGameKind {
        match self {
            Self::MultipleChoice { .. } => MiniGameKind::MultipleChoice,
            Self::TrueFalse { .. } => MiniGameKind::TrueFalse,
            Self::PickWord { .. } => MiniGameKind::PickWord,
            Self::Sorting { .. } => MiniGameKind::Sorting,
            Self::FillBlank { .. } => MiniGameKind::FillBlank,
            Self::WordScramble { .. } => MiniGameKind::WordScramble,
            Self::WordGuess { .. } => MiniGameKind::WordGuess,
            Self::ClickTarget => MiniGameKind::ClickTarget,
            Self::FindObject => MiniGameKind::FindObject,
            Self::SpeedClick => MiniGameKind::SpeedClick,
            Self::Microscope => MiniGameKind::Microscope,
            Self::Temperature => MiniGameKind::Temperature,
        }
    }

    /// Questions this game adds to the running total when it completes.
    #[must_use]
    pub fn question_count(&self) -> u32 {
        let len = match self {
            Self::MultipleChoice { questions } => questions.len(),
            Self::TrueFalse { questions } => questions.len(),
            Self::PickWord { questions } => questions.len(),
            Self::Sorting { questions } => questions.len(),
            Self::FillBlank { questions } => questions.len(),
            Self::WordScramble { questions } => questions.len(),
            Self::WordGuess { questions } => questions.len(),
            Self::ClickTarget
            | Self::FindObject
            | Self::SpeedClick
            | Self::Microscope
            | Self::Temperature => return UNQUESTIONED_GAME_WEIGHT,
        };
        u32::try_from(len).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseScript {
    pub phase: Phase,
    pub title: String,
    pub background: String,
    pub dialog: Vec<DialogLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub act: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLearning {
    pub label: String,
    pub desc: String,
}

/// Recap shown when the player skips a dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySummary {
    pub entries: Vec<SummaryEntry>,
    pub key_learnings: Vec<KeyLearning>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingText {
    pub title: String,
    pub subtitle: String,
    pub message: String,
    pub quote: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingTexts {
    pub perfect: EndingText,
    pub good: EndingText,
    pub fair: EndingText,
    pub needs_study: EndingText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryData {
    pub phases: Vec<PhaseScript>,
    #[serde(default)]
    pub summary: StorySummary,
    #[serde(default)]
    pub endings: EndingTexts,
    /// Speaker name to portrait image; speakers without one show none.
    #[serde(default)]
    pub portraits: BTreeMap<String, String>,
    #[serde(default)]
    pub creators: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniGameData {
    #[serde(default)]
    pub acts: HashMap<Phase, MiniGameSpec>,
    /// Extra sets playable outside the story.
    #[serde(default)]
    pub practice: Vec<MiniGameSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FungiKind {
    Khamir,
    Kapang,
    Cendawan,
    Bakteri,
    Kontaminan,
}

impl FungiKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Khamir => "khamir",
            Self::Kapang => "kapang",
            Self::Cendawan => "cendawan",
            Self::Bakteri => "bakteri",
            Self::Kontaminan => "kontaminan",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fungi {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub kind: FungiKind,
    pub description: String,
    pub features: Vec<String>,
    pub image: String,
}

/// Everything the game reads but never writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub story: StoryData,
    pub minigames: MiniGameData,
    pub fungi: Vec<Fungi>,
}

impl Content {
    /// Parse and validate the JSON bundled with the web assets.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled file fails to parse or validate.
    pub fn load_from_static() -> Result<Self, ContentError> {
        Self::from_json(STORY_DATA, MINIGAME_DATA, FUNGI_DATA)
    }

    /// # Errors
    ///
    /// Returns an error if any document fails to parse, or if the parsed
    /// content fails [`Content::validate`].
    pub fn from_json(story: &str, minigames: &str, fungi: &str) -> Result<Self, ContentError> {
        let content = Self {
            story: parse("story.json", story)?,
            minigames: parse("minigames.json", minigames)?,
            fungi: parse("fungi.json", fungi)?,
        };
        content.validate()?;
        Ok(content)
    }

    /// Check cross references and answer keys.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a story phase without a script, an
    /// answer index outside its options, a word-guess answer that is not
    /// plain A-Z, or a sorting option naming an unknown fungi.
    pub fn validate(&self) -> Result<(), ContentError> {
        for phase in Phase::STORY {
            if self.script(phase).is_none() {
                return Err(ContentError::MissingPhase(phase));
            }
        }
        for (phase, spec) in &self.minigames.acts {
            self.validate_spec(phase.as_str(), spec)?;
        }
        for (idx, spec) in self.minigames.practice.iter().enumerate() {
            self.validate_spec(&format!("practice[{idx}]"), spec)?;
        }
        Ok(())
    }

    fn validate_spec(&self, context: &str, spec: &MiniGameSpec) -> Result<(), ContentError> {
        let invalid = |index: usize, reason: &str| ContentError::InvalidQuestion {
            context: context.to_string(),
            index,
            reason: reason.to_string(),
        };
        match spec {
            MiniGameSpec::MultipleChoice { questions } => {
                for (i, q) in questions.iter().enumerate() {
                    if q.correct >= q.options.len() {
                        return Err(invalid(i, "answer index out of range"));
                    }
                }
            }
            MiniGameSpec::PickWord { questions } => {
                for (i, q) in questions.iter().enumerate() {
                    if q.correct >= q.options.len() {
                        return Err(invalid(i, "answer index out of range"));
                    }
                    if !q.sentence.contains("___") {
                        return Err(invalid(i, "sentence has no ___ gap"));
                    }
                }
            }
            MiniGameSpec::Sorting { questions } => {
                for (i, q) in questions.iter().enumerate() {
                    if !q.options.contains(&q.correct) {
                        return Err(invalid(i, "correct fungi is not an option"));
                    }
                    if let Some(missing) = q.options.iter().find(|id| self.fungi_by_id(id).is_none())
                    {
                        return Err(ContentError::UnknownFungi(missing.clone()));
                    }
                }
            }
            MiniGameSpec::WordGuess { questions } => {
                for (i, q) in questions.iter().enumerate() {
                    if q.answer.is_empty() || !q.answer.chars().all(|c| c.is_ascii_uppercase()) {
                        return Err(invalid(i, "answer must be uppercase A-Z"));
                    }
                }
            }
            MiniGameSpec::FillBlank { questions } => {
                for (i, q) in questions.iter().enumerate() {
                    if q.answer.trim().is_empty() {
                        return Err(invalid(i, "empty answer"));
                    }
                }
            }
            MiniGameSpec::WordScramble { questions } => {
                for (i, q) in questions.iter().enumerate() {
                    if q.answer.trim().is_empty() {
                        return Err(invalid(i, "empty answer"));
                    }
                }
            }
            MiniGameSpec::TrueFalse { .. }
            | MiniGameSpec::ClickTarget
            | MiniGameSpec::FindObject
            | MiniGameSpec::SpeedClick
            | MiniGameSpec::Microscope
            | MiniGameSpec::Temperature => {}
        }
        Ok(())
    }

    #[must_use]
    pub fn script(&self, phase: Phase) -> Option<&PhaseScript> {
        self.story.phases.iter().find(|s| s.phase == phase)
    }

    /// Dialog for a phase; unknown phases yield an empty script.
    #[must_use]
    pub fn dialog(&self, phase: Phase) -> &[DialogLine] {
        self.script(phase).map_or(&[], |s| s.dialog.as_slice())
    }

    #[must_use]
    pub fn title(&self, phase: Phase) -> &str {
        self.script(phase).map_or("", |s| s.title.as_str())
    }

    #[must_use]
    pub fn background(&self, phase: Phase) -> &str {
        self.script(phase)
            .or_else(|| self.script(Phase::Prolog))
            .map_or("", |s| s.background.as_str())
    }

    /// Portrait image for a dialog speaker, if one is bundled.
    #[must_use]
    pub fn portrait(&self, speaker: &str) -> Option<&str> {
        self.story.portraits.get(speaker.trim()).map(String::as_str)
    }

    #[must_use]
    pub fn minigame(&self, phase: Phase) -> Option<&MiniGameSpec> {
        self.minigames.acts.get(&phase)
    }

    #[must_use]
    pub fn practice(&self) -> &[MiniGameSpec] {
        &self.minigames.practice
    }

    #[must_use]
    pub fn fungi_by_id(&self, id: &str) -> Option<&Fungi> {
        self.fungi.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn summary(&self) -> &StorySummary {
        &self.story.summary
    }

    #[must_use]
    pub fn creators(&self) -> &[String] {
        &self.story.creators
    }
}

fn parse<T: serde::de::DeserializeOwned>(file: &'static str, json: &str) -> Result<T, ContentError> {
    serde_json::from_str(json).map_err(|source| ContentError::Parse { file, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> Content {
        Content::load_from_static().expect("bundled content parses")
    }

    #[test]
    fn portraits_cover_named_speakers_only() {
        let content = bundled();
        assert_eq!(
            content.portrait("Pak Kumis"),
            Some("/assets/images/character-pakkumis.png")
        );
        assert!(content.portrait("Profesor").is_some());
        assert!(content.portrait("Narrator").is_none());
        assert!(content.portrait("").is_none());
    }

    #[test]
    fn bundled_content_covers_story() {
        let content = bundled();
        for phase in Phase::STORY {
            assert!(!content.dialog(phase).is_empty(), "{phase} has dialog");
            assert!(!content.title(phase).is_empty());
        }
        assert_eq!(content.title(Phase::Act1), "ACT I: KHAMIR");
        assert_eq!(content.title(Phase::Epilog), "EPILOG");
        assert_eq!(content.fungi.len(), 8);
        assert_eq!(content.creators().len(), 7);
        assert_eq!(content.summary().entries.len(), 6);
    }

    #[test]
    fn acts_bind_their_quizzes() {
        let content = bundled();
        let kinds: Vec<_> = [Phase::Act1, Phase::Act2, Phase::Act3, Phase::Act4]
            .into_iter()
            .map(|p| content.minigame(p).map(MiniGameSpec::kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(MiniGameKind::MultipleChoice),
                Some(MiniGameKind::TrueFalse),
                Some(MiniGameKind::WordGuess),
                Some(MiniGameKind::PickWord),
            ]
        );
        assert!(content.minigame(Phase::Prolog).is_none());
        assert!(content.minigame(Phase::Epilog).is_none());
        for phase in [Phase::Act1, Phase::Act2, Phase::Act3, Phase::Act4] {
            assert_eq!(content.minigame(phase).map(MiniGameSpec::question_count), Some(5));
        }
    }

    #[test]
    fn unknown_phase_degrades_to_empty() {
        let content = bundled();
        assert!(content.dialog(Phase::Gallery).is_empty());
        assert_eq!(content.title(Phase::Menu), "");
        assert_eq!(content.background(Phase::Menu), content.background(Phase::Prolog));
    }

    #[test]
    fn validation_rejects_bad_answer_index() {
        let mut content = bundled();
        content.minigames.acts.insert(
            Phase::Act1,
            MiniGameSpec::MultipleChoice {
                questions: vec![ChoiceQuestion {
                    question: "?".into(),
                    options: vec!["a".into()],
                    correct: 3,
                    explanation: String::new(),
                    image: None,
                }],
            },
        );
        assert!(matches!(
            content.validate(),
            Err(ContentError::InvalidQuestion { index: 0, .. })
        ));
    }

    #[test]
    fn validation_rejects_lowercase_word_guess() {
        let mut content = bundled();
        content.minigames.practice.push(MiniGameSpec::WordGuess {
            questions: vec![WordGuessQuestion {
                answer: "tempe".into(),
                hint: String::new(),
                explanation: String::new(),
                image: None,
            }],
        });
        assert!(content.validate().is_err());
    }

    #[test]
    fn malformed_json_names_the_file() {
        let err = Content::from_json("{", "{}", "[]").unwrap_err();
        assert!(err.to_string().contains("story.json"));
    }

    #[test]
    fn arcade_specs_parse_from_tag_only() {
        let spec: MiniGameSpec = serde_json::from_str(r#"{ "kind": "speed_click" }"#).unwrap();
        assert_eq!(spec, MiniGameSpec::SpeedClick);
        assert_eq!(spec.question_count(), UNQUESTIONED_GAME_WEIGHT);
    }
}
