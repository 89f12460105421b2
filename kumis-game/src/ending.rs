//! Ending classification from the cumulative quiz score.
use crate::constants::{
    DEFAULT_PLAYER_CLASS, DEFAULT_PLAYER_NAME, ENDING_FAIR_MIN, ENDING_GOOD_MIN, ENDING_PERFECT_MIN,
    POINTS_PER_CORRECT,
};
use crate::content::{EndingText, EndingTexts};
use crate::store::GameProgress;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingTier {
    Perfect,
    Good,
    Fair,
    NeedsStudy,
}

impl EndingTier {
    pub const ALL: [EndingTier; 4] = [
        EndingTier::Perfect,
        EndingTier::Good,
        EndingTier::Fair,
        EndingTier::NeedsStudy,
    ];

    #[must_use]
    pub const fn from_percentage(percentage: u32) -> Self {
        if percentage >= ENDING_PERFECT_MIN {
            Self::Perfect
        } else if percentage >= ENDING_GOOD_MIN {
            Self::Good
        } else if percentage >= ENDING_FAIR_MIN {
            Self::Fair
        } else {
            Self::NeedsStudy
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsStudy => "needs_study",
        }
    }
}

impl fmt::Display for EndingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EndingTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| format!("unknown ending tier '{s}'"))
    }
}

impl EndingTexts {
    #[must_use]
    pub const fn for_tier(&self, tier: EndingTier) -> &EndingText {
        match tier {
            EndingTier::Perfect => &self.perfect,
            EndingTier::Good => &self.good,
            EndingTier::Fair => &self.fair,
            EndingTier::NeedsStudy => &self.needs_study,
        }
    }
}

/// `round(score / (questions * 10) * 100)`, or 0 when nothing was asked.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percentage(total_score: u32, total_questions: u32) -> u32 {
    if total_questions == 0 {
        return 0;
    }
    let max = f64::from(total_questions) * f64::from(POINTS_PER_CORRECT);
    (f64::from(total_score) / max * 100.0).round() as u32
}

/// Everything the ending screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingSummary {
    pub player_name: String,
    pub player_class: String,
    pub total_score: u32,
    pub total_questions: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub tier: EndingTier,
    pub text: EndingText,
}

impl EndingSummary {
    #[must_use]
    pub fn from_progress(progress: &GameProgress, texts: &EndingTexts) -> Self {
        let pct = percentage(progress.total_quiz_score, progress.total_quiz_questions);
        let tier = EndingTier::from_percentage(pct);
        let name_or = |value: &Option<String>, fallback: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        Self {
            player_name: name_or(&progress.player_name, DEFAULT_PLAYER_NAME),
            player_class: name_or(&progress.player_class, DEFAULT_PLAYER_CLASS),
            total_score: progress.total_quiz_score,
            total_questions: progress.total_quiz_questions,
            max_score: progress.total_quiz_questions.saturating_mul(POINTS_PER_CORRECT),
            percentage: pct,
            tier,
            text: texts.for_tier(tier).clone(),
        }
    }
}
