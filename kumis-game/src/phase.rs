//! Top-level phase state machine.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Menu,
    PlayerForm,
    Prolog,
    Act1,
    Act2,
    Act3,
    Act4,
    Epilog,
    Ending,
    Gallery,
    Credits,
}

impl Phase {
    /// Narrative order; the phase after the last entry is [`Phase::Ending`].
    pub const STORY: [Phase; 6] = [
        Phase::Prolog,
        Phase::Act1,
        Phase::Act2,
        Phase::Act3,
        Phase::Act4,
        Phase::Epilog,
    ];

    pub const ALL: [Phase; 11] = [
        Phase::Menu,
        Phase::PlayerForm,
        Phase::Prolog,
        Phase::Act1,
        Phase::Act2,
        Phase::Act3,
        Phase::Act4,
        Phase::Epilog,
        Phase::Ending,
        Phase::Gallery,
        Phase::Credits,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::PlayerForm => "playerForm",
            Self::Prolog => "prolog",
            Self::Act1 => "act1",
            Self::Act2 => "act2",
            Self::Act3 => "act3",
            Self::Act4 => "act4",
            Self::Epilog => "epilog",
            Self::Ending => "ending",
            Self::Gallery => "gallery",
            Self::Credits => "credits",
        }
    }

    #[must_use]
    pub const fn is_story(self) -> bool {
        matches!(
            self,
            Self::Prolog | Self::Act1 | Self::Act2 | Self::Act3 | Self::Act4 | Self::Epilog
        )
    }

    #[must_use]
    pub const fn is_side_trip(self) -> bool {
        matches!(self, Self::Gallery | Self::Credits)
    }

    /// Position in [`Phase::STORY`].
    #[must_use]
    pub fn story_index(self) -> Option<usize> {
        Self::STORY.iter().position(|p| *p == self)
    }

    /// Act number 1-4 for the four teaching acts.
    #[must_use]
    pub const fn act_number(self) -> Option<u8> {
        match self {
            Self::Act1 => Some(1),
            Self::Act2 => Some(2),
            Self::Act3 => Some(3),
            Self::Act4 => Some(4),
            _ => None,
        }
    }

    /// Phase that follows a completed story phase.
    #[must_use]
    pub fn next_story(self) -> Option<Phase> {
        let idx = self.story_index()?;
        Some(Self::STORY.get(idx + 1).copied().unwrap_or(Phase::Ending))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = PhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PhaseError::Unknown(s.to_string()))
    }
}

/// Signals that move the phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseEvent {
    StartGame,
    PlayerRegistered,
    StoryComplete,
    OpenGallery,
    OpenCredits,
    BackToMenu,
    EndingAcknowledged,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhaseError {
    #[error("no transition from {from} on {event:?}")]
    InvalidTransition { from: Phase, event: PhaseEvent },
    #[error("unknown phase '{0}'")]
    Unknown(String),
}

/// The transition table.
///
/// # Errors
///
/// Returns [`PhaseError::InvalidTransition`] when `event` has no edge out of `from`.
pub fn transition(from: Phase, event: PhaseEvent) -> Result<Phase, PhaseError> {
    use Phase as P;
    use PhaseEvent as E;

    let next = match (from, event) {
        (P::Menu, E::StartGame) => Some(P::PlayerForm),
        (P::Menu, E::OpenGallery) => Some(P::Gallery),
        (P::Menu, E::OpenCredits) => Some(P::Credits),
        (P::PlayerForm, E::PlayerRegistered) => Some(P::Prolog),
        (story, E::StoryComplete) if story.is_story() => story.next_story(),
        (P::Gallery | P::Credits, E::BackToMenu) => Some(P::Menu),
        (P::Ending, E::EndingAcknowledged) => Some(P::Menu),
        _ => None,
    };
    next.ok_or(PhaseError::InvalidTransition { from, event })
}
