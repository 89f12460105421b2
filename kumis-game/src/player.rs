//! Player registration form.
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayerFormError {
    #[error("Silakan masukkan nama Anda")]
    MissingName,
    #[error("Silakan masukkan kelas Anda")]
    MissingClass,
}

/// Validated player identity, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    pub class: String,
}

impl PlayerInfo {
    /// # Errors
    ///
    /// Returns the first empty field after trimming, name before class.
    pub fn parse(name: &str, class: &str) -> Result<Self, PlayerFormError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlayerFormError::MissingName);
        }
        let class = class.trim();
        if class.is_empty() {
            return Err(PlayerFormError::MissingClass);
        }
        Ok(Self {
            name: name.to_string(),
            class: class.to_string(),
        })
    }
}

/// Draft values as the player types them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerForm {
    pub name: String,
    pub class: String,
    pub error: Option<PlayerFormError>,
}

impl PlayerForm {
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.error = None;
    }

    pub fn set_class(&mut self, value: impl Into<String>) {
        self.class = value.into();
        self.error = None;
    }

    /// Validate; on failure the error is kept for display.
    pub fn submit(&mut self) -> Option<PlayerInfo> {
        match PlayerInfo::parse(&self.name, &self.class) {
            Ok(info) => Some(info),
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }
}
