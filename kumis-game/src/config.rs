//! Timing and tuning configuration.
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONFIG_DATA: &str = include_str!("../../kumis-web/static/assets/data/config.json");

const MIN_TYPING_MS: u32 = 20;
const MAX_TYPING_MS: u32 = 25;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config field {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

const fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

/// Durations of the scene transition banner stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionTimings {
    pub fade_in_ms: u32,
    pub hold_ms: u32,
    pub fade_out_ms: u32,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            fade_in_ms: 500,
            hold_ms: 1500,
            fade_out_ms: 500,
        }
    }
}

/// Countdown lengths for the timed arcade games, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub click_target_secs: u32,
    pub find_object_secs: u32,
    pub speed_click_secs: u32,
    pub microscope_secs: u32,
    pub spawn_start_ms: u32,
    pub spawn_step_ms: u32,
    pub spawn_floor_ms: u32,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            click_target_secs: 45,
            find_object_secs: 30,
            speed_click_secs: 20,
            microscope_secs: 60,
            spawn_start_ms: 1500,
            spawn_step_ms: 50,
            spawn_floor_ms: 800,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureConfig {
    pub target: f32,
    pub start: f32,
    pub min: f32,
    pub max: f32,
    pub tolerance: f32,
    pub max_drift: f32,
    pub nudge: f32,
    pub drift_ms: u32,
    pub duration_secs: u32,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            target: 30.0,
            start: 20.0,
            min: 15.0,
            max: 45.0,
            tolerance: 5.0,
            max_drift: 1.0,
            nudge: 2.0,
            drift_ms: 500,
            duration_secs: 45,
        }
    }
}

/// Everything the orchestration layer needs to schedule itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub typing_ms_per_char: u32,
    pub transition: TransitionTimings,
    pub arcade: ArcadeConfig,
    pub temperature: TemperatureConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            typing_ms_per_char: MAX_TYPING_MS,
            transition: TransitionTimings::default(),
            arcade: ArcadeConfig::default(),
            temperature: TemperatureConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load the bundled configuration, falling back to compiled defaults.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_CONFIG_DATA).unwrap_or_else(|err| {
            log::warn!("bundled config.json rejected, using defaults: {err}");
            Self::default()
        })
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a configuration or
    /// the result fails [`GameConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the timers and the temperature game cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first offending field: a zero timer period, a non-finite
    /// temperature value, `min > max`, a start outside `[min, max]`, or a
    /// negative tolerance or drift.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.transition;
        if t.fade_in_ms == 0 || t.hold_ms == 0 || t.fade_out_ms == 0 {
            return Err(invalid("transition", "stage durations must be positive"));
        }
        let a = &self.arcade;
        if a.spawn_start_ms == 0 || a.spawn_floor_ms == 0 {
            return Err(invalid("arcade", "spawn intervals must be positive"));
        }

        let temp = &self.temperature;
        let values = [
            temp.target,
            temp.start,
            temp.min,
            temp.max,
            temp.tolerance,
            temp.max_drift,
            temp.nudge,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid("temperature", "values must be finite"));
        }
        if temp.min > temp.max {
            return Err(invalid("temperature.min", "must not exceed max"));
        }
        if !(temp.min..=temp.max).contains(&temp.start) {
            return Err(invalid("temperature.start", "must lie within [min, max]"));
        }
        if temp.tolerance < 0.0 || temp.max_drift < 0.0 {
            return Err(invalid("temperature", "tolerance and drift must not be negative"));
        }
        if temp.drift_ms == 0 {
            return Err(invalid("temperature.drift_ms", "must be positive"));
        }
        Ok(())
    }

    /// Typewriter period, kept inside the 20-25 ms band.
    #[must_use]
    pub fn typing_interval_ms(&self) -> u32 {
        self.typing_ms_per_char.clamp(MIN_TYPING_MS, MAX_TYPING_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        assert_eq!(GameConfig::load_from_static(), GameConfig::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = GameConfig::from_json(r#"{ "typing_ms_per_char": 5, "arcade": { "speed_click_secs": 10 } }"#)
            .unwrap();
        assert_eq!(cfg.typing_interval_ms(), 20);
        assert_eq!(cfg.arcade.speed_click_secs, 10);
        assert_eq!(cfg.arcade.click_target_secs, 45);
        assert_eq!(cfg.transition, TransitionTimings::default());
    }

    #[test]
    fn inverted_temperature_range_is_rejected() {
        let err = GameConfig::from_json(r#"{ "temperature": { "min": 50.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "temperature.min",
                ..
            }
        ));
    }

    #[test]
    fn start_outside_range_and_zero_periods_are_rejected() {
        let mut cfg = GameConfig::default();
        cfg.temperature.start = 60.0;
        assert!(cfg.validate().is_err());

        let mut cfg = GameConfig::default();
        cfg.temperature.nudge = f32::NAN;
        assert!(cfg.validate().is_err());

        assert!(GameConfig::from_json(r#"{ "temperature": { "drift_ms": 0 } }"#).is_err());
        assert!(GameConfig::from_json(r#"{ "transition": { "hold_ms": 0 } }"#).is_err());
        assert!(GameConfig::default().validate().is_ok());
    }
}
