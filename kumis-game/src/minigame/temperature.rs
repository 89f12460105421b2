//! Keep the fermentation chamber near its target temperature.
use super::{Completion, MiniGameKind, MiniGameOutcome};
use crate::config::TemperatureConfig;
use crate::constants::TEMPERATURE_SUCCESS_POINTS;
use crate::timers::{Repeat, TaskScope, Tick, TimerKind, TimerSpec};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

const COUNTDOWN_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureZone {
    Cold,
    Optimal,
    Hot,
}

#[derive(Debug, Clone)]
pub struct TemperatureGame {
    cfg: TemperatureConfig,
    value: f32,
    time_left: u32,
    running: bool,
    success: Option<bool>,
    rng: ChaCha20Rng,
    countdown: TaskScope,
    drift: TaskScope,
    total_questions: u32,
    completion: Completion,
}

impl TemperatureGame {
    #[must_use]
    pub fn new(cfg: &TemperatureConfig, total_questions: u32, seed: u64) -> Self {
        Self {
            cfg: *cfg,
            value: cfg.start,
            time_left: cfg.duration_secs,
            running: false,
            success: None,
            rng: ChaCha20Rng::seed_from_u64(seed),
            countdown: TaskScope::default(),
            drift: TaskScope::default(),
            total_questions,
            completion: Completion::default(),
        }
    }

    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    #[must_use]
    pub const fn target(&self) -> f32 {
        self.cfg.target
    }

    #[must_use]
    pub const fn config(&self) -> &TemperatureConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn time_left(&self) -> u32 {
        self.time_left
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// `Some(success)` once the countdown has expired.
    #[must_use]
    pub const fn result(&self) -> Option<bool> {
        self.success
    }

    #[must_use]
    pub fn zone(&self) -> TemperatureZone {
        if self.value < self.cfg.target - self.cfg.tolerance {
            TemperatureZone::Cold
        } else if self.value > self.cfg.target + self.cfg.tolerance {
            TemperatureZone::Hot
        } else {
            TemperatureZone::Optimal
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        if self.success == Some(true) {
            TEMPERATURE_SUCCESS_POINTS
        } else {
            0
        }
    }

    pub fn start(&mut self) {
        if self.running || self.success.is_some() {
            return;
        }
        self.running = true;
        self.countdown.enter();
        self.drift.enter();
    }

    /// Push the temperature up (`direction > 0`) or down by one nudge step.
    pub fn nudge(&mut self, direction: f32) {
        if !self.running {
            return;
        }
        self.shift(direction.signum() * self.cfg.nudge);
    }

    fn shift(&mut self, amount: f32) {
        self.value = (self.value + amount).min(self.cfg.max).max(self.cfg.min);
    }

    pub fn on_tick(&mut self, tick: Tick) -> bool {
        match tick.kind {
            TimerKind::Countdown if self.countdown.accepts(tick) => {
                self.time_left = self.time_left.saturating_sub(1);
                if self.time_left == 0 {
                    let hit = self.zone() == TemperatureZone::Optimal;
                    log::debug!("temperature settled at {:.1}, success={hit}", self.value);
                    self.success = Some(hit);
                    self.running = false;
                    self.countdown.cancel();
                    self.drift.cancel();
                }
                true
            }
            TimerKind::Drift if self.drift.accepts(tick) => {
                let max = self.cfg.max_drift;
                if max > 0.0 && max.is_finite() {
                    let amount = self.rng.gen_range(-max..max);
                    self.shift(amount);
                }
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn timers(&self) -> Vec<TimerSpec> {
        [
            self.countdown
                .spec(TimerKind::Countdown, COUNTDOWN_MS, Repeat::Interval),
            self.drift
                .spec(TimerKind::Drift, self.cfg.drift_ms, Repeat::Interval),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn finish(&mut self) -> Option<MiniGameOutcome> {
        self.success?;
        self.completion
            .report(MiniGameKind::Temperature, self.score(), self.total_questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_of(game: &TemperatureGame, kind: TimerKind) -> Tick {
        game.timers()
            .into_iter()
            .find(|t| t.kind == kind)
            .map(|t| t.tick())
            .unwrap()
    }

    #[test]
    fn idle_until_started() {
        let mut game = TemperatureGame::new(&TemperatureConfig::default(), 5, 1);
        assert!(game.timers().is_empty());
        game.nudge(1.0);
        assert!((game.value() - 20.0).abs() < f32::EPSILON);
        game.start();
        assert_eq!(game.timers().len(), 2);
        game.nudge(1.0);
        assert!((game.value() - 22.0).abs() < f32::EPSILON);
    }

    #[test]
    fn drift_stays_clamped() {
        let cfg = TemperatureConfig {
            max_drift: 50.0,
            ..TemperatureConfig::default()
        };
        let mut game = TemperatureGame::new(&cfg, 5, 9);
        game.start();
        let drift = tick_of(&game, TimerKind::Drift);
        for _ in 0..200 {
            game.on_tick(drift);
            assert!((15.0..=45.0).contains(&game.value()));
        }
    }

    #[test]
    fn inverted_range_never_panics() {
        let cfg = TemperatureConfig {
            min: 50.0,
            max_drift: f32::INFINITY,
            ..TemperatureConfig::default()
        };
        let mut game = TemperatureGame::new(&cfg, 5, 4);
        game.start();
        game.nudge(1.0);
        game.nudge(-1.0);
        let drift = tick_of(&game, TimerKind::Drift);
        assert!(game.on_tick(drift));
        assert!(game.value().is_finite());
    }

    #[test]
    fn success_when_in_band_at_expiry() {
        let mut game = TemperatureGame::new(&TemperatureConfig::default(), 5, 3);
        game.start();
        for _ in 0..5 {
            game.nudge(1.0);
        }
        assert_eq!(game.zone(), TemperatureZone::Optimal);
        let countdown = tick_of(&game, TimerKind::Countdown);
        for _ in 0..45 {
            game.on_tick(countdown);
        }
        assert_eq!(game.result(), Some(true));
        assert!(!game.is_running());
        let outcome = game.finish().unwrap();
        assert_eq!(outcome.score, 10);
        assert!(game.finish().is_none());
    }

    #[test]
    fn failure_scores_nothing() {
        let mut game = TemperatureGame::new(&TemperatureConfig::default(), 5, 3);
        assert!(game.finish().is_none());
        game.start();
        let countdown = tick_of(&game, TimerKind::Countdown);
        for _ in 0..45 {
            game.on_tick(countdown);
        }
        assert_eq!(game.zone(), TemperatureZone::Cold);
        assert_eq!(game.finish().map(|o| o.score), Some(0));
    }
}
