//! Timed click games played on a scattered field of targets.
use super::{Completion, MiniGameKind, MiniGameOutcome};
use crate::config::ArcadeConfig;
use crate::constants::{
    CLICK_TARGET_CLEAR_POINTS, CLICK_TARGET_DISTRACTORS, CLICK_TARGET_PER_KIND,
    CLICK_TARGET_REQUIRED_CLICKS, CLICK_TARGET_WRONG_PENALTY, FIND_OBJECT_DISTRACTORS,
    FIND_OBJECT_HIT_POINTS, FIND_OBJECT_MISS_PENALTY, FIND_OBJECT_TARGETS, MICROSCOPE_HIT_POINTS,
    MICROSCOPE_SAMPLES, SPEED_CLICK_CROWD_LIMIT, SPEED_CLICK_GOOD_CHANCE, SPEED_CLICK_HIT_POINTS,
    SPEED_CLICK_KEEP_ON_CROWD, SPEED_CLICK_MISS_PENALTY,
};
use crate::timers::{Repeat, TaskScope, Tick, TimerKind, TimerSpec};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

const COUNTDOWN_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcadeMode {
    /// Tap each mushroom three times; avoid non-mushrooms.
    ClickTarget,
    /// Pick the yeast out of a crowded plate.
    FindObject,
    /// Hit good cultures as they spawn, faster and faster.
    SpeedClick,
    /// Identify yeast cells under the microscope.
    Microscope,
}

impl ArcadeMode {
    #[must_use]
    pub const fn kind(self) -> MiniGameKind {
        match self {
            Self::ClickTarget => MiniGameKind::ClickTarget,
            Self::FindObject => MiniGameKind::FindObject,
            Self::SpeedClick => MiniGameKind::SpeedClick,
            Self::Microscope => MiniGameKind::Microscope,
        }
    }

    #[must_use]
    pub const fn duration_secs(self, cfg: &ArcadeConfig) -> u32 {
        match self {
            Self::ClickTarget => cfg.click_target_secs,
            Self::FindObject => cfg.find_object_secs,
            Self::SpeedClick => cfg.speed_click_secs,
            Self::Microscope => cfg.microscope_secs,
        }
    }

    /// Modes that end early once every valid target is gone.
    const fn clears(self) -> bool {
        matches!(self, Self::ClickTarget | Self::FindObject)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Tiram,
    Kuping,
    Enoki,
    Yeast,
    Bakteri,
    Aspergillus,
    Neurospora,
    Rhizopus,
}

impl Species {
    const MUSHROOMS: [Species; 3] = [Species::Tiram, Species::Kuping, Species::Enoki];
    const PLATE_DISTRACTORS: [Species; 4] = [
        Species::Bakteri,
        Species::Aspergillus,
        Species::Neurospora,
        Species::Rhizopus,
    ];
    const SLIDE: [Species; 5] = [
        Species::Yeast,
        Species::Neurospora,
        Species::Rhizopus,
        Species::Aspergillus,
        Species::Bakteri,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tiram => "Jamur Tiram",
            Self::Kuping => "Jamur Kuping",
            Self::Enoki => "Jamur Enoki",
            Self::Yeast => "Khamir",
            Self::Bakteri => "Bakteri",
            Self::Aspergillus => "Aspergillus",
            Self::Neurospora => "Neurospora",
            Self::Rhizopus => "Rhizopus",
        }
    }

    #[must_use]
    pub const fn image(self) -> &'static str {
        match self {
            Self::Tiram => "/assets/images/pleurotus.png",
            Self::Kuping => "/assets/images/auricularia.png",
            Self::Enoki => "/assets/images/enoki.png",
            Self::Yeast => "/assets/images/yeast.png",
            Self::Bakteri => "/assets/images/bacteria.png",
            Self::Aspergillus => "/assets/images/aspergillus.png",
            Self::Neurospora => "/assets/images/neurospora.png",
            Self::Rhizopus => "/assets/images/rhizopus.png",
        }
    }
}

/// One clickable thing on the field. Positions are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub species: Species,
    pub x: f32,
    pub y: f32,
    pub good: bool,
    pub clicks_left: u8,
}

/// What the last click did, for on-screen feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hit {
    Progress { species: Species, done: u8, required: u8 },
    Scored { species: Species, points: u32 },
    Penalized { species: Species, points: u32 },
    Missed { species: Species },
}

#[derive(Debug, Clone)]
pub struct ArcadeGame {
    mode: ArcadeMode,
    time_left: u32,
    score: u32,
    targets: Vec<Target>,
    next_id: u32,
    cleared: u32,
    spawn_ms: u32,
    spawn_step_ms: u32,
    spawn_floor_ms: u32,
    over: bool,
    last_hit: Option<Hit>,
    rng: ChaCha20Rng,
    countdown: TaskScope,
    spawner: TaskScope,
    total_questions: u32,
    completion: Completion,
}

impl ArcadeGame {
    #[must_use]
    pub fn new(mode: ArcadeMode, cfg: &ArcadeConfig, total_questions: u32, seed: u64) -> Self {
        let mut game = Self {
            mode,
            time_left: mode.duration_secs(cfg),
            score: 0,
            targets: Vec::new(),
            next_id: 0,
            cleared: 0,
            spawn_ms: cfg.spawn_start_ms,
            spawn_step_ms: cfg.spawn_step_ms,
            spawn_floor_ms: cfg.spawn_floor_ms,
            over: false,
            last_hit: None,
            rng: ChaCha20Rng::seed_from_u64(seed),
            countdown: TaskScope::default(),
            spawner: TaskScope::default(),
            total_questions,
            completion: Completion::default(),
        };
        game.layout();
        game.countdown.enter();
        if mode == ArcadeMode::SpeedClick {
            game.spawner.enter();
        }
        game
    }

    fn layout(&mut self) {
        match self.mode {
            ArcadeMode::ClickTarget => {
                for (col, species) in Species::MUSHROOMS.into_iter().enumerate() {
                    for row in 0..CLICK_TARGET_PER_KIND {
                        let x = 15.0 + col as f32 * 25.0 + self.rng.gen_range(-5.0_f32..5.0);
                        let y = 20.0 + row as f32 * 25.0 + self.rng.gen_range(-5.0_f32..5.0);
                        self.push(species, x, y, true, CLICK_TARGET_REQUIRED_CLICKS);
                    }
                }
                for _ in 0..CLICK_TARGET_DISTRACTORS {
                    let species = if self.rng.gen_bool(0.5) {
                        Species::Yeast
                    } else {
                        Species::Bakteri
                    };
                    let (x, y) = (self.rng.gen_range(10.0_f32..90.0), self.rng.gen_range(10.0_f32..90.0));
                    self.push(species, x, y, false, 1);
                }
            }
            ArcadeMode::FindObject => {
                for _ in 0..FIND_OBJECT_TARGETS {
                    let (x, y) = (self.rng.gen_range(10.0_f32..85.0), self.rng.gen_range(15.0_f32..80.0));
                    self.push(Species::Yeast, x, y, true, 1);
                }
                for _ in 0..FIND_OBJECT_DISTRACTORS {
                    let species = Species::PLATE_DISTRACTORS
                        [self.rng.gen_range(0..Species::PLATE_DISTRACTORS.len())];
                    let (x, y) = (self.rng.gen_range(10.0_f32..85.0), self.rng.gen_range(15.0_f32..80.0));
                    self.push(species, x, y, false, 1);
                }
            }
            ArcadeMode::SpeedClick => {}
            ArcadeMode::Microscope => {
                for _ in 0..MICROSCOPE_SAMPLES {
                    self.push_sample();
                }
            }
        }
    }

    fn push(&mut self, species: Species, x: f32, y: f32, good: bool, clicks: u8) {
        self.targets.push(Target {
            id: self.next_id,
            species,
            x,
            y,
            good,
            clicks_left: clicks,
        });
        self.next_id += 1;
    }

    fn push_sample(&mut self) {
        let species = Species::SLIDE[self.rng.gen_range(0..Species::SLIDE.len())];
        let (x, y) = (self.rng.gen_range(10.0_f32..80.0), self.rng.gen_range(10.0_f32..70.0));
        self.push(species, x, y, species == Species::Yeast, 1);
    }

    fn spawn(&mut self) {
        if self.targets.len() > SPEED_CLICK_CROWD_LIMIT {
            let drop = self.targets.len() - SPEED_CLICK_KEEP_ON_CROWD;
            self.targets.drain(..drop);
        }
        let good = self.rng.gen_bool(SPEED_CLICK_GOOD_CHANCE);
        let species = if good { Species::Yeast } else { Species::Aspergillus };
        let (x, y) = (self.rng.gen_range(15.0_f32..85.0), self.rng.gen_range(15.0_f32..85.0));
        self.push(species, x, y, good, 1);

        let faster = self
            .spawn_ms
            .saturating_sub(self.spawn_step_ms)
            .max(self.spawn_floor_ms);
        if faster != self.spawn_ms {
            self.spawn_ms = faster;
            self.spawner.enter();
        }
    }

    #[must_use]
    pub const fn mode(&self) -> ArcadeMode {
        self.mode
    }

    #[must_use]
    pub const fn time_left(&self) -> u32 {
        self.time_left
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Valid targets removed so far.
    #[must_use]
    pub const fn cleared(&self) -> u32 {
        self.cleared
    }

    #[must_use]
    pub fn remaining_good(&self) -> usize {
        self.targets.iter().filter(|t| t.good).count()
    }

    #[must_use]
    pub const fn spawn_interval_ms(&self) -> u32 {
        self.spawn_ms
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.over
    }

    #[must_use]
    pub const fn last_hit(&self) -> Option<Hit> {
        self.last_hit
    }

    fn end(&mut self) {
        if !self.over {
            log::debug!("{} over with {} points", self.mode.kind(), self.score);
        }
        self.over = true;
        self.countdown.cancel();
        self.spawner.cancel();
    }

    pub fn click(&mut self, id: u32) -> Option<Hit> {
        if self.over {
            return None;
        }
        let pos = self.targets.iter().position(|t| t.id == id)?;
        let target = self.targets[pos];
        let hit = match self.mode {
            ArcadeMode::ClickTarget if !target.good => {
                self.score = self.score.saturating_sub(CLICK_TARGET_WRONG_PENALTY);
                Hit::Penalized {
                    species: target.species,
                    points: CLICK_TARGET_WRONG_PENALTY,
                }
            }
            ArcadeMode::ClickTarget => {
                let left = target.clicks_left.saturating_sub(1);
                if left == 0 {
                    self.targets.remove(pos);
                    self.score += CLICK_TARGET_CLEAR_POINTS;
                    self.cleared += 1;
                    Hit::Scored {
                        species: target.species,
                        points: CLICK_TARGET_CLEAR_POINTS,
                    }
                } else {
                    self.targets[pos].clicks_left = left;
                    Hit::Progress {
                        species: target.species,
                        done: CLICK_TARGET_REQUIRED_CLICKS - left,
                        required: CLICK_TARGET_REQUIRED_CLICKS,
                    }
                }
            }
            ArcadeMode::FindObject | ArcadeMode::SpeedClick => {
                self.targets.remove(pos);
                let (gain, loss) = if self.mode == ArcadeMode::FindObject {
                    (FIND_OBJECT_HIT_POINTS, FIND_OBJECT_MISS_PENALTY)
                } else {
                    (SPEED_CLICK_HIT_POINTS, SPEED_CLICK_MISS_PENALTY)
                };
                if target.good {
                    self.score += gain;
                    self.cleared += 1;
                    Hit::Scored {
                        species: target.species,
                        points: gain,
                    }
                } else {
                    self.score = self.score.saturating_sub(loss);
                    Hit::Penalized {
                        species: target.species,
                        points: loss,
                    }
                }
            }
            ArcadeMode::Microscope => {
                self.targets.remove(pos);
                self.push_sample();
                if target.good {
                    self.score += MICROSCOPE_HIT_POINTS;
                    self.cleared += 1;
                    Hit::Scored {
                        species: target.species,
                        points: MICROSCOPE_HIT_POINTS,
                    }
                } else {
                    Hit::Missed {
                        species: target.species,
                    }
                }
            }
        };
        self.last_hit = Some(hit);
        if self.mode.clears() && self.remaining_good() == 0 {
            self.end();
        }
        Some(hit)
    }

    /// Apply a timer tick; returns whether it was accepted.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        match tick.kind {
            TimerKind::Countdown if self.countdown.accepts(tick) => {
                self.time_left = self.time_left.saturating_sub(1);
                if self.time_left == 0 {
                    self.end();
                }
                true
            }
            TimerKind::Spawn if self.spawner.accepts(tick) => {
                self.spawn();
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
            self.spawner
                .spec(TimerKind::Spawn, self.spawn_ms, Repeat::Interval),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Leave the result panel once time is up or the field is cleared.
    pub fn finish(&mut self) -> Option<MiniGameOutcome> {
        if !self.over {
            return None;
        }
        self.targets.clear();
        self.completion
            .report(self.mode.kind(), self.score, self.total_questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(mode: ArcadeMode) -> ArcadeGame {
        ArcadeGame::new(mode, &ArcadeConfig::default(), 5, 42)
    }

    fn countdown_tick(game: &ArcadeGame) -> Tick {
        game.timers()
            .into_iter()
            .find(|t| t.kind == TimerKind::Countdown)
            .map(|t| t.tick())
            .unwrap()
    }

    #[test]
    fn click_target_layout_and_scoring() {
        let mut g = game(ArcadeMode::ClickTarget);
        assert_eq!(g.targets().len(), 15);
        assert_eq!(g.remaining_good(), 9);
        let wrong = g.targets().iter().find(|t| !t.good).unwrap().id;
        assert!(matches!(g.click(wrong), Some(Hit::Penalized { .. })));
        assert_eq!(g.score(), 0, "penalty floors at zero");
        assert_eq!(g.targets().len(), 15, "distractors stay");

        let good = g.targets().iter().find(|t| t.good).unwrap().id;
        assert!(matches!(g.click(good), Some(Hit::Progress { done: 1, .. })));
        g.click(good);
        assert!(matches!(g.click(good), Some(Hit::Scored { points: 25, .. })));
        assert_eq!(g.score(), 25);
        g.click(wrong);
        assert_eq!(g.score(), 20);
        assert!(g.click(good).is_none(), "removed target");
    }

    #[test]
    fn clearing_the_field_ends_early() {
        let mut g = game(ArcadeMode::FindObject);
        assert_eq!(g.targets().len(), 20);
        let yeast: Vec<u32> = g.targets().iter().filter(|t| t.good).map(|t| t.id).collect();
        assert_eq!(yeast.len(), 8);
        for id in yeast {
            g.click(id);
        }
        assert!(g.is_over());
        assert_eq!(g.score(), 80);
        assert!(g.timers().is_empty());
        let outcome = g.finish().unwrap();
        assert_eq!(outcome.kind, MiniGameKind::FindObject);
        assert!(g.finish().is_none());
    }

    #[test]
    fn countdown_expiry_ends_game() {
        let mut g = game(ArcadeMode::Microscope);
        assert!(g.finish().is_none());
        let tick = countdown_tick(&g);
        for _ in 0..60 {
            assert!(g.on_tick(tick));
        }
        assert!(g.is_over());
        assert!(!g.on_tick(tick), "stale after end");
        assert_eq!(g.time_left(), 0);
    }

    #[test]
    fn microscope_replaces_clicked_samples() {
        let mut g = game(ArcadeMode::Microscope);
        for _ in 0..30 {
            let id = g.targets()[0].id;
            let before = g.score();
            let good = g.targets()[0].good;
            g.click(id);
            assert_eq!(g.targets().len(), 12);
            assert_eq!(g.score(), before + if good { 10 } else { 0 });
        }
        assert!(!g.is_over());
    }

    #[test]
    fn speed_click_spawns_faster_and_caps_crowd() {
        let mut g = game(ArcadeMode::SpeedClick);
        assert!(g.targets().is_empty());
        let mut peak = 0;
        for _ in 0..30 {
            let spawn = g
                .timers()
                .into_iter()
                .find(|t| t.kind == TimerKind::Spawn)
                .unwrap();
            assert_eq!(spawn.period_ms, g.spawn_interval_ms());
            assert!(g.on_tick(spawn.tick()));
            peak = peak.max(g.targets().len());
            assert!(g.targets().len() <= SPEED_CLICK_CROWD_LIMIT + 1);
        }
        assert_eq!(peak, SPEED_CLICK_CROWD_LIMIT + 1);
        assert_eq!(g.spawn_interval_ms(), 800);
        let bad = g.targets().iter().find(|t| !t.good).map(|t| t.id);
        if let Some(id) = bad {
            g.click(id);
            assert_eq!(g.score(), 0);
        }
        let good = g.targets().iter().find(|t| t.good).map(|t| t.id).unwrap();
        g.click(good);
        assert_eq!(g.score(), 15);
    }

    #[test]
    fn layouts_are_seeded() {
        let a = game(ArcadeMode::FindObject);
        let b = game(ArcadeMode::FindObject);
        assert_eq!(a.targets(), b.targets());
    }
}
