use anyhow::{Context, Result};
use colored::Colorize;
use kumis_game::{
    AutoplayError, Autoplayer, Content, EndingTier, GameConfig, GameController, MiniGame,
    MiniGameKind, Strategy,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use super::policy::expected_tier;

const PLAYER_NAME: &str = "Penguji";
const PLAYER_CLASS: &str = "QA";

#[derive(Debug, Error)]
pub enum RunFailure {
    #[error(transparent)]
    Autoplay(#[from] AutoplayError),
    #[error("expected the {expected} ending, reached {actual} ({percentage}%)")]
    WrongTier {
        expected: EndingTier,
        actual: EndingTier,
        percentage: u32,
    },
}

/// One complete playthrough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub policy: Strategy,
    pub seed: u64,
    pub tier: Option<EndingTier>,
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub steps: usize,
    pub virtual_ms: u64,
    pub skipped_dialogs: u32,
    pub mini_games: Vec<MiniGameKind>,
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,
    pub error: Option<String>,
}

impl RunRecord {
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// All runs of one policy across seeds and iterations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyResult {
    pub policy: Strategy,
    pub passed: bool,
    pub runs: Vec<RunRecord>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

impl PolicyResult {
    #[must_use]
    pub fn successful_runs(&self) -> usize {
        self.runs.iter().filter(|r| r.passed()).count()
    }

    #[must_use]
    pub fn average_percentage(&self) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.runs.iter().map(|r| r.percentage).sum();
        f64::from(sum) / f64::from(u32::try_from(self.runs.len()).unwrap_or(u32::MAX))
    }
}

/// A practice-set mini-game played in isolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeRecord {
    pub policy: Strategy,
    pub kind: MiniGameKind,
    pub score: u32,
    pub total_questions: u32,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    pub generated_at: String,
    pub results: Vec<PolicyResult>,
    pub practice: Vec<PracticeRecord>,
}

impl TestReport {
    #[must_use]
    pub fn new(results: Vec<PolicyResult>, practice: Vec<PracticeRecord>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            results,
            practice,
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed) && self.practice.iter().all(|p| p.error.is_none())
    }
}

pub struct Simulator {
    content: Arc<Content>,
    config: GameConfig,
    verbose: bool,
}

impl Simulator {
    /// # Errors
    ///
    /// Fails if the bundled story content does not load.
    pub fn load(verbose: bool) -> Result<Self> {
        let content = Content::load_from_static().context("loading bundled story content")?;
        Ok(Self::new(content, GameConfig::load_from_static(), verbose))
    }

    #[must_use]
    pub fn new(content: Content, config: GameConfig, verbose: bool) -> Self {
        Self {
            content: Arc::new(content),
            config,
            verbose,
        }
    }

    pub fn run_policy(&self, policy: Strategy, seeds: &[u64], iterations: usize) -> PolicyResult {
        let mut runs = Vec::new();
        for &seed in seeds {
            for i in 0..iterations {
                let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
                let record = self.run_once(policy, iteration_seed);
                if self.verbose {
                    let status = if record.passed() { "ok".green() } else { "FAIL".red() };
                    println!(
                        "  {status} {policy} seed {iteration_seed}: {}% in {} steps",
                        record.percentage, record.steps
                    );
                }
                runs.push(record);
            }
        }
        let average_duration = if runs.is_empty() {
            Duration::ZERO
        } else {
            runs.iter().map(|r| r.elapsed).sum::<Duration>()
                / u32::try_from(runs.len()).unwrap_or(1)
        };
        PolicyResult {
            policy,
            passed: runs.iter().all(RunRecord::passed),
            runs,
            average_duration,
        }
    }

    #[must_use]
    pub fn run_once(&self, policy: Strategy, seed: u64) -> RunRecord {
        let start = Instant::now();
        let mut controller =
            GameController::with_shared_content(self.content.clone(), self.config.clone(), seed);
        let outcome = Autoplayer::new(policy, seed)
            .play(&mut controller, PLAYER_NAME, PLAYER_CLASS)
            .map_err(RunFailure::from)
            .and_then(|run| {
                check_expectation(policy, run.summary.tier, run.summary.percentage)?;
                Ok(run)
            });
        let elapsed = start.elapsed();
        match outcome {
            Ok(run) => {
                log::info!(
                    "{policy} seed {seed}: {} at {}%",
                    run.summary.tier,
                    run.summary.percentage
                );
                RunRecord {
                    policy,
                    seed,
                    tier: Some(run.summary.tier),
                    total_score: run.summary.total_score,
                    max_score: run.summary.max_score,
                    percentage: run.summary.percentage,
                    steps: run.steps,
                    virtual_ms: run.virtual_ms,
                    skipped_dialogs: run.skipped_dialogs,
                    mini_games: run.completed_mini_games,
                    elapsed,
                    error: None,
                }
            }
            Err(err) => {
                log::warn!("{policy} seed {seed} failed: {err}");
                let summary = controller.ending_summary();
                RunRecord {
                    policy,
                    seed,
                    tier: summary.as_ref().map(|s| s.tier),
                    total_score: controller.store().progress().total_quiz_score,
                    max_score: summary.as_ref().map_or(0, |s| s.max_score),
                    percentage: summary.as_ref().map_or(0, |s| s.percentage),
                    steps: 0,
                    virtual_ms: 0,
                    skipped_dialogs: 0,
                    mini_games: controller.store().progress().completed_mini_games.clone(),
                    elapsed,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    /// Play every practice-set game once per policy.
    #[must_use]
    pub fn run_practice(&self, policies: &[Strategy], seed: u64) -> Vec<PracticeRecord> {
        let mut records = Vec::new();
        for &policy in policies {
            for (idx, spec) in self.content.practice().iter().enumerate() {
                let game_seed = seed.wrapping_add(u64::try_from(idx).unwrap_or(u64::MAX));
                let mut game = MiniGame::start(spec, &self.config, game_seed);
                let record = match Autoplayer::new(policy, game_seed).play_mini_game(&mut game) {
                    Ok(outcome) => PracticeRecord {
                        policy,
                        kind: outcome.kind,
                        score: outcome.score,
                        total_questions: outcome.total_questions,
                        error: None,
                    },
                    Err(err) => PracticeRecord {
                        policy,
                        kind: spec.kind(),
                        score: game.score(),
                        total_questions: spec.question_count(),
                        error: Some(err.to_string()),
                    },
                };
                records.push(record);
            }
        }
        records
    }
}

fn check_expectation(policy: Strategy, actual: EndingTier, percentage: u32) -> Result<(), RunFailure> {
    match expected_tier(policy) {
        Some(expected) if expected != actual => Err(RunFailure::WrongTier {
            expected,
            actual,
            percentage,
        }),
        _ => Ok(()),
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
