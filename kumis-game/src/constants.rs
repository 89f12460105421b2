//! Centralized scoring and layout constants for Kumis game logic.
//!
//! Timing lives in [`crate::config::GameConfig`] so it can be tuned from
//! JSON; point values stay here so grading only changes through code.

// Fixed-answer quizzes ------------------------------------------------------
pub const POINTS_PER_CORRECT: u32 = 10;

// Typed answers --------------------------------------------------------------
pub const TYPED_POINTS_FIRST_TRY: u32 = 15;
pub const TYPED_POINTS_SECOND_TRY: u32 = 10;
pub const TYPED_POINTS_LATER_TRY: u32 = 5;
/// Wrong submissions allowed before the answer is revealed.
pub const TYPED_MAX_ATTEMPTS: u32 = 3;

// Word guess -----------------------------------------------------------------
pub const WORD_GUESS_MAX_GUESSES: usize = 6;
pub const WORD_GUESS_BASE_POINTS: u32 = 25;
pub const WORD_GUESS_STEP_PENALTY: u32 = 3;
pub const WORD_GUESS_MIN_POINTS: u32 = 5;

// Click target ---------------------------------------------------------------
pub const CLICK_TARGET_PER_KIND: usize = 3;
pub const CLICK_TARGET_REQUIRED_CLICKS: u8 = 3;
pub const CLICK_TARGET_CLEAR_POINTS: u32 = 25;
pub const CLICK_TARGET_DISTRACTORS: usize = 6;
pub const CLICK_TARGET_WRONG_PENALTY: u32 = 5;

// Find object ----------------------------------------------------------------
pub const FIND_OBJECT_TARGETS: usize = 8;
pub const FIND_OBJECT_DISTRACTORS: usize = 12;
pub const FIND_OBJECT_HIT_POINTS: u32 = 10;
pub const FIND_OBJECT_MISS_PENALTY: u32 = 5;

// Speed click ----------------------------------------------------------------
/// Probability that a freshly spawned target is a good one.
pub const SPEED_CLICK_GOOD_CHANCE: f64 = 0.7;
/// Above this many targets the oldest are dropped before a spawn.
pub const SPEED_CLICK_CROWD_LIMIT: usize = 8;
pub const SPEED_CLICK_KEEP_ON_CROWD: usize = 7;
pub const SPEED_CLICK_HIT_POINTS: u32 = 15;
pub const SPEED_CLICK_MISS_PENALTY: u32 = 10;

// Microscope -----------------------------------------------------------------
pub const MICROSCOPE_SAMPLES: usize = 12;
pub const MICROSCOPE_HIT_POINTS: u32 = 10;

// Temperature ----------------------------------------------------------------
pub const TEMPERATURE_SUCCESS_POINTS: u32 = 10;

/// Question weight credited for mini-games that have no question list.
pub const UNQUESTIONED_GAME_WEIGHT: u32 = 5;

// Ending tiers (inclusive lower bounds, percent) ----------------------------
pub const ENDING_PERFECT_MIN: u32 = 80;
pub const ENDING_GOOD_MIN: u32 = 60;
pub const ENDING_FAIR_MIN: u32 = 40;

// Player defaults ------------------------------------------------------------
pub const DEFAULT_PLAYER_NAME: &str = "Pemain";
pub const DEFAULT_PLAYER_CLASS: &str = "-";
