pub mod policy;
pub mod reports;
pub mod simulation;

pub use policy::{PolicySelection, policy_catalog};
pub use simulation::{PolicyResult, PracticeRecord, RunRecord, Simulator, TestReport};
