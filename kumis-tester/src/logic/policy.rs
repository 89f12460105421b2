use clap::ValueEnum;
use kumis_game::{EndingTier, Strategy};

/// Which policies a run exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicySelection {
    /// Always answer correctly and read every line
    Perfect,
    /// Seeded random answers, occasionally skipping dialog
    Random,
    /// Always answer wrong and let timed games fail
    Worst,
    /// Every policy in turn
    All,
}

impl PolicySelection {
    #[must_use]
    pub fn strategies(self) -> Vec<Strategy> {
        match self {
            Self::Perfect => vec![Strategy::Perfect],
            Self::Random => vec![Strategy::Random],
            Self::Worst => vec![Strategy::Worst],
            Self::All => Strategy::ALL.to_vec(),
        }
    }
}

/// The ending a policy must reach, if it is deterministic enough to demand one.
#[must_use]
pub const fn expected_tier(strategy: Strategy) -> Option<EndingTier> {
    match strategy {
        Strategy::Perfect => Some(EndingTier::Perfect),
        Strategy::Worst => Some(EndingTier::NeedsStudy),
        Strategy::Random => None,
    }
}

#[must_use]
pub fn policy_catalog() -> Vec<(&'static str, &'static str)> {
    Strategy::ALL
        .into_iter()
        .map(|strategy| {
            let description = match strategy {
                Strategy::Perfect => "answers every question correctly; expects the perfect ending",
                Strategy::Random => "answers at random and skips some dialogs; no ending expected",
                Strategy::Worst => "answers every question wrong; expects the needs-study ending",
            };
            (strategy.as_str(), description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_expands_to_every_strategy() {
        assert_eq!(PolicySelection::All.strategies(), Strategy::ALL.to_vec());
        assert_eq!(PolicySelection::Worst.strategies(), vec![Strategy::Worst]);
    }

    #[test]
    fn only_random_has_no_expectation() {
        assert_eq!(expected_tier(Strategy::Perfect), Some(EndingTier::Perfect));
        assert_eq!(expected_tier(Strategy::Worst), Some(EndingTier::NeedsStudy));
        assert_eq!(expected_tier(Strategy::Random), None);
        assert_eq!(policy_catalog().len(), 3);
    }
}
