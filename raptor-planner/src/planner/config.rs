//! Planner configuration.

/// Configuration parameters for a RAPTOR query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaptorConfig {
    /// Maximum number of rounds to run.
    ///
    /// Each round adds at most one boarding or walk, so this bounds the
    /// number of legs in a returned journey. `None` runs until no stop
    /// improves, which always terminates.
    pub max_rounds: Option<usize>,
}

impl RaptorConfig {
    /// Create a new configuration with the given round cap.
    pub fn new(max_rounds: Option<usize>) -> Self {
        Self { max_rounds }
    }

    /// Create a configuration that stops after `rounds` rounds.
    pub fn with_max_rounds(rounds: usize) -> Self {
        Self::new(Some(rounds))
    }

    /// Returns true if round `k` may still run.
    pub fn allows_round(&self, k: usize) -> bool {
        self.max_rounds.is_none_or(|max| k <= max)
    }
}
