//! Look-ahead configuration parameters.

use serde::{Deserialize, Serialize};

/// Longest suffix a look-ahead may replay past the live log.
pub const MAX_LOOKAHEAD_DEPTH: usize = 3;

/// Look-ahead configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookAheadConfig {
    /// Maximum suffix length for `peek` (at most `MAX_LOOKAHEAD_DEPTH`).
    pub depth: usize,

    /// Rollouts played to the end per candidate action.
    pub rollouts: u32,

    /// Seed for rollout policy streams.
    /// Same seed produces the same evaluation.
    pub seed: u64,
}

impl Default for LookAheadConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            rollouts: 8,
            seed: 42,
        }
    }
}

impl LookAheadConfig {
    /// Set the depth, clamped to `MAX_LOOKAHEAD_DEPTH`.
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth.min(MAX_LOOKAHEAD_DEPTH);
        self
    }

    /// Set the rollouts per candidate; at least one.
    #[must_use]
    pub fn with_rollouts(mut self, rollouts: u32) -> Self {
        self.rollouts = rollouts.max(1);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
