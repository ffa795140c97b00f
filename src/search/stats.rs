//! Planner statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Branches created (one cloned state each).
    pub branches: u32,

    /// Leaves scored by the heuristic.
    pub leaves: u32,

    /// Opponent actions simulated.
    pub opponent_steps: u32,

    /// Whether the root took the lethal short-circuit.
    pub short_circuited: bool,

    /// Total time spent planning (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Branches explored per second.
    #[must_use]
    pub fn branches_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.branches as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
