//! Planner configuration parameters.

use serde::{Deserialize, Serialize};

use super::heuristic::Heuristic;

/// Planner configuration parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Own actions to look ahead (default: 2).
    /// Zero is treated as one.
    pub depth: u32,

    /// Random seed for branch RNGs and the default opponent model.
    /// Same seed produces deterministic plans.
    pub seed: u64,

    /// Cap on simulated opponent actions between two own actions.
    pub max_opponent_steps: u32,

    /// Leaf evaluation weights.
    pub heuristic: Heuristic,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            seed: 42,
            max_opponent_steps: 64,
            heuristic: Heuristic::default(),
        }
    }
}

impl PlannerConfig {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_opponent_steps(mut self, steps: u32) -> Self {
        self.max_opponent_steps = steps;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.depth, 2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.heuristic, Heuristic::default());
    }

    #[test]
    fn test_builder_pattern() {
        let config = PlannerConfig::default()
            .with_depth(3)
            .with_seed(123)
            .with_max_opponent_steps(10);

        assert_eq!(config.depth, 3);
        assert_eq!(config.seed, 123);
        assert_eq!(config.max_opponent_steps, 10);
    }

    #[test]
    fn test_serialization() {
        let config = PlannerConfig::default().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PlannerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
