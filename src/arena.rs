//! Match runner for comparing policies.
//!
//! Plays full matches seat by seat through the rules and counts how often
//! seat 0 wins. One state is dealt per arena and restarted between matches,
//! so its RNG stream runs through the whole batch.

use serde::{Deserialize, Serialize};

use crate::core::{ActionRecord, GameRng, GameState, PlayerId, RulesConfig};
use crate::rules::step;
use crate::search::PreferencePolicy;

/// Configuration for an arena run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Matches per evaluation.
    pub matches: u32,

    /// Resolved actions after which a match is abandoned.
    pub max_steps: u32,

    /// Seed for the dealing RNG.
    pub seed: u64,

    /// Rules every match is dealt with.
    pub rules: RulesConfig,

    /// Return every match's resolved actions in the report.
    pub record_history: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            matches: 100,
            max_steps: 5_000,
            seed: 0,
            rules: RulesConfig::default(),
            record_history: false,
        }
    }
}

impl ArenaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matches(mut self, matches: u32) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_max_steps(mut self, steps: u32) -> Self {
        self.max_steps = steps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }
}

/// How one match went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// `None` if the match hit the step cap.
    pub winner: Option<PlayerId>,
    pub steps: u32,
    /// Empty unless history recording is on.
    pub history: Vec<ActionRecord>,
}

/// Play `state` to the end, asking `choose` for every seat's preferences.
pub fn play_match(
    state: &mut GameState,
    max_steps: u32,
    record_history: bool,
    mut choose: impl FnMut(&GameState) -> Vec<f32>,
) -> MatchResult {
    let mut steps = 0;
    let mut history = Vec::new();

    while steps < max_steps {
        let preferences = choose(state);
        let Some(resolution) = step(state, &preferences) else {
            break;
        };
        steps += 1;
        if record_history {
            history.push(ActionRecord {
                player: resolution.player,
                action: resolution.action,
                outcome: resolution.outcome,
            });
        }
    }

    MatchResult { winner: state.winner(), steps, history }
}

/// Totals over an arena run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaReport {
    pub matches: u32,
    /// Matches won by the contender in seat 0.
    pub wins: u32,
    /// Matches abandoned at the step cap.
    pub unfinished: u32,
    pub total_steps: u64,
    /// One action list per match, only when history recording is on.
    pub histories: Vec<Vec<ActionRecord>>,
}

impl ArenaReport {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.matches)
        }
    }
}

/// Runs batches of matches.
#[derive(Clone, Debug)]
pub struct Arena {
    config: ArenaConfig,
}

impl Arena {
    pub fn new(config: ArenaConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Seat `contender` at seat 0 and `field` at the other three.
    pub fn evaluate(
        &self,
        contender: &mut dyn PreferencePolicy,
        field: &mut dyn PreferencePolicy,
    ) -> ArenaReport {
        let mut state = GameState::with_rules(self.config.rules, GameRng::new(self.config.seed));
        let mut report = ArenaReport::default();

        for index in 0..self.config.matches {
            if index > 0 {
                state.restart();
            }
            let record = self.config.record_history;
            let result = play_match(&mut state, self.config.max_steps, record, |s| {
                if s.current == PlayerId::new(0) {
                    contender.preferences(s)
                } else {
                    field.preferences(s)
                }
            });

            report.matches += 1;
            report.total_steps += u64::from(result.steps);
            match result.winner {
                Some(winner) if winner == PlayerId::new(0) => report.wins += 1,
                Some(_) => {}
                None => report.unfinished += 1,
            }
            if record {
                report.histories.push(result.history);
            }
            log::debug!("match {index}: {:?} after {} steps", result.winner, result.steps);
        }

        log::info!(
            "arena: {}/{} wins ({:.1}%), {} unfinished",
            report.wins,
            report.matches,
            report.win_rate() * 100.0,
            report.unfinished
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Opportunist, RandomPreferences};

    #[test]
    fn test_match_terminates_with_winner() {
        let mut state = GameState::new(42);
        let mut policy = Opportunist::new(GameRng::new(1));

        let result = play_match(&mut state, 10_000, true, |s| policy.preferences(s));

        assert!(result.winner.is_some());
        assert_eq!(result.history.len() as u32, result.steps);
        assert_eq!(state.alive_count(), 1);
        state.assert_invariants();
    }

    #[test]
    fn test_match_respects_step_cap() {
        let mut state = GameState::new(42);
        let mut policy = RandomPreferences::new(GameRng::new(1));

        let result = play_match(&mut state, 5, false, |s| policy.preferences(s));

        assert_eq!(result.steps, 5);
        assert!(result.history.is_empty());
    }

    #[test]
    fn test_history_follows_seats() {
        let mut state = GameState::new(8);
        let mut policy = Opportunist::new(GameRng::new(2));

        let result = play_match(&mut state, 3, true, |s| policy.preferences(s));

        assert!(result.history.iter().all(|r| r.player == PlayerId::new(0)));
    }

    #[test]
    fn test_arena_counts_matches() {
        let arena = Arena::new(ArenaConfig::new().with_matches(4).with_max_steps(10_000).with_seed(3));
        let mut contender = Opportunist::new(GameRng::new(10));
        let mut field = Opportunist::new(GameRng::new(11));

        let report = arena.evaluate(&mut contender, &mut field);

        assert_eq!(report.matches, 4);
        assert_eq!(report.unfinished, 0);
        assert!(report.wins <= 4);
        assert!(report.total_steps > 0);
    }

    #[test]
    fn test_arena_is_deterministic() {
        let arena = Arena::new(ArenaConfig::new().with_matches(3).with_seed(9));
        let run = || {
            let mut contender = RandomPreferences::new(GameRng::new(1));
            let mut field = RandomPreferences::new(GameRng::new(2));
            arena.evaluate(&mut contender, &mut field)
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_arena_history_follows_config() {
        let config = ArenaConfig::new().with_matches(2).with_seed(5);
        let run = |config: ArenaConfig| {
            let mut contender = Opportunist::new(GameRng::new(3));
            let mut field = Opportunist::new(GameRng::new(4));
            Arena::new(config).evaluate(&mut contender, &mut field)
        };

        let quiet = run(config);
        assert!(quiet.histories.is_empty());

        let recorded = run(config.with_history(true));
        assert_eq!(recorded.histories.len(), 2);
        let recorded_steps: usize = recorded.histories.iter().map(Vec::len).sum();
        assert_eq!(recorded_steps as u64, recorded.total_steps);
        assert_eq!(recorded.total_steps, quiet.total_steps);
        assert!(recorded.histories.iter().all(|h| h[0].player == PlayerId::new(0)));
    }

    #[test]
    fn test_win_rate() {
        let report = ArenaReport {
            matches: 4,
            wins: 1,
            unfinished: 0,
            total_steps: 10,
            histories: Vec::new(),
        };
        assert_eq!(report.win_rate(), 0.25);
        assert_eq!(ArenaReport::default().win_rate(), 0.0);
    }
}
