//! Depth-limited lookahead over the acting seat's own moves.
//!
//! Only the searching seat branches. Opponents are not searched: between
//! two own actions they are played out once with the opponent policy, the
//! same way a live match would play them. Every branch runs on its own
//! clone of the state with its own forked RNG, so no branch can observe
//! another.

use std::time::Instant;

use crate::core::{Action, GameRng, GameState, PlayerId};
use crate::rules::layout::{one_hot, PREFERENCE_LEN};
use crate::rules::{apply, finish_action, legality, step};

use super::config::PlannerConfig;
use super::policy::{lethal_plays, PreferencePolicy, RandomPreferences};
use super::stats::SearchStats;

/// The planner's pick.
#[derive(Clone, Debug)]
pub struct Plan {
    pub action: Action,
    /// Heuristic score of the best reachable leaf.
    pub score: i64,
    /// The leaf state that earned `score`.
    pub state: GameState,
}

/// Lookahead planner.
///
/// Generic over the policy that plays the opponents between own moves.
pub struct Planner<O: PreferencePolicy = RandomPreferences> {
    config: PlannerConfig,

    /// Plays every other seat inside a branch.
    opponent: O,

    /// Forked once per branch.
    rng: GameRng,

    stats: SearchStats,
}

impl Planner<RandomPreferences> {
    /// Planner with random opponents, seeded from `config`.
    pub fn new(config: PlannerConfig) -> Self {
        let mut rng = GameRng::new(config.seed);
        let opponent = RandomPreferences::new(rng.fork());
        Self {
            config,
            opponent,
            rng,
            stats: SearchStats::default(),
        }
    }
}

impl<O: PreferencePolicy> Planner<O> {
    /// Replace the opponent model.
    pub fn with_opponent<P: PreferencePolicy>(self, opponent: P) -> Planner<P> {
        Planner {
            config: self.config,
            opponent,
            rng: self.rng,
            stats: self.stats,
        }
    }

    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Statistics of the last plan.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Best action for the seat to act, or `None` once the match is over.
    pub fn plan(&mut self, state: &GameState) -> Option<Plan> {
        if state.is_over() || !state.acting().alive {
            return None;
        }
        let start = Instant::now();
        self.stats.reset();

        let me = state.current;
        let depth = self.config.depth.max(1);
        let lethal = lethal_plays(&legality(state));
        self.stats.short_circuited = !lethal.is_empty();
        let candidates = if lethal.is_empty() { candidates(state) } else { lethal };

        let mut best: Option<Plan> = None;
        for action in candidates {
            let (score, leaf) = self.explore(state, me, action, depth);
            if best.as_ref().map_or(true, |plan| score > plan.score) {
                best = Some(Plan { action, score, state: leaf });
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        if let Some(plan) = &best {
            log::debug!(
                "{me} plans {} (score {}, {} branches)",
                plan.action,
                plan.score,
                self.stats.branches
            );
        }
        best
    }

    /// Apply `action` on a fresh branch, play the opponents, recurse.
    fn explore(
        &mut self,
        parent: &GameState,
        me: PlayerId,
        action: Action,
        depth: u32,
    ) -> (i64, GameState) {
        let mut branch = parent.clone();
        branch.rng = self.rng.fork();
        self.stats.branches += 1;

        let outcome = apply(&mut branch, &action);
        finish_action(&mut branch, outcome);
        self.play_opponents(&mut branch, me);
        self.search(branch, me, depth - 1)
    }

    fn search(&mut self, state: GameState, me: PlayerId, depth: u32) -> (i64, GameState) {
        if depth == 0 || state.is_over() || state.current != me || !state.player(me).alive {
            self.stats.leaves += 1;
            return (self.config.heuristic.evaluate(&state, me), state);
        }

        let lethal = lethal_plays(&legality(&state));
        let actions = if lethal.is_empty() { candidates(&state) } else { lethal };

        let mut best: Option<(i64, GameState)> = None;
        for action in actions {
            let (score, leaf) = self.explore(&state, me, action, depth);
            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((score, leaf));
            }
        }
        best.unwrap_or_else(|| {
            let score = self.config.heuristic.evaluate(&state, me);
            (score, state)
        })
    }

    /// Step the other seats until `me` is up again.
    fn play_opponents(&mut self, state: &mut GameState, me: PlayerId) {
        let mut steps = 0;
        while !state.is_over() && state.current != me && steps < self.config.max_opponent_steps {
            let preferences = self.opponent.preferences(state);
            step(state, &preferences);
            steps += 1;
        }
        self.stats.opponent_steps += steps;
    }
}

/// Draw, then banking each distinct hand category in hand order.
#[must_use]
pub fn candidates(state: &GameState) -> Vec<Action> {
    let mut actions = vec![Action::Draw];
    for card in &state.acting().hand {
        let bank = Action::Bank(card.category());
        if !actions.contains(&bank) {
            actions.push(bank);
        }
    }
    actions
}

impl<O: PreferencePolicy> PreferencePolicy for Planner<O> {
    fn preferences(&mut self, state: &GameState) -> Vec<f32> {
        match self.plan(state) {
            Some(plan) => one_hot(&plan.action),
            None => vec![0.0; PREFERENCE_LEN],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Category;
    use crate::core::testing::{bare_state, give};
    use crate::core::Zone;
    use crate::rules::resolve;

    #[test]
    fn test_candidates_dedupe_categories() {
        let mut state = bare_state();
        give(&mut state, 0, Zone::Hand, &[8, 0, 9, 1, 40]);

        assert_eq!(
            candidates(&state),
            vec![
                Action::Draw,
                Action::Bank(Category::Greed),
                Action::Bank(Category::Unmask),
                Action::Bank(Category::Backfire),
            ]
        );
    }

    #[test]
    fn test_plan_is_deterministic() {
        let state = GameState::new(17);
        let mut a = Planner::new(PlannerConfig::default().with_seed(5));
        let mut b = Planner::new(PlannerConfig::default().with_seed(5));

        let plan_a = a.plan(&state).expect("match running");
        let plan_b = b.plan(&state).expect("match running");

        assert_eq!(plan_a.action, plan_b.action);
        assert_eq!(plan_a.score, plan_b.score);
        assert_eq!(plan_a.state.snapshot(), plan_b.state.snapshot());
        assert_eq!(a.stats().branches, b.stats().branches);
    }

    #[test]
    fn test_plan_takes_lethal() {
        let mut state = bare_state();
        give(&mut state, 0, Zone::Hand, &[38]);
        give(&mut state, 0, Zone::Bank, &[39, 40, 41, 43]);
        give(&mut state, 2, Zone::Bank, &[0, 1, 2, 3, 4]);
        let mut planner = Planner::new(PlannerConfig::default());

        let plan = planner.plan(&state).expect("match running");

        assert_eq!(
            plan.action,
            Action::Lethal { card: Category::GoldDigger, target: PlayerId::new(2) }
        );
        assert!(planner.stats().short_circuited);
    }

    #[test]
    fn test_plan_banks_red_card() {
        let mut state = bare_state();
        give(&mut state, 0, Zone::Hand, &[40]);
        let mut planner = Planner::new(PlannerConfig::default().with_depth(1));

        let plan = planner.plan(&state).expect("match running");

        assert_eq!(plan.action, Action::Bank(Category::Backfire));
        assert_eq!(plan.score, 0);
        assert_eq!(planner.stats().branches, 2);
    }

    #[test]
    fn test_plan_leaves_real_state_untouched() {
        let state = GameState::new(23);
        let before = state.snapshot();
        let mut planner = Planner::new(PlannerConfig::default().with_depth(3));

        planner.plan(&state);

        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_zero_depth_still_plans() {
        let state = GameState::new(4);
        let mut planner = Planner::new(PlannerConfig::default().with_depth(0));
        assert!(planner.plan(&state).is_some());
    }

    #[test]
    fn test_no_plan_when_over() {
        let mut state = bare_state();
        for seat in 1..4 {
            state.eliminate(PlayerId::new(seat));
        }
        let mut planner = Planner::new(PlannerConfig::default());

        assert!(planner.plan(&state).is_none());
        assert_eq!(planner.preferences(&state), vec![0.0; PREFERENCE_LEN]);
    }

    #[test]
    fn test_preferences_replay_the_plan() {
        let mut state = GameState::new(31);
        let mut planner = Planner::new(PlannerConfig::default().with_depth(1));
        let expected = Planner::new(PlannerConfig::default().with_depth(1))
            .plan(&state)
            .expect("match running")
            .action;

        let preferences = planner.preferences(&state);
        let resolution = resolve(&mut state, &preferences);

        assert_eq!(resolution.action, expected);
    }
}
