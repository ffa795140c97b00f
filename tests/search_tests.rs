//! Planner and arena integration tests.

use hidden_marks::core::{Action, GameState, PlayerId};
use hidden_marks::rules::{legality, step};
use hidden_marks::search::{candidates, lethal_plays, Heuristic};
use hidden_marks::{
    play_match, Arena, ArenaConfig, GameRng, Opportunist, Planner, PlannerConfig,
    PreferencePolicy, RandomPreferences,
};

#[test]
fn test_planner_plays_a_legal_move_every_turn() {
    let mut state = GameState::new(99);
    let mut planner = Planner::new(PlannerConfig::default().with_depth(1).with_seed(3));
    let mut field = RandomPreferences::new(GameRng::new(4));

    for _ in 0..60 {
        if state.is_over() {
            break;
        }
        let preferences = if state.current == PlayerId::new(0) {
            let plan = planner.plan(&state).expect("match running");
            assert!(legality(&state).permits(&plan.action));
            planner.preferences(&state)
        } else {
            field.preferences(&state)
        };
        step(&mut state, &preferences).expect("match running");
        state.assert_invariants();
    }
}

#[test]
fn test_planner_candidates_are_legal() {
    let state = GameState::new(5);
    let mask = legality(&state);
    for action in candidates(&state) {
        assert!(mask.permits(&action), "{action} should be legal");
    }
}

#[test]
fn test_planner_with_custom_opponent() {
    let state = GameState::new(12);
    let opponent = Opportunist::new(GameRng::new(8));
    let mut planner = Planner::new(PlannerConfig::default().with_depth(2)).with_opponent(opponent);

    let plan = planner.plan(&state).expect("match running");

    assert!(candidates(&state).contains(&plan.action) || plan.action.is_lethal());
    assert!(planner.stats().branches >= candidates(&state).len() as u32);
    assert!(planner.stats().leaves > 0);
}

#[test]
fn test_heuristic_weights_change_the_score() {
    let state = GameState::new(3);
    let quiet = Heuristic { opponent_out: 0, ..Heuristic::default() };
    let config = PlannerConfig::default().with_depth(1).with_heuristic(quiet);
    let mut planner = Planner::new(config);

    let plan = planner.plan(&state).expect("match running");

    assert_eq!(plan.score, quiet.evaluate(&plan.state, PlayerId::new(0)));
}

#[test]
fn test_opportunist_never_misses_lethal() {
    let mut state = GameState::new(21);
    let mut policy = Opportunist::new(GameRng::new(6));

    for _ in 0..500 {
        if state.is_over() {
            break;
        }
        let lethal = lethal_plays(&legality(&state));
        let preferences = policy.preferences(&state);
        let resolution = step(&mut state, &preferences).expect("match running");
        if !lethal.is_empty() {
            assert!(lethal.contains(&resolution.action));
        }
    }
}

#[test]
fn test_planner_match_reaches_a_winner() {
    let mut state = GameState::new(2);
    let mut planner = Planner::new(PlannerConfig::default().with_depth(1));
    let mut field = Opportunist::new(GameRng::new(1));

    let result = play_match(&mut state, 10_000, false, |s| {
        if s.current == PlayerId::new(0) {
            planner.preferences(s)
        } else {
            field.preferences(s)
        }
    });

    assert!(result.winner.is_some());
    state.assert_invariants();
}

#[test]
fn test_arena_planner_against_random() {
    let arena = Arena::new(ArenaConfig::new().with_matches(3).with_seed(17));
    let run = || {
        let mut contender = Planner::new(PlannerConfig::default().with_depth(1));
        let mut field = RandomPreferences::new(GameRng::new(2));
        arena.evaluate(&mut contender, &mut field)
    };

    let report = run();

    assert_eq!(report.matches, 3);
    assert!(report.total_steps > 0);
    assert!(report.wins + report.unfinished <= 3);
    assert_eq!(report, run());
}

#[test]
fn test_draw_is_always_a_candidate() {
    let state = GameState::new(0);
    assert_eq!(candidates(&state)[0], Action::Draw);
}
