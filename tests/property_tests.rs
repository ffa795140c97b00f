//! Invariants that must hold after every resolved action, whatever the
//! decision-maker asks for.

use proptest::prelude::*;

use hidden_marks::core::{GameState, Holder, Mark, PlayerId, MARK_COUNT};
use hidden_marks::rules::{legality, select, step, PREFERENCE_LEN};
use hidden_marks::{GameRng, PreferencePolicy, RandomPreferences};

fn marks_form_bijection(state: &GameState) -> bool {
    let mut seen = [false; MARK_COUNT];
    for mark in Mark::all() {
        let holder = state.holder_of(mark);
        let held = match holder {
            Holder::Seat(seat) => state.player(seat).mark,
            Holder::Extra => state.extra_mark,
        };
        if held != mark || seen[mark.index()] {
            return false;
        }
        seen[mark.index()] = true;
    }
    seen.iter().all(|&s| s)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_random_play_keeps_invariants(seed in any::<u64>(), policy_seed in any::<u64>()) {
        let mut state = GameState::new(seed);
        let mut policy = RandomPreferences::new(GameRng::new(policy_seed));

        for _ in 0..400 {
            if state.is_over() {
                break;
            }
            let preferences = policy.preferences(&state);
            let mask = legality(&state);
            let chosen = select(&mask, &preferences);
            prop_assert!(mask.permits(&chosen), "selected {} outside the mask", chosen);

            let resolution = step(&mut state, &preferences).expect("match running");
            prop_assert_eq!(resolution.action, chosen);
            prop_assert!(state.check_invariants().is_ok(), "{:?}", state.check_invariants());
            prop_assert!(marks_form_bijection(&state));
        }
    }

    #[test]
    fn prop_selection_is_always_legal(
        seed in any::<u64>(),
        steps in 0usize..60,
        preferences in prop::collection::vec(-10.0f32..10.0, PREFERENCE_LEN),
    ) {
        let mut state = GameState::new(seed);
        let mut policy = RandomPreferences::new(GameRng::new(seed ^ 0x5eed));
        for _ in 0..steps {
            if state.is_over() {
                break;
            }
            let prefs = policy.preferences(&state);
            step(&mut state, &prefs);
        }

        let mask = legality(&state);
        prop_assert!(mask.permits(&select(&mask, &preferences)));
    }

    #[test]
    fn prop_dead_seats_never_act(seed in any::<u64>()) {
        let mut state = GameState::new(seed);
        let mut policy = RandomPreferences::new(GameRng::new(seed.wrapping_add(1)));

        for _ in 0..400 {
            let preferences = policy.preferences(&state);
            let Some(resolution) = step(&mut state, &preferences) else {
                break;
            };
            let actor = resolution.player;
            prop_assert!(actor.index() < 4);
            if !state.is_over() {
                prop_assert!(state.player(state.current).alive);
            }
        }
        prop_assert!(state.alive_players().count() >= 1);
        if let Some(winner) = state.winner() {
            prop_assert!(state.player(winner).alive);
            prop_assert!(PlayerId::all().filter(|&p| p != winner).all(|p| !state.player(p).alive));
        }
    }
}
