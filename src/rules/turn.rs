//! Turn flow: action budget, skips, eliminations and the last-draw showdown.
//!
//! A seat acts [`ACTIONS_PER_TURN`] times, then the turn passes to the next
//! living seat that is not tied up. An elimination by swap ends the turn at
//! once. Every completed action cycle ticks the bounty countdowns, whoever
//! is acting.

use smallvec::SmallVec;

use crate::core::{GameState, Mark, Outcome, PlayerId, MARK_COUNT, SEATS};

use super::resolver::{resolve, settle, Resolution};

/// Actions each seat takes per turn, before insomnia.
pub const ACTIONS_PER_TURN: i8 = 3;

/// `me` bets that `target` holds `guess`.
///
/// A hit eliminates the target. A miss swaps the two seats' marks, then
/// eliminates `me` and passes the turn.
pub fn showdown(state: &mut GameState, me: PlayerId, target: PlayerId, guess: Mark) -> Outcome {
    if state.player(target).mark == guess {
        log::debug!("{me} calls {guess} on {target}: hit");
        state.eliminate(target);
        return settle(state);
    }

    log::debug!("{me} calls {guess} on {target}: miss");
    state.swap_marks(me.into(), target.into());
    state.eliminate(me);
    match state.winner() {
        Some(winner) => Outcome::GameOver(winner),
        None => {
            pass_turn(state);
            Outcome::TurnPassed
        }
    }
}

/// The draw pile ran out under `me`.
///
/// `me` names a living opponent and a mark. The last pair `me` knows to be
/// true is used; without one, both are picked at random. After the
/// showdown the discard pile becomes the new draw pile.
pub fn last_draw(state: &mut GameState, me: PlayerId) -> Outcome {
    let candidates: SmallVec<[PlayerId; SEATS]> = state.opponents(me).collect();

    let outcome = if candidates.is_empty() {
        Outcome::Continue
    } else {
        let knowledge = &state.player(me).knowledge;
        let known = candidates
            .iter()
            .flat_map(|&p| Mark::all().map(move |m| (p, m)))
            .filter(|&(p, m)| knowledge.knows(p, m))
            .last();
        let (target, guess) = match known {
            Some(pair) => pair,
            None => {
                let target = candidates[state.rng.gen_range_usize(0..candidates.len())];
                let guess = Mark::new(state.rng.gen_range_usize(0..MARK_COUNT) as u8);
                (target, guess)
            }
        };
        log::debug!("draw pile exhausted by {me}");
        showdown(state, me, target, guess)
    };

    state.reshuffle_discard();
    outcome
}

/// Close one action cycle.
pub fn finish_action(state: &mut GameState, outcome: Outcome) {
    for bounty in &mut state.bounties {
        bounty.countdown = bounty.countdown.saturating_sub(1);
    }
    if outcome == Outcome::Continue {
        state.actions += 1;
        if state.actions >= ACTIONS_PER_TURN {
            pass_turn(state);
        }
    }
}

/// Hand the turn to the next living seat that is not tied up.
///
/// Each skip met on the way is consumed. Nothing moves once the match is
/// decided.
pub fn pass_turn(state: &mut GameState) {
    state.actions = 0;
    if state.alive_count() <= 1 {
        return;
    }

    let mut seat = state.current;
    loop {
        seat = seat.next();
        if !state.player(seat).alive {
            continue;
        }
        if let Some(index) = state.skips.iter().position(|&s| s == seat) {
            state.skips.remove(index);
            log::trace!("{seat} is tied up and loses a turn");
            continue;
        }
        break;
    }
    state.current = seat;
}

/// Resolve one action from `preferences` and close the cycle.
///
/// `None` once the match is over.
pub fn step(state: &mut GameState, preferences: &[f32]) -> Option<Resolution> {
    if state.is_over() {
        return None;
    }
    let resolution = resolve(state, preferences);
    finish_action(state, resolution.outcome);
    Some(resolution)
}
