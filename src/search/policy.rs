//! Decision-makers that produce preference vectors.
//!
//! Anything that can score the 216 slots can drive a seat: a random
//! baseline, the kill-first opportunist, a network behind an encoder, or
//! the lookahead planner itself.

use crate::cards::Category;
use crate::core::{Action, GameRng, GameState, PlayerId};
use crate::nn::{ObservationEncoder, PolicyNetwork, StateEncoder};
use crate::rules::layout::{self, one_hot, PREFERENCE_LEN};
use crate::rules::{legality, LegalityMask};

/// Scores the preference slots for the seat to act.
pub trait PreferencePolicy: Send {
    /// A `PREFERENCE_LEN`-long score vector for `state.current`.
    fn preferences(&mut self, state: &GameState) -> Vec<f32>;
}

impl<P: PreferencePolicy + ?Sized> PreferencePolicy for Box<P> {
    fn preferences(&mut self, state: &GameState) -> Vec<f32> {
        (**self).preferences(state)
    }
}

/// Independent uniform scores for every slot.
///
/// The default opponent model inside lookahead.
#[derive(Clone, Debug)]
pub struct RandomPreferences {
    rng: GameRng,
}

impl RandomPreferences {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl PreferencePolicy for RandomPreferences {
    fn preferences(&mut self, _state: &GameState) -> Vec<f32> {
        (0..PREFERENCE_LEN).map(|_| self.rng.gen_unit()).collect()
    }
}

/// Kills whenever it can, otherwise draws or banks at random.
#[derive(Clone, Debug)]
pub struct Opportunist {
    rng: GameRng,
}

impl Opportunist {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

/// Every legal lethal play in `mask`.
#[must_use]
pub fn lethal_plays(mask: &LegalityMask) -> Vec<Action> {
    Category::LETHAL
        .into_iter()
        .enumerate()
        .flat_map(|(i, card)| {
            let head = layout::lethal(i);
            PlayerId::all()
                .filter(move |&target| mask.is_legal(layout::seat(head, target)))
                .map(move |target| Action::Lethal { card, target })
        })
        .collect()
}

impl PreferencePolicy for Opportunist {
    fn preferences(&mut self, state: &GameState) -> Vec<f32> {
        let mask = legality(state);
        let mut choices = lethal_plays(&mask);
        if choices.is_empty() {
            choices.push(Action::Draw);
            choices.extend(
                Category::ALL
                    .into_iter()
                    .filter(|&c| mask.is_legal(layout::bank(c)))
                    .map(Action::Bank),
            );
        }
        match self.rng.choose(&choices) {
            Some(action) => one_hot(action),
            None => vec![0.0; PREFERENCE_LEN],
        }
    }
}

/// A [`PolicyNetwork`] reading encoded observations.
pub struct NetworkPolicy<N, E = ObservationEncoder> {
    network: N,
    encoder: E,
}

impl<N: PolicyNetwork> NetworkPolicy<N> {
    pub fn new(network: N) -> Self {
        Self { network, encoder: ObservationEncoder::new() }
    }
}

impl<N: PolicyNetwork, E: StateEncoder> NetworkPolicy<N, E> {
    /// Use a custom encoder.
    pub fn with_encoder<F: StateEncoder>(self, encoder: F) -> NetworkPolicy<N, F> {
        NetworkPolicy { network: self.network, encoder }
    }
}

impl<N: PolicyNetwork, E: StateEncoder> PreferencePolicy for NetworkPolicy<N, E> {
    fn preferences(&mut self, state: &GameState) -> Vec<f32> {
        let encoded = self.encoder.encode(state, state.current);
        self.network.predict(&encoded)
    }
}
