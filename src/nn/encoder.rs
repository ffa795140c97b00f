//! State encoding for an external decision-maker.
//!
//! Transforms a game state into the flat 804-entry observation vector.

use crate::cards::{Card, Category, Tier, CATEGORY_COUNT, DECK_SIZE};
use crate::core::{GameState, PlayerId, Zone, MARK_COUNT, SEATS};
use crate::nn::traits::EncodedState;
use crate::rules::layout::PREFERENCE_LEN;

/// Encodes game state into tensors for a policy network.
///
/// Each encoder defines:
/// - How to convert state to a tensor from a player's perspective
/// - The shape of the output tensor
/// - The size of the action space
pub trait StateEncoder: Send + Sync {
    /// Encode the game state from a player's perspective.
    ///
    /// Only what `perspective` may see is encoded: their own hand and
    /// knowledge, and public counts for everyone else.
    fn encode(&self, state: &GameState, perspective: PlayerId) -> EncodedState;

    fn output_shape(&self) -> Vec<usize>;

    /// Length of the preference vector a network must produce.
    fn action_space_size(&self) -> usize;
}

/// Width of each per-seat tier thermometer.
pub const TIER_THERMOMETER: usize = 22;

const DRAW_BLOCK: usize = DECK_SIZE * 3;
const SEAT_BLOCK: usize = SEATS * 6 * TIER_THERMOMETER;
const KNOWLEDGE_BLOCK: usize = MARK_COUNT * MARK_COUNT;

/// Length of the observation vector.
pub const OBSERVATION_LEN: usize =
    DRAW_BLOCK + SEAT_BLOCK + DECK_SIZE + DECK_SIZE + KNOWLEDGE_BLOCK + SEATS + 3 + SEATS;

/// The standard observation.
///
/// | block | entries |
/// |---|---|
/// | draw pile, bottom first, one-hot tier per position | 144 |
/// | per seat: hand then bank, white/blue/red thermometers of width 22 | 528 |
/// | discard pile per category, thermometer of the category size | 48 |
/// | perspective hand per category, same encoding | 48 |
/// | perspective knowledge, row-major | 25 |
/// | current seat one-hot | 4 |
/// | action index one-hot | 3 |
/// | alive bits | 4 |
///
/// Nothing is cached; every call reads the state afresh.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObservationEncoder;

impl ObservationEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Observation for the seat to act.
    #[must_use]
    pub fn observe(&self, state: &GameState) -> Vec<f32> {
        self.encode(state, state.current).tensor
    }
}

/// Appends blocks in order and tracks the write position.
struct Writer {
    tensor: Vec<f32>,
    offset: usize,
}

impl Writer {
    fn new() -> Self {
        Self { tensor: vec![0.0; OBSERVATION_LEN], offset: 0 }
    }

    /// Reserve `width` entries and return their start.
    fn block(&mut self, width: usize) -> usize {
        let start = self.offset;
        self.offset += width;
        start
    }

    fn one_hot(&mut self, width: usize, hot: usize) {
        let start = self.block(width);
        if hot < width {
            self.tensor[start + hot] = 1.0;
        }
    }

    fn thermometer(&mut self, width: usize, count: usize) {
        let start = self.block(width);
        for cell in &mut self.tensor[start..start + count.min(width)] {
            *cell = 1.0;
        }
    }

    /// Per-category thermometers over `cards`.
    fn categories<'a>(&mut self, cards: impl IntoIterator<Item = &'a Card>) {
        let mut counts = [0usize; CATEGORY_COUNT];
        for card in cards {
            counts[card.category().index()] += 1;
        }
        for category in Category::ALL {
            self.thermometer(category.len(), counts[category.index()]);
        }
    }

    fn finish(self) -> Vec<f32> {
        debug_assert_eq!(self.offset, OBSERVATION_LEN);
        self.tensor
    }
}

impl StateEncoder for ObservationEncoder {
    fn encode(&self, state: &GameState, perspective: PlayerId) -> EncodedState {
        let mut out = Writer::new();

        let draw_start = out.block(DRAW_BLOCK);
        for (position, card) in state.draw_pile.iter().enumerate() {
            out.tensor[draw_start + position * 3 + card.tier().index()] = 1.0;
        }

        for player in &state.players {
            for zone in Zone::ALL {
                for tier in Tier::ALL {
                    out.thermometer(TIER_THERMOMETER, player.tier_count(zone, tier));
                }
            }
        }

        out.categories(state.discard_pile.iter());

        let me = state.player(perspective);
        out.categories(me.hand.iter());

        let knowledge = out.block(KNOWLEDGE_BLOCK);
        for (i, known) in me.knowledge.cells().enumerate() {
            if known {
                out.tensor[knowledge + i] = 1.0;
            }
        }

        out.one_hot(SEATS, state.current.index());
        out.one_hot(3, state.actions.clamp(0, 2) as usize);

        let alive = out.block(SEATS);
        for seat in state.alive_players() {
            out.tensor[alive + seat.index()] = 1.0;
        }

        EncodedState::new(out.finish(), vec![OBSERVATION_LEN])
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![OBSERVATION_LEN]
    }

    fn action_space_size(&self) -> usize {
        PREFERENCE_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;
    use crate::rules::resolver::apply;

    const SEATS_START: usize = DRAW_BLOCK;
    const DISCARD_START: usize = SEATS_START + SEAT_BLOCK;
    const HAND_START: usize = DISCARD_START + DECK_SIZE;
    const KNOWLEDGE_START: usize = HAND_START + DECK_SIZE;
    const CURRENT_START: usize = KNOWLEDGE_START + KNOWLEDGE_BLOCK;
    const ACTION_START: usize = CURRENT_START + SEATS;
    const ALIVE_START: usize = ACTION_START + 3;

    fn ones(slice: &[f32]) -> usize {
        slice.iter().filter(|&&v| v == 1.0).count()
    }

    #[test]
    fn test_observation_len() {
        assert_eq!(OBSERVATION_LEN, 804);
        let encoder = ObservationEncoder::new();
        assert_eq!(encoder.output_shape(), vec![804]);
        assert_eq!(encoder.action_space_size(), 216);
        assert_eq!(encoder.observe(&GameState::new(1)).len(), 804);
    }

    #[test]
    fn test_fresh_deal_blocks() {
        let state = GameState::new(42);
        let obs = ObservationEncoder::new().observe(&state);

        assert_eq!(ones(&obs[..DRAW_BLOCK]), state.draw_pile.len());
        assert_eq!(ones(&obs[SEATS_START..DISCARD_START]), 12);
        assert_eq!(ones(&obs[DISCARD_START..HAND_START]), 0);
        assert_eq!(ones(&obs[HAND_START..KNOWLEDGE_START]), 3);
        assert_eq!(ones(&obs[KNOWLEDGE_START..CURRENT_START]), 0);
        assert_eq!(&obs[CURRENT_START..ACTION_START], &[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(&obs[ACTION_START..ALIVE_START], &[1.0, 0.0, 0.0]);
        assert_eq!(&obs[ALIVE_START..], &[1.0; 4]);
    }

    #[test]
    fn test_draw_pile_is_bottom_first() {
        let state = GameState::new(3);
        let obs = ObservationEncoder::new().observe(&state);
        let bottom = state.draw_pile[0];

        assert_eq!(obs[bottom.tier().index()], 1.0);
        assert_eq!(ones(&obs[state.draw_pile.len() * 3..DRAW_BLOCK]), 0);
    }

    #[test]
    fn test_reflects_state_changes() {
        let mut state = GameState::new(42);
        let encoder = ObservationEncoder::new();
        let before = encoder.observe(&state);

        apply(&mut state, &Action::Draw);
        state.actions = 5;
        state.eliminate(PlayerId::new(2));
        let after = encoder.observe(&state);

        assert_ne!(before, after);
        assert_eq!(ones(&after[HAND_START..KNOWLEDGE_START]), 4);
        assert_eq!(ones(&after[DISCARD_START..HAND_START]), 3);
        assert_eq!(&after[ACTION_START..ALIVE_START], &[0.0, 0.0, 1.0]);
        assert_eq!(&after[ALIVE_START..], &[1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_knowledge_from_perspective() {
        let mut state = GameState::new(42);
        let target = PlayerId::new(1);
        let mark = state.player(target).mark;
        state.player_mut(PlayerId::new(3)).knowledge.learn(target, mark);
        let encoder = ObservationEncoder::new();

        let mine = encoder.encode(&state, PlayerId::new(0)).tensor;
        let theirs = encoder.encode(&state, PlayerId::new(3)).tensor;

        assert_eq!(ones(&mine[KNOWLEDGE_START..CURRENT_START]), 0);
        let cell = KNOWLEDGE_START + target.index() * MARK_COUNT + mark.index();
        assert_eq!(theirs[cell], 1.0);
    }

    #[test]
    fn test_thermometer_caps_at_width() {
        let mut out = Writer::new();
        out.thermometer(3, 10);
        out.thermometer(4, 2);

        assert_eq!(&out.tensor[..7], &[1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
    }
}
