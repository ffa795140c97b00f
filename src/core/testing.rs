//! Fixtures for unit tests.

use crate::cards::Card;

use super::player::{PlayerId, Zone};
use super::state::GameState;

/// A dealt state with every card gathered back into the draw pile.
pub(crate) fn bare_state() -> GameState {
    let mut state = GameState::new(42);
    for player in &mut state.players {
        let cards: Vec<Card> = player.hand.drain(..).chain(player.bank.drain(..)).collect();
        state.draw_pile.extend(cards);
    }
    state
}

/// Move the cards with `ids` from the draw pile into a seat's zone.
pub(crate) fn give(state: &mut GameState, seat: u8, zone: Zone, ids: &[u8]) {
    for &id in ids {
        let card = Card::new(id);
        let index = state.draw_pile.index_of(&card).expect("card in draw pile");
        state.draw_pile.remove(index);
        state.player_mut(PlayerId::new(seat)).zone_mut(zone).push(card);
    }
}
