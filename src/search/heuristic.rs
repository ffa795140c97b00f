//! Leaf evaluation for lookahead.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};

/// Weights of the static evaluation.
///
/// Each condition that holds adds its weight; the total is the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heuristic {
    /// The searching seat is out.
    pub eliminated: i64,
    /// Hand or bank sizes above this count as overflow.
    pub overflow_limit: usize,
    pub hand_overflow: i64,
    pub bank_overflow: i64,
    /// Holding any red card in hand.
    pub red_in_hand: i64,
    /// Per eliminated opponent.
    pub opponent_out: i64,
    /// Money at which `rich` applies.
    pub rich_threshold: u32,
    pub rich: i64,
}

impl Default for Heuristic {
    fn default() -> Self {
        Self {
            eliminated: -10_000,
            overflow_limit: 4,
            hand_overflow: -100,
            bank_overflow: -100,
            red_in_hand: -100,
            opponent_out: 100,
            rich_threshold: 10,
            rich: 50,
        }
    }
}

impl Heuristic {
    /// Score `state` for `me`.
    #[must_use]
    pub fn evaluate(&self, state: &GameState, me: PlayerId) -> i64 {
        let player = state.player(me);
        let mut score = 0;

        if player.alive {
            if player.hand.len() > self.overflow_limit {
                score += self.hand_overflow;
            }
            if player.bank.len() > self.overflow_limit {
                score += self.bank_overflow;
            }
        } else {
            score += self.eliminated;
        }
        if player.red_in_hand() > 0 {
            score += self.red_in_hand;
        }

        let out = PlayerId::all()
            .filter(|&p| p != me && !state.player(p).alive)
            .count() as i64;
        score += out * self.opponent_out;

        if player.money() >= self.rich_threshold {
            score += self.rich;
        }
        score
    }
}
