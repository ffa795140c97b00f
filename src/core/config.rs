//! Rule constants a match is played with.
//!
//! The defaults are the printed rules. Tests and experiments can tweak
//! them with the `with_*` builders; the card catalog (costs, tiers,
//! categories) is fixed and lives in `cards`.

use serde::{Deserialize, Serialize};

/// Tunable rule constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Cards dealt to each seat at setup.
    pub starting_hand: usize,

    /// Action cycles before a claimed bounty can be invoked.
    pub bounty_countdown: u8,

    /// Replacement cards drawn after claiming a bounty.
    pub bounty_draws: usize,

    /// Cards drawn by greed.
    pub greed_draws: usize,

    /// Actions handed back by insomnia.
    pub insomnia_bonus: i8,

    /// Money needed to close an active bounty early.
    pub close_bounty_cost: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_hand: 3,
            bounty_countdown: 4,
            bounty_draws: 3,
            greed_draws: 2,
            insomnia_bonus: 3,
            close_bounty_cost: 5,
        }
    }
}

impl RulesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_starting_hand(mut self, cards: usize) -> Self {
        self.starting_hand = cards;
        self
    }

    #[must_use]
    pub fn with_bounty_countdown(mut self, cycles: u8) -> Self {
        self.bounty_countdown = cycles;
        self
    }

    #[must_use]
    pub fn with_bounty_draws(mut self, cards: usize) -> Self {
        self.bounty_draws = cards;
        self
    }

    #[must_use]
    pub fn with_greed_draws(mut self, cards: usize) -> Self {
        self.greed_draws = cards;
        self
    }

    #[must_use]
    pub fn with_insomnia_bonus(mut self, actions: i8) -> Self {
        self.insomnia_bonus = actions;
        self
    }

    #[must_use]
    pub fn with_close_bounty_cost(mut self, cost: u32) -> Self {
        self.close_bounty_cost = cost;
        self
    }
}
