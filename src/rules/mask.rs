//! Legality mask: which slots of the preference vector the acting player
//! may currently pick.
//!
//! A power is legal when the acting player holds its card, can pay for it,
//! and has at least one legal sub-target. Sub-target slots are only set for
//! powers whose card and money gates pass, so a head slot of 1 always comes
//! with at least one target slot of 1.

use smallvec::SmallVec;

use crate::cards::{Category, Tier};
use crate::core::{Action, GameState, Mark, Player, PlayerId, Zone};

use super::layout::{self, PREFERENCE_LEN};

/// One 0/1 entry per preference slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalityMask {
    bits: [u8; PREFERENCE_LEN],
}

impl LegalityMask {
    /// A mask with nothing legal.
    #[must_use]
    pub fn empty() -> Self {
        Self { bits: [0; PREFERENCE_LEN] }
    }

    #[must_use]
    pub fn is_legal(&self, slot: usize) -> bool {
        self.bits.get(slot).is_some_and(|&b| b == 1)
    }

    /// Whether every slot `action` needs is legal.
    #[must_use]
    pub fn permits(&self, action: &Action) -> bool {
        layout::slots(action).is_some_and(|slots| slots.iter().all(|&s| self.is_legal(s)))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    /// The mask as floats, for a learning loop.
    #[must_use]
    pub fn to_f32(&self) -> Vec<f32> {
        self.bits.iter().map(|&b| f32::from(b)).collect()
    }

    /// Number of legal slots.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }

    fn set(&mut self, slot: usize) {
        self.bits[slot] = 1;
    }

    /// Open the given target seats after `head`, and `head` itself if any.
    fn targets(&mut self, head: usize, targets: impl IntoIterator<Item = PlayerId>) {
        let mut any = false;
        for target in targets {
            self.set(layout::seat(head, target));
            any = true;
        }
        if any {
            self.set(head);
        }
    }
}

/// Compute the legality mask for `state.current`.
///
/// All zero when the match is over or the acting seat is eliminated.
/// Otherwise draw is always legal.
#[must_use]
pub fn legality(state: &GameState) -> LegalityMask {
    let mut mask = LegalityMask::empty();
    let me = state.current;
    let player = state.player(me);
    if state.is_over() || !player.alive {
        return mask;
    }

    mask.set(layout::DRAW);
    for category in Category::ALL {
        if player.holds(category) {
            mask.set(layout::bank(category));
        }
    }

    let money = player.money();
    let playable = |category: Category| player.holds(category) && money >= category.cost();
    let opponents: SmallVec<[PlayerId; 4]> = state.opponents(me).collect();

    if playable(Category::Unmask) {
        mask.targets(layout::UNMASK, opponents.iter().copied());
    }
    if playable(Category::TradeOff) {
        trade_off(&mut mask, state, player, &opponents);
    }
    if playable(Category::Greed) {
        mask.set(layout::GREED);
    }
    if playable(Category::Insomnia) {
        mask.set(layout::INSOMNIA);
    }
    if playable(Category::TiedUp) {
        mask.targets(layout::TIED_UP, opponents.iter().copied());
    }
    if playable(Category::AlterEgo) {
        mask.targets(layout::ALTER_EGO, state.alive_players());
    }
    if playable(Category::BodySwap) && state.alive_count() >= 2 {
        for seat in state.alive_players() {
            mask.set(layout::body_swap_first(seat));
            mask.set(layout::body_swap_second(seat));
        }
        mask.set(layout::BODY_SWAP);
    }
    if playable(Category::Arson) {
        let banked = opponents.iter().copied().filter(|&t| !state.player(t).bank.is_empty());
        mask.targets(layout::ARSON, banked);
    }
    if playable(Category::Upheaval) {
        let pile = state.draw_pile.len();
        for cut in 1..pile.min(layout::MAX_CUT + 1) {
            mask.set(layout::upheaval(cut));
        }
        if pile >= 2 {
            mask.set(layout::UPHEAVAL);
        }
    }

    for (i, card) in Category::LETHAL.into_iter().enumerate() {
        if !playable(card) {
            continue;
        }
        if let Some(threshold) = card.lethal_threshold() {
            let victims = opponents
                .iter()
                .copied()
                .filter(|&t| threshold.met_by(state.player(t)));
            mask.targets(layout::lethal(i), victims);
        }
    }

    for icon in Mark::all() {
        let active = state.bounty(icon);
        if active.is_none() && player.holds(Category::bounty_for(icon)) {
            mask.set(layout::claim_bounty(icon));
        }
        if active.is_some() && money >= state.rules.close_bounty_cost {
            mask.set(layout::close_bounty(icon));
        }
        if active.is_some_and(|b| b.is_ready()) {
            mask.targets(layout::invoke_bounty(icon), opponents.iter().copied());
        }
    }

    mask
}

fn trade_off(mask: &mut LegalityMask, state: &GameState, player: &Player, opponents: &[PlayerId]) {
    // The trade-off card being played cannot be given back.
    let mut can_give = false;
    for category in Category::ALL {
        let played = usize::from(category == Category::TradeOff);
        if player.category_count(category) > played {
            mask.set(layout::trade_give(category));
            can_give = true;
        }
    }

    let mut can_take = false;
    for &from in opponents {
        let target = state.player(from);
        for zone in Zone::ALL {
            for tier in Tier::ALL {
                if target.tier_count(zone, tier) > 0 {
                    mask.set(layout::trade_take(from, zone, tier));
                    can_take = true;
                }
            }
        }
    }

    if can_give && can_take {
        mask.set(layout::TRADE_OFF);
    }
}
