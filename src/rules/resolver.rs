//! Action resolution: preference vector in, one legal move applied.
//!
//! ## Selection
//!
//! Only legal slots are ever considered. The primary candidates are scanned
//! in layout order starting from draw; a later candidate replaces the best
//! so far only with a strictly greater preference. Sub-targets are picked
//! the same way within their segment. Draw therefore wins every tie and
//! any all-zero vector, and nothing illegal can be picked even when every
//! preference is negative.
//!
//! ## Application
//!
//! Power cards are discarded, then paid for, then take effect. Payment pops
//! bank cards from the back until the cost is covered; change is not given.

use crate::cards::{Card, Category, Tier};
use crate::core::{
    Action, Bounty, GameState, Holder, Mark, Outcome, PlayerId, RulesError, Zone, SEATS,
};

use super::layout::{self, Family, PREFERENCE_LEN};
use super::mask::{legality, LegalityMask};
use super::turn;

/// A selected action and what applying it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub player: PlayerId,
    pub action: Action,
    pub outcome: Outcome,
}

// =============================================================================
// Selection
// =============================================================================

/// First candidate with the strictly greatest score.
fn best<T: Copy>(candidates: impl IntoIterator<Item = T>, score: impl Fn(T) -> f32) -> Option<T> {
    let mut best: Option<(T, f32)> = None;
    for candidate in candidates {
        let value = score(candidate);
        if best.map_or(true, |(_, top)| value > top) {
            best = Some((candidate, value));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Pick the action `preferences` favour among those `mask` allows.
///
/// Panics if `preferences` does not have one entry per slot.
#[must_use]
pub fn select(mask: &LegalityMask, preferences: &[f32]) -> Action {
    assert_eq!(
        preferences.len(),
        PREFERENCE_LEN,
        "preference vector must have {PREFERENCE_LEN} entries"
    );
    let pref = |slot: usize| preferences[slot];

    let family = best(
        layout::primary().filter(|f| mask.is_legal(f.head())),
        |f| pref(f.head()),
    )
    .unwrap_or(Family::Draw);

    let seat_after = |head: usize| {
        best(
            PlayerId::all().filter(|&p| mask.is_legal(layout::seat(head, p))),
            |p| pref(layout::seat(head, p)),
        )
        .unwrap_or_else(|| panic!("slot {head} is legal without a legal target"))
    };

    match family {
        Family::Draw => Action::Draw,
        Family::Bank(category) => Action::Bank(category),
        Family::Unmask => Action::Unmask { target: seat_after(layout::UNMASK) },
        Family::TradeOff => {
            let give = best(
                Category::ALL.into_iter().filter(|&c| mask.is_legal(layout::trade_give(c))),
                |c| pref(layout::trade_give(c)),
            )
            .expect("trade off is legal without a card to give back");
            let takes = PlayerId::all().flat_map(|from| {
                Zone::ALL
                    .into_iter()
                    .flat_map(move |zone| Tier::ALL.into_iter().map(move |tier| (from, zone, tier)))
            });
            let (from, zone, tier) = best(
                takes.filter(|&(p, z, t)| mask.is_legal(layout::trade_take(p, z, t))),
                |(p, z, t)| pref(layout::trade_take(p, z, t)),
            )
            .expect("trade off is legal without a card to take");
            Action::TradeOff { give, from, zone, tier }
        }
        Family::Greed => Action::Greed,
        Family::Insomnia => Action::Insomnia,
        Family::TiedUp => Action::TiedUp { target: seat_after(layout::TIED_UP) },
        Family::AlterEgo => Action::AlterEgo { target: seat_after(layout::ALTER_EGO) },
        Family::BodySwap => {
            let first = best(
                PlayerId::all().filter(|&p| mask.is_legal(layout::body_swap_first(p))),
                |p| pref(layout::body_swap_first(p)),
            )
            .expect("body swap is legal without a first seat");
            let second = best(
                PlayerId::all()
                    .filter(|&p| p != first && mask.is_legal(layout::body_swap_second(p))),
                |p| pref(layout::body_swap_second(p)),
            )
            .expect("body swap is legal without a second seat");
            Action::BodySwap { first, second }
        }
        Family::Arson => Action::Arson { target: seat_after(layout::ARSON) },
        Family::Upheaval => {
            let cut = best(
                (1..=layout::MAX_CUT).filter(|&n| mask.is_legal(layout::upheaval(n))),
                |n| pref(layout::upheaval(n)),
            )
            .expect("upheaval is legal without a cut");
            Action::Upheaval { cut: cut as u8 }
        }
        Family::Lethal(i) => Action::Lethal {
            card: Category::LETHAL[i],
            target: seat_after(layout::lethal(i)),
        },
        Family::ClaimBounty(icon) => Action::ClaimBounty { icon },
        Family::CloseBounty(icon) => Action::CloseBounty { icon },
        Family::InvokeBounty(icon) => Action::InvokeBounty {
            icon,
            target: seat_after(layout::invoke_bounty(icon)),
        },
    }
}

/// Select with a fresh legality mask and apply the result.
pub fn resolve(state: &mut GameState, preferences: &[f32]) -> Resolution {
    let mask = legality(state);
    let action = select(&mask, preferences);
    let player = state.current;
    let outcome = apply(state, &action);
    Resolution { player, action, outcome }
}

/// Apply `action` after checking it is legal right now.
pub fn apply_checked(state: &mut GameState, action: &Action) -> Result<Outcome, RulesError> {
    if state.is_over() {
        return Err(RulesError::GameOver);
    }
    if !legality(state).permits(action) {
        return Err(RulesError::IllegalAction { action: *action, player: state.current });
    }
    Ok(apply(state, action))
}

// =============================================================================
// Application
// =============================================================================

/// Apply a legal action for the acting player.
///
/// The caller guarantees legality; the resolver and `apply_checked` do.
pub fn apply(state: &mut GameState, action: &Action) -> Outcome {
    let me = state.current;
    log::trace!("{me} plays {action}");

    let outcome = match *action {
        Action::Draw => draw(state, me),
        Action::Bank(category) => {
            let card = take(state, me, category);
            state.player_mut(me).bank.push(card);
            Outcome::Continue
        }
        Action::Unmask { target } => {
            play(state, me, Category::Unmask);
            let mark = state.player(target).mark;
            state.player_mut(me).knowledge.learn(target, mark);
            Outcome::Continue
        }
        Action::TradeOff { give, from, zone, tier } => {
            play(state, me, Category::TradeOff);
            trade(state, me, give, from, zone, tier);
            Outcome::Continue
        }
        Action::Greed => {
            play(state, me, Category::Greed);
            let count = state.rules.greed_draws;
            draw_many(state, me, count)
        }
        Action::Insomnia => {
            play(state, me, Category::Insomnia);
            state.actions -= state.rules.insomnia_bonus;
            Outcome::Continue
        }
        Action::TiedUp { target } => {
            play(state, me, Category::TiedUp);
            state.skips.push(target);
            Outcome::Continue
        }
        Action::AlterEgo { target } => {
            play(state, me, Category::AlterEgo);
            state.swap_marks(target.into(), Holder::Extra);
            Outcome::Continue
        }
        Action::BodySwap { first, second } => {
            play(state, me, Category::BodySwap);
            state.swap_marks(first.into(), second.into());
            Outcome::Continue
        }
        Action::Arson { target } => {
            play(state, me, Category::Arson);
            let bank = std::mem::take(&mut state.player_mut(target).bank);
            state.discard_pile.extend(bank);
            Outcome::Continue
        }
        Action::Upheaval { cut } => {
            play(state, me, Category::Upheaval);
            state.cut_draw_pile(usize::from(cut));
            Outcome::Continue
        }
        Action::Lethal { card, target } => {
            play(state, me, card);
            log::debug!("{me} plays {card} on {target}");
            state.eliminate(target);
            settle(state)
        }
        Action::ClaimBounty { icon } => claim_bounty(state, me, icon),
        Action::CloseBounty { icon } => {
            state
                .take_bounty(icon)
                .unwrap_or_else(|| panic!("no active bounty on {icon} to close"));
            let cost = state.rules.close_bounty_cost;
            pay(state, me, cost);
            Outcome::Continue
        }
        Action::InvokeBounty { icon, target } => {
            state
                .take_bounty(icon)
                .unwrap_or_else(|| panic!("no active bounty on {icon} to invoke"));
            turn::showdown(state, me, target, icon)
        }
    };

    if cfg!(debug_assertions) {
        state.assert_invariants();
    }
    outcome
}

/// `GameOver` if one seat is left, `Continue` otherwise.
pub(crate) fn settle(state: &GameState) -> Outcome {
    state.winner().map_or(Outcome::Continue, Outcome::GameOver)
}

/// Draw the top card. An emptied pile forces a last-draw resolution.
fn draw(state: &mut GameState, me: PlayerId) -> Outcome {
    if let Some(card) = state.draw_pile.pop_back() {
        state.player_mut(me).hand.push(card);
    }
    if state.draw_pile.is_empty() {
        turn::last_draw(state, me)
    } else {
        Outcome::Continue
    }
}

/// Draw up to `count` cards, stopping once a draw ends the turn or match.
fn draw_many(state: &mut GameState, me: PlayerId, count: usize) -> Outcome {
    for _ in 0..count {
        let outcome = draw(state, me);
        if outcome != Outcome::Continue {
            return outcome;
        }
    }
    Outcome::Continue
}

fn claim_bounty(state: &mut GameState, me: PlayerId, icon: Mark) -> Outcome {
    let card = take(state, me, Category::bounty_for(icon));
    state.discard_pile.push_back(card);
    state.bounties.push(Bounty {
        icon,
        countdown: state.rules.bounty_countdown,
    });
    log::debug!("{me} claims a bounty on {icon}");
    let count = state.rules.bounty_draws;
    draw_many(state, me, count)
}

/// Remove the first hand card of `category`.
///
/// The mask promised the card, so its absence is a corrupted state.
fn take(state: &mut GameState, me: PlayerId, category: Category) -> Card {
    state
        .player_mut(me)
        .take_from_hand(category)
        .unwrap_or_else(|| panic!("{me} has no {category} in hand"))
}

/// Discard a power card from hand and pay its cost.
fn play(state: &mut GameState, me: PlayerId, category: Category) {
    let card = take(state, me, category);
    state.discard_pile.push_back(card);
    pay(state, me, category.cost());
}

/// Pop bank cards into the discard pile until `cost` is covered.
pub(crate) fn pay(state: &mut GameState, me: PlayerId, cost: u32) {
    let mut debt = cost;
    while debt > 0 {
        let card = state
            .player_mut(me)
            .bank
            .pop()
            .unwrap_or_else(|| panic!("{me} ran out of bank paying {cost}"));
        debt = debt.saturating_sub(card.value());
        state.discard_pile.push_back(card);
    }
}

fn trade(
    state: &mut GameState,
    me: PlayerId,
    give: Category,
    from: PlayerId,
    zone: Zone,
    tier: Tier,
) {
    debug_assert!(from.index() < SEATS && from != me);
    let given = take(state, me, give);
    let target = state.player_mut(from);
    let index = target
        .tier_position(zone, tier)
        .unwrap_or_else(|| panic!("{from} has no {tier} card in {zone:?}"));
    let taken = target.zone_mut(zone).remove(index);
    target.zone_mut(zone).push(given);
    state.player_mut(me).hand.push(taken);
}
