//! Where every action lives in the 216-entry preference vector.
//!
//! This table is the only place slot offsets are computed. The legality
//! mask, the resolver, and [`one_hot`] all go through it.
//!
//! | family | first slot | entries |
//! |---|---|---|
//! | draw | 0 | 1 |
//! | bank | 1 | one per category (23) |
//! | unmask | 24 | head + 4 seats |
//! | trade off | 29 | head + 23 give-back categories + 4 seats × 2 zones × 3 tiers |
//! | greed | 77 | 1 |
//! | insomnia | 78 | 1 |
//! | tied up | 79 | head + 4 seats |
//! | alter ego | 84 | head + 4 seats |
//! | body swap | 89 | head + 4 first seats + 4 second seats |
//! | arson | 98 | head + 4 seats |
//! | upheaval | 103 | head + 47 cut sizes |
//! | lethal | 151 | per lethal card: head + 4 seats |
//! | claim bounty | 181 | one per icon |
//! | close bounty | 186 | one per icon |
//! | invoke bounty | 191 | per icon: head + 4 seats |

use smallvec::{smallvec, SmallVec};

use crate::cards::{Category, Tier, CATEGORY_COUNT, DECK_SIZE};
use crate::core::{Action, Mark, PlayerId, Zone, MARK_COUNT, SEATS};

/// Head slot followed by one slot per seat.
const TARGETED: usize = 1 + SEATS;

pub const DRAW: usize = 0;
pub const BANK: usize = DRAW + 1;
pub const UNMASK: usize = BANK + CATEGORY_COUNT;
pub const TRADE_OFF: usize = UNMASK + TARGETED;
pub const TRADE_OFF_GIVE: usize = TRADE_OFF + 1;
pub const TRADE_OFF_TAKE: usize = TRADE_OFF_GIVE + CATEGORY_COUNT;
pub const GREED: usize = TRADE_OFF_TAKE + SEATS * Zone::ALL.len() * Tier::ALL.len();
pub const INSOMNIA: usize = GREED + 1;
pub const TIED_UP: usize = INSOMNIA + 1;
pub const ALTER_EGO: usize = TIED_UP + TARGETED;
pub const BODY_SWAP: usize = ALTER_EGO + TARGETED;
pub const ARSON: usize = BODY_SWAP + 1 + 2 * SEATS;
pub const UPHEAVAL: usize = ARSON + TARGETED;
pub const LETHAL: usize = UPHEAVAL + 1 + MAX_CUT;
pub const CLAIM_BOUNTY: usize = LETHAL + Category::LETHAL.len() * TARGETED;
pub const CLOSE_BOUNTY: usize = CLAIM_BOUNTY + MARK_COUNT;
pub const INVOKE_BOUNTY: usize = CLOSE_BOUNTY + MARK_COUNT;

/// Length of the preference and legality vectors.
pub const PREFERENCE_LEN: usize = INVOKE_BOUNTY + MARK_COUNT * TARGETED;

/// Largest upheaval cut.
pub const MAX_CUT: usize = DECK_SIZE - 1;

/// Number of primary candidates the resolver scans.
pub const PRIMARY_LEN: usize = 1 + CATEGORY_COUNT + 9 + Category::LETHAL.len() + 3 * MARK_COUNT;

#[must_use]
pub const fn bank(category: Category) -> usize {
    BANK + category.index()
}

/// Slot of `seat` in the target block that follows `head`.
#[must_use]
pub const fn seat(head: usize, seat: PlayerId) -> usize {
    head + 1 + seat.index()
}

#[must_use]
pub const fn trade_give(category: Category) -> usize {
    TRADE_OFF_GIVE + category.index()
}

#[must_use]
pub const fn trade_take(from: PlayerId, zone: Zone, tier: Tier) -> usize {
    TRADE_OFF_TAKE + from.index() * 6 + zone.index() * 3 + tier.index()
}

#[must_use]
pub const fn body_swap_first(seat: PlayerId) -> usize {
    BODY_SWAP + 1 + seat.index()
}

#[must_use]
pub const fn body_swap_second(seat: PlayerId) -> usize {
    BODY_SWAP + 1 + SEATS + seat.index()
}

#[must_use]
pub const fn upheaval(cut: usize) -> usize {
    UPHEAVAL + cut
}

/// Head slot of the `i`-th lethal card.
#[must_use]
pub const fn lethal(i: usize) -> usize {
    LETHAL + i * TARGETED
}

#[must_use]
pub const fn claim_bounty(icon: Mark) -> usize {
    CLAIM_BOUNTY + icon.index()
}

#[must_use]
pub const fn close_bounty(icon: Mark) -> usize {
    CLOSE_BOUNTY + icon.index()
}

#[must_use]
pub const fn invoke_bounty(icon: Mark) -> usize {
    INVOKE_BOUNTY + icon.index() * TARGETED
}

/// An entry of the primary candidate list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Draw,
    Bank(Category),
    Unmask,
    TradeOff,
    Greed,
    Insomnia,
    TiedUp,
    AlterEgo,
    BodySwap,
    Arson,
    Upheaval,
    Lethal(usize),
    ClaimBounty(Mark),
    CloseBounty(Mark),
    InvokeBounty(Mark),
}

impl Family {
    /// The slot whose score ranks this family.
    #[must_use]
    pub const fn head(self) -> usize {
        match self {
            Family::Draw => DRAW,
            Family::Bank(category) => bank(category),
            Family::Unmask => UNMASK,
            Family::TradeOff => TRADE_OFF,
            Family::Greed => GREED,
            Family::Insomnia => INSOMNIA,
            Family::TiedUp => TIED_UP,
            Family::AlterEgo => ALTER_EGO,
            Family::BodySwap => BODY_SWAP,
            Family::Arson => ARSON,
            Family::Upheaval => UPHEAVAL,
            Family::Lethal(i) => lethal(i),
            Family::ClaimBounty(icon) => claim_bounty(icon),
            Family::CloseBounty(icon) => close_bounty(icon),
            Family::InvokeBounty(icon) => invoke_bounty(icon),
        }
    }
}

/// The primary candidates in resolution order. Draw comes first.
pub fn primary() -> impl Iterator<Item = Family> {
    std::iter::once(Family::Draw)
        .chain(Category::ALL.into_iter().map(Family::Bank))
        .chain([
            Family::Unmask,
            Family::TradeOff,
            Family::Greed,
            Family::Insomnia,
            Family::TiedUp,
            Family::AlterEgo,
            Family::BodySwap,
            Family::Arson,
            Family::Upheaval,
        ])
        .chain((0..Category::LETHAL.len()).map(Family::Lethal))
        .chain(Mark::all().map(Family::ClaimBounty))
        .chain(Mark::all().map(Family::CloseBounty))
        .chain(Mark::all().map(Family::InvokeBounty))
}

/// Every slot `action` occupies, head first.
///
/// `None` for actions no slot can express: a non-lethal card in
/// [`Action::Lethal`], a body swap of a seat with itself, or an upheaval
/// cut outside `1..=47`.
#[must_use]
pub fn slots(action: &Action) -> Option<SmallVec<[usize; 3]>> {
    let slots = match *action {
        Action::Draw => smallvec![DRAW],
        Action::Bank(category) => smallvec![bank(category)],
        Action::Unmask { target } => smallvec![UNMASK, seat(UNMASK, target)],
        Action::TradeOff { give, from, zone, tier } => {
            smallvec![TRADE_OFF, trade_give(give), trade_take(from, zone, tier)]
        }
        Action::Greed => smallvec![GREED],
        Action::Insomnia => smallvec![INSOMNIA],
        Action::TiedUp { target } => smallvec![TIED_UP, seat(TIED_UP, target)],
        Action::AlterEgo { target } => smallvec![ALTER_EGO, seat(ALTER_EGO, target)],
        Action::BodySwap { first, second } => {
            if first == second || first.index() >= SEATS || second.index() >= SEATS {
                return None;
            }
            smallvec![BODY_SWAP, body_swap_first(first), body_swap_second(second)]
        }
        Action::Arson { target } => smallvec![ARSON, seat(ARSON, target)],
        Action::Upheaval { cut } => {
            let cut = usize::from(cut);
            if cut == 0 || cut > MAX_CUT {
                return None;
            }
            smallvec![UPHEAVAL, upheaval(cut)]
        }
        Action::Lethal { card, target } => {
            let head = lethal(card.lethal_index()?);
            smallvec![head, seat(head, target)]
        }
        Action::ClaimBounty { icon } => smallvec![claim_bounty(icon)],
        Action::CloseBounty { icon } => smallvec![close_bounty(icon)],
        Action::InvokeBounty { icon, target } => {
            let head = invoke_bounty(icon);
            smallvec![head, seat(head, target)]
        }
    };
    if action.target().is_some_and(|t| t.index() >= SEATS) {
        return None;
    }
    Some(slots)
}

/// A preference vector that makes the resolver pick exactly `action`,
/// provided it is legal.
#[must_use]
pub fn one_hot(action: &Action) -> Vec<f32> {
    let mut preferences = vec![0.0; PREFERENCE_LEN];
    for slot in slots(action).into_iter().flatten() {
        preferences[slot] = 1.0;
    }
    preferences
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_offsets() {
        assert_eq!(BANK, 1);
        assert_eq!(UNMASK, 24);
        assert_eq!(TRADE_OFF, 29);
        assert_eq!(TRADE_OFF_TAKE, 53);
        assert_eq!(GREED, 77);
        assert_eq!(INSOMNIA, 78);
        assert_eq!(TIED_UP, 79);
        assert_eq!(ALTER_EGO, 84);
        assert_eq!(BODY_SWAP, 89);
        assert_eq!(ARSON, 98);
        assert_eq!(UPHEAVAL, 103);
        assert_eq!(LETHAL, 151);
        assert_eq!(CLAIM_BOUNTY, 181);
        assert_eq!(CLOSE_BOUNTY, 186);
        assert_eq!(INVOKE_BOUNTY, 191);
        assert_eq!(PREFERENCE_LEN, 216);
    }

    #[test]
    fn test_primary_heads() {
        let heads: Vec<usize> = primary().map(Family::head).collect();
        let mut expected: Vec<usize> = (0..=24).collect();
        expected.extend([29, 77, 78, 79, 84, 89, 98, 103]);
        expected.extend([151, 156, 161, 166, 171, 176]);
        expected.extend(181..=191);
        expected.extend([196, 201, 206, 211]);

        assert_eq!(heads.len(), PRIMARY_LEN);
        assert_eq!(heads, expected);
    }

    #[test]
    fn test_sub_slots_stay_inside_their_family() {
        let last = PlayerId::new(3);
        assert_eq!(trade_take(last, Zone::Bank, Tier::Red), GREED - 1);
        assert_eq!(body_swap_second(last), ARSON - 1);
        assert_eq!(upheaval(MAX_CUT), LETHAL - 1);
        assert_eq!(seat(lethal(5), last), CLAIM_BOUNTY - 1);
        assert_eq!(seat(invoke_bounty(Mark::new(4)), last), PREFERENCE_LEN - 1);
        assert_eq!(trade_give(Category::JokersBounty), TRADE_OFF_TAKE - 1);
    }

    #[test]
    fn test_trade_take_slots_unique() {
        let mut seen = FxHashSet::default();
        for p in PlayerId::all() {
            for zone in Zone::ALL {
                for tier in Tier::ALL {
                    let slot = trade_take(p, zone, tier);
                    assert!((TRADE_OFF_TAKE..GREED).contains(&slot));
                    assert!(seen.insert(slot));
                }
            }
        }
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_malformed_actions_have_no_slots() {
        let p = PlayerId::new(1);
        assert!(slots(&Action::BodySwap { first: p, second: p }).is_none());
        assert!(slots(&Action::Upheaval { cut: 0 }).is_none());
        assert!(slots(&Action::Upheaval { cut: 48 }).is_none());
        assert!(slots(&Action::Lethal { card: Category::Greed, target: p }).is_none());
        assert!(slots(&Action::Unmask { target: PlayerId::new(4) }).is_none());
    }

    #[test]
    fn test_one_hot() {
        let action = Action::Lethal { card: Category::GoldDigger, target: PlayerId::new(2) };
        let preferences = one_hot(&action);

        assert_eq!(preferences.len(), PREFERENCE_LEN);
        assert_eq!(preferences.iter().filter(|&&p| p == 1.0).count(), 2);
        assert_eq!(preferences[166], 1.0);
        assert_eq!(preferences[169], 1.0);
    }
}
