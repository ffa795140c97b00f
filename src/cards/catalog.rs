//! The static 48-card catalog.
//!
//! A card is nothing but an id in `[0, 48)`. Two independent range
//! partitions give it meaning:
//!
//! - **Tier**: ids `0..22` are white (worth 1), `22..38` blue (worth 2),
//!   `38..48` red (worth 3).
//! - **Category**: the power the card grants, from [`CATEGORY_STARTS`].
//!
//! ```
//! use hidden_marks::cards::{Card, Category, Tier};
//!
//! let card = Card::new(42);
//! assert_eq!(card.tier(), Tier::Red);
//! assert_eq!(card.category(), Category::Bloodshot);
//! assert_eq!(Category::Snub.cards(), 22..26);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

use crate::core::player::{Mark, Player};

/// Number of cards in the deck.
pub const DECK_SIZE: usize = 48;

/// Number of distinct card categories.
pub const CATEGORY_COUNT: usize = 23;

/// First card id of each category, in [`Category::ALL`] order.
///
/// Category `i` owns ids `CATEGORY_STARTS[i]..CATEGORY_STARTS[i + 1]`;
/// the last one runs to the end of the deck.
pub const CATEGORY_STARTS: [u8; CATEGORY_COUNT] = [
    0, 4, 8, 10, 12, 14, 16, 18, 20, 22, 26, 28, 30, 33, 36, 38, 40, 42, 43, 44, 45, 46, 47,
];

/// Error for an id outside the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("card id {0} is outside the 48-card deck")]
pub struct InvalidCard(pub u8);

/// A single card of the deck.
///
/// Tier, value and category are derived from the id on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Create a card from its id.
    ///
    /// Panics if `id` is not below [`DECK_SIZE`].
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < DECK_SIZE, "card id out of range");
        Self(id)
    }

    /// Create a card, or `None` if the id is out of range.
    #[must_use]
    pub const fn try_new(id: u8) -> Option<Self> {
        if (id as usize) < DECK_SIZE {
            Some(Self(id))
        } else {
            None
        }
    }

    /// The raw id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// The id as an index into per-card tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every card of the deck in id order.
    pub fn deck() -> impl Iterator<Item = Card> {
        (0..DECK_SIZE as u8).map(Card)
    }

    #[must_use]
    pub const fn tier(self) -> Tier {
        match self.0 {
            0..=21 => Tier::White,
            22..=37 => Tier::Blue,
            _ => Tier::Red,
        }
    }

    /// Money this card is worth in a bank.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.tier().value()
    }

    #[must_use]
    pub fn category(self) -> Category {
        let slot = CATEGORY_STARTS.partition_point(|&start| start <= self.0) - 1;
        Category::ALL[slot]
    }
}

impl TryFrom<u8> for Card {
    type Error = InvalidCard;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Card::try_new(id).ok_or(InvalidCard(id))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} ({})", self.0, self.category(), self.tier())
    }
}

/// Value class of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// Tier A, worth 1.
    White,
    /// Tier B, worth 2.
    Blue,
    /// Tier C, worth 3. "Red" cards for red-handed and bloodshot.
    Red,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::White, Tier::Blue, Tier::Red];

    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Tier::White => 1,
            Tier::Blue => 2,
            Tier::Red => 3,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tier::White => "white",
            Tier::Blue => "blue",
            Tier::Red => "red",
        };
        f.write_str(name)
    }
}

/// The power a card grants.
///
/// Variants are declared in id order, so `category as usize` indexes
/// [`CATEGORY_STARTS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    Unmask,
    TradeOff,
    Greed,
    BlindSpot,
    Revenge,
    Insomnia,
    TiedUp,
    AlterEgo,
    BodySwap,
    Snub,
    Arson,
    Upheaval,
    Counterfeit,
    HeavyHand,
    RedHanded,
    GoldDigger,
    Backfire,
    Bloodshot,
    ClubsBounty,
    HeartsBounty,
    SpadesBounty,
    DiamondsBounty,
    JokersBounty,
}

impl Category {
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Unmask,
        Category::TradeOff,
        Category::Greed,
        Category::BlindSpot,
        Category::Revenge,
        Category::Insomnia,
        Category::TiedUp,
        Category::AlterEgo,
        Category::BodySwap,
        Category::Snub,
        Category::Arson,
        Category::Upheaval,
        Category::Counterfeit,
        Category::HeavyHand,
        Category::RedHanded,
        Category::GoldDigger,
        Category::Backfire,
        Category::Bloodshot,
        Category::ClubsBounty,
        Category::HeartsBounty,
        Category::SpadesBounty,
        Category::DiamondsBounty,
        Category::JokersBounty,
    ];

    /// The six lethal cards, in catalog order.
    pub const LETHAL: [Category; 6] = [
        Category::Counterfeit,
        Category::HeavyHand,
        Category::RedHanded,
        Category::GoldDigger,
        Category::Backfire,
        Category::Bloodshot,
    ];

    /// Bounty cards indexed by the mark their icon guesses.
    pub const BOUNTIES: [Category; 5] = [
        Category::ClubsBounty,
        Category::HeartsBounty,
        Category::SpadesBounty,
        Category::DiamondsBounty,
        Category::JokersBounty,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Category> {
        Category::ALL.get(index).copied()
    }

    /// Card ids belonging to this category.
    #[must_use]
    pub const fn cards(self) -> Range<u8> {
        let i = self.index();
        let end = if i + 1 < CATEGORY_COUNT {
            CATEGORY_STARTS[i + 1]
        } else {
            DECK_SIZE as u8
        };
        CATEGORY_STARTS[i]..end
    }

    /// Number of copies of this category in the deck.
    #[must_use]
    pub const fn len(self) -> usize {
        let range = self.cards();
        (range.end - range.start) as usize
    }

    /// Money needed to play the card.
    ///
    /// Reactive cards carry their printed cost but can only be banked.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Category::Greed => 0,
            Category::BlindSpot | Category::Revenge | Category::AlterEgo => 2,
            Category::Unmask
            | Category::TradeOff
            | Category::Insomnia
            | Category::TiedUp
            | Category::BodySwap => 3,
            Category::Snub | Category::Arson | Category::Upheaval => 5,
            Category::Counterfeit
            | Category::HeavyHand
            | Category::RedHanded
            | Category::GoldDigger
            | Category::Backfire
            | Category::Bloodshot => 10,
            Category::ClubsBounty
            | Category::HeartsBounty
            | Category::SpadesBounty
            | Category::DiamondsBounty
            | Category::JokersBounty => 0,
        }
    }

    /// Position among [`Category::LETHAL`], if this is a lethal card.
    #[must_use]
    pub fn lethal_index(self) -> Option<usize> {
        Category::LETHAL.iter().position(|&c| c == self)
    }

    #[must_use]
    pub fn is_lethal(self) -> bool {
        self.lethal_index().is_some()
    }

    /// Condition a target must meet before this lethal card can hit them.
    #[must_use]
    pub const fn lethal_threshold(self) -> Option<Threshold> {
        match self {
            Category::Counterfeit => Some(Threshold::BankAtLeast(6)),
            Category::HeavyHand => Some(Threshold::HandAtLeast(6)),
            Category::RedHanded => Some(Threshold::RedInHandAtLeast(2)),
            Category::GoldDigger => Some(Threshold::BankAtLeast(5)),
            Category::Backfire => Some(Threshold::HandAtLeast(5)),
            Category::Bloodshot => Some(Threshold::RedInHandAtLeast(1)),
            _ => None,
        }
    }

    /// The mark a bounty card's icon guesses.
    #[must_use]
    pub fn bounty_icon(self) -> Option<Mark> {
        Category::BOUNTIES
            .iter()
            .position(|&c| c == self)
            .map(|i| Mark::new(i as u8))
    }

    /// The bounty card whose icon guesses `mark`.
    #[must_use]
    pub const fn bounty_for(mark: Mark) -> Category {
        Category::BOUNTIES[mark.index()]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Unmask => "unmask",
            Category::TradeOff => "trade off",
            Category::Greed => "greed",
            Category::BlindSpot => "blind spot",
            Category::Revenge => "revenge",
            Category::Insomnia => "insomnia",
            Category::TiedUp => "tied up",
            Category::AlterEgo => "alter ego",
            Category::BodySwap => "body swap",
            Category::Snub => "snub",
            Category::Arson => "arson",
            Category::Upheaval => "upheaval",
            Category::Counterfeit => "counterfeit",
            Category::HeavyHand => "heavy hand",
            Category::RedHanded => "red handed",
            Category::GoldDigger => "gold digger",
            Category::Backfire => "backfire",
            Category::Bloodshot => "bloodshot",
            Category::ClubsBounty => "clubs bounty",
            Category::HeartsBounty => "hearts bounty",
            Category::SpadesBounty => "spades bounty",
            Category::DiamondsBounty => "diamonds bounty",
            Category::JokersBounty => "jokers bounty",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Size condition a lethal card checks on its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threshold {
    BankAtLeast(usize),
    HandAtLeast(usize),
    RedInHandAtLeast(usize),
}

impl Threshold {
    #[must_use]
    pub fn met_by(self, target: &Player) -> bool {
        match self {
            Threshold::BankAtLeast(n) => target.bank.len() >= n,
            Threshold::HandAtLeast(n) => target.hand.len() >= n,
            Threshold::RedInHandAtLeast(n) => target.red_in_hand() >= n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Card::new(0).tier(), Tier::White);
        assert_eq!(Card::new(21).tier(), Tier::White);
        assert_eq!(Card::new(22).tier(), Tier::Blue);
        assert_eq!(Card::new(37).tier(), Tier::Blue);
        assert_eq!(Card::new(38).tier(), Tier::Red);
        assert_eq!(Card::new(47).tier(), Tier::Red);

        let total: u32 = Card::deck().map(Card::value).sum();
        assert_eq!(total, 22 + 16 * 2 + 10 * 3);
    }

    #[test]
    fn test_category_table_bit_for_bit() {
        use Category::*;
        #[rustfmt::skip]
        let expected = [
            Unmask, Unmask, Unmask, Unmask,
            TradeOff, TradeOff, TradeOff, TradeOff,
            Greed, Greed,
            BlindSpot, BlindSpot,
            Revenge, Revenge,
            Insomnia, Insomnia,
            TiedUp, TiedUp,
            AlterEgo, AlterEgo,
            BodySwap, BodySwap,
            Snub, Snub, Snub, Snub,
            Arson, Arson,
            Upheaval, Upheaval,
            Counterfeit, Counterfeit, Counterfeit,
            HeavyHand, HeavyHand, HeavyHand,
            RedHanded, RedHanded,
            GoldDigger, GoldDigger,
            Backfire, Backfire,
            Bloodshot,
            ClubsBounty, HeartsBounty, SpadesBounty, DiamondsBounty, JokersBounty,
        ];

        assert_eq!(expected.len(), DECK_SIZE);
        for card in Card::deck() {
            assert_eq!(card.category(), expected[card.index()], "wrong category for {}", card.id());
        }
    }

    #[test]
    fn test_category_ranges_partition_deck() {
        let total: usize = Category::ALL.iter().map(|c| c.len()).sum();
        assert_eq!(total, DECK_SIZE);

        for category in Category::ALL {
            for id in category.cards() {
                assert_eq!(Card::new(id).category(), category);
            }
        }
        assert_eq!(Category::JokersBounty.cards(), 47..48);
    }

    #[test]
    fn test_category_index_round_trip() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
            assert_eq!(Category::from_index(i), Some(*category));
        }
        assert_eq!(Category::from_index(CATEGORY_COUNT), None);
    }

    #[test]
    fn test_costs() {
        assert_eq!(Category::Greed.cost(), 0);
        assert_eq!(Category::AlterEgo.cost(), 2);
        assert_eq!(Category::Unmask.cost(), 3);
        assert_eq!(Category::Arson.cost(), 5);
        for lethal in Category::LETHAL {
            assert_eq!(lethal.cost(), 10);
            assert!(lethal.lethal_threshold().is_some());
        }
        assert_eq!(Category::Unmask.lethal_threshold(), None);
    }

    #[test]
    fn test_bounty_icons() {
        for (i, bounty) in Category::BOUNTIES.iter().enumerate() {
            let mark = bounty.bounty_icon().unwrap();
            assert_eq!(mark.index(), i);
            assert_eq!(Category::bounty_for(mark), *bounty);
            assert_eq!(bounty.len(), 1);
        }
        assert_eq!(Category::Bloodshot.bounty_icon(), None);
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(Card::try_new(47).is_some());
        assert!(Card::try_new(48).is_none());
        assert_eq!(Card::try_from(200), Err(InvalidCard(200)));
    }

    #[test]
    fn test_card_serde_validates_id() {
        let json = serde_json::to_string(&Card::new(30)).unwrap();
        assert_eq!(json, "30");
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Card::new(30));

        assert!(serde_json::from_str::<Card>("48").is_err());
    }
}
