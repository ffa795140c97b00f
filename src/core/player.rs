//! Seats, identity marks, and per-player data.
//!
//! ## PlayerId
//!
//! One of the four seats at the table, 0-based.
//!
//! ## Mark
//!
//! A secret identity in `[0, 5)`. Four marks are held by seats and the
//! fifth, the extra mark, by nobody.
//!
//! ## Knowledge
//!
//! What one player believes about who holds which mark. Rows are inline
//! arrays, so writing one row can never leak into another.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::cards::{Card, Category, Tier};

/// Number of seats at the table.
pub const SEATS: usize = 4;

/// Number of identity marks, including the extra one.
pub const MARK_COUNT: usize = 5;

/// Seat identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat to the left, wrapping around the table.
    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % SEATS as u8)
    }

    /// Iterate over all four seats.
    ///
    /// ```
    /// use hidden_marks::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[3], PlayerId::new(3));
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..SEATS as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Error for a mark outside `[0, 5)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("mark {0} is outside 0..5")]
pub struct InvalidMark(pub u8);

/// Secret identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Mark(u8);

impl Mark {
    /// Panics if `id` is not below [`MARK_COUNT`].
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < MARK_COUNT, "mark out of range");
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = Mark> {
        (0..MARK_COUNT as u8).map(Mark)
    }
}

impl TryFrom<u8> for Mark {
    type Error = InvalidMark;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        if (id as usize) < MARK_COUNT {
            Ok(Mark(id))
        } else {
            Err(InvalidMark(id))
        }
    }
}

impl From<Mark> for u8 {
    fn from(mark: Mark) -> u8 {
        mark.0
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mark {}", self.0)
    }
}

/// Whoever holds a mark: a seat, or nobody (the extra mark).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Holder {
    Seat(PlayerId),
    Extra,
}

impl Holder {
    /// Row of this holder in a knowledge matrix.
    #[must_use]
    pub const fn row(self) -> usize {
        match self {
            Holder::Seat(p) => p.index(),
            Holder::Extra => SEATS,
        }
    }
}

impl From<PlayerId> for Holder {
    fn from(player: PlayerId) -> Self {
        Holder::Seat(player)
    }
}

/// One player's belief table, `rows[holder][mark]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Knowledge {
    rows: [[bool; MARK_COUNT]; MARK_COUNT],
}

impl Knowledge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn knows(&self, holder: impl Into<Holder>, mark: Mark) -> bool {
        self.rows[holder.into().row()][mark.index()]
    }

    /// Record that `holder` has `mark`.
    pub fn learn(&mut self, holder: impl Into<Holder>, mark: Mark) {
        self.rows[holder.into().row()][mark.index()] = true;
    }

    /// Exchange what is known about two holders.
    ///
    /// Used whenever the identities behind two holders trade places.
    pub fn swap_rows(&mut self, a: impl Into<Holder>, b: impl Into<Holder>) {
        self.rows.swap(a.into().row(), b.into().row());
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = bool> + '_ {
        self.rows.iter().flatten().copied()
    }
}

/// Card zones a player owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Hand,
    Bank,
}

impl Zone {
    pub const ALL: [Zone; 2] = [Zone::Hand, Zone::Bank];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Cards kept in a hand or bank.
pub type CardList = SmallVec<[Card; 8]>;

/// One seat's cards, identity, and beliefs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub hand: CardList,
    pub bank: CardList,
    pub mark: Mark,
    pub alive: bool,
    pub knowledge: Knowledge,
}

impl Player {
    #[must_use]
    pub fn new(mark: Mark) -> Self {
        Self {
            hand: SmallVec::new(),
            bank: SmallVec::new(),
            mark,
            alive: true,
            knowledge: Knowledge::new(),
        }
    }

    /// Summed value of the banked cards.
    #[must_use]
    pub fn money(&self) -> u32 {
        self.bank.iter().map(|c| c.value()).sum()
    }

    #[must_use]
    pub fn zone(&self, zone: Zone) -> &CardList {
        match zone {
            Zone::Hand => &self.hand,
            Zone::Bank => &self.bank,
        }
    }

    pub fn zone_mut(&mut self, zone: Zone) -> &mut CardList {
        match zone {
            Zone::Hand => &mut self.hand,
            Zone::Bank => &mut self.bank,
        }
    }

    /// Cards of `tier` in `zone`.
    #[must_use]
    pub fn tier_count(&self, zone: Zone, tier: Tier) -> usize {
        self.zone(zone).iter().filter(|c| c.tier() == tier).count()
    }

    #[must_use]
    pub fn red_in_hand(&self) -> usize {
        self.tier_count(Zone::Hand, Tier::Red)
    }

    /// Copies of `category` in hand.
    #[must_use]
    pub fn category_count(&self, category: Category) -> usize {
        self.hand.iter().filter(|c| c.category() == category).count()
    }

    #[must_use]
    pub fn holds(&self, category: Category) -> bool {
        self.hand_position(category).is_some()
    }

    /// Index of the first hand card of `category`.
    #[must_use]
    pub fn hand_position(&self, category: Category) -> Option<usize> {
        self.hand.iter().position(|c| c.category() == category)
    }

    /// Index of the first card of `tier` in `zone`.
    #[must_use]
    pub fn tier_position(&self, zone: Zone, tier: Tier) -> Option<usize> {
        self.zone(zone).iter().position(|c| c.tier() == tier)
    }

    /// Take the first hand card of `category`, if any.
    pub fn take_from_hand(&mut self, category: Category) -> Option<Card> {
        let index = self.hand_position(category)?;
        Some(self.hand.remove(index))
    }

    /// Total cards held in hand and bank.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.bank.len()
    }
}
