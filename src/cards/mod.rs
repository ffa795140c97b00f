//! Card catalog: the 48 card ids and what they mean.
//!
//! ## Key Types
//!
//! - `Card`: a card id, validated on construction
//! - `Tier`: value class (white 1, blue 2, red 3)
//! - `Category`: the power printed on the card
//! - `Threshold`: the target condition of a lethal card

pub mod catalog;

pub use catalog::{
    Card, Category, InvalidCard, Threshold, Tier, CATEGORY_COUNT, CATEGORY_STARTS, DECK_SIZE,
};
