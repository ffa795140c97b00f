//! Error types.
//!
//! The rules never fail on their own input: the legality mask keeps every
//! selected action applicable. These errors exist for the edges where
//! outside data enters (snapshots, hand-built actions) and for reporting
//! which invariant a corrupted state breaks.

use thiserror::Error;

use crate::cards::Card;
use crate::core::action::Action;
use crate::core::player::{Mark, PlayerId};

/// A broken structural invariant of a [`GameState`](super::GameState).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("{0} is in play more than once")]
    DuplicateCard(Card),

    #[error("{found} cards in play, expected 48")]
    CardCount { found: usize },

    #[error("{0} is held more than once")]
    DuplicateMark(Mark),

    #[error("unused marks remain after setup")]
    UndealtMarks,

    #[error("{0} does not sit at the table")]
    UnknownSeat(PlayerId),

    #[error("{0} is to act but has been eliminated")]
    DeadCurrentPlayer(PlayerId),
}

/// Failure to decode or accept a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot could not be decoded: {0}")]
    Decode(#[from] bincode::Error),

    #[error("snapshot describes an impossible state: {0}")]
    Invalid(#[from] InvariantError),
}

/// Rejection of an action submitted directly instead of through the resolver.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("the match is over")]
    GameOver,

    #[error("{action:?} is not legal for {player}")]
    IllegalAction { action: Action, player: PlayerId },
}
