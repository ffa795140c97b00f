//! Core types: seats, marks, state, actions, RNG, configuration, errors.
//!
//! Everything the rules read or write lives here. The rules themselves
//! (legality, resolution, turn flow) are in `rules`.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod state;
pub mod snapshot;
#[cfg(test)]
pub(crate) mod testing;

pub use player::{CardList, Holder, InvalidMark, Knowledge, Mark, Player, PlayerId, Zone, MARK_COUNT, SEATS};
pub use rng::{GameRng, GameRngState};
pub use config::RulesConfig;
pub use error::{InvariantError, RulesError, SnapshotError};
pub use action::{Action, ActionRecord, Outcome};
pub use state::{Bounty, GameState};
pub use snapshot::Snapshot;
