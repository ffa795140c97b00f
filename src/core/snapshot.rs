//! Snapshot and restore of a full game state.
//!
//! A [`Snapshot`] is a plain, order-preserving record of every field of a
//! [`GameState`], including the RNG position. It is what a persistence
//! layer stores. Card and mark ids are range-checked while decoding, and
//! [`GameState::restore`] refuses snapshots that break an invariant.
//!
//! ```
//! use hidden_marks::core::{GameState, Snapshot};
//!
//! let state = GameState::new(42);
//! let bytes = state.snapshot().to_bytes().unwrap();
//!
//! let restored = GameState::restore(&Snapshot::from_bytes(&bytes).unwrap()).unwrap();
//! assert_eq!(restored.snapshot(), state.snapshot());
//! ```

use serde::{Deserialize, Serialize};

use super::config::RulesConfig;
use super::error::SnapshotError;
use super::player::{Mark, Player, PlayerId, SEATS};
use super::rng::{GameRng, GameRngState};
use super::state::{Bounty, GameState};
use crate::cards::Card;

/// Serializable copy of a [`GameState`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Bottom first.
    pub draw_pile: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub unused_marks: Vec<Mark>,
    pub extra_mark: Mark,
    pub bounties: Vec<Bounty>,
    pub skips: Vec<PlayerId>,
    pub current: PlayerId,
    pub actions: i8,
    pub players: [Player; SEATS],
    pub rules: RulesConfig,
    pub rng: GameRngState,
}

impl Snapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by [`Snapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl GameState {
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            draw_pile: self.draw_pile.iter().copied().collect(),
            discard_pile: self.discard_pile.iter().copied().collect(),
            unused_marks: self.unused_marks.to_vec(),
            extra_mark: self.extra_mark,
            bounties: self.bounties.clone(),
            skips: self.skips.clone(),
            current: self.current,
            actions: self.actions,
            players: self.players.clone(),
            rules: self.rules,
            rng: self.rng.state(),
        }
    }

    /// Rebuild a state from a snapshot, rejecting impossible ones.
    pub fn restore(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        let state = Self {
            draw_pile: snapshot.draw_pile.iter().copied().collect(),
            discard_pile: snapshot.discard_pile.iter().copied().collect(),
            players: snapshot.players.clone(),
            unused_marks: snapshot.unused_marks.iter().copied().collect(),
            extra_mark: snapshot.extra_mark,
            bounties: snapshot.bounties.clone(),
            skips: snapshot.skips.clone(),
            current: snapshot.current,
            actions: snapshot.actions,
            rules: snapshot.rules,
            rng: GameRng::from_state(&snapshot.rng),
        };
        state.check_invariants()?;
        Ok(state)
    }
}
