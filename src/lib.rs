//! # hidden-marks
//!
//! Rules engine for a four-seat hidden-identity card game, built to be
//! driven by an external decision-maker.
//!
//! ## Design Principles
//!
//! 1. **Illegal Moves Are Unselectable**: A decision-maker scores every slot
//!    of a fixed 216-entry preference vector. The resolver only ever looks at
//!    slots the legality mask allows, so no score can produce an illegal move.
//!
//! 2. **Owned Randomness**: Every shuffle and guess comes from the state's own
//!    seedable `GameRng`. There are no globals; a seed replays a match.
//!
//! 3. **Cheap Branching**: Piles are persistent `im` vectors, so the planner
//!    can clone the whole state for every candidate move.
//!
//! ## Modules
//!
//! - `cards`: The 48-card catalog: ids, tiers, categories, costs, thresholds
//! - `core`: Seats, marks, knowledge, game state, actions, RNG, config, errors,
//!   snapshots
//! - `rules`: Slot layout, legality mask, action resolver, turn flow
//! - `nn`: Observation encoding and the network seam
//! - `search`: Preference policies, heuristic and lookahead planner
//! - `arena`: Full-match runner for comparing policies
//!
//! ## Example
//!
//! ```rust
//! use hidden_marks::{GameState, Opportunist, GameRng, PreferencePolicy};
//! use hidden_marks::rules::step;
//!
//! let mut state = GameState::new(42);
//! let mut policy = Opportunist::new(GameRng::new(7));
//!
//! while !state.is_over() {
//!     let preferences = policy.preferences(&state);
//!     let resolution = step(&mut state, &preferences).unwrap();
//!     if let hidden_marks::Outcome::GameOver(winner) = resolution.outcome {
//!         println!("{winner} wins");
//!     }
//! }
//! assert!(state.winner().is_some());
//! ```

pub mod cards;
pub mod core;
pub mod rules;
pub mod nn;
pub mod search;
pub mod arena;

// Re-export commonly used types
pub use crate::cards::{Card, Category, Threshold, Tier, CATEGORY_COUNT, DECK_SIZE};

pub use crate::core::{
    Action, ActionRecord, Bounty, GameRng, GameRngState, GameState, Holder, InvariantError,
    Knowledge, Mark, Outcome, Player, PlayerId, RulesConfig, RulesError, Snapshot, SnapshotError,
    Zone, MARK_COUNT, SEATS,
};

pub use crate::rules::{
    apply, apply_checked, legality, resolve, select, step, LegalityMask, Resolution,
    PREFERENCE_LEN,
};

pub use crate::nn::{EncodedState, ObservationEncoder, PolicyNetwork, StateEncoder, OBSERVATION_LEN};

pub use crate::search::{
    Heuristic, NetworkPolicy, Opportunist, Plan, Planner, PlannerConfig, PreferencePolicy,
    RandomPreferences, SearchStats,
};

pub use crate::arena::{play_match, Arena, ArenaConfig, ArenaReport, MatchResult};
