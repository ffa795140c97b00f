//! The rules: which actions are legal, what they do, and whose turn it is.
//!
//! A decision-maker never builds an [`Action`](crate::core::Action)
//! directly. It scores every slot of the 216-entry preference vector, and
//! the resolver picks the best legal action from those scores:
//!
//! 1. [`legality`] builds the mask for the acting seat.
//! 2. [`select`] reads the mask and preferences and returns one action.
//! 3. [`apply`] performs it and reports an [`Outcome`](crate::core::Outcome).
//! 4. [`finish_action`] ticks bounties and passes the turn when due.
//!
//! [`step`] runs all four.

pub mod layout;
pub mod mask;
pub mod resolver;
pub mod turn;

pub use layout::{one_hot, Family, PREFERENCE_LEN, PRIMARY_LEN};
pub use mask::{legality, LegalityMask};
pub use resolver::{apply, apply_checked, resolve, select, Resolution};
pub use turn::{finish_action, last_draw, pass_turn, showdown, step, ACTIONS_PER_TURN};
