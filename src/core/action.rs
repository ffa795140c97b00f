//! Actions: one tagged variant per action family.
//!
//! Sub-targets are typed fields, so an `Action` always names a concrete
//! move. Where each variant lives in the flat preference vector is decided
//! in one place, `rules::layout`.

use serde::{Deserialize, Serialize};

use crate::cards::{Category, Tier};

use super::player::{Mark, PlayerId, Zone};

/// A concrete move of the acting player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Take the top card of the draw pile.
    Draw,

    /// Move the first hand card of a category into the bank.
    Bank(Category),

    /// Learn the target's mark.
    Unmask { target: PlayerId },

    /// Take a card of `tier` from the target's `zone`, giving back a hand
    /// card of category `give` into that same zone.
    TradeOff {
        give: Category,
        from: PlayerId,
        zone: Zone,
        tier: Tier,
    },

    Greed,

    Insomnia,

    /// The target loses their next turn.
    TiedUp { target: PlayerId },

    /// Swap the target's mark with the extra mark.
    AlterEgo { target: PlayerId },

    BodySwap { first: PlayerId, second: PlayerId },

    /// Discard the target's bank.
    Arson { target: PlayerId },

    /// Move the top `cut` cards of the draw pile to the bottom.
    Upheaval { cut: u8 },

    /// Eliminate the target with one of the lethal cards.
    Lethal { card: Category, target: PlayerId },

    ClaimBounty { icon: Mark },

    CloseBounty { icon: Mark },

    /// Bet that the target holds the mark on the bounty's icon.
    InvokeBounty { icon: Mark, target: PlayerId },
}

impl Action {
    /// The single seat this action aims at, if any.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        match *self {
            Action::Unmask { target }
            | Action::TiedUp { target }
            | Action::AlterEgo { target }
            | Action::Arson { target }
            | Action::Lethal { target, .. }
            | Action::InvokeBounty { target, .. } => Some(target),
            Action::TradeOff { from, .. } => Some(from),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_lethal(&self) -> bool {
        matches!(self, Action::Lethal { .. })
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Action::Draw => write!(f, "draw"),
            Action::Bank(category) => write!(f, "bank {category}"),
            Action::TradeOff { give, from, zone, tier } => {
                write!(f, "trade off {give} for a {tier} card from {from}'s {zone:?}")
            }
            Action::BodySwap { first, second } => write!(f, "body swap {first} with {second}"),
            Action::Upheaval { cut } => write!(f, "upheaval cutting {cut} cards"),
            Action::Lethal { card, target } => write!(f, "{card} on {target}"),
            Action::ClaimBounty { icon } => write!(f, "claim bounty on {icon}"),
            Action::CloseBounty { icon } => write!(f, "close bounty on {icon}"),
            Action::InvokeBounty { icon, target } => {
                write!(f, "invoke bounty on {icon} against {target}")
            }
            Action::Greed => write!(f, "greed"),
            Action::Insomnia => write!(f, "insomnia"),
            Action::Unmask { target } => write!(f, "unmask {target}"),
            Action::TiedUp { target } => write!(f, "tie up {target}"),
            Action::AlterEgo { target } => write!(f, "alter ego on {target}"),
            Action::Arson { target } => write!(f, "arson on {target}"),
        }
    }
}

/// What an applied action did to the flow of the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The action counts against the acting player's budget.
    Continue,
    /// The acting player was eliminated and the turn has already moved on.
    TurnPassed,
    /// One seat is left standing.
    GameOver(PlayerId),
}

/// History entry for a resolved action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    pub outcome: Outcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target() {
        let lethal = Action::Lethal { card: Category::Bloodshot, target: PlayerId::new(3) };
        assert_eq!(lethal.target(), Some(PlayerId::new(3)));
        assert!(lethal.is_lethal());
        assert_eq!(Action::Greed.target(), None);
    }

    #[test]
    fn test_record_serialization() {
        let record = ActionRecord {
            player: PlayerId::new(1),
            action: Action::Upheaval { cut: 4 },
            outcome: Outcome::Continue,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
