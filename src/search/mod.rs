//! Decision-making on top of the rules.
//!
//! ## Overview
//!
//! - **Policies**: anything implementing `PreferencePolicy` can drive a seat
//!   (`RandomPreferences`, `Opportunist`, `NetworkPolicy`, `Planner`)
//! - **Lookahead**: `Planner` branches over the searching seat's own draw,
//!   bank and lethal moves and plays opponents out with a policy
//! - **Evaluation**: `Heuristic` scores leaves with configurable weights
//!
//! ## Usage
//!
//! ```rust
//! use hidden_marks::core::GameState;
//! use hidden_marks::rules::step;
//! use hidden_marks::search::{Planner, PlannerConfig, PreferencePolicy};
//!
//! let mut state = GameState::new(7);
//! let mut planner = Planner::new(PlannerConfig::default().with_depth(2));
//!
//! if let Some(plan) = planner.plan(&state) {
//!     println!("best: {} scoring {}", plan.action, plan.score);
//! }
//!
//! // The planner is also a policy: it replays its own plan.
//! let preferences = planner.preferences(&state);
//! step(&mut state, &preferences);
//! ```

pub mod config;
pub mod heuristic;
pub mod planner;
pub mod policy;
pub mod stats;

pub use config::PlannerConfig;
pub use heuristic::Heuristic;
pub use planner::{candidates, Plan, Planner};
pub use policy::{lethal_plays, NetworkPolicy, Opportunist, PreferencePolicy, RandomPreferences};
pub use stats::SearchStats;
