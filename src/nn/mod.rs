//! Network integration.
//!
//! The engine talks to an external decision-maker through two vectors: an
//! 804-entry observation going out and a 216-entry preference vector coming
//! back.
//!
//! - **Traits**: `PolicyNetwork`
//! - **Encoding**: `StateEncoder` trait and `ObservationEncoder`
//! - **Baseline**: `UniformPolicy` for testing
//!
//! ## Usage
//!
//! ```rust
//! use hidden_marks::core::GameState;
//! use hidden_marks::nn::{ObservationEncoder, PolicyNetwork, StateEncoder, UniformPolicy};
//! use hidden_marks::rules::step;
//!
//! let mut state = GameState::new(42);
//! let encoder = ObservationEncoder::new();
//!
//! let encoded = encoder.encode(&state, state.current);
//! let preferences = UniformPolicy.predict(&encoded);
//! let resolution = step(&mut state, &preferences).unwrap();
//! ```

pub mod encoder;
pub mod traits;

pub use encoder::{ObservationEncoder, StateEncoder, OBSERVATION_LEN, TIER_THERMOMETER};
pub use traits::{EncodedState, PolicyNetwork, UniformPolicy};
