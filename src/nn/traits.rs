//! Network traits for preference prediction.
//!
//! These traits define the interface between the rules engine and an
//! external decision-maker. The engine never trains or loads a model; it
//! hands over an [`EncodedState`] and resolves whatever scores come back.

use serde::{Deserialize, Serialize};

use crate::rules::layout::PREFERENCE_LEN;

/// Encoded game state as a flat tensor for network input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor.
    pub shape: Vec<usize>,
}

impl EncodedState {
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            tensor: vec![0.0; size],
            shape,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }
}

/// Scores every slot of the preference vector.
///
/// Any real values are accepted: the resolver only compares them, and only
/// among legal slots.
pub trait PolicyNetwork: Send + Sync {
    /// One score per slot, `PREFERENCE_LEN` long.
    fn predict(&self, encoded: &EncodedState) -> Vec<f32>;

    /// Batch prediction for multiple states.
    fn predict_batch(&self, encoded: &[EncodedState]) -> Vec<Vec<f32>> {
        encoded.iter().map(|e| self.predict(e)).collect()
    }
}

/// Flat scores over every slot (baseline for testing).
///
/// Every tie goes to the first legal slot, so this always draws.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformPolicy;

impl PolicyNetwork for UniformPolicy {
    fn predict(&self, _encoded: &EncodedState) -> Vec<f32> {
        vec![1.0 / PREFERENCE_LEN as f32; PREFERENCE_LEN]
    }
}
