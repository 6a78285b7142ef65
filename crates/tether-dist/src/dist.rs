//! The closed set of action distributions behind one capability
//! surface.

use rand::{Rng, RngExt};

use tether_core::{ShapeError, Tensor};

use crate::categorical::CategoricalDist;
use crate::gaussian::{GaussianDist, TanhGaussianDist};

/// A sampled action batch, or a value to score.
///
/// The variant matches the distribution family: continuous samples are
/// per-component `f32` tensors, discrete samples are one `i32` index
/// per row.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionValue {
    /// Per-component values, shape (num_agents, action_size).
    Continuous(Tensor),
    /// One action index per agent row.
    Discrete(Vec<i32>),
}

impl ActionValue {
    /// Borrow the continuous tensor, if this is the continuous
    /// variant.
    pub fn as_continuous(&self) -> Option<&Tensor> {
        match self {
            Self::Continuous(t) => Some(t),
            Self::Discrete(_) => None,
        }
    }

    /// Borrow the discrete indices, if this is the discrete variant.
    pub fn as_discrete(&self) -> Option<&[i32]> {
        match self {
            Self::Continuous(_) => None,
            Self::Discrete(v) => Some(v),
        }
    }
}

/// One sampleable, scoreable distribution over an action component
/// set.
///
/// A closed variant set rather than an open trait hierarchy; the
/// trainer-facing surface is [`sample`](Self::sample) /
/// [`log_prob`](Self::log_prob) / [`entropy`](Self::entropy), plus
/// [`all_log_prob`](Self::all_log_prob) for the discrete family only.
#[derive(Clone, Debug)]
pub enum ActionDistribution {
    /// Unbounded diagonal Gaussian over continuous components.
    Gaussian(GaussianDist),
    /// Tanh-squashed Gaussian with support (-1, 1).
    TanhGaussian(TanhGaussianDist),
    /// One categorical branch over discrete actions.
    Categorical(CategoricalDist),
}

impl ActionDistribution {
    /// Draw one action batch from the distribution.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ActionValue {
        match self {
            Self::Gaussian(g) => ActionValue::Continuous(g.sample(rng)),
            Self::TanhGaussian(g) => ActionValue::Continuous(g.sample(rng)),
            Self::Categorical(c) => ActionValue::Discrete(c.sample(rng)),
        }
    }

    /// Log-probability of `value` under the distribution.
    ///
    /// Continuous families return per-component log-densities of
    /// shape (num_agents, action_size); the categorical family
    /// returns one log-mass per row.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ValueKindMismatch`] if the value variant
    /// does not match the distribution family, or a shape error if
    /// the dimensions disagree.
    pub fn log_prob(&self, value: &ActionValue) -> Result<Tensor, ShapeError> {
        match (self, value) {
            (Self::Gaussian(g), ActionValue::Continuous(v)) => g.log_prob(v),
            (Self::TanhGaussian(g), ActionValue::Continuous(v)) => g.log_prob(v),
            (Self::Categorical(c), ActionValue::Discrete(v)) => c.log_prob(v),
            _ => Err(ShapeError::ValueKindMismatch),
        }
    }

    /// Entropy of the distribution: per-component for the Gaussian
    /// families, per-row for the categorical family.
    pub fn entropy(&self) -> Tensor {
        match self {
            Self::Gaussian(g) => g.entropy(),
            Self::TanhGaussian(g) => g.entropy(),
            Self::Categorical(c) => c.entropy(),
        }
    }

    /// Log-probabilities of every action — the discrete-only
    /// capability. `None` for the Gaussian families.
    pub fn all_log_prob(&self) -> Option<Tensor> {
        match self {
            Self::Gaussian(_) | Self::TanhGaussian(_) => None,
            Self::Categorical(c) => Some(c.all_log_prob()),
        }
    }
}
