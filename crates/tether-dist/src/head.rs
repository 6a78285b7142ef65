//! Distribution parameter heads: hidden features in, distributions
//! out.

use rand::{Rng, RngExt};

use tether_core::numeric::{softmax_in_place, EPSILON};
use tether_core::{ShapeError, Tensor};

use crate::categorical::CategoricalDist;
use crate::dist::ActionDistribution;
use crate::gaussian::{GaussianDist, TanhGaussianDist};
use crate::linear::Linear;

/// Lower clamp for conditional log-sigma before exponentiating.
pub const LOG_SIGMA_MIN: f32 = -20.0;
/// Upper clamp for conditional log-sigma before exponentiating.
pub const LOG_SIGMA_MAX: f32 = 2.0;

/// How the continuous head produces its standard deviation.
#[derive(Clone, Debug)]
enum SigmaParam {
    /// A second projection of the hidden features, clamped to
    /// [`LOG_SIGMA_MIN`, `LOG_SIGMA_MAX`] before `exp`.
    Conditional(Linear),
    /// A learned global log-sigma vector broadcast across rows.
    /// Starts at zero (std = 1) and is not clamped.
    Global(Vec<f32>),
}

/// Continuous parameter head: hidden features to a diagonal Gaussian,
/// optionally tanh-squashed.
#[derive(Clone, Debug)]
pub struct GaussianHead {
    mu: Linear,
    sigma: SigmaParam,
    squash: bool,
}

impl GaussianHead {
    /// Build a head for `num_outputs` continuous components.
    ///
    /// `conditional_sigma` selects whether std is a function of the
    /// input (a second projection) or a single learned global
    /// parameter; `tanh_squash` selects the squashed family.
    pub fn new<R: Rng>(
        hidden_size: usize,
        num_outputs: usize,
        conditional_sigma: bool,
        tanh_squash: bool,
        rng: &mut R,
    ) -> Self {
        let mu = Linear::new(hidden_size, num_outputs, rng);
        let sigma = if conditional_sigma {
            SigmaParam::Conditional(Linear::new(hidden_size, num_outputs, rng))
        } else {
            SigmaParam::Global(vec![0.0; num_outputs])
        };
        Self {
            mu,
            sigma,
            squash: tanh_squash,
        }
    }

    /// Whether this head produces the tanh-squashed family.
    pub fn is_squashed(&self) -> bool {
        self.squash
    }

    /// Project hidden features into a Gaussian (or tanh-squashed
    /// Gaussian) distribution.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::WidthMismatch`] if the hidden row width
    /// does not match the head's input size.
    pub fn forward(&self, hidden: &Tensor) -> Result<ActionDistribution, ShapeError> {
        let mean = self.mu.forward(hidden)?;
        let num_outputs = self.mu.out_features();
        let std = match &self.sigma {
            SigmaParam::Conditional(layer) => {
                let mut log_sigma = layer.forward(hidden)?;
                for v in log_sigma.data_mut() {
                    *v = v.clamp(LOG_SIGMA_MIN, LOG_SIGMA_MAX).exp();
                }
                log_sigma
            }
            SigmaParam::Global(log_sigma) => {
                let mut out = Tensor::zeros([hidden.rows(), num_outputs].into_iter().collect());
                for row in out.data_mut().chunks_mut(num_outputs.max(1)) {
                    for (v, ls) in row.iter_mut().zip(log_sigma) {
                        *v = ls.exp();
                    }
                }
                out
            }
        };
        if self.squash {
            Ok(ActionDistribution::TanhGaussian(TanhGaussianDist::new(
                mean, std,
            )?))
        } else {
            Ok(ActionDistribution::Gaussian(GaussianDist::new(mean, std)?))
        }
    }
}

/// Discrete parameter head: hidden features plus a flat legality mask
/// to one masked, renormalized categorical distribution per branch.
///
/// Owns one independent projection per branch. The mask uses the
/// distribution-engine convention — `1.0` = allowed, `0.0` =
/// disallowed — which is the *inverse* of the step-batch convention;
/// convert with [`allowed_mask`](crate::allowed_mask).
#[derive(Clone, Debug)]
pub struct MultiCategoricalHead {
    branch_sizes: Vec<usize>,
    branches: Vec<Linear>,
}

impl MultiCategoricalHead {
    /// Build a head with one projection per branch.
    pub fn new<R: Rng>(hidden_size: usize, branch_sizes: &[usize], rng: &mut R) -> Self {
        let branches = branch_sizes
            .iter()
            .map(|&size| Linear::new(hidden_size, size, rng))
            .collect();
        Self {
            branch_sizes: branch_sizes.to_vec(),
            branches,
        }
    }

    /// Per-branch cardinalities, in branch order.
    pub fn branch_sizes(&self) -> &[usize] {
        &self.branch_sizes
    }

    /// Total width of the flat mask/logit layout.
    pub fn flattened_size(&self) -> usize {
        self.branch_sizes.iter().sum()
    }

    /// Project hidden features into one categorical distribution per
    /// branch, in branch order.
    ///
    /// `allowed` is the flat (num_agents, flattened_size) mask, split
    /// into contiguous per-branch slices. Per branch and row, the
    /// softmax of the logits is multiplied by the mask slice,
    /// renormalized by the row sum (plus the epsilon guard against a
    /// fully-masked row), and re-logged to form the effective logits.
    /// A fully-masked row degrades to a near-uniform tiny-probability
    /// row instead of erroring.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::RowCountMismatch`] if the mask's row
    /// count differs from the hidden batch,
    /// [`ShapeError::WidthMismatch`] if its width is not
    /// `flattened_size()`, or a width error from a branch projection.
    pub fn forward(
        &self,
        hidden: &Tensor,
        allowed: &Tensor,
    ) -> Result<Vec<ActionDistribution>, ShapeError> {
        if allowed.rows() != hidden.rows() {
            return Err(ShapeError::RowCountMismatch {
                expected: hidden.rows(),
                got: allowed.rows(),
            });
        }
        if allowed.row_len() != self.flattened_size() {
            return Err(ShapeError::WidthMismatch {
                expected: self.flattened_size(),
                got: allowed.row_len(),
            });
        }
        let mut out = Vec::with_capacity(self.branches.len());
        let mut offset = 0;
        for (layer, &size) in self.branches.iter().zip(&self.branch_sizes) {
            let logits = layer.forward(hidden)?;
            let corrected = mask_branch(&logits, allowed, offset, size);
            out.push(ActionDistribution::Categorical(CategoricalDist::new(
                corrected,
            )));
            offset += size;
        }
        Ok(out)
    }
}

/// Apply one branch's mask slice to its logits.
///
/// `softmax(logits) * mask`, renormalized by the row sum plus
/// [`EPSILON`], then `ln(normalized + EPSILON)` as the effective
/// logits.
fn mask_branch(logits: &Tensor, allowed: &Tensor, offset: usize, size: usize) -> Tensor {
    let rows = logits.rows();
    let mut out = Tensor::zeros([rows, size].into_iter().collect());
    for r in 0..rows {
        let mask = &allowed.row(r)[offset..offset + size];
        let mut probs: Vec<f32> = logits.row(r).to_vec();
        softmax_in_place(&mut probs);
        let mut sum = 0.0f32;
        for (p, m) in probs.iter_mut().zip(mask) {
            *p *= m;
            sum += *p;
        }
        let out_row = &mut out.data_mut()[r * size..(r + 1) * size];
        for (v, p) in out_row.iter_mut().zip(&probs) {
            *v = (p / (sum + EPSILON) + EPSILON).ln();
        }
    }
    out
}
