//! Categorical distributions over one discrete action branch.

use rand::{Rng, RngExt};

use tether_core::numeric::softmax_in_place;
use tether_core::{ShapeError, Tensor};

/// A batch of categorical distributions over one branch: one row of
/// probabilities per agent.
///
/// Probabilities are computed once at construction by a row softmax
/// of the logits. Masked branches arrive here already renormalized
/// (see [`MultiCategoricalHead`](crate::MultiCategoricalHead)), so
/// every probability is strictly positive.
#[derive(Clone, Debug)]
pub struct CategoricalDist {
    logits: Tensor,
    probs: Tensor,
}

impl CategoricalDist {
    /// Build from per-row logits of shape (num_agents, num_actions).
    pub fn new(logits: Tensor) -> Self {
        let mut probs = logits.clone();
        let width = probs.row_len();
        if width > 0 {
            for row in probs.data_mut().chunks_mut(width) {
                softmax_in_place(row);
            }
        }
        Self { logits, probs }
    }

    /// The raw logits this distribution was built from.
    pub fn logits(&self) -> &Tensor {
        &self.logits
    }

    /// Row-normalized probabilities.
    pub fn probs(&self) -> &Tensor {
        &self.probs
    }

    /// Number of agent rows.
    pub fn rows(&self) -> usize {
        self.probs.rows()
    }

    /// Branch cardinality.
    pub fn num_actions(&self) -> usize {
        self.probs.row_len()
    }

    /// Draw one action index per row by inverse-CDF multinomial
    /// sampling over the row's probabilities.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<i32> {
        let n = self.num_actions();
        let mut out = Vec::with_capacity(self.rows());
        for row in 0..self.rows() {
            let r: f64 = rng.random::<f64>();
            let mut acc = 0.0f64;
            let mut choice = n.saturating_sub(1);
            for (idx, &p) in self.probs.row(row).iter().enumerate() {
                acc += p as f64;
                if r < acc {
                    choice = idx;
                    break;
                }
            }
            // Rounding can leave acc slightly below 1; the last index
            // absorbs the remainder.
            out.push(choice as i32);
        }
        out
    }

    /// Probability mass at the given per-row action indices.
    ///
    /// An explicit per-row gather; indices must be valid action
    /// indices for this branch.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::RowCountMismatch`] if `values.len()` does
    /// not equal the number of rows.
    pub fn pdf(&self, values: &[i32]) -> Result<Tensor, ShapeError> {
        if values.len() != self.rows() {
            return Err(ShapeError::RowCountMismatch {
                expected: self.rows(),
                got: values.len(),
            });
        }
        let mut out = Tensor::zeros([self.rows()].into_iter().collect());
        for (row, v) in out.data_mut().iter_mut().enumerate() {
            *v = self.probs.row(row)[values[row] as usize];
        }
        Ok(out)
    }

    /// Log-probability of the given per-row action indices:
    /// `ln(pdf)`.
    ///
    /// # Errors
    ///
    /// Same row-count requirement as [`pdf`](Self::pdf).
    pub fn log_prob(&self, values: &[i32]) -> Result<Tensor, ShapeError> {
        let mut out = self.pdf(values)?;
        for v in out.data_mut() {
            *v = v.ln();
        }
        Ok(out)
    }

    /// Log-probabilities of every action, shape (num_agents,
    /// num_actions). Used by full-distribution losses.
    pub fn all_log_prob(&self) -> Tensor {
        let mut out = self.probs.clone();
        for v in out.data_mut() {
            *v = v.ln();
        }
        out
    }

    /// Per-row Shannon entropy, `-sum(p * ln p)`. A zero probability
    /// contributes nothing.
    pub fn entropy(&self) -> Tensor {
        let mut out = Tensor::zeros([self.rows()].into_iter().collect());
        for (row, v) in out.data_mut().iter_mut().enumerate() {
            let mut h = 0.0f32;
            for &p in self.probs.row(row) {
                if p > 0.0 {
                    h -= p * p.ln();
                }
            }
            *v = h;
        }
        out
    }
}
