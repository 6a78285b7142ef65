//! Per-branch action legality masks.

use tether_core::ShapeError;

/// A boolean grid of shape (num_agents, branch_size) for one discrete
/// branch.
///
/// Polarity follows the step-batch convention: `true` marks a
/// *disallowed* action. The distribution engine consumes the opposite
/// convention (1.0 = allowed); that inversion happens at a single
/// documented boundary in `tether-dist`, never here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchMask {
    rows: usize,
    width: usize,
    data: Vec<bool>,
}

impl BranchMask {
    /// Build from a row-major boolean buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ElementCountMismatch`] if `data.len()`
    /// does not equal `rows * width`.
    pub fn new(rows: usize, width: usize, data: Vec<bool>) -> Result<Self, ShapeError> {
        if data.len() != rows * width {
            return Err(ShapeError::ElementCountMismatch {
                expected: rows * width,
                got: data.len(),
            });
        }
        Ok(Self { rows, width, data })
    }

    /// Build a mask with every action allowed (all `false`).
    pub fn all_allowed(rows: usize, width: usize) -> Self {
        Self {
            rows,
            width,
            data: vec![false; rows * width],
        }
    }

    /// Number of agent rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Branch cardinality (columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Borrow row `i` (one agent's legality vector for this branch).
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows()`.
    pub fn row(&self, i: usize) -> &[bool] {
        &self.data[i * self.width..(i + 1) * self.width]
    }

    /// The whole grid as a flat slice, row-major.
    pub fn data(&self) -> &[bool] {
        &self.data
    }
}
