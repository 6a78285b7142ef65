//! The mask polarity boundary between step batches and the
//! distribution engine.
//!
//! Step batches mark `true` = *disallowed*
//! ([`BranchMask`](tether_steps::BranchMask)); the distribution heads
//! consume `1.0` = *allowed*. The two conventions carry different
//! numeric results through the masked-renormalization path, so they
//! are kept distinct and the inversion happens here and only here.

use tether_core::{ShapeError, Tensor};
use tether_steps::BranchMask;

/// Flatten per-branch step-batch masks into the distribution engine's
/// (num_agents, sum of branch sizes) float mask, inverting polarity:
/// a `true` (disallowed) entry becomes `0.0`, a `false` entry `1.0`.
///
/// Branches are laid out contiguously in branch order, matching
/// [`MultiCategoricalHead::forward`](crate::MultiCategoricalHead::forward).
///
/// # Errors
///
/// Returns [`ShapeError::RowCountMismatch`] if any mask's row count
/// differs from `rows`.
pub fn allowed_mask(rows: usize, masks: &[BranchMask]) -> Result<Tensor, ShapeError> {
    for mask in masks {
        if mask.rows() != rows {
            return Err(ShapeError::RowCountMismatch {
                expected: rows,
                got: mask.rows(),
            });
        }
    }
    let width: usize = masks.iter().map(BranchMask::width).sum();
    let mut out = Tensor::zeros([rows, width].into_iter().collect());
    for r in 0..rows {
        let row = &mut out.data_mut()[r * width..(r + 1) * width];
        let mut offset = 0;
        for mask in masks {
            for (v, &disallowed) in row[offset..offset + mask.width()]
                .iter_mut()
                .zip(mask.row(r))
            {
                *v = if disallowed { 0.0 } else { 1.0 };
            }
            offset += mask.width();
        }
    }
    Ok(out)
}

/// The everything-allowed mask, for decision batches that carry no
/// masks (or continuous warm-up paths that still feed a discrete
/// head).
pub fn ones_mask(rows: usize, flattened_size: usize) -> Tensor {
    let mut out = Tensor::zeros([rows, flattened_size].into_iter().collect());
    for v in out.data_mut() {
        *v = 1.0;
    }
    out
}
