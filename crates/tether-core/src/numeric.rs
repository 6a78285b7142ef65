//! Shared numeric utilities: the process-wide epsilon floor, row
//! softmax, and standard-normal sampling.

use rand::{Rng, RngExt};

/// Small value added inside logarithms and denominators as
/// distribution parameters approach degeneracy (std underflowing to
/// zero, fully-masked probability rows).
///
/// Process-wide, read-only. Downstream loss magnitudes depend on this
/// exact value; do not tune it per call site.
pub const EPSILON: f32 = 1e-7;

/// Draw one standard-normal sample using the Box-Muller transform.
///
/// Avoids the `rand_distr` dependency. Computed in `f64`; callers
/// truncate to `f32` where needed.
pub fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Normalize one logit row into probabilities, in place.
///
/// Subtracts the row maximum before exponentiating so large logits
/// cannot overflow. An empty row is a no-op.
pub fn softmax_in_place(row: &mut [f32]) {
    if row.is_empty() {
        return;
    }
    let max = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0f32;
    for v in row.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in row.iter_mut() {
        *v /= sum;
    }
}
