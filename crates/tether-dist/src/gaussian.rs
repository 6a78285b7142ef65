//! Gaussian and tanh-squashed Gaussian distributions over continuous
//! action components.

use rand::{Rng, RngExt};

use tether_core::numeric::{standard_normal, EPSILON};
use tether_core::{ShapeError, Tensor};

/// Closed-form Normal log-density at one point, with epsilon floors
/// inside the variance denominator and the log-scale term so an
/// underflowing std cannot divide by zero or take `ln(0)`.
fn normal_log_density(value: f32, mean: f32, std: f32) -> f32 {
    let var = std * std;
    let log_scale = (std + EPSILON).ln();
    let log_sqrt_2pi = (2.0 * std::f32::consts::PI).sqrt().ln();
    -((value - mean) * (value - mean)) / (2.0 * var + EPSILON) - log_scale - log_sqrt_2pi
}

fn softplus(x: f32) -> f32 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

/// `ln(1 - tanh(u)^2)` in the numerically stable softplus form.
fn log_one_minus_tanh_sq(u: f32) -> f32 {
    2.0 * (std::f32::consts::LN_2 - u - softplus(-2.0 * u))
}

/// A batch of diagonal Gaussians over continuous action components.
///
/// `mean` and `std` share one shape, (num_agents, action_size). All
/// operations are element-wise per component; summing across
/// components is a loss-side decision and does not happen here.
#[derive(Clone, Debug)]
pub struct GaussianDist {
    mean: Tensor,
    std: Tensor,
}

impl GaussianDist {
    /// Build from mean and standard-deviation tensors.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::MismatchedShapes`] if the two tensors do
    /// not share a shape.
    pub fn new(mean: Tensor, std: Tensor) -> Result<Self, ShapeError> {
        if mean.shape() != std.shape() {
            return Err(ShapeError::MismatchedShapes {
                left: mean.shape().to_vec(),
                right: std.shape().to_vec(),
            });
        }
        Ok(Self { mean, std })
    }

    /// Per-component means.
    pub fn mean(&self) -> &Tensor {
        &self.mean
    }

    /// Per-component standard deviations.
    pub fn std(&self) -> &Tensor {
        &self.std
    }

    /// Draw one sample per component: `mean + std * N(0, 1)`.
    ///
    /// The noise is drawn first and then scaled (the reparameterized
    /// form), so a training context that re-derives gradients from
    /// the unscaled noise sees the same arithmetic.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Tensor {
        let mut out = Tensor::zeros(self.mean.shape().iter().copied().collect());
        for (i, v) in out.data_mut().iter_mut().enumerate() {
            let noise = standard_normal(rng) as f32;
            *v = self.mean.data()[i] + self.std.data()[i] * noise;
        }
        out
    }

    /// Element-wise Normal log-density of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::MismatchedShapes`] if `value` does not
    /// share the distribution's shape.
    pub fn log_prob(&self, value: &Tensor) -> Result<Tensor, ShapeError> {
        if value.shape() != self.mean.shape() {
            return Err(ShapeError::MismatchedShapes {
                left: value.shape().to_vec(),
                right: self.mean.shape().to_vec(),
            });
        }
        let mut out = Tensor::zeros(self.mean.shape().iter().copied().collect());
        for (i, lp) in out.data_mut().iter_mut().enumerate() {
            *lp = normal_log_density(value.data()[i], self.mean.data()[i], self.std.data()[i]);
        }
        Ok(out)
    }

    /// Element-wise density of `value`: `exp(log_prob)`.
    ///
    /// # Errors
    ///
    /// Same shape requirement as [`log_prob`](Self::log_prob).
    pub fn pdf(&self, value: &Tensor) -> Result<Tensor, ShapeError> {
        let mut lp = self.log_prob(value)?;
        for v in lp.data_mut() {
            *v = v.exp();
        }
        Ok(lp)
    }

    /// Per-component entropy, `0.5 * ln(2*pi*e * std + EPSILON)`.
    ///
    /// This is a floored approximation that does not square `std`
    /// (the exact differential entropy is `0.5 * ln(2*pi*e * std^2)`).
    /// Downstream loss scaling depends on this exact magnitude, so
    /// the approximate form is kept.
    pub fn entropy(&self) -> Tensor {
        let two_pi_e = 2.0 * std::f32::consts::PI * std::f32::consts::E;
        let mut out = Tensor::zeros(self.std.shape().iter().copied().collect());
        for (i, v) in out.data_mut().iter_mut().enumerate() {
            *v = 0.5 * (two_pi_e * self.std.data()[i] + EPSILON).ln();
        }
        out
    }
}

/// A Gaussian squashed through `tanh`, bounding support to (-1, 1).
///
/// `log_prob` applies the standard change-of-variables correction for
/// a bijective transform: the base log-density at the unsquashed
/// point, minus the log-absolute-determinant of the tanh Jacobian.
#[derive(Clone, Debug)]
pub struct TanhGaussianDist {
    base: GaussianDist,
}

impl TanhGaussianDist {
    /// Build from mean and standard-deviation tensors of the
    /// underlying Gaussian.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::MismatchedShapes`] if the two tensors do
    /// not share a shape.
    pub fn new(mean: Tensor, std: Tensor) -> Result<Self, ShapeError> {
        Ok(Self {
            base: GaussianDist::new(mean, std)?,
        })
    }

    /// The unsquashed Gaussian.
    pub fn base(&self) -> &GaussianDist {
        &self.base
    }

    /// Draw one squashed sample per component: `tanh(mean + std * N)`.
    /// Values lie strictly within (-1, 1).
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Tensor {
        let mut out = self.base.sample(rng);
        for v in out.data_mut() {
            *v = v.tanh();
        }
        out
    }

    /// Inverse of the squashing transform, kept finite by clamping
    /// the input to (-1 + EPSILON, 1 - EPSILON).
    fn inverse_tanh(value: f32) -> f32 {
        let capped = value.clamp(-1.0 + EPSILON, 1.0 - EPSILON);
        0.5 * ((1.0 + capped) / (1.0 - capped) + EPSILON).ln()
    }

    /// Element-wise log-density of a squashed `value`.
    ///
    /// Finite for any input in [-1, 1], including the boundaries,
    /// thanks to the clamped inverse and the softplus Jacobian form.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::MismatchedShapes`] if `value` does not
    /// share the distribution's shape.
    pub fn log_prob(&self, value: &Tensor) -> Result<Tensor, ShapeError> {
        if value.shape() != self.base.mean().shape() {
            return Err(ShapeError::MismatchedShapes {
                left: value.shape().to_vec(),
                right: self.base.mean().shape().to_vec(),
            });
        }
        let mut out = Tensor::zeros(value.shape().iter().copied().collect());
        for (i, lp) in out.data_mut().iter_mut().enumerate() {
            let u = Self::inverse_tanh(value.data()[i]);
            let base_lp =
                normal_log_density(u, self.base.mean().data()[i], self.base.std().data()[i]);
            *lp = base_lp - log_one_minus_tanh_sq(u);
        }
        Ok(out)
    }

    /// Entropy of the underlying Gaussian (the squash correction is
    /// not folded in, matching the unsquashed surface trainers use).
    pub fn entropy(&self) -> Tensor {
        self.base.entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn tensor(shape: &[usize], data: Vec<f32>) -> Tensor {
        Tensor::new(shape.iter().copied().collect(), data).unwrap()
    }

    // ---------------------------------------------------------------
    // GaussianDist
    // ---------------------------------------------------------------

    #[test]
    fn new_rejects_mismatched_shapes() {
        let mean = Tensor::zeros([2, 3].into_iter().collect());
        let std = Tensor::zeros([2, 2].into_iter().collect());
        assert!(GaussianDist::new(mean, std).is_err());
    }

    #[test]
    fn standard_normal_log_prob_at_zero() {
        // ln(1/sqrt(2*pi)) = -0.9189385
        let dist = GaussianDist::new(
            tensor(&[1, 1], vec![0.0]),
            tensor(&[1, 1], vec![1.0]),
        )
        .unwrap();
        let lp = dist.log_prob(&tensor(&[1, 1], vec![0.0])).unwrap();
        assert!((lp.data()[0] - (-0.918_938_5)).abs() < 1e-4);
    }

    #[test]
    fn pdf_is_exp_of_log_prob() {
        let dist = GaussianDist::new(
            tensor(&[2, 2], vec![0.0, 1.0, -1.0, 0.5]),
            tensor(&[2, 2], vec![1.0, 0.5, 2.0, 1.5]),
        )
        .unwrap();
        let value = tensor(&[2, 2], vec![0.3, 0.7, -0.2, 0.0]);
        let lp = dist.log_prob(&value).unwrap();
        let pdf = dist.pdf(&value).unwrap();
        for (l, p) in lp.data().iter().zip(pdf.data()) {
            assert!((l.exp() - p).abs() < 1e-6);
        }
    }

    #[test]
    fn log_prob_is_finite_for_zero_std() {
        let dist = GaussianDist::new(
            tensor(&[1, 2], vec![0.0, 0.0]),
            tensor(&[1, 2], vec![0.0, 0.0]),
        )
        .unwrap();
        let lp = dist.log_prob(&tensor(&[1, 2], vec![0.5, 0.0])).unwrap();
        assert!(lp.data().iter().all(|v| v.is_finite()));
        let ent = dist.entropy();
        assert!(ent.data().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn entropy_uses_the_floored_unsquared_form() {
        let dist = GaussianDist::new(
            tensor(&[1, 1], vec![0.0]),
            tensor(&[1, 1], vec![0.5]),
        )
        .unwrap();
        let expected = 0.5 * (2.0 * std::f32::consts::PI * std::f32::consts::E * 0.5 + EPSILON).ln();
        assert!((dist.entropy().data()[0] - expected).abs() < 1e-6);
    }

    #[test]
    fn sampling_is_deterministic_per_seed() {
        let dist = GaussianDist::new(
            Tensor::zeros([4, 3].into_iter().collect()),
            tensor(&[4, 3], vec![1.0; 12]),
        )
        .unwrap();
        let draw = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            dist.sample(&mut rng)
        };
        assert_eq!(draw(5), draw(5));
        assert_ne!(draw(5), draw(6));
    }

    // ---------------------------------------------------------------
    // TanhGaussianDist
    // ---------------------------------------------------------------

    #[test]
    fn tanh_samples_are_strictly_bounded() {
        let dist = TanhGaussianDist::new(
            tensor(&[8, 2], vec![0.0; 16]),
            tensor(&[8, 2], vec![3.0; 16]),
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..32 {
            let s = dist.sample(&mut rng);
            assert!(s.data().iter().all(|&v| v > -1.0 && v < 1.0));
        }
    }

    #[test]
    fn tanh_log_prob_is_finite_at_boundaries() {
        let dist = TanhGaussianDist::new(
            tensor(&[1, 4], vec![0.0; 4]),
            tensor(&[1, 4], vec![1.0; 4]),
        )
        .unwrap();
        let value = tensor(&[1, 4], vec![-1.0, -0.999_999, 0.999_999, 1.0]);
        let lp = dist.log_prob(&value).unwrap();
        assert!(lp.data().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn tanh_log_prob_round_trips_samples() {
        let dist = TanhGaussianDist::new(
            tensor(&[4, 2], vec![0.2; 8]),
            tensor(&[4, 2], vec![0.7; 8]),
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let s = dist.sample(&mut rng);
        let lp = dist.log_prob(&s).unwrap();
        assert!(lp.data().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn tanh_entropy_matches_base() {
        let dist = TanhGaussianDist::new(
            tensor(&[2, 2], vec![0.0; 4]),
            tensor(&[2, 2], vec![0.9; 4]),
        )
        .unwrap();
        assert_eq!(dist.entropy(), dist.base().entropy());
    }

    proptest! {
        #[test]
        fn inverse_tanh_round_trip(v in -0.999f32..0.999) {
            let u = TanhGaussianDist::inverse_tanh(v);
            prop_assert!((u.tanh() - v).abs() < 1e-3);
        }

        #[test]
        fn log_one_minus_tanh_sq_matches_naive(u in -5.0f32..5.0) {
            let naive = (1.0 - u.tanh() * u.tanh()).ln();
            prop_assert!((log_one_minus_tanh_sq(u) - naive).abs() < 1e-3);
        }
    }
}
