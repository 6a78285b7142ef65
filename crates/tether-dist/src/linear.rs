//! Minimal linear projection used by the distribution parameter
//! heads.

use rand::{Rng, RngExt};

use tether_core::numeric::standard_normal;
use tether_core::{ShapeError, Tensor};

/// A dense `out x in` projection with bias over flat `f32` rows.
///
/// Weights are Kaiming-He-normal samples scaled by a 0.1 gain; biases
/// start at zero. Initialization draws from the caller's RNG, so a
/// seeded RNG reproduces the layer exactly.
#[derive(Clone, Debug)]
pub struct Linear {
    in_features: usize,
    out_features: usize,
    weight: Vec<f32>,
    bias: Vec<f32>,
}

impl Linear {
    /// Kernel gain applied on top of the He-normal scale.
    const KERNEL_GAIN: f64 = 0.1;

    /// Build a layer with freshly initialized parameters.
    pub fn new<R: Rng>(in_features: usize, out_features: usize, rng: &mut R) -> Self {
        // He-normal: std = sqrt(2 / fan_in), then the kernel gain.
        let std = (2.0 / in_features.max(1) as f64).sqrt() * Self::KERNEL_GAIN;
        let weight = (0..in_features * out_features)
            .map(|_| (standard_normal(rng) * std) as f32)
            .collect();
        Self {
            in_features,
            out_features,
            weight,
            bias: vec![0.0; out_features],
        }
    }

    /// Input row width.
    pub fn in_features(&self) -> usize {
        self.in_features
    }

    /// Output row width.
    pub fn out_features(&self) -> usize {
        self.out_features
    }

    /// Project every input row: `out = W * row + b`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::WidthMismatch`] if the input's row width
    /// is not `in_features`.
    pub fn forward(&self, input: &Tensor) -> Result<Tensor, ShapeError> {
        if input.row_len() != self.in_features {
            return Err(ShapeError::WidthMismatch {
                expected: self.in_features,
                got: input.row_len(),
            });
        }
        let rows = input.rows();
        let mut out = Tensor::zeros([rows, self.out_features].into_iter().collect());
        for r in 0..rows {
            let row = input.row(r);
            let out_row =
                &mut out.data_mut()[r * self.out_features..(r + 1) * self.out_features];
            for (o, out_v) in out_row.iter_mut().enumerate() {
                let weights = &self.weight[o * self.in_features..(o + 1) * self.in_features];
                let mut acc = self.bias[o];
                for (w, x) in weights.iter().zip(row) {
                    acc += w * x;
                }
                *out_v = acc;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn forward_rejects_width_mismatch() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let layer = Linear::new(4, 2, &mut rng);
        let input = Tensor::zeros([3, 5].into_iter().collect());
        assert_eq!(
            layer.forward(&input).unwrap_err(),
            ShapeError::WidthMismatch {
                expected: 4,
                got: 5
            }
        );
    }

    #[test]
    fn zero_input_maps_to_bias() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let layer = Linear::new(4, 3, &mut rng);
        let out = layer.forward(&Tensor::zeros([2, 4].into_iter().collect())).unwrap();
        assert_eq!(out.shape(), &[2, 3]);
        assert!(out.data().iter().all(|&v| v == 0.0), "bias starts at zero");
    }

    #[test]
    fn initialization_is_deterministic_per_seed() {
        let make = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            Linear::new(6, 4, &mut rng)
        };
        let input = Tensor::new([1, 6].into_iter().collect(), vec![1.0; 6]).unwrap();
        let a = make(7).forward(&input).unwrap();
        let b = make(7).forward(&input).unwrap();
        assert_eq!(a, b);
        let c = make(8).forward(&input).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn forward_is_linear_in_the_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let layer = Linear::new(3, 2, &mut rng);
        let x = Tensor::new([1, 3].into_iter().collect(), vec![1.0, -2.0, 0.5]).unwrap();
        let x2 = Tensor::new([1, 3].into_iter().collect(), vec![2.0, -4.0, 1.0]).unwrap();
        let y = layer.forward(&x).unwrap();
        let y2 = layer.forward(&x2).unwrap();
        // Bias is zero at init, so doubling the input doubles the output.
        for (a, b) in y.data().iter().zip(y2.data()) {
            assert!((2.0 * a - b).abs() < 1e-5);
        }
    }
}
