//! The flat [`Tensor`] buffer: `f32` data plus an explicit shape.

use crate::error::ShapeError;
use smallvec::SmallVec;

/// Shape of one tensor or observation stream.
///
/// Uses `SmallVec<[usize; 4]>` to avoid heap allocation for shapes up
/// to rank 4, covering vector (rank 1) and visual (rank 3) streams.
pub type ObsShape = SmallVec<[usize; 4]>;

/// A row-major `f32` buffer with an explicit shape.
///
/// The leading dimension is the batch (per-agent) axis; the trailing
/// dimensions describe one row. A tensor may have zero rows while
/// keeping the rank of its trailing dimensions, which is how empty
/// step batches preserve their shape contract.
///
/// # Examples
///
/// ```
/// use tether_core::Tensor;
///
/// let t = Tensor::new([2, 3].into_iter().collect(), vec![0.0; 6]).unwrap();
/// assert_eq!(t.rows(), 2);
/// assert_eq!(t.row_len(), 3);
/// assert_eq!(t.row(1), &[0.0, 0.0, 0.0]);
///
/// let empty = Tensor::zeros([0, 3, 2].into_iter().collect());
/// assert_eq!(empty.rows(), 0);
/// assert_eq!(empty.shape(), &[0, 3, 2]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    shape: ObsShape,
    data: Vec<f32>,
}

impl Tensor {
    /// Build a tensor from a shape and matching flat data.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ElementCountMismatch`] if `data.len()`
    /// does not equal the product of `shape`.
    pub fn new(shape: ObsShape, data: Vec<f32>) -> Result<Self, ShapeError> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(ShapeError::ElementCountMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Build a zero-filled tensor of the given shape.
    ///
    /// Zero-row shapes are valid and produce an empty buffer whose
    /// trailing dimensions are preserved.
    pub fn zeros(shape: ObsShape) -> Self {
        let len = shape.iter().product();
        Self {
            shape,
            data: vec![0.0; len],
        }
    }

    /// The full shape, leading (batch) dimension first.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The leading (batch) dimension.
    pub fn rows(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    /// Elements per row: the product of the trailing dimensions.
    pub fn row_len(&self) -> usize {
        self.shape.iter().skip(1).product()
    }

    /// Borrow row `i` as a flat slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows()`.
    pub fn row(&self, i: usize) -> &[f32] {
        let w = self.row_len();
        &self.data[i * w..(i + 1) * w]
    }

    /// The whole buffer as a flat slice, row-major.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the flat buffer, for construction-time fill.
    ///
    /// The shape is fixed at construction; only values change.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_rejects_element_count_mismatch() {
        let err = Tensor::new([2, 3].into_iter().collect(), vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::ElementCountMismatch {
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn zero_row_tensor_preserves_rank() {
        let t = Tensor::zeros([0, 3, 2].into_iter().collect());
        assert_eq!(t.shape(), &[0, 3, 2]);
        assert_eq!(t.rows(), 0);
        assert_eq!(t.row_len(), 6);
        assert!(t.data().is_empty());
    }

    #[test]
    fn row_slices_are_contiguous() {
        let t = Tensor::new(
            [3, 2].into_iter().collect(),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
        )
        .unwrap();
        assert_eq!(t.row(0), &[0.0, 1.0]);
        assert_eq!(t.row(2), &[4.0, 5.0]);
    }

    fn arb_shape() -> impl Strategy<Value = ObsShape> {
        prop::collection::vec(0usize..6, 1..4).prop_map(|dims| dims.into_iter().collect())
    }

    proptest! {
        #[test]
        fn zeros_matches_shape_product(shape in arb_shape()) {
            let expected: usize = shape.iter().product();
            let t = Tensor::zeros(shape);
            prop_assert_eq!(t.data().len(), expected);
            prop_assert_eq!(t.rows() * t.row_len(), expected);
        }

        #[test]
        fn rows_partition_the_buffer(shape in arb_shape()) {
            let t = Tensor::zeros(shape);
            let mut total = 0;
            for i in 0..t.rows() {
                total += t.row(i).len();
            }
            prop_assert_eq!(total, t.data().len());
        }
    }
}
