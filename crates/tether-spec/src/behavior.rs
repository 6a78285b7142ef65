//! The environment/policy contract: observation shapes plus an action
//! spec.

use rand::{Rng, RngExt};

use tether_core::{ObsShape, SpecError, Tensor};

use crate::action::ActionSpec;
use crate::buffer::{ActionBuffer, DiscreteActions};

/// Pairs observation stream shapes with an [`ActionSpec`].
///
/// Negotiated once at environment-connection time and immutable
/// thereafter. It is both the shape contract that step batches are
/// built against and a factory for warm-up/fallback action buffers.
///
/// # Examples
///
/// ```
/// use tether_spec::{ActionSpec, BehaviorSpec};
///
/// let spec = BehaviorSpec::new(
///     vec![[3, 2].into_iter().collect(), [5].into_iter().collect()],
///     ActionSpec::continuous(3).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(spec.observation_shapes().len(), 2);
/// assert_eq!(spec.action_size(), 3);
/// let zeros = spec.create_empty_action(5);
/// assert_eq!(zeros.num_agents(), 5);
/// assert_eq!(zeros.width(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BehaviorSpec {
    observation_shapes: Vec<ObsShape>,
    action_spec: ActionSpec,
}

impl BehaviorSpec {
    /// Build a behavior spec.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::NoObservationStreams`] for an empty shape
    /// list and [`SpecError::ZeroObservationDim`] if any stream shape
    /// contains a zero dimension.
    pub fn new(
        observation_shapes: Vec<ObsShape>,
        action_spec: ActionSpec,
    ) -> Result<Self, SpecError> {
        if observation_shapes.is_empty() {
            return Err(SpecError::NoObservationStreams);
        }
        for (stream, shape) in observation_shapes.iter().enumerate() {
            if shape.is_empty() || shape.iter().any(|&d| d == 0) {
                return Err(SpecError::ZeroObservationDim { stream });
            }
        }
        Ok(Self {
            observation_shapes,
            action_spec,
        })
    }

    /// Shapes of the observation streams, in stream order.
    pub fn observation_shapes(&self) -> &[ObsShape] {
        &self.observation_shapes
    }

    /// The action spec this behavior uses.
    pub fn action_spec(&self) -> &ActionSpec {
        &self.action_spec
    }

    /// Number of action columns. See [`ActionSpec::action_size`].
    pub fn action_size(&self) -> usize {
        self.action_spec.action_size()
    }

    /// Returns `true` if the action space is continuous.
    pub fn is_continuous(&self) -> bool {
        self.action_spec.is_continuous()
    }

    /// Returns `true` if the action space is discrete.
    pub fn is_discrete(&self) -> bool {
        self.action_spec.is_discrete()
    }

    /// Build a zero-filled action buffer for `n` agents.
    ///
    /// Continuous specs produce an `f32` buffer of shape
    /// (n, continuous_size); discrete specs produce an `i32` buffer of
    /// shape (n, num_branches).
    pub fn create_empty_action(&self, n: usize) -> ActionBuffer {
        match &self.action_spec {
            ActionSpec::Continuous { size } => {
                ActionBuffer::Continuous(Tensor::zeros([n, *size].into_iter().collect()))
            }
            ActionSpec::Discrete { branches } => {
                ActionBuffer::Discrete(DiscreteActions::zeros(n, branches.len()))
            }
        }
    }

    /// Build a uniformly random action buffer for `n` agents.
    ///
    /// Continuous components are drawn from [-1, 1]; each discrete
    /// column draws an independent index from [0, branch_size).
    /// Determinism is the caller's seeding decision: pass a seeded RNG
    /// to get reproducible buffers.
    pub fn create_random_action<R: Rng>(&self, n: usize, rng: &mut R) -> ActionBuffer {
        match &self.action_spec {
            ActionSpec::Continuous { size } => {
                let mut t = Tensor::zeros([n, *size].into_iter().collect());
                for v in t.data_mut() {
                    *v = (rng.random::<f64>() * 2.0 - 1.0) as f32;
                }
                ActionBuffer::Continuous(t)
            }
            ActionSpec::Discrete { branches } => {
                let mut d = DiscreteActions::zeros(n, branches.len());
                for (i, v) in d.data_mut().iter_mut().enumerate() {
                    let size = branches[i % branches.len()];
                    let draw = (rng.random::<f64>() * size as f64) as usize;
                    *v = draw.min(size - 1) as i32;
                }
                ActionBuffer::Discrete(d)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn shapes(dims: &[&[usize]]) -> Vec<ObsShape> {
        dims.iter().map(|d| d.iter().copied().collect()).collect()
    }

    // ---------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------

    #[test]
    fn new_rejects_empty_stream_list() {
        let err = BehaviorSpec::new(vec![], ActionSpec::continuous(3).unwrap()).unwrap_err();
        assert_eq!(err, SpecError::NoObservationStreams);
    }

    #[test]
    fn new_rejects_zero_dimension_shape() {
        let err = BehaviorSpec::new(
            shapes(&[&[3, 0]]),
            ActionSpec::continuous(3).unwrap(),
        )
        .unwrap_err();
        assert_eq!(err, SpecError::ZeroObservationDim { stream: 0 });
    }

    // ---------------------------------------------------------------
    // Factories
    // ---------------------------------------------------------------

    #[test]
    fn empty_action_continuous() {
        let spec = BehaviorSpec::new(
            shapes(&[&[3, 2], &[5]]),
            ActionSpec::continuous(3).unwrap(),
        )
        .unwrap();
        let buf = spec.create_empty_action(5);
        let t = buf.as_continuous().expect("continuous buffer");
        assert_eq!(t.shape(), &[5, 3]);
        assert!(t.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn empty_action_discrete() {
        let spec = BehaviorSpec::new(
            shapes(&[&[3, 2], &[5]]),
            ActionSpec::discrete(vec![3]).unwrap(),
        )
        .unwrap();
        assert_eq!(spec.action_spec().discrete_branches(), Some(&[3][..]));
        assert_eq!(spec.action_size(), 1);
        let buf = spec.create_empty_action(5);
        let d = buf.as_discrete().expect("discrete buffer");
        assert_eq!((d.rows(), d.cols()), (5, 1));
        assert!(d.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn random_action_continuous_bounds() {
        let spec = BehaviorSpec::new(shapes(&[&[5]]), ActionSpec::continuous(30).unwrap()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let buf = spec.create_random_action(4, &mut rng);
        let t = buf.as_continuous().expect("continuous buffer");
        assert_eq!(t.shape(), &[4, 30]);
        assert!(t.data().iter().all(|&v| (-1.0..=1.0).contains(&v)));
    }

    #[test]
    fn random_action_discrete_bounds() {
        let branches = vec![10usize, 20, 30];
        let spec = BehaviorSpec::new(
            shapes(&[&[5]]),
            ActionSpec::discrete(branches.clone()).unwrap(),
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let buf = spec.create_random_action(4, &mut rng);
        let d = buf.as_discrete().expect("discrete buffer");
        assert_eq!((d.rows(), d.cols()), (4, 3));
        for row in 0..d.rows() {
            for (col, &size) in branches.iter().enumerate() {
                let v = d.row(row)[col];
                assert!(v >= 0 && (v as usize) < size, "column {col} out of range: {v}");
            }
        }
    }

    #[test]
    fn random_action_is_deterministic_per_seed() {
        let spec = BehaviorSpec::new(shapes(&[&[5]]), ActionSpec::continuous(8).unwrap()).unwrap();
        let draw = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            spec.create_random_action(6, &mut rng)
        };
        assert_eq!(draw(11), draw(11));
        assert_ne!(draw(11), draw(12));
    }

    // ---------------------------------------------------------------
    // Properties
    // ---------------------------------------------------------------

    proptest! {
        #[test]
        fn random_discrete_always_in_range(
            branches in prop::collection::vec(1usize..12, 1..5),
            n in 0usize..8,
            seed in 0u64..256,
        ) {
            let spec = BehaviorSpec::new(
                shapes(&[&[4]]),
                ActionSpec::discrete(branches.clone()).unwrap(),
            )
            .unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let buf = spec.create_random_action(n, &mut rng);
            let d = buf.as_discrete().unwrap();
            for row in 0..n {
                for (col, &size) in branches.iter().enumerate() {
                    let v = d.row(row)[col];
                    prop_assert!(v >= 0 && (v as usize) < size);
                }
            }
        }

        #[test]
        fn random_continuous_always_in_range(
            size in 1usize..16,
            n in 0usize..8,
            seed in 0u64..256,
        ) {
            let spec = BehaviorSpec::new(
                shapes(&[&[4]]),
                ActionSpec::continuous(size).unwrap(),
            )
            .unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let buf = spec.create_random_action(n, &mut rng);
            let t = buf.as_continuous().unwrap();
            prop_assert!(t.data().iter().all(|&v| (-1.0..=1.0).contains(&v)));
        }
    }
}
