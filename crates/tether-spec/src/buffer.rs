//! Action buffers produced by the [`BehaviorSpec`](crate::BehaviorSpec)
//! factories.

use tether_core::{ShapeError, Tensor};

/// A batch of discrete actions: one row per agent, one `i32` column
/// per branch holding the chosen action index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscreteActions {
    rows: usize,
    cols: usize,
    data: Vec<i32>,
}

impl DiscreteActions {
    /// Build a zero-filled buffer of `rows` agents by `cols` branches.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Build from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ElementCountMismatch`] if `data.len()`
    /// does not equal `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<i32>) -> Result<Self, ShapeError> {
        if data.len() != rows * cols {
            return Err(ShapeError::ElementCountMismatch {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Number of agent rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of branch columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrow row `i` (one agent's branch choices).
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows()`.
    pub fn row(&self, i: usize) -> &[i32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// The whole buffer as a flat slice, row-major.
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Mutable access to the flat buffer, for construction-time fill.
    ///
    /// The row/column layout is fixed at construction; only values
    /// change.
    pub fn data_mut(&mut self) -> &mut [i32] {
        &mut self.data
    }
}

/// An action buffer for a batch of agents, continuous or discrete.
///
/// The variant always matches the
/// [`ActionSpec`](crate::ActionSpec) family of the spec that produced
/// it: `f32` components for continuous spaces, `i32` branch choices
/// for discrete ones.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionBuffer {
    /// Real-valued components, shape (num_agents, continuous_size).
    Continuous(Tensor),
    /// Branch choices, shape (num_agents, num_branches).
    Discrete(DiscreteActions),
}

impl ActionBuffer {
    /// Number of agent rows.
    pub fn num_agents(&self) -> usize {
        match self {
            Self::Continuous(t) => t.rows(),
            Self::Discrete(d) => d.rows(),
        }
    }

    /// Number of columns (components or branches).
    pub fn width(&self) -> usize {
        match self {
            Self::Continuous(t) => t.row_len(),
            Self::Discrete(d) => d.cols(),
        }
    }

    /// Borrow the continuous tensor, if this is the continuous variant.
    pub fn as_continuous(&self) -> Option<&Tensor> {
        match self {
            Self::Continuous(t) => Some(t),
            Self::Discrete(_) => None,
        }
    }

    /// Borrow the discrete buffer, if this is the discrete variant.
    pub fn as_discrete(&self) -> Option<&DiscreteActions> {
        match self {
            Self::Continuous(_) => None,
            Self::Discrete(d) => Some(d),
        }
    }
}
