//! Error types for the Tether workspace, organized by subsystem:
//! spec construction and buffer shape validation.
//!
//! Batch lookup errors live with the step-batch types in
//! `tether-steps`; numeric near-degeneracy (zero std, fully-masked
//! probability rows) is epsilon-floored rather than surfaced as an
//! error anywhere in the workspace.

use std::error::Error;
use std::fmt;

/// Errors from behavior/action spec construction.
///
/// All of these are fatal at construction time: the constructors return
/// `Err` and no partial spec object is ever produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpecError {
    /// A continuous action space was declared with zero components.
    ZeroContinuousSize,
    /// A discrete action space was declared with no branches.
    NoBranches,
    /// A discrete branch was declared with zero actions.
    ZeroBranchCardinality {
        /// Index of the offending branch.
        branch: usize,
    },
    /// A behavior spec was declared with no observation streams.
    NoObservationStreams,
    /// An observation stream shape contains a zero dimension.
    ZeroObservationDim {
        /// Index of the offending stream.
        stream: usize,
    },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroContinuousSize => {
                write!(f, "continuous action size must be positive")
            }
            Self::NoBranches => {
                write!(f, "discrete action spec must have at least one branch")
            }
            Self::ZeroBranchCardinality { branch } => {
                write!(f, "discrete branch {branch} has zero actions")
            }
            Self::NoObservationStreams => {
                write!(f, "behavior spec must have at least one observation stream")
            }
            Self::ZeroObservationDim { stream } => {
                write!(f, "observation stream {stream} has a zero dimension")
            }
        }
    }
}

impl Error for SpecError {}

/// Errors from flat-buffer shape validation.
///
/// Raised by [`Tensor`](crate::Tensor) construction and by any
/// operation that pairs two buffers whose shapes must agree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// Buffer length does not match the product of the declared shape.
    ElementCountMismatch {
        /// Element count implied by the shape.
        expected: usize,
        /// Element count actually supplied.
        got: usize,
    },
    /// Two buffers that must share a shape do not.
    MismatchedShapes {
        /// Shape of the first buffer.
        left: Vec<usize>,
        /// Shape of the second buffer.
        right: Vec<usize>,
    },
    /// A row width (trailing-dimension product) does not match.
    WidthMismatch {
        /// Expected row width.
        expected: usize,
        /// Actual row width.
        got: usize,
    },
    /// A leading (batch) dimension does not match.
    RowCountMismatch {
        /// Expected number of rows.
        expected: usize,
        /// Actual number of rows.
        got: usize,
    },
    /// A continuous value was scored against a discrete distribution,
    /// or vice versa.
    ValueKindMismatch,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElementCountMismatch { expected, got } => {
                write!(f, "shape implies {expected} elements, buffer has {got}")
            }
            Self::MismatchedShapes { left, right } => {
                write!(f, "shapes disagree: {left:?} vs {right:?}")
            }
            Self::WidthMismatch { expected, got } => {
                write!(f, "row width {got} does not match expected {expected}")
            }
            Self::RowCountMismatch { expected, got } => {
                write!(f, "row count {got} does not match expected {expected}")
            }
            Self::ValueKindMismatch => {
                write!(f, "value kind does not match distribution family")
            }
        }
    }
}

impl Error for ShapeError {}
