//! Error type for step-batch construction and lookup.

use std::error::Error;
use std::fmt;

use tether_core::AgentId;

/// Error from building or indexing a step batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchError {
    /// The requested agent id is not present in this batch.
    ///
    /// Callers holding possibly-stale ids (e.g., an agent that
    /// terminated last tick) should pre-check membership via
    /// iteration or the index map.
    UnknownAgent {
        /// The id that failed to resolve.
        agent_id: AgentId,
    },
    /// A column's leading dimension disagrees with the batch size.
    ShapeMismatch {
        /// Which column failed validation.
        what: &'static str,
        /// Expected leading dimension (num_agents).
        expected: usize,
        /// Actual leading dimension.
        got: usize,
    },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAgent { agent_id } => {
                write!(f, "agent {agent_id} not in batch")
            }
            Self::ShapeMismatch {
                what,
                expected,
                got,
            } => {
                write!(
                    f,
                    "{what} has leading dimension {got}, batch has {expected} agents"
                )
            }
        }
    }
}

impl Error for BatchError {}
