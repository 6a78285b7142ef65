//! Strongly-typed identifiers.

use std::fmt;

/// Identifies one controllable entity within a simulation tick.
///
/// Agent IDs are assigned by the environment adapter and are stable for
/// the duration of an agent's episode. An agent may disappear between
/// ticks (episode end) and the same numeric ID may later be reused for
/// a new episode; within a single step batch, IDs are unique.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub i32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for AgentId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}
