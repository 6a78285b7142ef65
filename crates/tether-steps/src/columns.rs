//! Columns shared by both step-batch kinds: observations, rewards,
//! agent ids, and the id-to-row index map.

use indexmap::IndexMap;

use tether_core::{AgentId, Tensor};
use tether_spec::BehaviorSpec;

use crate::error::BatchError;

/// The columns common to [`DecisionSteps`](crate::DecisionSteps) and
/// [`TerminalSteps`](crate::TerminalSteps).
///
/// The index map is built eagerly at construction; the batch is
/// immutable afterwards, so there is nothing to memoize lazily.
#[derive(Clone, Debug)]
pub(crate) struct Columns {
    obs: Vec<Tensor>,
    rewards: Vec<f32>,
    agent_ids: Vec<AgentId>,
    index: IndexMap<AgentId, usize>,
}

impl Columns {
    /// Validate leading dimensions and build the index map.
    ///
    /// Duplicate agent ids are an upstream precondition violation and
    /// are only debug-checked.
    pub(crate) fn new(
        obs: Vec<Tensor>,
        rewards: Vec<f32>,
        agent_ids: Vec<AgentId>,
    ) -> Result<Self, BatchError> {
        let n = agent_ids.len();
        for stream in &obs {
            if stream.rows() != n {
                return Err(BatchError::ShapeMismatch {
                    what: "observation stream",
                    expected: n,
                    got: stream.rows(),
                });
            }
        }
        if rewards.len() != n {
            return Err(BatchError::ShapeMismatch {
                what: "rewards",
                expected: n,
                got: rewards.len(),
            });
        }
        let index: IndexMap<AgentId, usize> = agent_ids
            .iter()
            .enumerate()
            .map(|(row, &id)| (id, row))
            .collect();
        debug_assert_eq!(index.len(), n, "duplicate agent id in batch");
        Ok(Self {
            obs,
            rewards,
            agent_ids,
            index,
        })
    }

    /// Zero-agent columns shaped per the spec's observation streams.
    pub(crate) fn empty(spec: &BehaviorSpec) -> Self {
        let obs = spec
            .observation_shapes()
            .iter()
            .map(|stream| {
                let shape = std::iter::once(0).chain(stream.iter().copied()).collect();
                Tensor::zeros(shape)
            })
            .collect();
        Self {
            obs,
            rewards: Vec::new(),
            agent_ids: Vec::new(),
            index: IndexMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.agent_ids.len()
    }

    pub(crate) fn obs(&self) -> &[Tensor] {
        &self.obs
    }

    pub(crate) fn rewards(&self) -> &[f32] {
        &self.rewards
    }

    pub(crate) fn agent_ids(&self) -> &[AgentId] {
        &self.agent_ids
    }

    pub(crate) fn index(&self) -> &IndexMap<AgentId, usize> {
        &self.index
    }

    pub(crate) fn index_of(&self, agent_id: AgentId) -> Result<usize, BatchError> {
        self.index
            .get(&agent_id)
            .copied()
            .ok_or(BatchError::UnknownAgent { agent_id })
    }

    /// One flat row slice per observation stream for the given row.
    pub(crate) fn obs_row(&self, row: usize) -> Vec<&[f32]> {
        self.obs.iter().map(|stream| stream.row(row)).collect()
    }
}
