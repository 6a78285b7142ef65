//! The terminal step batch: agents whose episode ended this tick.

use indexmap::IndexMap;

use tether_core::{AgentId, Tensor};
use tether_spec::BehaviorSpec;

use crate::columns::Columns;
use crate::error::BatchError;

/// Per-agent data for one simulation tick, for agents whose episode
/// ended this tick.
///
/// Same columnar layout as
/// [`DecisionSteps`](crate::DecisionSteps), with an `interrupted` flag
/// per agent instead of action masks: `true` when termination came
/// from an external limit (e.g., a step cap) rather than a natural
/// episode end. Trainers use the flag to decide whether to bootstrap
/// the value of the final state.
#[derive(Clone, Debug)]
pub struct TerminalSteps {
    columns: Columns,
    interrupted: Vec<bool>,
}

/// Borrowed view of a single agent's row within a [`TerminalSteps`].
#[derive(Clone, Debug)]
pub struct TerminalStep<'a> {
    /// One flat row slice per observation stream, in stream order.
    pub obs: Vec<&'a [f32]>,
    /// Final reward for the episode's last transition.
    pub reward: f32,
    /// Whether termination was externally imposed.
    pub interrupted: bool,
}

impl TerminalSteps {
    /// Build a batch from its columns.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::ShapeMismatch`] if any observation
    /// stream, the reward column, or the `interrupted` column
    /// disagrees with `agent_ids.len()` on the leading dimension.
    pub fn new(
        obs: Vec<Tensor>,
        rewards: Vec<f32>,
        agent_ids: Vec<AgentId>,
        interrupted: Vec<bool>,
    ) -> Result<Self, BatchError> {
        let n = agent_ids.len();
        let columns = Columns::new(obs, rewards, agent_ids)?;
        if interrupted.len() != n {
            return Err(BatchError::ShapeMismatch {
                what: "interrupted",
                expected: n,
                got: interrupted.len(),
            });
        }
        Ok(Self {
            columns,
            interrupted,
        })
    }

    /// Build the zero-agent batch for a behavior.
    ///
    /// See [`DecisionSteps::empty`](crate::DecisionSteps::empty); the
    /// same rank-preservation contract applies.
    pub fn empty(spec: &BehaviorSpec) -> Self {
        Self {
            columns: Columns::empty(spec),
            interrupted: Vec::new(),
        }
    }

    /// Number of agents in the batch.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the batch has no agents.
    pub fn is_empty(&self) -> bool {
        self.columns.len() == 0
    }

    /// One tensor per observation stream, leading dimension `len()`.
    pub fn obs(&self) -> &[Tensor] {
        self.columns.obs()
    }

    /// Per-agent final rewards, length `len()`.
    pub fn rewards(&self) -> &[f32] {
        self.columns.rewards()
    }

    /// Agent ids in row order.
    pub fn agent_ids(&self) -> &[AgentId] {
        self.columns.agent_ids()
    }

    /// Per-agent interruption flags, length `len()`.
    pub fn interrupted(&self) -> &[bool] {
        &self.interrupted
    }

    /// The id-to-row map, built once at construction.
    pub fn agent_id_to_index(&self) -> &IndexMap<AgentId, usize> {
        self.columns.index()
    }

    /// Row index of `agent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::UnknownAgent`] if the id is not in this
    /// batch.
    pub fn index_of(&self, agent_id: AgentId) -> Result<usize, BatchError> {
        self.columns.index_of(agent_id)
    }

    /// O(1) single-agent view by id.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::UnknownAgent`] if the id is not in this
    /// batch.
    pub fn get(&self, agent_id: AgentId) -> Result<TerminalStep<'_>, BatchError> {
        let row = self.columns.index_of(agent_id)?;
        Ok(TerminalStep {
            obs: self.columns.obs_row(row),
            reward: self.columns.rewards()[row],
            interrupted: self.interrupted[row],
        })
    }

    /// Iterate agent ids in row order. Restartable and finite.
    pub fn iter_agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.columns.agent_ids().iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_spec::ActionSpec;

    fn ids(raw: &[i32]) -> Vec<AgentId> {
        raw.iter().copied().map(AgentId).collect()
    }

    fn three_agent_batch() -> TerminalSteps {
        TerminalSteps::new(
            vec![Tensor::new(
                [3, 4].into_iter().collect(),
                (0..12).map(|v| v as f32).collect(),
            )
            .unwrap()],
            vec![0.0, 1.0, 2.0],
            ids(&[10, 11, 12]),
            vec![true, false, true],
        )
        .unwrap()
    }

    #[test]
    fn index_map_follows_row_order() {
        let ts = three_agent_batch();
        assert_eq!(ts.index_of(AgentId(10)).unwrap(), 0);
        assert_eq!(ts.index_of(AgentId(11)).unwrap(), 1);
        assert_eq!(ts.index_of(AgentId(12)).unwrap(), 2);
        assert!(ts.index_of(AgentId(-1)).is_err());
        for agent_id in ts.iter_agents() {
            assert!(ts.index_of(agent_id).unwrap() < 3);
        }
    }

    #[test]
    fn interruption_flags_project_per_agent() {
        let ts = three_agent_batch();
        assert!(ts.get(AgentId(10)).unwrap().interrupted);
        assert!(!ts.get(AgentId(11)).unwrap().interrupted);
        assert!(ts.get(AgentId(12)).unwrap().interrupted);
    }

    #[test]
    fn empty_preserves_stream_rank() {
        let spec = BehaviorSpec::new(
            vec![[3, 2].into_iter().collect(), [5].into_iter().collect()],
            ActionSpec::continuous(3).unwrap(),
        )
        .unwrap();
        let ts = TerminalSteps::empty(&spec);
        assert!(ts.is_empty());
        assert_eq!(ts.obs().len(), 2);
        assert_eq!(ts.obs()[0].shape(), &[0, 3, 2]);
        assert_eq!(ts.obs()[1].shape(), &[0, 5]);
        assert!(ts.interrupted().is_empty());
    }

    #[test]
    fn interrupted_length_mismatch_is_rejected() {
        let err = TerminalSteps::new(
            vec![Tensor::zeros([2, 4].into_iter().collect())],
            vec![0.0; 2],
            ids(&[1, 2]),
            vec![false; 3],
        )
        .unwrap_err();
        assert_eq!(
            err,
            BatchError::ShapeMismatch {
                what: "interrupted",
                expected: 2,
                got: 3
            }
        );
    }
}
