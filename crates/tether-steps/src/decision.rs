//! The non-terminal step batch: agents that still need an action.

use indexmap::IndexMap;

use tether_core::{AgentId, Tensor};
use tether_spec::BehaviorSpec;

use crate::columns::Columns;
use crate::error::BatchError;
use crate::mask::BranchMask;

/// Per-agent data for one simulation tick, for agents that still need
/// an action.
///
/// Columnar and immutable: one tensor per observation stream (leading
/// dimension = number of agents), a reward per agent, an agent id per
/// row, and — for discrete action spaces only — one [`BranchMask`]
/// per branch marking disallowed actions (`true` = disallowed).
///
/// For continuous specs `action_masks` is `None`; absence is the
/// contract, not an empty list. `Some(vec![])` is distinct and means
/// "a discrete spec whose adapter masked nothing this tick".
///
/// Rebuilt every tick, never mutated in place.
#[derive(Clone, Debug)]
pub struct DecisionSteps {
    columns: Columns,
    action_masks: Option<Vec<BranchMask>>,
}

/// Borrowed view of a single agent's row within a [`DecisionSteps`].
#[derive(Clone, Debug)]
pub struct DecisionStep<'a> {
    /// One flat row slice per observation stream, in stream order.
    pub obs: Vec<&'a [f32]>,
    /// Reward accumulated since the agent's previous decision.
    pub reward: f32,
    /// Per-branch legality rows (`true` = disallowed); `None` for
    /// continuous action spaces.
    pub action_mask: Option<Vec<&'a [bool]>>,
}

impl DecisionSteps {
    /// Build a batch from its columns.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::ShapeMismatch`] if any observation
    /// stream, the reward column, or a mask grid disagrees with
    /// `agent_ids.len()` on the leading dimension.
    ///
    /// Duplicate agent ids are an upstream precondition violation and
    /// are only debug-checked.
    pub fn new(
        obs: Vec<Tensor>,
        rewards: Vec<f32>,
        agent_ids: Vec<AgentId>,
        action_masks: Option<Vec<BranchMask>>,
    ) -> Result<Self, BatchError> {
        let n = agent_ids.len();
        let columns = Columns::new(obs, rewards, agent_ids)?;
        if let Some(masks) = &action_masks {
            for mask in masks {
                if mask.rows() != n {
                    return Err(BatchError::ShapeMismatch {
                        what: "action mask",
                        expected: n,
                        got: mask.rows(),
                    });
                }
            }
        }
        Ok(Self {
            columns,
            action_masks,
        })
    }

    /// Build the zero-agent batch for a behavior.
    ///
    /// Every observation tensor has shape (0, *stream_shape) — the
    /// rank is preserved so downstream shape contracts hold. This is
    /// the steady-state batch when no agents of this kind exist this
    /// tick.
    pub fn empty(spec: &BehaviorSpec) -> Self {
        Self {
            columns: Columns::empty(spec),
            action_masks: None,
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

    /// Per-agent rewards, length `len()`.
    pub fn rewards(&self) -> &[f32] {
        self.columns.rewards()
    }

    /// Agent ids in row order.
    pub fn agent_ids(&self) -> &[AgentId] {
        self.columns.agent_ids()
    }

    /// Per-branch disallowed-action masks, if the adapter supplied
    /// any. `None` for continuous action spaces.
    pub fn action_masks(&self) -> Option<&[BranchMask]> {
        self.action_masks.as_deref()
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
    pub fn get(&self, agent_id: AgentId) -> Result<DecisionStep<'_>, BatchError> {
        let row = self.columns.index_of(agent_id)?;
        let action_mask = self
            .action_masks
            .as_ref()
            .map(|masks| masks.iter().map(|m| m.row(row)).collect());
        Ok(DecisionStep {
            obs: self.columns.obs_row(row),
            reward: self.columns.rewards()[row],
            action_mask,
        })
    }

    /// Iterate agent ids in row order. Restartable and finite.
    pub fn iter_agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.columns.agent_ids().iter().copied()
    }
}
