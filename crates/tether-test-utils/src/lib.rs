//! Test utilities and mock step batches for Tether development.
//!
//! Provides deterministic RNG construction, constant-filled feature
//! tensors, and [`mock_steps`] — a canned (decision, terminal) batch
//! pair imitating constant observations and unit rewards.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use tether_core::{AgentId, Tensor};
use tether_spec::BehaviorSpec;
use tether_steps::{BranchMask, DecisionSteps, TerminalSteps};

/// Deterministic RNG for tests. Same seed, same stream.
pub fn test_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A constant-filled feature tensor of shape (rows, width), standing
/// in for a network's hidden activations.
pub fn hidden_rows(rows: usize, width: usize, value: f32) -> Tensor {
    let mut t = Tensor::zeros([rows, width].into_iter().collect());
    for v in t.data_mut() {
        *v = value;
    }
    t
}

/// Build a mock (decision, terminal) batch pair against `spec`.
///
/// Observations are all-ones per stream, rewards are 1.0, and agent
/// ids run 0..num_agents. Discrete specs get an all-allowed mask per
/// branch. When `done` is true the populated batch is the terminal
/// one (all agents naturally ended, not interrupted) and the decision
/// batch is empty, mirroring an episode-ending tick; otherwise the
/// decision batch is populated and the terminal batch is empty.
pub fn mock_steps(
    spec: &BehaviorSpec,
    num_agents: usize,
    done: bool,
) -> (DecisionSteps, TerminalSteps) {
    let obs: Vec<Tensor> = spec
        .observation_shapes()
        .iter()
        .map(|stream| {
            let shape = std::iter::once(num_agents)
                .chain(stream.iter().copied())
                .collect();
            let mut t = Tensor::zeros(shape);
            for v in t.data_mut() {
                *v = 1.0;
            }
            t
        })
        .collect();
    let rewards = vec![1.0; num_agents];
    let agent_ids: Vec<AgentId> = (0..num_agents as i32).map(AgentId).collect();

    if done {
        let terminal = TerminalSteps::new(obs, rewards, agent_ids, vec![false; num_agents])
            .expect("mock columns agree by construction");
        (DecisionSteps::empty(spec), terminal)
    } else {
        let masks = spec.action_spec().discrete_branches().map(|branches| {
            branches
                .iter()
                .map(|&size| BranchMask::all_allowed(num_agents, size))
                .collect::<Vec<_>>()
        });
        let decision = DecisionSteps::new(obs, rewards, agent_ids, masks)
            .expect("mock columns agree by construction");
        (decision, TerminalSteps::empty(spec))
    }
}
