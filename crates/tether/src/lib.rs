//! Tether: the interaction contract between a reinforcement-learning
//! policy and a simulated environment.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Tether sub-crates. For most users, adding `tether` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tether::prelude::*;
//!
//! // The contract negotiated with the environment: two observation
//! // streams and a three-branch discrete action space.
//! let spec = BehaviorSpec::new(
//!     vec![[3, 2].into_iter().collect(), [5].into_iter().collect()],
//!     ActionSpec::discrete(vec![3, 3, 2]).unwrap(),
//! )
//! .unwrap();
//!
//! // No agents yet: the empty batch still carries the shape contract.
//! let decisions = DecisionSteps::empty(&spec);
//! assert!(decisions.is_empty());
//! assert_eq!(decisions.obs()[0].shape(), &[0, 3, 2]);
//!
//! // Warm-up actions are always available from the spec.
//! let actions = spec.create_empty_action(4);
//! assert_eq!(actions.num_agents(), 4);
//! assert_eq!(actions.width(), 3);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tether-core` | `AgentId`, `Tensor`, errors, numeric utilities |
//! | [`spec`] | `tether-spec` | `ActionSpec`, `BehaviorSpec`, action buffers |
//! | [`steps`] | `tether-steps` | `DecisionSteps`, `TerminalSteps`, branch masks |
//! | [`dist`] | `tether-dist` | Distributions, parameter heads, mask conversion |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and numeric utilities (`tether-core`).
///
/// Contains [`types::AgentId`], the flat [`types::Tensor`] buffer,
/// the error enums, and the shared [`types::EPSILON`] floor.
pub use tether_core as types;

/// Action and behavior specifications (`tether-spec`).
///
/// Build an [`spec::ActionSpec`] and a [`spec::BehaviorSpec`]; use the
/// spec as a factory for zero-filled and random action buffers.
pub use tether_spec as spec;

/// Per-tick step batches (`tether-steps`).
///
/// [`steps::DecisionSteps`] for agents that need an action,
/// [`steps::TerminalSteps`] for agents whose episode ended.
pub use tether_steps as steps;

/// The action-distribution engine (`tether-dist`).
///
/// Parameter heads ([`dist::GaussianHead`],
/// [`dist::MultiCategoricalHead`]) and the closed
/// [`dist::ActionDistribution`] surface.
pub use tether_dist as dist;

/// Common imports for typical Tether usage.
///
/// ```rust
/// use tether::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tether_core::{AgentId, ObsShape, Tensor, EPSILON};

    // Errors
    pub use tether_core::{ShapeError, SpecError};
    pub use tether_steps::BatchError;

    // Specs and action buffers
    pub use tether_spec::{ActionBuffer, ActionSpec, BehaviorSpec, DiscreteActions};

    // Step batches
    pub use tether_steps::{
        BranchMask, DecisionStep, DecisionSteps, TerminalStep, TerminalSteps,
    };

    // Distribution engine
    pub use tether_dist::{
        allowed_mask, ones_mask, ActionDistribution, ActionValue, CategoricalDist, GaussianDist,
        GaussianHead, MultiCategoricalHead, TanhGaussianDist,
    };
}
