//! The action-distribution engine.
//!
//! Converts raw network outputs into sampleable, scoreable
//! probability distributions over action spaces:
//!
//! - [`GaussianHead`] projects hidden features to a diagonal
//!   [`GaussianDist`] (optionally tanh-squashed to (-1, 1)) for
//!   continuous spaces.
//! - [`MultiCategoricalHead`] projects hidden features to one masked,
//!   renormalized [`CategoricalDist`] per discrete branch.
//!
//! The trainer-facing surface is the closed [`ActionDistribution`]
//! variant set: `sample` / `log_prob` / `entropy`, plus
//! `all_log_prob` for the discrete family. All sampling goes through a
//! caller-supplied RNG, so determinism is a seeding decision.
//!
//! Numeric edge cases (std underflowing to zero, rows whose every
//! action is masked) are epsilon-floored, never errors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod categorical;
pub mod dist;
pub mod gaussian;
pub mod head;
pub mod linear;
pub mod mask;

pub use categorical::CategoricalDist;
pub use dist::{ActionDistribution, ActionValue};
pub use gaussian::{GaussianDist, TanhGaussianDist};
pub use head::{GaussianHead, MultiCategoricalHead, LOG_SIGMA_MAX, LOG_SIGMA_MIN};
pub use linear::Linear;
pub use mask::{allowed_mask, ones_mask};
