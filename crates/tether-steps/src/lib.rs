//! Per-tick step batches exchanged between environment and policy.
//!
//! Each simulation tick produces one [`DecisionSteps`] (agents that
//! still need an action) and one [`TerminalSteps`] (agents whose
//! episode ended this tick), both built against a negotiated
//! [`BehaviorSpec`](tether_spec::BehaviorSpec). A given agent id
//! appears in at most one of the two batches per tick; the
//! partitioning is the environment adapter's duty.
//!
//! Batches are immutable, columnar, and indexable by
//! [`AgentId`](tether_core::AgentId) in O(1) through an eagerly built
//! id-to-row map. A kind with no current agents is represented by an
//! [`empty`](DecisionSteps::empty) batch that preserves the rank of
//! every observation stream, never by an absent value.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod columns;

pub mod decision;
pub mod error;
pub mod mask;
pub mod terminal;

pub use decision::{DecisionStep, DecisionSteps};
pub use error::BatchError;
pub use mask::BranchMask;
pub use terminal::{TerminalStep, TerminalSteps};
