//! Action and behavior specifications for Tether environments.
//!
//! A [`BehaviorSpec`] is the contract negotiated once between an
//! environment and a policy: the observation stream shapes plus an
//! [`ActionSpec`]. Step batches are validated against it, and it acts
//! as a factory for zero-filled and random [`ActionBuffer`]s used for
//! warm-up and fallback action generation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod behavior;
pub mod buffer;

pub use action::ActionSpec;
pub use behavior::BehaviorSpec;
pub use buffer::{ActionBuffer, DiscreteActions};
