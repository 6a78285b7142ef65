//! Core types for the Tether policy/environment contract.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the building blocks used throughout the Tether workspace: the
//! [`AgentId`] identifier, error types, the flat [`Tensor`] buffer,
//! and shared numeric utilities.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod numeric;
pub mod tensor;

pub use error::{ShapeError, SpecError};
pub use id::AgentId;
pub use numeric::EPSILON;
pub use tensor::{ObsShape, Tensor};
