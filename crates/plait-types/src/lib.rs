//! # plait-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the plait hair strand simulator.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other plait crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{PlaitError, PlaitResult};
pub use ids::{EdgeId, StrandId, VertexId};
pub use scalar::Scalar;
