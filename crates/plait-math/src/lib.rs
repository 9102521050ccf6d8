//! # plait-math
//!
//! Linear algebra primitives for the plait strand simulator.
//!
//! Provides:
//! - Re-exports of the double-precision `glam` types (`DVec3`, `DMat3`)
//!   used for per-edge geometry
//! - Fixed-size `nalgebra` aliases for local stencil buffers (2, 6 and 11 dof)
//! - Frame transport and twist-angle helpers
//! - Sparse triplet assembly (CSR) with a bridge to `faer`

pub mod frames;
pub mod local;
pub mod sparse;

// Re-export glam types as the canonical geometric types for plait.
pub use glam::{DMat3, DVec3};

pub use local::{GradKappa, Mat11, Mat2, Mat6, Vec11, Vec2, Vec6};
pub use sparse::{CsrMatrix, Triplet};
