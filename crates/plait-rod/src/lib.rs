//! # plait-rod
//!
//! Discrete elastic rod force model for hair strands.
//!
//! ## Key Types
//!
//! - [`StrandForce`] — one strand's dofs, caches and force accumulation
//! - [`DependencyGraph`] / [`DependencyNode`] — lazily recomputed caches
//!   with transitive invalidation
//! - [`StrandParameters`] — stiffness, taper and viscous coefficients
//! - [`ForceTerm`] — per-vertex stretching, twisting and bending terms,
//!   each generic over [`NonViscous`] / [`Viscous`]
//! - [`IntegrationVars`] — constraint-form triplets for implicit solvers

pub mod bending;
pub mod config;
pub mod curvature;
pub mod equilibrium;
pub mod force;
pub mod frames;
pub mod graph;
pub mod integration;
pub mod kinematics;
pub mod parameters;
pub mod state;
pub mod strand;
pub mod stretching;
pub mod twist;
pub mod twisting;
pub mod viscosity;

pub use bending::BendingForce;
pub use config::ForceConfig;
pub use equilibrium::StrandEquilibriumParameters;
pub use force::ForceTerm;
pub use graph::{DependencyGraph, DependencyNode, NodeId};
pub use integration::{IntegrationOffsets, IntegrationVars};
pub use parameters::StrandParameters;
pub use state::{RestState, StartState, StrandState};
pub use strand::StrandForce;
pub use stretching::StretchingForce;
pub use twisting::TwistingForce;
pub use viscosity::{NonViscous, Viscosity, Viscous};
