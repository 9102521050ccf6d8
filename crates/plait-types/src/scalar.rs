//! Scalar type alias for the simulation.
//!
//! Rod energies mix fourth powers of the radius with squared curvatures,
//! so the force model runs in double precision throughout.

/// The floating-point type used throughout the simulation.
pub type Scalar = f64;
