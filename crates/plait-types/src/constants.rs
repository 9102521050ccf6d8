//! Physical constants and simulation defaults.

use crate::Scalar;

/// Exponent of the animal-hair taper fit `exp(-TAPER_EXPONENT * s)`.
pub const TAPER_EXPONENT: Scalar = 3.4612;

/// Floor applied to `chi = 1 + t_e · t_f` when two consecutive edges fold back
/// onto each other.
pub const MIN_CHI: Scalar = 1.0e-12;

/// Below this norm two tangents are treated as parallel by frame transport.
pub const PARALLEL_EPSILON: Scalar = 1.0e-12;

/// Scalar degrees of freedom carried by each vertex (position + twist of the
/// outgoing edge). The last vertex carries only 3.
pub const DOFS_PER_VERTEX: usize = 4;

/// Minimum vertex count for a strand with at least one bending stencil.
pub const MIN_STRAND_VERTICES: usize = 3;
