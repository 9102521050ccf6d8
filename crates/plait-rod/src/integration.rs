//! Constraint-form variables for the implicit integrator.
//!
//! Every force term can be written as a compliant constraint with measure
//! `Φ(x)` and stiffness `K`, so that `E = ½ Φᵀ K Φ`. The integrator
//! assembles, across all strands:
//!
//! - `J = ∂Φ/∂x` (constraint rows × dof columns)
//! - `K` (constraint × constraint)
//! - `Φ`
//! - `K̃ = Σ λc ∇²Φc` for caller-supplied multipliers `λ`
//!
//! With `λ = -KΦ`, `-JᵀKJ + K̃` is the force Jacobian.

use plait_math::{Mat11, Triplet};
use plait_types::Scalar;

/// Where a strand's rows and columns start in the global system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegrationOffsets {
    /// First constraint row.
    pub constraint: usize,
    /// First dof column.
    pub dof: usize,
}

/// Sparse triplets of the constraint-form system.
#[derive(Debug, Clone, Default)]
pub struct IntegrationVars {
    pub j: Vec<Triplet>,
    pub tilde_k: Vec<Triplet>,
    pub stiffness: Vec<Triplet>,
    pub phi: Vec<Scalar>,
}

impl IntegrationVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `Φ` at a global constraint row, growing the vector if needed.
    pub fn set_phi(&mut self, row: usize, value: Scalar) {
        if self.phi.len() <= row {
            self.phi.resize(row + 1, 0.0);
        }
        self.phi[row] = value;
    }

    pub fn num_constraints(&self) -> usize {
        self.phi.len()
    }

    pub fn clear(&mut self) {
        self.j.clear();
        self.tilde_k.clear();
        self.stiffness.clear();
        self.phi.clear();
    }

    /// Adds `λ H` for an 11-dof stencil Hessian, skipping zero entries.
    pub(crate) fn add_tilde_k(&mut self, dof: impl Fn(usize) -> usize, lambda: Scalar, h: &Mat11) {
        if lambda == 0.0 {
            return;
        }
        for j in 0..11 {
            for i in 0..11 {
                let value = h[(i, j)];
                if value != 0.0 {
                    self.tilde_k.push((dof(i), dof(j), lambda * value));
                }
            }
        }
    }
}

/// Reads a multiplier, treating rows past the end of `lambda` as zero.
#[inline]
pub(crate) fn multiplier(lambda: &[Scalar], row: usize) -> Scalar {
    lambda.get(row).copied().unwrap_or(0.0)
}
