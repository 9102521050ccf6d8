//! Shared driver for per-vertex force terms.
//!
//! A force term evaluates energy, force and Jacobian on a fixed-size local
//! stencil of `N` dofs around one vertex (or edge) and scatters the result
//! into strand-level buffers. Terms are zero-sized types selected at
//! compile time; the accumulation loops below are monomorphized per term.

use std::ops::Range;

use nalgebra::{SMatrix, SVector};
use plait_math::Triplet;
use plait_types::Scalar;

use crate::integration::{IntegrationOffsets, IntegrationVars};
use crate::strand::StrandForce;

/// A local elastic or viscous energy term over an `N`-dof stencil.
pub trait ForceTerm<const N: usize> {
    /// First stencil index.
    const FIRST: usize;
    /// Number of trailing vertices without a stencil.
    const LAST: usize;
    /// Constraint rows contributed by each stencil.
    const CONSTRAINTS_PER_STENCIL: usize;

    fn name() -> String;

    /// Global dof (within the strand) of local stencil entry `local`.
    fn local_dof(vtx: usize, local: usize) -> usize;

    fn local_energy(strand: &StrandForce, vtx: usize) -> Scalar;

    /// Negative energy gradient over the stencil.
    fn compute_local_force(out: &mut SVector<Scalar, N>, strand: &StrandForce, vtx: usize);

    /// Derivative of the local force (negative energy Hessian).
    fn compute_local_jacobian(out: &mut SMatrix<Scalar, N, N>, strand: &StrandForce, vtx: usize);

    /// Adds the constraint rows of stencil `vtx`, starting at global row
    /// `row`.
    fn add_integration_vars(
        strand: &StrandForce,
        vtx: usize,
        row: usize,
        dof_offset: usize,
        lambda: &[Scalar],
        vars: &mut IntegrationVars,
    );

    /// Stencil indices visited on a strand of `num_vertices` vertices.
    fn vertex_range(num_vertices: usize) -> Range<usize> {
        Self::FIRST..num_vertices.saturating_sub(Self::LAST)
    }

    fn num_constraints(num_vertices: usize) -> usize {
        Self::vertex_range(num_vertices).len() * Self::CONSTRAINTS_PER_STENCIL
    }

    fn add_in_position(force: &mut [Scalar], vtx: usize, local: &SVector<Scalar, N>) {
        for i in 0..N {
            force[Self::local_dof(vtx, i)] += local[i];
        }
    }

    fn add_in_jacobian(
        triplets: &mut Vec<Triplet>,
        dof_offset: usize,
        vtx: usize,
        local: &SMatrix<Scalar, N, N>,
    ) {
        for j in 0..N {
            let col = dof_offset + Self::local_dof(vtx, j);
            for i in 0..N {
                let value = local[(i, j)];
                if value != 0.0 {
                    triplets.push((dof_offset + Self::local_dof(vtx, i), col, value));
                }
            }
        }
    }

    fn accumulate_current_e(strand: &StrandForce) -> Scalar {
        Self::vertex_range(strand.num_vertices())
            .map(|vtx| Self::local_energy(strand, vtx))
            .sum()
    }

    /// Scatter-adds the term's force into `force`, a caller-zeroed buffer
    /// of the strand's dofs.
    fn accumulate_current_f(force: &mut [Scalar], strand: &StrandForce) {
        debug_assert!(force.len() >= strand.num_dofs());
        let mut local = SVector::<Scalar, N>::zeros();
        for vtx in Self::vertex_range(strand.num_vertices()) {
            Self::compute_local_force(&mut local, strand, vtx);
            Self::add_in_position(force, vtx, &local);
        }
    }

    fn accumulate_current_j(triplets: &mut Vec<Triplet>, dof_offset: usize, strand: &StrandForce) {
        let mut local = SMatrix::<Scalar, N, N>::zeros();
        for vtx in Self::vertex_range(strand.num_vertices()) {
            Self::compute_local_jacobian(&mut local, strand, vtx);
            Self::add_in_jacobian(triplets, dof_offset, vtx, &local);
        }
    }

    /// Appends this term's constraints at `offsets`; returns the number of
    /// rows used.
    fn accumulate_integration_vars(
        strand: &StrandForce,
        offsets: IntegrationOffsets,
        lambda: &[Scalar],
        vars: &mut IntegrationVars,
    ) -> usize {
        let range = Self::vertex_range(strand.num_vertices());
        for (c, vtx) in range.enumerate() {
            let row = offsets.constraint + c * Self::CONSTRAINTS_PER_STENCIL;
            Self::add_integration_vars(strand, vtx, row, offsets.dof, lambda, vars);
        }
        Self::num_constraints(strand.num_vertices())
    }
}
