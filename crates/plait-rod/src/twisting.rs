//! Twisting force at each interior vertex.
//!
//! `E = ½ kt (m - m̄)² / ℓ̄v`, where `m` is the discrete twist and `ℓ̄v` the
//! rest Voronoi length of the vertex.

use std::marker::PhantomData;

use plait_math::{Mat11, Vec11};
use plait_types::constants::DOFS_PER_VERTEX;
use plait_types::Scalar;

use crate::force::ForceTerm;
use crate::integration::{multiplier, IntegrationVars};
use crate::strand::StrandForce;
use crate::viscosity::{NonViscous, Viscosity};

#[derive(Debug, Clone, Copy, Default)]
pub struct TwistingForce<V: Viscosity = NonViscous>(PhantomData<V>);

impl<V: Viscosity> TwistingForce<V> {
    fn twist_delta(strand: &StrandForce, vtx: usize) -> Scalar {
        strand.state().twists()[vtx] - V::twist_bar(strand, vtx)
    }
}

impl<V: Viscosity> ForceTerm<11> for TwistingForce<V> {
    const FIRST: usize = 1;
    const LAST: usize = 1;
    const CONSTRAINTS_PER_STENCIL: usize = 1;

    fn name() -> String {
        format!("{}twisting", V::NAME)
    }

    fn local_dof(vtx: usize, local: usize) -> usize {
        DOFS_PER_VERTEX * (vtx - 1) + local
    }

    fn local_energy(strand: &StrandForce, vtx: usize) -> Scalar {
        let kt = V::kt(strand, vtx);
        let ilen = strand.rest().inv_voronoi_lengths[vtx];
        0.5 * kt * Self::twist_delta(strand, vtx).powi(2) * ilen
    }

    fn compute_local_force(out: &mut Vec11, strand: &StrandForce, vtx: usize) {
        let kt = V::kt(strand, vtx);
        let ilen = strand.rest().inv_voronoi_lengths[vtx];
        let delta = Self::twist_delta(strand, vtx);
        *out = strand.state().grad_twists()[vtx] * (-kt * ilen * delta);
    }

    fn compute_local_jacobian(out: &mut Mat11, strand: &StrandForce, vtx: usize) {
        let kt = V::kt(strand, vtx);
        let ilen = strand.rest().inv_voronoi_lengths[vtx];
        let delta = Self::twist_delta(strand, vtx);
        let grad = strand.state().grad_twists()[vtx];
        let hess = strand.state().hess_twists()[vtx];
        *out = (grad * grad.transpose() + hess * delta) * (-kt * ilen);
    }

    /// `Φ = m - m̄`, `K = kt / ℓ̄v`.
    fn add_integration_vars(
        strand: &StrandForce,
        vtx: usize,
        row: usize,
        dof_offset: usize,
        lambda: &[Scalar],
        vars: &mut IntegrationVars,
    ) {
        let kt = V::kt(strand, vtx);
        let ilen = strand.rest().inv_voronoi_lengths[vtx];
        let dof = |local| dof_offset + Self::local_dof(vtx, local);

        vars.set_phi(row, Self::twist_delta(strand, vtx));
        vars.stiffness.push((row, row, kt * ilen));

        let grad = strand.state().grad_twists()[vtx];
        for (i, value) in grad.iter().enumerate() {
            if *value != 0.0 {
                vars.j.push((row, dof(i), *value));
            }
        }
        let hess = strand.state().hess_twists()[vtx];
        vars.add_tilde_k(dof, multiplier(lambda, row), &hess);
    }
}
