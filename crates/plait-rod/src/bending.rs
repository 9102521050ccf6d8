//! Bending force at each interior vertex.
//!
//! `E = ½ (κ - κ̄)ᵀ B (κ - κ̄) / ℓ̄v` with `B = c · B₀`, where `B₀` is the
//! bending-matrix base and `c` the elastic or viscous bending coefficient.
//! The Jacobian reuses the shared `Gᵀ B₀ G` products, scaled by `c`.

use std::marker::PhantomData;

use plait_math::{Mat11, Vec11, Vec2};
use plait_types::constants::DOFS_PER_VERTEX;
use plait_types::Scalar;

use crate::force::ForceTerm;
use crate::integration::{multiplier, IntegrationVars};
use crate::strand::StrandForce;
use crate::viscosity::{NonViscous, Viscosity};

#[derive(Debug, Clone, Copy, Default)]
pub struct BendingForce<V: Viscosity = NonViscous>(PhantomData<V>);

impl<V: Viscosity> BendingForce<V> {
    fn kappa_delta(strand: &StrandForce, vtx: usize) -> Vec2 {
        strand.state().kappas()[vtx] - V::kappa_bar(strand, vtx)
    }
}

impl<V: Viscosity> ForceTerm<11> for BendingForce<V> {
    const FIRST: usize = 1;
    const LAST: usize = 1;
    const CONSTRAINTS_PER_STENCIL: usize = 2;

    fn name() -> String {
        format!("{}bending", V::NAME)
    }

    fn local_dof(vtx: usize, local: usize) -> usize {
        DOFS_PER_VERTEX * (vtx - 1) + local
    }

    fn local_energy(strand: &StrandForce, vtx: usize) -> Scalar {
        let b = strand.bending_matrix_base() * V::bending_coefficient(strand, vtx);
        let ilen = strand.rest().inv_voronoi_lengths[vtx];
        let delta = Self::kappa_delta(strand, vtx);
        0.5 * ilen * delta.dot(&(b * delta))
    }

    fn compute_local_force(out: &mut Vec11, strand: &StrandForce, vtx: usize) {
        let b = strand.bending_matrix_base() * V::bending_coefficient(strand, vtx);
        let ilen = strand.rest().inv_voronoi_lengths[vtx];
        let delta = Self::kappa_delta(strand, vtx);
        *out = strand.state().grad_kappas()[vtx] * (b * delta) * -ilen;
    }

    fn compute_local_jacobian(out: &mut Mat11, strand: &StrandForce, vtx: usize) {
        let coefficient = V::bending_coefficient(strand, vtx);
        let ilen = strand.rest().inv_voronoi_lengths[vtx];
        let temp = strand.bending_matrix_base() * Self::kappa_delta(strand, vtx);

        *out = strand.bending_products()[vtx];
        let hess = strand.state().hess_kappas();
        let (h0, h1) = &hess[vtx];
        *out += h0 * temp[0] + h1 * temp[1];
        *out *= -ilen * coefficient;
    }

    /// `Φ = κ - κ̄` (two rows), `K = B / ℓ̄v`.
    fn add_integration_vars(
        strand: &StrandForce,
        vtx: usize,
        row: usize,
        dof_offset: usize,
        lambda: &[Scalar],
        vars: &mut IntegrationVars,
    ) {
        let k = strand.bending_matrix_base()
            * (V::bending_coefficient(strand, vtx) * strand.rest().inv_voronoi_lengths[vtx]);
        let delta = Self::kappa_delta(strand, vtx);
        let dof = |local| dof_offset + Self::local_dof(vtx, local);

        let grad = strand.state().grad_kappas()[vtx];
        let hess = strand.state().hess_kappas();
        let (h0, h1) = &hess[vtx];
        let hessians = [h0, h1];

        for c in 0..2 {
            vars.set_phi(row + c, delta[c]);
            for d in 0..2 {
                vars.stiffness.push((row + c, row + d, k[(c, d)]));
            }
            for i in 0..11 {
                let value = grad[(i, c)];
                if value != 0.0 {
                    vars.j.push((row + c, dof(i), value));
                }
            }
            vars.add_tilde_k(dof, multiplier(lambda, row + c), hessians[c]);
        }
    }
}
