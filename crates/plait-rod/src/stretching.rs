//! Stretching force on each edge.
//!
//! `E = ½ ks (ℓ/ℓ̄ - 1)² ℓ̄` over the 6 position dofs of the edge's two
//! endpoints.

use std::marker::PhantomData;

use glam::DMat3;
use plait_math::local::{outer, set_block3, set_segment3};
use plait_math::{Mat6, Vec6};
use plait_types::constants::DOFS_PER_VERTEX;
use plait_types::Scalar;

use crate::force::ForceTerm;
use crate::integration::{multiplier, IntegrationVars};
use crate::strand::StrandForce;
use crate::viscosity::{NonViscous, Viscosity};

#[derive(Debug, Clone, Copy, Default)]
pub struct StretchingForce<V: Viscosity = NonViscous>(PhantomData<V>);

impl<V: Viscosity> ForceTerm<6> for StretchingForce<V> {
    const FIRST: usize = 0;
    const LAST: usize = 1;
    const CONSTRAINTS_PER_STENCIL: usize = 1;

    fn name() -> String {
        format!("{}stretching", V::NAME)
    }

    fn local_dof(vtx: usize, local: usize) -> usize {
        if local < 3 {
            DOFS_PER_VERTEX * vtx + local
        } else {
            DOFS_PER_VERTEX * (vtx + 1) + local - 3
        }
    }

    fn local_energy(strand: &StrandForce, vtx: usize) -> Scalar {
        let ks = V::ks(strand, vtx);
        let rest = V::ell_bar(strand, vtx);
        let length = strand.state().lengths()[vtx];
        0.5 * ks * (length / rest - 1.0).powi(2) * rest
    }

    fn compute_local_force(out: &mut Vec6, strand: &StrandForce, vtx: usize) {
        let ks = V::ks(strand, vtx);
        let rest = V::ell_bar(strand, vtx);
        let length = strand.state().lengths()[vtx];
        let tangent = strand.state().tangents()[vtx];

        let f = tangent * (ks * (length / rest - 1.0));
        set_segment3(out, 0, 0, f);
        set_segment3(out, 3, 0, -f);
    }

    fn compute_local_jacobian(out: &mut Mat6, strand: &StrandForce, vtx: usize) {
        let ks = V::ks(strand, vtx);
        let rest = V::ell_bar(strand, vtx);
        let length = strand.state().lengths()[vtx];
        let edge = strand.state().edges()[vtx];

        let m = (DMat3::IDENTITY * (1.0 / rest - 1.0 / length)
            + outer(edge, edge) * (1.0 / length.powi(3)))
            * ks;
        set_block3(out, 0, 0, &-m);
        set_block3(out, 3, 3, &-m);
        set_block3(out, 0, 3, &m);
        set_block3(out, 3, 0, &m);
    }

    /// `Φ = ℓ - ℓ̄`, `K = ks / ℓ̄`.
    fn add_integration_vars(
        strand: &StrandForce,
        vtx: usize,
        row: usize,
        dof_offset: usize,
        lambda: &[Scalar],
        vars: &mut IntegrationVars,
    ) {
        let ks = V::ks(strand, vtx);
        let rest = V::ell_bar(strand, vtx);
        let length = strand.state().lengths()[vtx];
        let t = strand.state().tangents()[vtx];
        let dof = |local| dof_offset + Self::local_dof(vtx, local);

        vars.set_phi(row, length - rest);
        vars.stiffness.push((row, row, ks / rest));
        for k in 0..3 {
            vars.j.push((row, dof(k), -t[k]));
            vars.j.push((row, dof(3 + k), t[k]));
        }

        let lambda = multiplier(lambda, row);
        if lambda != 0.0 {
            let h = (DMat3::IDENTITY - outer(t, t)) * (lambda / length);
            for j in 0..3 {
                for i in 0..3 {
                    let value = h.col(j)[i];
                    vars.tilde_k.push((dof(i), dof(j), value));
                    vars.tilde_k.push((dof(3 + i), dof(3 + j), value));
                    vars.tilde_k.push((dof(i), dof(3 + j), -value));
                    vars.tilde_k.push((dof(3 + i), dof(j), -value));
                }
            }
        }
    }
}
