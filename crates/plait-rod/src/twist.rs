//! Reference twists, total twists and their derivatives.

use std::cell::Ref;

use glam::DMat3;
use plait_math::frames::{orthonormal_parallel_transport, rotate_axis_angle, signed_angle};
use plait_math::local::{cross_matrix, outer, set_segment3};
use plait_math::{Mat11, Vec11};
use plait_types::Scalar;

use crate::curvature::{chi, set_position_blocks};
use crate::state::{theta, StrandState};

impl StrandState {
    /// Twist of the reference frame between consecutive edges.
    ///
    /// Updated incrementally from the previous value so the result stays
    /// continuous across multiples of 2π.
    pub fn reference_twists(&self) -> Ref<'_, Vec<Scalar>> {
        let node = &self.reference_twists;
        node.get(&self.graph, |twists| {
            let tangents = self.tangents();
            let u = self.reference_frames1();
            for v in node.first_valid()..node.size() {
                let t1 = tangents[v];
                let moved = orthonormal_parallel_transport(u[v - 1], tangents[v - 1], t1);
                let moved = rotate_axis_angle(moved, t1, twists[v]);
                twists[v] += signed_angle(moved, u[v], t1);
            }
        })
    }

    /// `m = reference twist + θf - θe` at each interior vertex.
    pub fn twists(&self) -> Ref<'_, Vec<Scalar>> {
        let node = &self.twists;
        node.get(&self.graph, |twists| {
            let reference = self.reference_twists();
            let dofs = self.dofs();
            for v in node.first_valid()..node.size() {
                twists[v] = reference[v] + theta(&dofs, v) - theta(&dofs, v - 1);
            }
        })
    }

    pub fn grad_twists(&self) -> Ref<'_, Vec<Vec11>> {
        let node = &self.grad_twists;
        node.get(&self.graph, |grads| {
            let lengths = self.lengths();
            let kb = self.curvature_binormals();
            for v in node.first_valid()..node.size() {
                let first = kb[v] * (-0.5 / lengths[v - 1]);
                let last = kb[v] * (0.5 / lengths[v]);

                let grad = &mut grads[v];
                *grad = Vec11::zeros();
                set_segment3(grad, 0, 0, first);
                set_segment3(grad, 4, 0, -(first + last));
                set_segment3(grad, 8, 0, last);
                grad[3] = -1.0;
                grad[7] = 1.0;
            }
        })
    }

    /// Position Hessians of the twist; the twist is linear in `θ`.
    pub fn hess_twists(&self) -> Ref<'_, Vec<Mat11>> {
        let node = &self.hess_twists;
        node.get(&self.graph, |hessians| {
            let tangents = self.tangents();
            let lengths = self.lengths();
            let kb = self.curvature_binormals();
            for v in node.first_valid()..node.size() {
                let (te, tf) = (tangents[v - 1], tangents[v]);
                let (norm_e, norm_f) = (lengths[v - 1], lengths[v]);
                let kb = kb[v];
                let chi = chi(te, tf);
                let tilde_t = (te + tf) / chi;

                let sym = |a| outer(kb, a) + outer(a, kb);
                let de2: DMat3 = sym(te + tilde_t) * (-0.25 / (norm_e * norm_e));
                let df2: DMat3 = sym(tf + tilde_t) * (-0.25 / (norm_f * norm_f));
                let de_df = (cross_matrix(te) * (2.0 / chi) - outer(kb, tilde_t))
                    * (0.5 / (norm_e * norm_f));

                let hessian = &mut hessians[v];
                *hessian = Mat11::zeros();
                set_position_blocks(hessian, &de2, &df2, &de_df);
            }
        })
    }
}
