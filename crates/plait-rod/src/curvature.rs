//! Material curvatures and their derivatives.
//!
//! At interior vertex `v` with incoming edge `e` and outgoing edge `f`,
//! `κ = (½ kb·(m2e + m2f), -½ kb·(m1e + m1f))`. Gradients and Hessians are
//! taken over the 11-dof stencil `x(v-1) θe x(v) θf x(v+1)`; with respect
//! to the edges, `∂/∂x(v-1) = -∂/∂e`, `∂/∂x(v) = ∂/∂e - ∂/∂f` and
//! `∂/∂x(v+1) = ∂/∂f`.

use std::cell::Ref;

use glam::{DMat3, DVec3};
use plait_math::local::{cross_matrix, outer, set_block3, set_segment3};
use plait_math::{GradKappa, Mat11, Vec2};
use plait_types::constants::MIN_CHI;
use plait_types::Scalar;

use crate::state::StrandState;

/// `1 + te·tf`, floored for edges folded back onto each other.
#[inline]
pub(crate) fn chi(te: DVec3, tf: DVec3) -> Scalar {
    let chi = 1.0 + te.dot(tf);
    if chi <= 0.0 {
        MIN_CHI
    } else {
        chi
    }
}

/// Writes the position blocks of a stencil Hessian from its edge-space
/// second derivatives.
pub(crate) fn set_position_blocks(out: &mut Mat11, de2: &DMat3, df2: &DMat3, de_df: &DMat3) {
    let df_de = de_df.transpose();
    set_block3(out, 0, 0, de2);
    set_block3(out, 0, 4, &(*de_df - *de2));
    set_block3(out, 4, 0, &(df_de - *de2));
    set_block3(out, 4, 4, &(*de2 - (*de_df + df_de) + *df2));
    set_block3(out, 0, 8, &-*de_df);
    set_block3(out, 8, 0, &-df_de);
    set_block3(out, 4, 8, &(*de_df - *df2));
    set_block3(out, 8, 4, &(df_de - *df2));
    set_block3(out, 8, 8, df2);
}

/// Writes the position/twist coupling of twist dof `col` (3 or 7) as a
/// column and its mirrored row.
fn set_theta_coupling(out: &mut Mat11, col: usize, de: DVec3, df: DVec3) {
    let blocks = [-de, de - df, df];
    for (b, block) in blocks.iter().enumerate() {
        for k in 0..3 {
            out[(4 * b + k, col)] = block[k];
            out[(col, 4 * b + k)] = block[k];
        }
    }
}

impl StrandState {
    pub fn kappas(&self) -> Ref<'_, Vec<Vec2>> {
        let node = &self.kappas;
        node.get(&self.graph, |kappas| {
            let kb = self.curvature_binormals();
            let m1 = self.material_frames1();
            let m2 = self.material_frames2();
            for v in node.first_valid()..node.size() {
                kappas[v] = Vec2::new(
                    0.5 * kb[v].dot(m2[v - 1] + m2[v]),
                    -0.5 * kb[v].dot(m1[v - 1] + m1[v]),
                );
            }
        })
    }

    /// 11×2 gradient of `κ` at each interior vertex.
    pub fn grad_kappas(&self) -> Ref<'_, Vec<GradKappa>> {
        let node = &self.grad_kappas;
        node.get(&self.graph, |grads| {
            let lengths = self.lengths();
            let tangents = self.tangents();
            let kb = self.curvature_binormals();
            let m1 = self.material_frames1();
            let m2 = self.material_frames2();
            let kappas = self.kappas();

            for v in node.first_valid()..node.size() {
                let (te, tf) = (tangents[v - 1], tangents[v]);
                let (norm_e, norm_f) = (lengths[v - 1], lengths[v]);
                let (m1e, m1f, m2e, m2f) = (m1[v - 1], m1[v], m2[v - 1], m2[v]);
                let kappa = kappas[v];

                let chi = chi(te, tf);
                let tilde_t = (te + tf) / chi;
                let tilde_d1 = (m1e + m1f) / chi;
                let tilde_d2 = (m2e + m2f) / chi;

                let dk0_de = (-kappa[0] * tilde_t + tf.cross(tilde_d2)) / norm_e;
                let dk0_df = (-kappa[0] * tilde_t - te.cross(tilde_d2)) / norm_f;
                let dk1_de = (-kappa[1] * tilde_t - tf.cross(tilde_d1)) / norm_e;
                let dk1_df = (-kappa[1] * tilde_t + te.cross(tilde_d1)) / norm_f;

                let grad = &mut grads[v];
                *grad = GradKappa::zeros();
                set_segment3(grad, 0, 0, -dk0_de);
                set_segment3(grad, 4, 0, dk0_de - dk0_df);
                set_segment3(grad, 8, 0, dk0_df);
                set_segment3(grad, 0, 1, -dk1_de);
                set_segment3(grad, 4, 1, dk1_de - dk1_df);
                set_segment3(grad, 8, 1, dk1_df);

                grad[(3, 0)] = -0.5 * kb[v].dot(m1e);
                grad[(7, 0)] = -0.5 * kb[v].dot(m1f);
                grad[(3, 1)] = -0.5 * kb[v].dot(m2e);
                grad[(7, 1)] = -0.5 * kb[v].dot(m2f);
            }
        })
    }

    /// Hessians of both curvature components at each interior vertex.
    pub fn hess_kappas(&self) -> Ref<'_, Vec<(Mat11, Mat11)>> {
        let node = &self.hess_kappas;
        node.get(&self.graph, |hessians| {
            let lengths = self.lengths();
            let tangents = self.tangents();
            let kb = self.curvature_binormals();
            let m1 = self.material_frames1();
            let m2 = self.material_frames2();
            let kappas = self.kappas();

            for v in node.first_valid()..node.size() {
                let stencil = Stencil {
                    te: tangents[v - 1],
                    tf: tangents[v],
                    norm_e: lengths[v - 1],
                    norm_f: lengths[v],
                    kb: kb[v],
                };
                let (m1e, m1f, m2e, m2f) = (m1[v - 1], m1[v], m2[v - 1], m2[v]);
                let kappa = kappas[v];

                // κ0 = ½ kb·(m2e + m2f): d̃ = m̃2, its θ-derivative is -m1.
                let h0 = stencil.hessian(kappa[0], m2e, m2f, m1e, m1f, 1.0);
                // κ1 = -½ kb·(m1e + m1f): d̃ = m̃1, its θ-derivative is m2.
                let h1 = stencil.hessian(kappa[1], m1e, m1f, m2e, m2f, -1.0);
                hessians[v] = (h0, h1);
            }
        })
    }
}

/// Edge geometry shared by both curvature Hessians at one vertex.
struct Stencil {
    te: DVec3,
    tf: DVec3,
    norm_e: Scalar,
    norm_f: Scalar,
    kb: DVec3,
}

impl Stencil {
    /// Hessian of `κ = sign · ½ kb·(de + df)`, where `(de, df)` are the
    /// material directors paired with the component and `(pe, pf)` the
    /// other pair. `sign` is `+1` for κ0 (`d = m2`) and `-1` for κ1
    /// (`d = m1`).
    fn hessian(
        &self,
        kappa: Scalar,
        de: DVec3,
        df: DVec3,
        pe: DVec3,
        pf: DVec3,
        sign: Scalar,
    ) -> Mat11 {
        let Self {
            te,
            tf,
            norm_e,
            norm_f,
            kb,
        } = *self;
        let id = DMat3::IDENTITY;
        let chi = chi(te, tf);
        let tilde_t = (te + tf) / chi;
        let tilde_d = (de + df) / chi;
        let norm2_e = norm_e * norm_e;
        let norm2_f = norm_f * norm_f;
        let tt_o_tt = outer(tilde_t, tilde_t);

        let tf_c_dt_o_tt = outer(tf.cross(tilde_d), tilde_t);
        let te_c_dt_o_tt = outer(te.cross(tilde_d), tilde_t);
        let kb_o_de = outer(kb, de);
        let kb_o_df = outer(kb, df);

        let de2 = (tt_o_tt * (2.0 * kappa)
            - (tf_c_dt_o_tt + tf_c_dt_o_tt.transpose()) * sign)
            * (1.0 / norm2_e)
            - (id - outer(te, te)) * (kappa / (chi * norm2_e))
            + (kb_o_de + kb_o_de.transpose()) * (sign / (4.0 * norm2_e));

        let df2 = (tt_o_tt * (2.0 * kappa)
            + (te_c_dt_o_tt + te_c_dt_o_tt.transpose()) * sign)
            * (1.0 / norm2_f)
            - (id - outer(tf, tf)) * (kappa / (chi * norm2_f))
            + (kb_o_df + kb_o_df.transpose()) * (sign / (4.0 * norm2_f));

        let de_df = (id + outer(te, tf)) * (-kappa / (chi * norm_e * norm_f))
            + (tt_o_tt * (2.0 * kappa)
                + (te_c_dt_o_tt.transpose() - tf_c_dt_o_tt - cross_matrix(tilde_d)) * sign)
                * (1.0 / (norm_e * norm_f));

        let mut h = Mat11::zeros();
        set_position_blocks(&mut h, &de2, &df2, &de_df);

        // Twist coupling. ∂d/∂θ = -sign · p.
        let kb_pe = kb.dot(pe);
        let kb_pf = kb.dot(pf);
        let de_dthetae = (tilde_t * (0.5 * kb_pe) - tf.cross(pe) / chi) / norm_e;
        let de_dthetaf = (tilde_t * (0.5 * kb_pf) - tf.cross(pf) / chi) / norm_e;
        let df_dthetae = (tilde_t * (0.5 * kb_pe) + te.cross(pe) / chi) / norm_f;
        let df_dthetaf = (tilde_t * (0.5 * kb_pf) + te.cross(pf) / chi) / norm_f;
        set_theta_coupling(&mut h, 3, de_dthetae, df_dthetae);
        set_theta_coupling(&mut h, 7, de_dthetaf, df_dthetaf);

        h[(3, 3)] = -0.5 * sign * kb.dot(de);
        h[(7, 7)] = -0.5 * sign * kb.dot(df);
        h
    }
}
