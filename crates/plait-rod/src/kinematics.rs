//! Edges, lengths, tangents and curvature binormals.

use std::cell::Ref;

use glam::DVec3;
use plait_math::frames::curvature_binormal;
use plait_types::constants::MIN_CHI;
use plait_types::Scalar;
use tracing::warn;

use crate::state::{vertex, StrandState};

impl StrandState {
    pub fn dofs(&self) -> Ref<'_, Vec<Scalar>> {
        self.dofs.get(&self.graph, |_| {})
    }

    pub fn edges(&self) -> Ref<'_, Vec<DVec3>> {
        self.edges.get(&self.graph, |edges| {
            let dofs = self.dofs();
            for (e, edge) in edges.iter_mut().enumerate() {
                *edge = vertex(&dofs, e + 1) - vertex(&dofs, e);
            }
        })
    }

    pub fn lengths(&self) -> Ref<'_, Vec<Scalar>> {
        self.lengths.get(&self.graph, |lengths| {
            let edges = self.edges();
            for (length, edge) in lengths.iter_mut().zip(edges.iter()) {
                *length = edge.length();
            }
        })
    }

    pub fn tangents(&self) -> Ref<'_, Vec<DVec3>> {
        self.tangents.get(&self.graph, |tangents| {
            let edges = self.edges();
            let lengths = self.lengths();
            for (e, tangent) in tangents.iter_mut().enumerate() {
                *tangent = edges[e] / lengths[e];
            }
        })
    }

    /// `kb = 2 (t_e × t_f) / (1 + t_e · t_f)` at each interior vertex.
    pub fn curvature_binormals(&self) -> Ref<'_, Vec<DVec3>> {
        let node = &self.curvature_binormals;
        node.get(&self.graph, |binormals| {
            let tangents = self.tangents();
            for v in node.first_valid()..node.size() {
                let (te, tf) = (tangents[v - 1], tangents[v]);
                if 1.0 + te.dot(tf) <= 0.0 {
                    warn!(vertex = v, "edges fold back onto each other, clamping chi");
                }
                binormals[v] = curvature_binormal(te, tf, MIN_CHI);
            }
        })
    }
}
