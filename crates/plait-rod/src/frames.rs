//! Reference and material frames.
//!
//! The first reference director `u` of each edge is carried from its
//! previous value by time-parallel transport, so the twist angles stay
//! meaningful from one step to the next. On the first evaluation the
//! frames are built by space-parallel transport from an arbitrary
//! director at the root edge.

use std::cell::Ref;

use glam::DVec3;
use plait_math::frames::{orthonormal_parallel_transport, orthonormalize};
use plait_types::Scalar;

use crate::state::{theta, StrandState};

/// First reference directors plus the tangents they were transported to.
#[derive(Debug, Clone, Default)]
pub struct ReferenceFrameCache {
    pub(crate) frames: Vec<DVec3>,
    previous_tangents: Vec<DVec3>,
}

impl ReferenceFrameCache {
    fn update(&mut self, tangents: &[DVec3]) {
        if self.previous_tangents.len() != tangents.len() {
            self.frames.clear();
            let mut u = tangents[0].any_orthonormal_vector();
            self.frames.push(u);
            for e in 1..tangents.len() {
                u = orthonormal_parallel_transport(u, tangents[e - 1], tangents[e]);
                u = orthonormalize(u, tangents[e]);
                self.frames.push(u);
            }
        } else {
            for (e, u) in self.frames.iter_mut().enumerate() {
                let moved = orthonormal_parallel_transport(*u, self.previous_tangents[e], tangents[e]);
                *u = orthonormalize(moved, tangents[e]);
            }
        }
        self.previous_tangents.clear();
        self.previous_tangents.extend_from_slice(tangents);
    }
}

impl StrandState {
    pub fn reference_frames1(&self) -> Ref<'_, Vec<DVec3>> {
        let cache = self.reference_frames1.get(&self.graph, |cache| {
            cache.update(&self.tangents());
        });
        Ref::map(cache, |cache| &cache.frames)
    }

    /// Second reference directors `v = t × u`.
    pub fn reference_frames2(&self) -> Ref<'_, Vec<DVec3>> {
        self.reference_frames2.get(&self.graph, |frames| {
            let tangents = self.tangents();
            let u = self.reference_frames1();
            for (e, v) in frames.iter_mut().enumerate() {
                *v = tangents[e].cross(u[e]);
            }
        })
    }

    /// `(sin θ, cos θ)` per edge.
    pub fn trig_thetas(&self) -> Ref<'_, Vec<(Scalar, Scalar)>> {
        self.trig_thetas.get(&self.graph, |trig| {
            let dofs = self.dofs();
            for (e, value) in trig.iter_mut().enumerate() {
                *value = theta(&dofs, e).sin_cos();
            }
        })
    }

    /// `m1 = cos θ u + sin θ v`.
    pub fn material_frames1(&self) -> Ref<'_, Vec<DVec3>> {
        self.material_frames1.get(&self.graph, |frames| {
            let trig = self.trig_thetas();
            let u = self.reference_frames1();
            let v = self.reference_frames2();
            for (e, m1) in frames.iter_mut().enumerate() {
                let (s, c) = trig[e];
                *m1 = u[e] * c + v[e] * s;
            }
        })
    }

    /// `m2 = -sin θ u + cos θ v`.
    pub fn material_frames2(&self) -> Ref<'_, Vec<DVec3>> {
        self.material_frames2.get(&self.graph, |frames| {
            let trig = self.trig_thetas();
            let u = self.reference_frames1();
            let v = self.reference_frames2();
            for (e, m2) in frames.iter_mut().enumerate() {
                let (s, c) = trig[e];
                *m2 = v[e] * c - u[e] * s;
            }
        })
    }
}
