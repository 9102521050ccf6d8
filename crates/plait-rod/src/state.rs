//! Strand kinematic state and its cached geometric quantities.
//!
//! The degrees of freedom are interleaved per vertex:
//! ```text
//! x0 y0 z0 θ0 x1 y1 z1 θ1 ... x(N-1) y(N-1) z(N-1)
//! ```
//! where `θe` is the twist angle of edge `e`. The dof vector is the root
//! of the strand's dependency graph; every geometric node below it is
//! recomputed on first read after a change. The accessors live next to
//! their compute functions (`kinematics`, `frames`, `curvature`, `twist`).

use glam::DVec3;
use plait_math::{GradKappa, Mat11, Vec11, Vec2};
use plait_types::constants::{DOFS_PER_VERTEX, MIN_STRAND_VERTICES};
use plait_types::{PlaitError, PlaitResult, Scalar};

use crate::frames::ReferenceFrameCache;
use crate::graph::{DependencyGraph, DependencyNode, NodeId};

/// Number of scalar dofs of a strand with `num_vertices` vertices.
#[inline]
pub fn num_dofs(num_vertices: usize) -> usize {
    DOFS_PER_VERTEX * num_vertices - 1
}

/// Interleaves vertex positions and edge twist angles into a dof vector.
pub fn interleave_dofs(vertices: &[DVec3], thetas: &[Scalar]) -> PlaitResult<Vec<Scalar>> {
    if vertices.len() < MIN_STRAND_VERTICES {
        return Err(PlaitError::InvalidStrand(format!(
            "a strand needs at least {MIN_STRAND_VERTICES} vertices, got {}",
            vertices.len()
        )));
    }
    if thetas.len() != vertices.len() - 1 {
        return Err(PlaitError::DimensionMismatch {
            expected: vertices.len() - 1,
            actual: thetas.len(),
        });
    }
    let mut dofs = Vec::with_capacity(num_dofs(vertices.len()));
    for (v, x) in vertices.iter().enumerate() {
        dofs.extend_from_slice(&[x.x, x.y, x.z]);
        if let Some(theta) = thetas.get(v) {
            dofs.push(*theta);
        }
    }
    Ok(dofs)
}

/// Checks the dof layout and edge lengths, returning the vertex count.
pub fn validate_dofs(dofs: &[Scalar]) -> PlaitResult<usize> {
    if (dofs.len() + 1) % DOFS_PER_VERTEX != 0 {
        return Err(PlaitError::InvalidStrand(format!(
            "dof count {} is not of the form 4N - 1",
            dofs.len()
        )));
    }
    let num_vertices = (dofs.len() + 1) / DOFS_PER_VERTEX;
    if num_vertices < MIN_STRAND_VERTICES {
        return Err(PlaitError::InvalidStrand(format!(
            "a strand needs at least {MIN_STRAND_VERTICES} vertices, got {num_vertices}"
        )));
    }
    if let Some(bad) = dofs.iter().position(|d| !d.is_finite()) {
        return Err(PlaitError::InvalidStrand(format!("dof {bad} is not finite")));
    }
    for e in 0..num_vertices - 1 {
        let length = (vertex(dofs, e + 1) - vertex(dofs, e)).length();
        if length <= 0.0 {
            return Err(PlaitError::InvalidStrand(format!("edge {e} has zero length")));
        }
    }
    Ok(num_vertices)
}

/// Position of vertex `v` in a dof vector.
#[inline]
pub fn vertex(dofs: &[Scalar], v: usize) -> DVec3 {
    let i = DOFS_PER_VERTEX * v;
    DVec3::new(dofs[i], dofs[i + 1], dofs[i + 2])
}

/// Twist angle of edge `e` in a dof vector.
#[inline]
pub fn theta(dofs: &[Scalar], e: usize) -> Scalar {
    dofs[DOFS_PER_VERTEX * e + 3]
}

/// Degrees of freedom of one strand plus every cached quantity derived
/// from them.
#[derive(Debug)]
pub struct StrandState {
    pub(crate) graph: DependencyGraph,
    pub(crate) num_vertices: usize,

    pub(crate) dofs: DependencyNode<Vec<Scalar>>,
    pub(crate) edges: DependencyNode<Vec<DVec3>>,
    pub(crate) lengths: DependencyNode<Vec<Scalar>>,
    pub(crate) tangents: DependencyNode<Vec<DVec3>>,
    pub(crate) curvature_binormals: DependencyNode<Vec<DVec3>>,

    pub(crate) reference_frames1: DependencyNode<ReferenceFrameCache>,
    pub(crate) reference_frames2: DependencyNode<Vec<DVec3>>,
    pub(crate) reference_twists: DependencyNode<Vec<Scalar>>,
    pub(crate) twists: DependencyNode<Vec<Scalar>>,
    pub(crate) trig_thetas: DependencyNode<Vec<(Scalar, Scalar)>>,
    pub(crate) material_frames1: DependencyNode<Vec<DVec3>>,
    pub(crate) material_frames2: DependencyNode<Vec<DVec3>>,

    pub(crate) kappas: DependencyNode<Vec<Vec2>>,
    pub(crate) grad_kappas: DependencyNode<Vec<GradKappa>>,
    pub(crate) hess_kappas: DependencyNode<Vec<(Mat11, Mat11)>>,
    pub(crate) grad_twists: DependencyNode<Vec<Vec11>>,
    pub(crate) hess_twists: DependencyNode<Vec<Mat11>>,
    pub(crate) bending_products: DependencyNode<Vec<Mat11>>,
}

impl StrandState {
    /// Builds the node chain for a validated dof vector.
    pub fn new(dofs: Vec<Scalar>, num_vertices: usize) -> Self {
        let ne = num_vertices - 1;
        let ndofs = dofs.len();
        let mut g = DependencyGraph::new();

        let dofs = DependencyNode::root(&mut g, "Dofs", 0, ndofs, dofs);
        let edges =
            DependencyNode::derived(&mut g, "Edges", 0, ne, vec![DVec3::ZERO; ne], &[dofs.id()]);
        let lengths =
            DependencyNode::derived(&mut g, "Lengths", 0, ne, vec![0.0; ne], &[edges.id()]);
        let tangents = DependencyNode::derived(
            &mut g,
            "Tangents",
            0,
            ne,
            vec![DVec3::ZERO; ne],
            &[edges.id(), lengths.id()],
        );
        let curvature_binormals = DependencyNode::derived(
            &mut g,
            "CurvatureBinormals",
            1,
            ne,
            vec![DVec3::ZERO; ne],
            &[tangents.id()],
        );

        let reference_frames1 = DependencyNode::derived(
            &mut g,
            "ReferenceFrames1",
            0,
            ne,
            ReferenceFrameCache::default(),
            &[tangents.id()],
        );
        let reference_frames2 = DependencyNode::derived(
            &mut g,
            "ReferenceFrames2",
            0,
            ne,
            vec![DVec3::ZERO; ne],
            &[tangents.id(), reference_frames1.id()],
        );
        let reference_twists = DependencyNode::derived(
            &mut g,
            "ReferenceTwists",
            1,
            ne,
            vec![0.0; ne],
            &[tangents.id(), reference_frames1.id()],
        );
        let twists = DependencyNode::derived(
            &mut g,
            "Twists",
            1,
            ne,
            vec![0.0; ne],
            &[reference_twists.id(), dofs.id()],
        );
        let trig_thetas = DependencyNode::derived(
            &mut g,
            "TrigThetas",
            0,
            ne,
            vec![(0.0, 1.0); ne],
            &[dofs.id()],
        );
        let frame_inputs = [trig_thetas.id(), reference_frames1.id(), reference_frames2.id()];
        let material_frames1 = DependencyNode::derived(
            &mut g,
            "MaterialFrames1",
            0,
            ne,
            vec![DVec3::ZERO; ne],
            &frame_inputs,
        );
        let material_frames2 = DependencyNode::derived(
            &mut g,
            "MaterialFrames2",
            0,
            ne,
            vec![DVec3::ZERO; ne],
            &frame_inputs,
        );

        let kappas = DependencyNode::derived(
            &mut g,
            "Kappas",
            1,
            ne,
            vec![Vec2::zeros(); ne],
            &[curvature_binormals.id(), material_frames1.id(), material_frames2.id()],
        );
        let curvature_inputs = [
            lengths.id(),
            tangents.id(),
            curvature_binormals.id(),
            material_frames1.id(),
            material_frames2.id(),
            kappas.id(),
        ];
        let grad_kappas = DependencyNode::derived(
            &mut g,
            "GradKappas",
            1,
            ne,
            vec![GradKappa::zeros(); ne],
            &curvature_inputs,
        );
        let hess_kappas = DependencyNode::derived(
            &mut g,
            "HessKappas",
            1,
            ne,
            vec![(Mat11::zeros(), Mat11::zeros()); ne],
            &curvature_inputs,
        );
        let grad_twists = DependencyNode::derived(
            &mut g,
            "GradTwists",
            1,
            ne,
            vec![Vec11::zeros(); ne],
            &[lengths.id(), curvature_binormals.id()],
        );
        let hess_twists = DependencyNode::derived(
            &mut g,
            "HessTwists",
            1,
            ne,
            vec![Mat11::zeros(); ne],
            &[tangents.id(), lengths.id(), curvature_binormals.id()],
        );
        let bending_products = DependencyNode::derived(
            &mut g,
            "BendingProducts",
            1,
            ne,
            vec![Mat11::zeros(); ne],
            &[grad_kappas.id()],
        );

        Self {
            graph: g,
            num_vertices,
            dofs,
            edges,
            lengths,
            tangents,
            curvature_binormals,
            reference_frames1,
            reference_frames2,
            reference_twists,
            twists,
            trig_thetas,
            material_frames1,
            material_frames2,
            kappas,
            grad_kappas,
            hess_kappas,
            grad_twists,
            hess_twists,
            bending_products,
        }
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut DependencyGraph {
        &mut self.graph
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_edges(&self) -> usize {
        self.num_vertices - 1
    }

    pub fn bending_products_id(&self) -> NodeId {
        self.bending_products.id()
    }

    /// Replaces the whole dof vector.
    pub(crate) fn set_dofs(&self, dofs: Vec<Scalar>) {
        self.dofs.set(&self.graph, dofs);
    }

    pub(crate) fn set_dof(&self, index: usize, value: Scalar) {
        self.dofs.update(&self.graph, |dofs| dofs[index] = value);
    }
}

/// Rest quantities of the elastic forces.
#[derive(Debug, Clone, Default)]
pub struct RestState {
    pub lengths: Vec<Scalar>,
    pub voronoi_lengths: Vec<Scalar>,
    pub inv_voronoi_lengths: Vec<Scalar>,
    pub kappas: Vec<Vec2>,
    pub twists: Vec<Scalar>,
}

impl RestState {
    /// Captures the current shape of `state` as the rest shape.
    pub fn capture(state: &StrandState) -> Self {
        let lengths = state.lengths().clone();
        let voronoi_lengths = voronoi_lengths(&lengths);
        let inv_voronoi_lengths = voronoi_lengths.iter().map(|l| 1.0 / l).collect();
        Self {
            lengths,
            voronoi_lengths,
            inv_voronoi_lengths,
            kappas: state.kappas().clone(),
            twists: state.twists().clone(),
        }
    }
}

/// Half the summed length of the edges incident to each vertex.
pub fn voronoi_lengths(lengths: &[Scalar]) -> Vec<Scalar> {
    let ne = lengths.len();
    (0..=ne)
        .map(|v| {
            let before = if v > 0 { lengths[v - 1] } else { 0.0 };
            let after = if v < ne { lengths[v] } else { 0.0 };
            0.5 * (before + after)
        })
        .collect()
}

/// Snapshot at the start of a time step, used as the "rest" shape of the
/// viscous forces.
#[derive(Debug, Clone, Default)]
pub struct StartState {
    pub lengths: Vec<Scalar>,
    pub kappas: Vec<Vec2>,
    pub twists: Vec<Scalar>,
}

impl StartState {
    pub fn capture(state: &StrandState) -> Self {
        Self {
            lengths: state.lengths().clone(),
            kappas: state.kappas().clone(),
            twists: state.twists().clone(),
        }
    }
}
