//! Per-strand material coefficients.
//!
//! Physical constants are root nodes in the strand's dependency graph, so
//! editing one (e.g. the radius) invalidates the stiffness values and the
//! bending-matrix base derived from it. The viscous coefficients depend on
//! the integration time step rather than on strand state and are plain
//! fields refreshed by [`StrandParameters::compute_viscous_force_coefficients`].

use std::f64::consts::{FRAC_PI_4, PI};

use plait_material::HairProperties;
use plait_math::local::rotation2;
use plait_math::{Mat2, Vec2};
use plait_types::constants::TAPER_EXPONENT;
use plait_types::Scalar;
use tracing::debug;

use crate::graph::{DependencyGraph, DependencyNode, NodeId};

/// Stiffness, radius and viscosity provider for one strand.
#[derive(Debug)]
pub struct StrandParameters {
    physical_radius: DependencyNode<Scalar>,
    base_rotation: DependencyNode<Scalar>,
    youngs_modulus: DependencyNode<Scalar>,
    shear_modulus: DependencyNode<Scalar>,
    density: DependencyNode<Scalar>,
    viscosity: DependencyNode<Scalar>,

    elastic_ks: DependencyNode<Scalar>,
    elastic_kt: DependencyNode<Scalar>,
    bending_matrix_base: DependencyNode<Mat2>,

    stretching_multiplier: Scalar,
    variable_radius_hair: bool,
    straight_hairs: Scalar,
    color: [Scalar; 3],
    num_vertices: usize,

    dt: Scalar,
    viscous_ks: Scalar,
    viscous_kt: Scalar,
    viscous_bending_coefficient_base: Scalar,
}

impl StrandParameters {
    /// Registers the parameter nodes in `graph` and computes the viscous
    /// coefficients for `dt`.
    pub fn new(
        graph: &mut DependencyGraph,
        props: &HairProperties,
        num_vertices: usize,
        dt: Scalar,
    ) -> Self {
        let physical_radius = DependencyNode::root(graph, "PhysicalRadius", 0, 1, props.radius);
        let base_rotation = DependencyNode::root(graph, "BaseRotation", 0, 1, props.base_rotation);
        let youngs_modulus =
            DependencyNode::root(graph, "YoungsModulus", 0, 1, props.youngs_modulus);
        let shear_modulus = DependencyNode::root(graph, "ShearModulus", 0, 1, props.shear_modulus);
        let density = DependencyNode::root(graph, "Density", 0, 1, props.density);
        let viscosity = DependencyNode::root(graph, "Viscosity", 0, 1, props.viscosity);

        let elastic_ks = DependencyNode::derived(
            graph,
            "ElasticKs",
            0,
            1,
            0.0,
            &[physical_radius.id(), youngs_modulus.id()],
        );
        let elastic_kt = DependencyNode::derived(
            graph,
            "ElasticKt",
            0,
            1,
            0.0,
            &[physical_radius.id(), shear_modulus.id()],
        );
        let bending_matrix_base = DependencyNode::derived(
            graph,
            "BendingMatrixBase",
            0,
            1,
            Mat2::zeros(),
            &[physical_radius.id(), base_rotation.id()],
        );

        let mut params = Self {
            physical_radius,
            base_rotation,
            youngs_modulus,
            shear_modulus,
            density,
            viscosity,
            elastic_ks,
            elastic_kt,
            bending_matrix_base,
            stretching_multiplier: props.stretching_multiplier,
            variable_radius_hair: props.variable_radius_hair,
            straight_hairs: props.straight_hairs,
            color: props.color,
            num_vertices,
            dt,
            viscous_ks: 0.0,
            viscous_kt: 0.0,
            viscous_bending_coefficient_base: 0.0,
        };
        params.compute_viscous_force_coefficients(graph, dt);
        params
    }

    // ─── Root values ─────────────────────────────────────────────

    pub fn physical_radius(&self, graph: &DependencyGraph) -> Scalar {
        *self.physical_radius.get(graph, |_| {})
    }

    pub fn base_rotation(&self, graph: &DependencyGraph) -> Scalar {
        *self.base_rotation.get(graph, |_| {})
    }

    pub fn youngs_modulus(&self, graph: &DependencyGraph) -> Scalar {
        *self.youngs_modulus.get(graph, |_| {})
    }

    pub fn shear_modulus(&self, graph: &DependencyGraph) -> Scalar {
        *self.shear_modulus.get(graph, |_| {})
    }

    pub fn density(&self, graph: &DependencyGraph) -> Scalar {
        *self.density.get(graph, |_| {})
    }

    pub fn viscosity(&self, graph: &DependencyGraph) -> Scalar {
        *self.viscosity.get(graph, |_| {})
    }

    pub fn stretching_multiplier(&self) -> Scalar {
        self.stretching_multiplier
    }

    pub fn color(&self) -> [Scalar; 3] {
        self.color
    }

    pub fn set_physical_radius(&self, graph: &DependencyGraph, radius: Scalar) {
        self.physical_radius.set(graph, radius);
    }

    pub fn set_base_rotation(&self, graph: &DependencyGraph, rotation: Scalar) {
        self.base_rotation.set(graph, rotation);
    }

    pub fn set_youngs_modulus(&self, graph: &DependencyGraph, modulus: Scalar) {
        self.youngs_modulus.set(graph, modulus);
    }

    pub fn set_shear_modulus(&self, graph: &DependencyGraph, modulus: Scalar) {
        self.shear_modulus.set(graph, modulus);
    }

    pub fn set_density(&self, graph: &DependencyGraph, density: Scalar) {
        self.density.set(graph, density);
    }

    pub fn set_viscosity(&self, graph: &DependencyGraph, viscosity: Scalar) {
        self.viscosity.set(graph, viscosity);
    }

    pub fn set_stretching_multiplier(&mut self, multiplier: Scalar) {
        self.stretching_multiplier = multiplier;
    }

    // ─── Derived nodes ───────────────────────────────────────────

    /// Axial stiffness `π r² E`.
    pub fn elastic_ks(&self, graph: &DependencyGraph) -> Scalar {
        *self.elastic_ks.get(graph, |ks| {
            let r = self.physical_radius(graph);
            *ks = PI * r * r * self.youngs_modulus(graph);
        })
    }

    /// Torsional stiffness `π/4 · r² · 2r² · G`.
    pub fn elastic_kt(&self, graph: &DependencyGraph) -> Scalar {
        *self.elastic_kt.get(graph, |kt| {
            let r2 = self.physical_radius(graph).powi(2);
            *kt = FRAC_PI_4 * r2 * (r2 + r2) * self.shear_modulus(graph);
        })
    }

    /// Second moments of the cross-section, rotated by the base rotation.
    pub fn bending_matrix_base(&self, graph: &DependencyGraph) -> Mat2 {
        *self.bending_matrix_base.get(graph, |base| {
            let inertia = FRAC_PI_4 * self.physical_radius(graph).powi(4);
            let rot = rotation2(self.base_rotation(graph));
            *base = rot * Mat2::from_diagonal(&Vec2::new(inertia, inertia)) * rot.transpose();
        })
    }

    pub fn bending_matrix_base_id(&self) -> NodeId {
        self.bending_matrix_base.id()
    }

    // ─── Per-vertex coefficients ─────────────────────────────────

    /// Radius scale at `vtx`: 1 for uniform strands, otherwise an
    /// exponential root-to-tip taper blended by the straightness fraction.
    pub fn interpolated_radius_multiplier(&self, vtx: usize) -> Scalar {
        if !self.variable_radius_hair {
            return 1.0;
        }
        let s = vtx as Scalar / (self.num_vertices - 1) as Scalar;
        (-TAPER_EXPONENT * s).exp() * self.straight_hairs + (1.0 - self.straight_hairs)
    }

    pub fn radius(&self, graph: &DependencyGraph, vtx: usize) -> Scalar {
        self.interpolated_radius_multiplier(vtx) * self.physical_radius(graph)
    }

    pub fn ks(&self, graph: &DependencyGraph, vtx: usize) -> Scalar {
        let interp = self.interpolated_radius_multiplier(vtx);
        interp * interp * self.elastic_ks(graph) * self.stretching_multiplier
    }

    pub fn kt(&self, graph: &DependencyGraph, vtx: usize) -> Scalar {
        self.interpolated_radius_multiplier(vtx).powi(4) * self.elastic_kt(graph)
    }

    /// Scalar applied to the bending-matrix base for the elastic force.
    pub fn bending_coefficient(&self, graph: &DependencyGraph, vtx: usize) -> Scalar {
        self.interpolated_radius_multiplier(vtx).powi(4) * self.youngs_modulus(graph)
    }

    // ─── Viscous coefficients ────────────────────────────────────

    /// Recomputes the `dt`-derived viscous coefficients.
    ///
    /// Must be called whenever the time step, radius or viscosity changes.
    pub fn compute_viscous_force_coefficients(&mut self, graph: &DependencyGraph, dt: Scalar) {
        let r2 = self.physical_radius(graph).powi(2);
        let eta = self.viscosity(graph);

        self.dt = dt;
        self.viscous_ks = PI * r2 * 3.0 * eta / dt;
        self.viscous_kt = FRAC_PI_4 * r2 * (r2 + r2) * eta / dt;
        self.viscous_bending_coefficient_base = 3.0 * eta / dt;

        debug!(
            dt,
            viscous_ks = self.viscous_ks,
            viscous_kt = self.viscous_kt,
            viscous_bending = self.viscous_bending_coefficient_base,
            "refreshed viscous force coefficients"
        );
    }

    /// Time step used by the last viscous coefficient refresh.
    pub fn dt(&self) -> Scalar {
        self.dt
    }

    pub fn viscous_ks(&self, vtx: usize) -> Scalar {
        let interp = self.interpolated_radius_multiplier(vtx);
        interp * interp * self.viscous_ks * self.stretching_multiplier
    }

    pub fn viscous_kt(&self, vtx: usize) -> Scalar {
        self.interpolated_radius_multiplier(vtx).powi(4) * self.viscous_kt
    }

    pub fn viscous_bending_coefficient(&self, vtx: usize) -> Scalar {
        self.interpolated_radius_multiplier(vtx).powi(4) * self.viscous_bending_coefficient_base
    }

    pub fn viscous_bending_coefficient_base(&self) -> Scalar {
        self.viscous_bending_coefficient_base
    }
}
