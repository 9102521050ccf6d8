//! The per-strand force model.
//!
//! [`StrandForce`] owns one strand's degrees of freedom, its dependency
//! graph, material parameters and rest/start-of-step shapes, and sums the
//! stretching, twisting and bending terms selected by its
//! [`ForceConfig`].

use std::cell::Ref;
use std::f64::consts::PI;

use glam::DVec3;
use plait_material::HairProperties;
use plait_math::{Mat11, Mat2, Triplet};
use plait_math::local::sym_b_product;
use plait_types::{PlaitError, PlaitResult, Scalar, StrandId};
use tracing::debug;

use crate::bending::BendingForce;
use crate::config::ForceConfig;
use crate::equilibrium::StrandEquilibriumParameters;
use crate::force::ForceTerm;
use crate::graph::DependencyGraph;
use crate::integration::{IntegrationOffsets, IntegrationVars};
use crate::parameters::StrandParameters;
use crate::state::{self, interleave_dofs, validate_dofs, RestState, StartState, StrandState};
use crate::stretching::StretchingForce;
use crate::twisting::TwistingForce;
use crate::viscosity::{NonViscous, Viscous};

/// Internal forces of one discrete elastic rod.
#[derive(Debug)]
pub struct StrandForce {
    id: StrandId,
    state: StrandState,
    params: StrandParameters,
    rest: RestState,
    start: StartState,
    equilibrium: Option<StrandEquilibriumParameters>,
    config: ForceConfig,
}

impl StrandForce {
    /// Creates a strand whose rest shape is the given dof vector.
    pub fn new(
        id: StrandId,
        dofs: Vec<Scalar>,
        props: &HairProperties,
        config: ForceConfig,
        dt: Scalar,
    ) -> PlaitResult<Self> {
        props.validate()?;
        check_time_step(dt)?;
        let num_vertices = validate_dofs(&dofs)?;

        let mut state = StrandState::new(dofs, num_vertices);
        let params = StrandParameters::new(state.graph_mut(), props, num_vertices, dt);
        let products = state.bending_products_id();
        state
            .graph_mut()
            .add_dependent(params.bending_matrix_base_id(), products);

        let rest = RestState::capture(&state);
        let start = StartState::capture(&state);

        debug!(
            strand = id.index(),
            vertices = num_vertices,
            hair = %props.name,
            "created strand force"
        );

        Ok(Self {
            id,
            state,
            params,
            rest,
            start,
            equilibrium: None,
            config,
        })
    }

    /// Creates an untwisted strand from vertex positions.
    pub fn from_vertices(
        id: StrandId,
        vertices: &[DVec3],
        props: &HairProperties,
        config: ForceConfig,
        dt: Scalar,
    ) -> PlaitResult<Self> {
        let thetas = vec![0.0; vertices.len().saturating_sub(1)];
        let dofs = interleave_dofs(vertices, &thetas)?;
        Self::new(id, dofs, props, config, dt)
    }

    // ─── Accessors ───────────────────────────────────────────────

    pub fn id(&self) -> StrandId {
        self.id
    }

    pub fn num_vertices(&self) -> usize {
        self.state.num_vertices()
    }

    pub fn num_dofs(&self) -> usize {
        state::num_dofs(self.num_vertices())
    }

    pub fn state(&self) -> &StrandState {
        &self.state
    }

    pub fn graph(&self) -> &DependencyGraph {
        self.state.graph()
    }

    pub fn parameters(&self) -> &StrandParameters {
        &self.params
    }

    pub fn rest(&self) -> &RestState {
        &self.rest
    }

    pub fn start(&self) -> &StartState {
        &self.start
    }

    pub fn config(&self) -> &ForceConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ForceConfig) {
        self.config = config;
    }

    pub fn dof(&self, index: usize) -> Scalar {
        self.state.dofs()[index]
    }

    pub fn vertex(&self, v: usize) -> DVec3 {
        state::vertex(&self.state.dofs(), v)
    }

    pub fn theta(&self, e: usize) -> Scalar {
        state::theta(&self.state.dofs(), e)
    }

    // ─── Coefficients ────────────────────────────────────────────

    pub fn ks(&self, vtx: usize) -> Scalar {
        self.params.ks(self.graph(), vtx)
    }

    pub fn kt(&self, vtx: usize) -> Scalar {
        self.params.kt(self.graph(), vtx)
    }

    pub fn bending_coefficient(&self, vtx: usize) -> Scalar {
        self.params.bending_coefficient(self.graph(), vtx)
    }

    pub fn radius(&self, vtx: usize) -> Scalar {
        self.params.radius(self.graph(), vtx)
    }

    pub fn bending_matrix_base(&self) -> Mat2 {
        self.params.bending_matrix_base(self.graph())
    }

    /// `Gᵀ B₀ G` at each interior vertex, shared by the elastic and viscous
    /// bending Jacobians.
    pub fn bending_products(&self) -> Ref<'_, Vec<Mat11>> {
        let node = &self.state.bending_products;
        node.get(self.graph(), |products| {
            let base = self.bending_matrix_base();
            let grads = self.state.grad_kappas();
            for v in node.first_valid()..node.size() {
                products[v] = sym_b_product(&base, &grads[v]);
            }
        })
    }

    /// Lumped mass `ρ π r(v)² ℓ̄v` of each vertex.
    pub fn vertex_masses(&self) -> Vec<Scalar> {
        let density = self.params.density(self.graph());
        self.rest
            .voronoi_lengths
            .iter()
            .enumerate()
            .map(|(v, len)| {
                let r = self.radius(v);
                density * PI * r * r * len
            })
            .collect()
    }

    // ─── Mutation ────────────────────────────────────────────────

    /// Replaces every dof. Rejects buffers of the wrong length, non-finite
    /// entries and zero-length edges before any cache is touched.
    pub fn set_dofs(&mut self, dofs: Vec<Scalar>) -> PlaitResult<()> {
        if dofs.len() != self.num_dofs() {
            return Err(PlaitError::DimensionMismatch {
                expected: self.num_dofs(),
                actual: dofs.len(),
            });
        }
        validate_dofs(&dofs)?;
        self.state.set_dofs(dofs);
        Ok(())
    }

    /// Overwrites a single dof without validation.
    ///
    /// Meant for perturbation loops that keep the strand well formed; use
    /// [`StrandForce::set_dofs`] for externally supplied state.
    pub fn set_dof(&mut self, index: usize, value: Scalar) {
        debug_assert!(index < self.num_dofs(), "dof {index} out of range");
        debug_assert!(value.is_finite(), "dof {index} set to {value}");
        self.state.set_dof(index, value);
    }

    /// Captures the current shape as the reference of the viscous forces.
    pub fn update_start_state(&mut self) {
        self.start = StartState::capture(&self.state);
    }

    pub fn set_radius(&mut self, radius: Scalar) -> PlaitResult<()> {
        check_positive("radius", radius)?;
        self.params.set_physical_radius(self.state.graph(), radius);
        self.refresh_viscous_coefficients();
        Ok(())
    }

    pub fn set_youngs_modulus(&mut self, modulus: Scalar) -> PlaitResult<()> {
        check_positive("youngs_modulus", modulus)?;
        self.params.set_youngs_modulus(self.state.graph(), modulus);
        self.refresh_viscous_coefficients();
        Ok(())
    }

    pub fn set_shear_modulus(&mut self, modulus: Scalar) -> PlaitResult<()> {
        check_positive("shear_modulus", modulus)?;
        self.params.set_shear_modulus(self.state.graph(), modulus);
        self.refresh_viscous_coefficients();
        Ok(())
    }

    pub fn set_base_rotation(&mut self, rotation: Scalar) -> PlaitResult<()> {
        if !rotation.is_finite() {
            return Err(PlaitError::InvalidParameter(format!(
                "base_rotation must be finite, got {rotation}"
            )));
        }
        self.params.set_base_rotation(self.state.graph(), rotation);
        self.refresh_viscous_coefficients();
        Ok(())
    }

    pub fn set_viscosity(&mut self, viscosity: Scalar) -> PlaitResult<()> {
        if !(viscosity.is_finite() && viscosity >= 0.0) {
            return Err(PlaitError::InvalidParameter(format!(
                "viscosity must be non-negative, got {viscosity}"
            )));
        }
        self.params.set_viscosity(self.state.graph(), viscosity);
        self.refresh_viscous_coefficients();
        Ok(())
    }

    /// Scales the elastic and viscous stretching stiffness.
    pub fn set_stretching_multiplier(&mut self, multiplier: Scalar) -> PlaitResult<()> {
        check_positive("stretching_multiplier", multiplier)?;
        self.params.set_stretching_multiplier(multiplier);
        Ok(())
    }

    pub fn set_density(&mut self, density: Scalar) -> PlaitResult<()> {
        check_positive("density", density)?;
        self.params.set_density(self.state.graph(), density);
        Ok(())
    }

    /// Refreshes the viscous coefficients for a new time step.
    pub fn set_time_step(&mut self, dt: Scalar) -> PlaitResult<()> {
        check_time_step(dt)?;
        self.params
            .compute_viscous_force_coefficients(self.state.graph(), dt);
        Ok(())
    }

    fn refresh_viscous_coefficients(&mut self) {
        let dt = self.params.dt();
        self.params
            .compute_viscous_force_coefficients(self.state.graph(), dt);
    }

    // ─── Equilibrium shape ───────────────────────────────────────

    pub fn set_equilibrium(&mut self, equilibrium: StrandEquilibriumParameters) {
        self.equilibrium = Some(equilibrium);
    }

    pub fn equilibrium(&self) -> Option<&StrandEquilibriumParameters> {
        self.equilibrium.as_ref()
    }

    /// Reloads the rest lengths, curvatures and twists from the
    /// equilibrium shape if it is valid and dirty.
    ///
    /// Returns whether the rest shape changed.
    pub fn apply_equilibrium(&mut self) -> PlaitResult<bool> {
        let num_vertices = self.num_vertices();
        let Some(equilibrium) = self.equilibrium.as_mut() else {
            return Ok(false);
        };
        if !(equilibrium.valid && equilibrium.dirty) {
            return Ok(false);
        }
        if equilibrium.vertices.len() != num_vertices {
            return Err(PlaitError::DimensionMismatch {
                expected: num_vertices,
                actual: equilibrium.vertices.len(),
            });
        }

        let thetas = vec![0.0; num_vertices - 1];
        let dofs = interleave_dofs(&equilibrium.vertices, &thetas)?;
        validate_dofs(&dofs)?;
        let shape = StrandState::new(dofs, num_vertices);
        self.rest = RestState::capture(&shape);
        equilibrium.dirty = false;

        debug!(
            strand = self.id.index(),
            curl_radius = equilibrium.curl_radius,
            curl_density = equilibrium.curl_density,
            "reloaded rest shape from equilibrium parameters"
        );
        Ok(true)
    }

    // ─── Accumulation ────────────────────────────────────────────

    /// Total energy of the configured force terms.
    pub fn accumulate_energy(&self) -> Scalar {
        let mut energy = StretchingForce::<NonViscous>::accumulate_current_e(self)
            + TwistingForce::<NonViscous>::accumulate_current_e(self)
            + BendingForce::<NonViscous>::accumulate_current_e(self);
        if self.config.viscous_bending() {
            energy += BendingForce::<Viscous>::accumulate_current_e(self);
        }
        if self.config.viscous_stretching_and_twisting() {
            energy += StretchingForce::<Viscous>::accumulate_current_e(self)
                + TwistingForce::<Viscous>::accumulate_current_e(self);
        }
        energy
    }

    /// Adds the configured forces into `force` (length [`Self::num_dofs`]).
    pub fn accumulate_forces(&self, force: &mut [Scalar]) {
        StretchingForce::<NonViscous>::accumulate_current_f(force, self);
        TwistingForce::<NonViscous>::accumulate_current_f(force, self);
        BendingForce::<NonViscous>::accumulate_current_f(force, self);
        if self.config.viscous_bending() {
            BendingForce::<Viscous>::accumulate_current_f(force, self);
        }
        if self.config.viscous_stretching_and_twisting() {
            StretchingForce::<Viscous>::accumulate_current_f(force, self);
            TwistingForce::<Viscous>::accumulate_current_f(force, self);
        }
    }

    /// Appends the configured force Jacobians as triplets whose dof
    /// indices start at `dof_offset`.
    pub fn accumulate_jacobian(&self, triplets: &mut Vec<Triplet>, dof_offset: usize) {
        StretchingForce::<NonViscous>::accumulate_current_j(triplets, dof_offset, self);
        TwistingForce::<NonViscous>::accumulate_current_j(triplets, dof_offset, self);
        BendingForce::<NonViscous>::accumulate_current_j(triplets, dof_offset, self);
        if self.config.viscous_bending() {
            BendingForce::<Viscous>::accumulate_current_j(triplets, dof_offset, self);
        }
        if self.config.viscous_stretching_and_twisting() {
            StretchingForce::<Viscous>::accumulate_current_j(triplets, dof_offset, self);
            TwistingForce::<Viscous>::accumulate_current_j(triplets, dof_offset, self);
        }
    }

    /// Number of constraint rows written by
    /// [`Self::accumulate_integration_vars`].
    pub fn num_constraints(&self) -> usize {
        let nv = self.num_vertices();
        let elastic = StretchingForce::<NonViscous>::num_constraints(nv)
            + TwistingForce::<NonViscous>::num_constraints(nv)
            + BendingForce::<NonViscous>::num_constraints(nv);
        let mut total = elastic;
        if self.config.viscous_bending() {
            total += BendingForce::<Viscous>::num_constraints(nv);
        }
        if self.config.viscous_stretching_and_twisting() {
            total += StretchingForce::<Viscous>::num_constraints(nv)
                + TwistingForce::<Viscous>::num_constraints(nv);
        }
        total
    }

    /// Appends the constraint-form variables of the configured terms at
    /// `offsets` and returns the offsets for the next strand.
    pub fn accumulate_integration_vars(
        &self,
        offsets: IntegrationOffsets,
        lambda: &[Scalar],
        vars: &mut IntegrationVars,
    ) -> IntegrationOffsets {
        let mut at = offsets;
        at.constraint +=
            StretchingForce::<NonViscous>::accumulate_integration_vars(self, at, lambda, vars);
        at.constraint +=
            TwistingForce::<NonViscous>::accumulate_integration_vars(self, at, lambda, vars);
        at.constraint +=
            BendingForce::<NonViscous>::accumulate_integration_vars(self, at, lambda, vars);
        if self.config.viscous_bending() {
            at.constraint +=
                BendingForce::<Viscous>::accumulate_integration_vars(self, at, lambda, vars);
        }
        if self.config.viscous_stretching_and_twisting() {
            at.constraint +=
                StretchingForce::<Viscous>::accumulate_integration_vars(self, at, lambda, vars);
            at.constraint +=
                TwistingForce::<Viscous>::accumulate_integration_vars(self, at, lambda, vars);
        }
        IntegrationOffsets {
            constraint: at.constraint,
            dof: offsets.dof + self.num_dofs(),
        }
    }
}

fn check_time_step(dt: Scalar) -> PlaitResult<()> {
    check_positive("dt", dt)
}

fn check_positive(field: &str, value: Scalar) -> PlaitResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PlaitError::InvalidParameter(format!(
            "{field} must be positive, got {value}"
        )))
    }
}
