//! Rest-shape provider for curly strands.
//!
//! A curled rest shape is a straight root section followed by a helix.
//! Vertices are spaced `dl` apart in arc length along that curve.

use std::f64::consts::TAU;

use glam::DVec3;
use plait_types::constants::MIN_STRAND_VERTICES;
use plait_types::{PlaitError, PlaitResult, Scalar};

/// Equilibrium (rest) shape of a strand and its generating parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StrandEquilibriumParameters {
    pub vertices: Vec<DVec3>,
    /// Helix radius (cm).
    pub curl_radius: Scalar,
    /// Helix turns per unit arc length (1/cm).
    pub curl_density: Scalar,
    /// Arc length between consecutive vertices (cm).
    pub dl: Scalar,
    /// Length of the straight section at the root (cm).
    pub root_length: Scalar,
    pub valid: bool,
    /// Set when the shape changed and the strand's rest state is stale.
    pub dirty: bool,
}

impl StrandEquilibriumParameters {
    /// Wraps an explicit rest shape.
    pub fn new(vertices: Vec<DVec3>) -> Self {
        Self {
            vertices,
            curl_radius: 0.0,
            curl_density: 0.0,
            dl: 0.0,
            root_length: 0.0,
            valid: true,
            dirty: true,
        }
    }

    /// Generates a root section along `-z` followed by a helix of radius
    /// `curl_radius` with `curl_density` turns per unit length.
    pub fn curled(
        num_vertices: usize,
        curl_radius: Scalar,
        curl_density: Scalar,
        dl: Scalar,
        root_length: Scalar,
    ) -> PlaitResult<Self> {
        if num_vertices < MIN_STRAND_VERTICES {
            return Err(PlaitError::InvalidStrand(format!(
                "a strand needs at least {MIN_STRAND_VERTICES} vertices, got {num_vertices}"
            )));
        }
        if !(dl > 0.0 && curl_radius >= 0.0 && curl_density >= 0.0 && root_length >= 0.0) {
            return Err(PlaitError::InvalidParameter(format!(
                "invalid curl: radius {curl_radius}, density {curl_density}, dl {dl}, root {root_length}"
            )));
        }
        let omega = TAU * curl_density;
        let planar = curl_radius * omega;
        if planar > 1.0 {
            return Err(PlaitError::InvalidParameter(format!(
                "curl radius {curl_radius} is too large for {curl_density} turns per unit length"
            )));
        }
        let pitch = (1.0 - planar * planar).sqrt();

        let vertices = (0..num_vertices)
            .map(|i| {
                let s = i as Scalar * dl;
                if s <= root_length {
                    DVec3::new(0.0, 0.0, -s)
                } else {
                    let q = s - root_length;
                    let (sin, cos) = (omega * q).sin_cos();
                    DVec3::new(
                        curl_radius * (cos - 1.0),
                        curl_radius * sin,
                        -root_length - pitch * q,
                    )
                }
            })
            .collect();

        Ok(Self {
            vertices,
            curl_radius,
            curl_density,
            dl,
            root_length,
            valid: true,
            dirty: true,
        })
    }

    /// Replaces the shape and flags it for reloading.
    pub fn set_vertices(&mut self, vertices: Vec<DVec3>) {
        self.vertices = vertices;
        self.dirty = true;
    }
}
