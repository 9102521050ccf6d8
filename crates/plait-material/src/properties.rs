//! Physical hair properties.
//!
//! All quantities are CGS: centimetres, grams, seconds. Moduli are in
//! dyn/cm², viscosity in poise.

use plait_types::{PlaitError, PlaitResult, Scalar};
use serde::{Deserialize, Serialize};

/// Physical properties of one hair strand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HairProperties {
    /// Human-readable name (e.g., "human_straight").
    pub name: String,

    /// Root cross-section radius (cm).
    pub radius: Scalar,

    /// Young's modulus (dyn/cm²). Drives stretching and bending stiffness.
    pub youngs_modulus: Scalar,

    /// Shear modulus (dyn/cm²). Drives twisting stiffness.
    pub shear_modulus: Scalar,

    /// Scale applied on top of the physical stretching stiffness.
    /// Real hair is nearly inextensible; values below 1 soften the
    /// stiffest mode for larger time steps.
    #[serde(default = "default_stretching_multiplier")]
    pub stretching_multiplier: Scalar,

    /// Volumetric density (g/cm³).
    pub density: Scalar,

    /// Internal viscosity (poise). Zero disables the viscous forces.
    #[serde(default)]
    pub viscosity: Scalar,

    /// Rotation of the cross-section's principal axes (radians).
    #[serde(default)]
    pub base_rotation: Scalar,

    /// Whether the radius tapers from root to tip.
    #[serde(default)]
    pub variable_radius_hair: bool,

    /// Blend between the taper fit (1.0) and a constant radius (0.0).
    #[serde(default = "default_straight_hairs")]
    pub straight_hairs: Scalar,

    /// Display color (linear RGB).
    #[serde(default)]
    pub color: [Scalar; 3],
}

fn default_stretching_multiplier() -> Scalar {
    1.0
}

fn default_straight_hairs() -> Scalar {
    1.0
}

impl HairProperties {
    /// Checks that every parameter is in its physical range.
    pub fn validate(&self) -> PlaitResult<()> {
        let positive = [
            ("radius", self.radius),
            ("youngs_modulus", self.youngs_modulus),
            ("shear_modulus", self.shear_modulus),
            ("density", self.density),
            ("stretching_multiplier", self.stretching_multiplier),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(PlaitError::InvalidParameter(format!(
                    "{}: {field} must be positive, got {value}",
                    self.name
                )));
            }
        }
        if !(self.viscosity.is_finite() && self.viscosity >= 0.0) {
            return Err(PlaitError::InvalidParameter(format!(
                "{}: viscosity must be non-negative, got {}",
                self.name, self.viscosity
            )));
        }
        if !(0.0..=1.0).contains(&self.straight_hairs) {
            return Err(PlaitError::InvalidParameter(format!(
                "{}: straight_hairs must lie in [0, 1], got {}",
                self.name, self.straight_hairs
            )));
        }
        Ok(())
    }

    /// Cross-section area at the root (cm²).
    pub fn cross_section_area(&self) -> Scalar {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Mass per unit length at the root (g/cm).
    pub fn linear_density(&self) -> Scalar {
        self.density * self.cross_section_area()
    }

    /// Returns true if any viscous force term would be non-zero.
    pub fn is_viscous(&self) -> bool {
        self.viscosity > 0.0
    }
}
