//! Elastic and viscous variants of the force terms.
//!
//! A viscous force is the elastic force with the rest shape replaced by
//! the shape at the start of the time step and the stiffnesses replaced by
//! their `dt`-scaled viscous counterparts.

use plait_math::Vec2;
use plait_types::Scalar;

use crate::strand::StrandForce;

/// Coefficient and rest-shape selection for a force term.
pub trait Viscosity {
    /// Prefix of the force name.
    const NAME: &'static str;

    fn ks(strand: &StrandForce, vtx: usize) -> Scalar;
    fn kt(strand: &StrandForce, vtx: usize) -> Scalar;
    fn bending_coefficient(strand: &StrandForce, vtx: usize) -> Scalar;

    fn ell_bar(strand: &StrandForce, vtx: usize) -> Scalar;
    fn kappa_bar(strand: &StrandForce, vtx: usize) -> Vec2;
    fn twist_bar(strand: &StrandForce, vtx: usize) -> Scalar;
}

/// Elastic forces relative to the rest shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonViscous;

/// Rate-dependent forces relative to the start-of-step shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viscous;

impl Viscosity for NonViscous {
    const NAME: &'static str = "";

    fn ks(strand: &StrandForce, vtx: usize) -> Scalar {
        strand.ks(vtx)
    }

    fn kt(strand: &StrandForce, vtx: usize) -> Scalar {
        strand.kt(vtx)
    }

    fn bending_coefficient(strand: &StrandForce, vtx: usize) -> Scalar {
        strand.bending_coefficient(vtx)
    }

    fn ell_bar(strand: &StrandForce, vtx: usize) -> Scalar {
        strand.rest().lengths[vtx]
    }

    fn kappa_bar(strand: &StrandForce, vtx: usize) -> Vec2 {
        strand.rest().kappas[vtx]
    }

    fn twist_bar(strand: &StrandForce, vtx: usize) -> Scalar {
        strand.rest().twists[vtx]
    }
}

impl Viscosity for Viscous {
    const NAME: &'static str = "viscous ";

    fn ks(strand: &StrandForce, vtx: usize) -> Scalar {
        strand.parameters().viscous_ks(vtx)
    }

    fn kt(strand: &StrandForce, vtx: usize) -> Scalar {
        strand.parameters().viscous_kt(vtx)
    }

    fn bending_coefficient(strand: &StrandForce, vtx: usize) -> Scalar {
        strand.parameters().viscous_bending_coefficient(vtx)
    }

    fn ell_bar(strand: &StrandForce, vtx: usize) -> Scalar {
        strand.start().lengths[vtx]
    }

    fn kappa_bar(strand: &StrandForce, vtx: usize) -> Vec2 {
        strand.start().kappas[vtx]
    }

    fn twist_bar(strand: &StrandForce, vtx: usize) -> Scalar {
        strand.start().twists[vtx]
    }
}
