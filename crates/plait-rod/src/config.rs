//! Force accumulation configuration.
//!
//! Selects which viscous terms are summed alongside the elastic
//! stretching, twisting and bending forces.

use serde::{Deserialize, Serialize};

/// Configuration for strand-level force accumulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceConfig {
    /// Whether viscous forces are accumulated at all.
    pub accumulate_with_viscous: bool,

    /// Restrict viscous forces to bending. Viscous stretching and twisting
    /// are skipped when set.
    pub viscous_only_for_bending_modes: bool,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            accumulate_with_viscous: true,
            viscous_only_for_bending_modes: true,
        }
    }
}

impl ForceConfig {
    /// Elastic forces only.
    pub fn elastic_only() -> Self {
        Self {
            accumulate_with_viscous: false,
            ..Default::default()
        }
    }

    /// Viscous stretching, twisting and bending on top of the elastic terms.
    pub fn fully_viscous() -> Self {
        Self {
            accumulate_with_viscous: true,
            viscous_only_for_bending_modes: false,
        }
    }

    /// Returns true if the viscous bending term is accumulated.
    pub fn viscous_bending(&self) -> bool {
        self.accumulate_with_viscous
    }

    /// Returns true if the viscous stretching and twisting terms are
    /// accumulated.
    pub fn viscous_stretching_and_twisting(&self) -> bool {
        self.accumulate_with_viscous && !self.viscous_only_for_bending_modes
    }
}
