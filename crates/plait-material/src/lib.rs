//! # plait-material
//!
//! Hair material properties and preset database.
//!
//! [`HairProperties`] holds the per-strand physical constants (radius,
//! moduli, density, viscosity, taper) in CGS units, the way they are
//! written in scene files. The rod crate turns them into cached stiffness
//! coefficients. [`HairDatabase`] stores named presets.

pub mod database;
pub mod properties;

pub use database::HairDatabase;
pub use properties::HairProperties;
