//! Hair preset database.
//!
//! The built-in presets cover the strand types used by the wet-hair
//! scenes: straight human hair, tapered animal fur, and a soft synthetic
//! fibre for quick tests with large time steps. Scenes can also ship
//! their own presets as a TOML file of `[[preset]]` tables.

use std::collections::HashMap;
use std::path::Path;

use plait_types::{PlaitError, PlaitResult};
use serde::Deserialize;

use crate::properties::HairProperties;

/// On-disk layout of a preset file.
#[derive(Debug, Deserialize)]
struct PresetFile {
    #[serde(default, rename = "preset")]
    presets: Vec<HairProperties>,
}

/// A named collection of hair presets.
#[derive(Debug, Clone)]
pub struct HairDatabase {
    presets: HashMap<String, HairProperties>,
}

impl HairDatabase {
    /// Creates a new database with the built-in presets.
    pub fn with_defaults() -> Self {
        let mut db = Self::empty();
        db.register(human_straight());
        db.register(animal_tapered());
        db.register(soft_synthetic());
        db
    }

    /// Creates an empty database.
    pub fn empty() -> Self {
        Self {
            presets: HashMap::new(),
        }
    }

    /// Parses presets from TOML. Every preset is validated and names must
    /// be unique within the file.
    pub fn from_toml_str(source: &str) -> PlaitResult<Self> {
        let file: PresetFile =
            toml::from_str(source).map_err(|e| PlaitError::Serialization(e.to_string()))?;

        let mut db = Self::empty();
        for props in file.presets {
            props.validate()?;
            if db.presets.contains_key(&props.name) {
                return Err(PlaitError::InvalidConfig(format!(
                    "duplicate hair preset '{}'",
                    props.name
                )));
            }
            db.register(props);
        }
        Ok(db)
    }

    /// Reads a preset file from disk.
    pub fn load(path: impl AsRef<Path>) -> PlaitResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Registers a preset. Overwrites if the name already exists.
    pub fn register(&mut self, props: HairProperties) {
        self.presets.insert(props.name.clone(), props);
    }

    /// Looks up a preset by name. Returns `None` if not found.
    pub fn get(&self, name: &str) -> Option<&HairProperties> {
        self.presets.get(name)
    }

    /// Returns all registered preset names.
    pub fn names(&self) -> Vec<&str> {
        self.presets.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for HairDatabase {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── Built-in Presets ─────────────────────────────────────────────────

/// Straight human scalp hair, constant radius.
fn human_straight() -> HairProperties {
    HairProperties {
        name: "human_straight".into(),
        radius: 0.0037,
        youngs_modulus: 3.9e10,
        shear_modulus: 3.4e9,
        stretching_multiplier: 1.0,
        density: 1.32,
        viscosity: 1.0e3,
        base_rotation: 0.0,
        variable_radius_hair: false,
        straight_hairs: 1.0,
        color: [0.24, 0.14, 0.08],
    }
}

/// Animal fur: thick root, exponential taper toward the tip.
fn animal_tapered() -> HairProperties {
    HairProperties {
        name: "animal_tapered".into(),
        radius: 0.005,
        youngs_modulus: 2.0e10,
        shear_modulus: 1.7e9,
        stretching_multiplier: 1.0,
        density: 1.3,
        viscosity: 1.0e3,
        base_rotation: 0.0,
        variable_radius_hair: true,
        straight_hairs: 1.0,
        color: [0.55, 0.45, 0.33],
    }
}

/// Soft synthetic fibre with reduced stretching stiffness.
fn soft_synthetic() -> HairProperties {
    HairProperties {
        name: "soft_synthetic".into(),
        radius: 0.01,
        youngs_modulus: 1.0e9,
        shear_modulus: 3.7e8,
        stretching_multiplier: 0.1,
        density: 1.15,
        viscosity: 1.0e2,
        base_rotation: 0.0,
        variable_radius_hair: false,
        straight_hairs: 1.0,
        color: [0.9, 0.9, 0.85],
    }
}
