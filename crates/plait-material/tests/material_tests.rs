//! Integration tests for plait-material.

use plait_material::{HairDatabase, HairProperties};
use plait_types::PlaitError;

fn sample() -> HairProperties {
    HairProperties {
        name: "test".into(),
        radius: 0.01,
        youngs_modulus: 1.0e10,
        shear_modulus: 3.0e9,
        stretching_multiplier: 1.0,
        density: 1.3,
        viscosity: 10.0,
        base_rotation: 0.0,
        variable_radius_hair: false,
        straight_hairs: 1.0,
        color: [0.0, 0.0, 0.0],
    }
}

// ─── HairProperties Tests ─────────────────────────────────────

#[test]
fn linear_density() {
    let props = sample();
    let expected = 1.3 * std::f64::consts::PI * 1.0e-4;
    assert!((props.linear_density() - expected).abs() < 1e-15);
}

#[test]
fn valid_properties_pass() {
    assert!(sample().validate().is_ok());
}

#[test]
fn negative_radius_rejected() {
    let props = HairProperties {
        radius: -0.01,
        ..sample()
    };
    let err = props.validate().unwrap_err();
    assert!(err.to_string().contains("radius"));
}

#[test]
fn straight_hairs_out_of_range_rejected() {
    let props = HairProperties {
        straight_hairs: 1.5,
        ..sample()
    };
    assert!(props.validate().is_err());
}

#[test]
fn zero_viscosity_is_not_viscous() {
    let props = HairProperties {
        viscosity: 0.0,
        ..sample()
    };
    assert!(props.validate().is_ok());
    assert!(!props.is_viscous());
}

#[test]
fn toml_defaults_fill_optional_fields() {
    let text = r#"
        name = "minimal"
        radius = 0.004
        youngs_modulus = 3.9e10
        shear_modulus = 3.4e9
        density = 1.32
    "#;
    let props: HairProperties = toml::from_str(text).unwrap();
    assert_eq!(props.stretching_multiplier, 1.0);
    assert_eq!(props.straight_hairs, 1.0);
    assert_eq!(props.viscosity, 0.0);
    assert!(!props.variable_radius_hair);
}

#[test]
fn json_round_trip() {
    let props = sample();
    let json = serde_json::to_string(&props).unwrap();
    let recovered: HairProperties = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, props);
}

// ─── HairDatabase Tests ──────────────────────────────────────

#[test]
fn default_database_has_three_presets() {
    let db = HairDatabase::with_defaults();
    assert_eq!(db.len(), 3);
}

#[test]
fn all_presets_are_valid() {
    let db = HairDatabase::with_defaults();
    for name in db.names() {
        let props = db.get(name).unwrap();
        assert!(props.validate().is_ok(), "preset {name} failed validation");
    }
}

#[test]
fn tapered_preset_is_variable_radius() {
    let db = HairDatabase::with_defaults();
    assert!(db.get("animal_tapered").unwrap().variable_radius_hair);
    assert!(!db.get("human_straight").unwrap().variable_radius_hair);
}

#[test]
fn missing_preset_returns_none() {
    let db = HairDatabase::with_defaults();
    assert!(db.get("nonexistent").is_none());
}

#[test]
fn custom_preset() {
    let mut db = HairDatabase::empty();
    assert!(db.is_empty());
    db.register(sample());
    assert_eq!(db.len(), 1);
    assert_eq!(db.get("test").unwrap().radius, 0.01);
}

// ─── Preset File Tests ───────────────────────────────────────

const PRESET_FILE: &str = r#"
    [[preset]]
    name = "blonde"
    radius = 0.003
    youngs_modulus = 3.9e10
    shear_modulus = 3.4e9
    density = 1.32
    viscosity = 500.0

    [[preset]]
    name = "fur"
    radius = 0.006
    youngs_modulus = 2.0e10
    shear_modulus = 1.7e9
    density = 1.3
    variable_radius_hair = true
    straight_hairs = 0.5
"#;

#[test]
fn preset_file_parses() {
    let db = HairDatabase::from_toml_str(PRESET_FILE).unwrap();
    assert_eq!(db.len(), 2);
    assert_eq!(db.get("blonde").unwrap().viscosity, 500.0);
    let fur = db.get("fur").unwrap();
    assert!(fur.variable_radius_hair);
    assert_eq!(fur.straight_hairs, 0.5);
    assert_eq!(fur.stretching_multiplier, 1.0);
}

#[test]
fn preset_file_loads_from_disk() {
    let path = std::env::temp_dir().join(format!("plait_presets_{}.toml", std::process::id()));
    std::fs::write(&path, PRESET_FILE).unwrap();
    let db = HairDatabase::load(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(db.unwrap().len(), 2);
}

#[test]
fn missing_preset_file_is_io_error() {
    let path = std::env::temp_dir().join("plait_no_such_dir/presets.toml");
    assert!(matches!(HairDatabase::load(path), Err(PlaitError::Io(_))));
}

#[test]
fn malformed_preset_file_is_serialization_error() {
    let result = HairDatabase::from_toml_str("[[preset]]\nname = 3\n");
    assert!(matches!(result, Err(PlaitError::Serialization(_))));
}

#[test]
fn duplicate_preset_names_rejected() {
    let text = format!(
        "{PRESET_FILE}\n[[preset]]\nname = \"fur\"\nradius = 0.001\n\
         youngs_modulus = 1.0e9\nshear_modulus = 1.0e8\ndensity = 1.0\n"
    );
    assert!(matches!(
        HairDatabase::from_toml_str(&text),
        Err(PlaitError::InvalidConfig(_))
    ));
}

#[test]
fn invalid_preset_in_file_rejected() {
    let text = PRESET_FILE.replace("radius = 0.003", "radius = -0.003");
    assert!(matches!(
        HairDatabase::from_toml_str(&text),
        Err(PlaitError::InvalidParameter(_))
    ));
}
