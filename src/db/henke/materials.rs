use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const DEFAULT_MATERIALS_TOML: &str = include_str!("../../../resources/henke_materials.toml");

static DEFAULT_MATERIALS: OnceLock<MaterialTable> = OnceLock::new();

/// A named filter material with its tabulated density.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Material {
    pub name: String,
    pub formula: String,
    /// g/cm³
    pub density: f64,
}

#[derive(Debug, Deserialize)]
struct MaterialTable {
    material: Vec<Material>,
}

/// The materials the Henke calculator offers in its drop-down menu.
pub fn default_materials() -> &'static [Material] {
    &DEFAULT_MATERIALS
        .get_or_init(|| {
            toml::from_str(DEFAULT_MATERIALS_TOML)
                .expect("Failed to parse embedded filter materials. This is a library bug.")
        })
        .material
}

/// Looks a material up by name, ignoring case.
pub fn find_material(name: &str) -> Option<&'static Material> {
    let name = name.trim();
    default_materials()
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::formula::ChemicalFormula;

    #[test]
    fn embedded_table_is_complete_and_valid() {
        let materials = default_materials();
        assert_eq!(materials.len(), 10);
        for m in materials {
            assert!(m.formula.parse::<ChemicalFormula>().is_ok(), "{}", m.formula);
            assert!(m.density > 0.0);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let m = find_material("Silicon Nitride").unwrap();
        assert_eq!(m.formula, "Si3N4");
        assert_eq!(m.density, 3.44);
        assert_eq!(find_material("parylene-c").unwrap().formula, "C8H7Cl");
        assert!(find_material("unobtainium").is_none());
    }
}
