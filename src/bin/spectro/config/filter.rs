use anyhow::{Result, anyhow};

use spectroscopy::db::henke::{FilterQuery, Scaling, Scan, find_material};

use crate::cli::{FilterArgs, PlotScaling, ScanAxis};

const ENERGY_DEFAULT_EV: (f64, f64) = (10.0, 1000.0);
const WAVELENGTH_DEFAULT_NM: (f64, f64) = (0.05, 100.0);

/// Translates `filter` options into a Henke query. Range limits are checked
/// by the library when the query runs.
pub fn build_filter_query(args: &FilterArgs) -> Result<FilterQuery> {
    let material = &args.material;
    let mut query = match (&material.material, &material.formula) {
        (Some(name), _) => {
            let found = find_material(name).ok_or_else(|| anyhow!("Unknown material '{name}'"))?;
            FilterQuery::for_material(found)
        }
        (None, Some(formula)) => FilterQuery {
            formula: formula.trim().to_string(),
            ..FilterQuery::default()
        },
        (None, None) => FilterQuery::default(),
    };

    if material.density.is_some() {
        query.density = material.density;
    }
    query.thickness_um = material.thickness;

    let range = &args.range;
    query.scan = match range.scan {
        ScanAxis::Energy => {
            let (min, max) = ENERGY_DEFAULT_EV;
            Scan::Energy {
                min: range.min.unwrap_or(min),
                max: range.max.unwrap_or(max),
            }
        }
        ScanAxis::Wavelength => {
            let (min, max) = WAVELENGTH_DEFAULT_NM;
            Scan::Wavelength {
                min: range.min.unwrap_or(min),
                max: range.max.unwrap_or(max),
            }
        }
    };
    query.points = range.points;
    query.scaling = match range.scaling {
        PlotScaling::Linear => Scaling::Linear,
        PlotScaling::Log => Scaling::Log,
        PlotScaling::LogLin => Scaling::LogLin,
        PlotScaling::LinLog => Scaling::LinLog,
    };

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{FilterMaterialOptions, FilterRangeOptions};

    fn args(material: Option<&str>, formula: Option<&str>, scan: ScanAxis) -> FilterArgs {
        FilterArgs {
            material: FilterMaterialOptions {
                formula: formula.map(str::to_string),
                material: material.map(str::to_string),
                density: None,
                thickness: 0.2,
            },
            range: FilterRangeOptions {
                scan,
                min: None,
                max: None,
                points: 100,
                scaling: PlotScaling::Log,
            },
        }
    }

    #[test]
    fn defaults_to_silicon_nitride() {
        let query = build_filter_query(&args(None, None, ScanAxis::Energy)).unwrap();
        assert_eq!(query.formula, "Si3N4");
        assert_eq!(query.density, None);
        assert_eq!(query.scan, Scan::Energy { min: 10.0, max: 1000.0 });
        assert_eq!(query.scaling, Scaling::Log);
    }

    #[test]
    fn material_sets_formula_and_density() {
        let query = build_filter_query(&args(Some("mylar"), None, ScanAxis::Energy)).unwrap();
        assert_eq!(query.formula, "C10H8O4");
        assert_eq!(query.density, Some(1.4));
    }

    #[test]
    fn density_overrides_material() {
        let mut a = args(Some("Teflon"), None, ScanAxis::Energy);
        a.material.density = Some(2.0);
        let query = build_filter_query(&a).unwrap();
        assert_eq!(query.formula, "C2F4");
        assert_eq!(query.density, Some(2.0));
    }

    #[test]
    fn wavelength_scan_has_its_own_defaults() {
        let mut a = args(None, Some("C"), ScanAxis::Wavelength);
        a.range.max = Some(10.0);
        let query = build_filter_query(&a).unwrap();
        assert_eq!(query.formula, "C");
        assert_eq!(query.scan, Scan::Wavelength { min: 0.05, max: 10.0 });
    }

    #[test]
    fn unknown_material_is_an_error() {
        let err = build_filter_query(&args(Some("unobtainium"), None, ScanAxis::Energy)).unwrap_err();
        assert!(err.to_string().contains("unobtainium"));
    }
}
