use anyhow::Result;
use serde_json::json;

use spectroscopy::ChemicalFormula;
use spectroscopy::db::henke::default_materials;

use crate::cli::GlobalOptions;
use crate::io::{Report, write_output};

pub fn run(global: &GlobalOptions) -> Result<()> {
    let mut report = Report::table(
        "Built-in filter materials",
        vec!["name", "formula", "density_g_cm3", "molar_mass_g_mol"],
    );
    for material in default_materials() {
        let formula: ChemicalFormula = material.formula.parse()?;
        report.push_row(vec![
            json!(material.name),
            json!(material.formula),
            json!(material.density),
            json!((formula.molar_mass() * 1000.0).round() / 1000.0),
        ]);
    }

    write_output(global, |out, format| report.write(out, format))?;
    Ok(())
}
