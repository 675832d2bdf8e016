use anyhow::{Context, Result};
use serde_json::Value;

use spectroscopy::{EnergyLevel, Transition};

use crate::cli::{GlobalOptions, TransitionArgs};
use crate::io::{Report, write_output};

pub fn run(args: TransitionArgs, global: &GlobalOptions) -> Result<()> {
    let report = check(&args)?;
    write_output(global, |out, format| report.write(out, format))?;
    Ok(())
}

fn level(text: &str, energy: Option<f64>) -> Result<EnergyLevel> {
    let level: EnergyLevel = text
        .parse()
        .with_context(|| format!("Invalid level '{text}'"))?;
    Ok(match energy {
        Some(e) => level.with_energy(e),
        None => level,
    })
}

fn check(args: &TransitionArgs) -> Result<Report> {
    let transition = Transition::new(
        level(&args.lower, args.lower_energy)?,
        level(&args.upper, args.upper_energy)?,
    );
    let violations = transition.violations();
    let verdict = if violations.is_empty() { "allowed" } else { "forbidden" };

    Ok(Report::record(format!("E1 transition {transition}"))
        .field("lower", transition.lower().to_string())
        .field("upper", transition.upper().to_string())
        .field("electric_dipole", verdict)
        .field(
            "violated_rules",
            violations.iter().map(|r| Value::from(r.to_string())).collect::<Vec<_>>(),
        )
        .field("energy_ev", transition.energy_ev())
        .field("wavelength_nm", transition.wavelength_nm()))
}
