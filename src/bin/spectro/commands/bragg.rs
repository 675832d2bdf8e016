use anyhow::{Context, Result};

use spectroscopy::Crystal;
use spectroscopy::optics::{self, bragg_angle, max_order, photon};

use crate::cli::{BraggArgs, GlobalOptions};
use crate::io::{Report, write_output};

pub fn run(args: BraggArgs, global: &GlobalOptions) -> Result<()> {
    let report = solve(&args)?;
    write_output(global, |out, format| report.write(out, format))?;
    Ok(())
}

fn solve(args: &BraggArgs) -> Result<Report> {
    let crystal = args
        .lattice
        .crystal
        .as_deref()
        .map(str::parse::<Crystal>)
        .transpose()?;
    let d = match (crystal, args.lattice.d_spacing) {
        (Some(crystal), _) => crystal.d_spacing(),
        (None, Some(d)) => d,
        (None, None) => anyhow::bail!("Give either --crystal or --d-spacing"),
    };

    let wavelength = match (args.photon.wavelength, args.photon.energy) {
        (Some(wavelength), _) => wavelength,
        (None, Some(energy)) if energy > 0.0 => photon::energy_to_wavelength_angstrom(energy),
        (None, Some(energy)) => {
            return Err(optics::Error::NonPositive {
                quantity: "photon energy",
                value: energy,
            }
            .into());
        }
        (None, None) => anyhow::bail!("Give either --wavelength or --energy"),
    };

    let theta = bragg_angle(d, wavelength, args.order)
        .with_context(|| format!("No Bragg reflection for λ = {wavelength} Å on d = {d} Å"))?;

    let title = match crystal {
        Some(crystal) => format!("Bragg reflection on {crystal}"),
        None => format!("Bragg reflection on d = {d} Å"),
    };
    Ok(Report::record(title)
        .field("crystal", crystal.map(|c| c.name()))
        .field("d_spacing_angstrom", d)
        .field("two_d_angstrom", 2.0 * d)
        .field("wavelength_angstrom", wavelength)
        .field("energy_ev", photon::wavelength_to_energy_ev(wavelength / 10.0))
        .field("order", args.order)
        .field("theta_deg", theta.to_degrees())
        .field("theta_rad", theta)
        .field("two_theta_deg", 2.0 * theta.to_degrees())
        .field("max_order", max_order(d, wavelength)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{LatticeOptions, PhotonOptions};
    use serde_json::Value;

    fn args(crystal: Option<&str>, d: Option<f64>, wavelength: Option<f64>, energy: Option<f64>) -> BraggArgs {
        BraggArgs {
            lattice: LatticeOptions {
                d_spacing: d,
                crystal: crystal.map(str::to_string),
            },
            photon: PhotonOptions { wavelength, energy },
            order: 1,
        }
    }

    fn field(report: &Report, key: &str) -> Value {
        match report {
            Report::Record { fields, .. } => fields
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap(),
            Report::Table { .. } => panic!("expected a record"),
        }
    }

    #[test]
    fn hopg_at_four_angstrom() {
        let report = solve(&args(Some("hopg"), None, Some(4.2), None)).unwrap();
        let theta = field(&report, "theta_rad").as_f64().unwrap();
        assert!((theta - 0.676_565).abs() < 1e-5);
        assert_eq!(field(&report, "crystal"), "HOPG");
        assert_eq!(field(&report, "max_order"), 1);
    }

    #[test]
    fn energy_is_converted() {
        let report = solve(&args(None, Some(2.0), None, Some(8047.8))).unwrap();
        let wavelength = field(&report, "wavelength_angstrom").as_f64().unwrap();
        assert!((wavelength - 1.5406).abs() < 1e-3);
        assert!(field(&report, "crystal").is_null());
    }

    #[test]
    fn too_long_wavelength_fails() {
        let err = solve(&args(Some("LiF(200)"), None, Some(5.0), None)).unwrap_err();
        assert!(err.chain().any(|e| e.is::<optics::Error>()));
    }

    #[test]
    fn negative_energy_is_rejected() {
        assert!(solve(&args(None, Some(2.0), None, Some(-1.0))).is_err());
    }
}
