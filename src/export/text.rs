use std::io::Write;

use super::error::Error;
use crate::db::Database;
use crate::db::henke::TransmissionCurve;
use crate::db::nist::IonizationEnergy;

pub fn write_ionization<W: Write>(mut writer: W, rows: &[IonizationEnergy]) -> Result<(), Error> {
    write_source(&mut writer, Database::NistAsd)?;
    writeln!(
        writer,
        "# {:<9} {:>6} {:<12} {:<14} {:>16} {:>14}  {}",
        "spectrum", "charge", "ground level", "ionized level", "energy (eV)", "unc. (eV)", "kind"
    )?;
    for row in rows {
        let unc = row
            .uncertainty_ev
            .map(|u| u.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            writer,
            "  {:<9} {:>6} {:<12} {:<14} {:>16} {:>14}  {}",
            row.ion.spectrum_name(),
            row.ion.charge(),
            row.ground_level,
            row.ionized_level,
            row.energy_ev,
            unc,
            row.kind
        )?;
    }
    Ok(())
}

pub fn write_transmission<W: Write>(mut writer: W, curve: &TransmissionCurve) -> Result<(), Error> {
    write_source(&mut writer, Database::Henke)?;
    writeln!(
        writer,
        "# {} Density={} Thickness={} microns",
        curve.formula, curve.density, curve.thickness_um
    )?;
    writeln!(writer, "# {:>14} {:>14}", curve.axis.header(), "Transmission")?;
    for (x, t) in &curve.points {
        writeln!(writer, "  {x:>14} {t:>14}")?;
    }
    Ok(())
}

fn write_source<W: Write>(writer: &mut W, database: Database) -> Result<(), Error> {
    writeln!(writer, "# {} (version {})", database, database.version())?;
    writeln!(writer, "# {}", database.citation())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    #[test]
    fn ionization_table_is_commented_and_aligned() {
        let mut out = Vec::new();
        write_ionization(&mut out, &fixtures::ionization_rows()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[..3].iter().all(|l| l.starts_with('#')));
        assert!(lines[3].trim_start().starts_with("He I"));
        assert!(lines[4].contains(" - "));
        assert!(lines[4].ends_with("Theoretical"));
    }

    #[test]
    fn transmission_lists_points() {
        let mut out = Vec::new();
        write_transmission(&mut out, &fixtures::curve()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("# C Density=2.2 Thickness=1 microns"));
        assert!(text.contains("Photon Energy (eV)"));
        let last = text.lines().last().unwrap();
        assert_eq!(last.split_whitespace().collect::<Vec<_>>(), ["200", "0.5"]);
    }
}
