use std::io::Write;

use super::error::Error;
use crate::db::Database;
use crate::db::henke::{SpectralAxis, TransmissionCurve};
use crate::db::nist::IonizationEnergy;

const IONIZATION_HEADER: [&str; 13] = [
    "z",
    "spectrum",
    "charge",
    "element",
    "isoelectronic_sequence",
    "ground_shells",
    "ground_configuration",
    "ground_level",
    "ionized_level",
    "energy_ev",
    "uncertainty_ev",
    "kind",
    "references",
];

pub fn write_ionization<W: Write>(
    mut writer: W,
    rows: &[IonizationEnergy],
    delimiter: char,
) -> Result<(), Error> {
    write_source(&mut writer, Database::NistAsd)?;
    write_record(&mut writer, IONIZATION_HEADER.iter().map(|s| s.to_string()), delimiter)?;

    for row in rows {
        let fields = [
            row.ion.element().atomic_number().to_string(),
            row.ion.spectrum_name(),
            row.ion.charge().to_string(),
            row.ion.element().name().to_string(),
            row.isoelectronic_sequence.clone(),
            row.ground_shells.clone(),
            row.ground_configuration.clone(),
            row.ground_level.clone(),
            row.ionized_level.clone(),
            row.energy_ev.to_string(),
            row.uncertainty_ev.map(|u| u.to_string()).unwrap_or_default(),
            row.kind.label().to_string(),
            row.references.clone(),
        ];
        write_record(&mut writer, fields, delimiter)?;
    }
    Ok(())
}

pub fn write_transmission<W: Write>(
    mut writer: W,
    curve: &TransmissionCurve,
    delimiter: char,
) -> Result<(), Error> {
    write_source(&mut writer, Database::Henke)?;
    writeln!(
        writer,
        "# {} density={} g/cm3 thickness={} um",
        curve.formula, curve.density, curve.thickness_um
    )?;
    let x_name = match curve.axis {
        SpectralAxis::Energy => "energy_ev",
        SpectralAxis::Wavelength => "wavelength_nm",
    };
    write_record(
        &mut writer,
        [x_name.to_string(), "transmission".to_string()],
        delimiter,
    )?;
    for (x, t) in &curve.points {
        writeln!(writer, "{x}{delimiter}{t}")?;
    }
    Ok(())
}

fn write_source<W: Write>(writer: &mut W, database: Database) -> Result<(), Error> {
    writeln!(writer, "# source: {} {}", database, database.version())?;
    writeln!(writer, "# cite: {}", database.citation())?;
    Ok(())
}

fn write_record<W: Write>(
    writer: &mut W,
    fields: impl IntoIterator<Item = String>,
    delimiter: char,
) -> Result<(), Error> {
    let line = fields
        .into_iter()
        .map(|f| escape(f, delimiter))
        .collect::<Vec<_>>()
        .join(&delimiter.to_string());
    writeln!(writer, "{line}")?;
    Ok(())
}

fn escape(field: String, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    #[test]
    fn csv_ionization_rows() {
        let mut out = Vec::new();
        write_ionization(&mut out, &fixtures::ionization_rows(), ',').unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("# source: NIST ASD"));
        assert!(lines[2].starts_with("z,spectrum,charge,element"));
        assert_eq!(
            lines[3],
            "2,He I,0,Helium,He,1s2,1s2,1S0,1s 2S<1/2>,24.587389011,0.000000025,Measured,\"L1, L2\""
        );
        assert!(lines[4].contains(",54.41776311,,Theoretical,"));
    }

    #[test]
    fn tsv_needs_no_quoting_for_commas() {
        let mut out = Vec::new();
        write_ionization(&mut out, &fixtures::ionization_rows(), '\t').unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().nth(3).unwrap().ends_with("\tMeasured\tL1, L2"));
    }

    #[test]
    fn transmission_columns_follow_axis() {
        let mut out = Vec::new();
        write_transmission(&mut out, &fixtures::curve(), ',').unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "# C density=2.2 g/cm3 thickness=1 um");
        assert_eq!(lines[3], "energy_ev,transmission");
        assert_eq!(lines[4], "100,0.25");
        assert_eq!(lines.len(), 6);
    }
}
