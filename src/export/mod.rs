//! Writing query results to files or streams.
//!
//! Every format carries the source database and its citation: text output as
//! `#` comment lines, delimited output as a leading comment, JSON as a
//! `source` object next to the data.

mod delimited;
mod error;
mod json;
mod text;

use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

pub use error::Error;

use crate::db::henke::TransmissionCurve;
use crate::db::nist::IonizationEnergy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Format {
    /// Aligned, human-readable columns.
    #[default]
    Text,
    Csv,
    Tsv,
    Json,
}

impl Format {
    /// Infers the format from a file extension; `None` when unrecognized.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "txt" | "dat" => Some(Format::Text),
            "csv" => Some(Format::Csv),
            "tsv" | "tab" => Some(Format::Tsv),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Text => write!(f, "text"),
            Format::Csv => write!(f, "CSV"),
            Format::Tsv => write!(f, "TSV"),
            Format::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "csv" => Ok(Format::Csv),
            "tsv" => Ok(Format::Tsv),
            "json" => Ok(Format::Json),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

pub fn write_ionization<W: Write>(
    writer: W,
    rows: &[IonizationEnergy],
    format: Format,
) -> Result<(), Error> {
    match format {
        Format::Text => text::write_ionization(writer, rows),
        Format::Csv => delimited::write_ionization(writer, rows, ','),
        Format::Tsv => delimited::write_ionization(writer, rows, '\t'),
        Format::Json => json::write_ionization(writer, rows),
    }
}

pub fn write_transmission<W: Write>(
    writer: W,
    curve: &TransmissionCurve,
    format: Format,
) -> Result<(), Error> {
    match format {
        Format::Text => text::write_transmission(writer, curve),
        Format::Csv => delimited::write_transmission(writer, curve, ','),
        Format::Tsv => delimited::write_transmission(writer, curve, '\t'),
        Format::Json => json::write_transmission(writer, curve),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::db::henke::{SpectralAxis, TransmissionCurve};
    use crate::db::nist::{IonizationEnergy, ValueKind};
    use crate::model::element::Element;
    use crate::model::ion::Ion;

    pub fn ionization_rows() -> Vec<IonizationEnergy> {
        let row = |charge: u32, energy_ev: f64, unc: Option<f64>, kind: ValueKind| IonizationEnergy {
            ion: Ion::new(Element::He, charge).unwrap(),
            isoelectronic_sequence: if charge == 0 { "He" } else { "H" }.to_string(),
            ground_shells: if charge == 0 { "1s2" } else { "1s" }.to_string(),
            ground_configuration: if charge == 0 { "1s2" } else { "1s" }.to_string(),
            ground_level: if charge == 0 { "1S0" } else { "2S<1/2>" }.to_string(),
            ionized_level: if charge == 0 { "1s 2S<1/2>" } else { "" }.to_string(),
            energy_ev,
            uncertainty_ev: unc,
            kind,
            references: "L1, L2".to_string(),
        };
        vec![
            row(0, 24.587389011, Some(0.000000025), ValueKind::Measured),
            row(1, 54.41776311, None, ValueKind::Theoretical),
        ]
    }

    pub fn curve() -> TransmissionCurve {
        TransmissionCurve {
            formula: "C".to_string(),
            density: 2.2,
            thickness_um: 1.0,
            axis: SpectralAxis::Energy,
            points: vec![(100.0, 0.25), (200.0, 0.5)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("out.CSV")), Some(Format::Csv));
        assert_eq!(Format::from_path(Path::new("a/b.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("t.tsv")), Some(Format::Tsv));
        assert_eq!(Format::from_path(Path::new("t.dat")), Some(Format::Text));
        assert_eq!(Format::from_path(Path::new("noext")), None);
        assert_eq!(Format::from_path(Path::new("x.xlsx")), None);
    }

    #[test]
    fn format_from_name() {
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert!(matches!("yaml".parse::<Format>(), Err(Error::UnknownFormat(_))));
    }
}
