//! Parser for the ASCII table of the ASD ionization-energy form.

use serde::Serialize;
use std::fmt;

use super::super::Database;
use super::super::error::Error;
use super::super::html;
use crate::model::element::Element;
use crate::model::ion::Ion;

/// Cells a data row must have; the references column may be missing.
const MIN_CELLS: usize = 11;

/// Provenance of a tabulated value, as marked by the ASD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueKind {
    /// Plain number.
    Measured,
    /// Number in square brackets.
    Interpolated,
    /// Number in parentheses.
    Theoretical,
}

impl ValueKind {
    pub fn label(&self) -> &'static str {
        match self {
            ValueKind::Measured => "Measured",
            ValueKind::Interpolated => "Interpolated/extrapolated",
            ValueKind::Theoretical => "Theoretical",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the ionization-energy table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IonizationEnergy {
    pub ion: Ion,
    pub isoelectronic_sequence: String,
    pub ground_shells: String,
    pub ground_configuration: String,
    pub ground_level: String,
    pub ionized_level: String,
    pub energy_ev: f64,
    pub uncertainty_ev: Option<f64>,
    pub kind: ValueKind,
    pub references: String,
}

/// Parses every data row of the response's `<pre>` table.
///
/// Header, separator and blank lines are skipped; a line counts as data when
/// its first cell is an atomic number.
pub fn parse_table(html_text: &str) -> Result<Vec<IonizationEnergy>, Error> {
    let table = html::preformatted_block(html_text)
        .ok_or_else(|| Error::parse(Database::NistAsd, 0, "response has no <pre> table"))?;

    let mut rows = Vec::new();
    for (idx, raw) in table.lines().enumerate() {
        let line_no = idx + 1;
        let text = html::strip_tags(raw);
        let cells: Vec<&str> = text
            .trim()
            .trim_matches('|')
            .split('|')
            .map(str::trim)
            .collect();

        let Ok(z) = cells[0].parse::<u8>() else {
            continue;
        };
        if cells.len() < MIN_CELLS {
            return Err(Error::parse(
                Database::NistAsd,
                line_no,
                format!("expected at least {MIN_CELLS} columns, found {}", cells.len()),
            ));
        }
        rows.push(parse_row(z, &cells, line_no)?);
    }
    Ok(rows)
}

fn parse_row(z: u8, cells: &[&str], line: usize) -> Result<IonizationEnergy, Error> {
    let err = |details: String| Error::parse(Database::NistAsd, line, details);

    let element = Element::from_atomic_number(z).ok_or_else(|| err(format!("no element with Z = {z}")))?;
    let charge: u32 = cells[2]
        .parse()
        .map_err(|_| err(format!("invalid ion charge '{}'", cells[2])))?;
    let ion = Ion::new(element, charge).map_err(|e| err(e.to_string()))?;
    if cells[1] != ion.spectrum_name() {
        tracing::debug!(
            line,
            expected = %ion.spectrum_name(),
            found = cells[1],
            "spectrum name differs from atomic number and charge"
        );
    }

    let (energy_ev, kind) = parse_value(cells[9]).map_err(err)?;
    let uncertainty_ev = match cells[10] {
        "" => None,
        text => Some(
            text.parse::<f64>()
                .map_err(|_| err(format!("invalid uncertainty '{text}'")))?,
        ),
    };

    Ok(IonizationEnergy {
        ion,
        isoelectronic_sequence: cells[4].to_string(),
        ground_shells: cells[5].to_string(),
        ground_configuration: cells[6].to_string(),
        ground_level: cells[7].to_string(),
        ionized_level: cells[8].to_string(),
        energy_ev,
        uncertainty_ev,
        kind,
        references: cells.get(11).copied().unwrap_or_default().to_string(),
    })
}

/// Classifies `5.139`, `[98.936]` and `(1465.1)` and returns the number.
pub fn parse_value(cell: &str) -> Result<(f64, ValueKind), String> {
    let cell = cell.trim();
    let (number, kind) = match cell.chars().next() {
        Some(c) if c.is_ascii_digit() => (cell, ValueKind::Measured),
        Some('[') => (
            cell.strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
                .ok_or_else(|| format!("unterminated bracket in '{cell}'"))?,
            ValueKind::Interpolated,
        ),
        Some('(') => (
            cell.strip_prefix('(')
                .and_then(|s| s.strip_suffix(')'))
                .ok_or_else(|| format!("unterminated parenthesis in '{cell}'"))?,
            ValueKind::Theoretical,
        ),
        _ => return Err(format!("unrecognized energy value '{cell}'")),
    };
    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid energy '{number}'"))?;
    Ok((value, kind))
}
