//! Parser for the plain-text data files of the filter calculator.

use serde::Serialize;
use std::fmt;

use super::super::Database;
use super::super::error::Error;

/// Quantity on the abscissa of a transmission curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpectralAxis {
    /// Photon energy in eV.
    Energy,
    /// Wavelength in nm.
    Wavelength,
}

impl SpectralAxis {
    /// Column header as written by the server.
    pub fn header(&self) -> &'static str {
        match self {
            SpectralAxis::Energy => "Photon Energy (eV)",
            SpectralAxis::Wavelength => "Wavelength (nm)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SpectralAxis::Energy => "eV",
            SpectralAxis::Wavelength => "nm",
        }
    }

    fn from_header(text: &str) -> Option<Self> {
        [SpectralAxis::Energy, SpectralAxis::Wavelength]
            .into_iter()
            .find(|axis| axis.header() == text)
    }
}

impl fmt::Display for SpectralAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Transmission of a filter sampled along one spectral axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransmissionCurve {
    pub formula: String,
    /// g/cm³
    pub density: f64,
    pub thickness_um: f64,
    pub axis: SpectralAxis,
    /// `(abscissa, transmission)` in file order.
    pub points: Vec<(f64, f64)>,
}

impl TransmissionCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Linear interpolation inside the sampled range; `None` outside it.
    pub fn transmission_at(&self, x: f64) -> Option<f64> {
        if let [(x0, t0)] = self.points.as_slice() {
            return (*x0 == x).then_some(*t0);
        }
        self.points.windows(2).find_map(|w| {
            let ((xa, ta), (xb, tb)) = (w[0], w[1]);
            let (lo, hi) = if xa <= xb { (xa, xb) } else { (xb, xa) };
            if x < lo || x > hi {
                return None;
            }
            if x == xa {
                return Some(ta);
            }
            if x == xb {
                return Some(tb);
            }
            Some(ta + (tb - ta) * (x - xa) / (xb - xa))
        })
    }

    /// Lowest and highest sampled transmission.
    pub fn transmission_range(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|&(_, t)| t).fold(None, |acc, t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
    }
}

/// Parses a data file:
///
/// ```text
///  Si3N4 Density=3.44 Thickness=0.2 microns
///  Photon Energy (eV), Transmission
///      10.0000      0.35017
/// ```
pub fn parse_transmission(text: &str) -> Result<TransmissionCurve, Error> {
    let err = |line: usize, details: String| Error::parse(Database::Henke, line, details);
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    let (_, header) = lines
        .next()
        .ok_or_else(|| err(1, "empty data file".into()))?;
    let mut words = header.split_whitespace();
    let formula = words
        .next()
        .ok_or_else(|| err(1, "missing material formula".into()))?
        .to_string();
    let mut density = None;
    let mut thickness_um = None;
    for word in words {
        if let Some(v) = word.strip_prefix("Density=") {
            density = Some(parse_number(v).map_err(|e| err(1, e))?);
        } else if let Some(v) = word.strip_prefix("Thickness=") {
            thickness_um = Some(parse_number(v).map_err(|e| err(1, e))?);
        }
    }
    let density = density.ok_or_else(|| err(1, "missing Density=".into()))?;
    let thickness_um = thickness_um.ok_or_else(|| err(1, "missing Thickness=".into()))?;

    let (_, columns) = lines
        .next()
        .ok_or_else(|| err(2, "missing column header".into()))?;
    let axis_label = columns.split(',').next().unwrap_or_default().trim();
    let axis = SpectralAxis::from_header(axis_label).ok_or_else(|| {
        err(2, format!("unknown spectral axis '{axis_label}'; the data format may have changed"))
    })?;

    let mut points = Vec::new();
    for (line_no, line) in lines.filter(|(_, l)| !l.is_empty()) {
        let mut fields = line.split_whitespace();
        let (Some(x), Some(t), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(err(line_no, format!("expected two columns in '{line}'")));
        };
        let x = parse_number(x).map_err(|e| err(line_no, e))?;
        let t = parse_number(t).map_err(|e| err(line_no, e))?;
        points.push((x, t));
    }

    Ok(TransmissionCurve {
        formula,
        density,
        thickness_um,
        axis,
        points,
    })
}

fn parse_number(text: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .map_err(|_| format!("invalid number '{text}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SI3N4: &str = include_str!("../../../tests/data/henke_si3n4_energy.dat");
    const CARBON: &str = include_str!("../../../tests/data/henke_c_wavelength.dat");

    #[test]
    fn energy_scan() {
        let curve = parse_transmission(SI3N4).unwrap();
        assert_eq!(curve.formula, "Si3N4");
        assert_eq!(curve.density, 3.44);
        assert_eq!(curve.thickness_um, 0.2);
        assert_eq!(curve.axis, SpectralAxis::Energy);
        assert_eq!(curve.len(), 11);
        assert_eq!(curve.points[0], (10.0, 0.35017));
        assert_eq!(curve.transmission_range(), Some((0.11245, 0.92377)));
    }

    #[test]
    fn wavelength_scan() {
        let curve = parse_transmission(CARBON).unwrap();
        assert_eq!(curve.axis, SpectralAxis::Wavelength);
        assert_eq!(curve.axis.unit(), "nm");
        assert_eq!(curve.thickness_um, 1.0);
        assert_eq!(curve.len(), 4);
    }

    #[test]
    fn interpolation() {
        let curve = parse_transmission(SI3N4).unwrap();
        let mid = curve.transmission_at(950.0).unwrap();
        assert!((mid - (0.90074 + 0.92377) / 2.0).abs() < 1e-12);
        assert_eq!(curve.transmission_at(500.0), Some(0.62785));
        assert_eq!(curve.transmission_at(5.0), None);
        assert_eq!(curve.transmission_at(1000.5), None);
    }

    #[test]
    fn unknown_axis_is_rejected() {
        let text = " C Density=2.2 Thickness=1 microns\n Frequency (Hz), Transmission\n 1 0.5\n";
        let err = parse_transmission(text).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn malformed_rows_report_their_line() {
        let text = " C Density=2.2 Thickness=1 microns\n Photon Energy (eV), Transmission\n 10 0.5\n 20\n";
        let err = parse_transmission(text).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 4, .. }));

        let no_density = " C Thickness=1 microns\n Photon Energy (eV), Transmission\n";
        assert!(parse_transmission(no_density).is_err());
    }
}
