//! X-ray filter transmission from the CXRO calculator of B.L. Henke et al.
//!
//! A query is a two-step exchange: the form POST returns an HTML page that
//! links to a temporary text file, and a GET of that file yields the curve.

mod materials;
mod parser;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

pub use materials::{Material, default_materials, find_material};
pub use parser::{SpectralAxis, TransmissionCurve, parse_transmission};

use super::config::HenkeEndpoints;
use super::error::Error;
use super::{Database, Fetcher, html};
use crate::model::formula::ChemicalFormula;

/// Energy limits of the calculator, eV.
pub const ENERGY_RANGE_EV: (f64, f64) = (10.0, 30_000.0);
/// Wavelength limits of the calculator, nm.
pub const WAVELENGTH_RANGE_NM: (f64, f64) = (0.041, 124.0);
/// Sample counts the calculator accepts.
pub const POINTS_RANGE: (u32, u32) = (2, 500);

/// Spectral range of a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Scan {
    /// Photon energy in eV.
    Energy { min: f64, max: f64 },
    /// Wavelength in nm.
    Wavelength { min: f64, max: f64 },
}

impl Scan {
    pub fn axis(&self) -> SpectralAxis {
        match self {
            Scan::Energy { .. } => SpectralAxis::Energy,
            Scan::Wavelength { .. } => SpectralAxis::Wavelength,
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            Scan::Energy { min, max } | Scan::Wavelength { min, max } => (min, max),
        }
    }

    fn form_value(&self) -> &'static str {
        match self {
            Scan::Energy { .. } => "Energy",
            Scan::Wavelength { .. } => "Wave",
        }
    }

    fn limits(&self) -> (f64, f64) {
        match self {
            Scan::Energy { .. } => ENERGY_RANGE_EV,
            Scan::Wavelength { .. } => WAVELENGTH_RANGE_NM,
        }
    }
}

/// Axis scaling of the plot the server renders alongside the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Scaling {
    #[default]
    Linear,
    Log,
    LogLin,
    LinLog,
}

impl Scaling {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scaling::Linear => "Linear",
            Scaling::Log => "Log",
            Scaling::LogLin => "LogLin",
            Scaling::LinLog => "LinLog",
        }
    }
}

impl fmt::Display for Scaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scaling {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Scaling::Linear, Scaling::Log, Scaling::LogLin, Scaling::LinLog]
            .into_iter()
            .find(|sc| sc.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::invalid_query(
                    Database::Henke,
                    format!("invalid plot scaling '{s}' (expected Linear, Log, LogLin or LinLog)"),
                )
            })
    }
}

/// Parameters of a filter-transmission query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterQuery {
    pub formula: String,
    /// g/cm³; `None` lets the server use its tabulated density.
    pub density: Option<f64>,
    pub thickness_um: f64,
    pub scan: Scan,
    pub points: u32,
    pub scaling: Scaling,
}

impl Default for FilterQuery {
    fn default() -> Self {
        Self {
            formula: "Si3N4".to_string(),
            density: None,
            thickness_um: 0.2,
            scan: Scan::Energy {
                min: 10.0,
                max: 1000.0,
            },
            points: 100,
            scaling: Scaling::Linear,
        }
    }
}

impl FilterQuery {
    /// Query for a named default material at its tabulated density.
    pub fn for_material(material: &Material) -> Self {
        Self {
            formula: material.formula.clone(),
            density: Some(material.density),
            ..Self::default()
        }
    }

    /// Checks the query against the calculator's limits.
    pub fn validate(&self) -> Result<ChemicalFormula, Error> {
        let invalid = |details: String| Error::invalid_query(Database::Henke, details);

        let formula: ChemicalFormula = self
            .formula
            .parse()
            .map_err(|e: crate::model::error::NotationError| invalid(e.to_string()))?;

        if let Some(density) = self.density {
            if !(density > 0.0) {
                return Err(invalid(format!("density must be positive (got {density})")));
            }
        }
        if !(self.thickness_um > 0.0) {
            return Err(invalid(format!(
                "thickness must be positive (got {})",
                self.thickness_um
            )));
        }

        let (min, max) = self.scan.bounds();
        if !(min < max) {
            return Err(invalid(format!("range minimum {min} must be below maximum {max}")));
        }
        let (lo, hi) = self.scan.limits();
        if min < lo || max > hi {
            let unit = self.scan.axis().unit();
            return Err(invalid(format!(
                "range must lie within {lo}-{hi} {unit} (got {min}-{max} {unit})"
            )));
        }

        let (pmin, pmax) = POINTS_RANGE;
        if !(pmin..=pmax).contains(&self.points) {
            return Err(invalid(format!(
                "number of points must be within {pmin}-{pmax} (got {})",
                self.points
            )));
        }

        Ok(formula)
    }

    /// Form fields of the calculator's POST request.
    pub fn form(&self) -> Vec<(&'static str, String)> {
        let (min, max) = self.scan.bounds();
        vec![
            ("Material", "Enter Formula".to_string()),
            ("Formula", self.formula.clone()),
            ("Density", self.density.unwrap_or(-1.0).to_string()),
            ("Thickness", self.thickness_um.to_string()),
            ("Scan", self.scan.form_value().to_string()),
            ("Min", min.to_string()),
            ("Max", max.to_string()),
            ("Npts", self.points.to_string()),
            ("Plot", self.scaling.to_string()),
            ("Output", "Plot".to_string()),
        ]
    }
}

/// Runs a filter query and downloads the resulting transmission curve.
pub async fn filter_transmission<F: Fetcher + ?Sized>(
    fetcher: &F,
    endpoints: &HenkeEndpoints,
    query: &FilterQuery,
) -> Result<TransmissionCurve, Error> {
    query.validate()?;
    info!(formula = %query.formula, thickness_um = query.thickness_um, "querying Henke filter transmission");

    let page = fetcher.post_form(&endpoints.filter_url, &query.form()).await?;
    let link = html::first_link(&page)
        .ok_or_else(|| Error::parse(Database::Henke, 0, "response page has no data link"))?;
    let data_url = resolve_link(&endpoints.base_url, link)?;
    debug!(%data_url, "following data link");

    let curve = parse_transmission(&fetcher.get(&data_url).await?)?;
    if curve.axis != query.scan.axis() {
        warn!(
            requested = %query.scan.axis(),
            received = %curve.axis,
            "server returned a different spectral axis"
        );
    }
    Ok(curve)
}

/// Joins a server-relative link onto `base`, keeping any path prefix of the
/// base so mirrors under a sub-path work.
fn resolve_link(base: &str, link: &str) -> Result<String, Error> {
    let base = reqwest::Url::parse(base)
        .map_err(|e| Error::invalid_query(Database::Henke, format!("invalid base URL '{base}': {e}")))?;
    let url = base
        .join(link.trim_start_matches('/'))
        .map_err(|e| Error::parse(Database::Henke, 0, format!("invalid data link '{link}': {e}")))?;
    Ok(url.to_string())
}
