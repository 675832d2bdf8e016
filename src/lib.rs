//! Atomic spectroscopy in Rust: a typed notation for atomic structure,
//! clients for reference databases, and dispersive-optics helpers.
//!
//! # Features
//!
//! - **Atomic notation**: Electron configurations (`1s2.2s2.2p6.3s`,
//!   `[Ne] 3s¹`), LS term symbols (`2P*<3/2>`, `²P°₃/₂`), energy levels and
//!   electric-dipole selection rules, with NIST ASCII parsing and Unicode
//!   display.
//! - **Reference databases**: Ionization energies from the NIST Atomic
//!   Spectra Database and x-ray filter transmission from the CXRO (Henke)
//!   calculator, each with its citation and version.
//! - **Optics**: Bragg angles and wavelengths for common analyzer crystals,
//!   photon energy/wavelength conversion.
//! - **Export**: Text, CSV, TSV and JSON writers that carry the data source.
//!
//! # Quick Start
//!
//! ```
//! use spectroscopy::{ElectronConfiguration, EnergyLevel, Ion, Transition};
//!
//! let ion: Ion = "Na IV".parse()?;
//! assert_eq!(ion.electron_count(), 8);
//! assert_eq!(ion.ground_configuration().to_ascii(), "1s2.2s2.2p4");
//!
//! let config: ElectronConfiguration = "[Ne] 3s".parse()?;
//! assert_eq!(config.to_string(), "1s² 2s² 2p⁶ 3s¹");
//!
//! let d2 = Transition::new(
//!     "2p6.3s 2S<1/2>".parse::<EnergyLevel>()?.with_energy(0.0),
//!     "2p6.3p 2P*<3/2>".parse::<EnergyLevel>()?.with_energy(2.104_430),
//! );
//! assert!(d2.is_electric_dipole_allowed());
//! assert!((d2.wavelength_nm().unwrap() - 589.16).abs() < 0.1);
//! # Ok::<(), spectroscopy::NotationError>(())
//! ```
//!
//! Database queries are `async` and generic over a [`db::Fetcher`]:
//!
//! ```no_run
//! use spectroscopy::db::{self, DatabaseConfig, HttpFetcher};
//! use spectroscopy::{Element, Ion};
//!
//! # async fn run() -> Result<(), db::Error> {
//! let config = DatabaseConfig::default();
//! let fetcher = HttpFetcher::new(&config.client)?;
//! let ion = Ion::new(Element::Na, 3).expect("Na has 11 electrons");
//! let row = db::nist::ionization_energy(&fetcher, &config.nist, ion).await?;
//! println!("{} {} eV ({})", row.ion, row.energy_ev, row.kind);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`model`] – Elements, ions, subshells, configurations, terms, levels
//!   and chemical formulas
//! - [`optics`] – Bragg diffraction and photon conversions
//! - [`db`] – NIST ASD and Henke queries, transport and endpoint configuration
//! - [`export`] – Writers for query results

pub mod db;
pub mod export;
pub mod model;
pub mod optics;

pub use model::configuration::ElectronConfiguration;
pub use model::element::{Element, ParseElementError};
pub use model::error::NotationError;
pub use model::formula::ChemicalFormula;
pub use model::ion::Ion;
pub use model::level::{EnergyLevel, SelectionRule, Transition};
pub use model::quantum::HalfInt;
pub use model::subshell::Subshell;
pub use model::term::{Parity, TermSymbol};

pub use optics::Crystal;
