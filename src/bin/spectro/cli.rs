use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "spectro",
    about = "Atomic spectroscopy notation, reference data and optics",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ionization energies from the NIST Atomic Spectra Database
    #[command(visible_alias = "ie")]
    Ionization(IonizationArgs),

    /// X-ray filter transmission from the CXRO (Henke) calculator
    #[command(visible_alias = "f")]
    Filter(FilterArgs),

    /// List the built-in filter materials
    Materials,

    /// Bragg angle of a crystal or lattice spacing
    #[command(visible_alias = "b")]
    Bragg(BraggArgs),

    /// Describe an electron configuration and its term
    #[command(visible_alias = "l")]
    Level(LevelArgs),

    /// Check electric-dipole selection rules between two levels
    #[command(visible_alias = "t")]
    Transition(TransitionArgs),
}

/// Options accepted by every command.
#[derive(Args)]
#[command(next_help_heading = "Global Options")]
pub struct GlobalOptions {
    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Output format (inferred from the --output extension if omitted)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<OutputFormat>,

    /// Database endpoint configuration (TOML)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Suppress banner, progress and summary tables (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Args)]
pub struct IonizationArgs {
    /// Element symbol or name, or a spectrum such as "Na IV"
    #[arg(value_name = "ELEMENT")]
    pub element: String,

    /// Only the ion with this charge (0 = neutral atom)
    #[arg(long, value_name = "N")]
    pub charge: Option<u32>,
}

#[derive(Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub material: FilterMaterialOptions,

    #[command(flatten)]
    pub range: FilterRangeOptions,
}

/// Filter material.
#[derive(Args)]
#[command(next_help_heading = "Material")]
pub struct FilterMaterialOptions {
    /// Chemical formula of the filter (default: Si3N4)
    #[arg(long, value_name = "FORMULA", conflicts_with = "material")]
    pub formula: Option<String>,

    /// One of the built-in materials (see `spectro materials`)
    #[arg(long, value_name = "NAME")]
    pub material: Option<String>,

    /// Density in g/cm³ (tabulated value if omitted)
    #[arg(long, value_name = "G/CM3")]
    pub density: Option<f64>,

    /// Filter thickness in µm
    #[arg(long, value_name = "UM", default_value = "0.2")]
    pub thickness: f64,
}

/// Spectral range of the calculation.
#[derive(Args)]
#[command(next_help_heading = "Spectral Range")]
pub struct FilterRangeOptions {
    /// Scan in photon energy (eV) or wavelength (nm)
    #[arg(long, value_name = "AXIS", default_value = "energy")]
    pub scan: ScanAxis,

    /// Range minimum (default: 10 eV or 0.05 nm)
    #[arg(long, value_name = "VALUE")]
    pub min: Option<f64>,

    /// Range maximum (default: 1000 eV or 100 nm)
    #[arg(long, value_name = "VALUE")]
    pub max: Option<f64>,

    /// Number of points
    #[arg(long, value_name = "N", default_value = "100")]
    pub points: u32,

    /// Plot scaling requested from the server
    #[arg(long, value_name = "SCALING", default_value = "linear")]
    pub scaling: PlotScaling,
}

#[derive(Args)]
pub struct BraggArgs {
    #[command(flatten)]
    pub lattice: LatticeOptions,

    #[command(flatten)]
    pub photon: PhotonOptions,

    /// Diffraction order
    #[arg(long, value_name = "N", default_value = "1")]
    pub order: u32,
}

/// Diffracting crystal.
#[derive(Args)]
#[group(required = true, multiple = false)]
#[command(next_help_heading = "Crystal")]
pub struct LatticeOptions {
    /// Lattice spacing d in Å
    #[arg(long = "d-spacing", value_name = "Å")]
    pub d_spacing: Option<f64>,

    /// Analyzer crystal preset (HOPG, LiF(200), PET, KAP, Si(111), ...)
    #[arg(long, value_name = "NAME")]
    pub crystal: Option<String>,
}

/// Incident photon.
#[derive(Args)]
#[group(required = true, multiple = false)]
#[command(next_help_heading = "Photon")]
pub struct PhotonOptions {
    /// Wavelength in Å
    #[arg(long, value_name = "Å")]
    pub wavelength: Option<f64>,

    /// Photon energy in eV
    #[arg(long, value_name = "EV")]
    pub energy: Option<f64>,
}

#[derive(Args)]
pub struct LevelArgs {
    /// Configuration, e.g. "1s2.2s2.2p6.3s" or "[Ne] 3s"
    #[arg(
        value_name = "CONFIG",
        required_unless_present = "ion",
        conflicts_with = "ion"
    )]
    pub configuration: Option<String>,

    /// Term symbol coupled to the configuration, e.g. "2S<1/2>"
    #[arg(long, value_name = "TERM")]
    pub term: Option<String>,

    /// Use the ground configuration of an ion, e.g. "Na IV" or "Fe2+"
    #[arg(long, value_name = "ION")]
    pub ion: Option<String>,
}

#[derive(Args)]
pub struct TransitionArgs {
    /// Lower level as "<configuration> <term>", e.g. "2p6.3s 2S<1/2>"
    #[arg(value_name = "LOWER")]
    pub lower: String,

    /// Upper level as "<configuration> <term>"
    #[arg(value_name = "UPPER")]
    pub upper: String,

    /// Energy of the lower level in eV
    #[arg(long = "lower-energy", value_name = "EV", allow_hyphen_values = true)]
    pub lower_energy: Option<f64>,

    /// Energy of the upper level in eV
    #[arg(long = "upper-energy", value_name = "EV", allow_hyphen_values = true)]
    pub upper_energy: Option<f64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns
    #[value(alias = "txt")]
    Text,
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
    /// JSON document with source metadata
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum ScanAxis {
    /// Photon energy in eV
    #[default]
    Energy,
    /// Wavelength in nm
    #[value(alias = "wave")]
    Wavelength,
}

#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum PlotScaling {
    #[default]
    Linear,
    Log,
    #[value(name = "log-lin", alias = "loglin")]
    LogLin,
    #[value(name = "lin-log", alias = "linlog")]
    LinLog,
}

pub fn parse() -> Cli {
    Cli::parse()
}
