//! Energy levels and the transitions between them.

use std::fmt;
use std::str::FromStr;

use super::configuration::ElectronConfiguration;
use super::error::NotationError;
use super::term::TermSymbol;
use crate::optics::photon;

/// A level: a configuration coupled to a term, with an optional energy.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyLevel {
    configuration: ElectronConfiguration,
    term: TermSymbol,
    energy_ev: Option<f64>,
}

impl EnergyLevel {
    /// # Errors
    ///
    /// [`NotationError::ParityMismatch`] when the term's parity is not the
    /// parity of the configuration.
    pub fn new(
        configuration: ElectronConfiguration,
        term: TermSymbol,
    ) -> Result<Self, NotationError> {
        let config_parity = configuration.parity();
        if config_parity != term.parity() {
            return Err(NotationError::ParityMismatch {
                term: term.parity().name(),
                configuration: config_parity.name(),
            });
        }
        Ok(Self {
            configuration,
            term,
            energy_ev: None,
        })
    }

    /// Energy above the ground level in eV.
    pub fn with_energy(mut self, energy_ev: f64) -> Self {
        self.energy_ev = Some(energy_ev);
        self
    }

    pub fn configuration(&self) -> &ElectronConfiguration {
        &self.configuration
    }

    pub fn term(&self) -> &TermSymbol {
        &self.term
    }

    pub fn energy_ev(&self) -> Option<f64> {
        self.energy_ev
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.configuration, self.term)
    }
}

/// Parses `"<configuration> <term>"`; the term is the last whitespace token.
impl FromStr for EnergyLevel {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (config, term) = input.rsplit_once(char::is_whitespace).ok_or_else(|| {
            NotationError::syntax("energy level", input, "expected '<configuration> <term>'")
        })?;
        Self::new(config.parse()?, term.parse()?)
    }
}

/// An electric-dipole selection rule that a transition breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRule {
    /// Parity must change.
    Parity,
    /// ΔS = 0.
    Spin,
    /// ΔL = 0, ±1, with L = 0 → 0 forbidden.
    OrbitalMomentum,
    /// ΔJ = 0, ±1, with J = 0 → 0 forbidden.
    TotalMomentum,
    /// Exactly one electron moves, with Δl = ±1.
    SingleElectronJump,
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SelectionRule::Parity => "parity must change",
            SelectionRule::Spin => "ΔS = 0",
            SelectionRule::OrbitalMomentum => "ΔL = 0, ±1 (L = 0 ↛ 0)",
            SelectionRule::TotalMomentum => "ΔJ = 0, ±1 (J = 0 ↛ 0)",
            SelectionRule::SingleElectronJump => "one electron jumps with Δl = ±1",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    lower: EnergyLevel,
    upper: EnergyLevel,
}

impl Transition {
    pub fn new(lower: EnergyLevel, upper: EnergyLevel) -> Self {
        Self { lower, upper }
    }

    pub fn lower(&self) -> &EnergyLevel {
        &self.lower
    }

    pub fn upper(&self) -> &EnergyLevel {
        &self.upper
    }

    /// Photon energy in eV, when both level energies are known.
    pub fn energy_ev(&self) -> Option<f64> {
        Some((self.upper.energy_ev? - self.lower.energy_ev?).abs())
    }

    pub fn wavelength_nm(&self) -> Option<f64> {
        self.energy_ev()
            .filter(|e| *e > 0.0)
            .map(photon::energy_to_wavelength_nm)
    }

    /// Electric-dipole rules (LS coupling) broken by this transition.
    pub fn violations(&self) -> Vec<SelectionRule> {
        let mut broken = Vec::new();
        let (a, b) = (self.lower.term(), self.upper.term());

        if a.parity() == b.parity() {
            broken.push(SelectionRule::Parity);
        }
        if a.multiplicity() != b.multiplicity() {
            broken.push(SelectionRule::Spin);
        }
        if a.l().abs_diff(b.l()) > 1 || (a.l() == 0 && b.l() == 0) {
            broken.push(SelectionRule::OrbitalMomentum);
        }
        if let (Some(ja), Some(jb)) = (a.j(), b.j()) {
            let zero_to_zero = ja.doubled() == 0 && jb.doubled() == 0;
            if ja.doubled().abs_diff(jb.doubled()) > 2 || zero_to_zero {
                broken.push(SelectionRule::TotalMomentum);
            }
        }
        if !single_electron_jump(&self.lower.configuration, &self.upper.configuration) {
            broken.push(SelectionRule::SingleElectronJump);
        }

        broken
    }

    pub fn is_electric_dipole_allowed(&self) -> bool {
        self.violations().is_empty()
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.lower, self.upper)
    }
}

fn single_electron_jump(a: &ElectronConfiguration, b: &ElectronConfiguration) -> bool {
    let (occ_a, occ_b) = (a.occupation(), b.occupation());
    let mut gained = Vec::new();
    let mut lost = Vec::new();

    for key in occ_a.keys().chain(occ_b.keys()) {
        let before = i16::from(occ_a.get(key).copied().unwrap_or(0));
        let after = i16::from(occ_b.get(key).copied().unwrap_or(0));
        match after - before {
            0 => {}
            1 if !gained.contains(key) => gained.push(*key),
            -1 if !lost.contains(key) => lost.push(*key),
            1 | -1 => {}
            _ => return false,
        }
    }

    match (lost.as_slice(), gained.as_slice()) {
        ([(_, l_from)], [(_, l_to)]) => l_from.abs_diff(*l_to) == 1,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(s: &str) -> EnergyLevel {
        s.parse().unwrap()
    }

    #[test]
    fn display_joins_configuration_and_term() {
        let lvl = level("1s2.2s2.2p6.3p 2P*<3/2>");
        assert_eq!(lvl.to_string(), "1s² 2s² 2p⁶ 3p¹ ²P°₃/₂");
    }

    #[test]
    fn parity_must_match_configuration() {
        let err = "2p6.3s 2P*<1/2>".parse::<EnergyLevel>().unwrap_err();
        assert!(matches!(err, NotationError::ParityMismatch { .. }));
    }

    #[test]
    fn sodium_d_line_is_allowed() {
        let t = Transition::new(
            level("2p6.3s 2S<1/2>").with_energy(0.0),
            level("2p6.3p 2P*<3/2>").with_energy(2.104_430),
        );
        assert!(t.is_electric_dipole_allowed(), "{:?}", t.violations());
        let nm = t.wavelength_nm().unwrap();
        assert!((nm - 589.16).abs() < 0.1, "got {nm}");
    }

    #[test]
    fn forbidden_transitions_report_rules() {
        let s_to_d = Transition::new(level("2p6.3s 2S<1/2>"), level("2p6.3d 2D<5/2>"));
        let broken = s_to_d.violations();
        assert!(broken.contains(&SelectionRule::Parity));
        assert!(broken.contains(&SelectionRule::OrbitalMomentum));
        assert!(broken.contains(&SelectionRule::TotalMomentum));
        assert!(broken.contains(&SelectionRule::SingleElectronJump));

        let intercombination = Transition::new(level("1s2 1S0"), level("1s.2p 3P*<1>"));
        assert_eq!(intercombination.violations(), vec![SelectionRule::Spin]);
    }

    #[test]
    fn energy_needs_both_levels() {
        let t = Transition::new(level("1s2 1S0"), level("1s.2p 1P*<1>").with_energy(21.2));
        assert_eq!(t.energy_ev(), None);
        assert_eq!(t.wavelength_nm(), None);
    }
}
