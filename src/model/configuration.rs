//! Electron configurations as ordered sets of populated subshells.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::element::Element;
use super::error::NotationError;
use super::quantum::{self, HalfInt};
use super::subshell::Subshell;
use super::term::Parity;

/// Noble gases accepted as `[X]` cores.
const NOBLE_CORES: [Element; 7] = [
    Element::He,
    Element::Ne,
    Element::Ar,
    Element::Kr,
    Element::Xe,
    Element::Rn,
    Element::Og,
];

/// Highest principal quantum number considered by aufbau filling.
const AUFBAU_MAX_N: u8 = 10;

/// The electron configuration of an atom or ion.
///
/// Subshells that are not listed are empty. An empty configuration describes
/// a bare nucleus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ElectronConfiguration {
    subshells: Vec<Subshell>,
}

impl ElectronConfiguration {
    /// Builds a configuration, dropping empty subshells and sorting by `(n, l)`.
    ///
    /// # Errors
    ///
    /// [`NotationError::DuplicateSubshell`] if two entries share `(n, l)`.
    pub fn new(subshells: impl IntoIterator<Item = Subshell>) -> Result<Self, NotationError> {
        let mut subshells: Vec<Subshell> =
            subshells.into_iter().filter(|s| !s.is_empty()).collect();
        subshells.sort();

        if let Some(pair) = subshells
            .windows(2)
            .find(|w| w[0].n() == w[1].n() && w[0].l() == w[1].l())
        {
            return Err(NotationError::DuplicateSubshell(format!(
                "{}{}",
                pair[0].n(),
                pair[0].letter()
            )));
        }

        Ok(Self { subshells })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.subshells.is_empty()
    }

    pub fn subshells(&self) -> &[Subshell] {
        &self.subshells
    }

    pub fn subshell(&self, n: u8, l: u8) -> Option<&Subshell> {
        self.subshells.iter().find(|s| s.n() == n && s.l() == l)
    }

    pub fn electron_count(&self) -> u32 {
        self.subshells.iter().map(|s| u32::from(s.electrons())).sum()
    }

    pub fn open_subshells(&self) -> impl Iterator<Item = &Subshell> {
        self.subshells.iter().filter(|s| !s.is_closed())
    }

    pub fn unpaired(&self) -> u32 {
        self.subshells.iter().map(|s| u32::from(s.unpaired())).sum()
    }

    /// Highest total spin allowed by Hund's first rule.
    pub fn spin(&self) -> HalfInt {
        HalfInt::from_doubled(self.unpaired() as u16)
    }

    pub fn multiplicity(&self) -> u32 {
        self.unpaired() + 1
    }

    /// (-1)^Σ l·e over all electrons.
    pub fn parity(&self) -> Parity {
        let sum: u32 = self
            .subshells
            .iter()
            .map(|s| u32::from(s.l()) * u32::from(s.electrons()))
            .sum();
        if sum % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    /// Fills `electrons` into subshells in Madelung order (n + l, then n).
    ///
    /// This is the textbook ground state; it ignores the known exceptions
    /// such as Cr and Cu.
    pub fn aufbau(electrons: u32) -> Result<Self, NotationError> {
        let mut remaining = electrons;
        let mut filled = Vec::new();

        for (n, l) in madelung_order() {
            if remaining == 0 {
                break;
            }
            let cap = u32::from(quantum::subshell_capacity(l));
            let take = remaining.min(cap);
            filled.push(Subshell::new(n, l, take as u8)?);
            remaining -= take;
        }

        if remaining > 0 {
            return Err(NotationError::TooManyForAufbau(electrons));
        }
        Self::new(filled)
    }

    /// NIST-style ASCII notation: `1s2.2s2.2p6`.
    pub fn to_ascii(&self) -> String {
        self.subshells
            .iter()
            .map(Subshell::to_ascii)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Electrons per `(n, l)`; used to compare configurations.
    pub(crate) fn occupation(&self) -> BTreeMap<(u8, u8), u8> {
        self.subshells
            .iter()
            .map(|s| ((s.n(), s.l()), s.electrons()))
            .collect()
    }
}

fn madelung_order() -> Vec<(u8, u8)> {
    let mut order: Vec<(u8, u8)> = (1..=AUFBAU_MAX_N)
        .flat_map(|n| {
            (0..n)
                .filter(|&l| quantum::orbital_letter(l).is_some())
                .map(move |l| (n, l))
        })
        .collect();
    order.sort_by_key(|&(n, l)| (n + l, n));
    order
}

impl fmt::Display for ElectronConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, sub) in self.subshells.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{sub}")?;
        }
        Ok(())
    }
}

impl FromStr for ElectronConfiguration {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let mut subshells = Vec::new();

        let rest = if let Some(after) = input.strip_prefix('[') {
            let (core, rest) = after.split_once(']').ok_or_else(|| {
                NotationError::syntax("configuration", input, "unterminated core bracket")
            })?;
            let element: Element = core.trim().parse().map_err(|_| {
                NotationError::syntax("configuration", input, "unknown core element")
            })?;
            if !NOBLE_CORES.contains(&element) {
                return Err(NotationError::syntax(
                    "configuration",
                    input,
                    "core must be a noble gas",
                ));
            }
            let core = Self::aufbau(u32::from(element.atomic_number()))?;
            subshells.extend_from_slice(core.subshells());
            rest
        } else {
            input
        };

        for token in rest
            .split(|c: char| c == '.' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            subshells.push(token.parse::<Subshell>()?);
        }

        Self::new(subshells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(n: u8, l: u8, e: u8) -> Subshell {
        Subshell::new(n, l, e).unwrap()
    }

    #[test]
    fn new_sorts_and_drops_empty() {
        let config =
            ElectronConfiguration::new(vec![sub(2, 1, 6), sub(1, 0, 2), sub(3, 2, 0), sub(2, 0, 2)])
                .unwrap();
        assert_eq!(config.to_ascii(), "1s2.2s2.2p6");
        assert_eq!(config.electron_count(), 10);
    }

    #[test]
    fn duplicate_subshells_are_rejected() {
        let err = ElectronConfiguration::new(vec![sub(2, 1, 1), sub(2, 1, 2)]).unwrap_err();
        assert_eq!(err, NotationError::DuplicateSubshell("2p".into()));
    }

    #[test]
    fn empty_configuration_is_bare_nucleus() {
        let config: ElectronConfiguration = "".parse().unwrap();
        assert!(config.is_empty());
        assert_eq!(config, ElectronConfiguration::empty());
        assert_eq!(config.parity(), Parity::Even);
    }

    #[test]
    fn parses_nist_and_unicode_forms() {
        let a: ElectronConfiguration = "1s2.2s2.2p6.3s".parse().unwrap();
        let b: ElectronConfiguration = "1s² 2s² 2p⁶ 3s¹".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "1s² 2s² 2p⁶ 3s¹");
    }

    #[test]
    fn noble_gas_core_expands() {
        let config: ElectronConfiguration = "[Ne]3s2.3p".parse().unwrap();
        assert_eq!(config.to_ascii(), "1s2.2s2.2p6.3s2.3p");
        assert!("[Na]3s".parse::<ElectronConfiguration>().is_err());
        assert!("[Ne]2p1".parse::<ElectronConfiguration>().is_err());
        assert!("[Ne 3s".parse::<ElectronConfiguration>().is_err());
    }

    #[test]
    fn aufbau_matches_textbook_fills() {
        assert_eq!(
            ElectronConfiguration::aufbau(26).unwrap().to_ascii(),
            "1s2.2s2.2p6.3s2.3p6.3d6.4s2"
        );
        assert_eq!(ElectronConfiguration::aufbau(0).unwrap(), ElectronConfiguration::empty());
        let og = ElectronConfiguration::aufbau(118).unwrap();
        assert_eq!(og.subshell(7, 1).map(Subshell::electrons), Some(6));
    }

    #[test]
    fn spin_and_parity() {
        let nitrogen: ElectronConfiguration = "1s2.2s2.2p3".parse().unwrap();
        assert_eq!(nitrogen.unpaired(), 3);
        assert_eq!(nitrogen.multiplicity(), 4);
        assert_eq!(nitrogen.parity(), Parity::Odd);
        assert_eq!(nitrogen.open_subshells().count(), 1);

        let excited: ElectronConfiguration = "2p5.3p".parse().unwrap();
        assert_eq!(excited.parity(), Parity::Even);
    }
}
