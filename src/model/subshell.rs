use std::fmt;
use std::str::FromStr;

use super::error::NotationError;
use super::quantum::{self, HalfInt};

/// A subshell `nl` populated with electrons, e.g. `2p⁵`.
///
/// Field order makes the derived ordering sort by `n`, then `l`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subshell {
    n: u8,
    l: u8,
    electrons: u8,
}

impl Subshell {
    pub fn new(n: u8, l: u8, electrons: u8) -> Result<Self, NotationError> {
        if n < 1 {
            return Err(NotationError::InvalidPrincipal(n));
        }
        if l > n - 1 || quantum::orbital_letter(l).is_none() {
            return Err(NotationError::NoSuchSubshell { n, l });
        }
        let max = quantum::subshell_capacity(l);
        if electrons > max {
            return Err(NotationError::TooManyElectrons {
                subshell: format!("{}{}", n, quantum::orbital_letter(l).unwrap_or('?')),
                given: electrons,
                max,
            });
        }
        Ok(Self { n, l, electrons })
    }

    /// Fully occupied subshell.
    pub fn closed(n: u8, l: u8) -> Result<Self, NotationError> {
        Self::new(n, l, quantum::subshell_capacity(l))
    }

    #[inline]
    pub fn n(&self) -> u8 {
        self.n
    }

    #[inline]
    pub fn l(&self) -> u8 {
        self.l
    }

    #[inline]
    pub fn electrons(&self) -> u8 {
        self.electrons
    }

    pub fn capacity(&self) -> u8 {
        quantum::subshell_capacity(self.l)
    }

    pub fn is_closed(&self) -> bool {
        self.electrons == self.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.electrons == 0
    }

    pub fn letter(&self) -> char {
        quantum::orbital_letter(self.l).unwrap_or('?')
    }

    /// Unpaired electrons under Hund's first rule.
    ///
    /// Orbitals are singly occupied first; past half filling the vacancies
    /// count the unpaired electrons.
    pub fn unpaired(&self) -> u8 {
        let orbitals = 2 * self.l + 1;
        if self.electrons <= orbitals {
            self.electrons
        } else {
            self.capacity() - self.electrons
        }
    }

    pub fn spin(&self) -> HalfInt {
        HalfInt::from_doubled(u16::from(self.unpaired()))
    }

    /// 2S + 1.
    pub fn multiplicity(&self) -> u8 {
        self.unpaired() + 1
    }

    /// ASCII notation as printed by NIST: `2p5`, and `3s` for a lone electron.
    pub fn to_ascii(&self) -> String {
        if self.electrons == 1 {
            format!("{}{}", self.n, self.letter())
        } else {
            format!("{}{}{}", self.n, self.letter(), self.electrons)
        }
    }
}

impl fmt::Display for Subshell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.n,
            self.letter(),
            quantum::to_superscript(u32::from(self.electrons))
        )
    }
}

impl FromStr for Subshell {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let err = |details: &str| NotationError::syntax("subshell", input, details);

        let letter_pos = input
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| err("missing orbital letter"))?;
        let (n_part, rest) = input.split_at(letter_pos);
        let n: u8 = n_part
            .parse()
            .map_err(|_| err("principal quantum number must be a positive integer"))?;

        let mut chars = rest.chars();
        let letter = chars.next().ok_or_else(|| err("missing orbital letter"))?;
        if !letter.is_ascii_lowercase() {
            return Err(err("orbital letters are lower case"));
        }
        let l = quantum::angular_momentum(letter).ok_or_else(|| err("unknown orbital letter"))?;

        let count: String = chars.collect();
        let electrons = if count.is_empty() {
            1
        } else {
            let mut value: u32 = 0;
            for c in count.chars() {
                let digit = quantum::digit_value(c).ok_or_else(|| err("invalid electron count"))?;
                value = value * 10 + digit;
                if value > u32::from(u8::MAX) {
                    return Err(err("electron count out of range"));
                }
            }
            value as u8
        };

        Self::new(n, l, electrons)
    }
}
