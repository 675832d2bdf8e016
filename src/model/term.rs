//! LS-coupling term symbols, ^(2S+1)L_J.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::error::NotationError;
use super::quantum::{self, HalfInt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn name(&self) -> &'static str {
        match self {
            Parity::Even => "even",
            Parity::Odd => "odd",
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const MULTIPLET_NAMES: [&str; 10] = [
    "singlet", "doublet", "triplet", "quartet", "quintet", "sextet", "septet", "octet", "nonet",
    "decet",
];

/// A term symbol with an optional level (J) subscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermSymbol {
    multiplicity: u8,
    l: u8,
    parity: Parity,
    j: Option<HalfInt>,
}

impl TermSymbol {
    pub fn new(multiplicity: u8, l: u8, parity: Parity) -> Result<Self, NotationError> {
        if multiplicity == 0 {
            return Err(NotationError::InvalidMultiplicity);
        }
        if quantum::term_letter(l).is_none() {
            return Err(NotationError::NoLetter(l));
        }
        Ok(Self {
            multiplicity,
            l,
            parity,
            j: None,
        })
    }

    /// Attaches a level J, which must satisfy |L - S| <= J <= L + S in
    /// integer steps.
    pub fn with_j(mut self, j: HalfInt) -> Result<Self, NotationError> {
        if !self.possible_j().contains(&j) {
            return Err(NotationError::InvalidJ {
                j: j.to_string(),
                s: self.spin().to_string(),
                l: self.l,
            });
        }
        self.j = Some(j);
        Ok(self)
    }

    #[inline]
    pub fn multiplicity(&self) -> u8 {
        self.multiplicity
    }

    /// Total orbital angular momentum L.
    #[inline]
    pub fn l(&self) -> u8 {
        self.l
    }

    #[inline]
    pub fn parity(&self) -> Parity {
        self.parity
    }

    #[inline]
    pub fn j(&self) -> Option<HalfInt> {
        self.j
    }

    pub fn spin(&self) -> HalfInt {
        HalfInt::from_doubled(u16::from(self.multiplicity) - 1)
    }

    pub fn letter(&self) -> char {
        quantum::term_letter(self.l).unwrap_or('?')
    }

    pub fn possible_j(&self) -> Vec<HalfInt> {
        let two_l = 2 * u16::from(self.l);
        let two_s = self.spin().doubled();
        let lo = two_l.abs_diff(two_s);
        let hi = two_l + two_s;
        (lo..=hi).step_by(2).map(HalfInt::from_doubled).collect()
    }

    /// Number of fine-structure levels: min(2S + 1, 2L + 1).
    pub fn level_count(&self) -> usize {
        usize::from(self.multiplicity).min(2 * usize::from(self.l) + 1)
    }

    pub fn multiplet_name(&self) -> String {
        MULTIPLET_NAMES
            .get(usize::from(self.multiplicity) - 1)
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("{}-plet", self.multiplicity))
    }

    /// NIST ASCII form: `2P*<3/2>`.
    pub fn to_ascii(&self) -> String {
        let mut out = format!("{}{}", self.multiplicity, self.letter());
        if self.parity == Parity::Odd {
            out.push('*');
        }
        if let Some(j) = self.j {
            out.push_str(&format!("<{j}>"));
        }
        out
    }
}

impl fmt::Display for TermSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            quantum::to_superscript(u32::from(self.multiplicity)),
            self.letter()
        )?;
        if self.parity == Parity::Odd {
            f.write_str("°")?;
        }
        if let Some(j) = self.j {
            let doubled = u32::from(j.doubled());
            if j.is_integer() {
                f.write_str(&quantum::to_subscript(doubled / 2))?;
            } else {
                write!(f, "{}/{}", quantum::to_subscript(doubled), quantum::to_subscript(2))?;
            }
        }
        Ok(())
    }
}

impl FromStr for TermSymbol {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let err = |details: &str| NotationError::syntax("term symbol", input, details);

        let mut chars = input.chars().peekable();

        let mut multiplicity: u32 = 0;
        let mut seen_digit = false;
        while let Some(&c) = chars.peek() {
            if c.is_ascii_alphabetic() {
                break;
            }
            let digit = quantum::digit_value(c).ok_or_else(|| err("invalid multiplicity"))?;
            multiplicity = multiplicity * 10 + digit;
            if multiplicity > u32::from(u8::MAX) {
                return Err(err("multiplicity out of range"));
            }
            seen_digit = true;
            chars.next();
        }
        if !seen_digit {
            return Err(err("missing multiplicity"));
        }

        let letter = chars.next().ok_or_else(|| err("missing L letter"))?;
        if !letter.is_ascii_uppercase() {
            return Err(err("L letter must be upper case"));
        }
        let l = quantum::angular_momentum(letter).ok_or_else(|| err("unknown L letter"))?;

        let parity = match chars.peek() {
            Some('*') | Some('°') | Some('o') => {
                chars.next();
                Parity::Odd
            }
            _ => Parity::Even,
        };

        let rest: String = chars.collect();
        let rest = rest.trim();
        let term = TermSymbol::new(multiplicity as u8, l, parity)?;
        if rest.is_empty() {
            return Ok(term);
        }

        let j_text = match rest.strip_prefix('<') {
            Some(inner) => inner
                .strip_suffix('>')
                .ok_or_else(|| err("unterminated J bracket"))?
                .to_string(),
            None => rest
                .chars()
                .map(|c| match quantum::digit_value(c) {
                    Some(d) => char::from_digit(d, 10).unwrap_or(c),
                    None => c,
                })
                .collect(),
        };
        let j: HalfInt = j_text.parse().map_err(|_| err("invalid J value"))?;
        term.with_j(j)
    }
}
