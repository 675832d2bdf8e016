//! Quantum numbers and the letter/digit conventions of spectroscopic notation.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::error::NotationError;

/// Orbital letters for l = 0, 1, 2, ... (`j` is skipped by convention).
pub const ORBITAL_LETTERS: [char; 21] = [
    's', 'p', 'd', 'f', 'g', 'h', 'i', 'k', 'l', 'm', 'n', 'o', 'q', 'r', 't', 'u', 'v', 'w', 'x',
    'y', 'z',
];

/// X-ray shell letters for n = 1, 2, 3, ...
pub const SHELL_LETTERS: [char; 16] = [
    'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Lower-case orbital letter for a one-electron `l`.
pub fn orbital_letter(l: u8) -> Option<char> {
    ORBITAL_LETTERS.get(usize::from(l)).copied()
}

/// Upper-case letter for a total orbital angular momentum `L`.
pub fn term_letter(l: u8) -> Option<char> {
    orbital_letter(l).map(|c| c.to_ascii_uppercase())
}

/// Angular momentum for an orbital or term letter, either case.
pub fn angular_momentum(letter: char) -> Option<u8> {
    let lower = letter.to_ascii_lowercase();
    ORBITAL_LETTERS
        .iter()
        .position(|&c| c == lower)
        .map(|idx| idx as u8)
}

pub fn shell_letter(n: u8) -> Option<char> {
    n.checked_sub(1)
        .and_then(|idx| SHELL_LETTERS.get(usize::from(idx)).copied())
}

/// Principal quantum number of an x-ray shell letter (`'M'` → 3).
pub fn principal_from_shell(letter: char) -> Option<u8> {
    SHELL_LETTERS
        .iter()
        .position(|&c| c == letter)
        .map(|idx| idx as u8 + 1)
}

/// Maximum electrons in shell `n`: 2n².
pub fn shell_capacity(n: u8) -> u32 {
    2 * u32::from(n) * u32::from(n)
}

/// Maximum electrons in a subshell of angular momentum `l`: 2(2l + 1).
pub fn subshell_capacity(l: u8) -> u8 {
    2 * (2 * l + 1)
}

pub fn to_superscript(value: u32) -> String {
    map_digits(value, &SUPERSCRIPTS)
}

pub fn to_subscript(value: u32) -> String {
    map_digits(value, &SUBSCRIPTS)
}

fn map_digits(value: u32, table: &[char; 10]) -> String {
    value
        .to_string()
        .chars()
        .map(|c| table[c.to_digit(10).unwrap_or(0) as usize])
        .collect()
}

/// Value of an ASCII, superscript or subscript digit.
pub fn digit_value(c: char) -> Option<u32> {
    c.to_digit(10)
        .or_else(|| SUPERSCRIPTS.iter().position(|&s| s == c).map(|p| p as u32))
        .or_else(|| SUBSCRIPTS.iter().position(|&s| s == c).map(|p| p as u32))
}

/// A non-negative half-integer (spin, J), stored doubled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct HalfInt(u16);

impl HalfInt {
    pub const ZERO: HalfInt = HalfInt(0);

    pub fn from_doubled(doubled: u16) -> Self {
        Self(doubled)
    }

    pub fn integer(value: u16) -> Self {
        Self(value * 2)
    }

    #[inline]
    pub fn doubled(&self) -> u16 {
        self.0
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.0 % 2 == 0
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl fmt::Display for HalfInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}/2", self.0)
        }
    }
}

impl FromStr for HalfInt {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = |details: &str| NotationError::syntax("half-integer", s, details);

        if let Some((num, den)) = s.split_once('/') {
            if den.trim() != "2" {
                return Err(err("denominator must be 2"));
            }
            let num: u16 = num.trim().parse().map_err(|_| err("invalid numerator"))?;
            if num % 2 == 0 {
                return Err(err("numerator over 2 must be odd"));
            }
            return Ok(Self(num));
        }

        let value: f64 = s.parse().map_err(|_| err("not a number"))?;
        let doubled = value * 2.0;
        if value < 0.0 || doubled.fract() != 0.0 || doubled > f64::from(u16::MAX) {
            return Err(err("not a non-negative multiple of 1/2"));
        }
        Ok(Self(doubled as u16))
    }
}
