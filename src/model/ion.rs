use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::configuration::ElectronConfiguration;
use super::element::Element;
use super::error::NotationError;

/// An element in a given ionization stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Ion {
    element: Element,
    charge: u8,
}

impl Ion {
    pub fn new(element: Element, charge: u32) -> Result<Self, NotationError> {
        let z = element.atomic_number();
        if charge > u32::from(z) {
            return Err(NotationError::InvalidCharge {
                element: element.symbol().to_string(),
                charge,
                z,
            });
        }
        Ok(Self {
            element,
            charge: charge as u8,
        })
    }

    pub fn neutral(element: Element) -> Self {
        Self { element, charge: 0 }
    }

    #[inline]
    pub fn element(&self) -> Element {
        self.element
    }

    #[inline]
    pub fn charge(&self) -> u8 {
        self.charge
    }

    pub fn electron_count(&self) -> u8 {
        self.element.atomic_number() - self.charge
    }

    pub fn is_bare(&self) -> bool {
        self.electron_count() == 0
    }

    /// Spectrum notation: `Na IV` for Na³⁺.
    pub fn spectrum_name(&self) -> String {
        format!("{} {}", self.element, to_roman(u32::from(self.charge) + 1))
    }

    /// Aufbau estimate of the ground configuration.
    pub fn ground_configuration(&self) -> ElectronConfiguration {
        // At most 118 electrons, which aufbau filling always places.
        ElectronConfiguration::aufbau(u32::from(self.electron_count())).unwrap_or_default()
    }
}

impl fmt::Display for Ion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spectrum_name())
    }
}

/// Accepts `Na IV`, `Na`, `Na+`, `Na+3` and `Na3+`.
impl FromStr for Ion {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let err = |details: &str| NotationError::syntax("ion", input, details);

        let split = input
            .char_indices()
            .skip(1)
            .find(|(_, c)| !c.is_ascii_lowercase())
            .map(|(i, _)| i)
            .unwrap_or(input.len());
        let (symbol, rest) = input.split_at(split);
        let element: Element = symbol.parse().map_err(|_| err("unknown element symbol"))?;
        let rest = rest.trim();

        let charge = if rest.is_empty() {
            0
        } else if let Some(stage) = from_roman(rest) {
            stage
                .checked_sub(1)
                .ok_or_else(|| err("spectrum number starts at I"))?
        } else if rest == "+" {
            1
        } else if let Some(num) = rest.strip_prefix('+') {
            num.parse().map_err(|_| err("invalid charge"))?
        } else if let Some(num) = rest.strip_suffix('+') {
            num.parse().map_err(|_| err("invalid charge"))?
        } else {
            return Err(err("expected a Roman numeral or +charge"));
        };

        Ion::new(element, charge)
    }
}

const ROMAN: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

pub fn to_roman(mut value: u32) -> String {
    let mut out = String::new();
    for &(weight, glyph) in &ROMAN {
        while value >= weight {
            out.push_str(glyph);
            value -= weight;
        }
    }
    out
}

/// Parses a canonical Roman numeral; non-canonical spellings are rejected.
pub fn from_roman(text: &str) -> Option<u32> {
    if text.is_empty() || !text.chars().all(|c| "IVXLCDM".contains(c)) {
        return None;
    }
    let mut value = 0;
    let mut rest = text;
    for &(weight, glyph) in &ROMAN {
        while let Some(tail) = rest.strip_prefix(glyph) {
            value += weight;
            rest = tail;
        }
    }
    (rest.is_empty() && to_roman(value) == text).then_some(value)
}
