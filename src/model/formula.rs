//! Empirical chemical formulas such as `Si3N4` or `Ca(OH)2`.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::element::Element;
use super::error::NotationError;

/// Element counts in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChemicalFormula {
    parts: Vec<(Element, u32)>,
}

impl ChemicalFormula {
    pub fn elements(&self) -> impl Iterator<Item = (Element, u32)> + '_ {
        self.parts.iter().copied()
    }

    pub fn count(&self, element: Element) -> u32 {
        self.parts
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn atom_count(&self) -> u64 {
        self.parts.iter().map(|(_, n)| u64::from(*n)).sum()
    }

    /// Molar mass in g/mol.
    pub fn molar_mass(&self) -> f64 {
        self.parts
            .iter()
            .map(|(e, n)| e.atomic_mass() * f64::from(*n))
            .sum()
    }

    fn add(&mut self, element: Element, count: u32) -> Result<(), String> {
        match self.parts.iter_mut().find(|(e, _)| *e == element) {
            Some((_, n)) => *n = n.checked_add(count).ok_or_else(out_of_range)?,
            None => self.parts.push((element, count)),
        }
        Ok(())
    }
}

impl fmt::Display for ChemicalFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (element, count) in &self.parts {
            write!(f, "{element}")?;
            if *count != 1 {
                write!(f, "{count}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for ChemicalFormula {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(NotationError::syntax("chemical formula", input, "empty formula"));
        }
        let chars: Vec<char> = input.chars().collect();
        let mut pos = 0;
        let formula = parse_group(&chars, &mut pos, input, 0)?;
        if pos != chars.len() {
            return Err(NotationError::syntax(
                "chemical formula",
                input,
                "unbalanced parenthesis",
            ));
        }
        Ok(formula)
    }
}

fn parse_group(
    chars: &[char],
    pos: &mut usize,
    input: &str,
    depth: usize,
) -> Result<ChemicalFormula, NotationError> {
    let err = |details: String| NotationError::syntax("chemical formula", input, details);
    let mut formula = ChemicalFormula { parts: Vec::new() };

    while *pos < chars.len() {
        let c = chars[*pos];
        if c == ')' {
            if depth == 0 {
                return Err(err("unbalanced parenthesis".into()));
            }
            break;
        }

        if c == '(' {
            *pos += 1;
            let inner = parse_group(chars, pos, input, depth + 1)?;
            if chars.get(*pos) != Some(&')') {
                return Err(err("unbalanced parenthesis".into()));
            }
            *pos += 1;
            let mult = read_count(chars, pos).map_err(err)?;
            for (element, n) in inner.parts {
                let count = n.checked_mul(mult).ok_or_else(out_of_range).map_err(err)?;
                formula.add(element, count).map_err(err)?;
            }
            continue;
        }

        if !c.is_ascii_uppercase() {
            return Err(err(format!("unexpected character '{c}'")));
        }
        let start = *pos;
        *pos += 1;
        while chars.get(*pos).is_some_and(|c| c.is_ascii_lowercase()) {
            *pos += 1;
        }
        let symbol: String = chars[start..*pos].iter().collect();
        let element: Element = symbol
            .parse()
            .map_err(|_| err(format!("unknown element '{symbol}'")))?;
        let count = read_count(chars, pos).map_err(err)?;
        formula.add(element, count).map_err(err)?;
    }

    if formula.parts.is_empty() {
        return Err(err("empty group".into()));
    }
    Ok(formula)
}

fn read_count(chars: &[char], pos: &mut usize) -> Result<u32, String> {
    let start = *pos;
    while chars.get(*pos).is_some_and(|c| c.is_ascii_digit()) {
        *pos += 1;
    }
    if start == *pos {
        return Ok(1);
    }
    let digits: String = chars[start..*pos].iter().collect();
    match digits.parse::<u32>() {
        Ok(0) => Err("atom counts must be positive".into()),
        Ok(n) => Ok(n),
        Err(_) => Err(out_of_range()),
    }
}

fn out_of_range() -> String {
    "count out of range".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silicon_nitride() {
        let f: ChemicalFormula = "Si3N4".parse().unwrap();
        assert_eq!(f.count(Element::Si), 3);
        assert_eq!(f.count(Element::N), 4);
        assert_eq!(f.atom_count(), 7);
        assert_eq!(f.to_string(), "Si3N4");
        assert!((f.molar_mass() - 140.28).abs() < 0.05);
    }

    #[test]
    fn groups_multiply() {
        let f: ChemicalFormula = "Ca(OH)2".parse().unwrap();
        assert_eq!(f.count(Element::O), 2);
        assert_eq!(f.count(Element::H), 2);
        assert_eq!(f.to_string(), "CaO2H2");
    }

    #[test]
    fn repeated_elements_merge() {
        let f: ChemicalFormula = "CH3CH3".parse().unwrap();
        assert_eq!(f.to_string(), "C2H6");
    }

    #[test]
    fn rejects_bad_input() {
        for bad in ["", "Xx2", "si3n4", "C0", "Ca(OH", "CaOH)2", "()"] {
            assert!(bad.parse::<ChemicalFormula>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn oversized_counts_are_errors() {
        for input in [
            "(H100000)100000",
            "H4000000000H4000000000",
            "Si99999999999",
            "((C65536)65536)2",
        ] {
            let err = input.parse::<ChemicalFormula>().unwrap_err();
            assert!(err.to_string().contains("count out of range"), "{input}: {err}");
        }
    }

    #[test]
    fn atom_count_does_not_wrap() {
        let f: ChemicalFormula = "H4000000000C4000000000".parse().unwrap();
        assert_eq!(f.atom_count(), 8_000_000_000);
    }
}
