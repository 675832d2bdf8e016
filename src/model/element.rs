//! The periodic table.
//!
//! Every element carries its atomic number as the enum discriminant, so an
//! [`Element`] converts to `Z` for free and back through
//! [`Element::from_atomic_number`].

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum Element {
    H = 1,
    He,
    Li,
    Be,
    B,
    C,
    N,
    O,
    F,
    Ne,
    Na,
    Mg,
    Al,
    Si,
    P,
    S,
    Cl,
    Ar,
    K,
    Ca,
    Sc,
    Ti,
    V,
    Cr,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Ga,
    Ge,
    As,
    Se,
    Br,
    Kr,
    Rb,
    Sr,
    Y,
    Zr,
    Nb,
    Mo,
    Tc,
    Ru,
    Rh,
    Pd,
    Ag,
    Cd,
    In,
    Sn,
    Sb,
    Te,
    I,
    Xe,
    Cs,
    Ba,
    La,
    Ce,
    Pr,
    Nd,
    Pm,
    Sm,
    Eu,
    Gd,
    Tb,
    Dy,
    Ho,
    Er,
    Tm,
    Yb,
    Lu,
    Hf,
    Ta,
    W,
    Re,
    Os,
    Ir,
    Pt,
    Au,
    Hg,
    Tl,
    Pb,
    Bi,
    Po,
    At,
    Rn,
    Fr,
    Ra,
    Ac,
    Th,
    Pa,
    U,
    Np,
    Pu,
    Am,
    Cm,
    Bk,
    Cf,
    Es,
    Fm,
    Md,
    No,
    Lr,
    Rf,
    Db,
    Sg,
    Bh,
    Hs,
    Mt,
    Ds,
    Rg,
    Cn,
    Nh,
    Fl,
    Mc,
    Lv,
    Ts,
    Og = 118,
}

/// Symbol, English name and standard atomic weight, indexed by `Z - 1`.
const ELEMENT_DATA: [(&str, &str, f64); 118] = [
    ("H", "Hydrogen", 1.008),
    ("He", "Helium", 4.0026),
    ("Li", "Lithium", 6.94),
    ("Be", "Beryllium", 9.0122),
    ("B", "Boron", 10.81),
    ("C", "Carbon", 12.011),
    ("N", "Nitrogen", 14.007),
    ("O", "Oxygen", 15.999),
    ("F", "Fluorine", 18.998),
    ("Ne", "Neon", 20.18),
    ("Na", "Sodium", 22.99),
    ("Mg", "Magnesium", 24.305),
    ("Al", "Aluminium", 26.982),
    ("Si", "Silicon", 28.085),
    ("P", "Phosphorus", 30.974),
    ("S", "Sulfur", 32.06),
    ("Cl", "Chlorine", 35.45),
    ("Ar", "Argon", 39.948),
    ("K", "Potassium", 39.098),
    ("Ca", "Calcium", 40.078),
    ("Sc", "Scandium", 44.956),
    ("Ti", "Titanium", 47.867),
    ("V", "Vanadium", 50.942),
    ("Cr", "Chromium", 51.996),
    ("Mn", "Manganese", 54.938),
    ("Fe", "Iron", 55.845),
    ("Co", "Cobalt", 58.933),
    ("Ni", "Nickel", 58.693),
    ("Cu", "Copper", 63.546),
    ("Zn", "Zinc", 65.38),
    ("Ga", "Gallium", 69.723),
    ("Ge", "Germanium", 72.63),
    ("As", "Arsenic", 74.922),
    ("Se", "Selenium", 78.971),
    ("Br", "Bromine", 79.904),
    ("Kr", "Krypton", 83.798),
    ("Rb", "Rubidium", 85.468),
    ("Sr", "Strontium", 87.62),
    ("Y", "Yttrium", 88.906),
    ("Zr", "Zirconium", 91.224),
    ("Nb", "Niobium", 92.906),
    ("Mo", "Molybdenum", 95.96),
    ("Tc", "Technetium", 98.0),
    ("Ru", "Ruthenium", 101.07),
    ("Rh", "Rhodium", 102.91),
    ("Pd", "Palladium", 106.42),
    ("Ag", "Silver", 107.87),
    ("Cd", "Cadmium", 112.41),
    ("In", "Indium", 114.82),
    ("Sn", "Tin", 118.71),
    ("Sb", "Antimony", 121.76),
    ("Te", "Tellurium", 127.6),
    ("I", "Iodine", 126.9),
    ("Xe", "Xenon", 131.29),
    ("Cs", "Caesium", 132.91),
    ("Ba", "Barium", 137.33),
    ("La", "Lanthanum", 138.91),
    ("Ce", "Cerium", 140.12),
    ("Pr", "Praseodymium", 140.91),
    ("Nd", "Neodymium", 144.24),
    ("Pm", "Promethium", 145.0),
    ("Sm", "Samarium", 150.36),
    ("Eu", "Europium", 151.96),
    ("Gd", "Gadolinium", 157.25),
    ("Tb", "Terbium", 158.93),
    ("Dy", "Dysprosium", 162.5),
    ("Ho", "Holmium", 164.93),
    ("Er", "Erbium", 167.26),
    ("Tm", "Thulium", 168.93),
    ("Yb", "Ytterbium", 173.05),
    ("Lu", "Lutetium", 174.97),
    ("Hf", "Hafnium", 178.49),
    ("Ta", "Tantalum", 180.95),
    ("W", "Tungsten", 183.84),
    ("Re", "Rhenium", 186.21),
    ("Os", "Osmium", 190.23),
    ("Ir", "Iridium", 192.22),
    ("Pt", "Platinum", 195.08),
    ("Au", "Gold", 196.97),
    ("Hg", "Mercury", 200.59),
    ("Tl", "Thallium", 204.38),
    ("Pb", "Lead", 207.2),
    ("Bi", "Bismuth", 208.98),
    ("Po", "Polonium", 209.0),
    ("At", "Astatine", 210.0),
    ("Rn", "Radon", 222.0),
    ("Fr", "Francium", 223.0),
    ("Ra", "Radium", 226.0),
    ("Ac", "Actinium", 227.0),
    ("Th", "Thorium", 232.04),
    ("Pa", "Protactinium", 231.04),
    ("U", "Uranium", 238.03),
    ("Np", "Neptunium", 237.0),
    ("Pu", "Plutonium", 244.0),
    ("Am", "Americium", 243.0),
    ("Cm", "Curium", 247.0),
    ("Bk", "Berkelium", 247.0),
    ("Cf", "Californium", 251.0),
    ("Es", "Einsteinium", 252.0),
    ("Fm", "Fermium", 257.0),
    ("Md", "Mendelevium", 258.0),
    ("No", "Nobelium", 259.0),
    ("Lr", "Lawrencium", 262.0),
    ("Rf", "Rutherfordium", 267.0),
    ("Db", "Dubnium", 270.0),
    ("Sg", "Seaborgium", 271.0),
    ("Bh", "Bohrium", 270.0),
    ("Hs", "Hassium", 277.0),
    ("Mt", "Meitnerium", 276.0),
    ("Ds", "Darmstadtium", 281.0),
    ("Rg", "Roentgenium", 280.0),
    ("Cn", "Copernicium", 285.0),
    ("Nh", "Nihonium", 284.0),
    ("Fl", "Flerovium", 289.0),
    ("Mc", "Moscovium", 288.0),
    ("Lv", "Livermorium", 293.0),
    ("Ts", "Tennessine", 294.0),
    ("Og", "Oganesson", 294.0),
];

impl Element {
    /// Every element in order of increasing atomic number.
    pub const ALL: [Element; 118] = [
        Element::H, Element::He, Element::Li, Element::Be, Element::B, Element::C, Element::N,
        Element::O, Element::F, Element::Ne, Element::Na, Element::Mg, Element::Al, Element::Si,
        Element::P, Element::S, Element::Cl, Element::Ar, Element::K, Element::Ca, Element::Sc,
        Element::Ti, Element::V, Element::Cr, Element::Mn, Element::Fe, Element::Co,
        Element::Ni, Element::Cu, Element::Zn, Element::Ga, Element::Ge, Element::As,
        Element::Se, Element::Br, Element::Kr, Element::Rb, Element::Sr, Element::Y,
        Element::Zr, Element::Nb, Element::Mo, Element::Tc, Element::Ru, Element::Rh,
        Element::Pd, Element::Ag, Element::Cd, Element::In, Element::Sn, Element::Sb,
        Element::Te, Element::I, Element::Xe, Element::Cs, Element::Ba, Element::La,
        Element::Ce, Element::Pr, Element::Nd, Element::Pm, Element::Sm, Element::Eu,
        Element::Gd, Element::Tb, Element::Dy, Element::Ho, Element::Er, Element::Tm,
        Element::Yb, Element::Lu, Element::Hf, Element::Ta, Element::W, Element::Re,
        Element::Os, Element::Ir, Element::Pt, Element::Au, Element::Hg, Element::Tl,
        Element::Pb, Element::Bi, Element::Po, Element::At, Element::Rn, Element::Fr,
        Element::Ra, Element::Ac, Element::Th, Element::Pa, Element::U, Element::Np,
        Element::Pu, Element::Am, Element::Cm, Element::Bk, Element::Cf, Element::Es,
        Element::Fm, Element::Md, Element::No, Element::Lr, Element::Rf, Element::Db,
        Element::Sg, Element::Bh, Element::Hs, Element::Mt, Element::Ds, Element::Rg,
        Element::Cn, Element::Nh, Element::Fl, Element::Mc, Element::Lv, Element::Ts,
        Element::Og,
    ];

    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn from_atomic_number(z: u8) -> Option<Self> {
        match z {
            1..=118 => Some(Self::ALL[usize::from(z) - 1]),
            _ => None,
        }
    }

    fn data(&self) -> &'static (&'static str, &'static str, f64) {
        &ELEMENT_DATA[usize::from(self.atomic_number()) - 1]
    }

    pub fn symbol(&self) -> &'static str {
        self.data().0
    }

    pub fn name(&self) -> &'static str {
        self.data().1
    }

    /// Standard atomic weight in g/mol.
    pub fn atomic_mass(&self) -> f64 {
        self.data().2
    }

    /// Looks an element up by its English name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|el| el.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|el| el.symbol() == s)
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}
