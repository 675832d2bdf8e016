//! Bragg diffraction by crystal spectrometers: nλ = 2d sinθ.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::error::Error;

/// Bragg angle in radians for lattice spacing `d_spacing` and `wavelength`.
///
/// Both lengths must share a unit.
///
/// # Errors
///
/// [`Error::NonPositive`] for non-positive lengths, [`Error::ZeroOrder`] for
/// `order == 0`, and [`Error::NoDiffraction`] when nλ > 2d.
pub fn bragg_angle(d_spacing: f64, wavelength: f64, order: u32) -> Result<f64, Error> {
    check_positive("d-spacing", d_spacing)?;
    check_positive("wavelength", wavelength)?;
    if order == 0 {
        return Err(Error::ZeroOrder);
    }
    let path = f64::from(order) * wavelength;
    let two_d = 2.0 * d_spacing;
    if path > two_d {
        return Err(Error::NoDiffraction { order, path, two_d });
    }
    Ok((path / two_d).asin())
}

/// Wavelength diffracted at angle `theta` (radians) in the given order.
pub fn bragg_wavelength(d_spacing: f64, theta: f64, order: u32) -> Result<f64, Error> {
    check_positive("d-spacing", d_spacing)?;
    if order == 0 {
        return Err(Error::ZeroOrder);
    }
    if !(theta > 0.0 && theta <= std::f64::consts::FRAC_PI_2) {
        return Err(Error::AngleOutOfRange(theta));
    }
    Ok(2.0 * d_spacing * theta.sin() / f64::from(order))
}

/// Highest order that still diffracts; zero when λ > 2d.
pub fn max_order(d_spacing: f64, wavelength: f64) -> Result<u32, Error> {
    check_positive("d-spacing", d_spacing)?;
    check_positive("wavelength", wavelength)?;
    Ok((2.0 * d_spacing / wavelength).floor() as u32)
}

fn check_positive(quantity: &'static str, value: f64) -> Result<(), Error> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::non_positive(quantity, value))
    }
}

/// Analyzer crystals commonly used in x-ray spectrometers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Crystal {
    Hopg,
    LiF200,
    Pet,
    Kap,
    Si111,
    Ge111,
    Quartz1011,
    Adp101,
}

impl Crystal {
    pub const ALL: [Crystal; 8] = [
        Crystal::Hopg,
        Crystal::LiF200,
        Crystal::Pet,
        Crystal::Kap,
        Crystal::Si111,
        Crystal::Ge111,
        Crystal::Quartz1011,
        Crystal::Adp101,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Crystal::Hopg => "HOPG",
            Crystal::LiF200 => "LiF(200)",
            Crystal::Pet => "PET",
            Crystal::Kap => "KAP",
            Crystal::Si111 => "Si(111)",
            Crystal::Ge111 => "Ge(111)",
            Crystal::Quartz1011 => "Quartz(10-11)",
            Crystal::Adp101 => "ADP(101)",
        }
    }

    /// 2d in Å.
    pub fn two_d(&self) -> f64 {
        match self {
            Crystal::Hopg => 6.708,
            Crystal::LiF200 => 4.027,
            Crystal::Pet => 8.742,
            Crystal::Kap => 26.634,
            Crystal::Si111 => 6.271,
            Crystal::Ge111 => 6.532,
            Crystal::Quartz1011 => 6.687,
            Crystal::Adp101 => 10.64,
        }
    }

    /// Lattice spacing d in Å.
    pub fn d_spacing(&self) -> f64 {
        self.two_d() / 2.0
    }

    /// Bragg angle for a wavelength in Å.
    pub fn bragg_angle(&self, wavelength_angstrom: f64, order: u32) -> Result<f64, Error> {
        bragg_angle(self.d_spacing(), wavelength_angstrom, order)
    }
}

impl fmt::Display for Crystal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Matches names case-insensitively, with or without the Miller indices.
impl FromStr for Crystal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let crystal = match key.as_str() {
            "hopg" | "graphite" => Crystal::Hopg,
            "lif" | "lif200" => Crystal::LiF200,
            "pet" => Crystal::Pet,
            "kap" => Crystal::Kap,
            "si" | "si111" => Crystal::Si111,
            "ge" | "ge111" => Crystal::Ge111,
            "quartz" | "quartz1011" | "sio2" => Crystal::Quartz1011,
            "adp" | "adp101" => Crystal::Adp101,
            _ => return Err(Error::UnknownCrystal(s.to_string())),
        };
        Ok(crystal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hopg_typical_angle() {
        let d = 6.708 / 2.0;
        let theta = bragg_angle(d, 4.188_655, 1).unwrap();
        let expected = 0.674_397_469_809_943_3;
        assert!(((theta - expected) / expected).abs() < 1e-8, "got {theta}");

        let via_preset = Crystal::Hopg.bragg_angle(4.188_655, 1).unwrap();
        assert!((via_preset - theta).abs() < 1e-15);
    }

    #[test]
    fn wavelength_inverts_angle() {
        let theta = bragg_angle(2.0, 1.5, 2).unwrap();
        let back = bragg_wavelength(2.0, theta, 2).unwrap();
        assert!((back - 1.5).abs() < 1e-12);
    }

    #[test]
    fn invalid_inputs() {
        assert_eq!(bragg_angle(3.0, 1.0, 0), Err(Error::ZeroOrder));
        assert!(matches!(bragg_angle(-1.0, 1.0, 1), Err(Error::NonPositive { .. })));
        assert!(matches!(bragg_angle(1.0, 0.0, 1), Err(Error::NonPositive { .. })));
        assert!(matches!(bragg_angle(1.0, 1.5, 2), Err(Error::NoDiffraction { order: 2, .. })));
        assert!(matches!(bragg_wavelength(1.0, 2.0, 1), Err(Error::AngleOutOfRange(_))));
    }

    #[test]
    fn grazing_limit_is_ninety_degrees() {
        let theta = bragg_angle(1.0, 2.0, 1).unwrap();
        assert!((theta - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn max_order_counts_reachable_orders() {
        assert_eq!(max_order(3.354, 1.5).unwrap(), 4);
        assert_eq!(max_order(1.0, 3.0).unwrap(), 0);
    }

    #[test]
    fn crystal_names_parse() {
        assert_eq!("LiF(200)".parse::<Crystal>().unwrap(), Crystal::LiF200);
        assert_eq!("hopg".parse::<Crystal>().unwrap(), Crystal::Hopg);
        assert_eq!("Si(111)".parse::<Crystal>().unwrap(), Crystal::Si111);
        assert!("diamond".parse::<Crystal>().is_err());
        for crystal in Crystal::ALL {
            assert_eq!(crystal.name().parse::<Crystal>().unwrap(), crystal);
        }
    }
}
