//! Photon energy and wavelength conversions.

/// hc in eV·nm (CODATA 2018, rounded).
pub const HC_EV_NM: f64 = 1239.841_98;

/// Wavelength in nm of a photon of `energy_ev`.
pub fn energy_to_wavelength_nm(energy_ev: f64) -> f64 {
    HC_EV_NM / energy_ev
}

/// Energy in eV of a photon of `wavelength_nm`.
pub fn wavelength_to_energy_ev(wavelength_nm: f64) -> f64 {
    HC_EV_NM / wavelength_nm
}

/// Wavelength in Å of a photon of `energy_ev`.
pub fn energy_to_wavelength_angstrom(energy_ev: f64) -> f64 {
    energy_to_wavelength_nm(energy_ev) * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_kev_is_about_1_24_nm() {
        assert!((energy_to_wavelength_nm(1000.0) - 1.239_841_98).abs() < 1e-12);
        assert!((energy_to_wavelength_angstrom(1000.0) - 12.398_419_8).abs() < 1e-9);
    }

    #[test]
    fn conversions_are_inverse() {
        let e = 2.104_43;
        let back = wavelength_to_energy_ev(energy_to_wavelength_nm(e));
        assert!((back - e).abs() < 1e-12);
    }
}
