//! Dispersive optics for x-ray and XUV spectrometers.

mod dispersive;
mod error;
pub mod photon;

pub use dispersive::{Crystal, bragg_angle, bragg_wavelength, max_order};
pub use error::Error;
