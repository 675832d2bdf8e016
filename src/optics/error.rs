use thiserror::Error;

/// Errors raised by dispersive-optics calculations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A length, energy or angle that must be strictly positive was not.
    #[error("{quantity} must be positive (got {value})")]
    NonPositive {
        /// Name of the offending quantity.
        quantity: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Diffraction order zero is undiffracted light.
    #[error("diffraction order must be at least 1")]
    ZeroOrder,

    /// nλ exceeds 2d, so no angle satisfies the Bragg condition.
    #[error("no diffraction: order {order} × λ = {path} exceeds 2d = {two_d}")]
    NoDiffraction { order: u32, path: f64, two_d: f64 },

    /// Angle outside (0, π/2].
    #[error("Bragg angle {0} rad is outside (0, π/2]")]
    AngleOutOfRange(f64),

    #[error("unknown crystal '{0}'")]
    UnknownCrystal(String),
}

impl Error {
    pub(crate) fn non_positive(quantity: &'static str, value: f64) -> Self {
        Self::NonPositive { quantity, value }
    }
}
