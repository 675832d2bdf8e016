//! Errors raised while building or parsing atomic-structure notation.

use thiserror::Error;

/// Invalid quantum numbers, populations or spectroscopic notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// Principal quantum number below one.
    #[error("principal quantum number must be n >= 1 (got {0})")]
    InvalidPrincipal(u8),

    /// The azimuthal quantum number does not exist in shell `n`.
    #[error("azimuthal number l = {l} does not exist for principal quantum number n = {n}")]
    NoSuchSubshell { n: u8, l: u8 },

    /// More electrons than the subshell can hold.
    #[error("subshell {subshell} holds at most {max} electrons (got {given})")]
    TooManyElectrons {
        subshell: String,
        given: u8,
        max: u8,
    },

    /// The same (n, l) subshell was given twice.
    #[error("subshell {0} appears more than once in the configuration")]
    DuplicateSubshell(String),

    /// Aufbau filling was asked for more electrons than it can place.
    #[error("cannot place {0} electrons by aufbau filling")]
    TooManyForAufbau(u32),

    /// Multiplicity must be at least one.
    #[error("term multiplicity must be >= 1")]
    InvalidMultiplicity,

    /// Orbital angular momentum without a spectroscopic letter.
    #[error("no spectroscopic letter for angular momentum L = {0}")]
    NoLetter(u8),

    /// J outside |L - S| ..= L + S or of the wrong integrality.
    #[error("J = {j} is not allowed for S = {s}, L = {l}")]
    InvalidJ { j: String, s: String, l: u8 },

    /// Charge state larger than the atomic number.
    #[error("charge {charge} exceeds the atomic number {z} of {element}")]
    InvalidCharge { element: String, charge: u32, z: u8 },

    /// Term parity does not match the parity of the configuration.
    #[error("term parity ({term}) disagrees with configuration parity ({configuration})")]
    ParityMismatch {
        term: &'static str,
        configuration: &'static str,
    },

    /// Generic syntax error in a notation string.
    #[error("cannot parse {kind} '{input}': {details}")]
    Syntax {
        kind: &'static str,
        input: String,
        details: String,
    },
}

impl NotationError {
    pub fn syntax(kind: &'static str, input: &str, details: impl Into<String>) -> Self {
        Self::Syntax {
            kind,
            input: input.to_string(),
            details: details.into(),
        }
    }
}
