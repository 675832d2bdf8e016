//! Atomic data model.
//!
//! - [`element`] – The periodic table.
//! - [`ion`] – Charge states and spectrum names (`Na IV`).
//! - [`quantum`] – Orbital letters, shell capacities and half-integer momenta.
//! - [`subshell`] – A populated `nl` subshell with Hund's-rule spin.
//! - [`configuration`] – Electron configurations, parity and aufbau filling.
//! - [`term`] – LS term symbols with level (J) validation.
//! - [`level`] – Energy levels and electric-dipole selection rules.
//! - [`formula`] – Chemical formulas used to describe filter materials.
//!
//! Every notation type implements `FromStr` for the NIST ASCII form and
//! `Display` for the typeset Unicode form.

pub mod configuration;
pub mod element;
pub mod error;
pub mod formula;
pub mod ion;
pub mod level;
pub mod quantum;
pub mod subshell;
pub mod term;
