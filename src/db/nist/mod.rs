//! Ionization energies from the NIST Atomic Spectra Database.
//!
//! The ASD form is asked for an ASCII table in eV covering every charge state
//! of one element; each data row becomes an [`IonizationEnergy`].

mod parser;

use tracing::{info, warn};

pub use parser::{IonizationEnergy, ValueKind, parse_table, parse_value};

use super::config::NistEndpoints;
use super::error::Error;
use super::{Database, Fetcher};
use crate::model::element::Element;
use crate::model::ion::Ion;

/// Form fields of an ionization-energy search for `element`.
pub fn ionization_form(element: Element) -> Vec<(&'static str, String)> {
    let on = || "on".to_string();
    vec![
        ("spectra", element.symbol().to_string()),
        ("submit", "Retrieve Data".to_string()),
        // eV
        ("units", "1".to_string()),
        // ASCII table
        ("format", "1".to_string()),
        // by Z
        ("order", "0".to_string()),
        ("at_num_out", on()),
        ("sp_name_out", on()),
        ("ion_charge_out", on()),
        ("el_name_out", on()),
        ("seq_out", on()),
        ("shells_out", on()),
        ("conf_out", on()),
        ("level_out", on()),
        ("ion_conf_out", on()),
        // ionization, not binding, energies
        ("e_out", "0".to_string()),
        ("unc_out", on()),
        ("biblio", on()),
    ]
}

/// Ionization energies of every charge state of `element`, neutral first.
///
/// Rows for other elements are ignored. Missing charge states are logged but
/// not fatal; an empty result is a parse error.
pub async fn ionization_energies<F: Fetcher + ?Sized>(
    fetcher: &F,
    endpoints: &NistEndpoints,
    element: Element,
) -> Result<Vec<IonizationEnergy>, Error> {
    info!(element = %element, "querying NIST ASD ionization energies");
    let body = fetcher
        .post_form(&endpoints.ionization_url, &ionization_form(element))
        .await?;

    let mut rows: Vec<IonizationEnergy> = parse_table(&body)?
        .into_iter()
        .filter(|row| row.ion.element() == element)
        .collect();
    rows.sort_by_key(|row| row.ion.charge());
    rows.dedup_by_key(|row| row.ion.charge());

    if rows.is_empty() {
        return Err(Error::parse(
            Database::NistAsd,
            0,
            format!("no ionization energies for {element} in response"),
        ));
    }
    let expected = usize::from(element.atomic_number());
    if rows.len() != expected {
        warn!(
            element = %element,
            found = rows.len(),
            expected,
            "response is missing charge states"
        );
    }
    Ok(rows)
}

/// Ionization energy of one ion.
///
/// # Errors
///
/// [`Error::InvalidQuery`] when `ion` has no electrons left to remove.
pub async fn ionization_energy<F: Fetcher + ?Sized>(
    fetcher: &F,
    endpoints: &NistEndpoints,
    ion: Ion,
) -> Result<IonizationEnergy, Error> {
    let element = ion.element();
    if ion.charge() >= element.atomic_number() {
        return Err(Error::invalid_query(
            Database::NistAsd,
            format!(
                "charge {} leaves no electrons on {} (Z = {})",
                ion.charge(),
                element,
                element.atomic_number()
            ),
        ));
    }

    ionization_energies(fetcher, endpoints, element)
        .await?
        .into_iter()
        .find(|row| row.ion == ion)
        .ok_or_else(|| {
            Error::parse(
                Database::NistAsd,
                0,
                format!("response has no row for {}", ion.spectrum_name()),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::CannedFetcher;

    const SODIUM: &str = include_str!("../../../tests/data/nist_ie_na.html");

    fn sodium_fetcher(endpoints: &NistEndpoints) -> CannedFetcher {
        CannedFetcher::new().on_post(&endpoints.ionization_url, SODIUM)
    }

    #[tokio::test]
    async fn all_charge_states_in_order() {
        let endpoints = NistEndpoints::default();
        let fetcher = sodium_fetcher(&endpoints);
        let rows = ionization_energies(&fetcher, &endpoints, Element::Na)
            .await
            .unwrap();
        let charges: Vec<u8> = rows.iter().map(|r| r.ion.charge()).collect();
        assert_eq!(charges, (0..11).collect::<Vec<u8>>());
        assert_eq!(fetcher.form_value("spectra").as_deref(), Some("Na"));
        assert_eq!(fetcher.form_value("e_out").as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn sodium_iv() {
        let endpoints = NistEndpoints::default();
        let fetcher = sodium_fetcher(&endpoints);
        let ion = Ion::new(Element::Na, 3).unwrap();
        let row = ionization_energy(&fetcher, &endpoints, ion).await.unwrap();
        assert!((row.energy_ev - 98.936).abs() / 98.936 < 1e-3);
        let unc = row.uncertainty_ev.unwrap();
        assert!((unc - 0.012).abs() / 0.012 < 1e-3);
        assert_eq!(row.kind.label(), "Interpolated/extrapolated");
    }

    #[tokio::test]
    async fn bare_nucleus_is_rejected_before_fetching() {
        let endpoints = NistEndpoints::default();
        let fetcher = CannedFetcher::new();
        let ion = Ion::new(Element::Na, 11).unwrap();
        let err = ionization_energy(&fetcher, &endpoints, ion).await.unwrap_err();
        assert!(matches!(err, Error::InvalidQuery { .. }));
        assert!(fetcher.sent_forms.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn other_elements_yield_parse_error() {
        let endpoints = NistEndpoints::default();
        let fetcher = sodium_fetcher(&endpoints);
        let err = ionization_energies(&fetcher, &endpoints, Element::Mg)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[tokio::test]
    async fn http_status_propagates() {
        let endpoints = NistEndpoints::default();
        let fetcher = CannedFetcher::new();
        let err = ionization_energies(&fetcher, &endpoints, Element::Na)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Status { status: 404, .. }));
    }
}
