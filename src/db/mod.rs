//! Remote reference databases.
//!
//! Queries go through the [`Fetcher`] trait so that the parsing and query
//! logic never depends on a live network. [`HttpFetcher`] is the production
//! implementation; tests substitute canned responses.
//!
//! - [`nist`] – Ionization energies from the NIST Atomic Spectra Database.
//! - [`henke`] – X-ray filter transmission from the CXRO (Henke) calculator.

mod client;
mod config;
mod error;
pub mod henke;
mod html;
pub mod nist;

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

pub use client::HttpFetcher;
pub use config::{ClientConfig, DatabaseConfig, HenkeEndpoints, NistEndpoints};
pub use error::Error;

/// Form fields sent with a POST request, in submission order.
pub type Form = [(&'static str, String)];

/// Transport used by the database queries.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// POSTs `form` url-encoded and returns the response body.
    async fn post_form(&self, url: &str, form: &Form) -> Result<String, Error>;

    /// GETs `url` and returns the response body.
    async fn get(&self, url: &str) -> Result<String, Error>;
}

/// A reference database this crate can query, with its citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Database {
    NistAsd,
    Henke,
}

impl Database {
    pub const ALL: [Database; 2] = [Database::NistAsd, Database::Henke];

    /// Stable short identifier, suitable for file names and metadata.
    pub fn id(&self) -> &'static str {
        match self {
            Database::NistAsd => "nist-asd",
            Database::Henke => "cxro-henke",
        }
    }

    /// Version of the data set the parsers were written against.
    pub fn version(&self) -> &'static str {
        match self {
            Database::NistAsd => "5.11",
            Database::Henke => "1993",
        }
    }

    pub fn citation(&self) -> &'static str {
        match self {
            Database::NistAsd => {
                "Kramida, A., Ralchenko, Yu., Reader, J., and NIST ASD Team (2023). \
                 NIST Atomic Spectra Database (ver. 5.11). National Institute of \
                 Standards and Technology, Gaithersburg, MD. \
                 https://doi.org/10.18434/T4W30F"
            }
            Database::Henke => {
                "B.L. Henke, E.M. Gullikson, and J.C. Davis. X-ray interactions: \
                 photoabsorption, scattering, transmission, and reflection at \
                 E = 50-30,000 eV, Z = 1-92. Atomic Data and Nuclear Data Tables \
                 54 (no. 2), 181-342 (July 1993)."
            }
        }
    }

    pub fn homepage(&self) -> &'static str {
        match self {
            Database::NistAsd => "https://physics.nist.gov/asd",
            Database::Henke => "https://henke.lbl.gov/optical_constants/",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Database::NistAsd => "NIST ASD",
            Database::Henke => "Henke (CXRO)",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A [`Fetcher`] that replays canned bodies and records requests.

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct CannedFetcher {
        posts: HashMap<String, String>,
        gets: HashMap<String, String>,
        pub sent_forms: Mutex<Vec<Vec<(&'static str, String)>>>,
        pub fetched: Mutex<Vec<String>>,
    }

    impl CannedFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on_post(mut self, url: &str, body: &str) -> Self {
            self.posts.insert(url.to_string(), body.to_string());
            self
        }

        pub fn on_get(mut self, url: &str, body: &str) -> Self {
            self.gets.insert(url.to_string(), body.to_string());
            self
        }

        pub fn form_value(&self, key: &str) -> Option<String> {
            let forms = self.sent_forms.lock().unwrap();
            forms
                .last()?
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[async_trait]
    impl Fetcher for CannedFetcher {
        async fn post_form(&self, url: &str, form: &Form) -> Result<String, Error> {
            self.sent_forms.lock().unwrap().push(form.to_vec());
            self.posts.get(url).cloned().ok_or(Error::Status {
                url: url.to_string(),
                status: 404,
            })
        }

        async fn get(&self, url: &str) -> Result<String, Error> {
            self.fetched.lock().unwrap().push(url.to_string());
            self.gets.get(url).cloned().ok_or(Error::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citations_name_their_sources() {
        assert!(Database::NistAsd.citation().contains("NIST Atomic Spectra Database"));
        assert!(Database::Henke.citation().contains("Henke"));
        assert_eq!(Database::NistAsd.to_string(), "NIST ASD");
        assert_eq!(Database::Henke.id(), "cxro-henke");
    }
}
