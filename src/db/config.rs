//! Endpoint and HTTP client settings for the reference databases.
//!
//! Every key has a default, so an empty file (or no file at all) talks to the
//! public NIST and CXRO servers:
//!
//! ```toml
//! [client]
//! timeout_secs = 30
//! user_agent = "spectroscopy/0.1.0"
//!
//! [nist]
//! ionization_url = "https://physics.nist.gov/cgi-bin/ASD/ie.pl"
//!
//! [henke]
//! filter_url = "http://henke.lbl.gov/cgi-bin/filter.pl"
//! base_url = "http://henke.lbl.gov/"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::Error;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub client: ClientConfig,
    pub nist: NistEndpoints,
    pub henke: HenkeEndpoints,
}

impl DatabaseConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded database configuration");
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NistEndpoints {
    /// Form handler of the ASD ionization-energy search.
    pub ionization_url: String,
}

impl Default for NistEndpoints {
    fn default() -> Self {
        Self {
            ionization_url: "https://physics.nist.gov/cgi-bin/ASD/ie.pl".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HenkeEndpoints {
    /// Form handler of the filter-transmission calculator.
    pub filter_url: String,
    /// Base that relative data-file links resolve against.
    pub base_url: String,
}

impl Default for HenkeEndpoints {
    fn default() -> Self {
        Self {
            filter_url: "http://henke.lbl.gov/cgi-bin/filter.pl".to_string(),
            base_url: "http://henke.lbl.gov/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = DatabaseConfig::from_toml_str("").unwrap();
        assert_eq!(config, DatabaseConfig::default());
        assert_eq!(config.client.timeout_secs, 30);
        assert!(config.nist.ionization_url.ends_with("ie.pl"));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = DatabaseConfig::from_toml_str(
            "[client]\ntimeout_secs = 5\n\n[henke]\nbase_url = \"http://mirror.example/\"\n",
        )
        .unwrap();
        assert_eq!(config.client.timeout_secs, 5);
        assert_eq!(config.client.user_agent, ClientConfig::default().user_agent);
        assert_eq!(config.henke.base_url, "http://mirror.example/");
        assert_eq!(config.henke.filter_url, HenkeEndpoints::default().filter_url);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DatabaseConfig::from_toml_str("[nist]\nurl = \"x\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[client]\nuser_agent = \"test-agent\"").unwrap();
        let config = DatabaseConfig::load(file.path()).unwrap();
        assert_eq!(config.client.user_agent, "test-agent");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DatabaseConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
