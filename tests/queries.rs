use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use spectroscopy::db::henke::{self, FilterQuery, Scan, SpectralAxis};
use spectroscopy::db::nist::{self, ValueKind};
use spectroscopy::db::{DatabaseConfig, Error, Fetcher, Form};
use spectroscopy::export::{self, Format};
use spectroscopy::{Element, Ion};

const NIST_PAGE: &str = include_str!("data/nist_ie_na.html");
const HENKE_PAGE: &str = include_str!("data/henke_filter_response.html");
const HENKE_DATA: &str = include_str!("data/henke_si3n4_energy.dat");

const MIRROR: &str = r#"
[nist]
ionization_url = "http://mirror.test/asd/ie.pl"

[henke]
filter_url = "http://mirror.test/henke/cgi-bin/filter.pl"
base_url = "http://mirror.test/henke/"
"#;

/// Serves fixed pages by URL and records every request.
#[derive(Default)]
struct Mirror {
    pages: HashMap<String, &'static str>,
    requests: Mutex<Vec<String>>,
}

impl Mirror {
    fn serving(pages: &[(&str, &'static str)]) -> Self {
        Self {
            pages: pages.iter().map(|(u, b)| (u.to_string(), *b)).collect(),
            requests: Mutex::default(),
        }
    }

    fn page(&self, method: &str, url: &str) -> Result<String, Error> {
        self.requests.lock().unwrap().push(format!("{method} {url}"));
        self.pages
            .get(url)
            .map(|body| body.to_string())
            .ok_or_else(|| Error::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[async_trait]
impl Fetcher for Mirror {
    async fn post_form(&self, url: &str, _form: &Form) -> Result<String, Error> {
        self.page("POST", url)
    }

    async fn get(&self, url: &str) -> Result<String, Error> {
        self.page("GET", url)
    }
}

fn config() -> DatabaseConfig {
    DatabaseConfig::from_toml_str(MIRROR).unwrap()
}

#[tokio::test]
async fn sodium_ionization_table_exports_as_csv() {
    let config = config();
    let mirror = Mirror::serving(&[("http://mirror.test/asd/ie.pl", NIST_PAGE)]);

    let rows = nist::ionization_energies(&mirror, &config.nist, Element::Na)
        .await
        .unwrap();
    assert_eq!(rows.len(), 11);
    assert_eq!(rows[3].ion.spectrum_name(), "Na IV");
    assert_eq!(rows[3].kind, ValueKind::Interpolated);
    assert_eq!(rows[10].uncertainty_ev, None);

    let mut out = Vec::new();
    export::write_ionization(&mut out, &rows, Format::Csv).unwrap();
    let csv = String::from_utf8(out).unwrap();
    let records: Vec<&str> = csv.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(records.len(), 12);
    assert!(records[1].starts_with("11,Na I,0,Sodium,"));
    assert!(records[11].contains(",1648.702285,,Theoretical,"));
}

#[tokio::test]
async fn single_ion_query_picks_its_row() {
    let config = config();
    let mirror = Mirror::serving(&[("http://mirror.test/asd/ie.pl", NIST_PAGE)]);
    let ion: Ion = "Na+2".parse().unwrap();

    let row = nist::ionization_energy(&mirror, &config.nist, ion).await.unwrap();
    assert_eq!(row.energy_ev, 71.62);
    assert_eq!(row.ground_level, "2P*<3/2>");

    let bare = Ion::new(Element::Na, 11).unwrap();
    let err = nist::ionization_energy(&mirror, &config.nist, bare).await.unwrap_err();
    assert!(matches!(err, Error::InvalidQuery { .. }));
    assert_eq!(mirror.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn filter_query_follows_link_under_mirror_prefix() {
    let config = config();
    let mirror = Mirror::serving(&[
        ("http://mirror.test/henke/cgi-bin/filter.pl", HENKE_PAGE),
        ("http://mirror.test/henke/tmp/xray5734.dat", HENKE_DATA),
    ]);
    let query = FilterQuery {
        density: Some(3.44),
        scan: Scan::Energy {
            min: 10.0,
            max: 1000.0,
        },
        points: 11,
        ..FilterQuery::default()
    };

    let curve = henke::filter_transmission(&mirror, &config.henke, &query)
        .await
        .unwrap();
    assert_eq!(
        *mirror.requests.lock().unwrap(),
        [
            "POST http://mirror.test/henke/cgi-bin/filter.pl",
            "GET http://mirror.test/henke/tmp/xray5734.dat",
        ]
    );
    assert_eq!(curve.axis, SpectralAxis::Energy);
    assert_eq!(curve.len(), 11);
    let t = curve.transmission_at(450.0).unwrap();
    assert!((t - 0.534_515).abs() < 1e-6);

    let mut out = Vec::new();
    export::write_transmission(&mut out, &curve, Format::Json).unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(doc["source"]["id"], "cxro-henke");
    assert_eq!(doc["data"]["formula"], "Si3N4");
    assert_eq!(doc["data"]["points"].as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn invalid_filter_query_never_reaches_the_server() {
    let config = config();
    let mirror = Mirror::default();
    let query = FilterQuery {
        scan: Scan::Energy {
            min: 5.0,
            max: 1000.0,
        },
        ..FilterQuery::default()
    };

    let err = henke::filter_transmission(&mirror, &config.henke, &query)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidQuery { .. }));
    assert!(mirror.requests.lock().unwrap().is_empty());
}
