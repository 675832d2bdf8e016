use std::io::{self, Write};

use anyhow::Error;

use spectroscopy::db::{self, Database};
use spectroscopy::{NotationError, ParseElementError, export, optics};

use crate::util::text::wrap;

const INNER: usize = 62;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();
    let rule = "─".repeat(INNER);

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔{}╗", "═".repeat(INNER));
    let _ = writeln!(stderr, "   ║  {:<w$}║", "✗ Error", w = INNER - 2);
    let _ = writeln!(stderr, "   ╟{rule}╢");
    for line in wrap(&err.to_string(), INNER - 3) {
        let _ = writeln!(stderr, "   ║  {:<w$} ║", line, w = INNER - 3);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟{rule}╢");
        let _ = writeln!(stderr, "   ║  {:<w$}║", "Caused by:", w = INNER - 2);
        for line in wrap(&cause.to_string(), INNER - 5) {
            let _ = writeln!(stderr, "   ║    {:<w$} ║", line, w = INNER - 5);
        }
    }

    let hints = Hints::collect(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟{rule}╢");
        let _ = writeln!(stderr, "   ║  {:<w$}║", "Hints:", w = INNER - 2);
        for hint in hints {
            let wrapped = wrap(&hint, INNER - 7);
            for (i, line) in wrapped.iter().enumerate() {
                let bullet = if i == 0 { "•" } else { " " };
                let _ = writeln!(stderr, "   ║    {bullet} {:<w$} ║", line, w = INNER - 7);
            }
        }
    }

    let _ = writeln!(stderr, "   ╚{}╝", "═".repeat(INNER));
    let _ = writeln!(stderr);
}

/// Suggestions derived from the typed errors in an `anyhow` chain.
struct Hints(Vec<String>);

impl Hints {
    fn collect(err: &Error) -> Vec<String> {
        let mut hints = Self(Vec::new());
        let mut typed = false;

        for cause in err.chain() {
            if let Some(e) = cause.downcast_ref::<db::Error>() {
                hints.database(e);
            } else if let Some(e) = cause.downcast_ref::<NotationError>() {
                hints.notation(e);
            } else if cause.is::<ParseElementError>() {
                hints.add("Symbols are case sensitive (Na, not NA); names like \"sodium\" work too");
            } else if let Some(e) = cause.downcast_ref::<optics::Error>() {
                hints.optics(e);
            } else if let Some(e) = cause.downcast_ref::<export::Error>() {
                hints.export(e);
            } else if let Some(e) = cause.downcast_ref::<io::Error>() {
                hints.io(e);
            } else {
                continue;
            }
            typed = true;
            break;
        }

        if !typed {
            hints.fallback(err);
        }
        hints.0
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.0.push(hint.into());
    }

    fn database(&mut self, err: &db::Error) {
        match err {
            db::Error::Http(e) if e.is_timeout() => {
                self.add("The request timed out");
                self.add("Raise client.timeout_secs in a --config file");
            }
            db::Error::Http(e) if e.is_connect() => {
                self.add("Could not connect to the database server");
                self.add("Check your network connection and any proxy settings");
            }
            db::Error::Http(_) => {
                self.add("The HTTP request failed before a response arrived");
            }
            db::Error::Status { status, .. } if *status >= 500 => {
                self.add("The database server reported an internal error");
                self.add("These services are occasionally down; try again later");
            }
            db::Error::Status { status: 404, .. } => {
                self.add("The endpoint was not found");
                self.add("Check the URLs in your --config file");
            }
            db::Error::Status { .. } => {
                self.add("The server rejected the request");
            }
            db::Error::Parse { database, .. } => {
                self.add(format!("The {database} response did not have the expected layout"));
                self.add("The service may have changed its output format");
                self.add("Run with -vvv to log the raw response");
                self.citation(*database);
            }
            db::Error::InvalidQuery { database: Database::Henke, .. } => {
                self.add("Energies must lie within 10-30000 eV, wavelengths within 0.041-124 nm");
                self.add("Points must be within 2-500; thickness and density positive");
                self.add("Formulas use element symbols with counts, e.g. Si3N4 or C5H8O2");
            }
            db::Error::InvalidQuery { database: Database::NistAsd, .. } => {
                self.add("Ionization energies exist for charges 0 to Z-1");
            }
            db::Error::Config(_) => {
                self.add("The configuration file is not valid TOML for this tool");
                self.add("Known sections: [client], [nist], [henke]");
            }
            db::Error::Io { source } => self.io(source),
        }
    }

    fn citation(&mut self, database: Database) {
        self.add(format!("Compare with {}", database.homepage()));
    }

    fn notation(&mut self, err: &NotationError) {
        match err {
            NotationError::Syntax { kind, .. } => match *kind {
                "configuration" | "subshell" => {
                    self.add("Configurations look like 1s2.2s2.2p6 or [Ne] 3s2 3p");
                }
                "term symbol" => {
                    self.add("Terms look like 2S<1/2>, 3P*2 or 1D (a '*' marks odd parity)");
                }
                "energy level" => {
                    self.add("Quote each level: \"2p6.3s 2S<1/2>\"");
                }
                "ion" => {
                    self.add("Ions look like \"Na IV\", Na+3 or Fe2+");
                }
                "chemical formula" => {
                    self.add("Formulas use element symbols with counts, e.g. Si3N4 or Ca(OH)2");
                }
                _ => self.add("Check the notation for typos"),
            },
            NotationError::ParityMismatch { .. } => {
                self.add("Add or remove '*' on the term to match the configuration parity");
            }
            NotationError::InvalidJ { .. } => {
                self.add("J must lie between |L - S| and L + S in integer steps");
            }
            NotationError::InvalidCharge { .. } => {
                self.add("The charge cannot exceed the atomic number");
            }
            NotationError::TooManyElectrons { .. } | NotationError::NoSuchSubshell { .. } => {
                self.add("A subshell nl holds 2(2l+1) electrons and needs l < n");
            }
            _ => {}
        }
    }

    fn optics(&mut self, err: &optics::Error) {
        match err {
            optics::Error::NoDiffraction { two_d, .. } => {
                self.add(format!("Wavelengths above {two_d} Å cannot diffract from this crystal"));
                self.add("Use a lower --order or a crystal with larger 2d");
            }
            optics::Error::UnknownCrystal(_) => {
                let names: Vec<&str> = optics::Crystal::ALL.iter().map(|c| c.name()).collect();
                self.add(format!("Known crystals: {}", names.join(", ")));
            }
            optics::Error::ZeroOrder => self.add("Orders start at 1"),
            _ => {}
        }
    }

    fn export(&mut self, err: &export::Error) {
        match err {
            export::Error::UnknownFormat(_) => {
                self.add("Supported formats: text, csv, tsv, json");
            }
            export::Error::Io { source } => self.io(source),
            export::Error::Serialize { .. } => {}
        }
    }

    fn io(&mut self, err: &io::Error) {
        match err.kind() {
            io::ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and that parent directories exist");
            }
            io::ErrorKind::PermissionDenied => {
                self.add("Permission denied; check file permissions with `ls -la`");
            }
            io::ErrorKind::BrokenPipe => {
                self.add("The output consumer exited early (e.g. `| head`)");
            }
            _ => self.add("Check the file path, permissions and free disk space"),
        }
    }

    fn fallback(&mut self, err: &Error) {
        let text = err
            .chain()
            .map(|e| e.to_string().to_lowercase())
            .collect::<Vec<_>>()
            .join("\n");

        if text.contains("unknown material") {
            self.add("Run `spectro materials` to list the built-in materials");
        } else if text.contains("unknown element") {
            self.add("Give an element symbol (Na), a name (sodium) or a spectrum (\"Na IV\")");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn layout_changes_point_at_trace_logging() {
        let err = Err::<(), _>(db::Error::parse(Database::NistAsd, 3, "missing column"))
            .context("Ionization energy query for Na failed")
            .unwrap_err();
        let hints = Hints::collect(&err);
        assert!(hints.iter().any(|h| h == "Run with -vvv to log the raw response"));
        assert!(hints.iter().any(|h| h.contains(Database::NistAsd.homepage())));
    }

    #[test]
    fn formula_syntax_gets_formula_hint() {
        let err = Error::from(NotationError::syntax("chemical formula", "Si(", "unbalanced"));
        assert_eq!(
            Hints::collect(&err),
            ["Formulas use element symbols with counts, e.g. Si3N4 or Ca(OH)2"]
        );
    }
}
