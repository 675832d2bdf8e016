use super::Database;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse {database} response: {details} (at line ~{line})")]
    Parse {
        database: Database,
        line: usize,
        details: String,
    },

    #[error("invalid {database} query: {details}")]
    InvalidQuery { database: Database, details: String },

    #[error("invalid database configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    pub fn parse(database: Database, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            database,
            line,
            details: details.into(),
        }
    }

    pub fn invalid_query(database: Database, details: impl Into<String>) -> Self {
        Self::InvalidQuery {
            database,
            details: details.into(),
        }
    }
}
