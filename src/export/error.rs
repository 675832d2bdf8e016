use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to serialize {format} output: {source}")]
    Serialize {
        format: Format,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown output format '{0}' (expected text, csv, tsv or json)")]
    UnknownFormat(String),
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Serialize {
            format: Format::Json,
            source,
        }
    }
}
