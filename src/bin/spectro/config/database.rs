use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use spectroscopy::db::DatabaseConfig;

/// Endpoint configuration from `--config`, or the public services.
pub fn load_database_config(path: Option<&Path>) -> Result<DatabaseConfig> {
    match path {
        Some(path) => DatabaseConfig::load(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display())),
        None => {
            debug!("no --config given, using public endpoints");
            Ok(DatabaseConfig::default())
        }
    }
}
