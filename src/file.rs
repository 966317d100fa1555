//! Dotenv file loading for the file tier.
//!
//! Parsing is left to `dotenvy`; this module only decides what a missing file
//! means. A missing file is an empty source, never an error. Files that exist
//! but cannot be read or parsed are reported with their path.

use std::path::Path;

use crate::error::ConfigError;

/// Read `KEY=value` pairs from a dotenv file without touching the process
/// environment.
pub fn load_env_file(path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            tracing::debug!(path = %path.display(), "env file not found, skipping");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(ConfigError::EnvFile {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let pairs = iter
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source: e,
        })?;

    tracing::debug!(path = %path.display(), entries = pairs.len(), "loaded env file");
    Ok(pairs)
}
