//! Environment file loader
//!
//! The environment file is plain text with one `key: value` pair per line.
//! A line is split on `:` and accepted only when that yields exactly two
//! fields, so values that contain a colon (URLs, IPv6 addresses) cannot be
//! expressed and are skipped along with any other malformed line.

use super::models::EnvironmentStore;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading the environment file
#[derive(Debug, Error)]
pub enum EnvError {
    /// The file could not be opened or read
    #[error("failed to read environment file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parses a single `key: value` line.
///
/// Returns `None` for lines without exactly one colon or with an empty key.
/// There is no comment syntax: `# note` is skipped only because it has no
/// colon, while `# note: x` loads as the key `# note`.
pub fn parse_env_line(line: &str) -> Option<(String, String)> {
    let fields: Vec<&str> = line.split(':').collect();
    if fields.len() != 2 {
        return None;
    }

    let key = fields[0].trim();
    if key.is_empty() {
        return None;
    }

    Some((key.to_string(), fields[1].trim().to_string()))
}

/// Parses every valid line of an environment source, in file order.
///
/// Malformed lines are skipped silently.
pub fn parse_env_source(source: &str) -> Vec<(String, String)> {
    source.lines().filter_map(parse_env_line).collect()
}

/// Loads an environment file into a fresh store.
///
/// # Returns
///
/// * `Ok(EnvironmentStore)` - Store seeded with every valid line
/// * `Err(EnvError)` - If the file is missing or unreadable
pub fn load_env_file(path: &Path) -> Result<EnvironmentStore, EnvError> {
    let content = fs::read_to_string(path).map_err(|source| EnvError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut store = EnvironmentStore::new();
    let count = store.load_initial(&content);
    log::debug!("loaded {} variables from {}", count, path.display());

    Ok(store)
}
