//! Template file loader

use super::models::Template;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The file could not be opened or read
    #[error("failed to read template file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON or does not match the template shape
    #[error("failed to parse template")]
    Parse(#[from] serde_json::Error),
}

/// Parses a template document.
pub fn parse_template(content: &str) -> Result<Template, TemplateError> {
    Ok(serde_json::from_str(content)?)
}

/// Reads and parses a template file.
///
/// Structural warnings (unsupported methods, unparsable expected statuses,
/// malformed binding paths) are logged but do not fail the load.
pub fn load_template(path: &Path) -> Result<Template, TemplateError> {
    log::info!("reading {} ...", path.display());

    let content = fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let template = parse_template(&content)?;
    for warning in template.warnings() {
        log::warn!("{}", warning);
    }

    Ok(template)
}
