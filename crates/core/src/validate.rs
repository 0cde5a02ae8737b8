//! Pre-flight validation for registration requests.
//!
//! Pure checks the cache layer runs before any file or network I/O. The
//! cache maps these into its own error taxonomy so callers see a single
//! invalid-argument kind.

use std::path::Path;

/// Rejected registration input.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("script name must not be empty")]
    EmptyName,

    #[error("source text for script '{name}' must not be empty")]
    EmptySource { name: String },

    #[error("not a script directory: {0}")]
    NotADirectory(String),
}

/// Reject empty script names.
pub fn validate_script_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// Reject empty source text.
pub fn validate_script_source(name: &str, source: &str) -> Result<(), ValidationError> {
    if source.is_empty() {
        return Err(ValidationError::EmptySource {
            name: name.to_owned(),
        });
    }
    Ok(())
}

/// Reject paths that do not name an existing directory.
pub fn validate_scripts_dir(dir: &Path) -> Result<(), ValidationError> {
    if !dir.is_dir() {
        return Err(ValidationError::NotADirectory(dir.display().to_string()));
    }
    Ok(())
}
