//! TOML settings file parsing.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Load and deserialize a TOML file, yielding `T::default()` when the file
/// does not exist.
///
/// # Type Parameters
///
/// - `T`: Target type to deserialize into (must implement `DeserializeOwned`
///   and `Default`)
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read, and
/// [`ConfigError::InvalidSyntax`] if it is not valid TOML for `T`.
pub fn load_config<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::InvalidSyntax {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}
