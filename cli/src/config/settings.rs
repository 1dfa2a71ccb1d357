//! Optional user settings file (`config.toml`).
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::toml_loader::load_config;
use crate::error::ConfigError;
use crate::resources::LinkType;

/// Defaults applied when the matching command-line option is absent.
///
/// ```toml
/// source = "/path/to/cursor-rules/rules"
/// link_type = "symlink"
/// rules = "general,python"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Source rules directory. Relative paths are resolved against the
    /// directory containing the settings file.
    pub source: Option<PathBuf>,
    /// Default placement strategy.
    pub link_type: Option<LinkType>,
    /// Default rule selection (`all`, a name, or a comma-separated list).
    pub rules: Option<String>,
}

impl Settings {
    /// Load settings from `path`. A missing file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut settings: Self = load_config(path)?;
        if let Some(source) = &settings.source
            && source.is_relative()
            && let Some(base) = path.parent()
        {
            settings.source = Some(base.join(source));
        }
        Ok(settings)
    }

    /// Default settings path, `$XDG_CONFIG_HOME/cursor-rules/config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        default_path_from(
            std::env::var_os("XDG_CONFIG_HOME"),
            std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")),
        )
    }
}

fn default_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let base = xdg_config_home
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("cursor-rules").join("config.toml"))
}
