//! Source rules directory resolution.
use std::path::{Path, PathBuf};

use crate::error::ImportError;

/// Directory name searched for next to the executable and in the working
/// directory.
pub const RULES_DIR_NAME: &str = "rules";

/// Candidate locations probed when no source is configured, in order.
///
/// Next to the executable first, then three levels up (a
/// `cli/target/<profile>/` build inside the rules repository), then the
/// current directory.
#[must_use]
pub fn candidate_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        candidates.push(parent.join(RULES_DIR_NAME));
        candidates.push(parent.join("../../..").join(RULES_DIR_NAME));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(RULES_DIR_NAME));
    }
    candidates
}

/// Pick the source rules directory.
///
/// An explicit path (command line or environment) wins over the settings
/// file; otherwise the first existing directory among `candidates` is used.
/// The result is canonicalized.
///
/// # Errors
///
/// Returns [`ImportError::SourceMissing`] if the chosen path is not a
/// directory.
pub fn resolve_source(
    explicit: Option<&Path>,
    configured: Option<&Path>,
    candidates: &[PathBuf],
) -> Result<PathBuf, ImportError> {
    let chosen = explicit
        .or(configured)
        .map(Path::to_path_buf)
        .or_else(|| candidates.iter().find(|c| c.is_dir()).cloned())
        .or_else(|| candidates.first().cloned())
        .unwrap_or_else(|| PathBuf::from(RULES_DIR_NAME));

    if !chosen.is_dir() {
        return Err(ImportError::SourceMissing { path: chosen });
    }
    dunce::canonicalize(&chosen).map_err(|_| ImportError::SourceMissing { path: chosen })
}
