//! Rule-set selection parsing.
use std::fmt;
use std::path::Path;

use anyhow::{Context as _, Result};

/// Which rule sets an import run should process.
///
/// # Examples
///
/// ```
/// use cursor_rules_cli::config::selection::RuleSelection;
///
/// assert_eq!(RuleSelection::parse("all"), RuleSelection::All);
/// assert_eq!(
///     RuleSelection::parse(" general , git ,"),
///     RuleSelection::Named(vec!["general".into(), "git".into()])
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RuleSelection {
    /// Every subdirectory of the source rules directory.
    #[default]
    All,
    /// Explicit names, used verbatim and not validated up front.
    Named(Vec<String>),
}

impl RuleSelection {
    /// Parse `all`, a single name, or a comma-separated list.
    ///
    /// Pieces are trimmed and empty pieces are dropped.
    #[must_use]
    pub fn parse(arg: &str) -> Self {
        if arg.trim() == "all" {
            return Self::All;
        }
        Self::Named(
            arg.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    /// Expand the selection into rule-set names.
    ///
    /// [`All`](Self::All) lists the subdirectories of `source_dir` sorted by
    /// name; named selections are returned as given.
    ///
    /// # Errors
    ///
    /// Returns an error if `source_dir` cannot be listed.
    pub fn resolve(&self, source_dir: &Path) -> Result<Vec<String>> {
        match self {
            Self::Named(names) => Ok(names.clone()),
            Self::All => {
                let entries = std::fs::read_dir(source_dir)
                    .with_context(|| format!("listing rule sets in {}", source_dir.display()))?;
                let mut names = Vec::new();
                for entry in entries {
                    let entry = entry
                        .with_context(|| format!("listing rule sets in {}", source_dir.display()))?;
                    if entry.path().is_dir() {
                        names.push(entry.file_name().to_string_lossy().into_owned());
                    }
                }
                names.sort();
                Ok(names)
            }
        }
    }
}

impl fmt::Display for RuleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Named(names) => f.write_str(&names.join(",")),
        }
    }
}
