use std::path::PathBuf;

use clap::Parser;

use crate::resources::LinkType;

/// Version reported by `--version` and the log header.
pub const VERSION: &str = match option_env!("CURSOR_RULES_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

const AFTER_HELP: &str = "\
Link Types:
  copy        Independent copies (safe for modification)
  symlink     File-level symlinks (updates with source changes)
  hardlink    File-level hardlinks (shared file data, updates with source)
  dirsymlink  Directory-level symlink to entire rules folder (most efficient)

Examples:
  cursor-rules /path/to/my-project                     # Copy all rules
  cursor-rules -l dirsymlink /path/to/my-project       # Symlink entire rules directory
  cursor-rules -l hardlink /path/to/my-project         # Hardlink all files
  cursor-rules -r general,git /path/to/my-project      # Only general and git rules
  cursor-rules -r python -f /path/to/python-project    # Python rules, force overwrite";

/// Command-line arguments for a single import run.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cursor-rules",
    about = "Import cursor rules into a project",
    version = VERSION,
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Target directory to import rules into
    pub target_directory: PathBuf,

    /// How to import rules [default: copy]
    #[arg(short, long, value_enum)]
    pub link_type: Option<LinkType>,

    /// Which rule sets: all, a single name, or a comma-separated list [default: all]
    #[arg(short, long)]
    pub rules: Option<String>,

    /// Overwrite existing files and links
    #[arg(short, long)]
    pub force: bool,

    /// Source rules directory (defaults to `rules/` next to the executable)
    #[arg(short, long, env = "CURSOR_RULES_SOURCE")]
    pub source: Option<PathBuf>,

    /// Settings file (defaults to `$XDG_CONFIG_HOME/cursor-rules/config.toml`)
    #[arg(short, long, env = "CURSOR_RULES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
