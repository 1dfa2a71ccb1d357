// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed source rules tree and target project
// so each integration test can run an import in isolation without repeating
// filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser as _;
use cursor_rules_cli::cli::Cli;
use cursor_rules_cli::commands::import;
use cursor_rules_cli::logging::Logger;
use cursor_rules_cli::operations::SystemLinkOps;
use cursor_rules_cli::tasks::report::ImportReport;

/// Write the default rule sets into `source`.
///
/// Creates:
/// - `general/a.md`
/// - `general/sub/c.md` (nested, to check structure is mirrored)
/// - `python/b.md`
pub fn setup_rules(source: &Path) {
    std::fs::create_dir_all(source.join("general").join("sub")).expect("create general");
    std::fs::create_dir_all(source.join("python")).expect("create python");
    std::fs::write(source.join("general").join("a.md"), "general rule a").expect("write a.md");
    std::fs::write(source.join("general").join("sub").join("c.md"), "nested rule c")
        .expect("write c.md");
    std::fs::write(source.join("python").join("b.md"), "python rule b").expect("write b.md");
}

/// An isolated source rules tree plus target project backed by a
/// [`tempfile::TempDir`].
pub struct RulesFixture {
    dir: tempfile::TempDir,
    /// Canonical source rules directory.
    pub source: PathBuf,
    /// Target project directory (not created until an import runs).
    pub target: PathBuf,
}

impl RulesFixture {
    /// Create a fixture with the default rule sets.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dunce::canonicalize(dir.path()).expect("canonicalize temp dir");
        let source = root.join("rules");
        setup_rules(&source);
        Self {
            dir,
            source,
            target: root.join("project"),
        }
    }

    /// Temp root holding both trees (handy for settings files).
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Run an import in-process with `args` placed before the target.
    ///
    /// The source is always passed explicitly and the settings file points
    /// at a path inside the fixture, so the user's environment never leaks
    /// into a test.
    pub fn import(&self, args: &[&str]) -> ImportReport {
        let settings = self.root().join("config.toml");
        let mut argv: Vec<String> = vec![
            "cursor-rules".into(),
            "--source".into(),
            self.source.display().to_string(),
            "--config".into(),
            settings.display().to_string(),
        ];
        argv.extend(args.iter().map(ToString::to_string));
        argv.push(self.target.display().to_string());

        let cli = Cli::parse_from(argv);
        let log = Arc::new(Logger::with_log_file(None));
        import::run_with_ops(&cli, &log, Arc::new(SystemLinkOps), &[]).expect("import run")
    }

    /// `<target>/.cursor/rules`
    pub fn rules_dir(&self) -> PathBuf {
        self.target.join(".cursor").join("rules")
    }

    /// Sorted listing of everything under the target, one entry per line.
    ///
    /// Directories end with `/`, symlinks are shown as `path -> target`
    /// with the source prefix replaced by `<source>`.
    pub fn layout(&self) -> String {
        let mut lines = Vec::new();
        for entry in walkdir::WalkDir::new(&self.target)
            .min_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.expect("walk target");
            let rel = entry
                .path()
                .strip_prefix(&self.target)
                .expect("entry under target")
                .to_string_lossy()
                .replace('\\', "/");
            let file_type = entry.file_type();
            if file_type.is_symlink() {
                let link = std::fs::read_link(entry.path()).expect("read link");
                let shown = link.to_string_lossy().replace(
                    &self.source.to_string_lossy().into_owned(),
                    "<source>",
                );
                lines.push(format!("{rel} -> {shown}"));
            } else if file_type.is_dir() {
                lines.push(format!("{rel}/"));
            } else {
                lines.push(rel);
            }
        }
        lines.join("\n")
    }

    /// Read a file under the target as a string.
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.target.join(relative)).expect("read target file")
    }

    /// Write a file under the target, creating parents.
    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.target.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write target file");
    }
}
