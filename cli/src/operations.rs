//! Link and copy operation abstractions for dependency injection.
//!
//! Provides the [`LinkOps`] trait so that placement logic can be unit-tested
//! without depending on the host's link support.  Production code uses
//! [`SystemLinkOps`]; tests use the `mockall`-generated `MockLinkOps` to
//! inject link failures and exercise the copy fallbacks.

use std::io;
use std::path::{Path, PathBuf};

/// Primitive operations used to materialize rule files in a project.
///
/// Every method maps to one OS call (or a small fixed sequence of calls) and
/// reports the raw [`io::Error`]; deciding how to recover is the caller's job.
#[cfg_attr(test, mockall::automock)]
pub trait LinkOps: Send + Sync {
    /// Copy `source` to `dest`, preserving permissions and timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the content or metadata cannot be copied.
    fn copy_file(&self, source: &Path, dest: &Path) -> io::Result<()>;

    /// Create a file symlink at `link` whose content is `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses to create the link.
    fn symlink_file(&self, target: &Path, link: &Path) -> io::Result<()>;

    /// Create a hardlink at `link` sharing the data of `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem does not support hardlinks between
    /// the two paths (e.g. they are on different devices).
    fn hard_link(&self, source: &Path, link: &Path) -> io::Result<()>;

    /// Create a directory symlink at `link` whose content is `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses to create the link.
    fn symlink_dir(&self, target: &Path, link: &Path) -> io::Result<()>;

    /// Resolve `path` to an absolute path with all links followed.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// Production [`LinkOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLinkOps;

impl LinkOps for SystemLinkOps {
    fn copy_file(&self, source: &Path, dest: &Path) -> io::Result<()> {
        crate::resources::helpers::fs::copy_with_metadata(source, dest)
    }

    fn symlink_file(&self, target: &Path, link: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(target, link)
        }
        #[cfg(windows)]
        {
            std::os::windows::fs::symlink_file(target, link)
        }
    }

    fn hard_link(&self, source: &Path, link: &Path) -> io::Result<()> {
        std::fs::hard_link(source, link)
    }

    fn symlink_dir(&self, target: &Path, link: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(target, link)
        }
        #[cfg(windows)]
        {
            std::os::windows::fs::symlink_dir(target, link)
        }
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        // dunce strips the `\\?\` prefix on Windows so links stay readable.
        dunce::canonicalize(path)
    }
}
