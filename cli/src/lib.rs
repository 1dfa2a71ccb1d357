//! Cursor rules importer.
//!
//! Places rule sets from a source `rules/` directory into a project's
//! `.cursor/rules/` by copy, per-file symlink, per-file hardlink, or a single
//! directory symlink, and writes a `.cursorignore` marker.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: settings file, rule selection, and source resolution
//! - **[`resources`]**: idempotent placement primitives (file, directory link, marker)
//! - **[`tasks`]**: named units of work wired to resources, run in order
//! - **[`commands`]**: top-level orchestration of one import run
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod operations;
pub mod resources;
pub mod tasks;
