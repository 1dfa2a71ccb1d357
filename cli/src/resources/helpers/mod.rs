//! Shared helpers for placement resources.
pub mod fs;
