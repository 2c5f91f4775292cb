//! Execution configuration for clean operations.
//!
//! This module defines the options that control how a clean action runs,
//! including dry-run mode and whether deleted trees go to the system trash.

/// Configuration for clean execution behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Only measure what would be deleted
    pub dry_run: bool,

    /// Move directories to the system trash instead of permanently deleting them.
    ///
    /// Defaults to `false`: a clean is irreversible unless `--trash` or
    /// `use_trash = true` in the config file asks otherwise.
    pub use_trash: bool,
}
