//! Sub-project discovery configuration.

use std::path::PathBuf;

/// Options controlling how sub-projects are discovered when the build file
/// does not list them.
#[derive(Clone, Debug, Default)]
pub struct DiscoveryOptions {
    /// Report unreadable entries and ignored settings lines
    pub verbose: bool,

    /// Directory names to skip while walking the project tree
    pub skip: Vec<PathBuf>,
}
