//! The execution phase.
//!
//! Actions are declared up front and only touch the filesystem when
//! [`execute`] runs them. The target paths are read from the
//! [`BuildConfiguration`] at that moment, never captured earlier.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    path::PathBuf,
};

use crate::{
    cleaner::{CleanReport, Cleaner},
    config::BuildConfiguration,
    error::BuildError,
};

/// An on-demand action against a configured build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Delete the shared build directory and everything in it
    Clean,

    /// Delete only the output directories of the named sub-projects
    CleanSubprojects(Vec<String>),
}

impl Action {
    /// Resolve the paths this action deletes.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnknownSubproject`] if a named sub-project is not
    /// part of the configuration.
    pub fn targets(&self, config: &BuildConfiguration) -> Result<Vec<PathBuf>, BuildError> {
        match self {
            Self::Clean => Ok(vec![config.shared_build_dir().to_path_buf()]),
            Self::CleanSubprojects(names) => names
                .iter()
                .map(|name| {
                    config
                        .subprojects()
                        .find(name)
                        .map(|s| s.output_dir.clone())
                        .ok_or_else(|| BuildError::UnknownSubproject(name.clone()))
                })
                .collect(),
        }
    }
}

impl Display for Action {
    /// Gradle-style task names: `clean`, `:app:clean`.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Clean => f.write_str("clean"),
            Self::CleanSubprojects(names) => {
                let tasks: Vec<String> = names
                    .iter()
                    .map(|name| format!(":{}:clean", name.trim_start_matches(':')))
                    .collect();
                f.write_str(&tasks.join(" "))
            }
        }
    }
}

/// Run `action` against `config`.
///
/// Every target is resolved before anything is deleted.
///
/// # Errors
///
/// - [`BuildError::UnknownSubproject`] if a named sub-project does not exist
/// - [`BuildError::Deletion`] if the filesystem refuses a removal
pub fn execute(
    action: &Action,
    config: &BuildConfiguration,
    cleaner: &Cleaner,
) -> Result<Vec<CleanReport>, BuildError> {
    let targets = action.targets(config)?;
    cleaner.clean_all(&targets)
}
