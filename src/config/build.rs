//! The configuration phase.
//!
//! [`configure`] turns declarative [`BuildSettings`] into an immutable
//! [`BuildConfiguration`]: repositories are registered, the shared build
//! directory is resolved once, and every sub-project is relocated under it.
//! Nothing in this phase reads or writes the filesystem.

use std::path::{Path, PathBuf};

use crate::{
    error::BuildError,
    project::Subprojects,
    relocator::{DEFAULT_BUILD_DIR, relocate, resolve_path},
    repository::{Repositories, RepositorySource},
};

use super::file::BuildFile;

/// Declarative input of the configuration phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildSettings {
    /// Shared build directory, relative to the project root
    pub build_dir: PathBuf,

    /// Repositories in lookup order
    pub repositories: Vec<RepositorySource>,

    /// Sub-project paths (`:app`) or bare names (`app`)
    pub subprojects: Vec<String>,
}

impl Default for BuildSettings {
    /// `../../build`, Google then Maven Central, no sub-projects.
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            repositories: vec![RepositorySource::Google, RepositorySource::MavenCentral],
            subprojects: Vec::new(),
        }
    }
}

impl BuildSettings {
    /// Layer a build file over the defaults.
    ///
    /// `discovered` supplies the sub-projects when the build file does not
    /// list them.
    #[must_use]
    pub fn from_build_file(build_file: BuildFile, discovered: Vec<String>) -> Self {
        let defaults = Self::default();

        Self {
            build_dir: build_file.build_dir.unwrap_or(defaults.build_dir),
            repositories: build_file.repositories.unwrap_or(defaults.repositories),
            subprojects: build_file.subprojects.unwrap_or(discovered),
        }
    }
}

/// Immutable result of the configuration phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfiguration {
    project_dir: PathBuf,
    shared_build_dir: PathBuf,
    repositories: Repositories,
    subprojects: Subprojects,
}

impl BuildConfiguration {
    /// The absolute root project directory.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// The shared root output directory every sub-project writes under.
    ///
    /// This is the target of the clean action.
    #[must_use]
    pub fn shared_build_dir(&self) -> &Path {
        &self.shared_build_dir
    }

    #[must_use]
    pub const fn repositories(&self) -> &Repositories {
        &self.repositories
    }

    #[must_use]
    pub const fn subprojects(&self) -> &Subprojects {
        &self.subprojects
    }
}

/// Evaluate the build settings for the project rooted at `project_dir`.
///
/// # Errors
///
/// - [`BuildError::PathResolution`] if `project_dir` is not absolute or the
///   build directory cannot be resolved against it
/// - [`BuildError::InvalidSubprojectName`] or [`BuildError::DuplicateSubproject`]
///   if the sub-projects cannot all be relocated
///
/// No configuration is produced when any step fails.
pub fn configure(
    project_dir: &Path,
    settings: &BuildSettings,
) -> Result<BuildConfiguration, BuildError> {
    if !project_dir.is_absolute() {
        return Err(BuildError::path_resolution(
            project_dir,
            &settings.build_dir,
            "project directory is not absolute",
        ));
    }

    let mut repositories = Repositories::new();
    repositories.register_repositories(settings.repositories.iter().cloned());

    let project_dir = resolve_path(project_dir, Path::new("."))?;
    let shared_build_dir = resolve_path(&project_dir, &settings.build_dir)?;
    let subprojects = relocate(&shared_build_dir, settings.subprojects.as_slice())?;

    Ok(BuildConfiguration {
        project_dir,
        shared_build_dir,
        repositories,
        subprojects,
    })
}
