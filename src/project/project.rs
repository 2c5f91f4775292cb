//! Core sub-project data structures.
//!
//! This module defines how a single buildable module of the root project is
//! represented once its build output has been relocated.

use std::{
    fmt::{Display, Formatter, Result},
    path::{Path, PathBuf},
};

use serde::Serialize;

/// A buildable module owned by the root project.
///
/// Sub-projects are identified by their Gradle project path (`:app`,
/// `:libs:core`). The directory name used for the build output is the last
/// segment of that path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Subproject {
    /// Gradle project path, always starting with `:`
    pub path: String,

    /// Name of the module, unique among the root project's sub-projects
    pub name: String,

    /// Directory the module writes its build output to
    ///
    /// Assigned by the relocator; always `<shared build dir>/<name>`.
    pub output_dir: PathBuf,
}

impl Subproject {
    /// Create a sub-project from its project path and relocated output directory.
    ///
    /// A bare name such as `app` is accepted and normalised to `:app`.
    #[must_use]
    pub fn new(project_path: &str, output_dir: PathBuf) -> Self {
        let path = normalize_project_path(project_path);
        let name = project_name(&path).to_string();

        Self {
            path,
            name,
            output_dir,
        }
    }

    /// Whether the module's output directory currently exists on disk.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.output_dir.exists()
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Ensure a project path starts with a single `:`.
#[must_use]
pub fn normalize_project_path(project_path: &str) -> String {
    let trimmed = project_path.trim().trim_start_matches(':');
    format!(":{trimmed}")
}

/// The module name of a project path: its last `:`-separated segment.
#[must_use]
pub fn project_name(project_path: &str) -> &str {
    project_path
        .rsplit(':')
        .next()
        .unwrap_or(project_path)
}

impl Display for Subproject {
    /// Format as `📦 app (:app) → /path/to/build/app`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "📦 {} ({}) → {}",
            self.name,
            self.path,
            self.output_dir.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_bare_name() {
        let subproject = Subproject::new("app", PathBuf::from("/build/app"));

        assert_eq!(subproject.path, ":app");
        assert_eq!(subproject.name, "app");
    }

    #[test]
    fn test_nested_project_path() {
        let subproject = Subproject::new(":libs:core", PathBuf::from("/build/core"));

        assert_eq!(subproject.path, ":libs:core");
        assert_eq!(subproject.name, "core");
    }

    #[test]
    fn test_normalize_project_path() {
        assert_eq!(normalize_project_path("::app"), ":app");
        assert_eq!(normalize_project_path(" :feature:login "), ":feature:login");
    }

    #[test]
    fn test_display() {
        let subproject = Subproject::new(":app", PathBuf::from("/build/app"));
        let display = format!("{subproject}");

        assert!(display.contains("app (:app)"));
        assert!(display.contains("/build/app"));
    }
}
