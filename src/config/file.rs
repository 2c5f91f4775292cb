//! Configuration file support.
//!
//! Two TOML files feed the configuration:
//!
//! - the **build file**, `shared-build.toml` next to the root build script,
//!   which declares repositories, the shared build directory and optionally
//!   the sub-projects
//! - the **user config** at `~/.config/shared-build/config.toml` (or the
//!   platform-specific equivalent), holding personal defaults for cleaning and
//!   discovery
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > user config > build file > hardcoded default**.
//!
//! # Example build file
//!
//! ```toml
//! build_dir = "../../build"
//! repositories = ["google", "mavenCentral"]
//! subprojects = [":app", ":libs:core"]
//! ```
//!
//! # Example user config
//!
//! ```toml
//! [execution]
//! dry_run = false
//! use_trash = true
//!
//! [discovery]
//! verbose = true
//! skip = ["node_modules"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{error::BuildError, repository::RepositorySource};

/// Declarative build file living in the project root.
///
/// Every key is optional; missing keys fall back to the defaults of
/// [`BuildSettings`](crate::config::BuildSettings).
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct BuildFile {
    /// Shared build directory, relative to the project root
    pub build_dir: Option<PathBuf>,

    /// Repositories in lookup order
    pub repositories: Option<Vec<RepositorySource>>,

    /// Explicit sub-project paths; discovered from the project tree when absent
    pub subprojects: Option<Vec<String>>,
}

impl BuildFile {
    /// Name of the build file inside the project directory.
    pub const FILE_NAME: &'static str = "shared-build.toml";

    /// Load the build file at `path`.
    ///
    /// A missing file yields an empty build file so the defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Config`] if the file exists but cannot be read
    /// or contains invalid TOML or unknown keys.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        load_toml(path)
    }
}

/// Personal defaults read from the user's configuration directory.
#[derive(Deserialize, Default, Debug)]
pub struct UserConfig {
    /// Clean execution defaults
    #[serde(default)]
    pub execution: FileExecutionConfig,

    /// Sub-project discovery defaults
    #[serde(default)]
    pub discovery: FileDiscoveryConfig,
}

/// Execution options from the user config.
#[derive(Deserialize, Default, Debug)]
pub struct FileExecutionConfig {
    /// Whether to only report what a clean would delete
    pub dry_run: Option<bool>,

    /// Whether to move directories to the system trash instead of deleting them
    pub use_trash: Option<bool>,
}

/// Discovery options from the user config.
#[derive(Deserialize, Default, Debug)]
pub struct FileDiscoveryConfig {
    /// Whether to show discovery diagnostics
    pub verbose: Option<bool>,

    /// Directory names to skip while walking the project tree
    pub skip: Option<Vec<PathBuf>>,
}

impl UserConfig {
    /// Returns the path where the user configuration file is expected.
    ///
    /// `None` if the platform configuration directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("shared-build").join("config.toml"))
    }

    /// Load the user configuration from its default location.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Config`] if the file exists but is unreadable or malformed.
    pub fn load() -> Result<Self, BuildError> {
        match Self::config_path() {
            Some(path) => load_toml(&path),
            None => Ok(Self::default()),
        }
    }
}

fn load_toml<T>(path: &Path) -> Result<T, BuildError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| BuildError::Config {
        path: path.to_path_buf(),
        details: format!("failed to read file: {e}"),
    })?;

    toml::from_str(&content).map_err(|e| BuildError::Config {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_build_file() {
        let build_file = BuildFile::default();

        assert!(build_file.build_dir.is_none());
        assert!(build_file.repositories.is_none());
        assert!(build_file.subprojects.is_none());
    }

    #[test]
    fn test_parse_full_build_file() {
        let toml_content = r#"
build_dir = "../out"
repositories = ["google", "mavenCentral", "https://jitpack.io"]
subprojects = [":app", ":libs:core"]
"#;

        let build_file: BuildFile = toml::from_str(toml_content).unwrap();

        assert_eq!(build_file.build_dir, Some(PathBuf::from("../out")));
        assert_eq!(
            build_file.repositories,
            Some(vec![
                RepositorySource::Google,
                RepositorySource::MavenCentral,
                RepositorySource::Maven("https://jitpack.io".to_string()),
            ])
        );
        assert_eq!(
            build_file.subprojects,
            Some(vec![":app".to_string(), ":libs:core".to_string()])
        );
    }

    #[test]
    fn test_build_file_rejects_unknown_keys() {
        let result = toml::from_str::<BuildFile>("buildDir = \"../build\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_build_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let build_file = BuildFile::load(&tmp.path().join(BuildFile::FILE_NAME)).unwrap();

        assert!(build_file.build_dir.is_none());
    }

    #[test]
    fn test_load_malformed_build_file_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(BuildFile::FILE_NAME);
        std::fs::write(&path, "repositories = 12").unwrap();

        let result = BuildFile::load(&path);
        assert!(matches!(result, Err(BuildError::Config { .. })));
    }

    #[test]
    fn test_parse_user_config() {
        let toml_content = r#"
[execution]
use_trash = true

[discovery]
verbose = true
skip = ["node_modules", ".gradle"]
"#;

        let config: UserConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.execution.use_trash, Some(true));
        assert!(config.execution.dry_run.is_none());
        assert_eq!(config.discovery.verbose, Some(true));
        assert_eq!(
            config.discovery.skip,
            Some(vec![PathBuf::from("node_modules"), PathBuf::from(".gradle")])
        );
    }

    #[test]
    fn test_parse_empty_user_config() {
        let config: UserConfig = toml::from_str("").unwrap();

        assert!(config.execution.use_trash.is_none());
        assert!(config.discovery.skip.is_none());
    }

    #[test]
    fn test_config_path_returns_expected_suffix() {
        if let Some(p) = UserConfig::config_path() {
            assert!(p.ends_with("shared-build/config.toml"));
        }
    }

    #[test]
    fn test_expand_tilde_with_home() {
        let expanded = expand_tilde(&PathBuf::from("~/Projects"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("Projects"));
        }
    }

    #[test]
    fn test_expand_tilde_relative_path_unchanged() {
        let path = PathBuf::from("relative/path");
        assert_eq!(expand_tilde(&path), path);
    }
}
