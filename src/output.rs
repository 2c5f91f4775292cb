//! JSON documents printed in `--json` mode.
//!
//! Each command emits exactly one document to stdout so the output can be piped
//! into other tools.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    cleaner::CleanReport,
    config::BuildConfiguration,
    repository::RepositorySource,
    utils::{directory_size, last_modified},
};

/// Output of the `layout` command.
#[derive(Debug, Serialize)]
pub struct LayoutOutput {
    pub project_dir: PathBuf,
    pub shared_build_dir: PathBuf,
    pub subprojects: Vec<SubprojectOutput>,
}

/// One relocated sub-project with its current state on disk.
#[derive(Debug, Serialize)]
pub struct SubprojectOutput {
    pub path: String,
    pub name: String,
    pub output_dir: PathBuf,
    pub size_bytes: u64,
    pub last_built: Option<DateTime<Local>>,
}

impl LayoutOutput {
    #[must_use]
    pub fn from_config(config: &BuildConfiguration) -> Self {
        Self {
            project_dir: config.project_dir().to_path_buf(),
            shared_build_dir: config.shared_build_dir().to_path_buf(),
            subprojects: config
                .subprojects()
                .iter()
                .map(|s| SubprojectOutput {
                    path: s.path.clone(),
                    name: s.name.clone(),
                    output_dir: s.output_dir.clone(),
                    size_bytes: directory_size(&s.output_dir),
                    last_built: last_modified(&s.output_dir),
                })
                .collect(),
        }
    }
}

/// Output of the `repositories` command.
#[derive(Debug, Serialize)]
pub struct RepositoriesOutput {
    pub repositories: Vec<RepositoryOutput>,
}

#[derive(Debug, Serialize)]
pub struct RepositoryOutput {
    pub name: String,
    pub url: Option<String>,
}

impl RepositoriesOutput {
    #[must_use]
    pub fn from_config(config: &BuildConfiguration) -> Self {
        Self {
            repositories: config
                .repositories()
                .iter()
                .map(|r: &RepositorySource| RepositoryOutput {
                    name: r.identifier().to_string(),
                    url: r.url().map(ToString::to_string),
                })
                .collect(),
        }
    }
}

/// Output of the `clean` command.
#[derive(Debug, Serialize)]
pub struct CleanOutput {
    pub task: String,
    pub dry_run: bool,
    pub total_freed_bytes: u64,
    pub targets: Vec<CleanReport>,
}

impl CleanOutput {
    #[must_use]
    pub fn new(task: String, dry_run: bool, targets: Vec<CleanReport>) -> Self {
        Self {
            task,
            dry_run,
            total_freed_bytes: targets.iter().map(|r| r.freed_bytes).sum(),
            targets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildSettings, configure};
    use std::path::Path;

    #[test]
    fn test_repositories_output_order_and_urls() {
        let config = configure(Path::new("/p/android"), &BuildSettings::default()).unwrap();
        let output = RepositoriesOutput::from_config(&config);
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["repositories"][0]["name"], "google");
        assert_eq!(json["repositories"][1]["name"], "mavenCentral");
        assert!(json["repositories"][1]["url"].as_str().unwrap().contains("maven"));
    }

    #[test]
    fn test_layout_output_for_unbuilt_project() {
        let settings = BuildSettings {
            subprojects: vec![":app".to_string()],
            ..BuildSettings::default()
        };
        let config = configure(Path::new("/nonexistent/myapp/android"), &settings).unwrap();
        let output = LayoutOutput::from_config(&config);

        assert_eq!(output.shared_build_dir, PathBuf::from("/nonexistent/myapp/build"));
        assert_eq!(output.subprojects[0].size_bytes, 0);
        assert!(output.subprojects[0].last_built.is_none());
    }

    #[test]
    fn test_clean_output_totals() {
        let report = |bytes| CleanReport {
            target: PathBuf::from("/b"),
            existed: true,
            freed_bytes: bytes,
            dry_run: false,
            trashed: false,
        };

        let output = CleanOutput::new("clean".to_string(), false, vec![report(3), report(4)]);
        assert_eq!(output.total_freed_bytes, 7);
    }
}
