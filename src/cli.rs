use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use shared_build::{
    config::{BuildFile, DiscoveryOptions, ExecutionOptions, UserConfig, file::expand_tilde},
    task::Action,
};

#[derive(Args)]
struct DiscoveryArgs {
    /// Directory names to skip when looking for modules (repeatable)
    #[arg(long, global = true, action = clap::ArgAction::Append)]
    skip: Vec<PathBuf>,
}

#[derive(Args)]
pub(crate) struct CleanArgs {
    /// Only clean the output directory of this sub-project (repeatable)
    #[arg(short = 'p', long = "subproject", action = clap::ArgAction::Append)]
    subprojects: Vec<String>,

    /// Just list what would be deleted and the reclaimable space
    #[arg(long)]
    dry_run: bool,

    /// Move the build output to the system trash instead of deleting it
    #[arg(long, conflicts_with = "permanent")]
    trash: bool,

    /// Delete permanently even if the config file enables the trash
    #[arg(long, conflicts_with = "trash")]
    permanent: bool,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Delete the shared build directory
    Clean(CleanArgs),

    /// Show where every sub-project writes its build output
    Layout,

    /// List the declared repositories in lookup order
    Repositories,
}

#[derive(Parser)]
#[command(name = "shared-build")]
#[command(about = "Relocate Android module build outputs into one shared directory and clean it")]
#[command(version)]
pub(crate) struct Cli {
    /// Root project directory, the one holding the root build script
    #[arg(short = 'C', long = "project-dir", default_value = ".", global = true)]
    project_dir: PathBuf,

    /// Build file to read instead of `<project-dir>/shared-build.toml`
    #[arg(long, global = true)]
    build_file: Option<PathBuf>,

    /// Print a single JSON document instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    /// Show discovery diagnostics
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Discovery options
    #[command(flatten)]
    discovery: DiscoveryArgs,

    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Cli {
    pub(crate) const fn json(&self) -> bool {
        self.json
    }

    /// The absolute project directory.
    pub(crate) fn project_dir(&self) -> Result<PathBuf> {
        let dir = expand_tilde(&self.project_dir);
        std::path::absolute(&dir)
            .with_context(|| format!("Failed to make {} absolute", dir.display()))
    }

    /// The build file location: `--build-file` or the default inside the project.
    pub(crate) fn build_file_path(&self, project_dir: &Path) -> PathBuf {
        self.build_file.as_ref().map_or_else(
            || project_dir.join(BuildFile::FILE_NAME),
            |path| expand_tilde(path),
        )
    }

    pub(crate) fn discovery_options(&self, config: &UserConfig) -> DiscoveryOptions {
        let skip = if self.discovery.skip.is_empty() {
            config.discovery.skip.clone().unwrap_or_default()
        } else {
            self.discovery.skip.clone()
        };

        DiscoveryOptions {
            verbose: self.verbose || config.discovery.verbose.unwrap_or(false),
            skip,
        }
    }
}

impl CleanArgs {
    pub(crate) fn execution_options(&self, config: &UserConfig) -> ExecutionOptions {
        let use_trash = if self.trash {
            true
        } else if self.permanent {
            false
        } else {
            config.execution.use_trash.unwrap_or(false)
        };

        ExecutionOptions {
            dry_run: self.dry_run || config.execution.dry_run.unwrap_or(false),
            use_trash,
        }
    }

    pub(crate) fn action(&self) -> Action {
        if self.subprojects.is_empty() {
            Action::Clean
        } else {
            Action::CleanSubprojects(self.subprojects.clone())
        }
    }
}
