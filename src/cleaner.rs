//! Build output cleanup functionality.
//!
//! This module removes relocated build output directories. Deleting a target
//! that does not exist is a success, so running a clean twice leaves the same
//! end state. Failures are reported as [`BuildError::Deletion`] and never
//! retried.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use colored::Colorize;
use humansize::{DECIMAL, format_size};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use crate::{config::ExecutionOptions, error::BuildError, utils::directory_size};

/// Outcome of cleaning one target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    /// The path that was cleaned
    pub target: PathBuf,

    /// Whether anything existed at the target before the clean
    pub existed: bool,

    /// Bytes freed, or that would be freed in a dry run
    pub freed_bytes: u64,

    /// Whether this was only a dry run
    pub dry_run: bool,

    /// Whether the target was moved to the system trash
    pub trashed: bool,
}

/// Deletes build output directories.
pub struct Cleaner {
    options: ExecutionOptions,

    /// When `true`, suppresses the progress bar (used by `--json` mode).
    quiet: bool,
}

impl Cleaner {
    #[must_use]
    pub const fn new(options: ExecutionOptions) -> Self {
        Self {
            options,
            quiet: false,
        }
    }

    /// Enable or disable quiet mode (suppresses progress output).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub const fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    /// Recursively delete `target`.
    ///
    /// A directory is removed with everything below it; a plain file or a
    /// symlink at the target is removed as a single entry without following it.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Deletion`] if the target cannot be inspected or
    /// the filesystem refuses the removal (permissions, busy files, I/O faults).
    pub fn clean_dir(&self, target: &Path) -> Result<CleanReport, BuildError> {
        let metadata = match fs::symlink_metadata(target) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(self.report(target, false, 0));
            }
            Err(e) => return Err(BuildError::deletion(target, e)),
        };

        let size = if metadata.is_dir() {
            directory_size(target)
        } else {
            metadata.len()
        };

        if self.options.dry_run {
            return Ok(self.report(target, true, size));
        }

        match self.remove(target, metadata.is_dir()) {
            Ok(()) => Ok(self.report(target, true, size)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.report(target, false, 0)),
            Err(e) => Err(BuildError::deletion(target, e)),
        }
    }

    /// Clean several targets in parallel.
    ///
    /// Reports come back in the order of `targets`.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError::Deletion`] for one of the failed targets if any
    /// removal fails. Targets that were already removed stay removed.
    pub fn clean_all(&self, targets: &[PathBuf]) -> Result<Vec<CleanReport>, BuildError> {
        if targets.len() == 1 {
            return Ok(vec![self.clean_dir(&targets[0])?]);
        }

        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(targets.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
            }
            pb
        };

        let reports = targets
            .par_iter()
            .map(|target| {
                let report = self.clean_dir(target);
                if let Ok(report) = &report {
                    progress.set_message(format!(
                        "Cleaned {} ({})",
                        target
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("unknown"),
                        format_size(report.freed_bytes, DECIMAL)
                    ));
                }
                progress.inc(1);
                report
            })
            .collect::<Result<Vec<_>, _>>();

        progress.finish_and_clear();

        reports
    }

    fn remove(&self, target: &Path, is_dir: bool) -> io::Result<()> {
        if self.options.use_trash {
            return trash::delete(target).map_err(|e| io::Error::other(e.to_string()));
        }

        if is_dir {
            fs::remove_dir_all(target)
        } else {
            fs::remove_file(target)
        }
    }

    fn report(&self, target: &Path, existed: bool, freed_bytes: u64) -> CleanReport {
        CleanReport {
            target: target.to_path_buf(),
            existed,
            freed_bytes,
            dry_run: self.options.dry_run,
            trashed: existed && !self.options.dry_run && self.options.use_trash,
        }
    }

    /// Print a summary of a finished clean.
    ///
    /// # Output Format
    ///
    /// ```text
    /// 🧹 Cleaned /home/user/myapp/build (12.3 MB)
    ///
    /// 📊 Cleanup Summary:
    ///   ✅ Cleaned: 1 directories
    ///   💾 Total space freed: 12.3 MB
    /// ```
    pub fn print_summary(reports: &[CleanReport]) {
        let dry_run = reports.iter().any(|r| r.dry_run);
        let total: u64 = reports.iter().map(|r| r.freed_bytes).sum();

        for report in reports {
            let path = report.target.display();
            let size = format_size(report.freed_bytes, DECIMAL);

            if !report.existed {
                println!("✨ {} {}", path, "is already clean".green());
            } else if report.dry_run {
                println!("🧪 Would delete {path} ({})", size.bright_white());
            } else if report.trashed {
                println!("🗑️  Moved {path} to the trash ({})", size.bright_white());
            } else {
                println!("🧹 Cleaned {path} ({})", size.bright_white());
            }
        }

        if dry_run {
            println!(
                "\n{} {}",
                "🧪 Dry run complete!".yellow(),
                format!("Would free up {}", format_size(total, DECIMAL)).bright_white()
            );
            return;
        }

        let cleaned = reports.iter().filter(|r| r.existed).count();
        println!("\n{}", "📊 Cleanup Summary:".bold());
        println!(
            "  ✅ Cleaned: {} directories",
            cleaned.to_string().green()
        );
        println!(
            "  💾 Total space freed: {}",
            format_size(total, DECIMAL).bright_green().bold()
        );
    }
}
