//! Collection management for relocated sub-projects.
//!
//! This module provides the `Subprojects` struct which wraps the ordered list of
//! modules produced by the relocator, with lookup, summary reporting and
//! parallel iteration support.

use colored::Colorize;
use humansize::{DECIMAL, format_size};
use rayon::prelude::*;

use crate::utils::{directory_size, last_modified};

use super::Subproject;

/// An ordered collection of relocated sub-projects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subprojects(Vec<Subproject>);

impl From<Vec<Subproject>> for Subprojects {
    fn from(subprojects: Vec<Subproject>) -> Self {
        Self(subprojects)
    }
}

impl<'a> IntoParallelIterator for &'a Subprojects {
    type Iter = rayon::slice::Iter<'a, Subproject>;
    type Item = &'a Subproject;

    fn into_par_iter(self) -> Self::Iter {
        self.0.par_iter()
    }
}

impl<'a> IntoIterator for &'a Subprojects {
    type Item = &'a Subproject;
    type IntoIter = std::slice::Iter<'a, Subproject>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Subprojects {
    /// Find a sub-project by module name (`app`) or project path (`:app`).
    #[must_use]
    pub fn find(&self, name_or_path: &str) -> Option<&Subproject> {
        self.0
            .iter()
            .find(|s| s.name == name_or_path || s.path == name_or_path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subproject> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Subproject] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total size in bytes of every sub-project output directory on disk.
    ///
    /// Directories are measured in parallel; missing ones count as zero.
    #[must_use]
    pub fn get_total_size(&self) -> u64 {
        self.0
            .par_iter()
            .map(|s| directory_size(&s.output_dir))
            .sum()
    }

    /// Print one line per sub-project with its current output size and the
    /// time it was last written to.
    ///
    /// # Output Format
    ///
    /// ```text
    ///   📦 app (:app) → /home/user/myapp/build/app
    ///      12.3 MB, last built 2024-05-01 10:22
    ///   📦 core (:libs:core) → /home/user/myapp/build/core
    ///      not built yet
    /// ```
    pub fn print_summary(&self) {
        let sizes: Vec<u64> = self
            .0
            .par_iter()
            .map(|s| directory_size(&s.output_dir))
            .collect();

        for (subproject, size) in self.0.iter().zip(sizes) {
            println!("  {subproject}");

            match last_modified(&subproject.output_dir) {
                Some(modified) => println!(
                    "     {}, last built {}",
                    format_size(size, DECIMAL).bright_white(),
                    modified.format("%Y-%m-%d %H:%M")
                ),
                None => println!("     {}", "not built yet".dimmed()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> Subprojects {
        vec![
            Subproject::new(":app", PathBuf::from("/build/app")),
            Subproject::new(":libs:core", PathBuf::from("/build/core")),
        ]
        .into()
    }

    #[test]
    fn test_find_by_name_and_path() {
        let subprojects = sample();

        assert_eq!(subprojects.find("app").unwrap().path, ":app");
        assert_eq!(subprojects.find(":libs:core").unwrap().name, "core");
        assert!(subprojects.find("libs").is_none());
    }

    #[test]
    fn test_len_and_order() {
        let subprojects = sample();
        let names: Vec<&str> = subprojects.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(subprojects.len(), 2);
        assert_eq!(names, vec!["app", "core"]);
    }

    #[test]
    fn test_total_size_of_missing_dirs_is_zero() {
        let subprojects: Subprojects = vec![Subproject::new(
            ":app",
            PathBuf::from("/definitely/not/here/build/app"),
        )]
        .into();

        assert_eq!(subprojects.get_total_size(), 0);
    }
}
