//! Sub-project discovery.
//!
//! When the build file does not list its sub-projects, they are enumerated the
//! way Gradle does it: from the `include` statements of the settings script.
//! Projects without a settings script fall back to walking the directory tree
//! for module build scripts.

use std::{fs, path::Path};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use crate::{config::DiscoveryOptions, project::normalize_project_path};

/// Settings scripts, in lookup order.
const SETTINGS_FILES: &[&str] = &["settings.gradle.kts", "settings.gradle"];

/// Module build scripts marking a directory as a sub-project.
const BUILD_SCRIPTS: &[&str] = &["build.gradle.kts", "build.gradle"];

/// Deepest directory level searched below the project root.
const MAX_MODULE_DEPTH: usize = 3;

/// Discovers the sub-projects of a root project.
pub struct Scanner {
    options: DiscoveryOptions,

    /// When `true`, suppresses the progress spinner (used by `--json` mode).
    quiet: bool,
}

impl Scanner {
    #[must_use]
    pub const fn new(options: DiscoveryOptions) -> Self {
        Self {
            options,
            quiet: false,
        }
    }

    /// Enable or disable quiet mode (suppresses progress spinner).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Find the sub-project paths of the root project in `project_dir`.
    ///
    /// The settings script wins when present; otherwise module directories are
    /// discovered by walking the tree and returned sorted.
    pub fn discover(&self, project_dir: &Path) -> Vec<String> {
        for file_name in SETTINGS_FILES {
            let settings_path = project_dir.join(file_name);
            if !settings_path.is_file() {
                continue;
            }

            match fs::read_to_string(&settings_path) {
                Ok(content) => return parse_settings(&content),
                Err(e) => {
                    if self.options.verbose {
                        eprintln!(
                            "{} {}: {e}",
                            "Warning: Failed to read".yellow(),
                            settings_path.display()
                        );
                    }
                }
            }
        }

        self.walk_modules(project_dir)
    }

    fn walk_modules(&self, project_dir: &Path) -> Vec<String> {
        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                pb.set_style(style);
            }
            pb.set_message("Looking for modules...");
            pb
        };

        let mut errors = Vec::new();
        let candidates: Vec<DirEntry> = WalkDir::new(project_dir)
            .min_depth(1)
            .max_depth(MAX_MODULE_DEPTH)
            .into_iter()
            .filter_entry(|entry| self.should_walk(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    errors.push(e.to_string());
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .collect();

        let mut modules: Vec<String> = candidates
            .into_par_iter()
            .filter(|entry| is_module_dir(entry.path()))
            .filter_map(|entry| module_project_path(project_dir, entry.path()))
            .collect();
        modules.sort();

        progress.finish_and_clear();

        if self.options.verbose {
            for error in &errors {
                eprintln!("{}", error.red());
            }
        }

        modules
    }

    /// Skip hidden directories, nested build outputs and configured skips.
    fn should_walk(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return true;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || name == "build" {
            return false;
        }

        !self
            .options
            .skip
            .iter()
            .any(|skip| entry.path().ends_with(skip))
    }
}

fn is_module_dir(path: &Path) -> bool {
    BUILD_SCRIPTS.iter().any(|script| path.join(script).is_file())
}

/// Turn `<root>/libs/core` into `:libs:core`.
fn module_project_path(project_dir: &Path, module_dir: &Path) -> Option<String> {
    let relative = module_dir.strip_prefix(project_dir).ok()?;
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(format!(":{}", segments.join(":")))
    }
}

/// Extract the project paths declared by `include` statements of a Gradle
/// settings script, in declaration order.
///
/// Handles both the Kotlin form `include(":app", ":core")`, possibly spread
/// over several lines, and the Groovy form `include ':app', ':core'`. Line
/// comments and `includeBuild` are ignored and exact repeats are dropped.
#[must_use]
pub fn parse_settings(content: &str) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    let mut open_parens = 0i32;

    for raw_line in content.lines() {
        let line = strip_line_comment(raw_line).trim();

        let arguments = if open_parens > 0 {
            line
        } else if let Some(arguments) = include_arguments(line) {
            arguments
        } else {
            continue;
        };

        open_parens += paren_balance(arguments);

        for quoted in quoted_strings(arguments) {
            let path = normalize_project_path(&quoted);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }

        if open_parens < 0 {
            open_parens = 0;
        }
    }

    paths
}

/// The text following an `include` keyword, if the line is an include statement.
fn include_arguments(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("include")?;

    match rest.chars().next() {
        Some('(' | '"' | '\'') => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        _ => None,
    }
}

fn paren_balance(text: &str) -> i32 {
    let mut balance = 0;
    let mut quote: Option<char> = None;

    for c in text.chars() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '(') => balance += 1,
            (None, ')') => balance -= 1,
            _ => {}
        }
    }

    balance
}

fn strip_line_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut previous = '\0';

    for (index, c) in line.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '/') if previous == '/' => return &line[..index - 1],
            _ => {}
        }
        previous = c;
    }

    line
}

fn quoted_strings(text: &str) -> Vec<String> {
    let mut strings = Vec::new();
    let mut quote: Option<char> = None;
    let mut value = String::new();

    for c in text.chars() {
        match quote {
            None if c == '"' || c == '\'' => quote = Some(c),
            None => {}
            Some(q) if c == q => {
                strings.push(std::mem::take(&mut value));
                quote = None;
            }
            Some(_) => value.push(c),
        }
    }

    strings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_parse_kotlin_settings() {
        let content = r#"
pluginManagement {
    repositories { google() }
}
rootProject.name = "myapp"
include(":app")
include(":libs:core", ":feature:login")
"#;

        assert_eq!(
            parse_settings(content),
            vec![":app", ":libs:core", ":feature:login"]
        );
    }

    #[test]
    fn test_parse_groovy_settings() {
        let content = "include ':app', ':wear'\ninclude 'tv'\n";
        assert_eq!(parse_settings(content), vec![":app", ":wear", ":tv"]);
    }

    #[test]
    fn test_parse_multiline_include() {
        let content = r#"
include(
    ":app",
    ":libs:core", // shared code
)
rootProject.name = "not-a-module"
"#;

        assert_eq!(parse_settings(content), vec![":app", ":libs:core"]);
    }

    #[test]
    fn test_parse_ignores_comments_and_include_build() {
        let content = r#"
// include(":old")
includeBuild("build-logic")
include(":app") // include(":commented")
include(":app")
"#;

        assert_eq!(parse_settings(content), vec![":app"]);
    }

    #[test]
    fn test_strip_line_comment_respects_quotes() {
        assert_eq!(
            strip_line_comment(r#"maven { url = "https://jitpack.io" } // x"#),
            r#"maven { url = "https://jitpack.io" } "#
        );
    }

    #[test]
    fn test_module_project_path() {
        let root = PathBuf::from("/p/android");

        assert_eq!(
            module_project_path(&root, &root.join("libs").join("core")),
            Some(":libs:core".to_string())
        );
        assert_eq!(module_project_path(&root, &root), None);
    }

    #[test]
    fn test_discover_prefers_settings() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("settings.gradle.kts"), "include(\":app\")").unwrap();
        fs::create_dir_all(tmp.path().join("other")).unwrap();
        fs::write(tmp.path().join("other/build.gradle.kts"), "").unwrap();

        let scanner = Scanner::new(DiscoveryOptions::default()).with_quiet(true);
        assert_eq!(scanner.discover(tmp.path()), vec![":app"]);
    }

    #[test]
    fn test_discover_walks_without_settings() {
        let tmp = TempDir::new().unwrap();
        for module in ["app", "libs/core", ".gradle/cache", "app/build/generated", "skipme"] {
            let dir = tmp.path().join(module);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("build.gradle"), "").unwrap();
        }
        fs::write(tmp.path().join("build.gradle.kts"), "").unwrap();

        let options = DiscoveryOptions {
            verbose: false,
            skip: vec![PathBuf::from("skipme")],
        };
        let scanner = Scanner::new(options).with_quiet(true);

        assert_eq!(scanner.discover(tmp.path()), vec![":app", ":libs:core"]);
    }
}
