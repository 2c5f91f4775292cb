//! Package repository declarations.
//!
//! The registry only records which repositories a build consults and in which
//! order. Resolving dependencies against them is left to the build engine, so
//! nothing here validates reachability or rejects duplicates.

use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

/// A single package registry a build resolves dependencies from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RepositorySource {
    /// Google's Maven repository (Android Gradle plugin, `AndroidX`)
    Google,

    /// Maven Central
    MavenCentral,

    /// The Gradle plugin portal
    GradlePluginPortal,

    /// The local `~/.m2/repository` cache
    MavenLocal,

    /// A custom Maven repository reached through a URL
    Maven(String),

    /// Any other identifier, kept verbatim
    Other(String),
}

impl RepositorySource {
    /// Parse a repository identifier as written in a build file.
    ///
    /// A trailing `()` is ignored so both `google` and `google()` are accepted.
    #[must_use]
    pub fn parse(identifier: &str) -> Self {
        let trimmed = identifier.trim();
        let name = trimmed.strip_suffix("()").unwrap_or(trimmed);

        match name {
            "google" => Self::Google,
            "mavenCentral" => Self::MavenCentral,
            "gradlePluginPortal" => Self::GradlePluginPortal,
            "mavenLocal" => Self::MavenLocal,
            url if is_url(url) => Self::Maven(url.to_string()),
            other => Self::Other(other.to_string()),
        }
    }

    /// The identifier this source is declared with.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Google => "google",
            Self::MavenCentral => "mavenCentral",
            Self::GradlePluginPortal => "gradlePluginPortal",
            Self::MavenLocal => "mavenLocal",
            Self::Maven(value) | Self::Other(value) => value,
        }
    }

    /// The remote endpoint of the repository, if it has one.
    ///
    /// `mavenLocal` and opaque identifiers have no known URL.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Google => Some("https://dl.google.com/dl/android/maven2/"),
            Self::MavenCentral => Some("https://repo.maven.apache.org/maven2/"),
            Self::GradlePluginPortal => Some("https://plugins.gradle.org/m2/"),
            Self::Maven(url) => Some(url),
            Self::MavenLocal | Self::Other(_) => None,
        }
    }
}

fn is_url(value: &str) -> bool {
    ["http://", "https://", "file://"]
        .iter()
        .any(|scheme| value.starts_with(scheme))
}

impl From<String> for RepositorySource {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for RepositorySource {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<RepositorySource> for String {
    fn from(source: RepositorySource) -> Self {
        source.identifier().to_string()
    }
}

impl Display for RepositorySource {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.identifier())
    }
}

/// Ordered, append-only list of repositories.
///
/// Earlier entries take precedence when the build engine resolves a
/// dependency, so insertion order is preserved exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Repositories(Vec<RepositorySource>);

impl Repositories {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append sources after any already registered ones.
    pub fn register_repositories<I>(&mut self, sources: I)
    where
        I: IntoIterator,
        I::Item: Into<RepositorySource>,
    {
        self.0.extend(sources.into_iter().map(Into::into));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RepositorySource> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[RepositorySource] {
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
}

impl<'a> IntoIterator for &'a Repositories {
    type Item = &'a RepositorySource;
    type IntoIter = std::slice::Iter<'a, RepositorySource>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
