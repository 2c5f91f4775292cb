//! Error types for configuration and cleanup.
//!
//! Every failure in the library surfaces as a [`BuildError`]. None of them are
//! recovered from locally: the caller reports the error and the user fixes the
//! underlying condition before re-running.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Library-wide error type.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A relative path could not be resolved against its base directory.
    #[error("Cannot resolve '{}' against '{}': {reason}", .relative.display(), .base.display())]
    PathResolution {
        base: PathBuf,
        relative: PathBuf,
        reason: String,
    },

    /// Removing a build output directory failed.
    #[error("Failed to delete {}: {source}", .path.display())]
    Deletion {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Two sub-projects would share the same output directory.
    #[error("Sub-projects '{first}' and '{second}' both map to output directory '{name}'")]
    DuplicateSubproject {
        name: String,
        first: String,
        second: String,
    },

    /// A sub-project name cannot be used as a directory name.
    #[error("Invalid sub-project name '{name}': {reason}")]
    InvalidSubprojectName { name: String, reason: String },

    /// A requested sub-project is not part of the configuration.
    #[error("Sub-project '{0}' is not part of this build")]
    UnknownSubproject(String),

    /// A configuration file could not be read or parsed.
    #[error("Invalid configuration in {}: {details}", .path.display())]
    Config { path: PathBuf, details: String },
}

impl BuildError {
    pub(crate) fn path_resolution(
        base: impl Into<PathBuf>,
        relative: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Self::PathResolution {
            base: base.into(),
            relative: relative.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn deletion(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Deletion {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_resolution_message() {
        let err = BuildError::path_resolution("/", "../../build", "climbs above the root");
        let message = err.to_string();

        assert!(message.contains("../../build"));
        assert!(message.contains("climbs above the root"));
    }

    #[test]
    fn test_deletion_keeps_source() {
        use std::error::Error;

        let err = BuildError::deletion(
            "/tmp/build",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );

        assert!(err.to_string().contains("/tmp/build"));
        assert!(err.source().is_some());
    }
}
