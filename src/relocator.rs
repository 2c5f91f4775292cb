//! Build output relocation.
//!
//! The relocator computes the shared build directory from the project root and
//! rebinds every sub-project's output directory to `<shared>/<name>`. Path
//! handling is purely lexical so configuration never touches the filesystem.

use std::{
    collections::HashMap,
    path::{Component, Path, PathBuf},
};

use crate::{
    error::BuildError,
    project::{Subproject, Subprojects, normalize_project_path, project_name},
};

/// Default location of the shared build directory, relative to the project root.
pub const DEFAULT_BUILD_DIR: &str = "../../build";

/// Resolve `relative` against the absolute directory `base`.
///
/// `.` components are dropped and every `..` removes the preceding component.
/// An absolute `relative` is normalised on its own, ignoring `base`.
///
/// # Errors
///
/// Returns [`BuildError::PathResolution`] if:
/// - `base` is not absolute
/// - `relative` is empty
/// - a `..` component would climb above the filesystem root
///
/// # Examples
///
/// ```
/// # use std::path::{Path, PathBuf};
/// # use shared_build::relocator::resolve_path;
/// let shared = resolve_path(Path::new("/home/user/myapp/android"), Path::new("../../build"))?;
/// assert_eq!(shared, PathBuf::from("/home/user/myapp/build"));
/// # Ok::<(), shared_build::error::BuildError>(())
/// ```
pub fn resolve_path(base: &Path, relative: &Path) -> Result<PathBuf, BuildError> {
    if relative.as_os_str().is_empty() {
        return Err(BuildError::path_resolution(base, relative, "path is empty"));
    }

    if !base.is_absolute() && !relative.is_absolute() {
        return Err(BuildError::path_resolution(
            base,
            relative,
            "base directory is not absolute",
        ));
    }

    let joined = base.join(relative);
    let mut resolved = PathBuf::new();
    let mut depth = 0usize;

    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                resolved.push(component.as_os_str());
                depth = 0;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(BuildError::path_resolution(
                        base,
                        relative,
                        "climbs above the filesystem root",
                    ));
                }
                resolved.pop();
                depth -= 1;
            }
            Component::Normal(part) => {
                resolved.push(part);
                depth += 1;
            }
        }
    }

    Ok(resolved)
}

/// Check that a module name can be used as a single directory name.
fn validate_name(project_path: &str, name: &str) -> Result<(), BuildError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name is a relative path component")
    } else if name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(BuildError::InvalidSubprojectName {
            name: project_path.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Assign every sub-project the output directory `shared_dir/<name>`.
///
/// Project paths may be bare names (`app`) or Gradle paths (`:libs:core`); the
/// output directory is keyed by the last path segment. Exact repeats of the
/// same project path are collapsed. Nothing is returned unless every
/// sub-project could be relocated.
///
/// # Errors
///
/// - [`BuildError::InvalidSubprojectName`] if a name is empty, `.`, `..` or
///   contains a path separator
/// - [`BuildError::DuplicateSubproject`] if two different project paths share
///   a module name
pub fn relocate<S: AsRef<str>>(
    shared_dir: &Path,
    project_paths: &[S],
) -> Result<Subprojects, BuildError> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut subprojects = Vec::with_capacity(project_paths.len());

    for project_path in project_paths {
        let path = normalize_project_path(project_path.as_ref());
        let name = project_name(&path);
        validate_name(&path, name)?;

        if let Some(first) = seen.get(name) {
            if *first == path {
                continue;
            }
            return Err(BuildError::DuplicateSubproject {
                name: name.to_string(),
                first: first.clone(),
                second: path,
            });
        }

        seen.insert(name.to_string(), path.clone());
        subprojects.push(Subproject::new(&path, shared_dir.join(name)));
    }

    Ok(subprojects.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_build_dir() {
        let resolved = resolve_path(
            Path::new("/home/user/myapp/android"),
            Path::new(DEFAULT_BUILD_DIR),
        )
        .unwrap();

        assert_eq!(resolved, PathBuf::from("/home/user/myapp/build"));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let base = Path::new("/work/project/android");
        let first = resolve_path(base, Path::new("../../build")).unwrap();
        let second = resolve_path(base, Path::new("../../build")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_drops_cur_dir() {
        let resolved = resolve_path(Path::new("/a/./b"), Path::new("./c/../d")).unwrap();
        assert_eq!(resolved, PathBuf::from("/a/b/d"));
    }

    #[test]
    fn test_resolve_absolute_relative() {
        let resolved = resolve_path(Path::new("/ignored"), Path::new("/opt/out/../build")).unwrap();
        assert_eq!(resolved, PathBuf::from("/opt/build"));
    }

    #[test]
    fn test_resolve_above_root_fails() {
        let result = resolve_path(Path::new("/android"), Path::new("../../build"));
        assert!(matches!(result, Err(BuildError::PathResolution { .. })));
    }

    #[test]
    fn test_resolve_relative_base_fails() {
        let result = resolve_path(Path::new("android"), Path::new("../../build"));
        assert!(matches!(result, Err(BuildError::PathResolution { .. })));
    }

    #[test]
    fn test_resolve_empty_fails() {
        let result = resolve_path(Path::new("/android"), Path::new(""));
        assert!(matches!(result, Err(BuildError::PathResolution { .. })));
    }

    #[test]
    fn test_relocate_app() {
        let shared = PathBuf::from("/home/user/myapp/build");
        let subprojects = relocate(&shared, &["app"]).unwrap();

        assert_eq!(subprojects.len(), 1);
        assert_eq!(
            subprojects.find("app").unwrap().output_dir,
            PathBuf::from("/home/user/myapp/build/app")
        );
    }

    #[test]
    fn test_relocate_outputs_are_distinct_descendants() {
        let shared = PathBuf::from("/home/user/myapp/build");
        let subprojects =
            relocate(&shared, &[":app", ":libs:core", ":feature:login", "wear"]).unwrap();

        let dirs: Vec<&Path> = subprojects.iter().map(Subproject::output_dir).collect();
        for (i, dir) in dirs.iter().enumerate() {
            assert!(dir.starts_with(&shared));
            assert_ne!(*dir, shared.as_path());
            for other in &dirs[i + 1..] {
                assert_ne!(dir, other);
            }
        }
    }

    #[test]
    fn test_relocate_collapses_exact_repeats() {
        let subprojects = relocate(Path::new("/build"), &[":app", "app"]).unwrap();
        assert_eq!(subprojects.len(), 1);
    }

    #[test]
    fn test_relocate_rejects_name_collision() {
        let result = relocate(Path::new("/build"), &[":feature:core", ":libs:core"]);

        match result {
            Err(BuildError::DuplicateSubproject {
                name,
                first,
                second,
            }) => {
                assert_eq!(name, "core");
                assert_eq!(first, ":feature:core");
                assert_eq!(second, ":libs:core");
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn test_relocate_rejects_invalid_names() {
        for bad in ["", ":", "..", ":libs:..", "a/b"] {
            let result = relocate(Path::new("/build"), &[bad]);
            assert!(
                matches!(result, Err(BuildError::InvalidSubprojectName { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
