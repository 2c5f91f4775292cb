//! Sub-project representation.
//!
//! ## Main Parts
//!
//! - [`Subproject`] - A module of the root project with its relocated output directory
//! - [`Subprojects`] - The ordered collection produced by the relocator

#[allow(clippy::module_inception)]
pub mod project;
pub mod projects;

pub use project::{Subproject, normalize_project_path, project_name};
pub use projects::Subprojects;
