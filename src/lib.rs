//! # shared-build
//!
//! Relocates the build output of every module of an Android project into one
//! shared directory and cleans it on demand.
//!
//! Work happens in two phases. [`config::configure`] evaluates the declarative
//! settings (repositories, shared build directory, sub-projects) into an
//! immutable [`config::BuildConfiguration`] without touching the filesystem.
//! [`task::execute`] then runs an [`task::Action`] such as a clean against
//! that configuration.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod output;
pub mod project;
pub mod relocator;
pub mod repository;
pub mod scanner;
pub mod task;
pub mod utils;
