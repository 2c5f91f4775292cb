//! Configuration types and the configuration phase.
//!
//! This module contains the configuration files, the options that steer
//! discovery and cleaning, and [`configure`], which evaluates the declarative
//! settings into an immutable [`BuildConfiguration`].

pub mod build;
pub mod discovery;
pub mod execution;
pub mod file;

pub use build::{BuildConfiguration, BuildSettings, configure};
pub use discovery::DiscoveryOptions;
pub use execution::ExecutionOptions;
pub use file::{BuildFile, UserConfig};
