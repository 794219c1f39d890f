//! Conda environment descriptors for picky.
//!
//! Parses the YAML written by `conda env export`, filters it through the
//! project's `picky.yaml`, writes it back out as a concrete lock file, and
//! compares two descriptors with a unified text diff.
//!
//! # Key Types
//!
//! - [`EnvironmentDescriptor`] / [`PackageSpec`] -- Channels plus conda, pip and editable packages
//! - [`EnvironmentDiff`] -- Expected-vs-actual comparison with an exit status
//! - [`UnifiedDiff`] / [`DiffHunk`] / [`DiffLine`] -- Line-level unified diff
//! - [`PickyConfig`] -- Ignore list, develop packages, and export detail

pub mod compare;
pub mod config;
pub mod environment;
pub mod error;
pub mod spec;
pub mod unified;

pub use compare::{diff_environments, EnvironmentDiff};
pub use config::{Detail, PickyConfig};
pub use environment::EnvironmentDescriptor;
pub use error::{EnvError, Result};
pub use spec::PackageSpec;
pub use unified::{diff_lines, DiffHunk, DiffLine, UnifiedDiff};
