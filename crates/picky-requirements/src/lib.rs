//! Reconciliation engine for picky.
//!
//! Models a flat, line-oriented package listing (a `requirements.txt`, the
//! output of `pip freeze` or `conda list -e`), computes package-level diffs
//! between two listings, and writes those diffs back into the original text
//! without disturbing comments, ordering, or formatting.
//!
//! # Key Types
//!
//! - [`RequirementSet`] -- Line-accurate model of one listing
//! - [`Dialect`] -- Parse/render function pair for a listing syntax (`==` vs `=`)
//! - [`Diff`] / [`Finding`] -- Added/removed/changed classification and its diagnostics

pub mod dialect;
pub mod diff;
pub mod error;
pub mod requirements;

pub use dialect::Dialect;
pub use diff::{Diff, Finding};
pub use error::{RequirementsError, Result};
pub use requirements::{RequirementSet, TIMESTAMP_FORMAT};
