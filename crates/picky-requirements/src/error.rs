//! Error types for the reconciliation engine.

use thiserror::Error;

/// Errors that can occur while mutating a requirement set.
///
/// Every variant is a contract violation by the caller: the engine never
/// fails on user data, only on operations that target packages it does not
/// know about.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequirementsError {
    /// The package is not an active declaration in the listing.
    #[error("{package} is not declared in {source_label}")]
    NotDeclared {
        package: String,
        source_label: String,
    },
}

/// Convenience type alias for requirement set operations.
pub type Result<T> = std::result::Result<T, RequirementsError>;
