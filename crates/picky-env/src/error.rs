//! Error types for the environment crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing environment descriptors.
#[derive(Debug, Error)]
pub enum EnvError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The text is not a valid environment descriptor.
    #[error("invalid environment: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration file is not valid.
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A pip dependency entry could not be understood.
    #[error("invalid pip dependency: {0:?}")]
    InvalidDependency(String),
}

/// Convenience type alias for environment operations.
pub type Result<T> = std::result::Result<T, EnvError>;
