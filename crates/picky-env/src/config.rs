//! Project configuration (`picky.yaml`).
//!
//! ```yaml
//! ignore:
//!   # mac-only:
//!   - appnope
//! develop:
//!   mypackage: .
//! detail: version
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EnvError, Result};

/// How much of each conda package to pin in the lock file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    /// `name=version`
    Version,
    /// `name=version=build`
    #[default]
    Build,
}

impl Detail {
    pub fn includes_build(self) -> bool {
        self == Detail::Build
    }
}

/// Settings read from `picky.yaml`. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PickyConfig {
    /// Packages left out of the lock file entirely.
    pub ignore: BTreeSet<String>,
    /// Packages installed from local source, mapped to their path.
    pub develop: IndexMap<String, String>,
    pub detail: Detail,
}

impl PickyConfig {
    pub fn from_yaml_str(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str::<Option<Self>>(yaml)?.unwrap_or_default())
    }

    /// Load the configuration at `path`, falling back to defaults if the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let yaml = std::fs::read_to_string(path).map_err(|source| EnvError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml).map_err(|source| EnvError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
