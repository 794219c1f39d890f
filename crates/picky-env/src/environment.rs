//! The conda environment descriptor (`environment.yml`).

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EnvError, Result};
use crate::spec::PackageSpec;

/// The on-disk YAML shape.
#[derive(Debug, Default, Deserialize, Serialize)]
struct RawEnvironment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    channels: Vec<String>,
    #[serde(default)]
    dependencies: Vec<RawDependency>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
enum RawDependency {
    Conda(String),
    Pip { pip: Vec<String> },
}

/// A named, channel-scoped set of conda, pip, and editable packages.
///
/// Each grouping keeps the order the packages were read in. Conda and pip
/// packages are keyed by name, editable packages by path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvironmentDescriptor {
    pub name: Option<String>,
    pub channels: Vec<String>,
    pub conda: IndexMap<String, PackageSpec>,
    pub pip: IndexMap<String, PackageSpec>,
    pub develop: IndexMap<String, PackageSpec>,
}

impl EnvironmentDescriptor {
    /// Parse the YAML written by `conda env export`.
    ///
    /// Missing keys default to empty, an empty document is an empty
    /// environment, and keys picky does not use (such as `prefix`) are
    /// dropped.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let raw: RawEnvironment = if yaml.trim().is_empty() {
            RawEnvironment::default()
        } else {
            serde_yaml::from_str::<Option<RawEnvironment>>(yaml)?.unwrap_or_default()
        };

        let mut env = EnvironmentDescriptor {
            name: raw.name,
            channels: raw.channels,
            ..Default::default()
        };
        for dependency in raw.dependencies {
            match dependency {
                RawDependency::Conda(entry) => env.insert(PackageSpec::parse_conda(&entry)),
                RawDependency::Pip { pip } => {
                    for entry in pip {
                        env.insert(PackageSpec::parse_pip(&entry)?);
                    }
                }
            }
        }
        Ok(env)
    }

    /// Read and parse an environment file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| EnvError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "read environment");
        Self::from_yaml_str(&yaml)
    }

    /// File `spec` in the grouping its syntax belongs to.
    pub fn insert(&mut self, spec: PackageSpec) {
        let group = match spec {
            PackageSpec::Conda { .. } => &mut self.conda,
            PackageSpec::Pip { .. } => &mut self.pip,
            PackageSpec::Editable { .. } => &mut self.develop,
        };
        group.insert(spec.key().to_string(), spec);
    }

    /// Render as YAML in the layout `conda env export` uses.
    ///
    /// Conda packages come first; pip and editable packages share a single
    /// trailing `pip:` block, only written if either is non-empty.
    pub fn to_yaml_string(&self) -> Result<String> {
        let mut dependencies: Vec<RawDependency> = self
            .conda
            .values()
            .map(|spec| RawDependency::Conda(spec.to_string()))
            .collect();
        if !self.pip.is_empty() || !self.develop.is_empty() {
            let pip = self
                .pip
                .values()
                .chain(self.develop.values())
                .map(ToString::to_string)
                .collect();
            dependencies.push(RawDependency::Pip { pip });
        }

        let raw = RawEnvironment {
            name: self.name.clone().filter(|name| !name.is_empty()),
            channels: self.channels.clone(),
            dependencies,
        };
        Ok(serde_yaml::to_string(&raw)?)
    }

    /// A copy with `ignore`d packages dropped and every `develop` package
    /// turned into an editable install from its path.
    pub fn modified(&self, ignore: &BTreeSet<String>, develop: &IndexMap<String, String>) -> Self {
        let mut env = self.clone();
        for name in ignore {
            let in_conda = env.conda.shift_remove(name).is_some();
            let in_pip = env.pip.shift_remove(name).is_some();
            if in_conda || in_pip {
                debug!(%name, "ignored package dropped");
            }
        }
        for (name, path) in develop {
            env.pip.shift_remove(name);
            env.insert(PackageSpec::editable(path.as_str()));
        }
        env
    }

    /// Total number of packages across all groupings.
    pub fn len(&self) -> usize {
        self.conda.len() + self.pip.len() + self.develop.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
