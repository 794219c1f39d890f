//! Individual package entries of an environment descriptor.

use std::fmt;

use crate::error::{EnvError, Result};

/// A single dependency, remembering which syntax it was written in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PackageSpec {
    /// `name[=version[=build]]`, managed by conda.
    Conda {
        name: String,
        version: Option<String>,
        build: Option<String>,
    },
    /// `name[==version]`, managed by pip.
    Pip {
        name: String,
        version: Option<String>,
    },
    /// `-e path`, installed by pip from local source.
    Editable { path: String },
}

impl PackageSpec {
    pub fn conda(name: impl Into<String>, version: Option<&str>, build: Option<&str>) -> Self {
        PackageSpec::Conda {
            name: name.into(),
            version: version.map(str::to_string),
            build: build.map(str::to_string),
        }
    }

    pub fn pip(name: impl Into<String>, version: Option<&str>) -> Self {
        PackageSpec::Pip {
            name: name.into(),
            version: version.map(str::to_string),
        }
    }

    pub fn editable(path: impl Into<String>) -> Self {
        PackageSpec::Editable { path: path.into() }
    }

    /// Parse a conda dependency string. Anything after the second `=` is the
    /// build string.
    pub fn parse_conda(entry: &str) -> Self {
        let mut parts = entry.splitn(3, '=');
        PackageSpec::Conda {
            name: parts.next().unwrap_or_default().to_string(),
            version: parts.next().map(str::to_string),
            build: parts.next().map(str::to_string),
        }
    }

    /// Parse an entry from a `pip:` block: either `-e path` or
    /// `name[==version]`.
    pub fn parse_pip(entry: &str) -> Result<Self> {
        if let Some(path) = entry.strip_prefix("-e") {
            let path = path.trim();
            if path.is_empty() || path.contains(char::is_whitespace) {
                return Err(EnvError::InvalidDependency(entry.to_string()));
            }
            return Ok(PackageSpec::editable(path));
        }
        let spec = match entry.split_once("==") {
            Some((name, version)) => PackageSpec::pip(name.trim(), Some(version.trim())),
            None => PackageSpec::pip(entry.trim(), None),
        };
        if spec.key().is_empty() {
            return Err(EnvError::InvalidDependency(entry.to_string()));
        }
        Ok(spec)
    }

    /// The key this entry is filed under: the package name, or the path for
    /// editable installs.
    pub fn key(&self) -> &str {
        match self {
            PackageSpec::Conda { name, .. } | PackageSpec::Pip { name, .. } => name,
            PackageSpec::Editable { path } => path,
        }
    }

}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageSpec::Conda {
                name,
                version,
                build,
            } => {
                write!(f, "{name}")?;
                for part in [version, build].into_iter().flatten() {
                    write!(f, "={part}")?;
                }
                Ok(())
            }
            PackageSpec::Pip { name, version } => match version {
                Some(version) => write!(f, "{name}=={version}"),
                None => write!(f, "{name}"),
            },
            PackageSpec::Editable { path } => write!(f, "-e {path}"),
        }
    }
}
