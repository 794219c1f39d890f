//! Per-package-manager state: what the tool reports as installed, and what
//! the project's requirements file says should be.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use picky_requirements::{Dialect, RequirementSet};
use tracing::{debug, error, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Manager {
    Pip,
    Conda,
}

impl Manager {
    pub fn name(self) -> &'static str {
        match self {
            Manager::Pip => "pip",
            Manager::Conda => "conda",
        }
    }

    /// Arguments that make the tool list its installed packages.
    pub fn list_args(self) -> &'static [&'static str] {
        match self {
            Manager::Pip => &["--disable-pip-version-check", "freeze"],
            Manager::Conda => &["list", "-e"],
        }
    }

    /// Label naming the installed listing in findings.
    pub fn used_label(self) -> &'static str {
        match self {
            Manager::Pip => "pip freeze",
            Manager::Conda => "conda list -e",
        }
    }

    pub fn dialect(self) -> Dialect {
        match self {
            Manager::Pip => Dialect::PIP,
            Manager::Conda => Dialect::CONDA,
        }
    }
}

pub struct Handler {
    pub manager: Manager,
    /// Resolved tool location, `None` if it could not be found.
    pub executable: Option<PathBuf>,
    /// Requirements file that [`Handler::specified`] was read from.
    pub path: PathBuf,
    pub used: RequirementSet,
    pub specified: RequirementSet,
}

impl Handler {
    /// Query `command` for installed packages and read the requirements
    /// file at `path`. Either may be absent.
    pub fn load(manager: Manager, command: &str, path: &Path) -> Result<Self> {
        let dialect = manager.dialect();
        let executable = which::which(command).ok();

        let used = match &executable {
            Some(exe) => {
                info!("Using '{}' for {}", exe.display(), manager.name());
                let listing = run_captured(exe, manager.list_args())?;
                RequirementSet::parse(&listing, dialect, manager.used_label())
            }
            None => {
                debug!("No {} found", manager.name());
                RequirementSet::empty(dialect, manager.used_label())
            }
        };

        let label = file_label(path);
        let specified = if path.exists() {
            info!("Using '{}' for {}", path.display(), manager.name());
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if executable.is_none() {
                error!("'{}' found but {} missing", path.display(), manager.name());
            }
            RequirementSet::parse(&text, dialect, label)
        } else {
            debug!("No requirements file found for {}", manager.name());
            RequirementSet::empty(dialect, label)
        };

        Ok(Self {
            manager,
            executable,
            path: path.to_path_buf(),
            used,
            specified,
        })
    }

    pub fn is_available(&self) -> bool {
        self.executable.is_some()
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run `executable` with `args`, returning its stdout. Stderr is discarded.
pub fn run_captured(executable: &Path, args: &[&str]) -> Result<String> {
    debug!(executable = %executable.display(), ?args, "running");
    let output = Command::new(executable)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .with_context(|| format!("failed to run {}", executable.display()))?;
    if !output.status.success() {
        bail!(
            "'{} {}' failed with {}",
            executable.display(),
            args.join(" "),
            output.status
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
