//! Compare installed packages against requirements files and optionally
//! write the differences back.

use std::fs;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use picky_requirements::{Diff, Finding};
use tracing::{debug, warn};

use crate::handler::Handler;

/// Differences between installed and specified packages, per manager.
pub struct Drift {
    pub pip: Diff,
    pub conda: Diff,
}

impl Drift {
    /// Every finding, pip first.
    pub fn findings(&self) -> Vec<Finding> {
        let mut findings = self.pip.findings();
        findings.extend(self.conda.findings());
        findings
    }

    pub fn is_empty(&self) -> bool {
        self.pip.is_empty() && self.conda.is_empty()
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_empty() {
            0
        } else {
            1
        }
    }
}

/// Deduplicate packages both managers report, then diff each manager's
/// requirements file against what it reports.
///
/// Packages conda installs with the same version pip sees are left to conda;
/// a version mismatch means pip installed over it and pip owns the package.
pub fn detect(pip: &mut Handler, conda: &mut Handler, when: NaiveDateTime) -> Result<Drift> {
    conda.used.combine_with(&mut pip.used, when)?;
    Ok(Drift {
        pip: Diff::between(&pip.specified, &pip.used),
        conda: Diff::between(&conda.specified, &conda.used),
    })
}

/// Write `diff` into the handler's requirements file, creating it if
/// needed. Returns `false` without touching the file if there is nothing
/// to write, or if the manager could not be queried: an empty listing from
/// a missing tool says nothing about what should be pinned.
pub fn update(handler: &mut Handler, diff: &Diff, when: NaiveDateTime) -> Result<bool> {
    if diff.is_empty() {
        return Ok(false);
    }
    if !handler.is_available() {
        debug!(path = %handler.path.display(), "{} missing, not updating", handler.manager.name());
        return Ok(false);
    }
    warn!("Updating '{}'", handler.path.display());
    handler.specified.apply(diff, when)?;
    debug!(manager = handler.manager.name(), changes = diff.len(), "writing requirements");
    fs::write(&handler.path, handler.specified.serialise())
        .with_context(|| format!("failed to write {}", handler.path.display()))?;
    Ok(true)
}
