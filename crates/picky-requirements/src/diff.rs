//! Package-level diff between two requirement sets.
//!
//! A [`Diff`] classifies every package as added, removed, or changed, and
//! copies what it needs out of both inputs so it can outlive them (and be
//! applied to either, or to a third set).

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::requirements::RequirementSet;

/// The result of comparing an old (declared) set with a new (observed) one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diff {
    added: BTreeMap<String, String>,
    removed: BTreeMap<String, String>,
    changed: BTreeMap<String, (String, String)>,
    old_label: String,
    new_label: String,
}

impl Diff {
    /// Compare `old` with `new`.
    ///
    /// Packages only in `new` are added (with `new`'s version), packages only
    /// in `old` are removed (with `old`'s version), and packages in both with
    /// different versions are changed, mapped to `(old version, new version)`.
    pub fn between(old: &RequirementSet, new: &RequirementSet) -> Self {
        let mut diff = Diff {
            old_label: old.source_label().to_string(),
            new_label: new.source_label().to_string(),
            ..Diff::default()
        };

        for (package, old_version) in old.packages() {
            match new.version(package) {
                Some(new_version) if new_version != old_version => {
                    diff.changed.insert(
                        package.to_string(),
                        (old_version.to_string(), new_version.to_string()),
                    );
                }
                Some(_) => {}
                None => {
                    diff.removed.insert(package.to_string(), old_version.to_string());
                }
            }
        }

        for (package, new_version) in new.packages() {
            if !old.contains(package) {
                diff.added.insert(package.to_string(), new_version.to_string());
            }
        }

        diff
    }

    /// Packages only in the new set, with their new version.
    pub fn added(&self) -> &BTreeMap<String, String> {
        &self.added
    }

    /// Packages only in the old set, with their old version.
    pub fn removed(&self) -> &BTreeMap<String, String> {
        &self.removed
    }

    /// Packages in both sets at different versions, as `(old, new)`.
    pub fn changed(&self) -> &BTreeMap<String, (String, String)> {
        &self.changed
    }

    pub fn old_label(&self) -> &str {
        &self.old_label
    }

    pub fn new_label(&self) -> &str {
        &self.new_label
    }

    /// Returns `true` if the two sets declare exactly the same packages at
    /// the same versions. Nothing needs writing back in that case.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of classified packages.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    /// One diagnostic per classified package: added first, then changed,
    /// then removed, each ascending by package name.
    pub fn findings(&self) -> Vec<Finding> {
        let added = self.added.iter().map(|(package, version)| Finding::Added {
            package: package.clone(),
            version: version.clone(),
            missing_from: self.old_label.clone(),
        });
        let changed = self
            .changed
            .iter()
            .map(|(package, (old, new))| Finding::Changed {
                package: package.clone(),
                old_version: old.clone(),
                old_source: self.old_label.clone(),
                new_version: new.clone(),
                new_source: self.new_label.clone(),
            });
        let removed = self.removed.iter().map(|(package, version)| Finding::Removed {
            package: package.clone(),
            version: version.clone(),
            missing_from: self.new_label.clone(),
        });
        added.chain(changed).chain(removed).collect()
    }
}

/// A single reportable difference.
///
/// `Display` renders the one-line message picky logs for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Observed but not declared.
    Added {
        package: String,
        version: String,
        missing_from: String,
    },
    /// Declared and observed at different versions.
    Changed {
        package: String,
        old_version: String,
        old_source: String,
        new_version: String,
        new_source: String,
    },
    /// Declared but not observed.
    Removed {
        package: String,
        version: String,
        missing_from: String,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Added {
                package,
                version,
                missing_from,
            }
            | Finding::Removed {
                package,
                version,
                missing_from,
            } => write!(f, "{package} {version} missing from {missing_from}"),
            Finding::Changed {
                package,
                old_version,
                old_source,
                new_version,
                new_source,
            } => write!(
                f,
                "{package} {new_version} in {new_source} but {old_version} in {old_source}"
            ),
        }
    }
}
