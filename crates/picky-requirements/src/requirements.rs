//! Line-accurate model of a package listing.
//!
//! A [`RequirementSet`] keeps the raw lines of a listing as the source of
//! truth for serialization, alongside an index of the packages those lines
//! declare. Mutations rewrite or append lines; everything else is preserved
//! byte-for-byte.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::dialect::Dialect;
use crate::diff::Diff;
use crate::error::{RequirementsError, Result};

/// Format of every timestamp picky writes into a listing.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where an active declaration lives and what it pins.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Declaration {
    line: usize,
    version: String,
}

/// One textual package listing, parsed with a [`Dialect`].
///
/// Lines the dialect does not recognise (comments, blank lines, lines
/// already annotated by picky) are kept as opaque text. If a package is
/// declared twice, the later line is the one tracked; the earlier line stays
/// in the text untouched.
#[derive(Clone, Debug)]
pub struct RequirementSet {
    lines: Vec<String>,
    declarations: BTreeMap<String, Declaration>,
    source_label: String,
    dialect: Dialect,
}

impl RequirementSet {
    /// Parse `text` into a requirement set.
    ///
    /// `source_label` names where the text came from (`"pip freeze"`,
    /// `"requirements.txt"`) and only appears in diagnostics.
    pub fn parse(text: &str, dialect: Dialect, source_label: impl Into<String>) -> Self {
        let mut set = Self::empty(dialect, source_label);
        for (i, line) in text.lines().enumerate() {
            if let Some((name, version)) = dialect.parse_line(line) {
                set.declarations.insert(name, Declaration { line: i, version });
            }
            set.lines.push(line.to_string());
        }
        set
    }

    /// A set with no lines at all.
    pub fn empty(dialect: Dialect, source_label: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            declarations: BTreeMap::new(),
            source_label: source_label.into(),
            dialect,
        }
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// The raw lines, including comments and annotations.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Version of an actively declared package.
    pub fn version(&self, package: &str) -> Option<&str> {
        self.declarations.get(package).map(|d| d.version.as_str())
    }

    /// Zero-based index of the line declaring `package`.
    pub fn line_of(&self, package: &str) -> Option<usize> {
        self.declarations.get(package).map(|d| d.line)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.declarations.contains_key(package)
    }

    /// Active declarations as `(name, version)`, ascending by name.
    pub fn packages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(name, d)| (name.as_str(), d.version.as_str()))
    }

    /// Number of active declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if no package is declared. Comment lines may remain.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Render the listing. Always ends with exactly one newline.
    pub fn serialise(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    /// Turn the line declaring `package` into `# {line} {message}` and stop
    /// tracking the package.
    pub fn comment_line(&mut self, package: &str, message: &str) -> Result<()> {
        let declaration = self.declarations.remove(package).ok_or_else(|| {
            RequirementsError::NotDeclared {
                package: package.to_string(),
                source_label: self.source_label.clone(),
            }
        })?;
        let line = &mut self.lines[declaration.line];
        *line = format!("# {line} {message}");
        Ok(())
    }

    /// Append a declaration for `package`.
    ///
    /// The package is tracked at the index of the line just written, so a
    /// later comment targeting it lands on that line.
    pub fn add_line(&mut self, package: &str, version: &str) {
        self.lines.push(self.dialect.serialise_line(package, version));
        self.declarations.insert(
            package.to_string(),
            Declaration {
                line: self.lines.len() - 1,
                version: version.to_string(),
            },
        );
    }

    /// Comment out `package`, recording when picky removed it.
    pub fn remove_line(&mut self, package: &str, when: NaiveDateTime) -> Result<()> {
        let message = format!("removed by picky on {}", when.format(TIMESTAMP_FORMAT));
        self.comment_line(package, &message)
    }

    /// Write `diff` into this listing.
    ///
    /// Added packages are appended under an "added" banner, changed packages
    /// have their old line commented and the new version appended under an
    /// "updated" banner, and removed packages are commented out. Each phase
    /// runs in ascending package order.
    pub fn apply(&mut self, diff: &Diff, when: NaiveDateTime) -> Result<()> {
        let stamp = when.format(TIMESTAMP_FORMAT).to_string();

        if !diff.added().is_empty() {
            self.lines.push(format!("# picky added the following on {stamp}:"));
            for (package, version) in diff.added() {
                self.add_line(package, version);
            }
        }

        if !diff.changed().is_empty() {
            self.lines.push(format!("# picky updated the following on {stamp}:"));
            for (package, (_, new)) in diff.changed() {
                self.comment_line(package, &format!("updated by picky to {new} on {stamp}"))?;
                self.add_line(package, new);
            }
        }

        for package in diff.removed().keys() {
            self.remove_line(package, when)?;
        }

        debug!(
            source = %self.source_label,
            dialect = self.dialect.name(),
            added = diff.added().len(),
            changed = diff.changed().len(),
            removed = diff.removed().len(),
            "applied diff"
        );
        Ok(())
    }

    /// Make sure no package is declared in both `self` and `other`.
    ///
    /// Mutates both sets. For a package present in both, an exact version
    /// match keeps `self`'s declaration and removes `other`'s; a mismatch
    /// keeps `other`'s and removes `self`'s.
    pub fn combine_with(&mut self, other: &mut RequirementSet, when: NaiveDateTime) -> Result<()> {
        let shared: Vec<(String, bool)> = self
            .packages()
            .filter_map(|(name, version)| {
                other
                    .version(name)
                    .map(|theirs| (name.to_string(), theirs == version))
            })
            .collect();

        for (package, same) in shared {
            if same {
                debug!(%package, from = %other.source_label, "duplicate declaration removed");
                other.remove_line(&package, when)?;
            } else {
                debug!(%package, from = %self.source_label, "conflicting declaration removed");
                self.remove_line(&package, when)?;
            }
        }
        Ok(())
    }
}
