//! Expected-vs-actual comparison of environment descriptors.

use std::fmt;

use crate::environment::EnvironmentDescriptor;
use crate::error::Result;
use crate::unified::{diff_lines, UnifiedDiff};

/// Banner printed above a non-empty comparison.
pub const MISMATCH_BANNER: &str = "Expected environment does not match actual:";

/// The outcome of [`diff_environments`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentDiff {
    diff: UnifiedDiff,
}

impl EnvironmentDiff {
    /// Returns `true` if both environments serialize identically.
    pub fn is_empty(&self) -> bool {
        self.diff.is_empty()
    }

    /// Process exit status for `picky check`: 0 if identical, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_empty() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for EnvironmentDiff {
    /// The banner followed by the unified diff, or nothing if identical.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        writeln!(f, "{MISMATCH_BANNER}")?;
        write!(f, "{}", self.diff)
    }
}

/// Compare two environments by their serialized form, ignoring their names.
pub fn diff_environments(
    expected: &EnvironmentDescriptor,
    actual: &EnvironmentDescriptor,
) -> Result<EnvironmentDiff> {
    let expected = unnamed_yaml(expected)?;
    let actual = unnamed_yaml(actual)?;
    let expected: Vec<&str> = expected.split('\n').collect();
    let actual: Vec<&str> = actual.split('\n').collect();
    Ok(EnvironmentDiff {
        diff: diff_lines(&expected, &actual, "expected", "actual"),
    })
}

fn unnamed_yaml(env: &EnvironmentDescriptor) -> Result<String> {
    let env = EnvironmentDescriptor {
        name: None,
        ..env.clone()
    };
    env.to_yaml_string()
}
