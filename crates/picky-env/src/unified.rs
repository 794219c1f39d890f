//! Unified diff over two slices of lines, rendered the way
//! `difflib.unified_diff` lays it out.

use std::fmt;

use similar::{ChangeTag, TextDiff};

/// Unchanged lines kept either side of a change, as `difflib` does.
const CONTEXT_LINES: usize = 3;

/// `--- from` / `+++ to` headers plus the hunks between them. No hunks
/// means the slices were equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnifiedDiff {
    pub from_label: String,
    pub to_label: String,
    pub hunks: Vec<DiffHunk>,
}

impl UnifiedDiff {
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }
}

/// One `@@` block. Starts are 1-based line numbers into each slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<DiffLine>,
}

/// A line of a hunk, tagged with the prefix it is rendered with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// ` line`: in both slices.
    Context(String),
    /// `+line`: only in `new`.
    Added(String),
    /// `-line`: only in `old`.
    Removed(String),
}

/// Diff `old` against `new` line by line. Lines are compared whole, so
/// callers decide what a line is (a trailing `""` after the last newline
/// counts as one).
pub fn diff_lines(
    old: &[&str],
    new: &[&str],
    from_label: impl Into<String>,
    to_label: impl Into<String>,
) -> UnifiedDiff {
    let mut diff = UnifiedDiff {
        from_label: from_label.into(),
        to_label: to_label.into(),
        hunks: Vec::new(),
    };
    if old == new {
        return diff;
    }

    let text_diff = TextDiff::configure().diff_slices(old, new);

    for group in text_diff.grouped_ops(CONTEXT_LINES) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;

        let mut lines = Vec::new();
        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().to_string();
                lines.push(match change.tag() {
                    ChangeTag::Equal => DiffLine::Context(text),
                    ChangeTag::Delete => DiffLine::Removed(text),
                    ChangeTag::Insert => DiffLine::Added(text),
                });
            }
        }

        diff.hunks.push(DiffHunk {
            old_start: old_range.start + 1,
            old_count: old_range.len(),
            new_start: new_range.start + 1,
            new_count: new_range.len(),
            lines,
        });
    }

    diff
}

/// `difflib` range notation: a single line is just its number, an empty
/// range names the line before it.
fn format_range(start: usize, count: usize) -> String {
    match count {
        0 => format!("{},0", start - 1),
        1 => format!("{start}"),
        _ => format!("{start},{count}"),
    }
}

impl fmt::Display for DiffHunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "@@ -{} +{} @@",
            format_range(self.old_start, self.old_count),
            format_range(self.new_start, self.new_count)
        )?;
        for line in &self.lines {
            match line {
                DiffLine::Context(text) => writeln!(f, " {text}")?,
                DiffLine::Added(text) => writeln!(f, "+{text}")?,
                DiffLine::Removed(text) => writeln!(f, "-{text}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for UnifiedDiff {
    /// Renders nothing at all for identical inputs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        writeln!(f, "--- {}", self.from_label)?;
        writeln!(f, "+++ {}", self.to_label)?;
        for hunk in &self.hunks {
            write!(f, "{hunk}")?;
        }
        Ok(())
    }
}
