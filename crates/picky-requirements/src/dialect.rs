//! Listing dialects: how a package declaration is recognised and rendered.
//!
//! A dialect is plain data, a pair of pure functions. The two built-in
//! dialects cover `pip freeze` style (`name==version`) and `conda list -e`
//! style (`name=version=build`) listings; callers can build their own with
//! [`Dialect::new`].

use std::fmt;

/// Recognises a package declaration, returning `(name, version)`.
pub type ParseLine = fn(&str) -> Option<(String, String)>;

/// Renders `(name, version)` back into a declaration line.
pub type SerialiseLine = fn(&str, &str) -> String;

/// A parse/render function pair for one listing syntax.
#[derive(Clone, Copy)]
pub struct Dialect {
    name: &'static str,
    parse: ParseLine,
    serialise: SerialiseLine,
}

impl Dialect {
    /// `name==version`, as written by `pip freeze`.
    pub const PIP: Dialect = Dialect::new("pip", parse_pip_line, serialise_pip_line);

    /// `name=version[=build]`, as written by `conda list -e`.
    pub const CONDA: Dialect = Dialect::new("conda", parse_conda_line, serialise_conda_line);

    /// Create a dialect from a parse/render pair.
    pub const fn new(name: &'static str, parse: ParseLine, serialise: SerialiseLine) -> Self {
        Self {
            name,
            parse,
            serialise,
        }
    }

    /// Short human-readable name of the dialect.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Classify a single line. `None` means the line is not a declaration
    /// (blank, comment, annotated by a previous run, or malformed).
    pub fn parse_line(&self, line: &str) -> Option<(String, String)> {
        (self.parse)(line)
    }

    /// Render a declaration line.
    pub fn serialise_line(&self, name: &str, version: &str) -> String {
        (self.serialise)(name, version)
    }
}

impl fmt::Debug for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dialect({})", self.name)
    }
}

/// Everything before the first `#`.
fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or_default()
}

fn parse_pip_line(line: &str) -> Option<(String, String)> {
    let (name, version) = strip_comment(line).split_once("==")?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), version.trim().to_string()))
}

fn serialise_pip_line(name: &str, version: &str) -> String {
    format!("{name}=={version}")
}

fn parse_conda_line(line: &str) -> Option<(String, String)> {
    let mut parts = strip_comment(line).split('=').map(str::trim);
    let name = parts.next()?;
    // The build string, if any, is not part of the version.
    let version = parts.next()?;
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), version.to_string()))
}

fn serialise_conda_line(name: &str, version: &str) -> String {
    format!("{name}={version}")
}
