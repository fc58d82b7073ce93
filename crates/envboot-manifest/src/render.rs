//! Rendering records as requirement lines
//!
//! Each target package manager has its own specifier grammar. Rendering is
//! total: every record produces exactly one line for any target.
//!
//! | manifest  | conda        | pip                  |
//! |-----------|--------------|----------------------|
//! | `^1.16`   | `name=1.16`  | `name>=1.16,<2`      |
//! | `~1.2`    | `name=1.2`   | `name>=1.2,<1.3`     |
//! | `1.16`    | `name=1.16`  | `name==1.16`         |
//! | `>=1.0`   | `name>=1.0`  | `name>=1.0`          |
//! | `""`      | `name`       | `name`               |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::{Clause, Operator, Record};

/// Package manager whose requirement grammar is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// `conda install --file`
    #[default]
    Conda,
    /// `pip install -r`
    Pip,
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "conda" | "mamba" => Ok(Target::Conda),
            "pip" => Ok(Target::Pip),
            _ => Err(Error::invalid_value("target", s, "`conda`, `pip`")),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Conda => write!(f, "conda"),
            Target::Pip => write!(f, "pip"),
        }
    }
}

/// Render one record as a requirement line for `target`
pub fn render_record(record: &Record, target: Target) -> String {
    let clauses = record.constraint.clauses();
    if clauses.is_empty() {
        return record.name.clone();
    }

    let spec: Vec<String> = clauses
        .iter()
        .map(|clause| match target {
            Target::Conda => conda_clause(clause),
            Target::Pip => pip_clause(clause),
        })
        .collect();
    format!("{}{}", record.name, spec.join(","))
}

/// Render records in order, one line each
pub fn render(records: &[Record], target: Target) -> Vec<String> {
    records.iter().map(|r| render_record(r, target)).collect()
}

/// Render records as newline-terminated text
pub fn render_text(records: &[Record], target: Target) -> String {
    render(records, target)
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}

/// Split a rendered conda line back into `(name, constraint)`.
///
/// A single leading `=` is dropped so `x=1.16` reads back as `("x", "1.16")`.
/// Returns `None` for blank lines, comments, and lines without a name.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let split = line
        .find(|c: char| matches!(c, '=' | '<' | '>' | '!' | '~' | '^') || c.is_whitespace())
        .unwrap_or(line.len());
    let (name, rest) = line.split_at(split);
    if name.is_empty() {
        return None;
    }

    let rest = rest.trim();
    let constraint = match rest.strip_prefix('=') {
        Some(version) if !version.starts_with('=') => version,
        _ => rest,
    };
    Some((name.to_string(), constraint.to_string()))
}

fn conda_clause(clause: &Clause) -> String {
    match clause.op {
        Operator::Caret | Operator::Tilde | Operator::Bare => format!("={}", clause.version),
        _ => clause.to_string(),
    }
}

fn pip_clause(clause: &Clause) -> String {
    let version = &clause.version;
    match clause.op {
        Operator::Caret => bounded(version, caret_upper(version)),
        Operator::Tilde => bounded(version, tilde_upper(version)),
        Operator::Bare | Operator::Equal => format!("=={version}"),
        _ => clause.to_string(),
    }
}

fn bounded(lower: &str, upper: Option<String>) -> String {
    match upper {
        Some(upper) => format!(">={lower},<{upper}"),
        None => format!(">={lower}"),
    }
}

/// Parse a release version as semver, padding `3` to `3.0.0` and `3.12` to
/// `3.12.0`. Also returns how many components were written, so bounds keep
/// the manifest's precision. Pre-release and build tags are not bumped.
fn normalize_version(s: &str) -> Option<(semver::Version, usize)> {
    let s = s.trim();
    let written = s.split('.').count();
    let padded = match written {
        1 => format!("{s}.0.0"),
        2 => format!("{s}.0"),
        _ => s.to_string(),
    };

    let version = semver::Version::parse(&padded).ok()?;
    if !version.pre.is_empty() || !version.build.is_empty() {
        return None;
    }
    Some((version, written))
}

fn written_components(version: &str) -> Option<Vec<u64>> {
    let (version, written) = normalize_version(version)?;
    let parts = [version.major, version.minor, version.patch];
    Some(parts[..written].to_vec())
}

/// Exclusive upper bound for `^version`: bump the leftmost non-zero component
fn caret_upper(version: &str) -> Option<String> {
    let parts = written_components(version)?;
    let bump = parts
        .iter()
        .position(|&p| p != 0)
        .unwrap_or(parts.len() - 1);
    bump_at(&parts, bump)
}

/// Exclusive upper bound for `~version`: bump the minor, or the major when
/// only a major is given
fn tilde_upper(version: &str) -> Option<String> {
    let parts = written_components(version)?;
    let bump = if parts.len() >= 2 { 1 } else { 0 };
    bump_at(&parts, bump)
}

/// `None` when the bumped component would overflow
fn bump_at(parts: &[u64], index: usize) -> Option<String> {
    let mut upper = parts[..=index].to_vec();
    upper[index] = upper[index].checked_add(1)?;
    Some(
        upper
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join("."),
    )
}
