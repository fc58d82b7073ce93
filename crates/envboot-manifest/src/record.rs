//! Dependency records and version constraints

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::manifest::Node;

/// Install source a dependency belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Installed by the environment's own package manager
    #[default]
    Standard,
    /// Only available from PyPI, installed with pip
    Pip,
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "conda" | "default" => Ok(Channel::Standard),
            "pip" | "pypi" => Ok(Channel::Pip),
            _ => Err(Error::invalid_value("channel", s, "`standard`, `pip`")),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Standard => write!(f, "standard"),
            Channel::Pip => write!(f, "pip"),
        }
    }
}

/// Comparison operator of a constraint clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `^1.16`: compatible within the leftmost non-zero component
    Caret,
    /// `~1.16`: compatible within the minor version
    Tilde,
    /// `~=1.16`
    Compatible,
    /// `==1.16`
    Exact,
    /// `=1.16`
    Equal,
    /// `!=1.16`
    NotEqual,
    GreaterEq,
    LessEq,
    Greater,
    Less,
    /// A version with no operator
    Bare,
}

impl Operator {
    /// Prefixes in match order; longer operators come before their prefixes.
    const PREFIXES: &'static [(&'static str, Operator)] = &[
        ("~=", Operator::Compatible),
        ("==", Operator::Exact),
        ("!=", Operator::NotEqual),
        (">=", Operator::GreaterEq),
        ("<=", Operator::LessEq),
        ("^", Operator::Caret),
        ("~", Operator::Tilde),
        (">", Operator::Greater),
        ("<", Operator::Less),
        ("=", Operator::Equal),
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Caret => "^",
            Operator::Tilde => "~",
            Operator::Compatible => "~=",
            Operator::Exact => "==",
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterEq => ">=",
            Operator::LessEq => "<=",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::Bare => "",
        }
    }

    fn split(clause: &str) -> (Operator, &str) {
        for (prefix, op) in Self::PREFIXES {
            if let Some(rest) = clause.strip_prefix(*prefix) {
                return (*op, rest.trim_start());
            }
        }
        (Operator::Bare, clause)
    }
}

/// One `operator version` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub op: Operator,
    pub version: String,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.symbol(), self.version)
    }
}

/// A parsed version constraint. No clauses means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Constraint {
    raw: String,
    clauses: Vec<Clause>,
}

impl Constraint {
    /// Parse a constraint string such as `^1.16`, `>=1.0,<2` or `""`.
    ///
    /// Returns `None` when a clause is empty or an operator has no version.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "*" {
            return Some(Self {
                raw: raw.to_string(),
                clauses: Vec::new(),
            });
        }

        let mut clauses = Vec::new();
        for part in trimmed.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }
            let (op, version) = Operator::split(part);
            if version.is_empty() || version.contains(char::is_whitespace) {
                return None;
            }
            clauses.push(Clause {
                op,
                version: version.to_string(),
            });
        }

        Some(Self {
            raw: raw.to_string(),
            clauses,
        })
    }

    pub fn is_any(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// The constraint exactly as written in the manifest
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// A single dependency extracted from a leaf mapping
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub name: String,
    pub constraint: Constraint,
    pub channel: Channel,
}

impl Record {
    pub fn new(name: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            name: name.into(),
            constraint,
            channel: Channel::Standard,
        }
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    /// Build a record from one entry of the leaf mapping at `section`.
    ///
    /// Accepts `name = "constraint"` and
    /// `name = { version = "constraint", channel = "pip" }`.
    pub fn from_entry(section: &str, name: &str, node: &Node) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::invalid_entry(section, name, "empty package name"));
        }

        let (version, channel) = match node {
            Node::String(version) => (version.as_str(), Channel::Standard),
            Node::Table(table) if table.is_entry_table() => {
                let version = table.get("version").and_then(Node::as_str).unwrap_or("");
                let channel = match table.get("channel").and_then(Node::as_str) {
                    Some(channel) => channel
                        .parse::<Channel>()
                        .map_err(|e: Error| Error::invalid_entry(section, name, e.to_string()))?,
                    None => Channel::Standard,
                };
                (version, channel)
            }
            other => {
                return Err(Error::invalid_entry(
                    section,
                    name,
                    format!("expected a version string, found a {}", other.kind()),
                ));
            }
        };

        let constraint = Constraint::parse(version).ok_or_else(|| {
            Error::invalid_entry(
                section,
                name,
                format!("invalid version constraint `{version}`"),
            )
        })?;

        Ok(Self {
            name: name.to_string(),
            constraint,
            channel,
        })
    }
}
