//! Ordered manifest model
//!
//! A [`Manifest`] is a tree of [`Table`]s whose entries keep the order they
//! were declared in. Tables whose every entry describes a single dependency
//! are *leaf mappings*; everything else is a nested section.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::format::Format;

/// Keys allowed inside a table-form dependency entry
pub(crate) const ENTRY_KEYS: &[&str] = &["version", "channel"];

/// A node in the manifest tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A mapping, either a nested section or a leaf mapping
    Table(Table),
    /// A string value
    String(String),
    /// Any other scalar or array, tagged with its kind
    Other(&'static str),
}

impl Node {
    /// Classify this node for diagnostics
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Table(t) if t.is_leaf() => NodeKind::Leaf,
            Node::Table(_) => NodeKind::Section,
            Node::String(_) => NodeKind::Scalar("string"),
            Node::Other(kind) => NodeKind::Scalar(kind),
        }
    }

    /// Whether this node can stand as one entry of a leaf mapping
    pub fn is_dependency_entry(&self) -> bool {
        match self {
            Node::String(_) => true,
            Node::Table(t) => t.is_entry_table(),
            Node::Other(_) => false,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Node::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Shape of a manifest node, as reported in errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A mapping containing further sections
    Section,
    /// A mapping of package name to constraint
    Leaf,
    /// A single dependency entry inside a leaf mapping
    Entry,
    /// A non-mapping value
    Scalar(&'static str),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Section => write!(f, "nested mapping"),
            NodeKind::Leaf => write!(f, "leaf mapping"),
            NodeKind::Entry => write!(f, "dependency entry"),
            NodeKind::Scalar(kind) => write!(f, "{kind} value"),
        }
    }
}

/// An ordered mapping from keys to nodes.
///
/// Inline tables (`{ .. }` in TOML, every object in JSON) are the only ones
/// that can be dependency entries. A `[section]` header whose keys happen to
/// be `version` and `channel` stays a leaf of two packages. JSON has no
/// header syntax, so a JSON object with only those keys is always an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    entries: Vec<(String, Node)>,
    inline: bool,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table written in inline form
    pub fn new_inline() -> Self {
        Self {
            entries: Vec::new(),
            inline: true,
        }
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Insert an entry, replacing an existing key in place
    pub fn insert(&mut self, key: impl Into<String>, node: Node) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = node,
            None => self.entries.push((key, node)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find_map(|(k, node)| (k == key).then_some(node))
    }

    /// Iterate entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, node)| (k.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A leaf mapping holds only dependency entries. The empty table is an
    /// empty leaf.
    pub fn is_leaf(&self) -> bool {
        self.entries.iter().all(|(_, node)| node.is_dependency_entry())
    }

    /// Whether this table is the `{ version = .., channel = .. }` form of a
    /// single dependency entry
    pub fn is_entry_table(&self) -> bool {
        self.inline
            && !self.entries.is_empty()
            && self
                .entries
                .iter()
                .all(|(k, node)| ENTRY_KEYS.contains(&k.as_str()) && matches!(node, Node::String(_)))
    }
}

/// A loaded project manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    root: Table,
}

impl Manifest {
    pub fn new(root: Table) -> Self {
        Self { root }
    }

    /// Parse manifest source in the given format
    pub fn parse(source: &str, format: Format) -> Result<Self> {
        let handler = format.handler();
        let root = handler.parse(source)?;
        tracing::debug!(format = %handler.format(), entries = root.len(), "Parsed manifest");
        Ok(Self { root })
    }

    /// Read and parse a manifest file, detecting the format from its extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        tracing::debug!(path = %path.display(), "Loading manifest");
        Self::parse(&source, format)
    }

    pub fn root(&self) -> &Table {
        &self.root
    }

    /// Look up a string value by dotted key, e.g. `project.name`
    pub fn get_str(&self, dotted: &str) -> Option<&str> {
        let mut segments = dotted.split('.');
        let last = segments.next_back()?;
        let mut table = &self.root;
        for segment in segments {
            table = table.get(segment)?.as_table()?;
        }
        table.get(last)?.as_str()
    }

    /// Dotted paths of every non-empty leaf mapping, in declaration order
    pub fn leaf_sections(&self) -> Vec<String> {
        let mut found = Vec::new();
        for (key, node) in self.root.iter() {
            if let Node::Table(table) = node {
                collect_leaves(key.to_string(), table, &mut found);
            }
        }
        found
    }
}

fn collect_leaves(prefix: String, table: &Table, found: &mut Vec<String>) {
    if table.is_leaf() {
        if !table.is_empty() {
            found.push(prefix);
        }
        return;
    }
    for (key, node) in table.iter() {
        if let Node::Table(child) = node {
            collect_leaves(format!("{prefix}.{key}"), child, found);
        }
    }
}
