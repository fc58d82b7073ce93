//! Section resolution and dependency extraction
//!
//! Extraction walks the manifest one key per path segment and requires the
//! final node to be a leaf mapping. It never reads files or mutates the
//! manifest, so the same inputs always give the same output.

use crate::error::{Error, Result};
use crate::manifest::{Manifest, Node, NodeKind, Table};
use crate::path::SectionPath;
use crate::record::Record;
use crate::render::{Target, render};

/// Resolve `path` to the leaf mapping it names.
///
/// Fails with [`Error::PathNotFound`] at the first missing key and with
/// [`Error::NotALeaf`] at the first segment that cannot hold the rest of the
/// path: a scalar anywhere, a leaf mapping or dependency entry before the
/// last segment, or a nested mapping or dependency entry at the end.
pub fn resolve<'a>(manifest: &'a Manifest, path: &SectionPath) -> Result<&'a Table> {
    let mut current = manifest.root();
    let mut parent: Option<&Table> = None;
    let segments = path.segments();

    for (i, segment) in segments.iter().enumerate() {
        let node = current
            .get(segment)
            .ok_or_else(|| Error::PathNotFound {
                path: path.to_string(),
                segment: segment.clone(),
            })?;

        let Node::Table(table) = node else {
            return Err(Error::NotALeaf {
                path: path.to_string(),
                segment: segment.clone(),
                found: node.kind(),
            });
        };

        // Dependencies live only in leaves; nothing can be reached below one
        if i + 1 < segments.len() {
            let found = if current.is_leaf() && table.is_entry_table() {
                Some(NodeKind::Entry)
            } else if table.is_leaf() && !table.is_empty() {
                Some(NodeKind::Leaf)
            } else {
                None
            };
            if let Some(found) = found {
                return Err(Error::NotALeaf {
                    path: path.to_string(),
                    segment: segment.clone(),
                    found,
                });
            }
        }

        parent = Some(current);
        current = table;
    }

    let last = path.segments().last().cloned().unwrap_or_default();

    // `{ version = .., channel = .. }` under a leaf is one dependency, not a section
    if current.is_entry_table() && parent.is_some_and(Table::is_leaf) {
        return Err(Error::NotALeaf {
            path: path.to_string(),
            segment: last,
            found: NodeKind::Entry,
        });
    }

    if !current.is_leaf() {
        return Err(Error::NotALeaf {
            path: path.to_string(),
            segment: last,
            found: NodeKind::Section,
        });
    }

    Ok(current)
}

/// Extract the dependency records of the section at `path`, in manifest order
pub fn extract(manifest: &Manifest, path: &str) -> Result<Vec<Record>> {
    let path = SectionPath::parse(path)?;
    let leaf = resolve(manifest, &path)?;

    let records = leaf
        .iter()
        .map(|(name, node)| Record::from_entry(path.as_str(), name, node))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(section = %path, count = records.len(), "Extracted dependencies");
    Ok(records)
}

/// Extract the section at `path` and render it for `target`
pub fn extract_lines(manifest: &Manifest, path: &str, target: Target) -> Result<Vec<String>> {
    let records = extract(manifest, path)?;
    Ok(render(&records, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;

    fn manifest(source: &str) -> Manifest {
        Manifest::parse(source, Format::Json).unwrap()
    }

    #[test]
    fn test_extract_scenario() {
        let m = manifest(r#"{"a": {"b": {"x": "^1.16", "y": ""}}}"#);
        assert_eq!(
            extract_lines(&m, "a.b", Target::Conda).unwrap(),
            vec!["x=1.16", "y"]
        );
    }

    #[test]
    fn test_extract_leaf_value_is_not_a_leaf() {
        let m = manifest(r#"{"a": {"b": {"x": "^1.16", "y": ""}}}"#);
        let err = extract(&m, "a.b.x").unwrap_err();
        assert!(matches!(
            err,
            Error::NotALeaf { ref segment, found: NodeKind::Leaf, .. } if segment == "b"
        ));
    }

    #[test]
    fn test_extract_below_leaf_is_not_a_leaf() {
        let m = manifest(r#"{"a": {"b": {"x": "^1.16", "y": ""}}}"#);
        let err = extract(&m, "a.b.z").unwrap_err();
        assert!(matches!(
            err,
            Error::NotALeaf { ref segment, found: NodeKind::Leaf, .. } if segment == "b"
        ));
    }

    #[test]
    fn test_extract_scalar_at_root_level() {
        let m = manifest(r#"{"name": "myia", "a": {}}"#);
        let err = extract(&m, "name.x").unwrap_err();
        assert!(matches!(
            err,
            Error::NotALeaf { ref segment, found: NodeKind::Scalar("string"), .. } if segment == "name"
        ));
    }

    #[test]
    fn test_extract_missing_segment() {
        let m = manifest(r#"{"a": {"b": {"x": "^1.16", "y": ""}}}"#);
        let err = extract(&m, "a.c").unwrap_err();
        assert!(matches!(err, Error::PathNotFound { ref segment, .. } if segment == "c"));
    }

    #[test]
    fn test_extract_nested_mapping_is_not_a_leaf() {
        let m = manifest(r#"{"a": {"b": {"x": "^1.16"}}}"#);
        let err = extract(&m, "a").unwrap_err();
        assert!(matches!(
            err,
            Error::NotALeaf { ref segment, found: NodeKind::Section, .. } if segment == "a"
        ));
    }

    #[test]
    fn test_extract_entry_table_is_not_a_leaf() {
        let m = manifest(r#"{"deps": {"torch": {"version": "1.4", "channel": "pip"}}}"#);
        let err = extract(&m, "deps.torch").unwrap_err();
        assert!(matches!(
            err,
            Error::NotALeaf { ref segment, found: NodeKind::Leaf, .. } if segment == "deps"
        ));

        // A manifest that is itself one flat dependency list
        let m = manifest(r#"{"torch": {"version": "1.4", "channel": "pip"}}"#);
        let err = extract(&m, "torch").unwrap_err();
        assert!(matches!(err, Error::NotALeaf { found: NodeKind::Entry, .. }));
        let err = extract(&m, "torch.version").unwrap_err();
        assert!(matches!(err, Error::NotALeaf { found: NodeKind::Entry, .. }));
    }

    #[test]
    fn test_extract_empty_leaf() {
        let m = manifest(r#"{"deps": {}}"#);
        assert!(extract(&m, "deps").unwrap().is_empty());
    }

    #[test]
    fn test_extract_invalid_path() {
        let m = manifest(r#"{"a": {}}"#);
        assert!(matches!(extract(&m, "a."), Err(Error::InvalidPath { .. })));
    }
}
