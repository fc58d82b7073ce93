//! Error types for envboot-manifest

use std::path::PathBuf;

use crate::manifest::NodeKind;

/// Result type for envboot-manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a manifest or extracting a section
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Section `{path}` not found: no key `{segment}`")]
    PathNotFound { path: String, segment: String },

    #[error("Section `{path}` is not a dependency list: `{segment}` is a {found}")]
    NotALeaf {
        path: String,
        segment: String,
        found: NodeKind,
    },

    #[error("Invalid section path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid dependency `{name}` in `{path}`: {reason}")]
    InvalidEntry {
        path: String,
        name: String,
        reason: String,
    },

    #[error("Invalid {kind} `{value}`: expected one of {expected}")]
    InvalidValue {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Failed to parse {format} manifest: {message}")]
    Parse { format: String, message: String },

    #[error("Unsupported manifest format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_entry(
        path: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidEntry {
            path: path.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_value(
        kind: &'static str,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
            expected,
        }
    }
}
