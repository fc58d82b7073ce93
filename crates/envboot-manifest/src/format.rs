//! Manifest format detection and handler trait

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::handlers::{JsonHandler, TomlHandler};
use crate::manifest::Table;

/// Supported manifest formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from a file path, failing on unknown extensions
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| {
            Error::UnsupportedFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                format!(".{ext}")
            })
        })
    }

    /// Get the handler that parses this format
    pub fn handler(&self) -> Box<dyn FormatHandler> {
        match self {
            Self::Toml => Box::new(TomlHandler::new()),
            Self::Json => Box::new(JsonHandler::new()),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Toml => write!(f, "TOML"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

/// Trait for format-specific manifest parsers
pub trait FormatHandler: Send + Sync {
    /// Format identifier
    fn format(&self) -> Format;

    /// Parse source into an ordered manifest table
    fn parse(&self, source: &str) -> Result<Table>;
}
