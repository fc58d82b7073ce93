//! Section path parsing and variant selection
//!
//! Section paths are dot-separated keys such as
//! `custom.tool.conda.cpu-dependencies`. A [`SectionSelector`] builds the
//! path for a hardware [`Variant`] from a base section, so callers pass the
//! variant explicitly instead of through the process environment.
//!
//! # Examples
//!
//! ```
//! use envboot_manifest::{SectionSelector, Variant};
//!
//! let path = SectionSelector::new("custom.tool.conda")
//!     .with_variant(Variant::Gpu)
//!     .path()
//!     .unwrap();
//! assert_eq!(path.as_str(), "custom.tool.conda.gpu-dependencies");
//! assert_eq!(path.segments().len(), 4);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A validated dotted section path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionPath {
    raw: String,
    segments: Vec<String>,
}

impl SectionPath {
    /// Parse a dotted path. Empty paths and empty segments are rejected.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::invalid_path(path, "path is empty"));
        }

        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if let Some(pos) = segments.iter().position(String::is_empty) {
            return Err(Error::invalid_path(
                path,
                format!("empty segment at position {}", pos + 1),
            ));
        }

        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Append one segment
    pub fn child(&self, segment: &str) -> Result<Self> {
        Self::parse(&format!("{}.{segment}", self.raw))
    }
}

impl FromStr for SectionPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Hardware variant an environment is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Cpu,
    Gpu,
}

impl Variant {
    /// Name of the section holding this variant's dependencies
    pub fn section_name(&self) -> &'static str {
        match self {
            Variant::Cpu => "cpu-dependencies",
            Variant::Gpu => "gpu-dependencies",
        }
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cpu" => Ok(Variant::Cpu),
            "gpu" | "cuda" => Ok(Variant::Gpu),
            _ => Err(Error::invalid_value("variant", s, "`cpu`, `gpu`")),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Cpu => write!(f, "cpu"),
            Variant::Gpu => write!(f, "gpu"),
        }
    }
}

/// Selects a dependency section, optionally narrowed to a variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSelector {
    base: String,
    variant: Option<Variant>,
}

impl SectionSelector {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            variant: None,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<Option<Variant>>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn variant(&self) -> Option<Variant> {
        self.variant
    }

    /// The section path this selector points at
    pub fn path(&self) -> Result<SectionPath> {
        let base = SectionPath::parse(&self.base)?;
        match self.variant {
            Some(variant) => base.child(variant.section_name()),
            None => Ok(base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let path = SectionPath::parse("deps").unwrap();
        assert_eq!(path.segments(), ["deps".to_string()]);
    }

    #[test]
    fn test_parse_dotted() {
        let path = SectionPath::parse("custom.tool.conda.cpu-dependencies").unwrap();
        assert_eq!(
            path.segments(),
            ["custom", "tool", "conda", "cpu-dependencies"].map(String::from)
        );
        assert_eq!(path.to_string(), "custom.tool.conda.cpu-dependencies");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            SectionPath::parse(""),
            Err(Error::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        for bad in ["a..b", ".a", "a."] {
            let err = SectionPath::parse(bad).unwrap_err();
            assert!(
                matches!(err, Error::InvalidPath { ref path, .. } if path == bad),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("cpu".parse::<Variant>().unwrap(), Variant::Cpu);
        assert_eq!("GPU".parse::<Variant>().unwrap(), Variant::Gpu);
        assert_eq!("cuda".parse::<Variant>().unwrap(), Variant::Gpu);
        assert!("tpu".parse::<Variant>().is_err());
    }

    #[test]
    fn test_selector_without_variant() {
        let path = SectionSelector::new("a.b").path().unwrap();
        assert_eq!(path.as_str(), "a.b");
    }

    #[test]
    fn test_selector_with_variant() {
        let selector = SectionSelector::new("custom.tool.conda").with_variant(Variant::Cpu);
        assert_eq!(selector.variant(), Some(Variant::Cpu));
        assert_eq!(
            selector.path().unwrap().as_str(),
            "custom.tool.conda.cpu-dependencies"
        );
    }
}
