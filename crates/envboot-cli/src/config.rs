//! Configuration loading for envboot
//!
//! Settings live in an optional `envboot.toml`:
//!
//! ```toml
//! [extract]
//! manifest = "pyproject.toml"
//! base = "custom.tool.conda"
//! target = "conda"
//!
//! [environment]
//! name = "myia"
//! channels = ["pytorch", "conda-forge"]
//! ```
//!
//! Command-line flags take precedence over the file.

use std::path::{Path, PathBuf};

use envboot_manifest::Target;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "envboot.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
}

/// Extraction defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// Manifest path, relative to the working directory
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
    /// Base section that holds the `<variant>-dependencies` tables
    #[serde(default = "default_base")]
    pub base: String,
    /// Default render target
    #[serde(default)]
    pub target: Target,
}

fn default_manifest() -> PathBuf {
    PathBuf::from("pyproject.toml")
}

fn default_base() -> String {
    "custom.tool.conda".to_string()
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            base: default_base(),
            target: Target::default(),
        }
    }
}

/// Environment file defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Environment name; falls back to the manifest's `project.name`
    #[serde(default)]
    pub name: Option<String>,
    /// Conda channels
    #[serde(default)]
    pub channels: Vec<String>,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    /// Load the explicit config file, or `envboot.toml` in `cwd` if present,
    /// or fall back to defaults
    pub fn discover(cwd: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "Loading config");
            return Self::load(&cwd.join(path));
        }

        let candidate = cwd.join(CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Loading config");
            Self::load(&candidate)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolve the manifest path, preferring a command-line override
    pub fn manifest_path(&self, cwd: &Path, explicit: Option<&Path>) -> PathBuf {
        cwd.join(explicit.unwrap_or(self.extract.manifest.as_path()))
    }
}
