//! Dependency manifest handling for envboot
//!
//! Loads a project manifest (TOML or JSON), resolves a dotted section path
//! to a leaf mapping of package name to version constraint, and renders
//! that mapping as package-manager requirement lines.
//!
//! # Example
//!
//! ```
//! use envboot_manifest::{Format, Manifest, Target, extract_lines};
//!
//! let source = r#"
//! [custom.tool.conda.cpu-dependencies]
//! numpy = "^1.16"
//! cffi = ""
//! "#;
//! let manifest = Manifest::parse(source, Format::Toml).unwrap();
//! let lines = extract_lines(&manifest, "custom.tool.conda.cpu-dependencies", Target::Conda).unwrap();
//! assert_eq!(lines, vec!["numpy=1.16", "cffi"]);
//! ```

pub mod environment;
pub mod error;
pub mod extract;
pub mod format;
pub mod handlers;
pub mod manifest;
pub mod path;
pub mod record;
pub mod render;

pub use environment::{EnvDependency, EnvironmentFile};
pub use error::{Error, Result};
pub use extract::{extract, extract_lines, resolve};
pub use format::{Format, FormatHandler};
pub use manifest::{Manifest, Node, NodeKind, Table};
pub use path::{SectionPath, SectionSelector, Variant};
pub use record::{Channel, Clause, Constraint, Operator, Record};
pub use render::{Target, parse_line, render, render_record, render_text};
