//! The sections command

use std::io::Write;
use std::path::Path;

use crate::commands::extract::load_manifest;
use crate::config::Config;
use crate::error::Result;

/// List every non-empty dependency section of the manifest
pub fn run_sections(
    cwd: &Path,
    config: &Config,
    manifest: Option<&Path>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let manifest = load_manifest(cwd, config, manifest)?;
    let sections = manifest.leaf_sections();
    tracing::debug!(count = sections.len(), "Found dependency sections");

    if json {
        serde_json::to_writer_pretty(&mut *out, &sections)?;
        writeln!(out)?;
    } else {
        for section in &sections {
            writeln!(out, "{section}")?;
        }
    }
    out.flush()?;
    Ok(())
}
