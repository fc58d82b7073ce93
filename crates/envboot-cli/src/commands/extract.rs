//! The extract command

use std::io::Write;
use std::path::{Path, PathBuf};

use envboot_manifest::{Manifest, Record, SectionSelector, Target, Variant, extract, render_text};

use crate::cli::ChannelFilter;
use crate::config::Config;
use crate::error::{CliError, Result};

/// Arguments of `envboot extract`
#[derive(Debug, Clone, Default)]
pub struct ExtractArgs {
    pub path: Option<String>,
    pub variant: Option<Variant>,
    pub target: Option<Target>,
    pub channel: ChannelFilter,
    pub manifest: Option<PathBuf>,
}

/// Build the section selector from the path argument and configured base
pub(crate) fn selector(
    config: &Config,
    path: Option<&str>,
    variant: Option<Variant>,
) -> Result<SectionSelector> {
    let base = match (path, variant) {
        (Some(path), _) => path.to_string(),
        (None, Some(_)) => config.extract.base.clone(),
        (None, None) => {
            return Err(CliError::user(
                "no section given: pass a dotted path or --variant",
            ));
        }
    };
    Ok(SectionSelector::new(base).with_variant(variant))
}

/// Load the manifest named by `explicit` or the configuration
pub(crate) fn load_manifest(
    cwd: &Path,
    config: &Config,
    explicit: Option<&Path>,
) -> Result<Manifest> {
    let path = config.manifest_path(cwd, explicit);
    Ok(Manifest::load(&path)?)
}

/// Extract the selected section and write it as requirement lines
pub fn run_extract(
    cwd: &Path,
    config: &Config,
    args: &ExtractArgs,
    out: &mut impl Write,
) -> Result<()> {
    let selector = selector(config, args.path.as_deref(), args.variant)?;
    let section = selector.path()?;
    let manifest = load_manifest(cwd, config, args.manifest.as_deref())?;

    let records: Vec<Record> = extract(&manifest, section.as_str())?
        .into_iter()
        .filter(|r| args.channel.accepts(r.channel))
        .collect();

    let target = args.target.unwrap_or(config.extract.target);
    tracing::debug!(%section, %target, count = records.len(), "Writing requirements");

    out.write_all(render_text(&records, target).as_bytes())?;
    out.flush()?;
    Ok(())
}
