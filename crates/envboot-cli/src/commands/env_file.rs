//! The env-file command

use std::io::Write;
use std::path::{Path, PathBuf};

use envboot_manifest::{EnvironmentFile, Variant, extract};

use crate::commands::extract::{load_manifest, selector};
use crate::config::Config;
use crate::error::Result;

/// Arguments of `envboot env-file`
#[derive(Debug, Clone)]
pub struct EnvFileArgs {
    pub base: Option<String>,
    pub variant: Variant,
    pub name: Option<String>,
    pub channels: Vec<String>,
    pub manifest: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Render a conda environment file for one variant
pub fn run_env_file(
    cwd: &Path,
    config: &Config,
    args: &EnvFileArgs,
    out: &mut impl Write,
) -> Result<()> {
    let section = selector(config, args.base.as_deref(), Some(args.variant))?.path()?;
    let manifest = load_manifest(cwd, config, args.manifest.as_deref())?;
    let records = extract(&manifest, section.as_str())?;

    let name = args
        .name
        .clone()
        .or_else(|| config.environment.name.clone())
        .or_else(|| manifest.get_str("project.name").map(str::to_string))
        .unwrap_or_else(|| "environment".to_string());
    let channels = if args.channels.is_empty() {
        &config.environment.channels
    } else {
        &args.channels
    };

    let yaml = EnvironmentFile::from_records(name, &records)
        .with_channels(channels.iter().cloned())
        .to_yaml()?;

    match &args.output {
        Some(path) => {
            let path = cwd.join(path);
            std::fs::write(&path, &yaml)?;
            tracing::info!(path = %path.display(), %section, "Wrote environment file");
        }
        None => {
            out.write_all(yaml.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}
