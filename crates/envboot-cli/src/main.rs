//! envboot CLI
//!
//! Derives conda/pip dependency lists from a project manifest for the
//! environment bootstrap scripts.

mod cli;
mod commands;
mod config;
mod error;
mod logging;

use std::io;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::{EnvFileArgs, ExtractArgs};
use config::Config;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {e}", "warning".yellow().bold());
    }
    tracing::debug!("Verbose mode enabled");

    let cwd = std::env::current_dir()?;
    let config = Config::discover(&cwd, cli.config.as_deref())?;
    execute_command(&cwd, &config, cli.command)
}

fn execute_command(cwd: &std::path::Path, config: &Config, cmd: Commands) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cmd {
        Commands::Extract {
            path,
            variant,
            target,
            channel,
            manifest,
        } => {
            let args = ExtractArgs {
                path,
                variant,
                target,
                channel,
                manifest,
            };
            commands::run_extract(cwd, config, &args, &mut out)
        }
        Commands::Sections { manifest, json } => {
            commands::run_sections(cwd, config, manifest.as_deref(), json, &mut out)
        }
        Commands::EnvFile {
            base,
            variant,
            name,
            channels,
            manifest,
            output,
        } => {
            let args = EnvFileArgs {
                base,
                variant,
                name,
                channels,
                manifest,
                output,
            };
            commands::run_env_file(cwd, config, &args, &mut out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_execute_extract_with_temp_project() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("pyproject.toml"),
            "[custom.tool.conda.cpu-dependencies]\nnumpy = \"^1.16\"\n",
        )
        .unwrap();

        let result = execute_command(
            dir.path(),
            &Config::default(),
            Commands::Extract {
                path: None,
                variant: Some(envboot_manifest::Variant::Cpu),
                target: None,
                channel: cli::ChannelFilter::All,
                manifest: None,
            },
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }
}
