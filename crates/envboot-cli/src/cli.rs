//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use envboot_manifest::{Channel, Target, Variant};

/// envboot - derive package-manager dependency lists from a project manifest
#[derive(Parser, Debug)]
#[command(name = "envboot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./envboot.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the dependencies of a manifest section, one per line
    ///
    /// Examples:
    ///   envboot extract custom.tool.conda.cpu-dependencies
    ///   envboot extract --variant gpu               # uses the configured base section
    ///   envboot extract custom.tool.conda --variant cpu --target pip --channel pip
    Extract {
        /// Dotted section path, or the base section when --variant is given
        path: Option<String>,

        /// Hardware variant; appends `<variant>-dependencies` to the path
        #[arg(long)]
        variant: Option<Variant>,

        /// Package manager grammar to render
        #[arg(short, long)]
        target: Option<Target>,

        /// Only print dependencies from this install channel
        #[arg(long, value_enum, default_value_t = ChannelFilter::All)]
        channel: ChannelFilter,

        /// Manifest file
        #[arg(short, long, env = "ENVBOOT_MANIFEST")]
        manifest: Option<PathBuf>,
    },

    /// List the dependency sections a manifest defines
    Sections {
        /// Manifest file
        #[arg(short, long, env = "ENVBOOT_MANIFEST")]
        manifest: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write a conda environment file for a variant
    ///
    /// Examples:
    ///   envboot env-file --variant cpu -o environment.yml
    ///   envboot env-file custom.tool.conda --variant gpu --name myia-gpu
    EnvFile {
        /// Base section holding the `<variant>-dependencies` tables
        base: Option<String>,

        /// Hardware variant
        #[arg(long)]
        variant: Variant,

        /// Environment name
        #[arg(short, long)]
        name: Option<String>,

        /// Conda channel to list in the file (repeatable)
        #[arg(long = "channel-url")]
        channels: Vec<String>,

        /// Manifest file
        #[arg(short, long, env = "ENVBOOT_MANIFEST")]
        manifest: Option<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Which install channels `extract` prints
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelFilter {
    #[default]
    All,
    Standard,
    Pip,
}

impl ChannelFilter {
    pub fn accepts(&self, channel: Channel) -> bool {
        match self {
            ChannelFilter::All => true,
            ChannelFilter::Standard => channel == Channel::Standard,
            ChannelFilter::Pip => channel == Channel::Pip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract_with_variant() {
        let cli = Cli::try_parse_from([
            "envboot",
            "extract",
            "custom.tool.conda",
            "--variant",
            "gpu",
            "--target",
            "pip",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::Extract {
                path: Some("custom.tool.conda".into()),
                variant: Some(Variant::Gpu),
                target: Some(Target::Pip),
                channel: ChannelFilter::All,
                manifest: None,
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_variant() {
        let result = Cli::try_parse_from(["envboot", "extract", "a.b", "--variant", "tpu"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_env_file_requires_variant() {
        assert!(Cli::try_parse_from(["envboot", "env-file"]).is_err());
    }

    #[test]
    fn test_channel_filter() {
        assert!(ChannelFilter::All.accepts(Channel::Pip));
        assert!(ChannelFilter::Standard.accepts(Channel::Standard));
        assert!(!ChannelFilter::Standard.accepts(Channel::Pip));
        assert!(!ChannelFilter::Pip.accepts(Channel::Standard));
    }
}
