use crate::config::toml_config::{MinebaseConfig, DEFAULT_CONFIG_FILE};
use crate::core::export::ExportFormat;
use crate::domain::edition::Edition;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "minebase", version)]
#[command(about = "Typed, validated access to the minecraft-data dataset")]
pub struct CliConfig {
    /// minecraft-data checkout; overrides `[data] dir`
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Configuration file (default: ./minebase.toml when present)
    #[arg(long, global = true, env = "MINEBASE_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long, global = true, help = "Log CPU and memory usage between phases")]
    pub monitor: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List supported versions in release order
    Versions {
        #[arg(long, value_enum, default_value = "pc")]
        edition: Edition,
    },
    /// Show the datasets of a version and their record counts
    Info {
        version: String,
        #[arg(long, value_enum, default_value = "pc")]
        edition: Edition,
    },
    /// Load and validate versions
    Validate {
        #[arg(required_unless_present = "all")]
        versions: Vec<String>,
        /// Validate every supported version of the edition
        #[arg(long, conflicts_with = "versions")]
        all: bool,
        #[arg(long, value_enum, default_value = "pc")]
        edition: Edition,
    },
    /// Export a dataset (or every list dataset with --bundle)
    Export {
        version: String,
        #[arg(required_unless_present = "bundle")]
        dataset: Option<String>,
        #[arg(long, value_enum, default_value = "pc")]
        edition: Edition,
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output directory; overrides `[export] output_dir`
        #[arg(long)]
        output: Option<String>,
        #[arg(long, conflicts_with = "dataset")]
        bundle: bool,
    },
    /// Download minecraft-data into the data directory
    Fetch {
        /// Archive URL; overrides `[fetch] url`
        #[arg(long)]
        url: Option<String>,
        /// Branch, tag or commit of the upstream repository
        #[arg(long, conflicts_with = "url")]
        git_ref: Option<String>,
    },
}

impl CliConfig {
    /// Effective settings: defaults, then the config file, then command line flags.
    pub fn load_settings(&self) -> Result<MinebaseConfig> {
        let mut settings = match &self.config {
            Some(path) => MinebaseConfig::from_file(path)?,
            None => MinebaseConfig::from_optional_file(DEFAULT_CONFIG_FILE)?,
        };

        if let Some(dir) = &self.data_dir {
            settings.data.dir = dir.clone();
        }
        if self.monitor {
            settings.monitoring.enabled = true;
        }

        match &self.command {
            Command::Fetch { url, git_ref } => {
                if let Some(url) = url {
                    settings.fetch.url = Some(url.clone());
                }
                if let Some(git_ref) = git_ref {
                    settings.fetch.url = None;
                    settings.fetch.git_ref = git_ref.clone();
                }
            }
            Command::Export {
                output: Some(output),
                ..
            } => {
                settings.export.output_dir = output.clone();
            }
            _ => {}
        }

        settings.validate()?;
        Ok(settings)
    }
}
