// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use fwdrop_common::{DeployConfig, MatchRule};

use crate::commands;

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "fwdrop")]
#[command(about = "Deploys firmware dropped in a folder onto a mounted device volume")]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Settings that take precedence over the configuration file.
#[derive(Args, Default)]
pub struct Overrides {
    /// Directory watched for new firmware (e.g., ~/Downloads)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub source: Option<PathBuf>,

    /// Mounted device volume (e.g., /Volumes/MBED)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub dest: Option<PathBuf>,

    /// Poll interval in milliseconds
    #[arg(short, long, value_name = "MS", global = true)]
    pub interval_ms: Option<u64>,

    /// Pause around device writes in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    pub settle_ms: Option<u64>,

    /// File name rule: suffix | extension
    #[arg(short, long, value_name = "RULE", global = true)]
    pub match_rule: Option<MatchRule>,
}

impl Overrides {
    pub fn apply(self, config: &mut DeployConfig) {
        if let Some(source) = self.source {
            config.source_dir = source;
        }
        if let Some(dest) = self.dest {
            config.dest_dir = dest;
        }
        if let Some(ms) = self.interval_ms {
            config.poll_interval_ms = ms;
        }
        if let Some(ms) = self.settle_ms {
            config.settle_delay_ms = ms;
        }
        if let Some(rule) = self.match_rule {
            config.match_rule = rule;
        }
    }
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Poll continuously until interrupted (default)
    Watch,

    /// Run a single poll and exit
    Once,

    /// Print the effective configuration
    Config {
        /// Also save it to the configuration file
        #[arg(long)]
        write: bool,
    },
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    let creating = matches!(cli.command, Some(Commands::Config { write: true }));
    let config = commands::load_config(cli.config.as_deref(), cli.overrides, creating)?;

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => commands::watch(&config),
        Commands::Once => commands::once(&config),
        Commands::Config { write } => commands::show_config(&config, cli.config.as_deref(), write),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_defaults_to_watch() {
        let cli = Cli::try_parse_from(["fwdrop"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fwdrop",
            "once",
            "--dest",
            "/media/DAPLINK",
            "--match-rule",
            "extension",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Once)));

        let mut config = DeployConfig::default();
        cli.overrides.apply(&mut config);
        assert_eq!(config.dest_dir, PathBuf::from("/media/DAPLINK"));
        assert_eq!(config.match_rule, MatchRule::Extension);
    }

    #[test]
    fn test_unset_overrides_keep_config() {
        let mut config = DeployConfig::default();
        let before = config.clone();
        Overrides::default().apply(&mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn test_config_write_creates_new_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("boards").join("nucleo.toml");
        let cli = Cli::try_parse_from([
            "fwdrop",
            "-c",
            path.to_str().unwrap(),
            "-d",
            "/Volumes/NODE_F401RE",
            "config",
            "--write",
        ])
        .unwrap();

        run(cli).unwrap();

        let saved = DeployConfig::load(&path).unwrap();
        assert_eq!(saved.dest_dir, PathBuf::from("/Volumes/NODE_F401RE"));
    }

    #[test]
    fn test_missing_config_file_rejected_for_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let cli = Cli::try_parse_from(["fwdrop", "-c", path.to_str().unwrap(), "once"]).unwrap();

        assert!(run(cli).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_match_rule_rejected() {
        assert!(Cli::try_parse_from(["fwdrop", "--match-rule", "glob"]).is_err());
    }
}
