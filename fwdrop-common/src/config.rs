// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Deploy configuration and its TOML file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DeployError, Result};
use crate::matcher::MatchRule;

// --- Defaults ---

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

/// Mount point of an mbed board's mass-storage volume on macOS.
pub const DEFAULT_DEST_DIR: &str = "/Volumes/MBED";

pub const CONFIG_DIR_NAME: &str = "fwdrop";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Everything one deploy loop needs.
///
/// Missing keys in the config file fall back to [`Default`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Directory scanned for new firmware.
    pub source_dir: PathBuf,
    /// Mounted device volume receiving the firmware.
    pub dest_dir: PathBuf,
    pub poll_interval_ms: u64,
    /// Pause after clearing stale images and after removing the source.
    pub settle_delay_ms: u64,
    pub match_rule: MatchRule,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            match_rule: MatchRule::default(),
        }
    }
}

impl DeployConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Per-user config file location, e.g. `~/.config/fwdrop/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load a config file. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| DeployError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| DeployError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or the built-in defaults when it does not exist yet.
    pub fn load_if_exists(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("{} does not exist, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load `path` if given, otherwise the per-user file if it exists,
    /// otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;
        let write_err = |source| DeployError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, contents).map_err(write_err)
    }

    /// Reject configurations that would delete the firmware being deployed.
    pub fn validate(&self) -> Result<()> {
        if same_dir(&self.source_dir, &self.dest_dir) {
            return Err(DeployError::SameDirectory(self.source_dir.clone()));
        }
        Ok(())
    }
}

/// The platform download directory, or `~/Downloads` where there is none.
pub fn default_source_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
