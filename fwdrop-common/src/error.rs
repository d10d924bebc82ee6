// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Error types for deploy operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("source directory {} unavailable: {source}", path.display())]
    SourceUnavailable { path: PathBuf, source: io::Error },

    #[error("destination {} unavailable (volume not mounted?): {source}", path.display())]
    DestinationUnavailable { path: PathBuf, source: io::Error },

    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("firmware deployed but {} could not be removed: {source}", path.display())]
    SourceRemoveFailed { path: PathBuf, source: io::Error },

    #[error("source and destination are the same directory: {}", .0.display())]
    SameDirectory(PathBuf),

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("failed to write config {}: {source}", path.display())]
    ConfigWrite { path: PathBuf, source: io::Error },
}

impl DeployError {
    /// Whether the condition is expected to clear up by itself, such as a
    /// device volume that is not mounted yet.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DeployError::SourceUnavailable { .. } | DeployError::DestinationUnavailable { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
