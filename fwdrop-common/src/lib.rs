// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Common types and logic for fwdrop.
//!
//! fwdrop watches a source directory (usually the download folder) for a
//! firmware binary and copies it onto a mounted device volume, replacing
//! any firmware image already there:
//! - [`matcher`]: which file names count as firmware
//! - [`config`]: directories, timings and the TOML config file
//! - [`deploy`]: a single poll (find, clear stale, copy, remove source)
//! - [`watch`]: the cancellable polling loop

pub mod config;
pub mod deploy;
pub mod error;
pub mod matcher;
pub mod watch;

// Re-export commonly used types
pub use config::{DeployConfig, DEFAULT_DEST_DIR, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SETTLE_DELAY_MS};
pub use deploy::{poll_once, Candidate, DeployReport, PollOutcome};
pub use error::{DeployError, Result};
pub use matcher::{MatchRule, FIRMWARE_SUFFIX};
pub use watch::{run, WatchStats};
