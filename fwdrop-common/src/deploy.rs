// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! A single deploy poll.
//!
//! One poll picks the first firmware file in the source directory, removes
//! stale images from the device volume, copies the new image over and then
//! removes it from the source directory. Nothing is kept between polls:
//! every call re-reads both directories.
//!
//! The source file is only removed once the copy has completed, so a failed
//! copy is retried on the next poll.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::fs;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::DeployConfig;
use crate::error::{DeployError, Result};
use crate::matcher::{is_stale_firmware, MatchRule};

/// 12-hour clock with AM/PM suffix, e.g. `03:14:07PM`.
pub const TIMESTAMP_FORMAT: &str = "%I:%M:%S%p";

/// Firmware file selected for deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Bare file name, reused on the destination volume.
    pub name: String,
    /// Full path in the source directory.
    pub path: PathBuf,
}

/// Result of clearing the destination volume.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaleCleanup {
    /// Names of the images that were removed.
    pub removed: Vec<String>,
    /// Names of the images still on the volume because removal failed.
    pub failed: Vec<String>,
}

/// Summary of a successful deploy.
#[derive(Clone, Debug)]
pub struct DeployReport {
    /// Bare file name of the deployed image.
    pub file_name: String,
    /// Full path of the image on the destination volume.
    pub destination: PathBuf,
    /// Bytes copied.
    pub bytes: u64,
    /// Stale images handled before the copy.
    pub cleanup: StaleCleanup,
    /// Local time the deploy completed.
    pub finished_at: DateTime<Local>,
}

impl DeployReport {
    /// Console line announcing the deploy, e.g. `Deploy success at 03:14:07PM`.
    pub fn success_line(&self) -> String {
        format!("Deploy success at {}", self.finished_at.format(TIMESTAMP_FORMAT))
    }
}

#[derive(Clone, Debug)]
pub enum PollOutcome {
    /// No firmware in the source directory; nothing was touched.
    Idle,
    Deployed(DeployReport),
}

/// Run one poll: find a candidate and deploy it.
pub async fn poll_once(config: &DeployConfig) -> Result<PollOutcome> {
    let Some(candidate) = find_candidate(&config.source_dir, config.match_rule).await? else {
        return Ok(PollOutcome::Idle);
    };

    info!("Found firmware {}", candidate.path.display());
    let report = deploy_candidate(&candidate, config).await?;
    Ok(PollOutcome::Deployed(report))
}

/// Select the first firmware file in `source_dir`, in directory listing order.
pub async fn find_candidate(source_dir: &Path, rule: MatchRule) -> Result<Option<Candidate>> {
    let unavailable = |source| DeployError::SourceUnavailable {
        path: source_dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(source_dir).await.map_err(unavailable)?;
    while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
        let Some(name) = entry_name(&entry) else {
            continue;
        };
        if !rule.matches(&name) {
            continue;
        }

        let path = entry.path();
        if !is_regular_file(&path).await {
            debug!("Skipping {}: not a regular file", path.display());
            continue;
        }

        return Ok(Some(Candidate { name, path }));
    }

    Ok(None)
}

/// Remove every stale firmware image from `dest_dir`.
///
/// A file that cannot be removed is logged and skipped. Only failing to list
/// the directory at all is an error.
pub async fn clear_stale(dest_dir: &Path, rule: MatchRule) -> Result<StaleCleanup> {
    let unavailable = |source| DeployError::DestinationUnavailable {
        path: dest_dir.to_path_buf(),
        source,
    };

    let mut cleanup = StaleCleanup::default();
    let mut entries = fs::read_dir(dest_dir).await.map_err(unavailable)?;
    while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
        let Some(name) = entry_name(&entry) else {
            continue;
        };
        if !is_stale_firmware(rule, &name) {
            continue;
        }

        let path = entry.path();
        if !is_regular_file(&path).await {
            continue;
        }

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed stale firmware {}", path.display());
                cleanup.removed.push(name);
            }
            Err(e) => {
                warn!("Failed to remove stale firmware {}: {}", path.display(), e);
                cleanup.failed.push(name);
            }
        }
    }

    Ok(cleanup)
}

/// Deploy an already selected candidate onto the destination volume.
///
/// Refuses to run when source and destination are the same directory, since
/// clearing stale images would delete the candidate itself.
pub async fn deploy_candidate(candidate: &Candidate, config: &DeployConfig) -> Result<DeployReport> {
    config.validate()?;

    let cleanup = clear_stale(&config.dest_dir, config.match_rule).await?;

    // Removable volumes flush deletes lazily
    sleep(config.settle_delay()).await;

    let destination = config.dest_dir.join(&candidate.name);
    let bytes = match fs::copy(&candidate.path, &destination).await {
        Ok(bytes) => bytes,
        Err(source) => {
            discard_partial(&destination).await;
            return Err(DeployError::CopyFailed {
                from: candidate.path.clone(),
                to: destination,
                source,
            });
        }
    };
    debug!("Copied {} bytes to {}", bytes, destination.display());

    fs::remove_file(&candidate.path)
        .await
        .map_err(|source| DeployError::SourceRemoveFailed {
            path: candidate.path.clone(),
            source,
        })?;

    sleep(config.settle_delay()).await;

    Ok(DeployReport {
        file_name: candidate.name.clone(),
        destination,
        bytes,
        cleanup,
        finished_at: Local::now(),
    })
}

async fn discard_partial(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!("Removed partial copy {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial copy {}: {}", path.display(), e),
    }
}

fn entry_name(entry: &fs::DirEntry) -> Option<String> {
    match entry.file_name().into_string() {
        Ok(name) => Some(name),
        Err(raw) => {
            debug!("Skipping non UTF-8 file name {:?}", raw);
            None
        }
    }
}

// Follows symlinks, so a link to a firmware file still counts.
async fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
