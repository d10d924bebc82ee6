// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Cancellable polling loop around [`poll_once`].

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::DeployConfig;
use crate::deploy::{poll_once, DeployReport, PollOutcome};

/// Counters accumulated over the lifetime of one [`run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WatchStats {
    pub polls: u64,
    pub deploys: u64,
    pub failures: u64,
}

/// Poll until `cancel` fires, calling `on_deploy` after every deploy.
///
/// Per-poll failures are logged and retried on the next interval; they never
/// end the loop. Cancellation interrupts the interval sleep but never a poll
/// in progress, so a source file is not left half-deployed.
pub async fn run<F>(config: &DeployConfig, cancel: CancellationToken, mut on_deploy: F) -> WatchStats
where
    F: FnMut(&DeployReport),
{
    info!(
        "Watching {} for firmware, deploying to {} every {} ms",
        config.source_dir.display(),
        config.dest_dir.display(),
        config.poll_interval_ms
    );

    let mut stats = WatchStats::default();
    while !cancel.is_cancelled() {
        stats.polls += 1;

        match poll_once(config).await {
            Ok(PollOutcome::Idle) => {}
            Ok(PollOutcome::Deployed(report)) => {
                stats.deploys += 1;
                on_deploy(&report);
            }
            Err(e) if e.is_transient() => {
                stats.failures += 1;
                warn!("Deploy skipped: {}", e);
            }
            Err(e) => {
                stats.failures += 1;
                error!("Deploy failed: {}", e);
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = sleep(config.poll_interval()) => {}
        }
    }

    info!(
        "Stopped after {} polls ({} deploys, {} failures)",
        stats.polls, stats.deploys, stats.failures
    );
    stats
}
