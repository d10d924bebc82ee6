// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command implementations.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tokio::runtime::{Builder, Runtime};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use fwdrop_common::{poll_once, DeployConfig, PollOutcome};

use crate::cli::Overrides;

/// Merge defaults, the config file and command-line overrides.
///
/// An explicit `path` must exist unless `allow_missing` is set, which lets
/// `config --write` create a new file.
pub fn load_config(
    path: Option<&Path>,
    overrides: Overrides,
    allow_missing: bool,
) -> Result<DeployConfig> {
    let loaded = match path {
        Some(path) if allow_missing => DeployConfig::load_if_exists(path),
        _ => DeployConfig::load_or_default(path),
    };
    let mut config = loaded.context("Failed to load configuration")?;
    overrides.apply(&mut config);
    Ok(config)
}

fn runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

/// Poll until Ctrl-C (or SIGTERM on Unix).
pub fn watch(config: &DeployConfig) -> Result<()> {
    config.validate()?;

    runtime()?.block_on(async {
        let cancel = CancellationToken::new();
        tokio::spawn(cancel_on_shutdown(cancel.clone()));

        fwdrop_common::run(config, cancel, |report| {
            println!("{}", report.success_line());
        })
        .await;
    });

    Ok(())
}

/// Run a single poll.
pub fn once(config: &DeployConfig) -> Result<()> {
    config.validate()?;

    let outcome = runtime()?
        .block_on(poll_once(config))
        .context("Deploy failed")?;

    match outcome {
        PollOutcome::Idle => info!("No firmware found in {}", config.source_dir.display()),
        PollOutcome::Deployed(report) => {
            for name in &report.cleanup.failed {
                warn!("Stale firmware {} is still on the device", name);
            }
            println!("{}", report.success_line());
        }
    }

    Ok(())
}

/// Print the effective configuration, optionally saving it.
pub fn show_config(config: &DeployConfig, path: Option<&Path>, write: bool) -> Result<()> {
    print!("{}", config.to_toml()?);

    if write {
        let Some(path) = path
            .map(Path::to_path_buf)
            .or_else(DeployConfig::default_path)
        else {
            bail!("No configuration directory on this platform, pass --config");
        };
        config.save(&path)?;
        info!("Configuration written to {}", path.display());
    }

    Ok(())
}

async fn cancel_on_shutdown(cancel: CancellationToken) {
    wait_for_shutdown().await;
    info!("Shutdown requested, finishing current poll");
    cancel.cancel();
}

#[cfg(unix)]
async fn wait_for_shutdown() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {}", e);
            ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() {
    ctrl_c().await;
}

// Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
