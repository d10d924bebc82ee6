// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Drop-folder firmware deployment for mass-storage dev boards.
//!
//! Usage:
//!   fwdrop
//!   fwdrop --source ~/Downloads --dest /Volumes/MBED watch
//!   fwdrop once
//!   fwdrop config --write

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout only carries deploy announcements.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();
    cli::run(args)
}
