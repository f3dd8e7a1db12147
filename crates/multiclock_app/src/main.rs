// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shows the current time in several timezones on the terminal.
//!
//! # Usage
//!
//! ```bash
//! multiclock --config settings.json
//! ```
//!
//! Renders one frame per tick until interrupted with Ctrl+C. Use `--once` to print a single
//! frame, or `--ticks N` to stop after `N` ticks.

mod bell;
mod logging;
mod terminal;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use multiclock::{Clock, Dashboard, Settings, TickScheduler};
use tokio::sync::oneshot;

use crate::bell::BellChimePlayer;
use crate::terminal::TerminalPresenter;

#[derive(Parser, Debug)]
#[command(name = "multiclock", version, about = "Shows the current time in several timezones")]
struct Cli {
    /// Path to the settings file, created with defaults when missing
    #[arg(long, value_name = "PATH", default_value = "settings.json")]
    config: PathBuf,

    /// Render a single frame and exit
    #[arg(long, conflicts_with = "ticks")]
    once: bool,

    /// Stop after this many ticks
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    ticks: Option<u64>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let (settings, origin) = Settings::load_or_init(&cli.config);
    tracing::info!(path = %cli.config.display(), ?origin, clocks = settings.clocks.len(), "settings ready");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build the async runtime")?;

    runtime.block_on(run(&cli, settings))
}

async fn run(cli: &Cli, settings: Settings) -> Result<()> {
    let clock = Clock::new_system();
    let interval = settings.interval();
    let dashboard = Dashboard::new(settings, clock.clone());
    let mut presenter = TerminalPresenter::new(std::io::stdout());
    let mut bell = BellChimePlayer::new(std::io::stdout());

    if cli.once {
        let report = dashboard.render_tick(&mut presenter, &mut bell);
        tracing::debug!(rendered = report.rendered, failed = report.failed, "single frame rendered");
        return Ok(());
    }

    let limit = cli.ticks;
    let (done_tx, done_rx) = oneshot::channel();
    let mut done_tx = Some(done_tx);

    let scheduler = TickScheduler::start(&clock, interval, move |tick| {
        let report = dashboard.render_tick(&mut presenter, &mut bell);
        tracing::debug!(
            tick.sequence = tick.sequence(),
            rendered = report.rendered,
            failed = report.failed,
            chimed = report.chimed,
            "tick rendered"
        );

        if limit.is_some_and(|limit| tick.sequence() + 1 >= limit)
            && let Some(done) = done_tx.take()
        {
            // The receiver only disappears when the process is already shutting down.
            let _ = done.send(());
        }

        Ok(())
    });

    tokio::select! {
        _ = done_rx => {}
        signal = tokio::signal::ctrl_c() => signal.context("Failed to listen for Ctrl+C")?,
    }

    scheduler.stop();
    tracing::info!(ticks = scheduler.ticks(), "clock stopped");

    Ok(())
}
