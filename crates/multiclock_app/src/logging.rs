// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global log subscriber.
///
/// Logs go to standard error so that standard output only carries the clock display.
pub fn init(verbose: bool) -> Result<()> {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };

    let terminal_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_layer)
        .try_init()
        .context("Failed to install the log subscriber")
}
