// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tzlink: timezone reporter for a paired device.
//!
//! Sends the local UTC offset (and hemisphere, when a position is available)
//! once at startup and then on a fixed interval until interrupted.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use tzlink::logging::setup_logging;
use tzlink::{Config, Overrides, Reporter, Scheduler};

/// tzlink: keep a paired device's timezone in sync
#[derive(Parser, Debug)]
#[command(name = "tzlink", version)]
#[command(about = "Send the local timezone offset and hemisphere to a paired device")]
struct Args {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between reports
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Report this offset (seconds east of UTC) instead of the system zone
    #[arg(long, allow_negative_numbers = true)]
    utc_offset: Option<i32>,

    /// Use a fixed latitude instead of looking up the location
    #[arg(long, allow_negative_numbers = true, conflicts_with = "no_location")]
    latitude: Option<f64>,

    /// Never look up the location; reports omit the hemisphere
    #[arg(long)]
    no_location: bool,

    /// WebSocket URL of the device bridge
    #[arg(long, conflicts_with = "stdout")]
    url: Option<String>,

    /// Write messages to stdout as JSON lines
    #[arg(long)]
    stdout: bool,

    /// Use numeric message keys (10, 11)
    #[arg(long)]
    numeric_keys: bool,

    /// Send a single report and exit
    #[arg(long)]
    once: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            interval_secs: self.interval_secs,
            utc_offset: self.utc_offset,
            latitude: self.latitude,
            no_location: self.no_location,
            url: self.url.clone(),
            stdout: self.stdout,
            numeric_keys: self.numeric_keys,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(args.config.as_deref())?.with_overrides(&args.overrides())?;

    if args.print_config {
        print!("{}", toml::to_string(&config)?);
        return Ok(());
    }

    let scheduler = Scheduler::new(
        config.scheduler_config(),
        config.clock()?,
        config.location.build(),
        config.transport.build(),
    )?;
    let mut reporter = Reporter::new(scheduler);

    if args.once {
        reporter.run_once().await?;
        return Ok(());
    }

    reporter.ready()?;

    tokio::signal::ctrl_c().await?;
    info!("interrupted, stopping timezone sync");

    if let Some(handle) = reporter.into_handle() {
        handle.stop();
        handle.join().await;
    }

    Ok(())
}
