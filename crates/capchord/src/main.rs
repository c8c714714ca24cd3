#![warn(missing_docs)]

//! Entry point for the `capchord` binary.

mod check;
mod cli;
mod display;
mod error;
mod input;

use std::{io, process, sync::Arc};

use capchord_engine::{Engine, FocusSource, StaticFocus};
use clap::Parser;
use keymode::{Clock, SystemClock};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::{Cli, Commands, RunArgs},
    display::StdoutDisplay,
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {}", err.pretty());
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen mode.
fn run() -> Result<()> {
    let Cli {
        log,
        run: run_args,
        command,
    } = Cli::parse();
    let env_filter = log.env_filter();
    registry()
        .with(env_filter)
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .try_init()
        .ok();

    match command {
        Some(Commands::Check(args)) => check::run(&args),
        None => run_chords(&run_args),
    }
}

/// Load the configuration and feed stdin through the engine until input ends.
fn run_chords(args: &RunArgs) -> Result<()> {
    let path = config::resolve_config_path(args.config.as_deref())?;
    let mut cfg = config::load_from_path(&path)?;
    if let Some(timeout) = args.timeout {
        cfg.settings.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
    }
    if args.announce {
        cfg.settings.announce_completion = true;
    }

    let focus = args
        .app
        .as_ref()
        .map(|app| Box::new(StaticFocus::new(app.clone())) as Box<dyn FocusSource>);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut engine = Engine::from_config(&cfg, &clock, StdoutDisplay, focus)?;
    info!(
        path = %path.display(),
        apps = engine.router().apps().count(),
        timeout_ms = cfg.settings.timeout_ms,
        "capchord ready"
    );

    let keys = input::spawn_reader(io::stdin());
    for ch in keys {
        engine.process_chord(ch);
    }
    Ok(())
}
