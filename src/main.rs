//! Dakota - chip configuration inspector
//!
//! Reads a Trellis-style chip configuration file and prints either a
//! summary of the chip or the raw parse events.
//!
//! # Usage
//!
//! ```bash
//! dakota design.config
//! dakota --events --log-level debug design.config
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use dakota_core::{conf, error::Result, ChipConfig, Event};
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Trellis chip configuration inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config_file: PathBuf,

    /// Print every parse event instead of a summary
    #[arg(short, long)]
    events: bool,

    /// Filter log messages more verbose than the given level
    #[arg(short, long, value_name = "LEVEL", default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    /// Override log filters using RUST_LOG directives
    #[arg(short = 'f', long, value_name = "FILTERS")]
    log_filter: Option<String>,
}

fn setup_logging(args: &Args) {
    let mut logger = Builder::new();

    if let Some(filters) = &args.log_filter {
        logger.parse_filters(filters);
    } else {
        logger.filter_level(args.log_level);
    }

    logger.target(Target::Stderr).init();
}

fn print_events(args: &Args) -> Result<()> {
    let mut events: Vec<Event> = Vec::new();
    let result = conf::parse_file(&args.config_file, &mut events);

    // Events before a failure are still shown
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for event in &events {
        writeln!(out, "{}", event)?;
    }

    result
}

fn print_summary(args: &Args) -> Result<()> {
    let chip = ChipConfig::from_file(&args.config_file)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "device:    {}", chip.device.as_deref().unwrap_or("-"))?;
    writeln!(out, "settings:  {}", chip.sysconfig.len())?;
    writeln!(out, "tiles:     {}", chip.tiles.len())?;
    writeln!(out, "arcs:      {}", chip.arc_count())?;
    writeln!(out, "brams:     {}", chip.brams.len())?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args);

    log::info!("reading {}", args.config_file.display());

    let result = if args.events {
        print_events(&args)
    } else {
        print_summary(&args)
    };

    if let Err(e) = &result {
        log::error!("{}", e);
    }

    result
}
