//! airport: four weeks of an airport terminal whose stations break down.
//!
//! Runs the reference airport (32 stations across seven kinds, seed 42)
//! unless a JSON configuration is given, prints how many units each kind
//! and each station completed and, with `--output`, writes the CSV results.
//!
//! ```text
//! airport                                  # reference run
//! airport --config terminal.json --output out/ --trace
//! airport --replications 20                # seed-derived replications
//! airport --dump-config > terminal.json    # start from the reference table
//! RUST_LOG=des_station=debug airport --horizon 600
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use des_kernel::NoopObserver;
use des_output::{CsvWriter, EventLogObserver, write_report};
use des_station::{TerminalBuilder, TerminalConfig, TerminalReport, replicate, summarize};

#[derive(Parser, Debug)]
#[command(name = "airport", about = "Discrete-event simulation of airport stations with breakdowns.")]
struct Args {
    /// JSON terminal configuration (defaults to the reference airport)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the configured seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured horizon, in minutes
    #[arg(long, value_name = "MINUTES")]
    horizon: Option<f64>,

    /// Directory for stations.csv and journeys.csv
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Also write events.csv, one row per dispatched event (needs --output)
    #[arg(long, action = clap::ArgAction::SetTrue)]
    trace: bool,

    /// Number of independent replications; more than one prints a summary only
    #[arg(long, default_value_t = 1)]
    replications: usize,

    /// Print the effective configuration as JSON and exit
    #[arg(long, action = clap::ArgAction::SetTrue)]
    dump_config: bool,
}

fn load_config(args: &Args) -> Result<TerminalConfig> {
    let mut config = match &args.config {
        Some(path) => TerminalConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => TerminalConfig::airport_default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(horizon) = args.horizon {
        config.horizon = horizon;
    }
    config.validate()?;
    Ok(config)
}

fn run_once(config: &TerminalConfig, args: &Args) -> Result<TerminalReport> {
    let mut sim = TerminalBuilder::new(config.clone()).build()?;

    let Some(dir) = &args.output else {
        if args.trace {
            warn!("--trace ignored without --output");
        }
        sim.run(&mut NoopObserver)?;
        return Ok(TerminalReport::from_sim(&sim));
    };

    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let writer = if args.trace { CsvWriter::with_trace(dir)? } else { CsvWriter::new(dir)? };
    let mut obs = EventLogObserver::new(writer);
    sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        bail!("writing events.csv: {e}");
    }

    let report = TerminalReport::from_sim(&sim);
    write_report(&mut obs.into_writer(), &report)?;
    info!(dir = %dir.display(), "results written");
    Ok(report)
}

fn print_report(report: &TerminalReport) {
    println!("{:<22} {:>8} {:>10} {:>9} {:>11}", "Kind", "Stations", "Completed", "Failures", "Suppressed");
    println!("{}", "-".repeat(64));
    for kind in report.kinds() {
        let rows: Vec<_> = report.stations_of(kind).collect();
        println!(
            "{:<22} {:>8} {:>10} {:>9} {:>11}",
            kind.label(),
            rows.len(),
            report.completed_by_kind(kind),
            report.failures_by_kind(kind),
            rows.iter().map(|s| s.suppressed).sum::<u64>(),
        );
    }
    for kind in report.kinds() {
        println!();
        println!("{}: {} {}", kind.label(), report.completed_by_kind(kind), kind.unit_verb());
        for station in report.stations_of(kind) {
            println!("  {station}  ({} failures, {} suppressed)", station.failures, station.suppressed);
        }
    }

    if let Some(log) = &report.journeys {
        println!();
        println!("Passengers: {} arrived, {} departed, {} still inside", log.arrived, log.departed, log.in_system());
        if let (Some(wait), Some(stay)) = (log.mean_wait(), log.mean_time_in_system()) {
            println!("  mean wait {wait:.2} min (max {:.2}), mean time in terminal {stay:.2} min", log.max_wait);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    println!("=== airport: discrete-event terminal simulation ===");
    println!(
        "Stations: {}  |  Horizon: {} min  |  Seed: {}",
        config.stations.iter().map(|s| s.count).sum::<u32>(),
        config.horizon,
        config.seed
    );
    println!();

    let t0 = Instant::now();
    if args.replications > 1 {
        if args.output.is_some() {
            warn!("--output ignored with more than one replication");
        }
        let reports = replicate(&config, args.replications)?;
        println!("Replications: {} in {:.3} s", reports.len(), t0.elapsed().as_secs_f64());
        println!();
        println!("{:<22} {:>12} {:>8} {:>8}", "Kind", "Mean", "Min", "Max");
        println!("{}", "-".repeat(53));
        for row in summarize(&reports) {
            println!("{:<22} {:>12.1} {:>8} {:>8}", row.kind.label(), row.mean, row.min, row.max);
        }
        return Ok(());
    }

    let report = run_once(&config, &args)?;
    println!(
        "Simulation complete in {:.3} s ({} events)",
        t0.elapsed().as_secs_f64(),
        report.dispatched
    );
    println!();
    print_report(&report);
    Ok(())
}
