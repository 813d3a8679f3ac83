mod logging;

use std::path::PathBuf;

use clap::Parser;

use adsweep_core::arena::{ArenaConfig, AuctionArena};
use adsweep_core::{Evaluator, GridSpec, KnobRange, run_sweep};

use crate::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "adsweep")]
#[command(about = "Grid-search tuner for auction pacing parameters")]
struct Args {
    /// Directory the timestamped result CSV is written to
    #[arg(long, default_value = "experiment_logs")]
    log_dir: PathBuf,

    /// Simulator trials per parameter combination
    #[arg(long, default_value_t = 50)]
    trials: u32,

    /// Baseline opponents in the roster
    #[arg(long, default_value_t = 9)]
    opponents: usize,

    /// Days per simulated trial
    #[arg(long, default_value_t = 10)]
    days: u32,

    /// Base seed for the reference arena
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Pacing-rate range as start:stop:step
    #[arg(long, default_value = "0.8:1.0:0.05", value_parser = parse_range)]
    pacing_rate: KnobRange,

    /// Base-lift range as start:stop:step
    #[arg(long, default_value = "0.1:0.3:0.05", value_parser = parse_range)]
    base_lift: KnobRange,

    /// Steepness range as start:stop:step
    #[arg(long, default_value = "4.0:12.0:2.0", value_parser = parse_range)]
    steepness: KnobRange,

    /// Peak-multiplier range as start:stop:step
    #[arg(long, default_value = "2.0:4.0:1.0", value_parser = parse_range)]
    peak_multiplier: KnobRange,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn parse_range(s: &str) -> Result<KnobRange, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("expected start:stop:step, got {s:?}"));
    }
    let mut values = [0.0f64; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .trim()
            .parse()
            .map_err(|_| format!("not a number: {part:?}"))?;
    }
    Ok(KnobRange::new(values[0], values[1], values[2]))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    let grid = GridSpec {
        pacing_rate: args.pacing_rate,
        base_lift: args.base_lift,
        steepness: args.steepness,
        peak_multiplier: args.peak_multiplier,
    };

    let arena = AuctionArena::new(ArenaConfig {
        days: args.days,
        seed: args.seed,
        ..ArenaConfig::default()
    });
    let mut evaluator = Evaluator::new(arena, args.trials, args.opponents);

    let summary = run_sweep(&grid, &mut evaluator, &args.log_dir)?;

    println!();
    println!("{}", "=".repeat(50));
    println!("Results saved to {}", summary.store.display());
    println!(
        "Evaluated {} combinations ({} failed) in {:.1}s",
        summary.combinations,
        summary.failed,
        summary.elapsed.as_secs_f64()
    );
    match summary.best {
        Some((params, fitness)) => println!("Best fitness: {fitness:.2} at {params}"),
        None => println!("No viable configuration found"),
    }
    println!("{}", "=".repeat(50));

    Ok(())
}
