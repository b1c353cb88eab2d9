// scripts/gbm_sim.rs
use clap::Parser;
use finsim::logging::init_logging;
use finsim::mc::paths::{simulate_paths, terminal_prices, GbmConfig};
use finsim::mc::stats::{Histogram, SimulationSummary};
use finsim::output::{self, ExportSet};
use finsim::{report, rng, FinResult};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Monte Carlo simulation of GBM stock-price paths with European call pricing
#[derive(Parser, Debug)]
#[command(name = "gbm_sim")]
struct Args {
    /// Initial stock price
    #[arg(long, default_value_t = 100.0)]
    s0: f64,

    /// Annual drift
    #[arg(long, default_value_t = 0.08, allow_negative_numbers = true)]
    mu: f64,

    /// Annual volatility
    #[arg(long, default_value_t = 0.20)]
    sigma: f64,

    /// Horizon in years
    #[arg(long, default_value_t = 1.0)]
    t: f64,

    /// Number of simulated paths
    #[arg(short = 'n', long, default_value_t = 1000)]
    paths: usize,

    /// Time step in years (default: one trading day)
    #[arg(long)]
    dt: Option<f64>,

    /// Call option strike
    #[arg(short = 'k', long, default_value_t = 105.0)]
    strike: f64,

    /// RNG seed for a reproducible run (default: OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Histogram bins
    #[arg(long, default_value_t = 50)]
    bins: usize,

    /// Directory for CSV exports of paths, histogram and summary
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn config(&self) -> GbmConfig {
        let defaults = GbmConfig::default();
        GbmConfig {
            s0: self.s0,
            mu: self.mu,
            sigma: self.sigma,
            t: self.t,
            dt: self.dt.unwrap_or(defaults.dt),
            paths: self.paths,
            strike: self.strike,
            seed: self.seed,
        }
    }
}

fn run(args: &Args) -> FinResult<()> {
    let cfg = args.config();
    cfg.validate()?;

    let started = Instant::now();
    let mut rng = rng::rng_from_seed(cfg.seed);
    let grid = simulate_paths(&cfg, &mut rng);
    let summary = SimulationSummary::from_grid(&cfg, &grid);
    tracing::info!(elapsed_ms = started.elapsed().as_secs_f64() * 1000.0, "Simulation finished");

    let hist = Histogram::from_values(terminal_prices(&grid).view(), args.bins);

    println!("Histogram of Final Stock Prices:");
    print!("{}", report::text_histogram(&hist, 40));
    print!("{}", report::gbm_summary(&summary));

    if let Some(dir) = &args.export_dir {
        let written = output::export_gbm(dir, ExportSet::GBM, &grid, &hist, &summary)?;
        println!("Wrote {} files to {}", written.len(), dir.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(&args.log_level) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "GBM simulation failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
