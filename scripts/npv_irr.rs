// scripts/npv_irr.rs
use clap::Parser;
use finsim::cashflow::irr::{IrrAnalysis, IrrConfig};
use finsim::cashflow::CashFlows;
use finsim::input::read_cash_flows;
use finsim::logging::init_logging;
use finsim::output::{self, ExportSet};
use finsim::{report, FinResult};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// NPV table and every IRR of a cash-flow sequence
#[derive(Parser, Debug)]
#[command(name = "npv_irr")]
struct Args {
    /// Comma-separated cash flows starting at t=0; prompts on stdin when absent
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    cash_flows: Option<Vec<f64>>,

    /// Lowest rate scanned for IRRs
    #[arg(long, default_value_t = -0.99, allow_negative_numbers = true)]
    rate_min: f64,

    /// Highest rate scanned for IRRs
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    rate_max: f64,

    /// Rate grid spacing
    #[arg(long, default_value_t = 0.001)]
    step: f64,

    /// Directory for CSV exports of cash flows, NPV profile and IRRs
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn config(&self) -> IrrConfig {
        IrrConfig {
            rate_min: self.rate_min,
            rate_max: self.rate_max,
            step: self.step,
            ..Default::default()
        }
    }
}

fn run(args: &Args) -> FinResult<()> {
    let cash_flows = match &args.cash_flows {
        Some(values) => CashFlows::try_new(values.clone())?,
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            read_cash_flows(&mut stdin.lock(), &mut stdout.lock())?
        }
    };

    let analysis = IrrAnalysis::run(cash_flows, &args.config())?;
    print!("{}", report::irr_report(&analysis));

    if let Some(dir) = &args.export_dir {
        let written = output::export_irr(dir, ExportSet::NPV, &analysis)?;
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
            tracing::error!(error = %e, "NPV/IRR analysis failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
