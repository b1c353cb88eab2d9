// src/output.rs
//! CSV export of every series the reports plot
//!
//! Each file is plain comma-separated text with a header row, ready for any
//! plotting tool.

use crate::cashflow::bisection::RootEstimate;
use crate::cashflow::irr::IrrAnalysis;
use crate::cashflow::npv::NpvPoint;
use crate::error::{FinError, FinResult};
use crate::mc::stats::{Histogram, SimulationSummary};
use bitflags::bitflags;
use ndarray::Array2;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Rates shown on the NPV profile export
pub const PROFILE_RATE_RANGE: (f64, f64) = (-0.1, 10.0);

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExportSet: u32 {
        const NONE        = 0;
        const PATHS       = 1 << 0;
        const HISTOGRAM   = 1 << 1;
        const SUMMARY     = 1 << 2;
        const CASH_FLOWS  = 1 << 3;
        const NPV_PROFILE = 1 << 4;
        const IRRS        = 1 << 5;

        const GBM = Self::PATHS.bits() | Self::HISTOGRAM.bits() | Self::SUMMARY.bits();
        const NPV = Self::CASH_FLOWS.bits() | Self::NPV_PROFILE.bits() | Self::IRRS.bits();
    }
}

fn create(path: &Path) -> io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// One row per time step, one column per path
pub fn write_paths_to_csv(path: &Path, grid: &Array2<f64>) -> io::Result<()> {
    let mut file = create(path)?;
    write!(file, "step")?;
    for i in 0..grid.ncols() {
        write!(file, ",path_{}", i)?;
    }
    writeln!(file)?;
    for (step, row) in grid.rows().into_iter().enumerate() {
        write!(file, "{}", step)?;
        for s in row.iter() {
            write!(file, ",{}", s)?;
        }
        writeln!(file)?;
    }
    file.flush()
}

pub fn write_histogram_to_csv(path: &Path, hist: &Histogram) -> io::Result<()> {
    let mut file = create(path)?;
    writeln!(file, "bin_start,bin_end,count")?;
    for (i, count) in hist.counts.iter().enumerate() {
        writeln!(file, "{},{},{}", hist.edges[i], hist.edges[i + 1], count)?;
    }
    file.flush()
}

pub fn write_summary_to_csv(path: &Path, summary_data: &[(&str, String)]) -> io::Result<()> {
    let mut file = create(path)?;
    writeln!(file, "key,value")?;
    writeln!(file, "generated_at,{}", chrono::Utc::now().to_rfc3339())?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    file.flush()
}

pub fn write_cash_flows_to_csv(path: &Path, cash_flows: &[f64]) -> io::Result<()> {
    let mut file = create(path)?;
    writeln!(file, "period,cash_flow")?;
    for (t, cf) in cash_flows.iter().enumerate() {
        writeln!(file, "{},{}", t, cf)?;
    }
    file.flush()
}

pub fn write_npv_profile_to_csv(path: &Path, points: &[NpvPoint]) -> io::Result<()> {
    let mut file = create(path)?;
    writeln!(file, "rate,npv")?;
    for p in points {
        writeln!(file, "{},{}", p.rate, p.npv)?;
    }
    file.flush()
}

pub fn write_irrs_to_csv(path: &Path, roots: &[RootEstimate]) -> io::Result<()> {
    let mut file = create(path)?;
    writeln!(file, "index,rate,npv,iterations,converged")?;
    for (i, r) in roots.iter().enumerate() {
        writeln!(
            file,
            "{},{},{},{},{}",
            i + 1,
            r.rate,
            r.npv,
            r.iterations,
            r.converged
        )?;
    }
    file.flush()
}

fn ensure_dir(dir: &Path) -> FinResult<()> {
    fs::create_dir_all(dir)
        .map_err(|e| FinError::io(format!("creating {}", dir.display()), e))
}

fn export_file<F>(dir: &Path, name: &str, written: &mut Vec<PathBuf>, write: F) -> FinResult<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    let path = dir.join(name);
    write(&path).map_err(|e| FinError::io(format!("writing {}", path.display()), e))?;
    tracing::info!(path = %path.display(), "Exported");
    written.push(path);
    Ok(())
}

/// Write the selected GBM series into `dir`, returning the files written
pub fn export_gbm(
    dir: &Path,
    which: ExportSet,
    grid: &Array2<f64>,
    hist: &Histogram,
    summary: &SimulationSummary,
) -> FinResult<Vec<PathBuf>> {
    ensure_dir(dir)?;
    let mut written = Vec::new();
    if which.contains(ExportSet::PATHS) {
        export_file(dir, "gbm_paths.csv", &mut written, |p| write_paths_to_csv(p, grid))?;
    }
    if which.contains(ExportSet::HISTOGRAM) {
        export_file(dir, "gbm_terminal_histogram.csv", &mut written, |p| {
            write_histogram_to_csv(p, hist)
        })?;
    }
    if which.contains(ExportSet::SUMMARY) {
        let rows = [
            ("paths", summary.paths.to_string()),
            ("steps", summary.steps.to_string()),
            ("strike", summary.strike.to_string()),
            ("theoretical_mean", summary.theoretical_mean.to_string()),
            ("simulated_mean", summary.simulated.mean.to_string()),
            ("theoretical_std", summary.theoretical_std.to_string()),
            ("simulated_std", summary.simulated.std_dev.to_string()),
            ("call_price", summary.call_price.to_string()),
            ("call_reference", summary.call_reference.to_string()),
        ];
        export_file(dir, "gbm_summary.csv", &mut written, |p| {
            write_summary_to_csv(p, &rows)
        })?;
    }
    Ok(written)
}

/// Write the selected NPV/IRR series into `dir`, returning the files written
pub fn export_irr(dir: &Path, which: ExportSet, analysis: &IrrAnalysis) -> FinResult<Vec<PathBuf>> {
    ensure_dir(dir)?;
    let mut written = Vec::new();
    if which.contains(ExportSet::CASH_FLOWS) {
        export_file(dir, "cash_flows.csv", &mut written, |p| {
            write_cash_flows_to_csv(p, &analysis.cash_flows)
        })?;
    }
    if which.contains(ExportSet::NPV_PROFILE) {
        let (lo, hi) = PROFILE_RATE_RANGE;
        let points = analysis.irrs.profile_between(lo, hi);
        export_file(dir, "npv_profile.csv", &mut written, |p| {
            write_npv_profile_to_csv(p, &points)
        })?;
    }
    if which.contains(ExportSet::IRRS) {
        export_file(dir, "irrs.csv", &mut written, |p| {
            write_irrs_to_csv(p, &analysis.irrs.roots)
        })?;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cashflow::irr::IrrConfig;
    use crate::cashflow::CashFlows;
    use ndarray::array;

    #[test]
    fn test_paths_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paths.csv");
        let grid = array![[100.0, 100.0], [101.0, 99.0]];
        write_paths_to_csv(&path, &grid).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["step,path_0,path_1", "0,100,100", "1,101,99"]);
    }

    #[test]
    fn test_export_irr_selected_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let analysis =
            IrrAnalysis::run(CashFlows::new(vec![-100.0, 121.0]), &IrrConfig::default()).unwrap();

        let written =
            export_irr(dir.path(), ExportSet::CASH_FLOWS | ExportSet::IRRS, &analysis).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join("cash_flows.csv").exists());
        assert!(!dir.path().join("npv_profile.csv").exists());

        let irrs = fs::read_to_string(dir.path().join("irrs.csv")).unwrap();
        assert!(irrs.starts_with("index,rate,npv,iterations,converged\n1,0.2"));
    }

    #[test]
    fn test_export_sets() {
        assert!(ExportSet::GBM.contains(ExportSet::PATHS | ExportSet::HISTOGRAM));
        assert!(!ExportSet::GBM.intersects(ExportSet::NPV));
    }
}
