// src/mc/stats.rs
//! Terminal distribution statistics and the end-of-run summary

use crate::analytics::gbm_analytic;
use crate::mc::paths::{terminal_prices, GbmConfig};
use crate::mc::payoffs::european_call_price;
use ndarray::{Array2, ArrayView1};
use statrs::statistics::Statistics;

/// Summary statistics of the terminal price distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divides by n)
    pub std_dev: f64,
    /// Bessel-corrected standard deviation (divides by n - 1)
    pub sample_std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl TerminalStats {
    pub fn from_prices(prices: ArrayView1<f64>) -> Self {
        TerminalStats {
            count: prices.len(),
            mean: prices.iter().mean(),
            std_dev: prices.iter().population_std_dev(),
            sample_std_dev: prices.iter().std_dev(),
            min: Statistics::min(prices.iter()),
            max: Statistics::max(prices.iter()),
        }
    }
}

/// Theoretical vs simulated terminal statistics plus the call price
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub paths: usize,
    pub steps: usize,
    pub strike: f64,
    pub theoretical_mean: f64,
    pub theoretical_std: f64,
    pub simulated: TerminalStats,
    /// Undiscounted Monte Carlo price of the European call
    pub call_price: f64,
    /// Closed-form value of the same undiscounted payoff
    pub call_reference: f64,
}

impl SimulationSummary {
    pub fn from_grid(cfg: &GbmConfig, grid: &Array2<f64>) -> Self {
        let terminal = terminal_prices(grid);
        let simulated = TerminalStats::from_prices(terminal.view());
        let call_price = european_call_price(terminal.view(), cfg.strike);

        let summary = SimulationSummary {
            paths: grid.ncols(),
            steps: grid.nrows() - 1,
            strike: cfg.strike,
            theoretical_mean: gbm_analytic::gbm_terminal_mean(cfg.s0, cfg.mu, cfg.t),
            theoretical_std: gbm_analytic::gbm_terminal_std(cfg.s0, cfg.mu, cfg.sigma, cfg.t),
            simulated,
            call_price,
            call_reference: gbm_analytic::undiscounted_call_reference(
                cfg.s0, cfg.strike, cfg.mu, cfg.sigma, cfg.t,
            ),
        };

        tracing::info!(
            paths = summary.paths,
            simulated_mean = summary.simulated.mean,
            theoretical_mean = summary.theoretical_mean,
            call_price = summary.call_price,
            "Simulation summarized"
        );
        summary
    }

    /// Relative deviation of the simulated mean from the closed form
    pub fn mean_rel_error(&self) -> f64 {
        (self.simulated.mean - self.theoretical_mean).abs() / self.theoretical_mean
    }

    /// Relative deviation of the simulated std from the closed form
    pub fn std_rel_error(&self) -> f64 {
        (self.simulated.std_dev - self.theoretical_std).abs() / self.theoretical_std
    }
}

/// Equal-width histogram of a sample
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` bin edges, ascending
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning `[min, max]`
    ///
    /// Bins are half-open except the last, which also holds `max`. A constant
    /// sample gets a unit-wide range centred on its value.
    pub fn from_values(values: ArrayView1<f64>, bins: usize) -> Self {
        let bins = bins.max(1);
        let (mut lo, mut hi) = if values.is_empty() {
            (0.0, 1.0)
        } else {
            (Statistics::min(values.iter()), Statistics::max(values.iter()))
        };
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for &v in values.iter() {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Histogram { edges, counts }
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_terminal_stats() {
        let prices = array![90.0, 100.0, 110.0, 120.0];
        let stats = TerminalStats::from_prices(prices.view());

        assert_eq!(stats.count, 4);
        assert!((stats.mean - 105.0).abs() < 1e-12);
        // population variance = (225 + 25 + 25 + 225) / 4 = 125
        assert!((stats.std_dev - 125.0f64.sqrt()).abs() < 1e-12);
        assert!((stats.sample_std_dev - (500.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats.min, 90.0);
        assert_eq!(stats.max, 120.0);
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values = array![1.0, 2.0, 2.5, 3.0, 4.0, 5.0];
        let hist = Histogram::from_values(values.view(), 4);

        assert_eq!(hist.bins(), 4);
        assert_eq!(hist.edges.len(), 5);
        assert_eq!(hist.total(), 6);
        assert_eq!(hist.edges[0], 1.0);
        assert_eq!(hist.edges[4], 5.0);
        // edges: 1, 2, 3, 4, 5 -> [1,2) [2,3) [3,4) [4,5]
        assert_eq!(hist.counts, vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_histogram_constant_sample() {
        let values = array![7.0, 7.0, 7.0];
        let hist = Histogram::from_values(values.view(), 10);
        assert_eq!(hist.total(), 3);
    }
}
