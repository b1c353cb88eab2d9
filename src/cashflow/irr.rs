// src/cashflow/irr.rs
//! Multi-root IRR search
//!
//! # Algorithm
//!
//! 1. Evaluate NPV on an evenly spaced rate grid `rate_min + i * step`
//! 2. Every adjacent pair with strictly opposite NPV signs is a bracket; a grid
//!    point where NPV is exactly zero closes a bracket with its left neighbour
//! 3. Bisect each bracket independently
//!
//! Roots come back in ascending rate order because brackets follow the grid.
//!
//! # Limitations
//!
//! A fixed grid cannot see a root where NPV touches zero without crossing it,
//! nor two roots closer together than one `step`. Both are inherent to grid
//! bracketing and are not refined adaptively.

use crate::cashflow::bisection::{
    irr_bisection_interval, RootEstimate, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE,
};
use crate::cashflow::npv::{npv, npv_table, NpvPoint, TABLE_RATES};
use crate::cashflow::CashFlows;
use crate::error::{validation::*, FinError, FinResult};
use rayon::prelude::*;

const MAX_GRID_POINTS: usize = 10_000_000;

/// Rate range, scan resolution and bisection settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrConfig {
    pub rate_min: f64,
    pub rate_max: f64,
    pub step: f64,
    pub tol: f64,
    pub max_iter: usize,
}

impl Default for IrrConfig {
    fn default() -> Self {
        IrrConfig {
            rate_min: -0.99,
            rate_max: 10.0,
            step: 0.001,
            tol: DEFAULT_TOLERANCE,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

impl IrrConfig {
    pub fn validate(&self) -> FinResult<()> {
        validate_rate("rate_min", self.rate_min)?;
        validate_finite("rate_max", self.rate_max)?;
        validate_positive("step", self.step)?;
        validate_positive("tol", self.tol)?;
        if self.rate_max <= self.rate_min {
            return Err(FinError::InvalidConfiguration {
                field: "rate_max".to_string(),
                reason: format!("must exceed rate_min ({})", self.rate_min),
            });
        }
        if self.grid_len() > MAX_GRID_POINTS {
            return Err(FinError::InvalidConfiguration {
                field: "step".to_string(),
                reason: format!(
                    "grid of {} points exceeds maximum allowed ({})",
                    self.grid_len(),
                    MAX_GRID_POINTS
                ),
            });
        }
        Ok(())
    }

    /// Number of grid points, both ends included
    pub fn grid_len(&self) -> usize {
        if !(self.rate_max >= self.rate_min) || !(self.step > 0.0) {
            return 0;
        }
        ((self.rate_max - self.rate_min) / self.step + 1e-9).floor() as usize + 1
    }

    /// Evenly spaced candidate rates, computed by index to avoid drift
    pub fn rate_grid(&self) -> Vec<f64> {
        (0..self.grid_len())
            .map(|i| self.rate_min + i as f64 * self.step)
            .collect()
    }
}

/// Adjacent grid rates whose NPVs bracket a root
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub low: f64,
    pub high: f64,
}

/// Every IRR found in the scanned range plus the evaluated NPV profile
#[derive(Debug, Clone, PartialEq)]
pub struct IrrResult {
    pub roots: Vec<RootEstimate>,
    pub brackets: Vec<Bracket>,
    pub profile: Vec<NpvPoint>,
}

impl IrrResult {
    /// Root rates in ascending order
    pub fn rates(&self) -> Vec<f64> {
        self.roots.iter().map(|r| r.rate).collect()
    }

    pub fn has_irr(&self) -> bool {
        !self.roots.is_empty()
    }

    /// Profile points with `lo <= rate <= hi`
    pub fn profile_between(&self, lo: f64, hi: f64) -> Vec<NpvPoint> {
        self.profile
            .iter()
            .copied()
            .filter(|p| p.rate >= lo && p.rate <= hi)
            .collect()
    }
}

/// NPV at every rate, evaluated in parallel, order preserved
pub fn npv_profile(cash_flows: &[f64], rates: &[f64]) -> Vec<NpvPoint> {
    rates
        .par_iter()
        .map(|&rate| NpvPoint {
            rate,
            npv: npv(rate, cash_flows),
        })
        .collect()
}

/// Locate sign-change brackets along a profile
pub fn find_brackets(profile: &[NpvPoint]) -> Vec<Bracket> {
    profile
        .windows(2)
        .enumerate()
        .filter(|(i, w)| {
            let (a, b) = (w[0].npv, w[1].npv);
            a * b < 0.0 || (b == 0.0 && a != 0.0) || (*i == 0 && a == 0.0 && b != 0.0)
        })
        .map(|(_, w)| Bracket {
            low: w[0].rate,
            high: w[1].rate,
        })
        .collect()
}

/// Collapse roots no more than one grid step apart into the one with the
/// smallest |NPV|
///
/// Adjacent brackets sharing a grid point near a tangent root can both resolve
/// to (nearly) the same rate. Input must be in ascending rate order.
pub fn merge_adjacent_roots(roots: Vec<RootEstimate>, step: f64) -> Vec<RootEstimate> {
    let window = step * (1.0 + 1e-9);
    let mut merged: Vec<RootEstimate> = Vec::with_capacity(roots.len());
    for root in roots {
        match merged.last_mut() {
            Some(last) if root.rate - last.rate <= window => {
                tracing::debug!(kept = last.rate, other = root.rate, "Merging adjacent roots");
                if root.npv.abs() < last.npv.abs() {
                    *last = root;
                }
            }
            _ => merged.push(root),
        }
    }
    merged
}

/// Find every IRR of `cash_flows` inside `[cfg.rate_min, cfg.rate_max]`
///
/// An empty root list means NPV never changes sign on the grid: the flows are
/// profitable (or unprofitable) at every scanned rate.
pub fn find_all_irrs(cash_flows: &[f64], cfg: &IrrConfig) -> IrrResult {
    let rates = cfg.rate_grid();
    let profile = npv_profile(cash_flows, &rates);
    let brackets = find_brackets(&profile);

    let candidates: Vec<RootEstimate> = brackets
        .par_iter()
        .filter_map(|b| irr_bisection_interval(cash_flows, b.low, b.high, cfg.tol, cfg.max_iter))
        .collect();
    let roots = merge_adjacent_roots(candidates, cfg.step);

    let unconverged = roots.iter().filter(|r| !r.converged).count();
    if unconverged > 0 {
        tracing::warn!(unconverged, "Some IRR estimates did not reach tolerance");
    }
    tracing::info!(
        grid_points = rates.len(),
        brackets = brackets.len(),
        roots = roots.len(),
        "IRR scan complete"
    );

    IrrResult {
        roots,
        brackets,
        profile,
    }
}

/// Everything the NPV/IRR report needs for one cash-flow sequence
#[derive(Debug, Clone, PartialEq)]
pub struct IrrAnalysis {
    pub cash_flows: CashFlows,
    pub table: Vec<NpvPoint>,
    pub irrs: IrrResult,
    pub sign_changes: usize,
}

impl IrrAnalysis {
    pub fn run(cash_flows: CashFlows, cfg: &IrrConfig) -> FinResult<Self> {
        cfg.validate()?;
        tracing::debug!(
            periods = cash_flows.len(),
            rate_min = cfg.rate_min,
            rate_max = cfg.rate_max,
            step = cfg.step,
            "Analyzing cash flows"
        );
        let table = npv_table(&cash_flows, &TABLE_RATES);
        let irrs = find_all_irrs(&cash_flows, cfg);
        let sign_changes = cash_flows.sign_changes();
        Ok(IrrAnalysis {
            cash_flows,
            table,
            irrs,
            sign_changes,
        })
    }
}
