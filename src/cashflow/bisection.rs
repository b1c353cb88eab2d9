// src/cashflow/bisection.rs
//! Bisection root finder for the NPV function
//!
//! # Algorithm
//!
//! Given `[low, high]` with `NPV(low) * NPV(high) <= 0` (otherwise there is no
//! root to find and the result is `None`), an endpoint already within `tol` is
//! returned as is. Then:
//!
//! 1. `mid = (low + high) / 2`
//! 2. If `|NPV(mid)| < tol`, `mid` is the root
//! 3. Otherwise replace the endpoint whose NPV has the same sign as `NPV(mid)`
//!
//! The two endpoints keep bracketing the sign change at every iteration, so the
//! interval halves each time. When the iteration budget runs out the last
//! midpoint is returned as a best-effort estimate flagged `converged = false`.

use crate::cashflow::npv::npv;

pub const DEFAULT_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_MAX_ITER: usize = 1000;

/// A located IRR
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootEstimate {
    pub rate: f64,
    /// NPV evaluated at `rate`
    pub npv: f64,
    /// Midpoints evaluated before stopping (0 when an endpoint was the root)
    pub iterations: usize,
    /// `false` when the iteration budget ran out before `|npv| < tol`
    pub converged: bool,
}

/// Bracket state observed at the start of each bisection iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionStep {
    pub iteration: usize,
    pub low: f64,
    pub high: f64,
    pub npv_low: f64,
    pub npv_high: f64,
}

/// Find a rate in `[low, high]` where NPV is within `tol` of zero
///
/// Returns `None` when NPV has the same sign at both ends (no root in this
/// bracket).
pub fn irr_bisection_interval(
    cash_flows: &[f64],
    low: f64,
    high: f64,
    tol: f64,
    max_iter: usize,
) -> Option<RootEstimate> {
    irr_bisection_traced(cash_flows, low, high, tol, max_iter, |_| {})
}

/// [`irr_bisection_interval`] reporting the bracket before every iteration
pub fn irr_bisection_traced<F>(
    cash_flows: &[f64],
    mut low: f64,
    mut high: f64,
    tol: f64,
    max_iter: usize,
    mut on_step: F,
) -> Option<RootEstimate>
where
    F: FnMut(&BisectionStep),
{
    let mut npv_low = npv(low, cash_flows);
    let mut npv_high = npv(high, cash_flows);

    let sign_product = npv_low * npv_high;
    if sign_product > 0.0 || sign_product.is_nan() {
        return None;
    }

    for (rate, value) in [(low, npv_low), (high, npv_high)] {
        if value.abs() < tol {
            return Some(RootEstimate {
                rate,
                npv: value,
                iterations: 0,
                converged: true,
            });
        }
    }

    let mut mid = 0.5 * (low + high);
    let mut npv_mid = npv(mid, cash_flows);

    for iteration in 1..=max_iter {
        on_step(&BisectionStep {
            iteration,
            low,
            high,
            npv_low,
            npv_high,
        });

        mid = 0.5 * (low + high);
        npv_mid = npv(mid, cash_flows);

        if npv_mid.abs() < tol {
            tracing::trace!(rate = mid, npv = npv_mid, iteration, "Bisection converged");
            return Some(RootEstimate {
                rate: mid,
                npv: npv_mid,
                iterations: iteration,
                converged: true,
            });
        }

        if npv_low * npv_mid < 0.0 {
            high = mid;
            npv_high = npv_mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    tracing::warn!(
        rate = mid,
        npv = npv_mid,
        max_iter,
        "Bisection hit the iteration limit, returning last midpoint"
    );
    Some(RootEstimate {
        rate: mid,
        npv: npv_mid,
        iterations: max_iter,
        converged: false,
    })
}
