// src/cashflow/mod.rs
//! Cash-flow analysis: net present value and internal rates of return
//!
//! A cash-flow sequence is indexed by period starting at 0; the initial outlay
//! is conventionally negative. All solvers take `&[f64]`, and [`CashFlows`]
//! dereferences to that slice.

pub mod bisection;
pub mod irr;
pub mod npv;

use crate::error::{FinError, FinResult};
use std::ops::Deref;

/// Immutable ordered cash-flow sequence, period 0 first
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlows {
    values: Vec<f64>,
}

impl CashFlows {
    pub fn new(values: Vec<f64>) -> Self {
        CashFlows { values }
    }

    /// Build a sequence, rejecting empty input and non-finite values
    pub fn try_new(values: Vec<f64>) -> FinResult<Self> {
        if values.is_empty() {
            return Err(FinError::CashFlowError {
                reason: "at least one period (t=0) is required".to_string(),
            });
        }
        if let Some((t, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(FinError::CashFlowError {
                reason: format!("cash flow at t={} is not finite: {}", t, v),
            });
        }
        Ok(Self::new(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Undiscounted total, equal to the NPV at a zero rate
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Number of sign changes, ignoring zero flows
    ///
    /// By Descartes' rule of signs this bounds the number of IRRs with
    /// `1 + r > 0`.
    pub fn sign_changes(&self) -> usize {
        let mut changes = 0;
        let mut previous: Option<bool> = None;
        for &v in self.values.iter().filter(|v| **v != 0.0) {
            let positive = v > 0.0;
            if let Some(p) = previous {
                if p != positive {
                    changes += 1;
                }
            }
            previous = Some(positive);
        }
        changes
    }
}

impl Deref for CashFlows {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

impl From<Vec<f64>> for CashFlows {
    fn from(values: Vec<f64>) -> Self {
        CashFlows::new(values)
    }
}
