// src/cashflow/npv.rs
//! Net Present Value
//!
//! ```text
//! NPV(r) = Σ c_t / (1 + r)^t,   t = 0..n-1
//! ```
//!
//! Defined for `r > -1`. At `r = -1` every discount factor divides by zero and
//! the result is infinite or NaN; this is left unguarded.

/// Discount rates of the summary NPV table: 0%, 5%, 10%, 15%, 20%
pub const TABLE_RATES: [f64; 5] = [0.0, 0.05, 0.10, 0.15, 0.20];

/// One evaluated point of an NPV profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpvPoint {
    pub rate: f64,
    pub npv: f64,
}

/// Net present value of `cash_flows` at `rate`
pub fn npv(rate: f64, cash_flows: &[f64]) -> f64 {
    let growth = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / growth.powi(t as i32))
        .sum()
}

/// NPV at each of the given rates, in order
pub fn npv_table(cash_flows: &[f64], rates: &[f64]) -> Vec<NpvPoint> {
    rates
        .iter()
        .map(|&rate| NpvPoint {
            rate,
            npv: npv(rate, cash_flows),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npv_at_zero_is_sum() {
        let flows = [-1000.0, 300.0, 400.0, 500.0, -50.0];
        assert_eq!(npv(0.0, &flows), flows.iter().sum::<f64>());
    }

    #[test]
    fn test_npv_single_period() {
        assert!((npv(0.21, &[-100.0, 121.0])).abs() < 1e-12);
        assert!((npv(0.10, &[-100.0, 110.0])).abs() < 1e-12);
    }

    #[test]
    fn test_npv_decreases_for_conventional_flows() {
        let flows = [-1000.0, 300.0, 300.0, 300.0, 300.0, 300.0];
        assert!(npv(0.05, &flows) > npv(0.10, &flows));
        assert!(npv(0.10, &flows) > npv(0.20, &flows));
    }

    #[test]
    fn test_npv_empty_is_zero() {
        assert_eq!(npv(0.1, &[]), 0.0);
    }

    #[test]
    fn test_npv_table_uses_fixed_rates() {
        let table = npv_table(&[-100.0, 60.0, 60.0], &TABLE_RATES);
        assert_eq!(table.len(), 5);
        assert_eq!(table[0].rate, 0.0);
        assert_eq!(table[0].npv, 20.0);
        assert!(table.windows(2).all(|w| w[0].npv > w[1].npv));
    }
}
