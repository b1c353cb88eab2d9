//! Option Payoff Functions
//!
//! # Mathematical Definitions
//!
//! - **European call**: max(S_T - K, 0), right to buy at strike K at maturity
//!
//! # Pricing Convention
//!
//! Prices produced here are the plain Monte Carlo average of the payoff under
//! the simulated (real-world drift) measure. They are **not discounted**; for
//! a present value multiply by `exp(-r T)` yourself.

use ndarray::ArrayView1;

/// Supported option payoff types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payoff {
    /// European call option: max(S_T - K, 0)
    EuropeanCall { k: f64 },
}

impl Payoff {
    /// Payoff of a single terminal price
    pub fn calculate(&self, s_t: f64) -> f64 {
        match self {
            Payoff::EuropeanCall { k } => (s_t - k).max(0.0),
        }
    }

    /// Monte Carlo estimate: mean payoff across terminal prices (undiscounted)
    pub fn expected_value(&self, terminal: ArrayView1<f64>) -> f64 {
        if terminal.is_empty() {
            return f64::NAN;
        }
        terminal.iter().map(|&s| self.calculate(s)).sum::<f64>() / terminal.len() as f64
    }
}

/// European call price as the undiscounted mean of max(S_T - K, 0)
pub fn european_call_price(terminal: ArrayView1<f64>, strike: f64) -> f64 {
    Payoff::EuropeanCall { k: strike }.expected_value(terminal)
}
