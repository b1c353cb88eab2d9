// src/analytics/gbm_analytic.rs
//! Closed-form results for Geometric Brownian Motion
//!
//! # Terminal Distribution
//!
//! Under `dS_t = μ S_t dt + σ S_t dW_t` the terminal price is lognormal:
//! ```text
//! E[S_T]   = S_0 e^(μT)
//! Std[S_T] = S_0 e^(μT) √(e^(σ²T) - 1)
//! ```
//!
//! These are the targets the Monte Carlo terminal statistics converge to.

use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

/// Standard normal CDF `Φ(x)`
///
/// Written through `erfc` so the lower tail keeps its relative precision
/// instead of cancelling against `1`.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Mean of the GBM terminal price
pub fn gbm_terminal_mean(s0: f64, mu: f64, t: f64) -> f64 {
    s0 * (mu * t).exp()
}

/// Standard deviation of the GBM terminal price
pub fn gbm_terminal_std(s0: f64, mu: f64, sigma: f64, t: f64) -> f64 {
    s0 * (mu * t).exp() * ((sigma * sigma * t).exp() - 1.0).sqrt()
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt());
    let d2 = d1 - sigma * t.sqrt();
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Expected undiscounted call payoff `E[max(S_T - K, 0)]` under drift μ
///
/// This is what the Monte Carlo call estimate targets: the Black-Scholes price
/// with `r = μ`, compounded back by `e^(μT)`. Degenerate volatility or horizon
/// collapses to the deterministic forward payoff.
pub fn undiscounted_call_reference(s0: f64, k: f64, mu: f64, sigma: f64, t: f64) -> f64 {
    if sigma <= 0.0 || t <= 0.0 {
        return (gbm_terminal_mean(s0, mu, t) - k).max(0.0);
    }
    bs_call_price(s0, k, mu, sigma, t) * (mu * t).exp()
}
