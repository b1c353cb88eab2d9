// src/models/gbm.rs
//! Geometric Brownian Motion
//!
//! ```text
//! dS_t = μ S_t dt + σ S_t dW_t
//! ```
//!
//! Stepped with the exact log-Euler solution
//!
//! ```text
//! S_{t+dt} = S_t * exp((μ - σ²/2) dt + σ √dt Z),  Z ~ N(0,1)
//! ```
//!
//! which is unbiased at any step size and keeps prices positive.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gbm {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(s0: f64, mu: f64, sigma: f64) -> Self {
        Gbm { s0, mu, sigma }
    }

    /// Per-step multiplier coefficients `(drift, diffusion)` for a fixed `dt`
    ///
    /// The step is then `s * exp(drift + diffusion * z)`.
    pub fn step_coefficients(&self, dt: f64) -> (f64, f64) {
        (
            (self.mu - 0.5 * self.sigma * self.sigma) * dt,
            self.sigma * dt.sqrt(),
        )
    }

    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        let (drift, diffusion) = self.step_coefficients(dt);
        s_t * (drift + diffusion * normal_draw).exp()
    }
}
