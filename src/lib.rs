//! # finsim: Monte Carlo GBM Paths and Cash-Flow Analysis
//!
//! Two independent numeric toolkits:
//!
//! - **GBM Path Simulator**: simulates stock-price paths under Geometric Brownian
//!   Motion with the exact log-Euler step, summarizes the terminal distribution
//!   against its closed form and prices an (undiscounted) European call.
//! - **NPV/IRR Solver**: evaluates net present value at arbitrary rates and finds
//!   every internal rate of return inside a rate range by grid bracketing plus
//!   bisection.
//!
//! ## Quick Start
//!
//! ```rust
//! use finsim::mc::paths::{simulate_paths, GbmConfig};
//! use finsim::mc::stats::SimulationSummary;
//! use finsim::rng;
//!
//! let cfg = GbmConfig { paths: 500, ..Default::default() };
//! let mut rng = rng::seed_rng_from_u64(42);
//! let grid = simulate_paths(&cfg, &mut rng);
//! let summary = SimulationSummary::from_grid(&cfg, &grid);
//! println!("Call price: ${:.2}", summary.call_price);
//! ```
//!
//! ```rust
//! use finsim::cashflow::irr::{find_all_irrs, IrrConfig};
//! use finsim::cashflow::CashFlows;
//!
//! let flows = CashFlows::new(vec![-100.0, 121.0]);
//! let result = find_all_irrs(&flows, &IrrConfig::default());
//! assert_eq!(result.roots.len(), 1);
//! assert!((result.roots[0].rate - 0.21).abs() < 1e-6);
//! ```

// Module declarations
pub mod error;
pub mod rng;
pub mod logging;
pub mod models;
pub mod mc;
pub mod analytics;
pub mod cashflow;
pub mod input;
pub mod output;
pub mod report;

// Re-export commonly used types for convenience
pub use error::{FinError, FinResult};
