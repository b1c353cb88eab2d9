// src/mc/paths.rs
use crate::error::{validation::*, FinResult};
use crate::models::gbm::Gbm;
use crate::rng::{self, RngFactory};
use ndarray::{Array1, Array2, Zip};
use rand::Rng;

/// Trading days per year used to derive the step count
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Parameters of a GBM path simulation
#[derive(Debug, Clone, PartialEq)]
pub struct GbmConfig {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
    pub t: f64,
    pub dt: f64,
    pub paths: usize,
    pub strike: f64,
    /// `None` draws the seed from OS entropy
    pub seed: Option<u64>,
}

impl GbmConfig {
    /// Number of time steps, `T / dt` rounded to the nearest integer
    pub fn steps(&self) -> usize {
        (self.t / self.dt).round() as usize
    }

    pub fn model(&self) -> Gbm {
        Gbm::new(self.s0, self.mu, self.sigma)
    }

    /// Validate the simulation configuration
    pub fn validate(&self) -> FinResult<()> {
        validate_paths(self.paths)?;
        validate_positive("s0", self.s0)?;
        validate_finite("mu", self.mu)?;
        validate_finite("sigma", self.sigma)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_positive("t", self.t)?;
        validate_positive("dt", self.dt)?;
        validate_steps(self.steps())?;
        validate_non_negative("strike", self.strike)?;
        Ok(())
    }
}

impl Default for GbmConfig {
    fn default() -> Self {
        GbmConfig {
            s0: 100.0,
            mu: 0.08,
            sigma: 0.20,
            t: 1.0,
            dt: 1.0 / TRADING_DAYS_PER_YEAR,
            paths: 1000,
            strike: 105.0,
            seed: None,
        }
    }
}

/// Draw a `(steps, paths)` matrix of independent standard normal shocks
///
/// Cells are filled in row-major order from the single generator passed in,
/// so a seeded generator always yields the same matrix.
pub fn generate_shocks<R: Rng + ?Sized>(steps: usize, paths: usize, rng: &mut R) -> Array2<f64> {
    Array2::from_shape_simple_fn((steps, paths), || rng::get_normal_draw(&mut *rng))
}

/// Integrate GBM paths from a pre-drawn shock matrix
///
/// # Algorithm
///
/// ```text
/// S[0, i] = S_0
/// S[t, i] = S[t-1, i] * exp((μ - σ²/2) dt + σ √dt Z[t-1, i])
/// ```
///
/// Returns a `(steps + 1, paths)` grid indexed by (time step, path). Paths are
/// integrated in parallel; each one only reads its own column of shocks.
pub fn simulate_paths_with_shocks(model: &Gbm, dt: f64, shocks: &Array2<f64>) -> Array2<f64> {
    let (steps, paths) = shocks.dim();
    let (drift, diffusion) = model.step_coefficients(dt);
    let s0 = model.s0;

    let mut grid = Array2::<f64>::zeros((steps + 1, paths));
    Zip::from(grid.columns_mut())
        .and(shocks.columns())
        .par_for_each(|mut path, z| {
            path[0] = s0;
            for t in 1..=steps {
                path[t] = path[t - 1] * (drift + diffusion * z[t - 1]).exp();
            }
        });
    grid
}

/// Simulate GBM paths with shocks drawn from the supplied generator
pub fn simulate_paths<R: Rng + ?Sized>(cfg: &GbmConfig, rng: &mut R) -> Array2<f64> {
    let steps = cfg.steps();
    tracing::debug!(
        paths = cfg.paths,
        steps,
        s0 = cfg.s0,
        mu = cfg.mu,
        sigma = cfg.sigma,
        "Simulating GBM paths"
    );
    let shocks = generate_shocks(steps, cfg.paths, rng);
    simulate_paths_with_shocks(&cfg.model(), cfg.dt, &shocks)
}

/// Simulate GBM paths with one independent RNG stream per path
///
/// Path `i` draws its shocks from `factory.create_std_rng(i)`, so every column
/// of the result is reproducible regardless of the rayon thread count.
pub fn simulate_paths_seeded(cfg: &GbmConfig, factory: &RngFactory) -> Array2<f64> {
    let steps = cfg.steps();
    let model = cfg.model();
    let (drift, diffusion) = model.step_coefficients(cfg.dt);
    tracing::debug!(
        paths = cfg.paths,
        steps,
        base_seed = factory.base_seed(),
        "Simulating GBM paths with per-path streams"
    );

    let mut grid = Array2::<f64>::zeros((steps + 1, cfg.paths));
    Zip::indexed(grid.columns_mut()).par_for_each(|i, mut path| {
        let mut rng = factory.create_std_rng(i as u64);
        path[0] = model.s0;
        for t in 1..=steps {
            let z = rng::get_normal_draw(&mut rng);
            path[t] = path[t - 1] * (drift + diffusion * z).exp();
        }
    });
    grid
}

/// Final row of a path grid: one terminal price per path
pub fn terminal_prices(grid: &Array2<f64>) -> Array1<f64> {
    grid.row(grid.nrows() - 1).to_owned()
}
