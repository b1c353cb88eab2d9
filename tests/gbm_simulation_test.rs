// tests/gbm_simulation_test.rs
use finsim::analytics::gbm_analytic;
use finsim::mc::paths::{simulate_paths, simulate_paths_seeded, terminal_prices, GbmConfig};
use finsim::mc::stats::{Histogram, SimulationSummary};
use finsim::rng::{self, RngFactory};

fn config(paths: usize) -> GbmConfig {
    GbmConfig {
        paths,
        // Weekly steps keep the run short; the exact scheme is unbiased at any dt
        dt: 1.0 / 52.0,
        ..Default::default()
    }
}

#[test]
fn test_terminal_moments_match_closed_form() {
    let cfg = config(20_000);
    let mut rng = rng::seed_rng_from_u64(42);
    let grid = simulate_paths(&cfg, &mut rng);
    let summary = SimulationSummary::from_grid(&cfg, &grid);

    println!("\nTheoretical mean: {}", summary.theoretical_mean);
    println!("Simulated mean: {}", summary.simulated.mean);
    println!("Theoretical std: {}", summary.theoretical_std);
    println!("Simulated std: {}", summary.simulated.std_dev);

    assert!(
        summary.mean_rel_error() < 0.01,
        "Mean relative error exceeds 1%: {}",
        summary.mean_rel_error()
    );
    assert!(
        summary.std_rel_error() < 0.05,
        "Std relative error exceeds 5%: {}",
        summary.std_rel_error()
    );
}

#[test]
fn test_call_price_matches_undiscounted_reference() {
    let cfg = config(20_000);
    let factory = RngFactory::new(7);
    let grid = simulate_paths_seeded(&cfg, &factory);
    let summary = SimulationSummary::from_grid(&cfg, &grid);

    let reference =
        gbm_analytic::undiscounted_call_reference(cfg.s0, cfg.strike, cfg.mu, cfg.sigma, cfg.t);
    let rel_error = (summary.call_price - reference).abs() / reference;

    println!("\nMC call price (undiscounted): {}", summary.call_price);
    println!("Reference: {}", reference);

    assert!((summary.call_reference - reference).abs() < 1e-12);
    assert!(rel_error < 0.05, "Call price relative error exceeds 5%: {}", rel_error);
}

#[test]
fn test_mean_error_shrinks_with_more_paths() {
    // Average the error over several seeds so a single lucky small run cannot win
    let mean_error = |paths: usize| -> f64 {
        (0..8u64)
            .map(|seed| {
                let cfg = GbmConfig { paths, dt: 0.25, ..Default::default() };
                let grid = simulate_paths(&cfg, &mut rng::seed_rng_from_u64(1000 + seed));
                SimulationSummary::from_grid(&cfg, &grid).mean_rel_error()
            })
            .sum::<f64>()
            / 8.0
    };

    let small = mean_error(200);
    let large = mean_error(50_000);
    println!("\nAvg mean error with 200 paths: {}", small);
    println!("Avg mean error with 50,000 paths: {}", large);

    assert!(large < small, "Error did not shrink: {} vs {}", large, small);
    assert!(large < 0.005, "Large-sample error too high: {}", large);
}

#[test]
fn test_default_run_shape_and_histogram() {
    let cfg = GbmConfig { seed: Some(2024), ..Default::default() };
    let mut rng = rng::rng_from_seed(cfg.seed);
    let grid = simulate_paths(&cfg, &mut rng);

    assert_eq!(grid.dim(), (253, 1000));
    assert!(grid.row(0).iter().all(|&s| s == 100.0));

    let terminal = terminal_prices(&grid);
    let hist = Histogram::from_values(terminal.view(), 50);
    assert_eq!(hist.bins(), 50);
    assert_eq!(hist.total(), 1000);
}
