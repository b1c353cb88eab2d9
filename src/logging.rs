// src/logging.rs
use crate::error::{FinError, FinResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging to stderr so that stdout only carries the report.
///
/// The level applies to this crate; `RUST_LOG` overrides it when set.
pub fn init_logging(level: &str) -> FinResult<()> {
    let default_filter = format!("finsim={level},gbm_sim={level},npv_irr={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()
        .map_err(|e| FinError::InvalidConfiguration {
            field: "log_level".to_string(),
            reason: e.to_string(),
        })?;

    tracing::debug!(level, "Logging initialized");
    Ok(())
}
