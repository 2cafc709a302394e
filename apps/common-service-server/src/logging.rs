use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::{LogFormat, LoggingConfig};

/// Third-party targets capped below the configured level.
const NOISY_TARGETS: &[(&str, &str)] = &[
    ("sqlx", "warn"),
    ("sea_orm", "warn"),
    ("hyper", "warn"),
    ("h2", "warn"),
    ("tower_http", "info"),
];

/// Builds the filter from the configured level plus the noisy-crate caps.
///
/// `RUST_LOG`, when set, replaces the whole directive set.
fn build_env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(from_env) = std::env::var(EnvFilter::DEFAULT_ENV) {
        return EnvFilter::try_new(&from_env)
            .map_err(|e| anyhow!("invalid RUST_LOG filter '{from_env}': {e}"));
    }
    let filter = directives(level);
    EnvFilter::try_new(&filter).map_err(|e| anyhow!("invalid logging.level '{filter}': {e}"))
}

fn directives(level: &str) -> String {
    let mut directives = vec![level.to_owned()];
    directives.extend(
        NOISY_TARGETS
            .iter()
            .map(|(target, lvl)| format!("{target}={lvl}")),
    );
    directives.join(",")
}

/// Installs the global subscriber.
///
/// # Errors
/// Returns an error if the level is not a valid filter or a subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_env_filter(&config.level)?;
    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()?,
    }
    Ok(())
}
