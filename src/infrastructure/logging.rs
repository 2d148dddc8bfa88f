//! Process-wide tracing subscriber

use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

/// sqlx reports every statement at info level
const QUIET_SQLX: &str = "sqlx=warn";

/// Filter from `RUST_LOG`, or the configured level with sqlx statements muted
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| configured_filter(level))
}

fn configured_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("{},{}", level, QUIET_SQLX))
}

/// Install the global subscriber, writing to stderr so that stdout only
/// carries report output
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(build_filter(&config.level));

    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()?,
    }

    tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_filter_mutes_sqlx() {
        let filter = configured_filter("debug").to_string();

        assert!(filter.contains("debug"));
        assert!(filter.contains(QUIET_SQLX));
    }

    #[test]
    fn test_second_init_is_rejected() {
        let config = LoggingConfig::default();

        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
