//! Logging setup for medreport
//!
//! The library itself only emits `tracing` events; these helpers install a
//! `tracing-subscriber` formatter for applications that don't bring their own.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{ReportError, Result};

/// Environment variable that overrides the level passed to [`init_logging`].
pub const LOG_ENV_VAR: &str = "MEDREPORT_LOG";

/// Log levels supported by medreport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    /// Includes finish reasons and per-part details of model responses
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Initialize logging for medreport with a specific log level.
///
/// `MEDREPORT_LOG` takes precedence when set:
///
/// ```bash
/// MEDREPORT_LOG=medreport=debug cargo run --example generate_report
/// ```
///
/// Returns `ConfigError` if a global subscriber is already installed.
///
/// ```no_run
/// use medreport::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Info).expect("logging is initialized once");
/// tracing::info!("Application starting");
/// ```
pub fn init_logging(level: LogLevel) -> Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(format!("medreport={}", level.to_tracing_level())));

    install(env_filter)?;
    tracing::info!("medreport logging initialized at level: {:?}", level);
    Ok(())
}

/// Initialize logging with a custom filter directive such as
/// `"medreport=debug,medreport::backend=trace"`.
///
/// An invalid directive falls back to `medreport=info`.
pub fn init_logging_with_filter(filter: &str) -> Result<()> {
    let (env_filter, invalid) = match EnvFilter::try_new(filter) {
        Ok(env_filter) => (env_filter, false),
        Err(_) => (EnvFilter::new("medreport=info"), true),
    };

    install(env_filter)?;
    if invalid {
        tracing::warn!("Invalid filter string: {}, using default (info)", filter);
    }
    tracing::info!("medreport logging initialized with custom filter: {}", filter);
    Ok(())
}

fn install(env_filter: EnvFilter) -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .try_init()
        .map_err(|e| ReportError::ConfigError(format!("logging already initialized: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_initialization_is_an_error() {
        init_logging_with_filter("not a [valid filter").expect("first initialization succeeds");

        let err = init_logging(LogLevel::Debug).unwrap_err();
        assert!(matches!(err, ReportError::ConfigError(_)));
    }
}
