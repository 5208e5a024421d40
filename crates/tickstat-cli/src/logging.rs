use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub filter: String,
}

impl LoggingConfig {
    /// `TICKSTAT_LOG`, then `RUST_LOG`, then `warn`. `--verbose` wins over
    /// both.
    pub fn from_env(verbose: bool) -> Self {
        Self::resolve(
            verbose,
            std::env::var("TICKSTAT_LOG").ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn resolve(verbose: bool, tickstat_log: Option<String>, rust_log: Option<String>) -> Self {
        let filter = if verbose {
            String::from(VERBOSE_LEVEL)
        } else {
            tickstat_log
                .or(rust_log)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| String::from(DEFAULT_LEVEL))
        };
        Self { filter }
    }
}

/// Installs the fmt subscriber on stderr so stdout stays machine-readable.
pub fn init_logging(config: &LoggingConfig) -> Result<(), CliError> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|error| CliError::Logging(format!("invalid filter '{}': {error}", config.filter)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|error| CliError::Logging(error.to_string()))
}
