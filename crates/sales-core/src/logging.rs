//! Process-wide tracing subscriber installation.
//!
//! Nothing in the sales crates installs a subscriber on its own; the
//! process entry point calls [`init`] once with its [`LoggingConfig`].

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;
use crate::error::AppError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns a
/// configuration error if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init(),
        _ => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    result.map_err(|e| AppError::configuration(format!("Failed to install logger: {e}")))
}
