use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogConfig;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Returns an error if a subscriber is already installed.
pub fn setup_tracing(config: &LogConfig) -> Result<(), String> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = fmt().with_env_filter(env_filter).with_timer(fmt::time::uptime());
    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    result.map_err(|e| format!("Failed to initialize tracing: {}", e))
}
