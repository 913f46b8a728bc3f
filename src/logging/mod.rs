//! Logging initialization with environment-based formatters
//!
//! - Production: Structured JSON logs for cloud monitoring and audit capture
//! - Sandbox: Colorful, human-readable logs for development

use crate::config::{get_environment, is_production};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize logging based on the `ENVIRONMENT` variable
pub fn init_logging() {
    init_logging_for(&get_environment());
}

/// Initialize logging for an explicit environment name.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_logging_for(environment: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if is_production(environment) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stdout),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .init();
    }
}
