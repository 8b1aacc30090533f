//! Logging and tracing initialization for faidds.
//!
//! Operator-facing lines (system calls, start/stop times) are printed
//! directly; everything else goes through `tracing`. Pretty console output is
//! the default, JSON is available for feeding case-management tooling.

use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::LogSettings;

/// Configuration for the logging system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConfig {
    /// Output logs as JSON (for machine parsing)
    pub json: bool,
    /// Enable verbose logging (sets default level to DEBUG)
    pub verbose: bool,
}

impl From<&LogSettings> for LogConfig {
    fn from(settings: &LogSettings) -> Self {
        Self {
            json: settings.json,
            verbose: settings.verbose,
        }
    }
}

/// Default filter directive when `RUST_LOG` is not set.
fn default_directive(config: &LogConfig) -> String {
    let level = if config.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    format!("faidds={}", level.as_str().to_lowercase())
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Call once, early in `main`, after configuration is loaded. `RUST_LOG`
/// overrides the level chosen here. Logs go to stderr so they never mix with
/// the operator transcript on stdout.
pub fn init(config: LogConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config)));

    if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_current_span(true)
                    .with_target(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .init();
    }
}
