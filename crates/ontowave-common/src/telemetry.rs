//! Console tracing for native hosts.
//!
//! Logs go to stderr so commands that print documents to stdout stay
//! pipeable. `RUST_LOG` overrides the configured level.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Reported once at startup.
    pub service_name: String,
    /// Console log level (default: INFO, DEBUG in debug builds)
    pub console_level: Level,
}

impl TelemetryConfig {
    /// Defaults for `service_name`; `RUST_LOG` is read at [`init`].
    pub fn new(service_name: impl Into<String>) -> Self {
        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        Self {
            service_name: service_name.into(),
            console_level,
        }
    }

    /// Same config with an explicit level, e.g. from a `--verbose` flag.
    pub fn with_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.console_level.as_str().to_lowercase()))
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init(config: TelemetryConfig) {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(config.filter());

    tracing_subscriber::registry().with(console_layer).init();

    tracing::debug!(service = %config.service_name, "telemetry initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_overrides_build_default() {
        let default = TelemetryConfig::new("ontowave");
        let expected = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };
        assert_eq!(default.console_level, expected);

        let config = TelemetryConfig::new("ontowave").with_level(Level::WARN);
        assert_eq!(config.console_level, Level::WARN);
        assert_eq!(config.service_name, "ontowave");
    }
}
