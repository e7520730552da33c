// ── Logging setup ─────────────────────────────────────────────────────────────
//
// Diagnostic output for hosts that do not install their own subscriber.
// Every native call path emits `tracing` events (`trace` for individual OS
// calls, `debug` for lifecycle steps).  Hosts that already run a subscriber
// need nothing from here.

use once_cell::sync::OnceCell;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `native_frame=trace`.
pub const LOG_ENV: &str = "NATIVE_FRAME_LOG";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human-readable.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level used when neither `filter` nor `NATIVE_FRAME_LOG` is set.
    pub level: Level,
    pub format: LogFormat,
    /// Include source file and line.
    pub include_location: bool,
    /// Explicit filter directive; takes precedence over the environment.
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: Level::INFO, format: LogFormat::Pretty, include_location: false, filter: None }
    }
}

impl LogConfig {
    /// Every OS call, with source locations.
    pub fn trace() -> Self {
        Self { level: Level::TRACE, include_location: true, ..Default::default() }
    }

    pub fn compact(mut self) -> Self {
        self.format = LogFormat::Compact;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// The filter this configuration resolves to.
    ///
    /// An unparsable directive falls back to `level`.
    pub fn env_filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.level.to_string());
        match &self.filter {
            Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| fallback()),
            None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| fallback()),
        }
    }
}

static INSTALLED: OnceCell<bool> = OnceCell::new();

/// Install a global subscriber for `config`.
///
/// Only the first call does anything.  Returns `false` if another
/// subscriber was already installed by the host.
pub fn init_logging(config: &LogConfig) -> bool {
    *INSTALLED.get_or_init(|| {
        let filter = config.env_filter();
        let installed = match config.format {
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .try_init(),
            LogFormat::Compact => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_target(true))
                .try_init(),
        };
        installed.is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.filter.is_none());
    }

    #[test]
    fn trace_config_includes_location() {
        let config = LogConfig::trace().compact();
        assert_eq!(config.level, Level::TRACE);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.include_location);
    }

    #[test]
    fn explicit_filter_wins() {
        let config = LogConfig::default().with_filter("native_frame=trace");
        assert_eq!(config.env_filter().to_string().to_lowercase(), "native_frame=trace");
    }

    #[test]
    fn bad_filter_falls_back_to_level() {
        let config = LogConfig { level: Level::WARN, ..Default::default() }.with_filter("native_frame=loud");
        assert_eq!(config.env_filter().to_string().to_lowercase(), "warn");
    }

    #[test]
    fn init_is_idempotent() {
        let config = LogConfig::default().with_filter("off");
        let first = init_logging(&config);
        assert_eq!(init_logging(&LogConfig::trace()), first);
    }
}
