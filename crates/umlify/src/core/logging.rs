//! Logging bootstrap for the analysis pipeline
//!
//! Every pipeline stage emits `tracing` spans and events; this module only
//! installs a subscriber. Library users who already install their own
//! subscriber never need to call it.
//!
//! # Usage
//!
//! ```rust,no_run
//! use umlify::core::logging::init_logging;
//!
//! // Defaults: `warn` level, compact format
//! init_logging(None, None).ok();
//!
//! // Watch individual matches being accepted or rejected
//! init_logging(Some("umlify::parser=trace"), Some("pretty")).ok();
//! ```
//!
//! # Levels
//!
//! - `info`: one event per conversion
//! - `debug`: per-stage counts (types, fields, relationships)
//! - `trace`: every accepted or depth-rejected member match and every
//!   claimed relationship pair
//!
//! # Environment Variables
//!
//! - `UMLIFY_LOG_LEVEL`: level or filter directive
//! - `UMLIFY_LOG_FORMAT`: `compact`, `pretty`, or `json`
//! - `RUST_LOG`: standard `tracing-subscriber` filter, used when
//!   `UMLIFY_LOG_LEVEL` is unset
//!
//! ```bash
//! RUST_LOG="umlify::parser::relationships=trace" umlify relationships -i Car.java
//! ```

use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

#[cfg(target_arch = "wasm32")]
use tracing_wasm::WASMLayerConfig;

/// Level used when neither an argument nor the environment names one
pub const DEFAULT_LEVEL: &str = "warn";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Pick the level: explicit argument, then `UMLIFY_LOG_LEVEL`, then
/// `RUST_LOG`, then [`DEFAULT_LEVEL`]
pub fn resolve_level(level: Option<&str>) -> String {
    level
        .map(str::to_string)
        .or_else(|| std::env::var("UMLIFY_LOG_LEVEL").ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Pick the format: explicit argument, then `UMLIFY_LOG_FORMAT`, then compact
pub fn resolve_format(format: Option<&str>) -> Result<LogFormat, String> {
    match format
        .map(str::to_string)
        .or_else(|| std::env::var("UMLIFY_LOG_FORMAT").ok())
    {
        Some(name) => LogFormat::from_str(&name),
        None => Ok(LogFormat::default()),
    }
}

/// Install the global tracing subscriber
///
/// Returns an error for an unknown format or when a global subscriber is
/// already installed. An unparsable level falls back to [`DEFAULT_LEVEL`].
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(target_arch = "wasm32")]
    {
        // tracing-wasm logs to the browser console and ignores level/format
        let _ = (level, format);
        tracing_wasm::set_as_global_default_with_config(WASMLayerConfig::default());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let log_level = resolve_level(level);
        let format = resolve_format(format).map_err(|e| format!("Invalid log format: {}", e))?;

        let filter = if log_level == "off" {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
        };

        // Logs go to stderr so converted output on stdout stays clean
        match format {
            LogFormat::Compact => {
                Registry::default()
                    .with(filter)
                    .with(
                        fmt::Layer::default()
                            .with_writer(std::io::stderr)
                            .with_target(false)
                            .with_level(true)
                            .with_span_events(FmtSpan::NONE),
                    )
                    .try_init()?;
            }
            LogFormat::Pretty => {
                Registry::default()
                    .with(filter)
                    .with(
                        fmt::Layer::default()
                            .with_writer(std::io::stderr)
                            .with_target(true)
                            .with_file(true)
                            .with_line_number(true)
                            .with_span_events(FmtSpan::ACTIVE)
                            .pretty(),
                    )
                    .try_init()?;
            }
            LogFormat::Json => {
                Registry::default()
                    .with(filter)
                    .with(
                        fmt::Layer::default()
                            .with_writer(std::io::stderr)
                            .with_target(true)
                            .with_span_events(FmtSpan::CLOSE)
                            .json(),
                    )
                    .try_init()?;
            }
        }

        Ok(())
    }
}

/// Initialize logging with default settings
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_explicit_level_wins() {
        assert_eq!(resolve_level(Some("trace")), "trace");
    }

    #[test]
    fn test_explicit_format_wins() {
        assert_eq!(resolve_format(Some("json")), Ok(LogFormat::Json));
        assert!(resolve_format(Some("yaml")).is_err());
    }
}
